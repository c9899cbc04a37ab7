//! Source locator classification
//!
//! Decides whether a locator names a network document or a local file.
//! A locator is remote when the whole string matches
//! `(http|https|ftp|file)://` followed by URL characters. `file://`
//! locators are therefore remote; callers that feed them to the remote
//! loader get a retrieval error for the unsupported scheme.

use regex::Regex;
use std::sync::LazyLock;

static REMOTE_LOCATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp|file)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]$")
        .expect("remote locator pattern is valid")
});

/// Where a source locator points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorKind {
    Remote,
    Local,
}

impl LocatorKind {
    /// Classify a source locator
    ///
    /// # Examples
    /// ```
    /// use swagger_import_parser::LocatorKind;
    ///
    /// assert_eq!(
    ///     LocatorKind::classify("https://api.example.com/v1/api-docs"),
    ///     LocatorKind::Remote
    /// );
    /// assert_eq!(LocatorKind::classify("/data/api.json"), LocatorKind::Local);
    /// ```
    pub fn classify(locator: &str) -> Self {
        if REMOTE_LOCATOR.is_match(locator) {
            LocatorKind::Remote
        } else {
            LocatorKind::Local
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, LocatorKind::Remote)
    }
}
