//! Document retrieval collaborators
//!
//! The loaders only depend on [`DocumentFetcher`] (network) and
//! [`DocumentReader`] (filesystem). [`HttpFetcher`] and [`FsReader`] are
//! the production implementations.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use swagger_import_common::ImportConfig;
use thiserror::Error;

/// HTTP Basic credentials
///
/// Empty strings count as absent: credentials are only sent when both
/// the username and the password are non-empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Username and password to send, if both are non-empty
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// A single GET for a description document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// Value of the `Accept` header
    pub accept: String,
    pub credentials: Credentials,
}

/// Errors raised while fetching a remote document
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Unsupported scheme '{scheme}' for {url}")]
    UnsupportedScheme { scheme: String, url: String },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Retrieves remote documents as text
#[cfg_attr(test, mockall::automock)]
pub trait DocumentFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError>;
}

/// Reads local documents as text
#[cfg_attr(test, mockall::automock)]
pub trait DocumentReader {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Blocking HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher honouring the timeout and user agent settings
    pub fn new(config: &ImportConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let url = Url::parse(&request.url).map_err(|e| FetchError::InvalidUrl {
            url: request.url.clone(),
            message: e.to_string(),
        })?;

        // ftp:// and file:// classify as remote but cannot be served here
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: request.url.clone(),
            });
        }

        let mut builder = self.client.get(url).header(ACCEPT, request.accept.as_str());
        if let Some((user, pass)) = request.credentials.basic_auth() {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

/// Filesystem reader
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl DocumentReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
