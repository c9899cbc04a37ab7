//! Swagger 1.2 loading and translation into the canonical API definition
//!
//! This crate locates, retrieves and merges a multi-document Swagger 1.2
//! description (a resource listing referencing N API declarations) and
//! translates it into one `Definition`.
//!
//! ## Pipeline
//! 1. The source locator is classified as remote or local
//! 2. The listing and each declaration are fetched (remote) or read
//!    (local), one at a time in listing order
//! 3. The declarations are merged into a single `Definition`, mapping
//!    every scalar `{type, format}` pair to the canonical vocabulary
//!
//! Any failure aborts the whole pipeline; nothing partial is returned.

mod locator;
mod retry;
pub mod swagger;
mod type_mapper;

pub use locator::LocatorKind;
pub use retry::RetryPolicy;
pub use swagger::{
    Credentials, DocumentFetcher, DocumentReader, FsReader, HttpFetcher, LoadedDescription,
    LocalLoader, RemoteLoader,
};
pub use type_mapper::{SwaggerTypeFormat, TypeMapper};

use std::path::Path;
use swagger_import_common::{
    Definition, ErrorField, ImportConfig, ImportError, Result, DEFAULT_ACCEPT,
};
use tracing::info;

/// Load and translate the description at `source`
///
/// Remote loads use a fresh HTTP client for this call only.
///
/// # Arguments
/// * `source` - Listing URL (`http://...`) or path to a local listing file
/// * `credentials` - HTTP Basic credentials for remote loads
/// * `config` - Network and retry settings
pub fn get_definition(
    source: &str,
    credentials: &Credentials,
    config: &ImportConfig,
) -> Result<Definition> {
    let loaded = load_description(source, credentials, config)?;
    swagger::translate(&loaded.listing, &loaded.declarations)
}

/// Load the listing and declarations at `source` without translating them
pub fn load_description(
    source: &str,
    credentials: &Credentials,
    config: &ImportConfig,
) -> Result<LoadedDescription> {
    check_source(source)?;

    let kind = LocatorKind::classify(source);
    info!("Loading {:?} Swagger description from {}", kind, source);

    let policy = RetryPolicy::from(&config.retry);
    policy.run(|| match kind {
        LocatorKind::Remote => {
            let fetcher = HttpFetcher::new(config).map_err(|e| {
                ImportError::retrieval(
                    ErrorField::Url,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;
            RemoteLoader::new(&fetcher)
                .with_credentials(credentials.clone())
                .with_accept(config.accept.as_str())
                .load(source)
        }
        LocatorKind::Local => LocalLoader::new(&FsReader).load(Path::new(source)),
    })
}

/// Load and translate with caller-supplied collaborators
pub fn get_definition_with<F, R>(
    source: &str,
    credentials: &Credentials,
    fetcher: &F,
    reader: &R,
) -> Result<Definition>
where
    F: DocumentFetcher + ?Sized,
    R: DocumentReader + ?Sized,
{
    check_source(source)?;
    let loaded = load_with(source, credentials, DEFAULT_ACCEPT, fetcher, reader)?;
    swagger::translate(&loaded.listing, &loaded.declarations)
}

fn check_source(source: &str) -> Result<()> {
    if source.is_empty() {
        return Err(ImportError::input("You did not provide any URL"));
    }
    Ok(())
}

fn load_with<F, R>(
    source: &str,
    credentials: &Credentials,
    accept: &str,
    fetcher: &F,
    reader: &R,
) -> Result<LoadedDescription>
where
    F: DocumentFetcher + ?Sized,
    R: DocumentReader + ?Sized,
{
    let kind = LocatorKind::classify(source);
    info!("Loading {:?} Swagger description from {}", kind, source);

    match kind {
        LocatorKind::Remote => RemoteLoader::new(fetcher)
            .with_credentials(credentials.clone())
            .with_accept(accept)
            .load(source),
        LocatorKind::Local => LocalLoader::new(reader).load(Path::new(source)),
    }
}
