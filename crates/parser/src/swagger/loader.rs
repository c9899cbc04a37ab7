//! Resource listing loaders
//!
//! Both loaders read the listing first, then each referenced declaration
//! one at a time in listing order. The first failure aborts the load and
//! nothing partial is returned.

use super::declarations::{DeclarationMap, KeyConvention};
use super::fetcher::{Credentials, DocumentFetcher, DocumentReader, FetchRequest};
use super::types::{ApiDeclaration, ResourceListing};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use swagger_import_common::{ErrorField, ImportError, Result, DEFAULT_ACCEPT};
use tracing::debug;

/// A resource listing together with its declarations
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDescription {
    pub listing: ResourceListing,
    pub declarations: DeclarationMap,
}

/// Loads a description over the network
///
/// Declarations are fetched at `base_url + reference path` and stored
/// with separators stripped from the reference path.
pub struct RemoteLoader<'a, F: DocumentFetcher + ?Sized> {
    fetcher: &'a F,
    credentials: Credentials,
    accept: String,
}

impl<'a, F: DocumentFetcher + ?Sized> RemoteLoader<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self {
            fetcher,
            credentials: Credentials::anonymous(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Override the accepted content type
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Fetch the listing at `base_url` and every declaration it references
    pub fn load(&self, base_url: &str) -> Result<LoadedDescription> {
        debug!("Reading file: {}", base_url);
        let listing: ResourceListing = self.fetch_document(base_url, "resource listing")?;

        let mut declarations = DeclarationMap::new(KeyConvention::StripSeparators);
        for reference in &listing.apis {
            let url = format!("{}{}", base_url, reference.path);
            debug!("Reading file: {}", url);
            let declaration: ApiDeclaration = self.fetch_document(&url, "API declaration")?;
            declarations.insert(&reference.path, declaration);
        }

        Ok(LoadedDescription {
            listing,
            declarations,
        })
    }

    fn fetch_document<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let request = FetchRequest {
            url: url.to_string(),
            accept: self.accept.clone(),
            credentials: self.credentials.clone(),
        };

        let body = self.fetcher.fetch(&request).map_err(|e| {
            ImportError::retrieval(ErrorField::Url, format!("Failed to fetch {}: {}", url, e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ImportError::retrieval(
                ErrorField::Url,
                format!("Failed to parse {} from {}: {}", what, url, e),
            )
        })
    }
}

/// Loads a description from the filesystem
///
/// Declarations are read relative to the listing's directory and stored
/// under their reference path unchanged.
pub struct LocalLoader<'a, R: DocumentReader + ?Sized> {
    reader: &'a R,
}

impl<'a, R: DocumentReader + ?Sized> LocalLoader<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Read the listing at `listing_path` and every declaration it references
    pub fn load(&self, listing_path: &Path) -> Result<LoadedDescription> {
        let listing: ResourceListing = self.read_document(listing_path)?;

        let base_path = base_directory(listing_path);
        debug!("Base path: {}", base_path.display());

        let mut declarations = DeclarationMap::new(KeyConvention::Raw);
        for reference in &listing.apis {
            let path = resolve_reference(&base_path, &reference.path);
            debug!("Reading file {}", path.display());
            let declaration: ApiDeclaration = self.read_document(&path)?;
            declarations.insert(&reference.path, declaration);
        }

        Ok(LoadedDescription {
            listing,
            declarations,
        })
    }

    fn read_document<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = self.reader.read(path).map_err(|e| {
            ImportError::retrieval(
                ErrorField::File,
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ImportError::retrieval(
                ErrorField::File,
                format!("Failed to parse {}: {}", path.display(), e),
            )
        })
    }
}

/// Directory containing the listing; "." for a bare file name
fn base_directory(listing_path: &Path) -> PathBuf {
    match listing_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Declaration path for a reference such as "/pets"
fn resolve_reference(base_path: &Path, reference_path: &str) -> PathBuf {
    base_path.join(reference_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::fetcher::{FetchError, MockDocumentFetcher, MockDocumentReader};
    use mockall::Sequence;
    use std::io;

    const LISTING: &str = r#"{
        "swaggerVersion": "1.2",
        "apiVersion": "1.0.0",
        "apis": [ { "path": "/pets" }, { "path": "/owners" } ]
    }"#;

    fn declaration(base_path: &str) -> String {
        format!(r#"{{ "basePath": "{}", "apis": [] }}"#, base_path)
    }

    #[test]
    fn test_remote_requests_in_listing_order() {
        let mut fetcher = MockDocumentFetcher::new();
        let mut seq = Sequence::new();

        fetcher
            .expect_fetch()
            .withf(|r| r.url == "http://api.example.com/v1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(LISTING.to_string()));
        fetcher
            .expect_fetch()
            .withf(|r| r.url == "http://api.example.com/v1/pets")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(declaration("http://pets")));
        fetcher
            .expect_fetch()
            .withf(|r| r.url == "http://api.example.com/v1/owners")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(declaration("http://owners")));

        let loaded = RemoteLoader::new(&fetcher)
            .load("http://api.example.com/v1")
            .unwrap();

        assert_eq!(
            loaded.declarations.keys().collect::<Vec<_>>(),
            vec!["pets", "owners"]
        );
        assert_eq!(
            loaded.declarations.get("pets").unwrap().base_path.as_deref(),
            Some("http://pets")
        );
        assert_eq!(loaded.declarations.convention(), KeyConvention::StripSeparators);
    }

    #[test]
    fn test_remote_sends_accept_and_credentials() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|r| {
                r.accept == "application/json"
                    && r.credentials.basic_auth() == Some(("admin", "secret"))
            })
            .times(1)
            .returning(|_| Ok(r#"{ "apis": [] }"#.to_string()));

        let loaded = RemoteLoader::new(&fetcher)
            .with_credentials(Credentials::new("admin", "secret"))
            .load("http://api.example.com/v1")
            .unwrap();

        assert!(loaded.declarations.is_empty());
    }

    #[test]
    fn test_remote_second_declaration_failure_aborts() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|r| r.url == "http://api.example.com/v1")
            .returning(|_| Ok(LISTING.to_string()));
        fetcher
            .expect_fetch()
            .withf(|r| r.url.ends_with("/pets"))
            .returning(|_| Ok(declaration("http://pets")));
        fetcher
            .expect_fetch()
            .withf(|r| r.url.ends_with("/owners"))
            .returning(|r| {
                Err(FetchError::Status {
                    url: r.url.clone(),
                    status: 503,
                })
            });

        let err = RemoteLoader::new(&fetcher)
            .load("http://api.example.com/v1")
            .unwrap_err();

        assert!(err.is_retrieval());
        assert_eq!(err.field(), "url");
        assert!(err.message().contains("HTTP 503"));
    }

    #[test]
    fn test_remote_invalid_listing_json() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok("<html>not json</html>".to_string()));

        let err = RemoteLoader::new(&fetcher)
            .load("http://api.example.com/v1")
            .unwrap_err();

        assert_eq!(err.field(), "url");
        assert!(err.message().contains("Failed to parse resource listing"));
    }

    #[test]
    fn test_local_reads_relative_to_listing_directory() {
        let mut reader = MockDocumentReader::new();
        let mut seq = Sequence::new();

        reader
            .expect_read()
            .withf(|p| p == Path::new("/data/api.json"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(LISTING.to_string()));
        reader
            .expect_read()
            .withf(|p| p == Path::new("/data/pets"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(declaration("http://pets")));
        reader
            .expect_read()
            .withf(|p| p == Path::new("/data/owners"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(declaration("http://owners")));

        let loaded = LocalLoader::new(&reader)
            .load(Path::new("/data/api.json"))
            .unwrap();

        assert_eq!(
            loaded.declarations.keys().collect::<Vec<_>>(),
            vec!["/pets", "/owners"]
        );
        assert_eq!(loaded.declarations.convention(), KeyConvention::Raw);
    }

    #[test]
    fn test_local_failure_is_file_error() {
        let mut reader = MockDocumentReader::new();
        reader
            .expect_read()
            .withf(|p| p == Path::new("/data/api.json"))
            .returning(|_| Ok(LISTING.to_string()));
        reader
            .expect_read()
            .withf(|p| p == Path::new("/data/pets"))
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "no such file")));

        let err = LocalLoader::new(&reader)
            .load(Path::new("/data/api.json"))
            .unwrap_err();

        assert!(err.is_retrieval());
        assert_eq!(err.field(), "file");
        assert!(err.message().contains("no such file"));
    }

    #[test]
    fn test_base_directory_of_bare_file_name() {
        assert_eq!(base_directory(Path::new("api.json")), PathBuf::from("."));
        assert_eq!(base_directory(Path::new("/data/api.json")), PathBuf::from("/data"));
        assert_eq!(
            resolve_reference(Path::new("/data"), "/pets/v2.json"),
            PathBuf::from("/data/pets/v2.json")
        );
    }
}
