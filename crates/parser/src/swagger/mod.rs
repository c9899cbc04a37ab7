//! Swagger 1.2 loading and translation
//!
//! A Swagger 1.2 description is a resource listing plus one API
//! declaration per listed resource. This module fetches or reads those
//! documents and merges them into a single `Definition`.
//!
//! ## Sources
//! - **Remote**: `http://api.example.com/api-docs`; declarations are
//!   fetched at the listing URL followed by each reference path
//! - **Local**: `/data/api.json`; declarations are read relative to the
//!   listing's directory
//!
//! ## Usage
//! ```rust,ignore
//! use swagger_import_parser::swagger::{translate, LocalLoader, FsReader};
//!
//! let loaded = LocalLoader::new(&FsReader).load(Path::new("api-docs/api.json"))?;
//! let definition = translate(&loaded.listing, &loaded.declarations)?;
//! ```

mod converter;
mod declarations;
mod fetcher;
mod loader;
mod types;

pub use converter::translate;
pub use declarations::{DeclarationMap, KeyConvention};
pub use fetcher::{
    Credentials, DocumentFetcher, DocumentReader, FetchError, FetchRequest, FsReader, HttpFetcher,
};
pub use loader::{LoadedDescription, LocalLoader, RemoteLoader};
pub use types::*;

#[cfg(test)]
pub(crate) use fetcher::{MockDocumentFetcher, MockDocumentReader};
