//! Client for the paperless document service: typed wrappers around its REST
//! API and the loader that assembles the document detail page.

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;

pub use client::DocumentClient;
pub use config::ClientConfig;
pub use error::{ClientError, LoadError};
pub use loader::{load_document, load_document_page, DocumentPage};
pub use models::{Document, Tag, UploadFile};
