//! Data assembly for the document detail page.

use crate::client::DocumentClient;
use crate::error::{ClientError, LoadError};
use crate::models::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub document: Document,
    pub download_url: String,
}

/// Fetches the document and its download URL concurrently.
///
/// Both requests are in flight before either is awaited. The first failure
/// ends the load; the other request is dropped and its result discarded.
pub async fn load_document_page(
    client: &DocumentClient,
    id_param: &str,
) -> Result<DocumentPage, LoadError> {
    let id = parse_id(id_param).map_err(fail)?;

    let (document, download_url) =
        tokio::try_join!(client.get_document(id), client.get_download_url(id)).map_err(fail)?;

    Ok(DocumentPage {
        document,
        download_url,
    })
}

/// Fetches only the document, without a download URL.
pub async fn load_document(client: &DocumentClient, id_param: &str) -> Result<Document, LoadError> {
    let id = parse_id(id_param).map_err(fail)?;
    client.get_document(id).await.map_err(fail)
}

fn parse_id(id_param: &str) -> Result<i64, ClientError> {
    id_param
        .trim()
        .parse()
        .map_err(|_| ClientError::request_failed(format!("Invalid document id: {:?}", id_param)))
}

fn fail(cause: ClientError) -> LoadError {
    tracing::warn!("Could not load document: {}", cause);
    LoadError::new(cause)
}
