//! Typed client for the document REST API.
//!
//! Every method issues exactly one request. A non-success status is turned
//! into [`ClientError::RequestFailed`] before the body is looked at, so a
//! failed call never yields a partially decoded value.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{describe_status, ClientError, Result};
use crate::models::{
    Document, DownloadUrlResponse, Tag, TagNameRequest, UpdateDocumentRequest, UploadFile,
};

#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
    documents_url: String,
    tags_url: String,
}

impl DocumentClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            documents_url: config.documents_url(),
            tags_url: config.tags_url(),
        }
    }

    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        const OP: &str = "Failed to fetch documents";
        tracing::debug!("GET {}", self.documents_url);

        let response = send(OP, self.http.get(&self.documents_url)).await?;
        decode(OP, response).await
    }

    pub async fn upload_document(&self, title: &str, file: UploadFile) -> Result<Document> {
        const OP: &str = "Upload failed";
        tracing::debug!(
            "POST {} (title={:?}, file={:?}, {} bytes)",
            self.documents_url,
            title,
            file.file_name,
            file.bytes.len()
        );

        let mime = file.mime_type().to_string();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&mime)
            .map_err(|e| ClientError::request_failed(format!("{}: {}", OP, e)))?;
        let form = Form::new().text("title", title.to_string()).part("file", part);

        let response = self
            .http
            .post(&self.documents_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::request_failed(format!("{}: {}", OP, e)))?;

        let status = response.status();
        if !status.is_success() {
            // The body is diagnostic only; failing to read it must not hide the status.
            let message = match response.text().await {
                Ok(body) if !body.trim().is_empty() => {
                    tracing::error!("Failed to upload. Server response: {}", body);
                    format!("{}: {}: {}", OP, describe_status(status), body.trim())
                }
                Ok(_) => format!("{}: {}", OP, describe_status(status)),
                Err(e) => {
                    tracing::error!("Failed to upload. Could not read server response: {}", e);
                    format!("{}: {}", OP, describe_status(status))
                }
            };
            return Err(ClientError::RequestFailed {
                message,
                status: Some(status),
            });
        }

        decode(OP, response).await
    }

    pub async fn get_document(&self, id: i64) -> Result<Document> {
        let op = format!("Failed to fetch document with id {}", id);
        let url = format!("{}/{}", self.documents_url, id);
        tracing::debug!("GET {}", url);

        let response = send(&op, self.http.get(&url)).await?;
        decode(&op, response).await
    }

    pub async fn update_document(&self, id: i64, title: &str, content: &str) -> Result<Document> {
        const OP: &str = "Failed to update document";
        let url = format!("{}/{}", self.documents_url, id);
        tracing::debug!("PUT {}", url);

        let body = UpdateDocumentRequest {
            title: title.to_string(),
            content: content.to_string(),
        };
        let response = send(OP, self.http.put(&url).json(&body)).await?;
        decode(OP, response).await
    }

    pub async fn delete_document(&self, id: i64) -> Result<()> {
        const OP: &str = "Failed to delete document";
        let url = format!("{}/{}", self.documents_url, id);
        tracing::debug!("DELETE {}", url);

        send(OP, self.http.delete(&url)).await?;
        Ok(())
    }

    pub async fn get_download_url(&self, id: i64) -> Result<String> {
        const OP: &str = "Failed to get download URL";
        let url = format!("{}/{}/download-url", self.documents_url, id);
        tracing::debug!("GET {}", url);

        let response = send(OP, self.http.get(&url)).await?;
        let body: DownloadUrlResponse = decode(OP, response).await?;
        Ok(body.url)
    }

    /// The query is percent-encoded as a URL component, so spaces travel as
    /// `%20` rather than the `+` of form encoding.
    pub async fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        const OP: &str = "Failed to search documents";
        let url = format!(
            "{}/search?query={}",
            self.documents_url,
            urlencoding::encode(query)
        );
        tracing::debug!("GET {}", url);

        let response = send(OP, self.http.get(&url)).await?;
        decode(OP, response).await
    }

    pub async fn add_tag(&self, document_id: i64, name: &str) -> Result<Document> {
        const OP: &str = "Failed to add tag to document";
        let url = format!("{}/{}/tags", self.documents_url, document_id);
        tracing::debug!("POST {} (name={:?})", url, name);

        let body = TagNameRequest {
            name: name.to_string(),
        };
        let response = send(OP, self.http.post(&url).json(&body)).await?;
        decode(OP, response).await
    }

    pub async fn remove_tag(&self, document_id: i64, tag_id: i64) -> Result<Document> {
        const OP: &str = "Failed to remove tag from document";
        let url = format!("{}/{}/tags/{}", self.documents_url, document_id, tag_id);
        tracing::debug!("DELETE {}", url);

        let response = send(OP, self.http.delete(&url)).await?;
        decode(OP, response).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        const OP: &str = "Failed to fetch tags";
        tracing::debug!("GET {}", self.tags_url);

        let response = send(OP, self.http.get(&self.tags_url)).await?;
        decode(OP, response).await
    }

    /// Returns the existing tag when the backend already knows the name.
    pub async fn create_tag(&self, name: &str) -> Result<Tag> {
        const OP: &str = "Failed to create tag";
        tracing::debug!("POST {} (name={:?})", self.tags_url, name);

        let body = TagNameRequest {
            name: name.to_string(),
        };
        let response = send(OP, self.http.post(&self.tags_url).json(&body)).await?;
        decode(OP, response).await
    }
}

async fn send(operation: &str, request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::request_failed(format!("{}: {}", operation, e)))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} ({})", operation, status);
        return Err(ClientError::from_status(operation, status));
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        ClientError::request_failed(format!("{}: invalid response body: {}", operation, e))
    })
}
