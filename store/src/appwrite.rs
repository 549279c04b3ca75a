//! REST client for the Appwrite Databases API.

use crate::{DocumentList, DocumentStore, Query, StoreError};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};

/// Document store backed by an Appwrite deployment.
///
/// Authenticates with a server-side API key; every request carries the
/// project id and key headers the Appwrite REST API expects.
pub struct AppwriteStore {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
}

impl AppwriteStore {
    /// Creates a client for the given deployment.
    ///
    /// `endpoint` is the API root, e.g. `https://cloud.appwrite.io/v1`.
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .header("Content-Type", "application/json")
    }

    /// Maps a non-success response to a `StoreError`, decoding the store's
    /// error body for the message when possible.
    async fn fail(response: Response, collection: &str, id: &str) -> StoreError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return StoreError::not_found(collection, id);
        }
        let message = match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no error message in response body")
                .to_string(),
            Err(e) => format!("undecodable error body: {e}"),
        };
        StoreError::Unexpected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let response = self
            .request(Method::GET, self.document_url(collection, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, collection, id).await);
        }
        Ok(response.json().await?)
    }

    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_wire()))
            .collect();
        let response = self
            .request(Method::GET, self.collection_url(collection))
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, collection, "").await);
        }
        Ok(response.json().await?)
    }

    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> Result<Value, StoreError> {
        // "unique()" asks the store to mint the document id itself.
        let document_id = id.unwrap_or("unique()");
        let response = self
            .request(Method::POST, self.collection_url(collection))
            .json(&json!({ "documentId": document_id, "data": data }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, collection, document_id).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> Result<Value, StoreError> {
        let response = self
            .request(Method::PATCH, self.document_url(collection, id))
            .json(&json!({ "data": data }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, collection, id).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, self.document_url(collection, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, collection, id).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_the_database() {
        let store = AppwriteStore::new("https://cloud.example.com/v1/", "proj", "key", "edtech_db");
        assert_eq!(
            store.collection_url("courses"),
            "https://cloud.example.com/v1/databases/edtech_db/collections/courses/documents"
        );
        assert_eq!(
            store.document_url("courses", "COURSE_1"),
            "https://cloud.example.com/v1/databases/edtech_db/collections/courses/documents/COURSE_1"
        );
    }
}
