//! HTTP client for the books REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use crate::{
    config::ClientConfig,
    error::{ErrorResponse, FieldErrors},
    models::book::{Book, BookInput},
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded with {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        fields: FieldErrors,
    },
}

impl ClientError {
    /// Server-side validation messages, `None` for every other failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Api { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

/// Remote book operations used by the catalog view
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError>;

    async fn get_book(&self, id: i64) -> Result<Book, ClientError>;

    async fn create_book(&self, data: &BookInput) -> Result<Book, ClientError>;

    /// Send the full record; every field is replaced
    async fn update_book(&self, id: i64, data: &BookInput) -> Result<Book, ClientError>;

    async fn delete_book(&self, id: i64) -> Result<(), ClientError>;
}

/// reqwest-backed [`BooksApi`]
#[derive(Clone, Debug)]
pub struct BooksClient {
    http: Client,
    base_url: String,
}

impl BooksClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8000/api`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/books/", self.base_url)
    }

    fn book_url(&self, id: i64) -> String {
        format!("{}/books/{}", self.base_url, id)
    }
}

/// Turn non-2xx answers into [`ClientError::Api`]
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let error = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => ClientError::Api {
            status,
            message: body.message,
            fields: body.fields,
        },
        Err(_) => ClientError::Api {
            status,
            message: if text.is_empty() { status.to_string() } else { text },
            fields: FieldErrors::new(),
        },
    };
    Err(error)
}

#[async_trait]
impl BooksApi for BooksClient {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let response = self.http.get(self.collection_url()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get_book(&self, id: i64) -> Result<Book, ClientError> {
        let response = self.http.get(self.book_url(id)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_book(&self, data: &BookInput) -> Result<Book, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(data)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_book(&self, id: i64, data: &BookInput) -> Result<Book, ClientError> {
        let response = self.http.put(self.book_url(id)).json(data).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_book(&self, id: i64) -> Result<(), ClientError> {
        let response = self.http.delete(self.book_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}
