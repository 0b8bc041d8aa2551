//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
};

/// Storage operations on books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// All books ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Book>;

    async fn create(&self, data: &BookInput) -> AppResult<Book>;

    /// Replace every writable field of book `id`
    async fn update(&self, id: i64, data: &BookInput) -> AppResult<Book>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Check that the store answers
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the configured store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
}

impl Repository {
    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool)),
        }
    }

    /// Repository backed by process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(memory::MemoryBooksRepository::new()),
        }
    }

    pub fn with_books(books: Arc<dyn BooksRepository>) -> Self {
        Self { books }
    }
}
