//! In-memory book store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
};

#[derive(Default)]
struct State {
    last_id: i64,
    books: BTreeMap<i64, Book>,
}

/// Ids are never reused, even after a delete.
#[derive(Default)]
pub struct MemoryBooksRepository {
    state: RwLock<State>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BooksRepository for MemoryBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.state
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let book = Book::from_input(state.last_id, data.clone());
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i64, data: &BookInput) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let slot = state.books.get_mut(&id).ok_or_else(|| not_found(id))?;
        *slot = Book::from_input(id, data.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.state
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
