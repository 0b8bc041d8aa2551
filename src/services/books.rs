//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, BookPatch},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let data = validated(data)?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!("Created book id={}", book.id);
        Ok(book)
    }

    /// Replace every writable field of a book
    pub async fn update(&self, id: i64, data: &BookInput) -> AppResult<Book> {
        let data = validated(data)?;
        let book = self.repository.books.update(id, &data).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    /// Update only the fields present in `patch`
    pub async fn partial_update(&self, id: i64, patch: &BookPatch) -> AppResult<Book> {
        let current = self.repository.books.get_by_id(id).await?;
        let merged = BookInput::from(&current).apply(patch);
        self.update(id, &merged).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

fn validated(data: &BookInput) -> AppResult<BookInput> {
    data.check().map_err(|errors| {
        tracing::debug!("Rejected book input: {:?}", errors);
        AppError::Validation(errors)
    })?;
    Ok(data.normalized())
}
