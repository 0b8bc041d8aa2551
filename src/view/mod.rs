//! Catalog view model
//!
//! Holds what the catalog page shows: the loaded books, the search text and
//! the edit modal. Network failures are logged and leave the state as it was.

pub mod filter;
pub mod form;
pub mod table;

use crate::{client::BooksApi, models::book::Book};

pub use filter::filter_books;
pub use form::EditForm;
pub use table::{render_form, render_table};

/// One visible table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based position among the visible rows
    pub serial: usize,
    pub book: &'a Book,
}

/// Result of submitting the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No edit form was open
    NoSelection,
    /// Required fields are missing; nothing was sent
    Invalid,
    /// The update succeeded, the list was re-fetched and the form closed
    Updated(Book),
    /// The update request failed; the form stays open
    Failed,
}

#[derive(Debug, Default)]
pub struct CatalogView {
    books: Vec<Book>,
    search: String,
    editor: Option<EditForm>,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Books matching the search, numbered from 1
    pub fn rows(&self) -> Vec<Row<'_>> {
        filter_books(&self.books, &self.search)
            .into_iter()
            .enumerate()
            .map(|(index, book)| Row {
                serial: index + 1,
                book,
            })
            .collect()
    }

    /// Reload the list. Returns whether the fetch succeeded.
    pub async fn refresh<A: BooksApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.list_books().await {
            Ok(books) => {
                tracing::debug!("Loaded {} books", books.len());
                self.books = books;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching book data: {}", e);
                false
            }
        }
    }

    /// Open the edit form for a loaded book
    pub fn open_edit(&mut self, id: i64) -> bool {
        match self.books.iter().find(|book| book.id == id) {
            Some(book) => {
                self.editor = Some(EditForm::new(book));
                true
            }
            None => {
                tracing::warn!("Book {} is not in the loaded list", id);
                false
            }
        }
    }

    pub fn close_edit(&mut self) {
        self.editor = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn editor(&self) -> Option<&EditForm> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditForm> {
        self.editor.as_mut()
    }

    /// Validate and send the edit form
    pub async fn submit<A: BooksApi + ?Sized>(&mut self, api: &A) -> SubmitOutcome {
        let (id, values) = match self.editor.as_mut() {
            None => return SubmitOutcome::NoSelection,
            Some(form) => {
                form.mark_submitted();
                if !form.validate() {
                    return SubmitOutcome::Invalid;
                }
                (form.id(), form.values().normalized())
            }
        };

        match api.update_book(id, &values).await {
            Ok(book) => {
                self.refresh(api).await;
                self.editor = None;
                SubmitOutcome::Updated(book)
            }
            Err(e) => {
                tracing::error!("Error updating book data: {}", e);
                if let (Some(form), Some(fields)) = (self.editor.as_mut(), e.field_errors()) {
                    form.set_errors(fields.clone());
                }
                SubmitOutcome::Failed
            }
        }
    }

    /// The visible rows as a text table
    pub fn render(&self) -> String {
        render_table(&self.rows())
    }
}
