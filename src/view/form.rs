//! Edit form bound to one book

use crate::{
    error::FieldErrors,
    models::book::{Book, BookField, BookInput},
};

/// Form state for the edit modal.
///
/// Errors are only computed on submit; once a submit has been attempted
/// every change re-validates so messages clear as the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    id: i64,
    values: BookInput,
    errors: FieldErrors,
    submitted: bool,
}

impl EditForm {
    /// Form pre-populated with the values of `book`
    pub fn new(book: &Book) -> Self {
        Self {
            id: book.id,
            values: BookInput::from(book),
            errors: FieldErrors::new(),
            submitted: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn values(&self) -> &BookInput {
        &self.values
    }

    pub fn value(&self, field: BookField) -> &str {
        self.values.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// First message for `field`
    pub fn error(&self, field: BookField) -> Option<&str> {
        self.errors
            .get(field.key())
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        self.values.set(field, value);
        if self.submitted {
            self.validate();
        }
    }

    /// Recompute errors; true when the form may be sent
    pub fn validate(&mut self) -> bool {
        match self.values.check() {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// Replace errors with messages reported by the server
    pub(crate) fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }
}
