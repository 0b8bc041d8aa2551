//! Book model

use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::FieldErrors;

/// Catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    /// Title
    pub name: String,
    pub writer: String,
    /// Publication year, free text ("1605", "c. 1200")
    pub year: String,
    pub main_contents: String,
}

/// Writable part of a book, used for create and full update.
///
/// Fields accept JSON strings or numbers (`1605` is stored as `"1605"`).
/// Missing keys and `null` deserialize as empty strings so they surface as
/// "required" field errors rather than a body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookInput {
    #[serde(deserialize_with = "text")]
    #[validate(length(max = 50, message = "Title must be at most 50 characters"))]
    pub name: String,
    #[serde(deserialize_with = "text")]
    #[validate(length(max = 100, message = "Writer must be at most 100 characters"))]
    pub writer: String,
    #[serde(deserialize_with = "text")]
    #[validate(length(max = 50, message = "Year must be at most 50 characters"))]
    pub year: String,
    #[serde(deserialize_with = "text")]
    pub main_contents: String,
}

/// Partial update request.
///
/// An absent key leaves the field alone. A key sent as `null` sets it to
/// empty, which then fails the required check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookPatch {
    #[serde(default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub main_contents: Option<String>,
}

/// Field text from a JSON string or number; `null` is empty
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Err(de::Error::invalid_type(Unexpected::Bool(b), &"a string or a number")),
        Value::Array(_) => Err(de::Error::invalid_type(Unexpected::Seq, &"a string or a number")),
        Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &"a string or a number")),
    }
}

/// Only called for keys present in the body, so `null` becomes `Some("")`
fn present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Some)
}

/// Editable fields of a book, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Writer,
    Year,
    MainContents,
}

impl BookField {
    pub const ALL: [BookField; 4] = [
        BookField::Name,
        BookField::Writer,
        BookField::Year,
        BookField::MainContents,
    ];

    /// JSON key
    pub fn key(self) -> &'static str {
        match self {
            BookField::Name => "name",
            BookField::Writer => "writer",
            BookField::Year => "year",
            BookField::MainContents => "main_contents",
        }
    }

    /// Column / form label
    pub fn label(self) -> &'static str {
        match self {
            BookField::Name => "Title",
            BookField::Writer => "Writer",
            BookField::Year => "Year",
            BookField::MainContents => "Main Contents",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            BookField::Name => "Title is required",
            BookField::Writer => "Writer is required",
            BookField::Year => "Year is required",
            BookField::MainContents => "Main contents are required",
        }
    }
}

impl BookInput {
    pub fn get(&self, field: BookField) -> &str {
        match field {
            BookField::Name => &self.name,
            BookField::Writer => &self.writer,
            BookField::Year => &self.year,
            BookField::MainContents => &self.main_contents,
        }
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookField::Name => self.name = value,
            BookField::Writer => self.writer = value,
            BookField::Year => self.year = value,
            BookField::MainContents => self.main_contents = value,
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            writer: self.writer.trim().to_string(),
            year: self.year.trim().to_string(),
            main_contents: self.main_contents.trim().to_string(),
        }
    }

    /// Validate the normalized input, returning messages keyed by field.
    ///
    /// Every field is required; blank after trimming counts as missing.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let input = self.normalized();
        let mut errors = FieldErrors::new();

        for field in BookField::ALL {
            if input.get(field).is_empty() {
                errors
                    .entry(field.key().to_string())
                    .or_default()
                    .push(field.required_message().to_string());
            }
        }

        if let Err(validation) = input.validate() {
            for (field, field_errors) in validation.field_errors() {
                let entry = errors.entry(field.to_string()).or_default();
                for e in field_errors.iter() {
                    entry.push(
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overlay the fields present in `patch`
    pub fn apply(mut self, patch: &BookPatch) -> Self {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(ref writer) = patch.writer {
            self.writer = writer.clone();
        }
        if let Some(ref year) = patch.year {
            self.year = year.clone();
        }
        if let Some(ref main_contents) = patch.main_contents {
            self.main_contents = main_contents.clone();
        }
        self
    }
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            name: book.name.clone(),
            writer: book.writer.clone(),
            year: book.year.clone(),
            main_contents: book.main_contents.clone(),
        }
    }
}

impl Book {
    pub fn from_input(id: i64, input: BookInput) -> Self {
        Self {
            id,
            name: input.name,
            writer: input.writer,
            year: input.year,
            main_contents: input.main_contents,
        }
    }
}
