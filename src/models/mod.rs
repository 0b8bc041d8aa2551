//! Data models for the Book Store

pub mod book;

pub use book::{Book, BookField, BookInput, BookPatch};
