//! Client-side search over the loaded books

use crate::models::book::Book;

/// Whether `book` matches `query` on its title or writer, ignoring case
pub fn matches(book: &Book, query: &str) -> bool {
    let needle = query.to_lowercase();
    book.name.to_lowercase().contains(&needle) || book.writer.to_lowercase().contains(&needle)
}

/// Books whose title or writer contains `query`, in their original order.
/// An empty query keeps everything.
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    books.iter().filter(|book| matches(book, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, name: &str, writer: &str) -> Book {
        Book {
            id,
            name: name.into(),
            writer: writer.into(),
            year: "1900".into(),
            main_contents: "Contents".into(),
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "War and Peace", "Leo Tolstoy"),
            book(2, "Anna Karenina", "Leo Tolstoy"),
            book(3, "The Idiot", "Fyodor Dostoevsky"),
        ]
    }

    fn ids(books: Vec<&Book>) -> Vec<i64> {
        books.into_iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        assert_eq!(ids(filter_books(&shelf(), "")), vec![1, 2, 3]);
    }

    #[test]
    fn test_title_match_ignores_case() {
        assert_eq!(ids(filter_books(&shelf(), "IDIOT")), vec![3]);
        assert_eq!(ids(filter_books(&shelf(), "peace")), vec![1]);
    }

    #[test]
    fn test_writer_match_keeps_order() {
        assert_eq!(ids(filter_books(&shelf(), "tolstoy")), vec![1, 2]);
    }

    #[test]
    fn test_substring_inside_word() {
        assert_eq!(ids(filter_books(&shelf(), "karen")), vec![2]);
    }

    #[test]
    fn test_other_fields_are_not_searched() {
        assert!(filter_books(&shelf(), "1900").is_empty());
        assert!(!matches(&shelf()[0], "contents"));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let books = vec![book(1, "Ángeles", "Élodie Dupont")];
        assert_eq!(ids(filter_books(&books, "ángeles")), vec![1]);
        assert!(matches(&books[0], "ÉLODIE"));
    }
}
