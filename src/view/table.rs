//! Plain-text rendering of the catalog table and the edit form

use super::{form::EditForm, Row};
use crate::models::book::BookField;

const HEADERS: [&str; 5] = ["S.No", "Title", "Writer", "Year", "Main Contents"];

/// Table cells hold a single line
fn cell(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn separator(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (text, w) in cells.iter().zip(widths) {
        let pad = w - width(text);
        out.push_str(&format!(" {}{} |", text, " ".repeat(pad)));
    }
    out
}

/// Render rows with the columns S.No, Title, Writer, Year, Main Contents
pub fn render_table(rows: &[Row<'_>]) -> String {
    let body: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.serial.to_string(),
                cell(&row.book.name),
                cell(&row.book.writer),
                cell(&row.book.year),
                cell(&row.book.main_contents),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| width(h)).collect();
    for cells in &body {
        for (w, text) in widths.iter_mut().zip(cells.iter()) {
            *w = (*w).max(width(text));
        }
    }

    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rule = separator(&widths);
    let mut out = Vec::with_capacity(body.len() + 4);
    out.push(rule.clone());
    out.push(line(&headers, &widths));
    out.push(rule.clone());
    for cells in &body {
        out.push(line(cells, &widths));
    }
    if !body.is_empty() {
        out.push(rule);
    }
    out.join("\n")
}

/// Render the edit form with its current values and error messages
pub fn render_form(form: &EditForm) -> String {
    let mut out = format!("Edit Book #{}\n", form.id());
    for field in BookField::ALL {
        out.push_str(&format!("  {}: {}\n", field.label(), form.value(field)));
        if let Some(messages) = form.errors().get(field.key()) {
            for message in messages {
                out.push_str(&format!("    ! {}\n", message));
            }
        }
    }
    out
}
