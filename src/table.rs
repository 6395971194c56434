//! Tabular view of a [`FetchResult`], shared by the CLI and the web widget.

use crate::models::FetchResult;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const REPOSITORY_HEADER: &str = "Repository";
pub const LANGUAGE_HEADER: &str = "Primary Language";
pub const ERROR_HEADER: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&FetchResult> for Table {
    fn from(result: &FetchResult) -> Self {
        match result {
            FetchResult::Success(repos) => Table {
                headers: repository_headers(),
                rows: repos
                    .iter()
                    .map(|repo| vec![repo.name.clone(), repo.language.clone()])
                    .collect(),
            },
            FetchResult::Empty => Table {
                headers: repository_headers(),
                rows: Vec::new(),
            },
            other => Table {
                headers: vec![ERROR_HEADER.to_string()],
                rows: other.message().into_iter().map(|m| vec![m]).collect(),
            },
        }
    }
}

fn repository_headers() -> Vec<String> {
    vec![REPOSITORY_HEADER.to_string(), LANGUAGE_HEADER.to_string()]
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                    .chain(std::iter::once(UnicodeWidthStr::width(header.as_str())))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Plain-text rendering with left-aligned columns, padded to terminal
    /// display width.
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_to_width(cell, *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_row(self.headers.as_slice())];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(self.rows.iter().map(|row| format_row(row.as_slice())));
        lines.join("\n")
    }

    /// HTML `<table>` with every header and cell escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"table\">\n<thead><tr>");
        for header in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>");
        html
    }
}

fn pad_to_width(cell: &str, width: usize) -> String {
    let cell_width = UnicodeWidthStr::width(cell);
    format!("{}{}", cell, " ".repeat(width.saturating_sub(cell_width)))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
