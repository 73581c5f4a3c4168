//! Report lines written to `<stem> result.txt`.

use std::fmt;

use super::SearchResponse;

/// Marker written when PubPeer has a record for the identifier
pub const FOUND_MARKER: &str = "да";

/// Marker written when PubPeer has no record for the identifier
pub const NOT_FOUND_MARKER: &str = "нет";

/// Field separator used in report lines
pub const FIELD_SEPARATOR: char = '&';

/// One line of a result report, derived from a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLine {
    /// `<identifier>&да&<comments>&<title>`
    Found {
        identifier: String,
        comments_total: u64,
        title: String,
    },
    /// `<identifier>&нет`
    NotFound { identifier: String },
    /// `<identifier> - error`
    Error { identifier: String },
}

impl ResultLine {
    /// Build the line for a successful lookup
    pub fn from_response(identifier: &str, response: &SearchResponse) -> Self {
        let identifier = display_identifier(identifier).to_string();
        match response.first() {
            Some(publication) => ResultLine::Found {
                identifier,
                comments_total: publication.comments_total,
                title: single_line(&publication.title),
            },
            None => ResultLine::NotFound { identifier },
        }
    }

    /// Build the line for a failed lookup
    pub fn error(identifier: &str) -> Self {
        ResultLine::Error {
            identifier: display_identifier(identifier).to_string(),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            ResultLine::Found { identifier, .. }
            | ResultLine::NotFound { identifier }
            | ResultLine::Error { identifier } => identifier,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultLine::Error { .. })
    }
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLine::Found {
                identifier,
                comments_total,
                title,
            } => write!(
                f,
                "{identifier}{sep}{FOUND_MARKER}{sep}{comments_total}{sep}{title}",
                sep = FIELD_SEPARATOR
            ),
            ResultLine::NotFound { identifier } => {
                write!(f, "{identifier}{FIELD_SEPARATOR}{NOT_FOUND_MARKER}")
            }
            ResultLine::Error { identifier } => write!(f, "{identifier} - error"),
        }
    }
}

/// Identifier as it appears in the report: a single trailing period is dropped.
///
/// The period is usually sentence punctuation picked up when DOIs are copied
/// out of reference lists. The API query still uses the raw line.
pub fn display_identifier(identifier: &str) -> &str {
    identifier.strip_suffix('.').unwrap_or(identifier)
}

/// Fold line breaks in API text into single spaces so a report entry never
/// spans more than one line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
