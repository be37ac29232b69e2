// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for WKT parsing.

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing WKT text.
///
/// Both variants are fatal to the whole parse: WKT ingestion is
/// all-or-nothing per call and no partial results are returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A character the tokenizer does not recognize.
    #[error("unrecognized character {character:?} at offset {offset}")]
    Lex { character: char, offset: usize },

    /// A token sequence that does not match the grammar.
    #[error("expected {expected}, found {found} at offset {offset}")]
    Syntax {
        expected: String,
        found: String,
        offset: usize,
    },
}

impl Error {
    /// Build a syntax error with expected/found context.
    pub(crate) fn syntax(
        expected: impl Into<String>,
        found: impl Into<String>,
        offset: usize,
    ) -> Self {
        Error::Syntax {
            expected: expected.into(),
            found: found.into(),
            offset,
        }
    }

    /// Byte offset into the input the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            Error::Lex { offset, .. } => *offset,
            Error::Syntax { offset, .. } => *offset,
        }
    }
}
