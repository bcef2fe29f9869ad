// Copyright 2025 Lisq Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Lisq
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for Lisq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Lisq operations
///
/// This enum covers parse failures, limit violations, type mismatches,
/// and binary-format corruption. Corruption and internal errors are fatal
/// for the current operation; none is recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Parse errors (invalid text)
    // =========================================================================
    /// Input ended inside an open list
    #[error("unterminated list")]
    UnterminatedList,

    /// Input ended inside a quoted string
    #[error("unterminated string")]
    UnterminatedString,

    /// Input ended immediately after a backslash in a string
    #[error("unterminated string escape")]
    UnterminatedEscape,

    /// Non-whitespace input remained after the root expression
    #[error("unexpected characters after s-expression")]
    TrailingGarbage,

    /// A token with no characters, e.g. between two delimiters
    #[error("empty atom")]
    EmptyAtom,

    /// Input ended where a value was required
    #[error("unexpected end of input")]
    UnexpectedEof,

    // =========================================================================
    // Limit errors
    // =========================================================================
    /// Nesting exceeds the maximum parser depth
    #[error("s-expression nesting exceeds maximum depth of {max}")]
    DepthExceeded { max: usize },

    /// A single value interned more symbols than allowed
    #[error("symbol table exceeds maximum of {max} entries")]
    TooManySymbols { max: usize },

    /// Element data in one list exceeds what a 28-bit offset can address
    #[error("list payload exceeds maximum addressable size")]
    ListTooLarge,

    // =========================================================================
    // Type errors
    // =========================================================================
    /// A list operation was applied to a non-list, non-nil value
    #[error("{op} requires a list")]
    NotAList { op: &'static str },

    /// A host function received the wrong kind of argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Corruption errors (fatal on read)
    // =========================================================================
    /// Stored value carries a format version newer than this build reads
    #[error("unsupported s-expression format version {found} (max supported {max})")]
    UnsupportedVersion { found: u8, max: u8 },

    /// Varint continued past 64 bits of payload
    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    /// A read ran past the end of the value
    #[error("corrupted s-expression: truncated {0}")]
    Truncated(&'static str),

    /// A symbol reference points outside the local symbol table
    #[error("corrupted s-expression: symbol index {index} out of range ({count} symbols)")]
    SymbolOutOfRange { index: u64, count: usize },

    /// A list-entry offset points outside the element-data region
    #[error("corrupted s-expression: entry offset out of bounds")]
    OffsetOutOfBounds,

    // =========================================================================
    // Other errors
    // =========================================================================
    /// The host cancelled the current operation
    #[error("operation cancelled")]
    Cancelled,

    /// Internal error for unexpected conditions
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Check if this is a text-parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::UnterminatedList
                | Error::UnterminatedString
                | Error::UnterminatedEscape
                | Error::TrailingGarbage
                | Error::EmptyAtom
                | Error::UnexpectedEof
        )
    }

    /// Check if this is a limit violation
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            Error::DepthExceeded { .. } | Error::TooManySymbols { .. } | Error::ListTooLarge
        )
    }

    /// Check if this is a data-corruption error
    ///
    /// Corruption errors indicate the stored bytes violate a format
    /// invariant. They are fatal for the current operation.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedVersion { .. }
                | Error::VarintOverflow
                | Error::Truncated(_)
                | Error::SymbolOutOfRange { .. }
                | Error::OffsetOutOfBounds
                | Error::Internal { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::UnterminatedList.to_string(), "unterminated list");
        assert_eq!(
            Error::NotAList { op: "car" }.to_string(),
            "car requires a list"
        );
        assert_eq!(
            Error::DepthExceeded { max: 1000 }.to_string(),
            "s-expression nesting exceeds maximum depth of 1000"
        );
        assert_eq!(
            Error::UnsupportedVersion { found: 9, max: 6 }.to_string(),
            "unsupported s-expression format version 9 (max supported 6)"
        );
        assert_eq!(
            Error::Truncated("list header").to_string(),
            "corrupted s-expression: truncated list header"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::UnterminatedString.is_parse_error());
        assert!(Error::EmptyAtom.is_parse_error());
        assert!(!Error::VarintOverflow.is_parse_error());

        assert!(Error::DepthExceeded { max: 1000 }.is_limit());
        assert!(Error::TooManySymbols { max: 65536 }.is_limit());
        assert!(!Error::UnterminatedList.is_limit());

        assert!(Error::VarintOverflow.is_corruption());
        assert!(Error::Truncated("float").is_corruption());
        assert!(Error::SymbolOutOfRange { index: 9, count: 2 }.is_corruption());
        assert!(Error::internal("oops").is_corruption());
        assert!(!Error::Cancelled.is_corruption());
        assert!(!Error::NotAList { op: "cdr" }.is_corruption());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::NotAList { op: "car" }, Error::NotAList { op: "car" });
        assert_ne!(Error::NotAList { op: "car" }, Error::NotAList { op: "cdr" });
    }
}
