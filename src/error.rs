// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types for validation, analysis and input handling.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a single transaction record is left out of an analysis.
///
/// These never reach the caller of [`crate::analyze`]; they only show up in
/// debug logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Amount field is missing or not a number
    #[error("missing or non-numeric amount")]
    MissingAmount,

    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Type is neither credit nor debit
    #[error("unknown transaction type '{0}'")]
    UnknownType(String),
}

/// Reasons an analysis produces no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The transaction list was empty
    #[error("no transaction data")]
    NoTransactions,

    /// Every transaction was filtered out as invalid
    #[error("no valid transactions")]
    NoValidTransactions,

    /// A running sum exceeded the `Decimal` range
    #[error("transaction amounts overflow the supported range")]
    AmountOverflow,
}

/// Reasons a report card cannot be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportCardError {
    /// Student name is empty
    #[error("student name is missing")]
    MissingName,

    /// Student has no subjects
    #[error("student has no subjects")]
    NoSubjects,

    /// A mark lies outside 0..=100
    #[error("mark {mark} for '{subject}' is outside 0..=100")]
    MarkOutOfRange { subject: String, mark: Decimal },
}

/// Failures reading an input document.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level JSON document is not an array
    #[error("expected a JSON array of transactions")]
    NotAnArray,

    /// Top-level JSON document is neither a student object nor an array
    #[error("expected a JSON student object or array of students")]
    NotAStudentDocument,
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, ReportCardError, TransactionError};
    use rust_decimal_macros::dec;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            TransactionError::MissingAmount.to_string(),
            "missing or non-numeric amount"
        );
        assert_eq!(
            TransactionError::InvalidAmount.to_string(),
            "invalid amount (must be positive)"
        );
        assert_eq!(
            TransactionError::UnknownType("refund".to_string()).to_string(),
            "unknown transaction type 'refund'"
        );
        assert_eq!(AnalysisError::NoTransactions.to_string(), "no transaction data");
        assert_eq!(AnalysisError::NoValidTransactions.to_string(), "no valid transactions");
        assert_eq!(
            AnalysisError::AmountOverflow.to_string(),
            "transaction amounts overflow the supported range"
        );
        assert_eq!(ReportCardError::MissingName.to_string(), "student name is missing");
        assert_eq!(ReportCardError::NoSubjects.to_string(), "student has no subjects");
        assert_eq!(
            ReportCardError::MarkOutOfRange {
                subject: "maths".to_string(),
                mark: dec!(101),
            }
            .to_string(),
            "mark 101 for 'maths' is outside 0..=100"
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let error = AnalysisError::NoValidTransactions;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
