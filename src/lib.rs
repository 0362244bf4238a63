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

//! # UPI Ledger
//!
//! This library summarizes UPI transaction logs: credit and debit totals,
//! averages, the largest transaction, per-category sums and the most frequent
//! counterparty. Two small companions live alongside it: a movie title fixer
//! and a student report-card generator.
//!
//! ## Core Components
//!
//! - [`Analyzer`]: Filters a log to its valid entries and summarizes them
//! - [`Transaction`]: A single log entry as supplied by the caller
//! - [`Analysis`]: The summary produced by an analysis
//! - [`fix_title`]: Whitespace and title-case clean-up
//! - [`generate_report_card`]: Totals, percentage and grade for a student
//!
//! ## Example
//!
//! ```
//! use upi_ledger_rs::{Transaction, analyze};
//! use rust_decimal_macros::dec;
//!
//! let log = vec![
//!     Transaction::new("T1", "credit", dec!(5000), "Salary", "income"),
//!     Transaction::new("T2", "debit", dec!(200), "Swiggy", "food"),
//!     Transaction::new("T3", "debit", dec!(100), "Swiggy", "food"),
//! ];
//!
//! let analysis = analyze(&log).unwrap();
//! assert_eq!(analysis.total_credit, dec!(5000));
//! assert_eq!(analysis.total_debit, dec!(300));
//! assert_eq!(analysis.category_breakdown["food"], dec!(300));
//!
//! // Nothing to summarize.
//! assert!(analyze(&[]).is_none());
//! ```
//!
//! ## Thread Safety
//!
//! Every function is pure over its input and keeps no state between calls.

pub mod analysis;
pub mod analyzer;
mod base;
pub mod config;
pub mod error;
pub mod input;
pub mod report_card;
pub mod title;
mod transaction;

pub use analysis::Analysis;
pub use analyzer::{Analyzer, analyze};
pub use base::TransactionId;
pub use config::{AnalyzerConfig, KindMatching};
pub use error::{AnalysisError, InputError, ReportCardError, TransactionError};
pub use input::{read_students_json, read_transactions_csv, read_transactions_json};
pub use report_card::{Grade, ReportCard, Student, generate_report_card, try_generate_report_card};
pub use title::{SMALL_WORDS, fix_title};
pub use transaction::{Transaction, TransactionKind};
