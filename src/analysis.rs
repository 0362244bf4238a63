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

//! Analysis output.

use crate::Transaction;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary of the valid transactions of a log.
///
/// Serializes with camelCase keys:
///
/// ```json
/// {
///   "totalCredit": "5000", "totalDebit": "300", "netBalance": "4700",
///   "transactionCount": 3, "avgTransaction": "1767",
///   "highestTransaction": { "id": "T1", "type": "credit", ... },
///   "categoryBreakdown": { "income": "5000", "food": "300" },
///   "frequentContact": "Swiggy", "allAbove100": false, "hasLargeTransaction": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub total_credit: Decimal,
    pub total_debit: Decimal,
    /// `total_credit - total_debit`
    pub net_balance: Decimal,
    pub transaction_count: usize,
    /// Mean amount rounded to a whole number, midpoint away from zero.
    pub avg_transaction: Decimal,
    /// Earliest record holding the largest amount.
    pub highest_transaction: Transaction,
    /// Category totals in first-seen order, credits and debits combined.
    pub category_breakdown: IndexMap<String, Decimal>,
    pub frequent_contact: String,
    #[serde(rename = "allAbove100")]
    pub all_above_100: bool,
    pub has_large_transaction: bool,
}
