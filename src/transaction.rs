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

//! Transaction records.
//!
//! A [`Transaction`] keeps its `type` label exactly as supplied so that the
//! analyzer can decide how strictly to interpret it (see
//! [`KindMatching`](crate::KindMatching)).

use crate::TransactionError;
use crate::base::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    /// Recognizes `credit` / `debit` regardless of ASCII case.
    pub fn parse_lenient(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("credit") {
            Some(Self::Credit)
        } else if label.eq_ignore_ascii_case("debit") {
            Some(Self::Debit)
        } else {
            None
        }
    }

    /// Recognizes only the exact lowercase labels.
    pub fn parse_exact(label: &str) -> Option<Self> {
        match label {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
        }
    }
}

/// A single entry of a transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Raw `type` label, e.g. `"credit"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `None` when the amount was missing or not a number.
    pub amount: Option<Decimal>,
    /// Counterparty.
    pub to: String,
    pub category: String,
    pub date: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        kind: impl Into<String>,
        amount: Decimal,
        to: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            amount: Some(amount),
            to: to.into(),
            category: category.into(),
            date: String::new(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Checks that the record takes part in an analysis.
    ///
    /// Returns the leniently recognized kind and the positive amount.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::MissingAmount`] - amount absent or non-numeric.
    /// - [`TransactionError::InvalidAmount`] - amount is zero or negative.
    /// - [`TransactionError::UnknownType`] - type is not credit or debit.
    pub fn validate(&self) -> Result<(TransactionKind, Decimal), TransactionError> {
        let amount = self.amount.ok_or(TransactionError::MissingAmount)?;
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        let kind = TransactionKind::parse_lenient(&self.kind)
            .ok_or_else(|| TransactionError::UnknownType(self.kind.clone()))?;
        Ok((kind, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lenient_kind_ignores_case() {
        assert_eq!(TransactionKind::parse_lenient("credit"), Some(TransactionKind::Credit));
        assert_eq!(TransactionKind::parse_lenient("CREDIT"), Some(TransactionKind::Credit));
        assert_eq!(TransactionKind::parse_lenient("Debit"), Some(TransactionKind::Debit));
        assert_eq!(TransactionKind::parse_lenient("refund"), None);
        assert_eq!(TransactionKind::parse_lenient(" credit"), None);
    }

    #[test]
    fn exact_kind_is_case_sensitive() {
        assert_eq!(TransactionKind::parse_exact("debit"), Some(TransactionKind::Debit));
        assert_eq!(TransactionKind::parse_exact("Credit"), None);
    }

    #[test]
    fn validate_accepts_positive_amount_and_known_type() {
        let tx = Transaction::new("T1", "Credit", dec!(10), "Rahul", "misc");
        assert_eq!(tx.validate(), Ok((TransactionKind::Credit, dec!(10))));
    }

    #[test]
    fn validate_rejects_bad_records() {
        let mut tx = Transaction::new("T1", "debit", dec!(0), "Rahul", "misc");
        assert_eq!(tx.validate(), Err(TransactionError::InvalidAmount));

        tx.amount = Some(dec!(-5));
        assert_eq!(tx.validate(), Err(TransactionError::InvalidAmount));

        tx.amount = None;
        assert_eq!(tx.validate(), Err(TransactionError::MissingAmount));

        tx.amount = Some(dec!(5));
        tx.kind = "refund".to_string();
        assert_eq!(
            tx.validate(),
            Err(TransactionError::UnknownType("refund".to_string()))
        );
    }

    #[test]
    fn serializes_type_field() {
        let tx = Transaction::new("T1", "credit", dec!(500), "Rahul", "food").with_date("2025-01-15");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "credit");
        assert_eq!(json["id"], "T1");
        assert_eq!(json["date"], "2025-01-15");
    }
}
