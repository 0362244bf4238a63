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

//! Transaction log analyzer.
//!
//! The [`Analyzer`] filters a transaction log down to its valid entries and
//! summarizes them in a single forward pass.
//!
//! # Validity
//!
//! A transaction is valid when its amount is a positive number and its type
//! is `credit` or `debit` (any ASCII case). Invalid entries are dropped
//! without being reported; they are only visible as `debug` log events.
//!
//! # Result
//!
//! - **Totals**: credit and debit sums, and their difference.
//! - **Average**: mean amount rounded to a whole number.
//! - **Highest**: the earliest record holding the largest amount.
//! - **Categories**: per-category sums in first-seen order.
//! - **Frequent contact**: the first counterparty to reach the leading count.
//! - **Flags**: whether all amounts exceed 100, and whether any reaches 5000.

use crate::analysis::Analysis;
use crate::config::{AnalyzerConfig, KindMatching};
use crate::{AnalysisError, Transaction, TransactionKind};
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Summarizes transaction logs according to an [`AnalyzerConfig`].
///
/// Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Amounts at or below this clear the `allAbove100` flag.
    pub const SMALL_AMOUNT_LIMIT: Decimal = dec!(100);

    /// Amounts at or above this set the `hasLargeTransaction` flag.
    pub const LARGE_AMOUNT: Decimal = dec!(5000);

    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Summarizes the valid transactions, or returns `None` when there are none.
    pub fn analyze(&self, transactions: &[Transaction]) -> Option<Analysis> {
        self.try_analyze(transactions).ok()
    }

    /// Like [`Analyzer::analyze`] but says why no summary was produced.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NoTransactions`] - the log is empty.
    /// - [`AnalysisError::NoValidTransactions`] - every entry was filtered out.
    /// - [`AnalysisError::AmountOverflow`] - a running sum left the `Decimal` range.
    pub fn try_analyze(&self, transactions: &[Transaction]) -> Result<Analysis, AnalysisError> {
        if transactions.is_empty() {
            return Err(AnalysisError::NoTransactions);
        }

        let mut tally = Tally::new(self.config.kind_matching);
        for transaction in transactions {
            match transaction.validate() {
                Ok((kind, amount)) => tally.record(transaction, kind, amount)?,
                Err(e) => debug!("Skipping transaction {}: {}", transaction.id, e),
            }
        }

        trace!(
            total = transactions.len(),
            valid = tally.count,
            "tallied transaction log"
        );
        tally.finish()
    }
}

/// Summarizes with the default configuration.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use upi_ledger_rs::{Transaction, analyze};
///
/// let log = vec![
///     Transaction::new("T1", "credit", dec!(5000), "Salary", "income"),
///     Transaction::new("T2", "debit", dec!(200), "Swiggy", "food"),
///     Transaction::new("T3", "debit", dec!(100), "Swiggy", "food"),
/// ];
///
/// let analysis = analyze(&log).unwrap();
/// assert_eq!(analysis.net_balance, dec!(4700));
/// assert_eq!(analysis.avg_transaction, dec!(1767));
/// assert_eq!(analysis.frequent_contact, "Swiggy");
/// ```
pub fn analyze(transactions: &[Transaction]) -> Option<Analysis> {
    Analyzer::default().analyze(transactions)
}

/// Running aggregates over the valid transactions seen so far.
struct Tally<'a> {
    kind_matching: KindMatching,
    total_credit: Decimal,
    total_debit: Decimal,
    total_amount: Decimal,
    count: usize,
    highest: Option<&'a Transaction>,
    /// Starts at zero; every valid amount is strictly above it.
    highest_amount: Decimal,
    categories: IndexMap<String, Decimal>,
    contacts: HashMap<&'a str, usize>,
    /// Current leading contact and its count.
    leader: Option<(&'a str, usize)>,
    all_above_100: bool,
    has_large_transaction: bool,
}

impl<'a> Tally<'a> {
    fn new(kind_matching: KindMatching) -> Self {
        Self {
            kind_matching,
            total_credit: Decimal::ZERO,
            total_debit: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            count: 0,
            highest: None,
            highest_amount: Decimal::ZERO,
            categories: IndexMap::new(),
            contacts: HashMap::new(),
            leader: None,
            all_above_100: true,
            has_large_transaction: false,
        }
    }

    fn record(
        &mut self,
        transaction: &'a Transaction,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<(), AnalysisError> {
        let bucket = match self.kind_matching {
            KindMatching::Normalized => Some(kind),
            KindMatching::Legacy => TransactionKind::parse_exact(&transaction.kind),
        };
        match bucket {
            Some(TransactionKind::Credit) => add(&mut self.total_credit, amount, transaction)?,
            Some(TransactionKind::Debit) => add(&mut self.total_debit, amount, transaction)?,
            None => trace!("Transaction {} is in neither total", transaction.id),
        }

        add(&mut self.total_amount, amount, transaction)?;
        self.count += 1;

        if amount > self.highest_amount {
            self.highest_amount = amount;
            self.highest = Some(transaction);
        }

        let category = self
            .categories
            .entry(transaction.category.clone())
            .or_insert(Decimal::ZERO);
        add(category, amount, transaction)?;

        let seen = self.contacts.entry(transaction.to.as_str()).or_insert(0);
        *seen += 1;
        // Ties keep the earlier leader.
        match self.leader {
            Some((_, leading)) if *seen <= leading => {}
            _ => self.leader = Some((transaction.to.as_str(), *seen)),
        }

        if amount <= Analyzer::SMALL_AMOUNT_LIMIT {
            self.all_above_100 = false;
        }
        if amount >= Analyzer::LARGE_AMOUNT {
            self.has_large_transaction = true;
        }
        Ok(())
    }

    fn finish(self) -> Result<Analysis, AnalysisError> {
        let (Some(highest), Some((contact, _))) = (self.highest, self.leader) else {
            return Err(AnalysisError::NoValidTransactions);
        };

        let avg_transaction = (self.total_amount / Decimal::from(self.count))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Ok(Analysis {
            total_credit: self.total_credit,
            total_debit: self.total_debit,
            net_balance: self.total_credit - self.total_debit,
            transaction_count: self.count,
            avg_transaction,
            highest_transaction: highest.clone(),
            category_breakdown: self.categories,
            frequent_contact: contact.to_string(),
            all_above_100: self.all_above_100,
            has_large_transaction: self.has_large_transaction,
        })
    }
}

fn add(sum: &mut Decimal, amount: Decimal, transaction: &Transaction) -> Result<(), AnalysisError> {
    *sum = sum.checked_add(amount).ok_or_else(|| {
        debug!("Sum overflowed at transaction {}", transaction.id);
        AnalysisError::AmountOverflow
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, kind: &str, amount: Decimal, to: &str) -> Transaction {
        Transaction::new(id, kind, amount, to, "misc")
    }

    #[test]
    fn empty_tally_has_no_result() {
        let tally = Tally::new(KindMatching::Normalized);
        assert_eq!(tally.finish(), Err(AnalysisError::NoValidTransactions));
    }

    #[test]
    fn leader_tracks_its_own_count() {
        let log = [
            tx("1", "debit", dec!(10), "A"),
            tx("2", "debit", dec!(10), "A"),
            tx("3", "debit", dec!(10), "B"),
            tx("4", "debit", dec!(10), "B"),
            tx("5", "debit", dec!(10), "A"),
            tx("6", "debit", dec!(10), "B"),
            tx("7", "debit", dec!(10), "B"),
        ];
        let mut tally = Tally::new(KindMatching::Normalized);
        for (i, transaction) in log.iter().enumerate() {
            tally.record(transaction, TransactionKind::Debit, dec!(10)).unwrap();
            let expected = match i {
                0..=5 => "A",
                _ => "B",
            };
            assert_eq!(tally.leader.map(|(name, _)| name), Some(expected));
        }
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        let log = [tx("1", "credit", dec!(1), "A"), tx("2", "credit", dec!(2), "A")];
        let analysis = analyze(&log).unwrap();
        assert_eq!(analysis.avg_transaction, dec!(2));
    }

    #[test]
    fn amount_exactly_at_limits() {
        let log = [tx("1", "credit", dec!(100), "A"), tx("2", "credit", dec!(5000), "A")];
        let analysis = analyze(&log).unwrap();
        assert!(!analysis.all_above_100);
        assert!(analysis.has_large_transaction);

        let log = [tx("1", "credit", dec!(100.01), "A"), tx("2", "credit", dec!(4999.99), "A")];
        let analysis = analyze(&log).unwrap();
        assert!(analysis.all_above_100);
        assert!(!analysis.has_large_transaction);
    }

    #[test]
    fn overflowing_sums_yield_no_result() {
        let log = [tx("1", "credit", Decimal::MAX, "A"), tx("2", "credit", Decimal::MAX, "A")];
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.try_analyze(&log), Err(AnalysisError::AmountOverflow));
        assert!(analyze(&log).is_none());

        let log = [tx("1", "credit", Decimal::MAX, "A"), tx("2", "debit", Decimal::MAX, "B")];
        assert!(analyze(&log).is_none());
    }

    #[test]
    fn largest_amount_alone_is_summarized() {
        let log = [tx("1", "credit", Decimal::MAX, "A")];
        let analysis = analyze(&log).unwrap();
        assert_eq!(analysis.total_credit, Decimal::MAX);
        assert_eq!(analysis.avg_transaction, Decimal::MAX);
        assert!(analysis.has_large_transaction);
    }

    #[test]
    fn analyzer_exposes_config() {
        let config = AnalyzerConfig::default().with_kind_matching(KindMatching::Legacy);
        let analyzer = Analyzer::new(config);
        assert_eq!(analyzer.config().kind_matching, KindMatching::Legacy);
    }
}
