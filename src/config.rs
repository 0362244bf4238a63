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

//! Analyzer configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the `type` label is matched when splitting credits from debits.
///
/// Validity filtering is always case-insensitive. This only controls which
/// total a valid transaction is added to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KindMatching {
    /// `"Credit"` is a credit, same as `"credit"`.
    #[default]
    Normalized,
    /// Only exact lowercase labels reach the totals. A `"Credit"` row is
    /// still counted, averaged and grouped, but lands in neither total.
    Legacy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub kind_matching: KindMatching,
}

impl AnalyzerConfig {
    pub fn with_kind_matching(mut self, kind_matching: KindMatching) -> Self {
        self.kind_matching = kind_matching;
        self
    }
}
