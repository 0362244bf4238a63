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

//! Movie title clean-up.
//!
//! # Example
//!
//! ```
//! use upi_ledger_rs::fix_title;
//!
//! assert_eq!(fix_title("  DILWALE   DULHANIA   LE   JAYENGE  "), "Dilwale Dulhania Le Jayenge");
//! assert_eq!(fix_title("dil ka kya kare"), "Dil ka Kya Kare");
//! ```

/// Words kept lowercase unless they open the title.
pub const SMALL_WORDS: [&str; 11] = ["ka", "ki", "ke", "se", "aur", "ya", "the", "of", "in", "a", "an"];

/// Collapses whitespace and title-cases `title`.
///
/// Returns an empty string when `title` is blank.
pub fn fix_title(title: &str) -> String {
    let words: Vec<String> = title
        .split_whitespace()
        .map(|word| {
            let word = word.to_lowercase();
            if SMALL_WORDS.contains(&word.as_str()) {
                word
            } else {
                capitalize(&word)
            }
        })
        .collect();

    capitalize(&words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
