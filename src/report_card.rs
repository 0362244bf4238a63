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

//! Student report cards.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use upi_ledger_rs::{Grade, Student, generate_report_card};
//!
//! let student = Student::new("Rahul", [("maths", dec!(85)), ("science", dec!(92)), ("english", dec!(78))]);
//! let card = generate_report_card(&student).unwrap();
//!
//! assert_eq!(card.percentage, dec!(85));
//! assert_eq!(card.grade, Grade::A);
//! assert_eq!(card.highest_subject, "science");
//! ```

use crate::ReportCardError;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

const PASS_MARK: Decimal = dec!(40);
const MAX_MARK: Decimal = dec!(100);
const PERCENTAGE_PRECISION: u32 = 2;

/// A student and their marks, in subject order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub marks: IndexMap<String, Decimal>,
}

impl Student {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        marks: impl IntoIterator<Item = (S, Decimal)>,
    ) -> Self {
        Self {
            name: name.into(),
            marks: marks
                .into_iter()
                .map(|(subject, mark)| (subject.into(), mark))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= dec!(90) {
            Self::APlus
        } else if percentage >= dec!(80) {
            Self::A
        } else if percentage >= dec!(70) {
            Self::B
        } else if percentage >= dec!(60) {
            Self::C
        } else if percentage >= dec!(40) {
            Self::D
        } else {
            Self::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    pub name: String,
    pub total_marks: Decimal,
    /// Rounded to two decimal places, trailing zeros dropped.
    pub percentage: Decimal,
    pub grade: Grade,
    pub highest_subject: String,
    pub lowest_subject: String,
    pub passed_subjects: Vec<String>,
    pub failed_subjects: Vec<String>,
    pub subject_count: usize,
}

/// Builds a report card, or `None` if the student record is invalid.
pub fn generate_report_card(student: &Student) -> Option<ReportCard> {
    try_generate_report_card(student).ok()
}

/// Builds a report card.
///
/// Ties for highest or lowest mark go to the earlier subject.
///
/// # Errors
///
/// - [`ReportCardError::MissingName`] - name is empty.
/// - [`ReportCardError::NoSubjects`] - no marks recorded.
/// - [`ReportCardError::MarkOutOfRange`] - a mark is below 0 or above 100.
pub fn try_generate_report_card(student: &Student) -> Result<ReportCard, ReportCardError> {
    if student.name.is_empty() {
        return Err(ReportCardError::MissingName);
    }
    if student.marks.is_empty() {
        return Err(ReportCardError::NoSubjects);
    }
    if let Some((subject, mark)) = student
        .marks
        .iter()
        .find(|(_, mark)| **mark < Decimal::ZERO || **mark > MAX_MARK)
    {
        return Err(ReportCardError::MarkOutOfRange {
            subject: subject.clone(),
            mark: *mark,
        });
    }

    let total_marks: Decimal = student.marks.values().copied().sum();
    let subject_count = student.marks.len();
    let percentage = (total_marks / Decimal::from(subject_count))
        .round_dp_with_strategy(PERCENTAGE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let mut highest: Option<(&String, Decimal)> = None;
    let mut lowest: Option<(&String, Decimal)> = None;
    for (subject, &mark) in &student.marks {
        if highest.is_none_or(|(_, best)| mark > best) {
            highest = Some((subject, mark));
        }
        if lowest.is_none_or(|(_, worst)| mark < worst) {
            lowest = Some((subject, mark));
        }
    }
    let (Some((highest_subject, _)), Some((lowest_subject, _))) = (highest, lowest) else {
        return Err(ReportCardError::NoSubjects);
    };

    let (passed_subjects, failed_subjects): (Vec<_>, Vec<_>) = student
        .marks
        .iter()
        .partition(|(_, mark)| **mark >= PASS_MARK);

    Ok(ReportCard {
        name: student.name.clone(),
        total_marks: total_marks.normalize(),
        percentage,
        grade: Grade::from_percentage(percentage),
        highest_subject: highest_subject.clone(),
        lowest_subject: lowest_subject.clone(),
        passed_subjects: passed_subjects.into_iter().map(|(s, _)| s.clone()).collect(),
        failed_subjects: failed_subjects.into_iter().map(|(s, _)| s.clone()).collect(),
        subject_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_percentage(dec!(90)), Grade::APlus);
        assert_eq!(Grade::from_percentage(dec!(89.99)), Grade::A);
        assert_eq!(Grade::from_percentage(dec!(80)), Grade::A);
        assert_eq!(Grade::from_percentage(dec!(70)), Grade::B);
        assert_eq!(Grade::from_percentage(dec!(60)), Grade::C);
        assert_eq!(Grade::from_percentage(dec!(40)), Grade::D);
        assert_eq!(Grade::from_percentage(dec!(39.99)), Grade::F);
    }

    #[test]
    fn grade_display_and_serde_labels() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), "A+");
        assert_eq!(serde_json::to_value(Grade::F).unwrap(), "F");
    }

    #[test]
    fn percentage_rounds_to_two_places() {
        let student = Student::new("Asha", [("a", dec!(100)), ("b", dec!(100)), ("c", dec!(99))]);
        let card = generate_report_card(&student).unwrap();
        assert_eq!(card.percentage, dec!(99.67));
        assert_eq!(card.grade, Grade::APlus);
    }

    #[test]
    fn ties_go_to_first_subject() {
        let student = Student::new("Asha", [("a", dec!(50)), ("b", dec!(50))]);
        let card = generate_report_card(&student).unwrap();
        assert_eq!(card.highest_subject, "a");
        assert_eq!(card.lowest_subject, "a");
    }

    #[test]
    fn boundary_marks_are_accepted() {
        let student = Student::new("Asha", [("a", dec!(0)), ("b", dec!(100))]);
        let card = generate_report_card(&student).unwrap();
        assert_eq!(card.highest_subject, "b");
        assert_eq!(card.lowest_subject, "a");
        assert_eq!(card.failed_subjects, vec!["a".to_string()]);
    }
}
