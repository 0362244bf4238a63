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

//! Reading transaction logs and student records.
//!
//! Both readers are lenient per record: a row that cannot be decoded is
//! skipped and logged, while a document that cannot be read at all is an
//! [`InputError`].

use crate::base::TransactionId;
use crate::report_card::Student;
use crate::{InputError, Transaction};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Raw CSV record matching the input format.
///
/// Fields: `id, type, amount, to, category, date`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "text_amount")]
    amount: Option<Decimal>,
    #[serde(default)]
    to: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: String,
}

impl From<CsvRecord> for Transaction {
    fn from(record: CsvRecord) -> Self {
        Transaction {
            id: TransactionId(record.id),
            kind: record.kind,
            amount: record.amount,
            to: record.to,
            category: record.category,
            date: record.date,
        }
    }
}

/// Raw JSON record. Missing text fields default to empty.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, deserialize_with = "numeric_amount")]
    amount: Option<Decimal>,
    #[serde(default)]
    to: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: String,
}

impl From<JsonRecord> for Transaction {
    fn from(record: JsonRecord) -> Self {
        Transaction {
            id: TransactionId(record.id),
            kind: record.kind,
            amount: record.amount,
            to: record.to,
            category: record.category,
            date: record.date,
        }
    }
}

/// Parses decimal or scientific notation; `None` when out of range.
fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Reads the CSV field as text so amounts never pass through `f64`.
fn text_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    Ok(parse_decimal(&text))
}

/// Accepts JSON numbers only; strings, booleans and null yield `None`.
///
/// Numbers keep their literal digits, so values beyond `u64` or `f64`
/// precision are read exactly.
fn numeric_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(number) => parse_decimal(&number.to_string()),
        _ => None,
    };
    Ok(amount)
}

/// Reads transactions from CSV with a header row.
///
/// # CSV Format
///
/// ```csv
/// id,type,amount,to,category,date
/// T1,credit,5000,Salary,income,2025-01-01
/// T2,debit,200,Swiggy,food,2025-01-02
/// ```
///
/// Whitespace around fields is trimmed. A non-numeric amount is kept as a
/// missing amount so the analyzer can filter it. Rows that do not decode are
/// skipped.
///
/// # Errors
///
/// Returns [`InputError::Csv`] if the header cannot be read.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, InputError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    // Fail on a broken header rather than skipping every row.
    rdr.headers()?;

    let mut transactions = Vec::new();
    for (row, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        match result {
            Ok(record) => transactions.push(record.into()),
            Err(e) => debug!("Skipping malformed row {}: {}", row + 1, e),
        }
    }

    Ok(transactions)
}

/// Reads transactions from a JSON array of objects.
///
/// Elements that are not objects, or whose text fields are not strings, are
/// skipped.
///
/// # Errors
///
/// - [`InputError::Json`] - the document is not valid JSON.
/// - [`InputError::NotAnArray`] - the top-level value is not an array.
pub fn read_transactions_json<R: Read>(reader: R) -> Result<Vec<Transaction>, InputError> {
    let document: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = document else {
        return Err(InputError::NotAnArray);
    };

    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<JsonRecord>(item) {
            Ok(record) => transactions.push(record.into()),
            Err(e) => debug!("Skipping malformed transaction at index {}: {}", index, e),
        }
    }

    Ok(transactions)
}

/// Reads a single student object or an array of them.
///
/// Each student is decoded on its own (`{"name": "...", "marks": {"subject": 90}}`).
/// An element without that shape, such as a non-numeric mark, becomes `None`
/// at its index so the rest of the document is still usable.
///
/// # Errors
///
/// - [`InputError::Json`] - the document is not valid JSON.
/// - [`InputError::NotAStudentDocument`] - the top-level value is neither an
///   object nor an array.
pub fn read_students_json<R: Read>(reader: R) -> Result<Vec<Option<Student>>, InputError> {
    let document: Value = serde_json::from_reader(reader)?;
    let items = match document {
        Value::Array(items) => items,
        item @ Value::Object(_) => vec![item],
        _ => return Err(InputError::NotAStudentDocument),
    };

    let students = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match serde_json::from_value::<Student>(item) {
            Ok(student) => Some(student),
            Err(e) => {
                debug!("Malformed student at index {}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(students)
}
