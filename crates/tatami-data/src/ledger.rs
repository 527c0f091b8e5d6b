use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Method shown for entries that have none.
pub const METHOD_NA: &str = "n/a";

/// A calendar month, written `YYYY-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("invalid month, expected YYYY-MM")]
pub struct InvalidYearMonth;

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = InvalidYearMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or(InvalidYearMonth)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(InvalidYearMonth);
        }
        let year: i32 = year.parse().map_err(|_| InvalidYearMonth)?;
        let month: u32 = month.parse().map_err(|_| InvalidYearMonth)?;
        if !(1..=12).contains(&month) {
            return Err(InvalidYearMonth);
        }
        Ok(YearMonth { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The two sides of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("unknown entry kind, expected all, credit or debit")]
pub struct InvalidEntryKind;

/// Kind selector for ledger queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKindFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl EntryKindFilter {
    pub fn includes(&self, kind: EntryKind) -> bool {
        match self {
            EntryKindFilter::All => true,
            EntryKindFilter::Credit => kind == EntryKind::Credit,
            EntryKindFilter::Debit => kind == EntryKind::Debit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKindFilter::All => "all",
            EntryKindFilter::Credit => "credit",
            EntryKindFilter::Debit => "debit",
        }
    }
}

impl FromStr for EntryKindFilter {
    type Err = InvalidEntryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(EntryKindFilter::All),
            "credit" => Ok(EntryKindFilter::Credit),
            "debit" => Ok(EntryKindFilter::Debit),
            _ => Err(InvalidEntryKind),
        }
    }
}

impl fmt::Display for EntryKindFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filter shared by both sides of the ledger. `kind` selects which
/// sides are fetched at all, the rest narrows rows within a side.
#[derive(Debug, Default, Clone)]
pub struct LedgerFilter {
    pub kind: EntryKindFilter,
    pub status: Option<String>,
    pub month: Option<YearMonth>,
    pub search: Option<String>,
}

/// A payment joined with its member, read as a ledger credit.
#[derive(Debug, Clone, Default, FromRow)]
pub struct CreditEntry {
    pub id: u32,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
    pub method: String,
}

/// An expense read as a ledger debit.
#[derive(Debug, Clone, Default, FromRow)]
pub struct DebitEntry {
    pub id: u32,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
}

/// A single row of the unified ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
    #[serde(with = "method_wire")]
    pub method: Option<String>,
}

impl From<CreditEntry> for LedgerEntry {
    fn from(entry: CreditEntry) -> Self {
        LedgerEntry {
            id: entry.id,
            kind: EntryKind::Credit,
            description: entry.description,
            category: entry.category,
            amount: entry.amount,
            date: entry.date,
            status: entry.status,
            method: Some(entry.method),
        }
    }
}

impl From<DebitEntry> for LedgerEntry {
    fn from(entry: DebitEntry) -> Self {
        LedgerEntry {
            id: entry.id,
            kind: EntryKind::Debit,
            description: entry.description,
            category: entry.category,
            amount: entry.amount,
            date: entry.date,
            status: entry.status,
            method: None,
        }
    }
}

/// Entries without a method carry the `n/a` sentinel on the wire.
mod method_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::METHOD_NA;

    pub fn serialize<S: Serializer>(
        method: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match method {
            Some(method) => serializer.serialize_str(method),
            None => serializer.serialize_str(METHOD_NA),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == METHOD_NA {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }
}

/// A distinct expense category name.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub category: String,
}

/// Validated payment volume grouped by method.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: String,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_parse() {
        let month: YearMonth = "2024-06".parse().unwrap();
        assert_eq!(month, YearMonth { year: 2024, month: 6 });
        assert_eq!(month.to_string(), "2024-06");
    }

    #[test]
    fn test_year_month_parse_invalid() {
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-6".parse::<YearMonth>().is_err());
        assert!("24-06".parse::<YearMonth>().is_err());
        assert!("2024-06-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_contains() {
        let month: YearMonth = "2024-06".parse().unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
    }

    #[test]
    fn test_entry_kind_filter_parse() {
        assert_eq!("all".parse::<EntryKindFilter>().unwrap(), EntryKindFilter::All);
        assert_eq!("credit".parse::<EntryKindFilter>().unwrap(), EntryKindFilter::Credit);
        assert_eq!("debit".parse::<EntryKindFilter>().unwrap(), EntryKindFilter::Debit);
        assert!("payments".parse::<EntryKindFilter>().is_err());
    }

    #[test]
    fn test_entry_kind_filter_includes() {
        assert!(EntryKindFilter::All.includes(EntryKind::Credit));
        assert!(EntryKindFilter::All.includes(EntryKind::Debit));
        assert!(EntryKindFilter::Credit.includes(EntryKind::Credit));
        assert!(!EntryKindFilter::Credit.includes(EntryKind::Debit));
        assert!(!EntryKindFilter::Debit.includes(EntryKind::Credit));
    }

    #[test]
    fn test_credit_entry_encoding() {
        let entry = LedgerEntry::from(CreditEntry {
            id: 3,
            description: "Amelie Durand".to_string(),
            category: "Judo".to_string(),
            amount: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            status: "valide".to_string(),
            method: "carte".to_string(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "credit");
        assert_eq!(value["method"], "carte");
        assert_eq!(value["date"], "2024-06-15");
    }

    #[test]
    fn test_debit_entry_encoding_uses_sentinel() {
        let entry = LedgerEntry::from(DebitEntry {
            id: 9,
            description: "Tatami replacement".to_string(),
            category: "equipement".to_string(),
            amount: 900.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            status: "paye".to_string(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "debit");
        assert_eq!(value["method"], "n/a");
    }

    #[test]
    fn test_ledger_entry_decoding() {
        let entry: LedgerEntry = serde_json::from_value(serde_json::json!({
            "id": 1,
            "type": "debit",
            "description": "Insurance",
            "category": "assurance",
            "amount": 120.5,
            "date": "2024-05-01",
            "status": "paye",
            "method": "n/a"
        }))
        .unwrap();
        assert_eq!(entry.kind, EntryKind::Debit);
        assert_eq!(entry.method, None);
    }
}
