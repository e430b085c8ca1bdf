//! Transactions and the pure finance summaries behind the reports view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ValidationError;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A single money movement. Amounts are positive integer currency
/// units; the kind carries the sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category: String,
    pub description: String,
}

impl Transaction {
    /// Create a transaction with a fresh id.
    ///
    /// # Errors
    /// Returns an error if the amount is not positive or the category
    /// is blank.
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        amount: i64,
        category: &str,
        description: &str,
    ) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "amount",
                message: format!("must be positive, got {amount}"),
            });
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyField("category"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date,
            kind,
            amount,
            category: category.to_string(),
            description: description.trim().to_string(),
        })
    }
}

/// Date filter for the finance reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterRange {
    ThisMonth,
    LastMonth,
    All,
}

impl FilterRange {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "this-month" => Some(FilterRange::ThisMonth),
            "last-month" => Some(FilterRange::LastMonth),
            "all" => Some(FilterRange::All),
            _ => None,
        }
    }
}

/// Year and month of the calendar month before the one containing `today`.
fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

/// Keep the transactions matching `filter`, anchored at `today`.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: FilterRange,
    today: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| match filter {
            FilterRange::ThisMonth => {
                tx.date.year() == today.year() && tx.date.month() == today.month()
            }
            FilterRange::LastMonth => {
                let (year, month) = previous_month(today);
                tx.date.year() == year && tx.date.month() == month
            }
            FilterRange::All => true,
        })
        .cloned()
        .collect()
}

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    /// Display label, e.g. "Jun 24".
    pub month: String,
    pub income: i64,
    pub expense: i64,
}

/// Per-month income and expense totals, newest month first.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut totals: HashMap<(i32, u32), (i64, i64)> = HashMap::new();
    for tx in transactions {
        let entry = totals.entry((tx.date.year(), tx.date.month())).or_default();
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            TransactionKind::Expense => entry.1 += tx.amount,
        }
    }

    let mut months: Vec<_> = totals.into_iter().collect();
    months.sort_by_key(|((year, month), _)| (*year, *month));
    months.reverse();
    months
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTotals {
            month: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %y").to_string())
                .unwrap_or_else(|| format!("{year}-{month:02}")),
            income,
            expense,
        })
        .collect()
}

/// Total spent per category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Expense totals per category, largest first. Income is excluded.
pub fn category_summary(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            *totals.entry(tx.category.as_str()).or_default() += tx.amount;
        }
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    out
}
