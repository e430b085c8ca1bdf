//! Income and expense commands for CLI.

use clap::Subcommand;
use habbitly_core::finance::{
    category_summary, filter_transactions, monthly_summary, FilterRange, Transaction,
    TransactionKind,
};
use habbitly_core::storage::FinanceDb;

use super::parse_date_or_today;

#[derive(Subcommand)]
pub enum FinanceAction {
    /// Record a transaction
    Add {
        /// Transaction kind: income or expense
        kind: String,
        /// Amount in the smallest currency unit (must be positive)
        amount: i64,
        /// Spending or income category
        category: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Day of the transaction, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Window: this-month, last-month, or all
        #[arg(long, default_value = "all")]
        range: String,
    },
    /// Income and expense totals per month, newest first
    Summary,
    /// Expense totals per category, largest first
    Categories,
    /// Update a transaction
    Update {
        /// Transaction ID
        id: String,
        /// New kind
        #[arg(long)]
        kind: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<i64>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New day, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

pub fn run(action: FinanceAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = FinanceDb::open()?;

    match action {
        FinanceAction::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let kind =
                TransactionKind::parse(&kind).ok_or_else(|| format!("unknown kind: {kind}"))?;
            let date = parse_date_or_today(date.as_deref())?;
            let tx = Transaction::new(date, kind, amount, &category, &description)?;
            db.create_transaction(&tx)?;
            println!("Transaction recorded: {}", tx.id);
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        FinanceAction::List { range } => {
            let range =
                FilterRange::parse(&range).ok_or_else(|| format!("unknown range: {range}"))?;
            let today = chrono::Local::now().date_naive();
            let filtered = filter_transactions(&db.list_transactions()?, range, today);
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        FinanceAction::Summary => {
            let summary = monthly_summary(&db.list_transactions()?);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        FinanceAction::Categories => {
            let summary = category_summary(&db.list_transactions()?);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        FinanceAction::Update {
            id,
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let mut tx = db
                .get_transaction(&id)?
                .ok_or(format!("Transaction not found: {id}"))?;
            if let Some(k) = kind {
                tx.kind = TransactionKind::parse(&k).ok_or_else(|| format!("unknown kind: {k}"))?;
            }
            if let Some(a) = amount {
                if a <= 0 {
                    return Err("amount must be positive".into());
                }
                tx.amount = a;
            }
            if let Some(c) = category {
                let c = c.trim();
                if c.is_empty() {
                    return Err("category cannot be empty".into());
                }
                tx.category = c.to_string();
            }
            if let Some(d) = description {
                tx.description = d;
            }
            if let Some(day) = date {
                tx.date = parse_date_or_today(Some(&day))?;
            }
            db.update_transaction(&tx)?;
            println!("Transaction updated:");
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        FinanceAction::Delete { id } => {
            if db.delete_transaction(&id)? {
                println!("Transaction deleted: {id}");
            } else {
                println!("Transaction not found: {id}");
            }
        }
    }
    Ok(())
}
