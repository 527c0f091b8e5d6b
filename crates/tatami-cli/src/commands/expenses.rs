
use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use tatami_data::{Expense, ExpenseFilter, Query, YearMonth};
use tatami_db::Connection;
use tatami_ledger::{add_expense, NewExpense};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Expenses {
    /// List expenses
    #[clap(name="list")]
    List(ListExpenses),
    /// Record an expense
    #[clap(name="add")]
    Add(AddExpense),
}

impl Expenses {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Expenses::List(cmd) => cmd.run(db).await,
            Expenses::Add(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListExpenses {
    #[clap(short, long)]
    pub category: Option<String>,
    #[clap(short, long)]
    pub status: Option<String>,
    #[clap(short, long)]
    pub month: Option<YearMonth>,
}

impl ListExpenses {
    /// Run the command and list expenses
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = ExpenseFilter{
            category: self.category,
            status: self.status,
            month: self.month,
            ..Default::default()
        };

        let expenses: Vec<Expense> = db.query(&filter).await?;
        println!("{} expenses.", expenses.len());
        expenses.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddExpense {
    #[clap(short, long)]
    pub category: String,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(short, long)]
    pub amount: f64,
}

impl AddExpense {
    /// Run the command and record an expense
    pub async fn run(self, db: &Connection) -> Result<()> {
        println!(
            "{} ({}): {}",
            self.category,
            self.description.clone().unwrap_or("".to_string()),
            self.amount,
        );
        let confirm = Confirm::new("Record expense?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let expense = add_expense(db, NewExpense{
            category: Some(self.category),
            description: self.description,
            amount: Some(self.amount),
        }).await?;
        println!("Expense recorded with id {}.", expense.id);

        Ok(())
    }
}
