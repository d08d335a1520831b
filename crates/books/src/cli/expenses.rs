use std::path::PathBuf;

use books::api::expenses::RECEIPT_FIELD;
use books::files::attachment_from_path;
use books_core::models::{Comment, Expense};
use books_core::parser::Listing;
use books_core::payload::Attachments;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{amount, display_comments, parse_filters, print_json, print_message, text};
use crate::prelude::{println, *};
use crate::Global;

/// Expense commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List expenses
    #[clap(name = "list")]
    List(ListOptions),

    /// Get detailed information about an expense
    #[clap(name = "get")]
    Get {
        /// Expense ID
        expense_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new expense, optionally with its receipt
    #[clap(name = "create")]
    Create(CreateOptions),

    /// Update fields of an existing expense
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// Delete an expense
    #[clap(name = "delete")]
    Delete {
        /// Expense ID
        expense_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the comments and history of an expense
    #[clap(name = "comments")]
    Comments {
        /// Expense ID
        expense_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the receipt of an expense
    #[command(subcommand)]
    Receipt(ReceiptCommands),
}

/// Options for listing expenses
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Filter as key=value (e.g. status=unbilled, description_contains=taxi); repeatable
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for creating an expense
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct CreateOptions {
    /// Expense account ID
    #[arg(long)]
    pub account_id: String,

    /// Account the expense was paid through
    #[arg(long)]
    pub paid_through_account_id: String,

    /// Amount of the expense
    #[arg(long)]
    pub amount: f64,

    /// Date of the expense (yyyy-mm-dd)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub reference_number: Option<String>,

    /// Receipt file to upload with the expense
    #[arg(long)]
    pub receipt: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for updating an expense
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Expense ID
    pub expense_id: String,

    #[arg(long)]
    pub account_id: Option<String>,

    #[arg(long)]
    pub paid_through_account_id: Option<String>,

    #[arg(long)]
    pub amount: Option<f64>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub reference_number: Option<String>,

    /// Replace the receipt with this file
    #[arg(long)]
    pub receipt: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Receipt subcommands
#[derive(Debug, clap::Subcommand)]
pub enum ReceiptCommands {
    /// Attach a receipt to an expense
    #[clap(name = "add")]
    Add {
        /// Expense ID
        expense_id: String,

        /// Receipt file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the receipt of an expense
    #[clap(name = "get")]
    Get {
        /// Expense ID
        expense_id: String,

        /// Output file path (default: temp directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the receipt of an expense
    #[clap(name = "delete")]
    Delete {
        /// Expense ID
        expense_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run expense commands
pub async fn run(cmd: Commands, global: Global) -> Result<()> {
    if global.verbose {
        println!("Running expenses command...");
    }

    match cmd {
        Commands::List(options) => {
            let expenses = list_expenses_data(&global, options.filters).await?;
            if options.json {
                print_json(&expenses)
            } else {
                display_expenses(&expenses);
                Ok(())
            }
        }
        Commands::Get { expense_id, json } => {
            let expense = get_expense_data(&global, expense_id).await?;
            if json {
                print_json(&expense)
            } else {
                display_expense(&expense);
                Ok(())
            }
        }
        Commands::Create(options) => {
            let json = options.json;
            let expense = create_expense_data(&global, options).await?;
            if json {
                print_json(&expense)
            } else {
                display_expense(&expense);
                Ok(())
            }
        }
        Commands::Update(options) => {
            let json = options.json;
            let expense = update_expense_data(&global, options).await?;
            if json {
                print_json(&expense)
            } else {
                display_expense(&expense);
                Ok(())
            }
        }
        Commands::Delete { expense_id, json } => {
            let client = global.config()?.client()?;
            let message = client.expenses().delete(&expense_id).await?;
            print_message(&message, json)
        }
        Commands::Comments { expense_id, json } => {
            let comments = comments_data(&global, expense_id).await?;
            if json {
                print_json(&comments)
            } else {
                display_comments(&comments);
                Ok(())
            }
        }
        Commands::Receipt(cmd) => receipt_handler(cmd, &global).await,
    }
}

/// List expenses matching the given filters
pub async fn list_expenses_data(global: &Global, filters: Vec<String>) -> Result<Listing<Expense>> {
    let filters = parse_filters(&filters)?;
    let client = global.config()?.client()?;

    Ok(client.expenses().list(Some(&filters)).await?)
}

pub async fn get_expense_data(global: &Global, expense_id: String) -> Result<Expense> {
    let client = global.config()?.client()?;

    Ok(client.expenses().get(&expense_id).await?)
}

pub async fn create_expense_data(global: &Global, options: CreateOptions) -> Result<Expense> {
    let client = global.config()?.client()?;

    let expense = Expense {
        date: options.date,
        description: options.description,
        reference_number: options.reference_number,
        ..Expense::new(
            options.account_id,
            options.paid_through_account_id,
            options.amount,
        )
    };

    let receipt = receipt_attachment(options.receipt).await?;

    Ok(client.expenses().create(&expense, receipt).await?)
}

pub async fn update_expense_data(global: &Global, options: UpdateOptions) -> Result<Expense> {
    let client = global.config()?.client()?;

    let expense = Expense {
        expense_id: Some(options.expense_id),
        account_id: options.account_id,
        paid_through_account_id: options.paid_through_account_id,
        amount: options.amount,
        date: options.date,
        description: options.description,
        reference_number: options.reference_number,
        ..Default::default()
    };

    let receipt = receipt_attachment(options.receipt).await?;

    Ok(client.expenses().update(&expense, receipt).await?)
}

pub async fn comments_data(global: &Global, expense_id: String) -> Result<Listing<Comment>> {
    let client = global.config()?.client()?;

    Ok(client.expenses().comments(&expense_id).await?)
}

async fn receipt_attachment(path: Option<PathBuf>) -> Result<Attachments> {
    Ok(match path {
        Some(path) => Attachments::single(attachment_from_path(RECEIPT_FIELD, &path).await?),
        None => Attachments::none(),
    })
}

async fn receipt_handler(cmd: ReceiptCommands, global: &Global) -> Result<()> {
    let client = global.config()?.client()?;
    let expenses = client.expenses();

    match cmd {
        ReceiptCommands::Add {
            expense_id,
            file,
            json,
        } => {
            let receipt = attachment_from_path(RECEIPT_FIELD, &file).await?;
            let message = expenses.add_receipt(&expense_id, receipt).await?;
            print_message(&message, json)
        }
        ReceiptCommands::Get {
            expense_id,
            output,
            json,
        } => {
            let file = expenses.receipt(&expense_id).await?;
            super::save_download(&file, output, &format!("receipt-{expense_id}"), json).await
        }
        ReceiptCommands::Delete { expense_id, json } => {
            let message = expenses.delete_receipt(&expense_id).await?;
            print_message(&message, json)
        }
    }
}

fn display_expenses(expenses: &Listing<Expense>) {
    if expenses.is_empty() {
        println!("{}", "No expenses found".bright_black());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Date".bold().cyan(),
        "Account".bold().cyan(),
        "Description".bold().cyan(),
        "Total".bold().cyan(),
        "Status".bold().cyan()
    ]);

    for expense in &expenses.items {
        let total = amount(expense.total.or(expense.amount));
        table.add_row(prettytable::row![
            text(&expense.expense_id).bright_blue().to_string(),
            text(&expense.date).bright_black().to_string(),
            text(&expense.account_name),
            text(&expense.description),
            total.bright_white().to_string(),
            text(&expense.status).green().to_string()
        ]);
    }

    table.printstd();

    if expenses.has_more_page() {
        println!(
            "\n{}",
            "More expenses available; pass --filter page=N".bright_black()
        );
    }
}

fn display_expense(expense: &Expense) {
    println!(
        "\n{} - {}\n",
        text(&expense.expense_id).bold().cyan(),
        text(&expense.description).bright_white()
    );

    let paid_through = text(&expense.paid_through_account_name);
    let mut table = new_table();
    let rows = [
        ("Date", text(&expense.date).to_string()),
        ("Account", text(&expense.account_name).to_string()),
        ("Paid Through", paid_through.to_string()),
        ("Amount", amount(expense.amount)),
        ("Total", amount(expense.total)),
        ("Currency", text(&expense.currency_code).to_string()),
        ("Customer", text(&expense.customer_name).to_string()),
        ("Vendor", text(&expense.vendor_name).to_string()),
        ("Reference", text(&expense.reference_number).to_string()),
        ("Receipt", text(&expense.expense_receipt_name).to_string()),
        ("Status", text(&expense.status).green().to_string()),
    ];

    for (label, value) in rows {
        table.add_row(prettytable::row![label.bold().cyan(), value]);
    }

    table.printstd();
}
