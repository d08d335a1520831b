use std::path::PathBuf;

use books::api::sales_orders::{ATTACHMENT_FIELD, EMAIL_ATTACHMENTS_FIELD};
use books::files::attachment_from_path;
use books_core::models::{Email, SalesOrder, Template};
use books_core::parser::Listing;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{
    amount, display_comments, parse_filters, print_json, print_message, save_download, text,
};
use crate::prelude::{println, *};
use crate::Global;

/// Sales order commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List sales orders
    #[clap(name = "list")]
    List {
        /// Filter as key=value (e.g. status=open, customer_id=42); repeatable
        #[arg(long = "filter", short = 'f')]
        filters: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get detailed information about a sales order
    #[clap(name = "get")]
    Get {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a sales order
    #[clap(name = "delete")]
    Delete {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a draft or void sales order as open
    #[clap(name = "open")]
    Open {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a sales order as void
    #[clap(name = "void")]
    Void {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Email a sales order to its customer
    #[clap(name = "email")]
    Email(EmailOptions),

    /// Export sales orders as a single PDF
    #[clap(name = "export")]
    Export(DownloadOptions),

    /// Download a printable PDF of sales orders
    #[clap(name = "print")]
    Print(DownloadOptions),

    /// List the PDF templates for sales orders
    #[clap(name = "templates")]
    Templates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the comments and history of a sales order
    #[clap(name = "comments")]
    Comments {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the file attached to a sales order
    #[command(subcommand)]
    Attachment(AttachmentCommands),
}

/// Options for emailing a sales order
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct EmailOptions {
    /// Sales order ID
    pub salesorder_id: String,

    /// Recipient address; repeatable. Without any recipient, subject or body
    /// the server's default email is sent
    #[arg(long)]
    pub to: Vec<String>,

    /// CC address; repeatable
    #[arg(long)]
    pub cc: Vec<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    /// File to attach to the email; repeatable
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for PDF downloads
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DownloadOptions {
    /// Filter as key=value (e.g. salesorder_ids=1,2,3); repeatable
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,

    /// Output file path (default: temp directory)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Attachment subcommands
#[derive(Debug, clap::Subcommand)]
pub enum AttachmentCommands {
    /// Download the attachment of a sales order
    #[clap(name = "get")]
    Get {
        /// Sales order ID
        salesorder_id: String,

        /// Output file path (default: temp directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Attach a file to a sales order
    #[clap(name = "add")]
    Add {
        /// Sales order ID
        salesorder_id: String,

        /// File to attach
        file: PathBuf,

        /// Send the file along when the sales order is emailed
        #[arg(long)]
        can_send_in_mail: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the attachment of a sales order
    #[clap(name = "delete")]
    Delete {
        /// Sales order ID
        salesorder_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run sales order commands
pub async fn run(cmd: Commands, global: Global) -> Result<()> {
    if global.verbose {
        println!("Running sales orders command...");
    }

    let client = global.config()?.client()?;
    let orders = client.sales_orders();

    match cmd {
        Commands::List { filters, json } => {
            let filters = parse_filters(&filters)?;
            let listing = orders.list(Some(&filters)).await?;
            if json {
                print_json(&listing)
            } else {
                display_sales_orders(&listing);
                Ok(())
            }
        }
        Commands::Get {
            salesorder_id,
            json,
        } => {
            let order = orders.get(&salesorder_id, None).await?;
            if json {
                print_json(&order)
            } else {
                display_sales_order(&order);
                Ok(())
            }
        }
        Commands::Delete {
            salesorder_id,
            json,
        } => print_message(&orders.delete(&salesorder_id).await?, json),
        Commands::Open {
            salesorder_id,
            json,
        } => print_message(&orders.mark_as_open(&salesorder_id).await?, json),
        Commands::Void {
            salesorder_id,
            json,
        } => print_message(&orders.mark_as_void(&salesorder_id).await?, json),
        Commands::Email(options) => {
            let json = options.json;
            let salesorder_id = options.salesorder_id.clone();
            let email = email_from_options(options).await?;
            let message = orders
                .send_email(&salesorder_id, None, email.as_ref())
                .await?;
            print_message(&message, json)
        }
        Commands::Export(options) => {
            let filters = parse_filters(&options.filters)?;
            let file = orders.bulk_export(Some(&filters)).await?;
            save_download(&file, options.output, "salesorders.pdf", options.json).await
        }
        Commands::Print(options) => {
            let filters = parse_filters(&options.filters)?;
            let file = orders.bulk_print(Some(&filters)).await?;
            save_download(&file, options.output, "salesorders-print.pdf", options.json).await
        }
        Commands::Templates { json } => {
            let templates = orders.templates().await?;
            if json {
                print_json(&templates)
            } else {
                display_templates(&templates);
                Ok(())
            }
        }
        Commands::Comments {
            salesorder_id,
            json,
        } => {
            let comments = orders.comments(&salesorder_id).await?;
            if json {
                print_json(&comments)
            } else {
                display_comments(&comments);
                Ok(())
            }
        }
        Commands::Attachment(cmd) => match cmd {
            AttachmentCommands::Get {
                salesorder_id,
                output,
                json,
            } => {
                let file = orders.attachment(&salesorder_id, None).await?;
                let fallback = format!("salesorder-{salesorder_id}-attachment");
                save_download(&file, output, &fallback, json).await
            }
            AttachmentCommands::Add {
                salesorder_id,
                file,
                can_send_in_mail,
                json,
            } => {
                let filters = books_core::query::QueryParameters::new()
                    .with("can_send_in_mail", can_send_in_mail);
                let attachment = attachment_from_path(ATTACHMENT_FIELD, &file).await?;
                let message = orders
                    .add_attachment(&salesorder_id, Some(&filters), attachment)
                    .await?;
                print_message(&message, json)
            }
            AttachmentCommands::Delete {
                salesorder_id,
                json,
            } => print_message(&orders.delete_attachment(&salesorder_id).await?, json),
        },
    }
}

/// Build the email to send, or `None` to let the server use its default
async fn email_from_options(options: EmailOptions) -> Result<Option<Email>> {
    let mut attachments = Vec::with_capacity(options.attachments.len());
    for path in &options.attachments {
        attachments.push(attachment_from_path(EMAIL_ATTACHMENTS_FIELD, path).await?);
    }

    let has_content = !options.to.is_empty()
        || !options.cc.is_empty()
        || options.subject.is_some()
        || options.body.is_some();

    if !has_content {
        if !attachments.is_empty() {
            return Err(eyre!("--attach requires a recipient, subject or body"));
        }
        return Ok(None);
    }

    Ok(Some(Email {
        to_mail_ids: options.to,
        cc_mail_ids: options.cc,
        subject: options.subject,
        body: options.body,
        attachments,
        ..Default::default()
    }))
}

fn display_sales_orders(orders: &Listing<SalesOrder>) {
    if orders.is_empty() {
        println!("{}", "No sales orders found".bright_black());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Number".bold().cyan(),
        "Date".bold().cyan(),
        "Customer".bold().cyan(),
        "Total".bold().cyan(),
        "Status".bold().cyan()
    ]);

    for order in &orders.items {
        table.add_row(prettytable::row![
            text(&order.salesorder_id).bright_blue().to_string(),
            text(&order.salesorder_number).bright_white().to_string(),
            text(&order.date).bright_black().to_string(),
            text(&order.customer_name),
            amount(order.total),
            text(&order.status).green().to_string()
        ]);
    }

    table.printstd();

    if orders.has_more_page() {
        println!(
            "\n{}",
            "More sales orders available; pass --filter page=N".bright_black()
        );
    }
}

fn display_sales_order(order: &SalesOrder) {
    println!(
        "\n{} - {}\n",
        text(&order.salesorder_number).bold().cyan(),
        text(&order.customer_name).bright_white()
    );

    let mut table = new_table();
    let rows = [
        ("ID", text(&order.salesorder_id).to_string()),
        ("Status", text(&order.status).green().to_string()),
        ("Date", text(&order.date).to_string()),
        ("Shipment", text(&order.shipment_date).to_string()),
        ("Reference", text(&order.reference_number).to_string()),
        ("Currency", text(&order.currency_code).to_string()),
        ("Sub Total", amount(order.sub_total)),
        ("Tax", amount(order.tax_total)),
        ("Total", amount(order.total).bright_white().to_string()),
    ];

    for (label, value) in rows {
        table.add_row(prettytable::row![label.bold().cyan(), value]);
    }

    table.printstd();

    if !order.line_items.is_empty() {
        println!("\n{}", "Line Items".bold().cyan());

        let mut items = new_table();
        items.add_row(prettytable::row![
            "Item".bold(),
            "Qty".bold(),
            "Rate".bold(),
            "Total".bold()
        ]);
        for item in &order.line_items {
            items.add_row(prettytable::row![
                text(&item.name),
                amount(item.quantity),
                amount(item.rate),
                amount(item.item_total)
            ]);
        }
        items.printstd();
    }
}

fn display_templates(templates: &Listing<Template>) {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Type".bold().cyan()
    ]);

    for template in &templates.items {
        table.add_row(prettytable::row![
            text(&template.template_id).bright_blue().to_string(),
            text(&template.template_name),
            text(&template.template_type).bright_black().to_string()
        ]);
    }

    table.printstd();
}
