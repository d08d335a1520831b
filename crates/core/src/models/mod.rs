//! Domain objects exchanged with the accounting service
//!
//! Field names follow the service's snake_case JSON. Every optional field is
//! skipped when serializing so that partial objects can be sent for updates.

mod address;
mod comment;
mod email;
mod expense;
mod sales_order;
mod template;

pub use address::Address;
pub use comment::Comment;
pub use email::{Email, EmailContact};
pub use expense::Expense;
pub use sales_order::{LineItem, SalesOrder};
pub use template::Template;
