//! Resource APIs
//!
//! [`ResourceApi`] holds the operations every resource kind shares; the
//! per-resource wrappers add their own endpoints on top of it.

pub mod expenses;
pub mod resource;
pub mod sales_orders;

pub use expenses::ExpensesApi;
pub use resource::ResourceApi;
pub use sales_orders::SalesOrdersApi;

use books_core::payload::{Attachment, Attachments};

/// Send every part under `field`, whatever name the caller gave it
fn relabel(attachments: Attachments, field: &str) -> Attachments {
    attachments
        .into_iter()
        .map(|attachment| Attachment {
            field: field.to_string(),
            ..attachment
        })
        .collect()
}
