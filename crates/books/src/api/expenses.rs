use books_core::models::{Comment, Expense};
use books_core::parser::Listing;
use books_core::path::ResourcePath;
use books_core::payload::{Attachment, Attachments};
use books_core::query::QueryParameters;
use books_core::resource::{Expenses, ResourceKind};
use books_core::response::BinaryFile;
use books_core::{Error, Result, Verb};

use super::{relabel, ResourceApi};
use crate::dispatcher::Dispatcher;
use crate::transport::Transport;

/// Form field receipts travel under
pub const RECEIPT_FIELD: &str = "receipt";

/// `/expenses` operations
#[derive(Debug)]
pub struct ExpensesApi<'a, T> {
    resource: ResourceApi<'a, T, Expenses>,
}

impl<'a, T: Transport> ExpensesApi<'a, T> {
    pub fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self {
            resource: ResourceApi::new(dispatcher),
        }
    }

    /// Create an expense, optionally with its receipt
    ///
    /// Every attachment is sent as the `receipt` part; with none the body is
    /// plain form-encoded.
    pub async fn create(&self, expense: &Expense, receipt: Attachments) -> Result<Expense> {
        self.resource
            .create(expense, relabel(receipt, RECEIPT_FIELD), None)
            .await
    }

    /// Create an expense from the three mandatory fields
    pub async fn create_simple(
        &self,
        account_id: &str,
        paid_through_account_id: &str,
        amount: f64,
    ) -> Result<Expense> {
        let expense = Expense::new(account_id, paid_through_account_id, amount);
        self.create(&expense, Attachments::none()).await
    }

    pub async fn get(&self, expense_id: &str) -> Result<Expense> {
        self.resource.get(expense_id, None).await
    }

    /// Update an existing expense; its identifier is taken from the object
    pub async fn update(&self, expense: &Expense, receipt: Attachments) -> Result<Expense> {
        let id = Expenses::identifier(expense).ok_or(Error::MissingIdentifier {
            kind: Expenses::NAME,
        })?;

        self.resource
            .update(id, expense, relabel(receipt, RECEIPT_FIELD), None)
            .await
    }

    pub async fn delete(&self, expense_id: &str) -> Result<String> {
        self.resource.delete(expense_id).await
    }

    /// List expenses, e.g. filtered by `status` or `description_contains`
    pub async fn list(&self, filters: Option<&QueryParameters>) -> Result<Listing<Expense>> {
        self.resource.list(filters).await
    }

    /// History and comments of an expense
    pub async fn comments(&self, expense_id: &str) -> Result<Listing<Comment>> {
        self.resource.comments(expense_id).await
    }

    /// Attach a receipt to an existing expense
    pub async fn add_receipt(&self, expense_id: &str, receipt: Attachment) -> Result<String> {
        let receipt = relabel(Attachments::single(receipt), RECEIPT_FIELD);

        self.resource
            .fetch_message::<()>(
                Verb::Post,
                &receipt_path(expense_id),
                None,
                None,
                receipt,
            )
            .await
    }

    /// Download the receipt of an expense
    pub async fn receipt(&self, expense_id: &str) -> Result<BinaryFile> {
        self.resource
            .download(&receipt_path(expense_id), None)
            .await
    }

    pub async fn delete_receipt(&self, expense_id: &str) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Delete,
                &receipt_path(expense_id),
                None,
                None,
                Attachments::none(),
            )
            .await
    }
}

fn receipt_path(expense_id: &str) -> ResourcePath {
    Expenses::item_path(expense_id).segment(RECEIPT_FIELD)
}
