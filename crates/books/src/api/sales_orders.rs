use books_core::models::{Address, Comment, Email, SalesOrder, Template};
use books_core::parser::Listing;
use books_core::path::ResourcePath;
use books_core::payload::{Attachment, Attachments};
use books_core::query::QueryParameters;
use books_core::resource::{ResourceKind, SalesOrders};
use books_core::response::BinaryFile;
use books_core::{Error, Result, Verb};

use super::{relabel, ResourceApi};
use crate::dispatcher::Dispatcher;
use crate::transport::Transport;

/// Form field of a sales order's own attachment
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Form field of files sent along with an email
pub const EMAIL_ATTACHMENTS_FIELD: &str = "attachments";

/// `/salesorders` operations
#[derive(Debug)]
pub struct SalesOrdersApi<'a, T> {
    resource: ResourceApi<'a, T, SalesOrders>,
}

impl<'a, T: Transport> SalesOrdersApi<'a, T> {
    pub fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self {
            resource: ResourceApi::new(dispatcher),
        }
    }

    pub async fn list(&self, filters: Option<&QueryParameters>) -> Result<Listing<SalesOrder>> {
        self.resource.list(filters).await
    }

    pub async fn get(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
    ) -> Result<SalesOrder> {
        self.resource.get(salesorder_id, filters).await
    }

    /// Create a sales order (`ignore_auto_number_generation` and similar go in `filters`)
    pub async fn create(
        &self,
        sales_order: &SalesOrder,
        filters: Option<&QueryParameters>,
    ) -> Result<SalesOrder> {
        self.resource
            .create(sales_order, Attachments::none(), filters)
            .await
    }

    /// Update an existing sales order; its identifier is taken from the object
    pub async fn update(
        &self,
        sales_order: &SalesOrder,
        filters: Option<&QueryParameters>,
    ) -> Result<SalesOrder> {
        let id = SalesOrders::identifier(sales_order).ok_or(Error::MissingIdentifier {
            kind: SalesOrders::NAME,
        })?;

        self.resource
            .update(id, sales_order, Attachments::none(), filters)
            .await
    }

    pub async fn delete(&self, salesorder_id: &str) -> Result<String> {
        self.resource.delete(salesorder_id).await
    }

    /// Move a draft or void sales order to open
    pub async fn mark_as_open(&self, salesorder_id: &str) -> Result<String> {
        self.status(salesorder_id, "open").await
    }

    pub async fn mark_as_void(&self, salesorder_id: &str) -> Result<String> {
        self.status(salesorder_id, "void").await
    }

    async fn status(&self, salesorder_id: &str, status: &str) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Post,
                &item_child(salesorder_id, "status").segment(status),
                None,
                None,
                Attachments::none(),
            )
            .await
    }

    /// Email a sales order to its customer
    ///
    /// Without `email` the server composes the message from the default
    /// template. Files in `email.attachments` are sent as `attachments`
    /// parts, which turns the body multipart.
    pub async fn send_email(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
        email: Option<&Email>,
    ) -> Result<String> {
        let attachments = email
            .map(|email| email.attachments.iter().cloned().collect())
            .unwrap_or_default();

        self.resource
            .fetch_message(
                Verb::Post,
                &email_path(salesorder_id),
                filters,
                email,
                relabel(attachments, EMAIL_ATTACHMENTS_FIELD),
            )
            .await
    }

    /// Email content the server would send by default
    pub async fn email_content(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
    ) -> Result<Email> {
        self.resource
            .fetch_object::<Email, ()>(
                Verb::Get,
                &email_path(salesorder_id),
                filters,
                None,
                Attachments::none(),
            )
            .await
    }

    /// Export up to 25 sales orders as a single PDF
    pub async fn bulk_export(&self, filters: Option<&QueryParameters>) -> Result<BinaryFile> {
        let path = SalesOrders::collection_path().segment("pdf");
        self.resource.download(&path, filters).await
    }

    /// Printable PDF of up to 25 sales orders
    pub async fn bulk_print(&self, filters: Option<&QueryParameters>) -> Result<BinaryFile> {
        let path = SalesOrders::collection_path().segment("print");
        self.resource.download(&path, filters).await
    }

    pub async fn update_billing_address(
        &self,
        salesorder_id: &str,
        address: &Address,
    ) -> Result<String> {
        self.address(salesorder_id, "billing", address).await
    }

    pub async fn update_shipping_address(
        &self,
        salesorder_id: &str,
        address: &Address,
    ) -> Result<String> {
        self.address(salesorder_id, "shipping", address).await
    }

    async fn address(&self, salesorder_id: &str, kind: &str, address: &Address) -> Result<String> {
        self.resource
            .fetch_message(
                Verb::Put,
                &item_child(salesorder_id, "address").segment(kind),
                None,
                Some(address),
                Attachments::none(),
            )
            .await
    }

    /// PDF templates available for sales orders
    pub async fn templates(&self) -> Result<Listing<Template>> {
        self.resource
            .fetch_list(&SalesOrders::collection_path().segment("templates"), None)
            .await
    }

    pub async fn update_template(&self, salesorder_id: &str, template_id: &str) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Put,
                &item_child(salesorder_id, "templates").segment(template_id),
                None,
                None,
                Attachments::none(),
            )
            .await
    }

    /// Download the file attached to a sales order (`preview` goes in `filters`)
    pub async fn attachment(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
    ) -> Result<BinaryFile> {
        self.resource
            .download(&attachment_path(salesorder_id), filters)
            .await
    }

    /// Attach a file (`can_send_in_mail` goes in `filters`)
    pub async fn add_attachment(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
        file: Attachment,
    ) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Post,
                &attachment_path(salesorder_id),
                filters,
                None,
                relabel(Attachments::single(file), ATTACHMENT_FIELD),
            )
            .await
    }

    /// Change attachment settings such as `can_send_in_mail`
    pub async fn update_attachment(
        &self,
        salesorder_id: &str,
        filters: Option<&QueryParameters>,
    ) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Put,
                &attachment_path(salesorder_id),
                filters,
                None,
                Attachments::none(),
            )
            .await
    }

    pub async fn delete_attachment(&self, salesorder_id: &str) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Delete,
                &attachment_path(salesorder_id),
                None,
                None,
                Attachments::none(),
            )
            .await
    }

    pub async fn comments(&self, salesorder_id: &str) -> Result<Listing<Comment>> {
        self.resource.comments(salesorder_id).await
    }

    pub async fn add_comment(&self, salesorder_id: &str, description: &str) -> Result<Comment> {
        self.resource
            .fetch_object(
                Verb::Post,
                &item_child(salesorder_id, "comments"),
                None,
                Some(&Comment::with_description(description)),
                Attachments::none(),
            )
            .await
    }

    pub async fn update_comment(
        &self,
        salesorder_id: &str,
        comment_id: &str,
        description: &str,
    ) -> Result<Comment> {
        self.resource
            .fetch_object(
                Verb::Put,
                &item_child(salesorder_id, "comments").segment(comment_id),
                None,
                Some(&Comment::with_description(description)),
                Attachments::none(),
            )
            .await
    }

    pub async fn delete_comment(&self, salesorder_id: &str, comment_id: &str) -> Result<String> {
        self.resource
            .fetch_message::<()>(
                Verb::Delete,
                &item_child(salesorder_id, "comments").segment(comment_id),
                None,
                None,
                Attachments::none(),
            )
            .await
    }
}

fn item_child(salesorder_id: &str, child: &str) -> ResourcePath {
    SalesOrders::item_path(salesorder_id).segment(child)
}

fn email_path(salesorder_id: &str) -> ResourcePath {
    item_child(salesorder_id, "email")
}

fn attachment_path(salesorder_id: &str) -> ResourcePath {
    item_child(salesorder_id, ATTACHMENT_FIELD)
}
