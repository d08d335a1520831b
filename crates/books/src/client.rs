use books_core::resource::ResourceKind;
use books_core::tenant::TenantContext;
use books_core::Result;

use crate::api::{ExpensesApi, ResourceApi, SalesOrdersApi};
use crate::dispatcher::Dispatcher;
use crate::transport::{ReqwestTransport, Transport};

/// Entry point to the books API for one organization
///
/// ```no_run
/// # async fn run() -> books_core::Result<()> {
/// use books::BooksClient;
/// use books_core::tenant::{Region, TenantContext};
///
/// let client = BooksClient::new(TenantContext::new("token", "10234695", Region::Eu))?;
/// let expenses = client.expenses().list(None).await?;
/// println!("{} expenses", expenses.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BooksClient<T = ReqwestTransport> {
    dispatcher: Dispatcher<T>,
}

impl BooksClient<ReqwestTransport> {
    /// Client over the default reqwest transport
    pub fn new(tenant: TenantContext) -> Result<Self> {
        Ok(Self::with_transport(tenant, ReqwestTransport::new()?))
    }
}

impl<T: Transport> BooksClient<T> {
    pub fn with_transport(tenant: TenantContext, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(tenant, transport),
        }
    }

    pub fn tenant(&self) -> &TenantContext {
        self.dispatcher.tenant()
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    pub fn expenses(&self) -> ExpensesApi<'_, T> {
        ExpensesApi::new(&self.dispatcher)
    }

    pub fn sales_orders(&self) -> SalesOrdersApi<'_, T> {
        SalesOrdersApi::new(&self.dispatcher)
    }

    /// Generic operations of any resource kind
    pub fn resource<K: ResourceKind>(&self) -> ResourceApi<'_, T, K> {
        ResourceApi::new(&self.dispatcher)
    }
}
