//! Imperative Shell of the books client
//!
//! Owns everything with side effects: the HTTP [`transport`], request
//! [`dispatcher`], local [`files`], and the typed resource [`api`]s built on
//! top of them. Every decision about request shape and response reading lives
//! in `books_core`.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> books_core::Result<()> {
//! use books::BooksClient;
//! use books_core::query::QueryParameters;
//! use books_core::tenant::{Region, TenantContext};
//!
//! let client = BooksClient::new(TenantContext::new("token", "T1", Region::Default))?;
//! let filters = QueryParameters::new().with("status", "unbilled");
//!
//! for expense in client.expenses().list(Some(&filters)).await? {
//!     println!("{:?} {:?}", expense.expense_id, expense.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod dispatcher;
pub mod files;
pub mod transport;

pub use client::BooksClient;
pub use dispatcher::Dispatcher;
pub use transport::{ReqwestTransport, Transport};
