//! Core library for books
//!
//! This crate implements the **Functional Core** of the books client: every
//! decision about how a request is assembled and how a response is read, with
//! zero I/O. The `books` crate is the Imperative Shell that owns the HTTP
//! transport, file access and the CLI.
//!
//! # Request flow
//!
//! ```text
//! caller filters ─▶ query::build_query ─▶ payload::encode_payload
//!                      (tenant scope)        (JSONString, multipart?)
//!                                                   │
//!          shell: dispatch over the transport ◀─────┘
//!                          │
//!   response::check_status ─▶ router::route ─▶ typed object / list / message
//! ```
//!
//! # Module Organization
//!
//! - [`tenant`]: credential, organization and regional endpoint
//! - [`query`]: ordered query parameters and tenant scoping
//! - [`payload`]: `JSONString` form field and multipart attachments
//! - [`path`]: resource URL paths
//! - [`response`]: raw responses, binary downloads and status classification
//! - [`parser`]: envelope parsers for typed objects, lists and messages
//! - [`router`]: expectation-driven response routing
//! - [`resource`]: resource kinds the generic API is parameterized by
//! - [`models`]: domain objects
//! - [`error`]: the shared error taxonomy
//!
//! # Example Usage
//!
//! ```rust
//! use books_core::query::{build_query, QueryParameters};
//! use books_core::tenant::{Region, TenantContext};
//!
//! let tenant = TenantContext::new("token", "T1", Region::Default);
//! let filters = QueryParameters::new().with("status", "unbilled");
//!
//! let params = build_query(&tenant, Some(&filters));
//!
//! assert_eq!(params.len(), 2);
//! assert_eq!(params.get("organization_id").unwrap().to_string(), "T1");
//! ```

pub mod error;
pub mod models;
pub mod parser;
pub mod path;
pub mod payload;
pub mod query;
pub mod resource;
pub mod response;
pub mod router;
pub mod tenant;
pub mod verb;

pub use error::{Error, Result};
pub use verb::Verb;
