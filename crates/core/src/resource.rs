//! Resource kinds
//!
//! A resource kind ties a collection URL segment to the domain object it
//! serves. The generic request-assembly core is parameterized by a kind
//! instead of being re-implemented per resource.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Expense, SalesOrder};
use crate::parser::{EnvelopeParser, Enveloped};
use crate::path::ResourcePath;

pub trait ResourceKind {
    type Item: Enveloped + Serialize + DeserializeOwned;

    /// Human-readable name used in error messages
    const NAME: &'static str;

    /// Collection segment under the service root, e.g. `expenses`
    const COLLECTION: &'static str;

    /// Identifier of an existing object, used to build its URL
    fn identifier(item: &Self::Item) -> Option<&str>;

    fn parser() -> EnvelopeParser<Self::Item> {
        EnvelopeParser::new()
    }

    fn collection_path() -> ResourcePath {
        ResourcePath::collection(Self::COLLECTION)
    }

    fn item_path(id: &str) -> ResourcePath {
        Self::collection_path().segment(id)
    }
}

/// `/expenses`
#[derive(Debug, Clone, Copy)]
pub struct Expenses;

impl ResourceKind for Expenses {
    type Item = Expense;

    const NAME: &'static str = "Expense";
    const COLLECTION: &'static str = "expenses";

    fn identifier(item: &Expense) -> Option<&str> {
        item.expense_id.as_deref()
    }
}

/// `/salesorders`
#[derive(Debug, Clone, Copy)]
pub struct SalesOrders;

impl ResourceKind for SalesOrders {
    type Item = SalesOrder;

    const NAME: &'static str = "Sales order";
    const COLLECTION: &'static str = "salesorders";

    fn identifier(item: &SalesOrder) -> Option<&str> {
        item.salesorder_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        assert_eq!(Expenses::item_path("1").to_path(), "/expenses/1");
        assert_eq!(SalesOrders::collection_path().to_path(), "/salesorders");
    }

    #[test]
    fn test_identifiers() {
        let expense = Expense {
            expense_id: Some("982".to_string()),
            ..Default::default()
        };

        assert_eq!(Expenses::identifier(&expense), Some("982"));
        assert_eq!(SalesOrders::identifier(&SalesOrder::default()), None);
    }
}
