//! Master-data lookups for description rendering.
//!
//! Reference ids on records resolve to display names through
//! [`MasterData`]. The maps feed descriptive text only: a missing name is
//! a data-quality condition the caller papers over with its
//! [`FallbackLabels`] policy, never a correctness input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id to display-name maps for the three reference collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterData {
    /// Product id to product name.
    pub products: HashMap<String, String>,
    /// Activity-type id to activity name.
    pub activities: HashMap<String, String>,
    /// Expense-type id to expense name.
    pub expense_types: HashMap<String, String>,
}

impl MasterData {
    /// Create an empty lookup bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a product id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&str> {
        self.products.get(id).map(String::as_str)
    }

    /// Resolve an activity-type id.
    #[must_use]
    pub fn activity(&self, id: &str) -> Option<&str> {
        self.activities.get(id).map(String::as_str)
    }

    /// Resolve an expense-type id.
    #[must_use]
    pub fn expense_type(&self, id: &str) -> Option<&str> {
        self.expense_types.get(id).map(String::as_str)
    }
}

/// Labels substituted when a lookup misses.
///
/// The engine never hard-codes fallback text; callers that want
/// different wording (or a translated one) supply their own policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackLabels {
    /// Substitute for an unresolved product id.
    pub product: String,
    /// Substitute for an unresolved activity-type id.
    pub activity: String,
    /// Substitute for an unresolved expense-type id.
    pub expense_type: String,
}

impl Default for FallbackLabels {
    fn default() -> Self {
        Self {
            product: "Unknown product".into(),
            activity: "Unknown activity".into(),
            expense_type: "Unknown expense type".into(),
        }
    }
}
