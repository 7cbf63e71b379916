//! Change events
//!
//! A change event only names the entity that changed. Consumers always
//! re-read the canonical record, so events carry no payload and may be
//! delivered more than once or out of order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation that produced a change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Notification that an entity changed
///
/// Wire form: `{"operation":"UPDATE","entity_id":"..."}`. The legacy field
/// name `hotel_id` is accepted on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub operation: Operation,
    #[serde(alias = "hotel_id")]
    pub entity_id: String,
}

impl ChangeEvent {
    /// Create a new change event
    pub fn new(operation: Operation, entity_id: impl Into<String>) -> Self {
        Self {
            operation,
            entity_id: entity_id.into(),
        }
    }

    /// Shorthand for a `CREATE` event
    pub fn created(entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Create, entity_id)
    }

    /// Shorthand for an `UPDATE` event
    pub fn updated(entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Update, entity_id)
    }

    /// Shorthand for a `DELETE` event
    pub fn deleted(entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Delete, entity_id)
    }
}
