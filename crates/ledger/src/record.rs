//! The module contains the `Record` type representing one expense entry.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One expense: what it was for and how much it cost.
///
/// The id is assigned once at creation and never reused; the persisted JSON
/// shape is exactly these three fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

impl Record {
    pub fn new(name: String, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            amount,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.name, self.amount)
    }
}
