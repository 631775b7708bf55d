//! Domain types for ledger transactions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{FlowKind, Identifiable};

/// A single dated financial event.
///
/// `amount` is a non-negative magnitude; the sign is carried by `kind`.
/// `category_id` may be absent — such transactions are attributed to the
/// synthetic uncategorized bucket at reporting time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub date: NaiveDate,
    pub kind: FlowKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        account_id: Uuid,
        category_id: Option<Uuid>,
        date: NaiveDate,
        kind: FlowKind,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            category_id,
            date,
            kind,
            amount,
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Signed value of the transaction: revenue positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            FlowKind::Revenue => self.amount,
            FlowKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}
