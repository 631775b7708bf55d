//! Domain types for workspaces, the top-level grouping of financial activity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity};

/// A named grouping of categories and reports, owned by exactly one user.
///
/// Workspaces own categories; accounts stay user-global (see [`crate::Account`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: WorkspaceKind,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(user_id: Uuid, name: impl Into<String>, kind: WorkspaceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            kind,
            currency: "USD".into(),
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Identifiable for Workspace {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Workspace {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Supported workspace flavors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceKind {
    Personal,
    Business,
    Investment,
}

impl fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkspaceKind::Personal => "personal",
            WorkspaceKind::Business => "business",
            WorkspaceKind::Investment => "investment",
        };
        f.write_str(label)
    }
}
