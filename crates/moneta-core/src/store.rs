//! Read-only accessor contract between the reporting core and its backing
//! storage.

use std::collections::HashSet;

use moneta_domain::{Account, Category, DateWindow, FlowKind, MonthKey, Transaction, Workspace};
use uuid::Uuid;

use crate::CoreError;

/// Row filter for [`LedgerStore::list_transactions`].
///
/// `None` fields do not constrain the result. Implementations may over-return
/// (for example by ignoring a filter they cannot push down); the engine
/// re-applies authorization on its side regardless.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category_ids: Option<Vec<Uuid>>,
    pub account_ids: Option<Vec<Uuid>>,
    pub date_range: Option<DateWindow>,
    pub kind: Option<FlowKind>,
}

impl TransactionFilter {
    pub fn in_range(range: DateWindow) -> Self {
        Self {
            date_range: Some(range),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: FlowKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_categories(mut self, category_ids: Vec<Uuid>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }

    pub fn with_accounts(mut self, account_ids: Vec<Uuid>) -> Self {
        self.account_ids = Some(account_ids);
        self
    }

    /// Whether a transaction satisfies every set constraint. Backends without
    /// native filtering apply this row by row.
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(txn.date) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(accounts) = &self.account_ids {
            if !accounts.contains(&txn.account_id) {
                return false;
            }
        }
        if let Some(categories) = &self.category_ids {
            match txn.category_id {
                Some(id) if categories.contains(&id) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Abstraction over persistence backends that can feed the reporting core.
///
/// Implementations return only rows the given user is allowed to see; the
/// engine still drops anything whose category falls outside the resolved
/// scope. All methods are plain reads with no side effects, so callers may
/// run them concurrently and abandon them on cancellation.
pub trait LedgerStore: Send + Sync {
    fn list_workspaces(&self, user_id: Uuid) -> Result<Vec<Workspace>, CoreError>;

    /// Looks a workspace up regardless of owner, so the resolver can tell
    /// "absent" apart from "owned by someone else".
    fn find_workspace(&self, workspace_id: Uuid) -> Result<Option<Workspace>, CoreError>;

    /// Accounts are user-global; `month` narrows them to one balance snapshot.
    fn list_accounts(&self, user_id: Uuid, month: Option<MonthKey>)
        -> Result<Vec<Account>, CoreError>;

    fn list_categories(&self, workspace_ids: &[Uuid]) -> Result<Vec<Category>, CoreError>;

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, CoreError>;
}

/// Detects dangling references within a snapshot of ledger rows.
pub fn integrity_warnings(
    accounts: &[Account],
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<String> {
    let account_ids: HashSet<_> = accounts.iter().map(|a| a.id).collect();
    let category_ids: HashSet<_> = categories.iter().map(|c| c.id).collect();
    let mut warnings = Vec::new();

    for txn in transactions {
        if !account_ids.contains(&txn.account_id) {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        if let Some(category) = txn.category_id {
            if !category_ids.contains(&category) {
                warnings.push(format!(
                    "transaction {} references missing category {}",
                    txn.id, category
                ));
            }
        }
        if txn.amount < 0.0 || !txn.amount.is_finite() {
            warnings.push(format!(
                "transaction {} carries invalid amount {}",
                txn.id, txn.amount
            ));
        }
    }
    warnings
}
