//! Resolves a report request into the authorized id sets and date window.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use moneta_domain::{
    Account, Category, DateWindow, MonthKey, Transaction, Workspace, FALLBACK_COLOR,
    UNCATEGORIZED_LABEL,
};
use tracing::debug;
use uuid::Uuid;

use crate::{CoreError, CoreResult, LedgerStore};

/// Lookup join from category id to category row.
///
/// This is the derived relation that attributes a transaction to a workspace:
/// transactions carry no workspace id, so membership in this index is what
/// scopes them.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_id: HashMap<Uuid, Category>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            by_id: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Category> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Authorization predicate for aggregate totals: categorized transactions
    /// must resolve inside the index; uncategorized ones pass through and land
    /// in the synthetic bucket.
    pub fn authorizes(&self, txn: &Transaction) -> bool {
        match txn.category_id {
            Some(id) => self.contains(id),
            None => true,
        }
    }

    pub fn display_name(&self, id: Option<Uuid>) -> String {
        id.and_then(|id| self.get(id))
            .map(|category| category.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string())
    }

    pub fn color(&self, id: Option<Uuid>) -> String {
        id.and_then(|id| self.get(id))
            .and_then(|category| category.color.clone())
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }
}

/// Everything the aggregation engine needs for one report request.
#[derive(Debug, Clone)]
pub struct ResolvedScope {
    /// The requested workspace, when the report is workspace-scoped.
    pub workspace: Option<Workspace>,
    pub workspace_ids: Vec<Uuid>,
    /// Account snapshots for the report month; source of the balance figure.
    pub accounts: Vec<Account>,
    /// Every account id the user owns, across all month snapshots.
    /// Transactions on accounts outside this set never enter a report.
    pub account_ids: HashSet<Uuid>,
    /// Categories of all of the user's workspaces. Aggregate totals always
    /// run user-wide, even for workspace-scoped reports.
    pub categories: CategoryIndex,
    /// Categories of the requested workspace only. The recent-activity feed
    /// is narrowed to these; for global reports the set covers every
    /// workspace.
    pub feed_category_ids: HashSet<Uuid>,
    pub month: MonthKey,
    pub window: DateWindow,
}

impl ResolvedScope {
    /// True when the user owns no workspaces at all.
    pub fn is_empty(&self) -> bool {
        self.workspace_ids.is_empty()
    }

    pub fn balance(&self) -> f64 {
        self.accounts.iter().map(|account| account.balance).sum()
    }

    /// Account-ownership leg of authorization: a transaction belongs to the
    /// caller only through the referenced account. Uncategorized rows have no
    /// category to vouch for them, so this check is what keeps foreign
    /// activity out.
    pub fn owns_account(&self, txn: &Transaction) -> bool {
        self.account_ids.contains(&txn.account_id)
    }

    /// Strict feed predicate: uncategorized rows never appear in a
    /// workspace-scoped feed.
    pub fn feed_allows(&self, txn: &Transaction) -> bool {
        match txn.category_id {
            Some(id) => self.feed_category_ids.contains(&id),
            None => self.workspace.is_none(),
        }
    }
}

/// Turns `(user, workspace?, month?)` into a [`ResolvedScope`].
///
/// Identity is always an explicit parameter; nothing here reads ambient
/// session state.
pub struct ScopeResolver<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Resolves the authorized scope for one report. `today` anchors the
    /// default month when `month` is absent.
    pub fn resolve(
        &self,
        user_id: Uuid,
        workspace_id: Option<Uuid>,
        month: Option<MonthKey>,
        today: NaiveDate,
    ) -> CoreResult<ResolvedScope> {
        if user_id.is_nil() {
            return Err(CoreError::Unauthenticated);
        }

        let workspace = match workspace_id {
            Some(id) => Some(self.authorize_workspace(user_id, id)?),
            None => None,
        };

        let month = month.unwrap_or_else(|| MonthKey::from_date(today));
        let window = month.window();

        let workspaces = self.store.list_workspaces(user_id)?;
        let workspace_ids: Vec<Uuid> = workspaces.iter().map(|w| w.id).collect();
        if workspace_ids.is_empty() {
            debug!(user = %user_id, "scope resolved to zero workspaces");
            return Ok(ResolvedScope {
                workspace,
                workspace_ids,
                accounts: Vec::new(),
                account_ids: HashSet::new(),
                categories: CategoryIndex::default(),
                feed_category_ids: HashSet::new(),
                month,
                window,
            });
        }

        // Accounts are user-global; the id set stays unfiltered so in-window
        // transactions on other month snapshots keep their owner attribution,
        // while the balance figure comes from the report month only.
        let all_accounts = self.store.list_accounts(user_id, None)?;
        let account_ids: HashSet<Uuid> = all_accounts.iter().map(|a| a.id).collect();
        let accounts: Vec<Account> = all_accounts
            .into_iter()
            .filter(|account| account.month == month)
            .collect();
        let categories = self.store.list_categories(&workspace_ids)?;

        let feed_category_ids: HashSet<Uuid> = match &workspace {
            Some(target) => categories
                .iter()
                .filter(|category| category.workspace_id == target.id)
                .map(|category| category.id)
                .collect(),
            None => categories.iter().map(|category| category.id).collect(),
        };

        debug!(
            user = %user_id,
            workspaces = workspace_ids.len(),
            accounts = accounts.len(),
            categories = categories.len(),
            month = %month,
            "scope resolved"
        );

        Ok(ResolvedScope {
            workspace,
            workspace_ids,
            accounts,
            account_ids,
            categories: CategoryIndex::new(categories),
            feed_category_ids,
            month,
            window,
        })
    }

    fn authorize_workspace(&self, user_id: Uuid, workspace_id: Uuid) -> CoreResult<Workspace> {
        if workspace_id.is_nil() {
            return Err(CoreError::InvalidArgument(
                "workspace id must not be nil".into(),
            ));
        }
        let workspace = self
            .store
            .find_workspace(workspace_id)?
            .ok_or(CoreError::WorkspaceNotFound(workspace_id))?;
        if workspace.user_id != user_id {
            return Err(CoreError::Forbidden(workspace_id));
        }
        Ok(workspace)
    }
}
