//! moneta-storage-json
//!
//! JSON-file backend for the reporting core's [`LedgerStore`] contract. The
//! whole ledger lives in one snapshot file; every mutation rewrites it
//! atomically (write to a temp file, then rename), so the write path's
//! "insert transaction + adjust account balance" lands as a single unit.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use moneta_core::{integrity_warnings, CoreError, LedgerStore, TransactionFilter};
use moneta_domain::{Account, Category, MonthKey, Transaction, Workspace};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

const CURRENT_SCHEMA_VERSION: u32 = 1;
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_FILE_NAME: &str = "ledger.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerSnapshot {
    #[serde(default = "LedgerSnapshot::schema_version_default")]
    schema_version: u32,
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            workspaces: Vec::new(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl LedgerSnapshot {
    fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// File-backed [`LedgerStore`]. Reads serve from the in-memory snapshot;
/// mutating helpers persist before returning.
pub struct JsonLedgerStore {
    path: PathBuf,
    snapshot: LedgerSnapshot,
}

impl JsonLedgerStore {
    /// Opens the snapshot at `path`, starting empty when the file does not
    /// exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            let data = fs::read_to_string(&path).map_err(storage_err)?;
            serde_json::from_str(&data).map_err(storage_err)?
        } else {
            LedgerSnapshot::default()
        };

        for warning in integrity_warnings(
            &snapshot.accounts,
            &snapshot.categories,
            &snapshot.transactions,
        ) {
            warn!(%warning, "ledger snapshot anomaly");
        }
        debug!(
            path = %path.display(),
            workspaces = snapshot.workspaces.len(),
            transactions = snapshot.transactions.len(),
            "ledger snapshot opened"
        );

        Ok(Self { path, snapshot })
    }

    /// Opens the snapshot at the platform data directory
    /// (`<data_dir>/moneta/ledger.json`).
    pub fn open_default() -> Result<Self, CoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| CoreError::Storage("no platform data directory".into()))?
            .join("moneta");
        fs::create_dir_all(&base).map_err(storage_err)?;
        Self::open(base.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_workspace(&mut self, workspace: Workspace) -> Result<Uuid, CoreError> {
        let id = workspace.id;
        self.snapshot.workspaces.push(workspace);
        self.save()?;
        Ok(id)
    }

    /// Deletes a workspace and cascades to its categories. Transactions keep
    /// their category ids; dangling ones surface as integrity warnings and
    /// fall out of report scopes naturally.
    pub fn remove_workspace(&mut self, workspace_id: Uuid) -> Result<(), CoreError> {
        let before = self.snapshot.workspaces.len();
        self.snapshot.workspaces.retain(|w| w.id != workspace_id);
        if self.snapshot.workspaces.len() == before {
            return Err(CoreError::WorkspaceNotFound(workspace_id));
        }
        self.snapshot
            .categories
            .retain(|c| c.workspace_id != workspace_id);
        self.save()
    }

    pub fn add_account(&mut self, account: Account) -> Result<Uuid, CoreError> {
        let id = account.id;
        self.snapshot.accounts.push(account);
        self.save()?;
        Ok(id)
    }

    pub fn add_category(&mut self, category: Category) -> Result<Uuid, CoreError> {
        let id = category.id;
        self.snapshot.categories.push(category);
        self.save()?;
        Ok(id)
    }

    /// Validates and appends a transaction, adjusting the matching account's
    /// balance snapshot in the same persisted write.
    pub fn record_transaction(&mut self, txn: Transaction) -> Result<Uuid, CoreError> {
        if !txn.amount.is_finite() || txn.amount < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "transaction amount must be a non-negative number, got {}",
                txn.amount
            )));
        }
        let month = MonthKey::from_date(txn.date);
        let account = self
            .snapshot
            .accounts
            .iter_mut()
            .find(|a| a.id == txn.account_id && a.month == month)
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "no balance snapshot for account {} in {}",
                    txn.account_id, month
                ))
            })?;
        account.balance += txn.signed_amount();

        let id = txn.id;
        self.snapshot.transactions.push(txn);
        self.save()?;
        Ok(id)
    }

    fn save(&self) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(&self.snapshot).map_err(storage_err)?;
        write_atomic(&self.path, &json)
    }
}

impl LedgerStore for JsonLedgerStore {
    fn list_workspaces(&self, user_id: Uuid) -> Result<Vec<Workspace>, CoreError> {
        Ok(self
            .snapshot
            .workspaces
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_workspace(&self, workspace_id: Uuid) -> Result<Option<Workspace>, CoreError> {
        Ok(self
            .snapshot
            .workspaces
            .iter()
            .find(|w| w.id == workspace_id)
            .cloned())
    }

    fn list_accounts(
        &self,
        user_id: Uuid,
        month: Option<MonthKey>,
    ) -> Result<Vec<Account>, CoreError> {
        Ok(self
            .snapshot
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id && month.map_or(true, |m| a.month == m))
            .cloned()
            .collect())
    }

    fn list_categories(&self, workspace_ids: &[Uuid]) -> Result<Vec<Category>, CoreError> {
        Ok(self
            .snapshot
            .categories
            .iter()
            .filter(|c| workspace_ids.contains(&c.workspace_id))
            .cloned()
            .collect())
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }
}

fn storage_err(err: impl std::fmt::Display) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_err)?;
    }
    let tmp = path.with_extension(TMP_SUFFIX);
    {
        let mut file = fs::File::create(&tmp).map_err(storage_err)?;
        file.write_all(contents.as_bytes()).map_err(storage_err)?;
        file.sync_all().map_err(storage_err)?;
    }
    fs::rename(&tmp, path).map_err(storage_err)
}
