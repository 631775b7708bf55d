//! Shared fixtures for the core unit tests.

use moneta_domain::{
    Account, AccountKind, Category, FlowKind, MonthKey, Transaction, Workspace, WorkspaceKind,
};
use uuid::Uuid;

use crate::{CoreError, LedgerStore, TransactionFilter};

/// In-memory [`LedgerStore`] over plain vectors. Deliberately returns every
/// transaction matching the filter, including rows belonging to other users,
/// so tests can prove the engine excludes unauthorized data itself.
#[derive(Debug, Default)]
pub struct FixtureStore {
    pub workspaces: Vec<Workspace>,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
}

impl LedgerStore for FixtureStore {
    fn list_workspaces(&self, user_id: Uuid) -> Result<Vec<Workspace>, CoreError> {
        Ok(self
            .workspaces
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_workspace(&self, workspace_id: Uuid) -> Result<Option<Workspace>, CoreError> {
        Ok(self
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
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id && month.map_or(true, |m| a.month == m))
            .cloned()
            .collect())
    }

    fn list_categories(&self, workspace_ids: &[Uuid]) -> Result<Vec<Category>, CoreError> {
        Ok(self
            .categories
            .iter()
            .filter(|c| workspace_ids.contains(&c.workspace_id))
            .cloned()
            .collect())
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }
}

/// Ids of every row the standard fixture creates.
pub struct FixtureIds {
    pub user: Uuid,
    pub other_user: Uuid,
    pub personal: Uuid,
    pub business: Uuid,
    pub other_workspace: Uuid,
    pub checking_account: Uuid,
    pub food_category: Uuid,
    pub salary_category: Uuid,
    pub sales_category: Uuid,
    pub other_category: Uuid,
}

/// Two workspaces for the main user, one for a stranger, one account snapshot
/// for 2024-03 (balance 1500) and an older one for 2024-02.
pub fn fixture() -> (FixtureStore, FixtureIds) {
    let user = Uuid::new_v4();
    let other_user = Uuid::new_v4();
    let month = MonthKey::new(2024, 3).expect("valid month");

    let personal = Workspace::new(user, "Personal", WorkspaceKind::Personal);
    let business = Workspace::new(user, "Business", WorkspaceKind::Business);
    let foreign = Workspace::new(other_user, "Foreign", WorkspaceKind::Personal);

    let checking =
        Account::new(user, "Checking", AccountKind::Checking, month).with_balance(1500.0);
    let stale = Account::new(user, "Checking", AccountKind::Checking, month.prev())
        .with_balance(900.0);

    let food = Category::new(personal.id, "Food", FlowKind::Expense).with_color("#ff0000");
    let salary = Category::new(personal.id, "Salary", FlowKind::Revenue);
    let sales = Category::new(business.id, "Sales", FlowKind::Revenue);
    let foreign_rent = Category::new(foreign.id, "Rent", FlowKind::Expense);

    let ids = FixtureIds {
        user,
        other_user,
        personal: personal.id,
        business: business.id,
        other_workspace: foreign.id,
        checking_account: checking.id,
        food_category: food.id,
        salary_category: salary.id,
        sales_category: sales.id,
        other_category: foreign_rent.id,
    };

    let store = FixtureStore {
        workspaces: vec![personal, business, foreign],
        accounts: vec![checking, stale],
        categories: vec![food, salary, sales, foreign_rent],
        transactions: Vec::new(),
    };

    (store, ids)
}
