//! Assembles the final dashboard report for a caller.
//!
//! One storage fetch spans the whole trend range; totals, the category
//! breakdown, the trend buckets, and the recent-activity feed are all carved
//! out of that single slice in process.

use moneta_domain::{
    DashboardReport, DateWindow, MonthKey, RecentTransaction, Transaction, WorkspaceRef,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    AggregationEngine, Clock, CoreResult, LedgerStore, ReportConfig, ResolvedScope, ScopeResolver,
    TransactionFilter,
};

/// Builds [`DashboardReport`]s from a read-only [`LedgerStore`].
///
/// Stateless between calls; identical inputs over unchanged backing data
/// yield identical reports.
pub struct DashboardService<'a> {
    store: &'a dyn LedgerStore,
    clock: &'a dyn Clock,
    config: ReportConfig,
}

impl<'a> DashboardService<'a> {
    pub fn new(store: &'a dyn LedgerStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            config: ReportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Report across every workspace the user owns.
    pub fn global(&self, user_id: Uuid, month: Option<MonthKey>) -> CoreResult<DashboardReport> {
        self.report(user_id, None, month)
    }

    /// Report for one workspace. Aggregate totals stay user-wide; only the
    /// recent-activity feed narrows to the named workspace.
    pub fn workspace(
        &self,
        user_id: Uuid,
        workspace_id: Uuid,
        month: Option<MonthKey>,
    ) -> CoreResult<DashboardReport> {
        self.report(user_id, Some(workspace_id), month)
    }

    fn report(
        &self,
        user_id: Uuid,
        workspace_id: Option<Uuid>,
        month: Option<MonthKey>,
    ) -> CoreResult<DashboardReport> {
        let resolver = ScopeResolver::new(self.store);
        let scope = resolver.resolve(user_id, workspace_id, month, self.clock.today())?;
        let workspace = scope
            .workspace
            .as_ref()
            .map(|w| WorkspaceRef {
                id: w.id,
                name: w.name.clone(),
            });

        if scope.is_empty() {
            return Ok(DashboardReport::empty(workspace));
        }

        let months = self.config.trend_months.max(1);
        let fetch_start = scope.month.months_back(months as u32 - 1).first_day();
        let fetch_range = DateWindow::new(fetch_start, scope.window.end)?;
        let filter = TransactionFilter::in_range(fetch_range)
            .with_accounts(scope.account_ids.iter().copied().collect());
        let mut transactions = self.store.list_transactions(&filter)?;
        // The trait tolerates stores that over-return; re-apply the account
        // leg so a foreign row never reaches the engine.
        transactions.retain(|txn| scope.owns_account(txn));

        let totals =
            AggregationEngine::flow_totals(&transactions, &scope.categories, scope.window);
        let balance = scope.balance();
        let expenses_by_category =
            AggregationEngine::expense_breakdown(&transactions, &scope.categories, scope.window);
        let monthly_evolution = AggregationEngine::monthly_trend(
            &transactions,
            &scope.categories,
            scope.month,
            months,
        );
        let recent_transactions =
            self.recent_feed(&scope, &transactions, self.config.recent_limit);

        debug!(
            user = %user_id,
            month = %scope.month,
            revenue = totals.revenue,
            expenses = totals.expenses,
            rows = transactions.len(),
            "dashboard assembled"
        );

        Ok(DashboardReport {
            workspace,
            balance,
            revenue: totals.revenue,
            expenses: totals.expenses,
            profit: AggregationEngine::profit(self.config.profit_policy, balance, totals),
            expenses_by_category,
            monthly_evolution,
            recent_transactions,
        })
    }

    /// Most recent rows inside the report window, newest first. Date ties keep
    /// storage order (dates are day-granular, so there is nothing finer to
    /// sort by).
    fn recent_feed(
        &self,
        scope: &ResolvedScope,
        transactions: &[Transaction],
        limit: usize,
    ) -> Vec<RecentTransaction> {
        let mut rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| scope.window.contains(txn.date) && scope.feed_allows(txn))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit);
        rows.into_iter()
            .map(|txn| RecentTransaction {
                id: txn.id,
                date: txn.date,
                description: txn.description.clone().unwrap_or_default(),
                category: scope.categories.display_name(txn.category_id),
                category_id: txn.category_id,
                account_id: txn.account_id,
                kind: txn.kind,
                amount: txn.amount,
            })
            .collect()
    }
}
