//! Structured dashboard report shapes returned to callers.
//!
//! Field names serialize to the camelCase JSON the dashboard consumers
//! expect (`expensesByCategory`, `monthlyEvolution`, `recentTransactions`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::FlowKind;

/// Display label used when a transaction has no resolvable category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Chart color used for categories without an explicit color.
pub const FALLBACK_COLOR: &str = "#94a3b8";

/// The complete dashboard report for one scope and month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Present on workspace-scoped reports, absent on global ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceRef>,
    pub balance: f64,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub expenses_by_category: ExpenseBreakdown,
    pub monthly_evolution: MonthlyTrend,
    pub recent_transactions: Vec<RecentTransaction>,
}

impl DashboardReport {
    /// The all-zero report returned for a user with no workspaces.
    pub fn empty(workspace: Option<WorkspaceRef>) -> Self {
        Self {
            workspace,
            balance: 0.0,
            revenue: 0.0,
            expenses: 0.0,
            profit: 0.0,
            expenses_by_category: ExpenseBreakdown::default(),
            monthly_evolution: MonthlyTrend::default(),
            recent_transactions: Vec::new(),
        }
    }
}

/// Minimal workspace echo included in workspace-scoped reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceRef {
    pub id: Uuid,
    pub name: String,
}

/// Pie-chart ready expense grouping. Parallel arrays, one entry per bucket,
/// in first-occurrence order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseBreakdown {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Rolling multi-month revenue/expense series, oldest month first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTrend {
    pub labels: Vec<String>,
    pub revenues: Vec<f64>,
    pub expenses: Vec<f64>,
}

impl MonthlyTrend {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One row of the recent-activity feed, enriched with the category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub account_id: Uuid,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub amount: f64,
}
