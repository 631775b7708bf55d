//! Report configuration knobs.

use serde::{Deserialize, Serialize};

/// How the headline profit figure is derived.
///
/// Both formulas shipped at different points in the product's history; the
/// choice is a policy, not something the engine guesses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfitPolicy {
    /// `revenue - expenses`.
    NetFlow,
    /// `balance + revenue - expenses`.
    #[default]
    BalancePlusNet,
}

impl ProfitPolicy {
    pub fn apply(&self, balance: f64, revenue: f64, expenses: f64) -> f64 {
        match self {
            ProfitPolicy::NetFlow => revenue - expenses,
            ProfitPolicy::BalancePlusNet => balance + revenue - expenses,
        }
    }
}

/// Tunable report parameters with the defaults the dashboard ships with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    pub profit_policy: ProfitPolicy,
    /// Number of months in the rolling trend, ending at the report month.
    pub trend_months: usize,
    /// Maximum rows in the recent-activity feed.
    pub recent_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            profit_policy: ProfitPolicy::default(),
            trend_months: 6,
            recent_limit: 10,
        }
    }
}

impl ReportConfig {
    /// Variant used by the compact workspace dashboard.
    pub fn compact() -> Self {
        Self {
            trend_months: 3,
            ..Self::default()
        }
    }
}
