//! The numeric core: window-scoped totals, category breakdown, and the
//! rolling monthly trend.
//!
//! Every function is a pure transformation of a transaction slice; the engine
//! never mutates anything and never touches storage. Transactions whose
//! category falls outside the supplied index are silently excluded — that is
//! the mechanism that narrows a user-wide ledger down to a scope, not an
//! error condition.

use std::collections::HashMap;

use moneta_domain::{
    DateWindow, ExpenseBreakdown, FlowKind, MonthKey, MonthlyTrend, Transaction,
};

use crate::{CategoryIndex, ProfitPolicy};

/// Revenue and expense sums for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowTotals {
    pub revenue: f64,
    pub expenses: f64,
}

impl FlowTotals {
    pub fn net(&self) -> f64 {
        self.revenue - self.expenses
    }
}

/// Stateless aggregation helpers that operate over transaction slices.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Sums authorized, in-window amounts per flow kind.
    pub fn flow_totals(
        transactions: &[Transaction],
        categories: &CategoryIndex,
        window: DateWindow,
    ) -> FlowTotals {
        let mut totals = FlowTotals::default();
        for txn in transactions {
            if !window.contains(txn.date) || !categories.authorizes(txn) {
                continue;
            }
            match txn.kind {
                FlowKind::Revenue => totals.revenue += txn.amount,
                FlowKind::Expense => totals.expenses += txn.amount,
            }
        }
        totals
    }

    /// Groups authorized, in-window expenses by category.
    ///
    /// Buckets appear in first-occurrence order. Uncategorized rows share one
    /// synthetic bucket, so the bucket sum always equals the expense total.
    pub fn expense_breakdown(
        transactions: &[Transaction],
        categories: &CategoryIndex,
        window: DateWindow,
    ) -> ExpenseBreakdown {
        let mut order: Vec<Option<uuid::Uuid>> = Vec::new();
        let mut sums: HashMap<Option<uuid::Uuid>, f64> = HashMap::new();

        for txn in transactions {
            if txn.kind != FlowKind::Expense
                || !window.contains(txn.date)
                || !categories.authorizes(txn)
            {
                continue;
            }
            let slot = sums.entry(txn.category_id).or_insert_with(|| {
                order.push(txn.category_id);
                0.0
            });
            *slot += txn.amount;
        }

        let mut breakdown = ExpenseBreakdown::default();
        for key in order {
            breakdown.labels.push(categories.display_name(key));
            breakdown.data.push(sums[&key]);
            breakdown.colors.push(categories.color(key));
        }
        breakdown
    }

    /// Revenue/expense series for the `months` calendar months ending at
    /// `end`, oldest first, zero-filled for months without data.
    ///
    /// Buckets in one pass over the slice; callers fetch the whole range with
    /// a single query instead of one query per month.
    pub fn monthly_trend(
        transactions: &[Transaction],
        categories: &CategoryIndex,
        end: MonthKey,
        months: usize,
    ) -> MonthlyTrend {
        let months = months.max(1);
        let start = end.months_back(months as u32 - 1);

        let mut buckets: HashMap<MonthKey, FlowTotals> = HashMap::new();
        for txn in transactions {
            if !categories.authorizes(txn) {
                continue;
            }
            let key = MonthKey::from_date(txn.date);
            if key < start || key > end {
                continue;
            }
            let entry = buckets.entry(key).or_default();
            match txn.kind {
                FlowKind::Revenue => entry.revenue += txn.amount,
                FlowKind::Expense => entry.expenses += txn.amount,
            }
        }

        let mut trend = MonthlyTrend::default();
        let mut cursor = start;
        for _ in 0..months {
            let totals = buckets.get(&cursor).copied().unwrap_or_default();
            trend.labels.push(cursor.label());
            trend.revenues.push(totals.revenue);
            trend.expenses.push(totals.expenses);
            cursor = cursor.next();
        }
        trend
    }

    /// Headline profit figure under the configured policy. `balance` is the
    /// externally-maintained account snapshot sum, passed through untouched.
    pub fn profit(policy: ProfitPolicy, balance: f64, totals: FlowTotals) -> f64 {
        policy.apply(balance, totals.revenue, totals.expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneta_domain::{Category, FALLBACK_COLOR, UNCATEGORIZED_LABEL};
    use uuid::Uuid;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn txn(category: Option<Uuid>, date: NaiveDate, kind: FlowKind, amount: f64) -> Transaction {
        Transaction::new(Uuid::new_v4(), category, date, kind, amount)
    }

    fn index() -> (CategoryIndex, Uuid, Uuid) {
        let workspace = Uuid::new_v4();
        let food = Category::new(workspace, "Food", FlowKind::Expense).with_color("#ff0000");
        let salary = Category::new(workspace, "Salary", FlowKind::Revenue);
        let food_id = food.id;
        let salary_id = salary.id;
        (CategoryIndex::new(vec![food, salary]), food_id, salary_id)
    }

    #[test]
    fn totals_respect_half_open_window() {
        let (categories, food, salary) = index();
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![
            // window start is included, window end is not
            txn(Some(salary), window.start, FlowKind::Revenue, 100.0),
            txn(Some(food), window.end, FlowKind::Expense, 70.0),
            txn(Some(food), day(2024, 3, 14), FlowKind::Expense, 30.0),
        ];
        let totals = AggregationEngine::flow_totals(&transactions, &categories, window);
        assert_eq!(totals.revenue, 100.0);
        assert_eq!(totals.expenses, 30.0);
        assert_eq!(totals.net(), 70.0);
    }

    #[test]
    fn unauthorized_categories_are_silently_excluded() {
        let (categories, _, salary) = index();
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![
            txn(Some(salary), day(2024, 3, 5), FlowKind::Revenue, 100.0),
            txn(Some(Uuid::new_v4()), day(2024, 3, 6), FlowKind::Revenue, 999.0),
        ];
        let totals = AggregationEngine::flow_totals(&transactions, &categories, window);
        assert_eq!(totals.revenue, 100.0);
    }

    #[test]
    fn single_expense_breakdown_matches_category() {
        let (categories, food, _) = index();
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![txn(Some(food), day(2024, 3, 10), FlowKind::Expense, 50.0)];
        let breakdown =
            AggregationEngine::expense_breakdown(&transactions, &categories, window);
        assert_eq!(breakdown.labels, vec!["Food".to_string()]);
        assert_eq!(breakdown.data, vec![50.0]);
        assert_eq!(breakdown.colors, vec!["#ff0000".to_string()]);
    }

    #[test]
    fn breakdown_sum_equals_expense_total() {
        let (categories, food, _) = index();
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![
            txn(Some(food), day(2024, 3, 2), FlowKind::Expense, 20.0),
            txn(None, day(2024, 3, 3), FlowKind::Expense, 5.0),
            txn(Some(food), day(2024, 3, 4), FlowKind::Expense, 15.0),
            txn(Some(Uuid::new_v4()), day(2024, 3, 5), FlowKind::Expense, 400.0),
        ];
        let totals = AggregationEngine::flow_totals(&transactions, &categories, window);
        let breakdown =
            AggregationEngine::expense_breakdown(&transactions, &categories, window);
        assert_eq!(breakdown.total(), totals.expenses);
        assert_eq!(breakdown.total(), 40.0);
    }

    #[test]
    fn uncategorized_rows_share_the_fallback_bucket() {
        let (categories, _, _) = index();
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![
            txn(None, day(2024, 3, 3), FlowKind::Expense, 5.0),
            txn(None, day(2024, 3, 4), FlowKind::Expense, 7.0),
        ];
        let breakdown =
            AggregationEngine::expense_breakdown(&transactions, &categories, window);
        assert_eq!(breakdown.labels, vec![UNCATEGORIZED_LABEL.to_string()]);
        assert_eq!(breakdown.data, vec![12.0]);
        assert_eq!(breakdown.colors, vec![FALLBACK_COLOR.to_string()]);
    }

    #[test]
    fn breakdown_keeps_first_occurrence_order() {
        let workspace = Uuid::new_v4();
        let rent = Category::new(workspace, "Rent", FlowKind::Expense);
        let food = Category::new(workspace, "Food", FlowKind::Expense);
        let rent_id = rent.id;
        let food_id = food.id;
        let categories = CategoryIndex::new(vec![rent, food]);
        let window = MonthKey::new(2024, 3).unwrap().window();
        let transactions = vec![
            txn(Some(food_id), day(2024, 3, 1), FlowKind::Expense, 1.0),
            txn(Some(rent_id), day(2024, 3, 2), FlowKind::Expense, 900.0),
            txn(Some(food_id), day(2024, 3, 3), FlowKind::Expense, 2.0),
        ];
        let breakdown =
            AggregationEngine::expense_breakdown(&transactions, &categories, window);
        assert_eq!(
            breakdown.labels,
            vec!["Food".to_string(), "Rent".to_string()]
        );
        assert_eq!(breakdown.data, vec![3.0, 900.0]);
    }

    #[test]
    fn trend_is_zero_filled_and_chronological() {
        let (categories, food, salary) = index();
        let end = MonthKey::new(2024, 3).unwrap();
        let transactions = vec![
            txn(Some(salary), day(2024, 2, 10), FlowKind::Revenue, 100.0),
            txn(Some(food), day(2024, 3, 5), FlowKind::Expense, 40.0),
            // outside the 3-month trend range
            txn(Some(salary), day(2023, 12, 31), FlowKind::Revenue, 999.0),
        ];
        let trend = AggregationEngine::monthly_trend(&transactions, &categories, end, 3);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend.labels, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(trend.revenues, vec![0.0, 100.0, 0.0]);
        assert_eq!(trend.expenses, vec![0.0, 0.0, 40.0]);
    }

    #[test]
    fn trend_length_is_fixed_even_without_data() {
        let (categories, _, _) = index();
        let end = MonthKey::new(2024, 6).unwrap();
        let trend = AggregationEngine::monthly_trend(&[], &categories, end, 6);
        assert_eq!(trend.len(), 6);
        assert!(trend.revenues.iter().all(|v| *v == 0.0));
        assert!(trend.expenses.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn trend_crosses_year_boundary_in_order() {
        let (categories, _, salary) = index();
        let end = MonthKey::new(2024, 1).unwrap();
        let transactions = vec![txn(
            Some(salary),
            day(2023, 11, 20),
            FlowKind::Revenue,
            55.0,
        )];
        let trend = AggregationEngine::monthly_trend(&transactions, &categories, end, 3);
        assert_eq!(trend.labels, vec!["Nov", "Dec", "Jan"]);
        assert_eq!(trend.revenues, vec![55.0, 0.0, 0.0]);
    }
}
