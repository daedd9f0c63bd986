//! Render-ready state for a transaction dashboard.
//!
//! [`Dashboard`] receives user actions (add, delete, filter change), forwards them to the
//! owned [`TransactionStore`] and produces a [`DashboardView`] snapshot that a renderer
//! can display without any further computation.

use chrono::Local;
use serde::Serialize;

use crate::{
    core::{SummaryService, Totals, TransactionStore},
    currency::{format_money, format_percentage, format_short_date, format_signed},
    errors::ValidationError,
    ledger::{
        parse_amount, Category, CategoryColor, Transaction, TransactionFilter, TransactionId,
        TransactionKind,
    },
};

/// One row of the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub description: String,
    pub kind: TransactionKind,
    pub category: Category,
    pub category_label: &'static str,
    pub color: CategoryColor,
    pub date: String,
    pub amount: f64,
    pub signed_amount: String,
}

/// One entry of the spending-by-category panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub label: &'static str,
    pub color: CategoryColor,
    pub amount: f64,
    pub amount_text: String,
    pub percentage: f64,
    pub percentage_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsView {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub balance_is_negative: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: TransactionFilter,
    pub totals: Totals,
    pub totals_text: TotalsView,
    pub transactions: Vec<TransactionRow>,
    pub breakdown: Vec<CategoryRow>,
}

pub struct Dashboard {
    store: TransactionStore,
    filter: TransactionFilter,
    currency: String,
}

impl Dashboard {
    pub fn new(store: TransactionStore, currency: impl Into<String>) -> Self {
        Self {
            store,
            filter: TransactionFilter::All,
            currency: currency.into(),
        }
    }

    /// Handles the add form. A rejected submission leaves the log untouched.
    pub fn on_add_transaction(
        &mut self,
        description: &str,
        amount_text: &str,
        category: Category,
        kind: TransactionKind,
    ) -> Result<Transaction, ValidationError> {
        let amount = parse_amount(amount_text)?;
        self.store.add(description, amount, category, kind)
    }

    pub fn on_delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        self.store.remove(id)
    }

    pub fn on_filter_change(&mut self, filter: TransactionFilter) {
        tracing::debug!(%filter, "filter changed");
        self.filter = filter;
    }

    pub fn filter(&self) -> TransactionFilter {
        self.filter
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn view(&self) -> DashboardView {
        let log = self.store.transactions();
        let totals = SummaryService::summarize(log);
        let transactions = self
            .store
            .list(self.filter)
            .into_iter()
            .map(|txn| self.row_for(txn))
            .collect();
        let breakdown = SummaryService::category_breakdown(log)
            .into_iter()
            .map(|stat| CategoryRow {
                category: stat.category,
                label: stat.category.label(),
                color: stat.category.color(),
                amount: stat.amount,
                amount_text: format_money(stat.amount, &self.currency),
                percentage: stat.percentage,
                percentage_text: format_percentage(stat.percentage),
            })
            .collect();

        DashboardView {
            filter: self.filter,
            totals,
            totals_text: TotalsView {
                income: format_money(totals.income, &self.currency),
                expenses: format_money(totals.expenses, &self.currency),
                balance: format_money(totals.balance, &self.currency),
                balance_is_negative: totals.balance < 0.0,
            },
            transactions,
            breakdown,
        }
    }

    fn row_for(&self, txn: &Transaction) -> TransactionRow {
        TransactionRow {
            id: txn.id,
            description: txn.description.clone(),
            kind: txn.kind,
            category: txn.category,
            category_label: txn.category.label(),
            color: txn.category.color(),
            date: format_short_date(&txn.created_at.with_timezone(&Local)),
            amount: txn.amount,
            signed_amount: format_signed(txn.amount, txn.kind, &self.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::FixedClock,
        storage::{MemoryStorage, STORAGE_KEY},
    };
    use chrono::{TimeZone, Utc};

    fn dashboard() -> Dashboard {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap());
        let store =
            TransactionStore::open_with(Box::new(MemoryStorage::new()), STORAGE_KEY, Box::new(clock));
        Dashboard::new(store, "USD")
    }

    #[test]
    fn unparseable_amount_is_rejected() {
        let mut dashboard = dashboard();
        let err = dashboard
            .on_add_transaction("Snacks", "ten", Category::Food, TransactionKind::Expense)
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount("ten".into()));
        assert!(dashboard.view().transactions.is_empty());
    }

    #[test]
    fn view_renders_rows_totals_and_breakdown() {
        let mut dashboard = dashboard();
        dashboard
            .on_add_transaction("Salary", "1000", Category::Other, TransactionKind::Income)
            .unwrap();
        dashboard
            .on_add_transaction("Groceries", "50", Category::Food, TransactionKind::Expense)
            .unwrap();

        let view = dashboard.view();
        assert_eq!(view.totals_text.income, "$1000.00");
        assert_eq!(view.totals_text.expenses, "$50.00");
        assert_eq!(view.totals_text.balance, "$950.00");
        assert!(!view.totals_text.balance_is_negative);

        let first = &view.transactions[0];
        assert_eq!(first.description, "Groceries");
        assert_eq!(first.signed_amount, "-$50.00");
        assert_eq!(first.category_label, "Food");
        assert_eq!(first.color, CategoryColor::Orange);
        assert_eq!(view.transactions[1].signed_amount, "+$1000.00");

        assert_eq!(view.breakdown.len(), 1);
        assert_eq!(view.breakdown[0].percentage_text, "100.0");
    }

    #[test]
    fn filter_change_restricts_rows_but_not_totals() {
        let mut dashboard = dashboard();
        dashboard
            .on_add_transaction("Salary", "1000", Category::Other, TransactionKind::Income)
            .unwrap();
        dashboard
            .on_add_transaction("Taxi", "20", Category::Transport, TransactionKind::Expense)
            .unwrap();

        dashboard.on_filter_change(TransactionFilter::Income);
        let view = dashboard.view();
        assert_eq!(view.filter, TransactionFilter::Income);
        assert_eq!(view.transactions.len(), 1);
        assert_eq!(view.transactions[0].kind, TransactionKind::Income);
        assert_eq!(view.totals.expenses, 20.0);
        assert_eq!(view.breakdown.len(), 1);
    }

    #[test]
    fn delete_removes_row() {
        let mut dashboard = dashboard();
        let txn = dashboard
            .on_add_transaction("Book", "12.99", Category::Shopping, TransactionKind::Expense)
            .unwrap();
        assert!(dashboard.on_delete_transaction(txn.id).is_some());
        assert!(dashboard.view().transactions.is_empty());
        assert!(dashboard.on_delete_transaction(txn.id).is_none());
    }

    #[test]
    fn negative_balance_is_flagged() {
        let mut dashboard = dashboard();
        dashboard
            .on_add_transaction("Rent", "800", Category::Bills, TransactionKind::Expense)
            .unwrap();
        let view = dashboard.view();
        assert_eq!(view.totals_text.balance, "-$800.00");
        assert!(view.totals_text.balance_is_negative);
    }
}
