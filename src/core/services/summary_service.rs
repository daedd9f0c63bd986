//! Derived statistics over a snapshot of the transaction log.

use serde::Serialize;

use crate::ledger::{Category, Transaction, TransactionKind};

/// Income, expense and balance totals for a log snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// Aggregate expense amount for one category and its share of all expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub amount: f64,
    /// Percentage of total expenses, rounded to one decimal place.
    pub percentage: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_by_kind<'a, I>(log: I, kind: TransactionKind) -> f64
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        log.into_iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn balance<'a, I>(log: I) -> f64
    where
        I: IntoIterator<Item = &'a Transaction> + Copy,
    {
        Self::total_by_kind(log, TransactionKind::Income)
            - Self::total_by_kind(log, TransactionKind::Expense)
    }

    pub fn summarize<'a, I>(log: I) -> Totals
    where
        I: IntoIterator<Item = &'a Transaction> + Copy,
    {
        let income = Self::total_by_kind(log, TransactionKind::Income);
        let expenses = Self::total_by_kind(log, TransactionKind::Expense);
        Totals {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Groups expenses by category, largest first. Equal amounts keep the order in which
    /// their categories were first seen while walking the log.
    pub fn category_breakdown<'a, I>(log: I) -> Vec<CategoryStat>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut groups: Vec<(Category, f64)> = Vec::new();
        for txn in log.into_iter().filter(|txn| txn.is_expense()) {
            match groups.iter_mut().find(|(category, _)| *category == txn.category) {
                Some((_, amount)) => *amount += txn.amount,
                None => groups.push((txn.category, txn.amount)),
            }
        }

        let total: f64 = groups.iter().map(|(_, amount)| amount).sum();
        let mut stats: Vec<CategoryStat> = groups
            .into_iter()
            .map(|(category, amount)| CategoryStat {
                category,
                amount,
                percentage: share_of(amount, total),
            })
            .collect();
        // `sort_by` is stable, which pins the tie-break to first-seen order.
        stats.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        stats
    }
}

fn share_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        round1(amount / total * 100.0)
    } else {
        0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
