use colored::{ColoredString, Colorize};

use crate::{
    dashboard::{CategoryRow, DashboardView, TransactionRow},
    ledger::{Category, CategoryColor, TransactionKind},
};

const BAR_WIDTH: usize = 20;

/// Turns a [`DashboardView`] into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn transactions(&self, view: &DashboardView) -> String {
        let mut out = self.section(&format!("Transactions ({})", view.filter));
        if view.transactions.is_empty() {
            out.push_str("No transactions yet\n");
            return out;
        }
        for row in &view.transactions {
            out.push_str(&self.transaction_line(row));
            out.push('\n');
        }
        out
    }

    pub fn summary(&self, view: &DashboardView) -> String {
        let totals = &view.totals_text;
        let mut out = self.section("Summary");
        out.push_str(&format!(
            "Income:   {}\n",
            self.paint(&totals.income, Tone::Positive)
        ));
        out.push_str(&format!(
            "Expenses: {}\n",
            self.paint(&totals.expenses, Tone::Negative)
        ));
        let balance_tone = if totals.balance_is_negative {
            Tone::Warning
        } else {
            Tone::Neutral
        };
        out.push_str(&format!(
            "Balance:  {}\n",
            self.paint(&totals.balance, balance_tone)
        ));
        out
    }

    pub fn breakdown(&self, view: &DashboardView) -> String {
        let mut out = self.section("Spending by Category");
        if view.breakdown.is_empty() {
            out.push_str("No expenses yet\n");
            return out;
        }
        for row in &view.breakdown {
            out.push_str(&self.category_line(row));
            out.push('\n');
        }
        out
    }

    pub fn categories(&self) -> String {
        let mut out = self.section("Categories");
        for category in Category::ALL {
            let value = format!("{:<14}", category.value());
            out.push_str(&format!(
                "{} {}\n",
                self.paint_category(&value, category.color()),
                category.label()
            ));
        }
        out
    }

    fn transaction_line(&self, row: &TransactionRow) -> String {
        let tone = match row.kind {
            TransactionKind::Income => Tone::Positive,
            TransactionKind::Expense => Tone::Negative,
        };
        let label = format!("{:<13}", row.category_label);
        format!(
            "{:>13}  {:<6}  {}  {:<24}  {}",
            row.id,
            row.date,
            self.paint_category(&label, row.color),
            row.description,
            self.paint(&format!("{:>12}", row.signed_amount), tone)
        )
    }

    fn category_line(&self, row: &CategoryRow) -> String {
        let filled = ((row.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
        let label = format!("{:<13}", row.label);
        format!(
            "{}  {:>12}  {}  {}% of total",
            self.paint_category(&label, row.color),
            row.amount_text,
            self.paint_category(&bar, row.color),
            row.percentage_text
        )
    }

    fn section(&self, title: &str) -> String {
        let heading = format!("=== {title} ===");
        if self.color {
            format!("{}\n", heading.bold())
        } else {
            format!("{heading}\n")
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled: ColoredString = match tone {
            Tone::Positive => text.green(),
            Tone::Negative => text.red(),
            Tone::Warning => text.yellow(),
            Tone::Neutral => text.blue(),
        };
        styled.bold().to_string()
    }

    fn paint_category(&self, text: &str, color: CategoryColor) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = match color {
            CategoryColor::Orange => text.truecolor(249, 115, 22),
            CategoryColor::Blue => text.blue(),
            CategoryColor::Purple => text.purple(),
            CategoryColor::Red => text.red(),
            CategoryColor::Pink => text.bright_magenta(),
            CategoryColor::Green => text.green(),
            CategoryColor::Gray => text.bright_black(),
        };
        styled.to_string()
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{FixedClock, TransactionStore},
        dashboard::Dashboard,
        storage::{MemoryStorage, STORAGE_KEY},
    };
    use chrono::{TimeZone, Utc};

    fn populated_view() -> DashboardView {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap());
        let store =
            TransactionStore::open_with(Box::new(MemoryStorage::new()), STORAGE_KEY, Box::new(clock));
        let mut dashboard = Dashboard::new(store, "USD");
        dashboard
            .on_add_transaction("Salary", "1000", Category::Other, TransactionKind::Income)
            .unwrap();
        dashboard
            .on_add_transaction("Groceries", "50", Category::Food, TransactionKind::Expense)
            .unwrap();
        dashboard
            .on_add_transaction("Bus pass", "30", Category::Transport, TransactionKind::Expense)
            .unwrap();
        dashboard.view()
    }

    #[test]
    fn summary_lists_all_three_totals() {
        let text = Renderer::new(false).summary(&populated_view());
        assert!(text.contains("Income:   $1000.00"));
        assert!(text.contains("Expenses: $80.00"));
        assert!(text.contains("Balance:  $920.00"));
    }

    #[test]
    fn breakdown_shows_percentages_in_amount_order() {
        let text = Renderer::new(false).breakdown(&populated_view());
        let food = text.find("62.5% of total").unwrap();
        let transport = text.find("37.5% of total").unwrap();
        assert!(food < transport);
    }

    #[test]
    fn transactions_list_newest_first_with_signs() {
        let text = Renderer::new(false).transactions(&populated_view());
        let bus = text.find("Bus pass").unwrap();
        let salary = text.find("Salary").unwrap();
        assert!(bus < salary);
        assert!(text.contains("-$30.00"));
        assert!(text.contains("+$1000.00"));
    }

    #[test]
    fn empty_view_prints_placeholders() {
        let store = TransactionStore::open(Box::new(MemoryStorage::new()));
        let view = Dashboard::new(store, "USD").view();
        let renderer = Renderer::new(false);
        assert!(renderer.transactions(&view).contains("No transactions yet"));
        assert!(renderer.breakdown(&view).contains("No expenses yet"));
    }
}
