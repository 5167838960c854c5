use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    /// Request body for creating a transaction.
    ///
    /// Amounts cross the wire as decimal numbers in major units; dates as
    /// `YYYY-MM-DD` strings.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub title: String,
        pub amount: f64,
        pub date: NaiveDate,
        pub category: String,
        pub description: Option<String>,
    }

    /// Partial update: absent fields keep their stored values.
    ///
    /// `description` distinguishes absent (keep) from `null` (clear).
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub title: Option<String>,
        pub amount: Option<f64>,
        pub date: Option<NaiveDate>,
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub title: String,
        pub amount: f64,
        pub date: NaiveDate,
        pub category: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod budget {
    use super::*;

    /// Upsert request: replaces the amount for the (category, month) pair.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetSet {
        pub category: String,
        /// Month token in `YYYY-MM` form.
        pub month: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub category: String,
        pub month: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod dashboard {
    use super::*;

    /// One bar of the monthly expenses chart.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyPoint {
        /// Display label, e.g. `"Jan 2025"`.
        pub month: String,
        pub amount: f64,
    }

    /// One slice of the category breakdown pie.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySlice {
        pub name: String,
        pub percentage: u8,
        /// Hex display color, e.g. `"#4287f5"`.
        pub color: String,
    }

    /// One group of the budget-vs-actual bar chart.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetBar {
        pub category: String,
        pub budgeted: f64,
        pub actual: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        pub total_spent: f64,
        pub transaction_count: u64,
        pub category_count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub monthly: Vec<MonthlyPoint>,
        pub categories: Vec<CategorySlice>,
        pub budget_vs_actual: Vec<BudgetBar>,
        /// Natural-language trend line; absent with fewer than two months
        /// of data.
        pub insight: Option<String>,
        pub summary: SummaryView,
        pub recent: Vec<transaction::TransactionView>,
    }
}
