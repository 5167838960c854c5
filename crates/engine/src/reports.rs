//! Dashboard aggregation pipeline.
//!
//! Everything in this module is a pure function over slices already loaded
//! into memory: no caching, no partial state. The dashboard recomputes on
//! every read, which is O(n) over small n.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{Category, MoneyCents, Transaction};

/// Total spending for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// Display label, e.g. `"Jan 2025"`.
    pub month: String,
    pub total: MoneyCents,
}

/// A category's share of total spending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub name: &'static str,
    /// Nearest-integer percentage of total spending. Independent rounding
    /// means shares do not always sum to exactly 100.
    pub percentage: u8,
    pub color: &'static str,
}

/// Budgeted vs. actual spending for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetComparison {
    pub category: Category,
    pub budgeted: MoneyCents,
    pub actual: MoneyCents,
}

/// The headline numbers shown above the charts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_spent: MoneyCents,
    pub transaction_count: usize,
    pub category_count: usize,
}

/// Everything the dashboard needs, computed in one pass over the inputs.
#[derive(Clone, Debug, Serialize)]
pub struct Dashboard {
    pub monthly: Vec<MonthlyTotal>,
    pub categories: Vec<CategoryShare>,
    pub budget_vs_actual: Vec<BudgetComparison>,
    pub insight: Option<String>,
    pub summary: Summary,
    pub recent: Vec<Transaction>,
}

/// Groups transactions by calendar month, summing amounts.
///
/// Buckets are emitted in chronological order regardless of input order, so
/// the trailing pair is always the two most recent months the data covers.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<(i32, u32), (String, MoneyCents)> = BTreeMap::new();
    for tx in transactions {
        use chrono::Datelike;
        let key = (tx.date.year(), tx.date.month());
        let entry = buckets
            .entry(key)
            .or_insert_with(|| (tx.date.format("%b %Y").to_string(), MoneyCents::ZERO));
        entry.1 += tx.amount;
    }

    buckets
        .into_values()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Groups transactions by category and converts sums to percentage shares.
///
/// Categories appear in first-encountered order. When total spending is 0
/// every share is 0 (no division by zero).
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let total: MoneyCents = transactions.iter().map(|tx| tx.amount).sum();

    let mut order: Vec<Category> = Vec::new();
    let mut sums: HashMap<Category, MoneyCents> = HashMap::new();
    for tx in transactions {
        if !sums.contains_key(&tx.category) {
            order.push(tx.category);
        }
        *sums.entry(tx.category).or_insert(MoneyCents::ZERO) += tx.amount;
    }

    order
        .into_iter()
        .map(|category| {
            let sum = sums.get(&category).copied().unwrap_or(MoneyCents::ZERO);
            let percentage = if total.is_zero() {
                0
            } else {
                ((sum.cents() as f64 / total.cents() as f64) * 100.0).round() as u8
            };
            CategoryShare {
                name: category.as_str(),
                percentage,
                color: category.color(),
            }
        })
        .collect()
}

/// Pairs each recognized category's budget against its actual spending.
///
/// Every category in [`Category::ALL`] gets a row; a missing budget means
/// budgeted 0, and a category with no transactions means actual 0.
pub fn budget_vs_actual(
    budgets: &HashMap<Category, MoneyCents>,
    transactions: &[Transaction],
) -> Vec<BudgetComparison> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let actual = transactions
                .iter()
                .filter(|tx| tx.category == category)
                .map(|tx| tx.amount)
                .sum();
            BudgetComparison {
                category,
                budgeted: budgets.get(&category).copied().unwrap_or(MoneyCents::ZERO),
                actual,
            }
        })
        .collect()
}

/// Compares the two most recent monthly totals and phrases the trend.
///
/// Returns `None` with fewer than two data points. Expects the
/// chronologically ordered buckets [`monthly_totals`] produces.
pub fn spending_insight(monthly: &[MonthlyTotal]) -> Option<String> {
    let [.., previous, last] = monthly else {
        return None;
    };

    let message = if last.total > previous.total {
        format!(
            "You spent {} more than the previous month.",
            last.total - previous.total
        )
    } else if last.total < previous.total {
        format!(
            "Great! You spent {} less than the previous month.",
            previous.total - last.total
        )
    } else {
        "Your spending is the same as last month.".to_string()
    };
    Some(message)
}

/// Runs the whole pipeline: charts, trend insight, summary cards and the
/// five most recent transactions.
pub fn dashboard(
    transactions: &[Transaction],
    budgets: &HashMap<Category, MoneyCents>,
) -> Dashboard {
    let monthly = monthly_totals(transactions);
    let insight = spending_insight(&monthly);

    let total_spent: MoneyCents = transactions.iter().map(|tx| tx.amount).sum();
    let category_count = transactions
        .iter()
        .map(|tx| tx.category)
        .collect::<std::collections::HashSet<_>>()
        .len();

    let mut recent: Vec<Transaction> = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(5);

    Dashboard {
        categories: category_breakdown(transactions),
        budget_vs_actual: budget_vs_actual(budgets, transactions),
        insight,
        summary: Summary {
            total_spent,
            transaction_count: transactions.len(),
            category_count,
        },
        recent,
        monthly,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Transaction;

    fn tx(title: &str, cents: i64, date: &str, category: Category) -> Transaction {
        Transaction::new(
            title.to_string(),
            MoneyCents::new(cents),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            None,
        )
        .unwrap()
    }

    #[test]
    fn monthly_totals_conserve_the_input_sum() {
        let txs = vec![
            tx("groceries", 45_10, "2025-05-02", Category::Groceries),
            tx("bus pass", 60_00, "2025-06-14", Category::Transportation),
            tx("dinner", 32_50, "2025-05-21", Category::FoodAndDining),
            tx("rent share", 700_00, "2025-07-01", Category::BillsAndUtilities),
        ];

        let monthly = monthly_totals(&txs);
        let bucketed: MoneyCents = monthly.iter().map(|m| m.total).sum();
        let input: MoneyCents = txs.iter().map(|t| t.amount).sum();
        assert_eq!(bucketed, input);
    }

    #[test]
    fn monthly_totals_are_chronological_regardless_of_arrival_order() {
        let txs = vec![
            tx("late", 16_00, "2025-07-03", Category::Other),
            tx("early", 19_50, "2025-05-10", Category::Other),
            tx("middle", 14_50, "2025-06-20", Category::Other),
        ];

        let labels: Vec<_> = monthly_totals(&txs).into_iter().map(|m| m.month).collect();
        assert_eq!(labels, ["May 2025", "Jun 2025", "Jul 2025"]);
    }

    #[test]
    fn empty_input_yields_empty_aggregates_and_no_insight() {
        assert!(monthly_totals(&[]).is_empty());
        assert!(category_breakdown(&[]).is_empty());
        assert!(spending_insight(&[]).is_none());
    }

    #[test]
    fn percentages_sum_close_to_one_hundred() {
        let txs = vec![
            tx("a", 30_00, "2025-07-01", Category::Shopping),
            tx("b", 22_00, "2025-07-02", Category::BillsAndUtilities),
            tx("c", 19_00, "2025-07-03", Category::Healthcare),
            tx("d", 17_00, "2025-07-04", Category::Groceries),
            tx("e", 6_00, "2025-07-05", Category::Transportation),
            tx("f", 3_00, "2025-07-06", Category::FoodAndDining),
            tx("g", 2_00, "2025-07-07", Category::Other),
            tx("h", 1_00, "2025-07-08", Category::HomeAndGarden),
        ];

        let shares = category_breakdown(&txs);
        assert_eq!(shares.len(), 8);
        let sum: i64 = shares.iter().map(|s| s.percentage as i64).sum();
        assert!((sum - 100).abs() <= shares.len() as i64);
    }

    #[test]
    fn breakdown_keeps_first_encountered_order_and_colors() {
        let txs = vec![
            tx("a", 10_00, "2025-07-01", Category::Shopping),
            tx("b", 5_00, "2025-07-02", Category::Groceries),
            tx("c", 5_00, "2025-07-03", Category::Shopping),
        ];

        let shares = category_breakdown(&txs);
        assert_eq!(shares[0].name, "Shopping");
        assert_eq!(shares[0].percentage, 75);
        assert_eq!(shares[0].color, "#4287f5");
        assert_eq!(shares[1].name, "Groceries");
        assert_eq!(shares[1].percentage, 25);
    }

    #[test]
    fn zero_amounts_produce_zero_shares_not_nan() {
        let txs = vec![
            tx("freebie", 0, "2025-07-01", Category::Other),
            tx("comped", 0, "2025-07-02", Category::Travel),
        ];

        let shares = category_breakdown(&txs);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.percentage == 0));
    }

    #[test]
    fn single_month_produces_no_insight() {
        let monthly = vec![MonthlyTotal {
            month: "May 2025".to_string(),
            total: MoneyCents::new(1950_00),
        }];
        assert!(spending_insight(&monthly).is_none());
    }

    #[test]
    fn increase_is_reported_with_the_difference() {
        let monthly = vec![
            MonthlyTotal {
                month: "Jun 2025".to_string(),
                total: MoneyCents::new(1450_00),
            },
            MonthlyTotal {
                month: "Jul 2025".to_string(),
                total: MoneyCents::new(1600_00),
            },
        ];
        assert_eq!(
            spending_insight(&monthly).as_deref(),
            Some("You spent $150.00 more than the previous month.")
        );
    }

    #[test]
    fn decrease_and_tie_get_their_own_wording() {
        let less = vec![
            MonthlyTotal {
                month: "Jun 2025".to_string(),
                total: MoneyCents::new(1600_00),
            },
            MonthlyTotal {
                month: "Jul 2025".to_string(),
                total: MoneyCents::new(1400_50),
            },
        ];
        assert_eq!(
            spending_insight(&less).as_deref(),
            Some("Great! You spent $199.50 less than the previous month.")
        );

        let same = vec![
            MonthlyTotal {
                month: "Jun 2025".to_string(),
                total: MoneyCents::new(900_00),
            },
            MonthlyTotal {
                month: "Jul 2025".to_string(),
                total: MoneyCents::new(900_00),
            },
        ];
        assert_eq!(
            spending_insight(&same).as_deref(),
            Some("Your spending is the same as last month.")
        );
    }

    #[test]
    fn insight_uses_true_recency_not_arrival_order() {
        // July arrives before June; the trend must still compare Jul vs Jun.
        let txs = vec![
            tx("jul", 1600_00, "2025-07-15", Category::Other),
            tx("jun", 1450_00, "2025-06-15", Category::Other),
        ];

        let monthly = monthly_totals(&txs);
        assert_eq!(
            spending_insight(&monthly).as_deref(),
            Some("You spent $150.00 more than the previous month.")
        );
    }

    #[test]
    fn comparator_pairs_budgets_with_actuals() {
        let txs = vec![tx("takeout", 650_00, "2025-07-09", Category::FoodAndDining)];
        let budgets =
            HashMap::from([(Category::FoodAndDining, MoneyCents::parse_lenient("800"))]);

        let rows = budget_vs_actual(&budgets, &txs);
        assert_eq!(rows.len(), Category::ALL.len());

        let food = rows
            .iter()
            .find(|row| row.category == Category::FoodAndDining)
            .unwrap();
        assert_eq!(food.budgeted, MoneyCents::new(800_00));
        assert_eq!(food.actual, MoneyCents::new(650_00));

        // Unbudgeted, unspent categories show up as 0/0, not as errors.
        let travel = rows
            .iter()
            .find(|row| row.category == Category::Travel)
            .unwrap();
        assert_eq!(travel.budgeted, MoneyCents::ZERO);
        assert_eq!(travel.actual, MoneyCents::ZERO);
    }

    #[test]
    fn dashboard_composes_all_sections() {
        let txs = vec![
            tx("jun groceries", 1450_00, "2025-06-05", Category::Groceries),
            tx("jul groceries", 1100_00, "2025-07-05", Category::Groceries),
            tx("jul dinner", 500_00, "2025-07-18", Category::FoodAndDining),
        ];
        let budgets = HashMap::from([(Category::Groceries, MoneyCents::new(1200_00))]);

        let dashboard = dashboard(&txs, &budgets);
        assert_eq!(dashboard.monthly.len(), 2);
        assert_eq!(dashboard.categories.len(), 2);
        assert_eq!(dashboard.budget_vs_actual.len(), Category::ALL.len());
        assert_eq!(
            dashboard.insight.as_deref(),
            Some("You spent $150.00 more than the previous month.")
        );
        assert_eq!(dashboard.summary.total_spent, MoneyCents::new(3050_00));
        assert_eq!(dashboard.summary.transaction_count, 3);
        assert_eq!(dashboard.summary.category_count, 2);
        // Most recent first.
        assert_eq!(dashboard.recent[0].title, "jul dinner");
    }
}
