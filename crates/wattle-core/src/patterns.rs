//! Spending pattern aggregation
//!
//! Rollups over a (normalized) transaction list: daily, per-category, and
//! monthly totals, plus headline statistics. All aggregations tolerate an
//! empty input and return empty maps and zeroed values rather than failing.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Transaction;
use crate::stats;

/// Aggregated spending rollups for one transaction set
///
/// Maps are ordered so serialized output is deterministic. `monthly_trends`
/// is keyed by "YYYY-MM".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    pub daily_spending: BTreeMap<NaiveDate, f64>,
    pub category_spending: BTreeMap<String, f64>,
    pub monthly_trends: BTreeMap<String, f64>,
    /// Sum of all amounts, income included
    pub total_spent: f64,
    /// Mean of the daily totals
    pub average_daily_spend: f64,
    /// Sample standard deviation of the daily totals; 0.0 with fewer than
    /// two distinct days of data
    pub spending_volatility: f64,
}

/// Compute spending rollups and statistics for a transaction set
pub fn calculate_spending_patterns(transactions: &[Transaction]) -> SpendingPatterns {
    let mut daily_spending: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut category_spending: BTreeMap<String, f64> = BTreeMap::new();
    let mut monthly_trends: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_spent = 0.0;

    for tx in transactions {
        *daily_spending.entry(tx.date).or_insert(0.0) += tx.amount;
        *category_spending.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
        let month_key = format!("{:04}-{:02}", tx.date.year(), tx.date.month());
        *monthly_trends.entry(month_key).or_insert(0.0) += tx.amount;
        total_spent += tx.amount;
    }

    let daily_totals: Vec<f64> = daily_spending.values().copied().collect();
    let average_daily_spend = stats::mean(&daily_totals);
    let spending_volatility = stats::sample_std_dev(&daily_totals);

    debug!(
        days = daily_spending.len(),
        categories = category_spending.len(),
        months = monthly_trends.len(),
        "Computed spending patterns"
    );

    SpendingPatterns {
        daily_spending,
        category_spending,
        monthly_trends,
        total_spent,
        average_daily_spend,
        spending_volatility,
    }
}

/// Total income (positive amounts) and total expenses (absolute value of
/// negative amounts) for a transaction set
pub fn income_and_expenses(transactions: &[Transaction]) -> (f64, f64) {
    let income: f64 = transactions
        .iter()
        .filter(|tx| tx.amount > 0.0)
        .map(|tx| tx.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|tx| tx.amount < 0.0)
        .map(|tx| tx.amount.abs())
        .sum();
    (income, expenses)
}

/// Savings rate: (income - expenses) / income, 0.0 when there is no income
pub fn calculate_savings_rate(transactions: &[Transaction]) -> f64 {
    let (income, expenses) = income_and_expenses(transactions);
    if income == 0.0 {
        return 0.0;
    }
    (income - expenses) / income
}

/// Whole months of history covered by the transaction dates (30-day months);
/// `None` for an empty list
pub fn data_time_span_months(transactions: &[Transaction]) -> Option<u32> {
    let min = transactions.iter().map(|tx| tx.date).min()?;
    let max = transactions.iter().map(|tx| tx.date).max()?;
    Some(((max - min).num_days() / 30) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            date: date.parse().unwrap(),
            amount,
            category: category.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_input_yields_zeroed_patterns() {
        let patterns = calculate_spending_patterns(&[]);
        assert!(patterns.daily_spending.is_empty());
        assert!(patterns.category_spending.is_empty());
        assert!(patterns.monthly_trends.is_empty());
        assert_eq!(patterns.total_spent, 0.0);
        assert_eq!(patterns.average_daily_spend, 0.0);
        assert_eq!(patterns.spending_volatility, 0.0);
    }

    #[test]
    fn test_rollups_group_and_sum() {
        let transactions = vec![
            tx("2023-01-01", 5000.0, "super"),
            tx("2023-01-01", -120.0, "groceries"),
            tx("2023-01-15", -80.0, "groceries"),
            tx("2023-02-03", -200.0, "utilities"),
        ];
        let patterns = calculate_spending_patterns(&transactions);

        assert_eq!(patterns.daily_spending.len(), 3);
        let jan_1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(patterns.daily_spending[&jan_1], 4880.0);
        assert_eq!(patterns.category_spending["groceries"], -200.0);
        assert_eq!(patterns.monthly_trends["2023-01"], 4800.0);
        assert_eq!(patterns.monthly_trends["2023-02"], -200.0);
        assert_eq!(patterns.total_spent, 4600.0);
    }

    #[test]
    fn test_volatility_is_zero_for_single_day() {
        let transactions = vec![
            tx("2023-01-01", -50.0, "groceries"),
            tx("2023-01-01", -30.0, "transport"),
        ];
        let patterns = calculate_spending_patterns(&transactions);
        assert_eq!(patterns.average_daily_spend, -80.0);
        assert_eq!(patterns.spending_volatility, 0.0);
    }

    #[test]
    fn test_savings_rate() {
        let transactions = vec![
            tx("2023-01-01", 5000.0, "super"),
            tx("2023-01-15", -2000.0, "other"),
        ];
        assert!((calculate_savings_rate(&transactions) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_savings_rate_without_income_is_zero() {
        let transactions = vec![tx("2023-01-01", -2000.0, "other")];
        assert_eq!(calculate_savings_rate(&transactions), 0.0);
        assert_eq!(calculate_savings_rate(&[]), 0.0);
    }

    #[test]
    fn test_data_time_span() {
        assert_eq!(data_time_span_months(&[]), None);

        let two_weeks = vec![
            tx("2023-01-01", 1.0, "other"),
            tx("2023-01-15", 1.0, "other"),
        ];
        assert_eq!(data_time_span_months(&two_weeks), Some(0));

        let a_year = vec![
            tx("2023-01-01", 1.0, "other"),
            tx("2024-01-01", 1.0, "other"),
        ];
        assert_eq!(data_time_span_months(&a_year), Some(12));
    }
}
