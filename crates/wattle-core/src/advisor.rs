//! Advice engine
//!
//! Orchestrates normalization, aggregation, anomaly detection, rule
//! evaluation, risk assessment, and confidence scoring into one
//! [`AnalysisResult`]. The engine is a pure, synchronous computation over the
//! caller-supplied data; the regulation table and rule set are fixed at
//! construction, so one engine can serve concurrent analyses without locking.

use tracing::{debug, info};

use crate::anomaly::detect_anomalies;
use crate::error::Result;
use crate::models::{AnalysisRequest, AnalysisResult, Metrics, RiskLevel, Transaction, UserProfile};
use crate::normalize::normalize_categories;
use crate::patterns::{
    calculate_spending_patterns, data_time_span_months, income_and_expenses,
};
use crate::regulations::Regulations;
use crate::rules::{default_rules, evaluate, AdviceRule, RuleContext, RuleTopic};
use crate::stats;

/// Volatility above which the risk assessment is High
///
/// Applied to the standard deviation of raw dollar amounts, so almost any
/// varied income or expense stream exceeds it. Inherited behaviour, kept
/// until the risk model is recalibrated.
pub const VOLATILITY_THRESHOLD: f64 = 0.3;

/// The main advice engine
pub struct FinancialAdvisor {
    regulations: Regulations,
    rules: Vec<AdviceRule>,
}

impl Default for FinancialAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialAdvisor {
    /// Engine with the current Australian regulation table and built-in rules
    pub fn new() -> Self {
        Self::with_regulations(Regulations::australia_fy2023())
    }

    /// Engine with an injected regulation table (e.g. loaded from config)
    pub fn with_regulations(regulations: Regulations) -> Self {
        Self {
            regulations,
            rules: default_rules(),
        }
    }

    /// Engine with both the regulation table and the rule set replaced
    pub fn with_rules(regulations: Regulations, rules: Vec<AdviceRule>) -> Self {
        Self { regulations, rules }
    }

    pub fn regulations(&self) -> &Regulations {
        &self.regulations
    }

    /// Validate a wire-level request and analyze it
    ///
    /// Fails with [`crate::Error::InvalidInput`] when the transaction list or
    /// profile is missing entirely; individual missing profile fields are
    /// fine and only lower the confidence score.
    pub fn analyze_request(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        let (transactions, profile) = request.into_parts()?;
        Ok(self.analyze(&transactions, &profile))
    }

    /// Analyze a transaction set against a user profile
    pub fn analyze(&self, transactions: &[Transaction], profile: &UserProfile) -> AnalysisResult {
        let normalized = normalize_categories(transactions);

        let spending_patterns = calculate_spending_patterns(&normalized);
        let anomalies = detect_anomalies(&normalized);

        let (total_income, total_expenses) = income_and_expenses(&normalized);
        let savings_rate = if total_income == 0.0 {
            0.0
        } else {
            (total_income - total_expenses) / total_income
        };
        let metrics = Metrics {
            total_income,
            total_expenses,
            savings_rate,
        };

        let ctx = RuleContext {
            profile,
            metrics: &metrics,
            regulations: &self.regulations,
        };
        let tax_optimization = evaluate(&self.rules, RuleTopic::Tax, &ctx);
        let retirement_planning = evaluate(&self.rules, RuleTopic::Retirement, &ctx);
        let investment_strategy = evaluate(&self.rules, RuleTopic::Investment, &ctx);

        let risk_assessment = self.assess_risk(profile, &normalized);
        let confidence_score = self.confidence_score(&normalized, profile);

        info!(
            transactions = normalized.len(),
            anomalies = anomalies.len(),
            tax = tax_optimization.len(),
            retirement = retirement_planning.len(),
            investment = investment_strategy.len(),
            risk = risk_assessment.message(),
            confidence = confidence_score,
            "Analysis complete"
        );

        AnalysisResult {
            tax_optimization,
            retirement_planning,
            investment_strategy,
            risk_assessment,
            confidence_score,
            metrics,
            spending_patterns,
            anomalies,
        }
    }

    /// Risk rating in strict priority order: volatility, then emergency fund
    fn assess_risk(&self, profile: &UserProfile, transactions: &[Transaction]) -> RiskLevel {
        let income_amounts: Vec<f64> = transactions
            .iter()
            .filter(|tx| tx.amount > 0.0)
            .map(|tx| tx.amount)
            .collect();
        let expense_amounts: Vec<f64> = transactions
            .iter()
            .filter(|tx| tx.amount < 0.0)
            .map(|tx| tx.amount.abs())
            .collect();

        let income_volatility = stats::population_std_dev(&income_amounts);
        let expense_volatility = stats::population_std_dev(&expense_amounts);

        debug!(
            income_volatility,
            expense_volatility, "Computed risk volatilities"
        );

        if income_volatility > VOLATILITY_THRESHOLD || expense_volatility > VOLATILITY_THRESHOLD {
            return RiskLevel::High;
        }

        let monthly_income = profile.annual_income.unwrap_or(0.0) / 12.0;
        if profile.emergency_fund.unwrap_or(0.0) < monthly_income {
            return RiskLevel::Medium;
        }

        RiskLevel::Low
    }

    /// Additive confidence score in [0, 1] from data span, transaction
    /// count, and profile completeness
    fn confidence_score(&self, transactions: &[Transaction], profile: &UserProfile) -> f64 {
        let mut score = 0.0;

        let time_span = profile
            .data_time_span_months
            .or_else(|| data_time_span_months(transactions));
        if let Some(months) = time_span {
            score += match months {
                m if m >= 12 => 0.4,
                m if m >= 6 => 0.3,
                m if m >= 3 => 0.2,
                _ => 0.1,
            };
        }

        score += match transactions.len() {
            n if n >= 100 => 0.3,
            n if n >= 50 => 0.2,
            n if n >= 20 => 0.1,
            _ => 0.0,
        };

        let core_fields = [
            profile.age.is_some(),
            profile.annual_income.is_some(),
            profile.super_balance.is_some(),
            profile.emergency_fund.is_some(),
        ];
        let complete = core_fields.iter().filter(|present| **present).count();
        score += complete as f64 / core_fields.len() as f64 * 0.3;

        score.min(1.0)
    }
}
