//! Data-driven advice rules
//!
//! Each rule pairs a predicate over the evaluation context with fixed advice
//! text. Rules are grouped by topic and evaluated independently: every
//! matching rule fires, in table order, with no early exit or priority.

use crate::models::{Metrics, UserProfile};
use crate::regulations::Regulations;

/// Advisory target a super balance is compared against
pub const SUPER_BALANCE_TARGET: f64 = 100_000.0;
/// Recommended minimum savings rate
pub const RECOMMENDED_SAVINGS_RATE: f64 = 0.20;
/// Months of income an emergency fund should cover
pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;
/// Minimum recommended number of asset classes
pub const MIN_INVESTMENT_DIVERSITY: u32 = 3;

/// Topic a rule contributes advice to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTopic {
    Tax,
    Retirement,
    Investment,
}

impl RuleTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::Retirement => "retirement",
            Self::Investment => "investment",
        }
    }
}

impl std::fmt::Display for RuleTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a rule predicate may inspect
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub profile: &'a UserProfile,
    pub metrics: &'a Metrics,
    pub regulations: &'a Regulations,
}

/// A single advice rule: a predicate plus the advice it emits
pub struct AdviceRule {
    /// Stable identifier, e.g. "tax:concessional-cap"
    pub id: &'static str,
    pub topic: RuleTopic,
    pub condition: fn(&RuleContext) -> bool,
    pub advice: &'static str,
}

impl AdviceRule {
    pub fn matches(&self, ctx: &RuleContext) -> bool {
        (self.condition)(ctx)
    }
}

impl std::fmt::Debug for AdviceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceRule")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("advice", &self.advice)
            .finish()
    }
}

/// The built-in rule set, in evaluation order
pub fn default_rules() -> Vec<AdviceRule> {
    vec![
        AdviceRule {
            id: "tax:concessional-cap",
            topic: RuleTopic::Tax,
            condition: |ctx| {
                ctx.profile.super_contributions.unwrap_or(0.0)
                    < ctx.regulations.concessional_contribution_cap
            },
            advice: "Consider maximizing your concessional super contributions to reduce taxable income",
        },
        AdviceRule {
            id: "tax:work-expenses",
            topic: RuleTopic::Tax,
            condition: |ctx| ctx.profile.work_expenses.unwrap_or(0.0) > 0.0,
            advice: "Ensure you're claiming all eligible work-related expenses",
        },
        AdviceRule {
            id: "tax:franking-credits",
            topic: RuleTopic::Tax,
            condition: |ctx| ctx.profile.investment_assets.unwrap_or(0.0) > 0.0,
            advice: "Consider tax-efficient investment strategies like franking credits",
        },
        AdviceRule {
            id: "retirement:super-balance",
            topic: RuleTopic::Retirement,
            condition: |ctx| ctx.profile.super_balance.unwrap_or(0.0) < SUPER_BALANCE_TARGET,
            advice: "Consider increasing your super contributions to build your retirement savings",
        },
        AdviceRule {
            id: "retirement:savings-rate",
            topic: RuleTopic::Retirement,
            condition: |ctx| ctx.metrics.savings_rate < RECOMMENDED_SAVINGS_RATE,
            advice: "Your savings rate is below recommended levels. Consider increasing your savings",
        },
        AdviceRule {
            id: "retirement:emergency-fund",
            topic: RuleTopic::Retirement,
            condition: |ctx| {
                let monthly_income = ctx.profile.annual_income.unwrap_or(0.0) / 12.0;
                ctx.profile.emergency_fund.unwrap_or(0.0) < monthly_income * EMERGENCY_FUND_MONTHS
            },
            advice: "Build an emergency fund of at least 3 months' expenses",
        },
        AdviceRule {
            id: "investment:diversification",
            topic: RuleTopic::Investment,
            condition: |ctx| ctx.profile.investment_diversity.unwrap_or(0) < MIN_INVESTMENT_DIVERSITY,
            advice: "Diversify investments across different asset classes",
        },
    ]
}

/// Collect advice from every matching rule in a topic, in table order
pub fn evaluate(rules: &[AdviceRule], topic: RuleTopic, ctx: &RuleContext) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.topic == topic && rule.matches(ctx))
        .map(|rule| rule.advice.to_string())
        .collect()
}
