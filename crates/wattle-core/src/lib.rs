//! Wattle Core Library
//!
//! Shared functionality for the Wattle financial adviser:
//! - Category normalization onto a fixed spending taxonomy
//! - Spending pattern aggregation (daily/category/monthly rollups)
//! - Statistical anomaly detection over transaction amounts
//! - Australian regulation tables (tax brackets, contribution caps,
//!   drawdown rates)
//! - Data-driven advice rules and the advice engine that combines
//!   everything into tax, retirement, and investment suggestions with a
//!   risk rating and confidence score
//!
//! The core is a pure, synchronous computation: the surrounding service
//! parses requests, calls [`FinancialAdvisor::analyze_request`], and
//! serializes the [`AnalysisResult`].

pub mod advisor;
pub mod anomaly;
pub mod error;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod regulations;
pub mod rules;
pub mod stats;

pub use advisor::{FinancialAdvisor, VOLATILITY_THRESHOLD};
pub use anomaly::{detect_anomalies, Anomaly, Z_SCORE_THRESHOLD};
pub use error::{Error, Result};
pub use models::{
    AnalysisRequest, AnalysisResult, Category, Metrics, RiskLevel, Transaction, UserProfile,
};
pub use normalize::{normalize_categories, normalize_category};
pub use patterns::{calculate_savings_rate, calculate_spending_patterns, SpendingPatterns};
pub use regulations::{DrawdownBand, Regulations, TaxBracket};
pub use rules::{default_rules, AdviceRule, RuleContext, RuleTopic};
