//! Domain models for Wattle

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::anomaly::Anomaly;
use crate::error::{Error, Result};
use crate::patterns::SpendingPatterns;

/// A single financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Negative = expense, positive = income
    pub amount: f64,
    /// Free text on ingest; rewritten to a standard category by normalization
    pub category: String,
    pub description: String,
}

/// Standard spending categories in the Wattle taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Transport,
    Entertainment,
    Utilities,
    Work,
    Investment,
    Super,
    Donation,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Work => "work",
            Self::Investment => "investment",
            Self::Super => "super",
            Self::Donation => "donation",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" => Ok(Self::Utilities),
            "work" => Ok(Self::Work),
            "investment" => Ok(Self::Investment),
            "super" => Ok(Self::Super),
            "donation" => Ok(Self::Donation),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's financial profile
///
/// Every field is optional. Missing fields never fail analysis; they default
/// to zero in rule evaluation and lower the confidence score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub annual_income: Option<f64>,
    pub super_balance: Option<f64>,
    pub emergency_fund: Option<f64>,
    pub investment_assets: Option<f64>,
    pub super_contributions: Option<f64>,
    pub work_expenses: Option<f64>,
    /// Number of distinct asset classes held
    pub investment_diversity: Option<u32>,
    /// Months of transaction history behind this analysis. Derived from the
    /// transaction date range when not supplied.
    pub data_time_span_months: Option<u32>,
}

/// Qualitative risk rating with fixed message text on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "High risk: Significant income or expense volatility detected",
            Self::Medium => "Medium risk: Insufficient emergency fund",
            Self::Low => "Low risk: Stable financial situation",
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.message().to_string()
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        match s.as_str() {
            "High risk: Significant income or expense volatility detected" => Ok(Self::High),
            "Medium risk: Insufficient emergency fund" => Ok(Self::Medium),
            "Low risk: Stable financial situation" => Ok(Self::Low),
            _ => Err(format!("Unknown risk assessment: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Headline metrics derived from the transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings_rate: f64,
}

/// The full advisory output for one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tax_optimization: Vec<String>,
    pub retirement_planning: Vec<String>,
    pub investment_strategy: Vec<String>,
    pub risk_assessment: RiskLevel,
    /// Data completeness/quality score in [0, 1]
    pub confidence_score: f64,
    pub metrics: Metrics,
    pub spending_patterns: SpendingPatterns,
    pub anomalies: Vec<Anomaly>,
}

/// An analysis request as parsed from the wire by the surrounding service
///
/// Both collections are required; `into_parts` is the single place where a
/// missing one becomes an [`Error::InvalidInput`]. Individual profile fields
/// may still be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub transactions: Option<Vec<Transaction>>,
    pub profile: Option<UserProfile>,
}

impl AnalysisRequest {
    pub fn new(transactions: Vec<Transaction>, profile: UserProfile) -> Self {
        Self {
            transactions: Some(transactions),
            profile: Some(profile),
        }
    }

    /// Validate that both collections are present, consuming the request
    pub fn into_parts(self) -> Result<(Vec<Transaction>, UserProfile)> {
        let transactions = self
            .transactions
            .ok_or_else(|| Error::InvalidInput("transaction list is required".to_string()))?;
        let profile = self
            .profile
            .ok_or_else(|| Error::InvalidInput("user profile is required".to_string()))?;
        Ok((transactions, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        assert_eq!(Category::Groceries.as_str(), "groceries");
        assert_eq!(Category::from_str("super").unwrap(), Category::Super);
        assert!(Category::from_str("takeaway").is_err());
    }

    #[test]
    fn test_risk_level_wire_format() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium risk: Insufficient emergency fund\"");

        let parsed: RiskLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RiskLevel::Medium);
    }

    #[test]
    fn test_request_missing_transactions() {
        let request = AnalysisRequest {
            transactions: None,
            profile: Some(UserProfile::default()),
        };
        assert!(matches!(
            request.into_parts(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_request_missing_profile() {
        let request = AnalysisRequest {
            transactions: Some(vec![]),
            profile: None,
        };
        assert!(matches!(
            request.into_parts(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"age": 30}"#).unwrap();
        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.annual_income, None);
    }
}
