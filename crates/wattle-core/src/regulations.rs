//! Australian financial regulation tables
//!
//! A versioned, read-only snapshot of the thresholds the advice engine
//! evaluates against: income tax brackets, Medicare levy, superannuation
//! contribution caps, and minimum pension drawdown rates. Constructed once
//! (in code or from JSON config) and injected into the engine; never mutated
//! at runtime, so it can be shared freely across concurrent analyses.
//!
//! Updating for a new financial year means adding a new constructor (or
//! shipping a new JSON table) with a bumped `version`; nothing else changes.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One marginal income tax bracket; `max` is `None` for the top bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    pub max: Option<f64>,
    pub rate: f64,
}

/// Minimum pension drawdown rate for an age band; `max_age` is `None` for
/// the open-ended top band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownBand {
    pub min_age: u32,
    pub max_age: Option<u32>,
    pub rate: f64,
}

/// Jurisdiction-specific regulatory thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulations {
    /// Table version, e.g. "au-fy2023"
    pub version: String,
    /// Ordered from lowest to highest income
    pub income_tax_brackets: Vec<TaxBracket>,
    pub medicare_levy: f64,
    pub medicare_levy_surcharge_single: f64,
    pub medicare_levy_surcharge_family: f64,
    pub concessional_contribution_cap: f64,
    pub non_concessional_contribution_cap: f64,
    /// Employer superannuation guarantee rate
    pub super_guarantee_rate: f64,
    /// Work-related expenses above this require written evidence
    pub work_expense_documentation_threshold: f64,
    pub preservation_age: u32,
    pub pension_age: u32,
    /// Ordered from youngest to oldest band
    pub minimum_drawdown_rates: Vec<DrawdownBand>,
}

impl Regulations {
    /// Australian thresholds for the 2022-23 financial year
    pub fn australia_fy2023() -> Self {
        Self {
            version: "au-fy2023".to_string(),
            income_tax_brackets: vec![
                TaxBracket {
                    min: 0.0,
                    max: Some(18_200.0),
                    rate: 0.0,
                },
                TaxBracket {
                    min: 18_201.0,
                    max: Some(45_000.0),
                    rate: 0.19,
                },
                TaxBracket {
                    min: 45_001.0,
                    max: Some(120_000.0),
                    rate: 0.325,
                },
                TaxBracket {
                    min: 120_001.0,
                    max: Some(180_000.0),
                    rate: 0.37,
                },
                TaxBracket {
                    min: 180_001.0,
                    max: None,
                    rate: 0.45,
                },
            ],
            medicare_levy: 0.02,
            medicare_levy_surcharge_single: 90_000.0,
            medicare_levy_surcharge_family: 180_000.0,
            concessional_contribution_cap: 27_500.0,
            non_concessional_contribution_cap: 110_000.0,
            super_guarantee_rate: 0.105,
            work_expense_documentation_threshold: 300.0,
            preservation_age: 60,
            pension_age: 67,
            minimum_drawdown_rates: vec![
                DrawdownBand {
                    min_age: 0,
                    max_age: Some(64),
                    rate: 0.04,
                },
                DrawdownBand {
                    min_age: 65,
                    max_age: Some(74),
                    rate: 0.05,
                },
                DrawdownBand {
                    min_age: 75,
                    max_age: Some(79),
                    rate: 0.06,
                },
                DrawdownBand {
                    min_age: 80,
                    max_age: Some(84),
                    rate: 0.07,
                },
                DrawdownBand {
                    min_age: 85,
                    max_age: Some(89),
                    rate: 0.09,
                },
                DrawdownBand {
                    min_age: 90,
                    max_age: Some(94),
                    rate: 0.11,
                },
                DrawdownBand {
                    min_age: 95,
                    max_age: None,
                    rate: 0.14,
                },
            ],
        }
    }

    /// Load a regulation table from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Marginal tax rate for a taxable income
    pub fn marginal_rate(&self, taxable_income: f64) -> f64 {
        self.income_tax_brackets
            .iter()
            .rev()
            .find(|bracket| taxable_income >= bracket.min)
            .map(|bracket| bracket.rate)
            .unwrap_or(0.0)
    }

    /// Minimum pension drawdown rate for an age
    pub fn minimum_drawdown_rate(&self, age: u32) -> f64 {
        self.minimum_drawdown_rates
            .iter()
            .rev()
            .find(|band| age >= band.min_age)
            .map(|band| band.rate)
            .unwrap_or(0.0)
    }
}
