//! Statistical anomaly detection
//!
//! Flags transactions whose amount sits more than three standard deviations
//! from the mean of the set. A degenerate set (empty, or all amounts equal)
//! reports no anomalies rather than dividing by zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Transaction;
use crate::stats;

/// Z-score magnitude beyond which a transaction is considered anomalous
pub const Z_SCORE_THRESHOLD: f64 = 3.0;

/// An anomalous transaction together with its z-score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub z_score: f64,
}

/// Detect anomalous transactions, preserving input order
pub fn detect_anomalies(transactions: &[Transaction]) -> Vec<Anomaly> {
    let amounts: Vec<f64> = transactions.iter().map(|tx| tx.amount).collect();
    let mean = stats::mean(&amounts);
    let std_dev = stats::sample_std_dev(&amounts);

    if std_dev == 0.0 {
        return Vec::new();
    }

    let anomalies: Vec<Anomaly> = transactions
        .iter()
        .filter_map(|tx| {
            let z_score = (tx.amount - mean) / std_dev;
            (z_score.abs() > Z_SCORE_THRESHOLD).then(|| Anomaly {
                transaction: tx.clone(),
                z_score,
            })
        })
        .collect();

    debug!(
        total = transactions.len(),
        anomalies = anomalies.len(),
        "Anomaly detection complete"
    );
    anomalies
}
