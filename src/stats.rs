use statrs::statistics::{Data, Median, Statistics};
use crate::model::ProfitRecord;

pub struct ProfitStats {
    pub count: usize,
    pub mean_profit: f64,
    pub median_profit: f64,
}

pub fn build_stats(records: &[ProfitRecord]) -> ProfitStats {
    if records.is_empty() {
        return ProfitStats { count: 0, mean_profit: 0.0, median_profit: 0.0 };
    }

    let profits: Vec<f64> = records.iter().map(|r| r.profit as f64).collect();
    let median_profit = Data::new(profits.clone()).median();

    ProfitStats {
        count: records.len(),
        mean_profit: profits.mean(),
        median_profit,
    }
}

/// Highest batch profit; first record wins on ties.
pub fn best_batch(records: &[ProfitRecord]) -> Option<&ProfitRecord> {
    // max_by_key keeps the last maximum, so walk backwards
    records.iter().rev().max_by_key(|r| r.batch_profit)
}
