use serde::Deserialize;
use std::collections::HashMap;

/// One entry of the `/mapping` catalog. Fields the analyzer never reads
/// (examine, lowalch, value, icon) are left to serde to skip.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemMapping {
    pub id: u32,
    pub name: String,
    pub members: bool,
    pub highalch: Option<i64>,
    pub limit: Option<i64>,
}

/// Latest observed trade for one item. `None` means no recent trade.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub high: Option<i64>,
    pub high_time: Option<i64>,
    pub low: Option<i64>,
    pub low_time: Option<i64>,
}

/// `/latest` response envelope. Keys arrive as strings and are parsed as ids.
#[derive(Debug, Deserialize)]
pub struct LatestPrices {
    pub data: HashMap<u32, PriceQuote>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfitRecord {
    pub item_id: u32,
    pub name: String,
    pub members: bool,

    pub high_alch: i64,
    pub buy: i64,
    pub sell: Option<i64>,

    pub profit: i64,
    pub buy_limit: Option<i64>,  // None = no limit known
    pub batch_profit: i64,

    pub price_time: Option<i64>,  // unix seconds of the buy price
}

#[derive(Debug, Clone)]
pub struct AlchReport {
    pub reagent_cost: i64,
    pub records: Vec<ProfitRecord>,  // sorted by profit, descending
}

impl AlchReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
