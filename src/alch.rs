use std::collections::HashMap;

use rayon::prelude::*;

use crate::model::{AlchReport, ItemMapping, PriceQuote, ProfitRecord};

pub const NATURE_RUNE_ID: u32 = 561;
pub const DEFAULT_NATURE_RUNE_COST: i64 = 100;
pub const DEFAULT_BUY_LIMIT: i64 = 1000;

/// Cost of the rune consumed per cast, from its latest high price.
pub fn nature_rune_cost(prices: &HashMap<u32, PriceQuote>) -> i64 {
    prices
        .get(&NATURE_RUNE_ID)
        .and_then(|q| q.high)
        .unwrap_or(DEFAULT_NATURE_RUNE_COST)
}

pub fn analyze(items: &[ItemMapping], prices: &HashMap<u32, PriceQuote>) -> AlchReport {
    let reagent_cost = nature_rune_cost(prices);

    // Indexed par_iter keeps catalog order, so the stable sort below
    // leaves ties in input order.
    let mut records: Vec<ProfitRecord> = items
        .par_iter()
        .filter_map(|item| evaluate(item, prices.get(&item.id)?, reagent_cost))
        .collect();

    records.sort_by(|a, b| b.profit.cmp(&a.profit));

    AlchReport { reagent_cost, records }
}

/// Buying at the latest high price is deliberate: it is the price an
/// instant buy actually pays.
fn evaluate(item: &ItemMapping, quote: &PriceQuote, reagent_cost: i64) -> Option<ProfitRecord> {
    let high_alch = item.highalch.filter(|&v| v > 0)?;
    let buy = quote.high?;

    let profit = high_alch - buy - reagent_cost;
    if profit <= 0 {
        return None;
    }

    let buy_limit = item.limit.filter(|&l| l > 0);
    let batch_profit = profit * buy_limit.unwrap_or(DEFAULT_BUY_LIMIT);

    Some(ProfitRecord {
        item_id: item.id,
        name: item.name.clone(),
        members: item.members,
        high_alch,
        buy,
        sell: quote.low,
        profit,
        buy_limit,
        batch_profit,
        price_time: quote.high_time,
    })
}
