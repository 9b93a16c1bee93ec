//! Terminal rendering of an [`AlchReport`]: the results table and the
//! summary block underneath it.

use std::fmt::Display;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::model::{AlchReport, ProfitRecord};
use crate::stats::{best_batch, build_stats};

const NAME_WIDTH: usize = 25;
const NAME_KEEP: usize = 22;
const RULE_WIDTH: usize = 56;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Mem")]
    members: &'static str,
    #[tabled(rename = "Alch")]
    high_alch: String,
    #[tabled(rename = "Buy")]
    buy: String,
    #[tabled(rename = "Sell")]
    sell: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Batch")]
    batch: String,
    #[tabled(rename = "Price age")]
    age: String,
}

impl Row {
    fn new(rank: usize, r: &ProfitRecord, now: i64) -> Self {
        Row {
            rank,
            name: truncate_name(&r.name),
            members: if r.members { "P2P" } else { "F2P" },
            high_alch: format_gp(r.high_alch),
            buy: format_gp(r.buy),
            sell: r.sell.map(format_gp).unwrap_or_else(|| "-".to_string()),
            profit: format_gp(r.profit),
            limit: format_limit(r.buy_limit),
            batch: format_gp(r.batch_profit),
            age: price_age(r.price_time, now),
        }
    }
}

/// Render the top `top` rows plus the summary. `now` is unix seconds.
pub fn render(report: &AlchReport, top: usize, now: i64) -> String {
    let rows: Vec<Row> = report
        .records
        .iter()
        .take(top)
        .enumerate()
        .map(|(i, r)| Row::new(i + 1, r, now))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..9)).with(Alignment::right()));

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&summary(report, top));
    out
}

fn summary(report: &AlchReport, top: usize) -> String {
    let stats = build_stats(&report.records);
    let mut out = String::new();

    out.push('\n');
    out.push_str("Summary\n");
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&key_value(
        "Profitable items",
        format!("{} (showing {})", stats.count, stats.count.min(top)),
    ));
    out.push_str(&key_value("Nature rune cost", format!("{} gp", report.reagent_cost)));

    if let Some(best) = report.records.first() {
        let each = format!("{} ({} gp each)", best.name, format_gp(best.profit));
        out.push_str(&key_value("Top profit", each));
    }
    if let Some(best) = best_batch(&report.records) {
        let batch = format!("{} ({} gp per limit)", best.name, format_gp(best.batch_profit));
        out.push_str(&key_value("Top batch profit", batch));
    }

    out.push_str(&key_value("Mean profit", format!("{:.0} gp", stats.mean_profit)));
    out.push_str(&key_value("Median profit", format!("{:.0} gp", stats.median_profit)));
    out
}

fn key_value(label: &str, value: impl Display) -> String {
    format!("{label:<18} {value}\n")
}

pub fn format_gp(value: i64) -> String {
    let value = value as f64;
    if value >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let kept: String = name.chars().take(NAME_KEEP).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

pub fn format_limit(limit: Option<i64>) -> String {
    match limit {
        Some(l) => group_thousands(l),
        None => "∞".to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Table cell for the price age, e.g. `fresh (3m ago)`.
pub fn price_age(timestamp: Option<i64>, now: i64) -> String {
    match timestamp {
        Some(_) => format!("{} ({})", freshness(timestamp, now), age(timestamp, now)),
        None => "unknown".to_string(),
    }
}

pub fn freshness(timestamp: Option<i64>, now: i64) -> &'static str {
    let Some(ts) = timestamp else {
        return "unknown";
    };
    let elapsed = (now - ts).max(0);
    if elapsed < 10 * 60 {
        "fresh"
    } else if elapsed < 30 * 60 {
        "stale"
    } else {
        "old"
    }
}

pub fn age(timestamp: Option<i64>, now: i64) -> String {
    let Some(ts) = timestamp else {
        return "unknown".to_string();
    };
    let elapsed = (now - ts).max(0);
    if elapsed < 60 {
        "just now".to_string()
    } else if elapsed < 3_600 {
        format!("{}m ago", elapsed / 60)
    } else if elapsed < 86_400 {
        format!("{}h ago", elapsed / 3_600)
    } else {
        format!("{}d ago", elapsed / 86_400)
    }
}
