//! `aistrolog rankings` subcommand

use std::io::Write;

use chrono::Local;
use clap::Args;
use serde_json::json;

use crate::services::{RankingsAggregator, Settings};
use crate::types::{Category, RankingWindow, RankingsData};

/// Show sign rankings
#[derive(Args, Debug)]
pub struct RankingsArgs {
    /// Averaging window: daily, weekly, monthly (yearly = monthly)
    #[arg(long, short, default_value = "daily", value_name = "PERIOD")]
    pub period: RankingWindow,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl RankingsArgs {
    pub fn run(self, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
        let aggregator = RankingsAggregator::from_settings(settings)?;
        let rankings = aggregator.fetch(self.period, Local::now().date_naive());

        if self.json {
            let value = json!({
                "period": self.period.as_str(),
                "rankings": rankings,
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
            return Ok(());
        }

        match rankings {
            Some(data) => write_text(out, self.period, &data),
            None => {
                writeln!(out, "No ranking data available.")?;
                Ok(())
            }
        }
    }
}

fn write_text(out: &mut impl Write, period: RankingWindow, data: &RankingsData) -> anyhow::Result<()> {
    writeln!(out, "Rankings ({})", period)?;
    for category in Category::ALL {
        writeln!(out)?;
        writeln!(out, "{}", category.title().to_uppercase())?;
        for (i, row) in data.get(category).iter().enumerate() {
            writeln!(out, "{:>3}. {:<10} {:>5.1}", i + 1, row.sign, row.score)?;
        }
    }
    Ok(())
}
