//! `aistrolog signs` and `aistrolog dates`

use std::io::Write;

use serde_json::json;

use crate::services::dates::format_display_date;
use crate::services::{LocalContentStore, Settings};
use crate::types::Sign;

pub fn write_signs(out: &mut impl Write, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let signs: Vec<_> = Sign::ALL
            .iter()
            .map(|s| {
                json!({
                    "slug": s.slug(),
                    "name": s.display_name(),
                    "symbol": s.symbol(),
                    "date_range": s.date_range(),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &json!({ "signs": signs }))?;
        writeln!(out)?;
        return Ok(());
    }

    for sign in Sign::ALL {
        writeln!(
            out,
            "{} {:<8} {:<8} {}",
            sign.symbol(),
            sign.slug(),
            sign.display_name(),
            sign.date_range()
        )?;
    }
    Ok(())
}

pub fn write_dates(settings: &Settings, out: &mut impl Write, as_json: bool) -> anyhow::Result<()> {
    let dates = LocalContentStore::new(settings.data_dir.clone()).available_dates();
    let summarized: Vec<String> = dates.summarized.into_iter().map(format_display_date).collect();
    let rankings: Vec<String> = dates.rankings.into_iter().map(format_display_date).collect();

    if as_json {
        let value = json!({ "summarized": summarized, "rankings": rankings });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Horoscope dates ({}):", summarized.len())?;
    for date in &summarized {
        writeln!(out, "  {}", date)?;
    }
    writeln!(out, "Ranking dates ({}):", rankings.len())?;
    for date in &rankings {
        writeln!(out, "  {}", date)?;
    }
    Ok(())
}
