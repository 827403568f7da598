//! `aistrolog horoscope` subcommand

use std::io::Write;

use chrono::Local;
use clap::Args;
use serde_json::json;

use crate::services::dates::format_display_date;
use crate::services::{HoroscopeResolver, Settings};
use crate::types::{Category, ResolvedHoroscope};

/// Show a sign's daily horoscope
#[derive(Args, Debug)]
pub struct HoroscopeArgs {
    /// Sign slug (e.g. koc, boga, ikizler)
    #[arg(value_name = "SIGN")]
    pub sign: String,

    /// Date as DD-MM-YYYY [default: today]
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Number of days to try, counting DATE itself
    #[arg(long, value_name = "N")]
    pub max_days: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HoroscopeArgs {
    pub fn run(self, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
        let date = self
            .date
            .clone()
            .unwrap_or_else(|| format_display_date(Local::now().date_naive()));

        let resolver = HoroscopeResolver::from_settings(settings)?;
        let resolved = resolver.resolve(&self.sign, &date, settings.max_lookback_days)?;

        if self.json {
            write_json(out, &self.sign, &date, resolved.as_ref())
        } else {
            match &resolved {
                Some(r) => write_text(out, r),
                None => {
                    writeln!(
                        out,
                        "No horoscope for {} within {} day(s) up to {}. Pick another date.",
                        self.sign, settings.max_lookback_days, date
                    )?;
                    Ok(())
                }
            }
        }
    }
}

fn write_text(out: &mut impl Write, resolved: &ResolvedHoroscope) -> anyhow::Result<()> {
    let sign = resolved.sign;
    writeln!(
        out,
        "{} {} ({})",
        sign.symbol(),
        sign.display_name(),
        sign.date_range()
    )?;

    let actual = format_display_date(resolved.actual_date);
    if resolved.offset_days() == 0 {
        writeln!(out, "{}", actual)?;
    } else {
        writeln!(
            out,
            "{} (no data for {}, showing the most recent earlier date)",
            actual,
            format_display_date(resolved.requested_date)
        )?;
    }

    for category in Category::ALL {
        writeln!(out)?;
        writeln!(out, "{}", category.title().to_uppercase())?;
        let text = resolved.content.get(category);
        if text.is_empty() {
            writeln!(out, "-")?;
        } else {
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    sign_slug: &str,
    requested: &str,
    resolved: Option<&ResolvedHoroscope>,
) -> anyhow::Result<()> {
    let value = match resolved {
        Some(r) => json!({
            "sign": r.sign.slug(),
            "name": r.sign.display_name(),
            "requested_date": format_display_date(r.requested_date),
            "actual_date": format_display_date(r.actual_date),
            "horoscope": r.content,
        }),
        None => json!({
            "sign": sign_slug,
            "requested_date": requested,
            "actual_date": null,
            "horoscope": null,
        }),
    };
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
