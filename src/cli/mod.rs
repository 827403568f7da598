mod horoscope;
mod listing;
mod rankings;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::services::{Settings, SettingsOverrides};

pub use horoscope::HoroscopeArgs;
pub use rankings::RankingsArgs;

/// Daily horoscopes and sign rankings
#[derive(Parser)]
#[command(name = "aistrolog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory with content files [default: ~/.aistrolog/data]
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Backend base URL consulted when local data is missing
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    /// Backend request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a sign's daily horoscope, falling back to earlier dates
    Horoscope(HoroscopeArgs),

    /// Show sign rankings per category
    Rankings(RankingsArgs),

    /// List the zodiac signs
    Signs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List dates with local content
    Dates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let overrides = SettingsOverrides {
            data_dir: self.data_dir,
            backend_url: self.backend_url,
            max_lookback_days: None,
            timeout_secs: self.timeout,
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Horoscope(args) => {
                let overrides = SettingsOverrides {
                    max_lookback_days: args.max_days,
                    ..overrides
                };
                args.run(&Settings::load(overrides)?, &mut out)?;
            }
            Commands::Rankings(args) => {
                args.run(&Settings::load(overrides)?, &mut out)?;
            }
            Commands::Signs { json } => {
                listing::write_signs(&mut out, json)?;
            }
            Commands::Dates { json } => {
                listing::write_dates(&Settings::load(overrides)?, &mut out, json)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
