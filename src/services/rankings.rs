//! Rankings aggregation over a trailing window of dates

use chrono::NaiveDate;

use crate::services::dates::parse_date_key;
use crate::services::local_store::LocalContentStore;
use crate::services::remote::RemoteApi;
use crate::services::settings::Settings;
use crate::types::{
    Category, CategoryRankings, Lookup, RankingWindow, RankingsData, RankingsHistory, Result,
    Sign, SignRanking,
};

/// Trait for one stage of the rankings lookup chain
pub trait RankingsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Leaderboards for `window`. `today` anchors sources that are
    /// queried by calendar date.
    fn rankings(&self, window: RankingWindow, today: NaiveDate) -> Lookup<RankingsData>;
}

/// Builds per-category leaderboards
pub struct RankingsAggregator {
    sources: Vec<Box<dyn RankingsSource>>,
}

impl RankingsAggregator {
    pub fn new(sources: Vec<Box<dyn RankingsSource>>) -> Self {
        Self { sources }
    }

    /// Local history first, then the backend when one is configured
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut sources: Vec<Box<dyn RankingsSource>> =
            vec![Box::new(LocalContentStore::new(settings.data_dir.clone()))];
        if let Some(url) = &settings.backend_url {
            sources.push(Box::new(RemoteApi::new(url, settings.request_timeout)?));
        }
        Ok(Self::new(sources))
    }

    pub fn sources(&self) -> &[Box<dyn RankingsSource>] {
        &self.sources
    }

    /// Walk the source chain. `None` means rankings are not available.
    pub fn fetch(&self, window: RankingWindow, today: NaiveDate) -> Option<RankingsData> {
        for source in &self.sources {
            match source.rankings(window, today) {
                Lookup::Found(data) => {
                    tracing::debug!(source = source.name(), %window, "rankings found");
                    return Some(data);
                }
                Lookup::Absent => {
                    tracing::debug!(source = source.name(), %window, "rankings source is empty");
                    return None;
                }
                Lookup::Unavailable => {
                    tracing::debug!(source = source.name(), %window, "rankings source unavailable");
                }
            }
        }
        None
    }

    /// Average each sign's scores over the most recent `window.days()`
    /// dates of `history` and rank them per category.
    ///
    /// Every category always lists all twelve signs. A sign with no
    /// scores in the window averages to 0. Averages are rounded to one
    /// decimal, half away from zero. Ties keep canonical sign order.
    /// Returns `None` when `history` holds no usable date.
    pub fn aggregate(window: RankingWindow, history: &RankingsHistory) -> Option<RankingsData> {
        let mut dates: Vec<(NaiveDate, &CategoryRankings)> = history
            .iter()
            .filter_map(|(key, rankings)| match parse_date_key(key) {
                Some(date) => Some((date, rankings)),
                None => {
                    tracing::warn!(key = %key, "skipping unparseable rankings date key");
                    None
                }
            })
            .collect();

        // Most recent first
        dates.sort_by(|a, b| b.0.cmp(&a.0));
        dates.truncate(window.days());

        if dates.is_empty() {
            return None;
        }

        let mut totals = [[ScoreTotal::default(); 4]; 12];
        for (_, rankings) in &dates {
            for (ci, category) in Category::ALL.into_iter().enumerate() {
                for item in rankings.get(category) {
                    match Sign::from_display_name(&item.burc) {
                        Some(sign) => totals[sign as usize][ci].add(item.score),
                        None => tracing::debug!(burc = %item.burc, "ignoring unknown sign name"),
                    }
                }
            }
        }

        let mut data = RankingsData::default();
        for (ci, category) in Category::ALL.into_iter().enumerate() {
            let mut rows: Vec<SignRanking> = Sign::ALL
                .into_iter()
                .map(|sign| SignRanking::new(sign, round_one_decimal(totals[sign as usize][ci].average())))
                .collect();
            // Stable sort keeps canonical order among ties
            rows.sort_by(|a, b| b.score.total_cmp(&a.score));
            *data.get_mut(category) = rows;
        }

        Some(data)
    }
}

/// Round to one decimal place, half away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, Default)]
struct ScoreTotal {
    sum: f64,
    count: u32,
}

impl ScoreTotal {
    fn add(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    fn average(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / f64::from(self.count)
        }
    }
}
