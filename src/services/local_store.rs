//! File-backed content store
//!
//! One summarized content file per calendar date plus a single
//! rankings history file, all under one data directory:
//!
//! ```text
//! <data_dir>/summarized_processed_daily_raw_2025-01-13.json
//! <data_dir>/rankings_history.json
//! ```
//!
//! The store is read-only. A missing file is an ordinary miss; an
//! unreadable or malformed file is logged and also reported as a miss.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::services::dates::{format_store_key, parse_date_key};
use crate::services::rankings::{RankingsAggregator, RankingsSource};
use crate::services::resolver::HoroscopeSource;
use crate::types::{
    AistrologError, DailyContent, HoroscopeData, Lookup, RankingWindow, RankingsData,
    RankingsHistory, Result, Sign,
};

/// File name prefix of daily content files
pub const DAILY_FILE_PREFIX: &str = "summarized_processed_daily_raw_";

/// File name of the rankings history
pub const RANKINGS_HISTORY_FILE: &str = "rankings_history.json";

/// Dates with content available locally, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableDates {
    pub summarized: Vec<NaiveDate>,
    pub rankings: Vec<NaiveDate>,
}

pub struct LocalContentStore {
    data_dir: PathBuf,
}

impl LocalContentStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.json", DAILY_FILE_PREFIX, format_store_key(date)))
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(RANKINGS_HISTORY_FILE)
    }

    /// Load the content file for `date`
    pub fn load_daily(&self, date: NaiveDate) -> Option<DailyContent> {
        load_optional(&self.daily_path(date))
    }

    /// Load the full rankings history
    pub fn load_rankings_history(&self) -> Option<RankingsHistory> {
        load_optional(&self.history_path())
    }

    /// List content dates and ranking dates present in the store
    pub fn available_dates(&self) -> AvailableDates {
        let mut summarized: Vec<NaiveDate> = self
            .collect_daily_files()
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .filter_map(date_from_file_name)
            .collect();
        summarized.sort_unstable_by(|a, b| b.cmp(a));
        summarized.dedup();

        let mut rankings: Vec<NaiveDate> = self
            .load_rankings_history()
            .map(|history| {
                history
                    .keys()
                    .filter_map(|k| parse_date_key(k))
                    .collect()
            })
            .unwrap_or_default();
        rankings.sort_unstable_by(|a, b| b.cmp(a));
        rankings.dedup();

        AvailableDates {
            summarized,
            rankings,
        }
    }

    /// Collect all daily content files in the data directory
    fn collect_daily_files(&self) -> Vec<PathBuf> {
        let pattern = Path::new(&glob::Pattern::escape(&self.data_dir.to_string_lossy()))
            .join(format!("{}*.json", DAILY_FILE_PREFIX));
        glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default()
    }
}

impl HoroscopeSource for LocalContentStore {
    fn name(&self) -> &str {
        "local"
    }

    fn lookup(&self, sign: Sign, date: NaiveDate) -> Option<HoroscopeData> {
        let content = self.load_daily(date)?;
        let data = content.horoscope(sign);
        if data.is_none() {
            tracing::debug!(%date, sign = sign.slug(), "content file has no entry for sign");
        }
        data
    }
}

impl RankingsSource for LocalContentStore {
    fn name(&self) -> &str {
        "local"
    }

    fn rankings(&self, window: RankingWindow, _today: NaiveDate) -> Lookup<RankingsData> {
        match self.load_rankings_history() {
            Some(history) => match RankingsAggregator::aggregate(window, &history) {
                Some(data) => Lookup::Found(data),
                None => Lookup::Absent,
            },
            None => Lookup::Unavailable,
        }
    }
}

/// Read and parse a JSON file, logging and absorbing every failure
fn load_optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "content file not found");
        return None;
    }
    match read_json(path) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load content file");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut bytes = fs::read(path)?;
    simd_json::from_slice(&mut bytes).map_err(|e| AistrologError::Parse(e.to_string()))
}

/// Extract the date from a daily content file name
fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^summarized_processed_daily_raw_(\d{4}-\d{2}-\d{2})\.json$")
            .expect("valid regex")
    });
    let caps = re.captures(name)?;
    parse_date_key(caps.get(1)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (LocalContentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalContentStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn write_daily(store: &LocalContentStore, date: NaiveDate, json: &str) {
        fs::write(store.daily_path(date), json).unwrap();
    }

    // ========== paths ==========

    #[test]
    fn test_daily_path_uses_store_key() {
        let store = LocalContentStore::new(PathBuf::from("/data"));
        assert_eq!(
            store.daily_path(ymd(2025, 1, 5)),
            PathBuf::from("/data/summarized_processed_daily_raw_2025-01-05.json")
        );
        assert_eq!(
            store.history_path(),
            PathBuf::from("/data/rankings_history.json")
        );
    }

    // ========== load_daily / lookup ==========

    #[test]
    fn test_lookup_hit() {
        let (store, _temp) = create_test_store();
        write_daily(
            &store,
            ymd(2025, 1, 13),
            r#"{"Koç": {"genel": "g", "aşk": "a", "para": "p", "sağlık": "s"}}"#,
        );

        let data = HoroscopeSource::lookup(&store, Sign::Koc, ymd(2025, 1, 13)).unwrap();
        assert_eq!(data.general, "g");
        assert_eq!(data.health, "s");
    }

    #[test]
    fn test_lookup_missing_file() {
        let (store, _temp) = create_test_store();
        assert!(HoroscopeSource::lookup(&store, Sign::Koc, ymd(2025, 1, 13)).is_none());
    }

    #[test]
    fn test_lookup_sign_not_in_file() {
        let (store, _temp) = create_test_store();
        write_daily(&store, ymd(2025, 1, 13), r#"{"Boğa": {"genel": "g"}}"#);
        assert!(HoroscopeSource::lookup(&store, Sign::Koc, ymd(2025, 1, 13)).is_none());
    }

    #[test]
    fn test_lookup_corrupt_file_is_miss() {
        let (store, _temp) = create_test_store();
        write_daily(&store, ymd(2025, 1, 13), "not valid json{{{");
        assert!(store.load_daily(ymd(2025, 1, 13)).is_none());
    }

    // ========== load_rankings_history ==========

    #[test]
    fn test_load_rankings_history() {
        let (store, _temp) = create_test_store();
        fs::write(
            store.history_path(),
            r#"{"2025-01-01": {"genel_ranking": [{"burc": "Koç", "score": 80}]}}"#,
        )
        .unwrap();

        let history = store.load_rankings_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history["2025-01-01"].general[0].burc, "Koç");
    }

    #[test]
    fn test_rankings_source_outcomes() {
        let (store, _temp) = create_test_store();
        let today = ymd(2025, 1, 1);

        assert_eq!(
            RankingsSource::rankings(&store, RankingWindow::Daily, today),
            Lookup::Unavailable
        );

        fs::write(store.history_path(), "{}").unwrap();
        assert_eq!(
            RankingsSource::rankings(&store, RankingWindow::Daily, today),
            Lookup::Absent
        );

        fs::write(
            store.history_path(),
            r#"{"2025-01-01": {"genel_ranking": [{"burc": "Koç", "score": 80}]}}"#,
        )
        .unwrap();
        assert!(matches!(
            RankingsSource::rankings(&store, RankingWindow::Daily, today),
            Lookup::Found(_)
        ));
    }

    #[test]
    fn test_rankings_null_category_list_still_found() {
        let (store, _temp) = create_test_store();
        fs::write(
            store.history_path(),
            r#"{"2025-01-01": {"genel_ranking": [{"burc": "Koç", "score": 80}], "aşk_ranking": null}}"#,
        )
        .unwrap();

        match RankingsSource::rankings(&store, RankingWindow::Daily, ymd(2025, 1, 1)) {
            Lookup::Found(data) => {
                assert_eq!(data.general[0].slug, "koc");
                assert_eq!(data.general[0].score, 80.0);
                assert_eq!(data.love.len(), 12);
                assert!(data.love.iter().all(|row| row.score == 0.0));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    // ========== available_dates ==========

    #[test]
    fn test_available_dates_sorted_most_recent_first() {
        let (store, _temp) = create_test_store();
        write_daily(&store, ymd(2025, 1, 10), "{}");
        write_daily(&store, ymd(2025, 1, 12), "{}");
        write_daily(&store, ymd(2024, 12, 31), "{}");
        fs::write(store.data_dir().join("unrelated.json"), "{}").unwrap();
        fs::write(
            store.history_path(),
            r#"{"2025-01-01": {}, "2025-01-03": {}, "bogus": {}}"#,
        )
        .unwrap();

        let dates = store.available_dates();

        assert_eq!(
            dates.summarized,
            vec![ymd(2025, 1, 12), ymd(2025, 1, 10), ymd(2024, 12, 31)]
        );
        assert_eq!(dates.rankings, vec![ymd(2025, 1, 3), ymd(2025, 1, 1)]);
    }

    #[test]
    fn test_available_dates_empty_dir() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.available_dates(), AvailableDates::default());
    }

    #[test]
    fn test_date_from_file_name() {
        assert_eq!(
            date_from_file_name("summarized_processed_daily_raw_2025-02-28.json"),
            Some(ymd(2025, 2, 28))
        );
        assert_eq!(
            date_from_file_name("summarized_processed_daily_raw_2025-02-30.json"),
            None
        );
        assert_eq!(date_from_file_name("processed_daily_raw_2025-02-28.json"), None);
    }
}
