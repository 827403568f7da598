//! Horoscope resolver with date fallback
//!
//! Looks up a sign's content for a requested date and, when that date
//! has nothing, walks backward one day at a time until a date with
//! content turns up or the lookback budget runs out.

use chrono::{Days, NaiveDate};

use crate::services::dates::parse_display_date;
use crate::services::local_store::LocalContentStore;
use crate::services::remote::RemoteApi;
use crate::services::settings::Settings;
use crate::types::{AistrologError, HoroscopeData, ResolvedHoroscope, Result, Sign};

/// Default number of days tried, counting the requested date itself
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 7;

/// Trait for one stage of the single-date lookup chain
pub trait HoroscopeSource: Send + Sync {
    /// Source name (e.g., "local")
    fn name(&self) -> &str;

    /// Content for `sign` on exactly `date`.
    ///
    /// `None` covers every kind of miss; failures are absorbed here.
    fn lookup(&self, sign: Sign, date: NaiveDate) -> Option<HoroscopeData>;
}

/// Resolves horoscope content through an ordered chain of sources
pub struct HoroscopeResolver {
    sources: Vec<Box<dyn HoroscopeSource>>,
}

impl HoroscopeResolver {
    /// Create a resolver that asks `sources` in order
    pub fn new(sources: Vec<Box<dyn HoroscopeSource>>) -> Self {
        Self { sources }
    }

    /// Local store first, then the backend when one is configured
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut sources: Vec<Box<dyn HoroscopeSource>> =
            vec![Box::new(LocalContentStore::new(settings.data_dir.clone()))];
        if let Some(url) = &settings.backend_url {
            sources.push(Box::new(RemoteApi::new(url, settings.request_timeout)?));
        }
        Ok(Self::new(sources))
    }

    /// Get all configured sources
    pub fn sources(&self) -> &[Box<dyn HoroscopeSource>] {
        &self.sources
    }

    /// Resolve `sign_slug` on `date` (`DD-MM-YYYY`), trying at most
    /// `max_lookback_days` dates starting with `date` itself.
    ///
    /// `Ok(None)` means no date in range had content. Only an unknown
    /// slug or a malformed date is an error.
    pub fn resolve(
        &self,
        sign_slug: &str,
        date: &str,
        max_lookback_days: u32,
    ) -> Result<Option<ResolvedHoroscope>> {
        let sign = Sign::from_slug(sign_slug)
            .ok_or_else(|| AistrologError::UnknownSign(sign_slug.to_string()))?;
        let requested_date = parse_display_date(date)?;
        Ok(self.resolve_date(sign, requested_date, max_lookback_days))
    }

    /// Lookback walk over typed inputs
    pub fn resolve_date(
        &self,
        sign: Sign,
        requested_date: NaiveDate,
        max_lookback_days: u32,
    ) -> Option<ResolvedHoroscope> {
        for offset in 0..max_lookback_days {
            let candidate = requested_date.checked_sub_days(Days::new(u64::from(offset)))?;
            if let Some(content) = self.lookup_single(sign, candidate) {
                return Some(ResolvedHoroscope {
                    sign,
                    content,
                    requested_date,
                    actual_date: candidate,
                });
            }
        }

        tracing::debug!(
            sign = sign.slug(),
            %requested_date,
            max_lookback_days,
            "no content within lookback window"
        );
        None
    }

    /// First source with content for exactly `date` wins
    fn lookup_single(&self, sign: Sign, date: NaiveDate) -> Option<HoroscopeData> {
        self.sources.iter().find_map(|source| {
            let data = source.lookup(sign, date);
            if data.is_some() {
                tracing::debug!(source = source.name(), sign = sign.slug(), %date, "content found");
            }
            data
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<(String, NaiveDate)>>>;

    struct FakeSource {
        name: String,
        data: HashMap<(Sign, NaiveDate), HoroscopeData>,
        calls: CallLog,
    }

    impl FakeSource {
        fn new(name: &str, calls: &CallLog) -> Self {
            Self {
                name: name.to_string(),
                data: HashMap::new(),
                calls: Arc::clone(calls),
            }
        }

        fn with(mut self, sign: Sign, date: NaiveDate, general: &str) -> Self {
            self.data.insert(
                (sign, date),
                HoroscopeData {
                    general: general.to_string(),
                    ..Default::default()
                },
            );
            self
        }
    }

    impl HoroscopeSource for FakeSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn lookup(&self, sign: Sign, date: NaiveDate) -> Option<HoroscopeData> {
            self.calls.lock().unwrap().push((self.name.clone(), date));
            self.data.get(&(sign, date)).cloned()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_log() -> CallLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    // ========== input validation ==========

    #[test]
    fn test_unknown_sign_is_error() {
        let resolver = HoroscopeResolver::new(Vec::new());
        let err = resolver.resolve("ophiuchus", "15-01-2025", 7).unwrap_err();
        assert!(matches!(err, AistrologError::UnknownSign(s) if s == "ophiuchus"));
    }

    #[test]
    fn test_unknown_sign_checked_before_any_lookup() {
        let calls = new_log();
        let resolver = HoroscopeResolver::new(vec![Box::new(FakeSource::new("local", &calls))]);
        assert!(resolver.resolve("nope", "15-01-2025", 7).is_err());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_date_is_error() {
        let resolver = HoroscopeResolver::new(Vec::new());
        let err = resolver.resolve("koc", "2025-01-15", 7).unwrap_err();
        assert!(matches!(err, AistrologError::InvalidDate(_)));
    }

    // ========== lookback walk ==========

    #[test]
    fn test_exact_date_hit_at_offset_zero() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 15), "today");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        let resolved = resolver.resolve("koc", "15-01-2025", 7).unwrap().unwrap();

        assert_eq!(resolved.actual_date, ymd(2025, 1, 15));
        assert_eq!(resolved.requested_date, ymd(2025, 1, 15));
        assert_eq!(resolved.content.general, "today");
        assert_eq!(resolved.offset_days(), 0);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_falls_back_to_most_recent_earlier_date() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls)
            .with(Sign::Koc, ymd(2025, 1, 13), "two days ago")
            .with(Sign::Koc, ymd(2025, 1, 10), "older");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        let resolved = resolver.resolve("koc", "15-01-2025", 7).unwrap().unwrap();

        assert_eq!(resolved.actual_date, ymd(2025, 1, 13));
        assert_eq!(resolved.content.general, "two days ago");
        // 15, 14, 13 then stop
        let dates: Vec<NaiveDate> = calls.lock().unwrap().iter().map(|(_, d)| *d).collect();
        assert_eq!(dates, vec![ymd(2025, 1, 15), ymd(2025, 1, 14), ymd(2025, 1, 13)]);
    }

    #[test]
    fn test_other_sign_data_is_ignored() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls).with(Sign::Boga, ymd(2025, 1, 15), "x");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        assert!(resolver.resolve("koc", "15-01-2025", 7).unwrap().is_none());
    }

    #[test]
    fn test_not_found_after_budget_exhausted() {
        let calls = new_log();
        // Data exactly max_lookback_days back is outside the window
        let source = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 8), "too old");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        let result = resolver.resolve("koc", "15-01-2025", 7).unwrap();

        assert!(result.is_none());
        assert_eq!(calls.lock().unwrap().len(), 7);
    }

    #[test]
    fn test_last_day_in_window_is_tried() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 9), "edge");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        let resolved = resolver.resolve("koc", "15-01-2025", 7).unwrap().unwrap();
        assert_eq!(resolved.offset_days(), 6);
    }

    #[test]
    fn test_zero_lookback_tries_nothing() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 15), "x");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        assert!(resolver.resolve("koc", "15-01-2025", 0).unwrap().is_none());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_walk_crosses_month_and_year_boundary() {
        let calls = new_log();
        let source = FakeSource::new("local", &calls).with(Sign::Yay, ymd(2024, 12, 30), "nye");
        let resolver = HoroscopeResolver::new(vec![Box::new(source)]);

        let resolved = resolver.resolve("yay", "02-01-2025", 7).unwrap().unwrap();
        assert_eq!(resolved.actual_date, ymd(2024, 12, 30));
    }

    // ========== source chain ==========

    #[test]
    fn test_second_source_consulted_per_date_before_walking_back() {
        let calls = new_log();
        let local = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 14), "local");
        let remote = FakeSource::new("remote", &calls).with(Sign::Koc, ymd(2025, 1, 15), "remote");
        let resolver = HoroscopeResolver::new(vec![Box::new(local), Box::new(remote)]);

        let resolved = resolver.resolve("koc", "15-01-2025", 7).unwrap().unwrap();

        assert_eq!(resolved.content.general, "remote");
        assert_eq!(resolved.actual_date, ymd(2025, 1, 15));
        let names: Vec<String> = calls.lock().unwrap().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, vec!["local", "remote"]);
    }

    #[test]
    fn test_local_hit_skips_remote() {
        let calls = new_log();
        let local = FakeSource::new("local", &calls).with(Sign::Koc, ymd(2025, 1, 15), "local");
        let remote = FakeSource::new("remote", &calls).with(Sign::Koc, ymd(2025, 1, 15), "remote");
        let resolver = HoroscopeResolver::new(vec![Box::new(local), Box::new(remote)]);

        let resolved = resolver.resolve("koc", "15-01-2025", 7).unwrap().unwrap();

        assert_eq!(resolved.content.general, "local");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_from_settings_without_backend_has_only_local() {
        let settings = Settings::new(std::path::PathBuf::from("/nonexistent"));
        let resolver = HoroscopeResolver::from_settings(&settings).unwrap();
        assert_eq!(resolver.sources().len(), 1);
        assert_eq!(resolver.sources()[0].name(), "local");
    }
}
