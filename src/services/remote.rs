//! Backend API client used as the last stage of both lookup chains
//!
//! Every request is bounded by a short timeout. Any failure (connect
//! error, timeout, non-success status, unexpected body) counts as a
//! miss for that one request and is never retried.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::services::dates::format_display_date;
use crate::services::rankings::RankingsSource;
use crate::services::resolver::HoroscopeSource;
use crate::types::{
    AistrologError, Category, HoroscopeData, Lookup, RankingWindow, RankingsData, Result, Sign,
};

/// HTTP request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 3;

/// `GET /api/gunluk/{sign}/{date}` response (minimal fields)
#[derive(Debug, Deserialize)]
struct HoroscopeResponse {
    horoscope: Option<HoroscopeData>,
}

/// `GET /api/rankings/{date}` response (minimal fields)
#[derive(Debug, Deserialize)]
struct RankingsResponse {
    rankings: Option<RankingsData>,
}

pub struct RemoteApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AistrologError::Http(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn horoscope_url(&self, sign: Sign, date: NaiveDate) -> String {
        format!(
            "{}/api/gunluk/{}/{}",
            self.base_url,
            sign.slug(),
            format_display_date(date)
        )
    }

    pub fn rankings_url(&self, window: RankingWindow, today: NaiveDate) -> String {
        format!(
            "{}/api/rankings/{}?period={}",
            self.base_url,
            format_display_date(today),
            window.as_str()
        )
    }

    /// Fetch one sign's content for one date
    pub fn fetch_horoscope(&self, sign: Sign, date: NaiveDate) -> Result<HoroscopeData> {
        let response: HoroscopeResponse = self.get_json(&self.horoscope_url(sign, date))?;
        response
            .horoscope
            .ok_or_else(|| AistrologError::Parse("response has no horoscope".into()))
    }

    /// Fetch leaderboards already aggregated by the backend
    pub fn fetch_rankings(&self, window: RankingWindow, today: NaiveDate) -> Result<RankingsData> {
        let response: RankingsResponse = self.get_json(&self.rankings_url(window, today))?;
        let mut rankings = response
            .rankings
            .ok_or_else(|| AistrologError::Parse("response has no rankings".into()))?;
        fill_missing_slugs(&mut rankings);
        Ok(rankings)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AistrologError::Http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AistrologError::Status(status.as_u16()));
        }

        response
            .json()
            .map_err(|e| AistrologError::Parse(format!("JSON parse error: {}", e)))
    }
}

impl HoroscopeSource for RemoteApi {
    fn name(&self) -> &str {
        "remote"
    }

    fn lookup(&self, sign: Sign, date: NaiveDate) -> Option<HoroscopeData> {
        match self.fetch_horoscope(sign, date) {
            Ok(data) => Some(data),
            Err(AistrologError::Status(status)) => {
                tracing::debug!(sign = sign.slug(), %date, status, "backend has no horoscope");
                None
            }
            Err(e) => {
                tracing::warn!(sign = sign.slug(), %date, error = %e, "backend horoscope lookup failed");
                None
            }
        }
    }
}

impl RankingsSource for RemoteApi {
    fn name(&self) -> &str {
        "remote"
    }

    fn rankings(&self, window: RankingWindow, today: NaiveDate) -> Lookup<RankingsData> {
        match self.fetch_rankings(window, today) {
            Ok(data) => Lookup::Found(data),
            Err(AistrologError::Status(status)) => {
                tracing::debug!(%window, status, "backend has no rankings");
                Lookup::Unavailable
            }
            Err(e) => {
                tracing::warn!(%window, error = %e, "backend rankings lookup failed");
                Lookup::Unavailable
            }
        }
    }
}

/// Derive slugs the backend left out from the sign display names
fn fill_missing_slugs(rankings: &mut RankingsData) {
    for category in Category::ALL {
        for row in rankings.get_mut(category) {
            if row.slug.is_empty() {
                if let Some(sign) = Sign::from_display_name(&row.sign) {
                    row.slug = sign.slug().to_string();
                }
            }
        }
    }
}
