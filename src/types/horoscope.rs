//! Daily horoscope content types

use super::{Category, Sign};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Treat JSON `null` the same as a missing field
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Four category texts for one sign on one date.
///
/// Also the shape of the backend's `horoscope` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub general: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub love: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub money: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub health: String,
}

impl HoroscopeData {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::General => &self.general,
            Category::Love => &self.love,
            Category::Money => &self.money,
            Category::Health => &self.health,
        }
    }
}

/// One sign's record inside a daily content file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DailyEntry {
    #[serde(default, rename = "genel")]
    pub general: Option<String>,
    #[serde(default, rename = "aşk")]
    pub love: Option<String>,
    #[serde(default, rename = "para")]
    pub money: Option<String>,
    #[serde(default, rename = "sağlık")]
    pub health: Option<String>,
}

impl From<DailyEntry> for HoroscopeData {
    fn from(entry: DailyEntry) -> Self {
        Self {
            general: entry.general.unwrap_or_default(),
            love: entry.love.unwrap_or_default(),
            money: entry.money.unwrap_or_default(),
            health: entry.health.unwrap_or_default(),
        }
    }
}

/// A full daily content file: sign display name → entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DailyContent {
    pub entries: HashMap<String, DailyEntry>,
}

impl DailyContent {
    /// Category texts for `sign`, if the file has an entry for it
    pub fn horoscope(&self, sign: Sign) -> Option<HoroscopeData> {
        self.entries
            .get(sign.display_name())
            .cloned()
            .map(HoroscopeData::from)
    }
}

/// Result of a successful lookback walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHoroscope {
    pub sign: Sign,
    pub content: HoroscopeData,
    pub requested_date: NaiveDate,
    /// Date whose content was found (equal to or before `requested_date`)
    pub actual_date: NaiveDate,
}

impl ResolvedHoroscope {
    /// Days walked back from the requested date
    pub fn offset_days(&self) -> i64 {
        (self.requested_date - self.actual_date).num_days()
    }
}
