//! Ranking history and leaderboard types

use super::horoscope::null_as_empty;
use super::{AistrologError, Category, Sign};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One (sign, score) pair in a stored daily ranking list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRanking {
    /// Sign display name
    pub burc: String,
    pub score: f64,
}

/// The four ranked lists stored for one date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRankings {
    #[serde(default, rename = "genel_ranking", deserialize_with = "null_as_empty")]
    pub general: Vec<DailyRanking>,
    #[serde(default, rename = "aşk_ranking", deserialize_with = "null_as_empty")]
    pub love: Vec<DailyRanking>,
    #[serde(default, rename = "para_ranking", deserialize_with = "null_as_empty")]
    pub money: Vec<DailyRanking>,
    #[serde(default, rename = "sağlık_ranking", deserialize_with = "null_as_empty")]
    pub health: Vec<DailyRanking>,
}

impl CategoryRankings {
    pub fn get(&self, category: Category) -> &[DailyRanking] {
        match category {
            Category::General => &self.general,
            Category::Love => &self.love,
            Category::Money => &self.money,
            Category::Health => &self.health,
        }
    }
}

/// Score history: date key → rankings for that date
pub type RankingsHistory = BTreeMap<String, CategoryRankings>;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignRanking {
    /// Sign display name
    pub sign: String,
    #[serde(default)]
    pub slug: String,
    pub score: f64,
}

impl SignRanking {
    pub fn new(sign: Sign, score: f64) -> Self {
        Self {
            sign: sign.display_name().to_string(),
            slug: sign.slug().to_string(),
            score,
        }
    }
}

/// Four leaderboards, each sorted by score descending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingsData {
    #[serde(default)]
    pub general: Vec<SignRanking>,
    #[serde(default)]
    pub love: Vec<SignRanking>,
    #[serde(default)]
    pub money: Vec<SignRanking>,
    #[serde(default)]
    pub health: Vec<SignRanking>,
}

impl RankingsData {
    pub fn get(&self, category: Category) -> &[SignRanking] {
        match category {
            Category::General => &self.general,
            Category::Love => &self.love,
            Category::Money => &self.money,
            Category::Health => &self.health,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<SignRanking> {
        match category {
            Category::General => &mut self.general,
            Category::Love => &mut self.love,
            Category::Money => &mut self.money,
            Category::Health => &mut self.health,
        }
    }
}

/// Trailing period over which scores are averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankingWindow {
    #[default]
    Daily,
    Weekly,
    /// Also selected by the "yearly" label
    Monthly,
}

impl RankingWindow {
    /// Number of most recent dates included
    pub fn days(self) -> usize {
        match self {
            RankingWindow::Daily => 1,
            RankingWindow::Weekly => 7,
            RankingWindow::Monthly => 30,
        }
    }

    /// Label sent to the backend as the `period` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            RankingWindow::Daily => "daily",
            RankingWindow::Weekly => "weekly",
            RankingWindow::Monthly => "monthly",
        }
    }
}

impl fmt::Display for RankingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingWindow {
    type Err = AistrologError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RankingWindow::Daily),
            "weekly" => Ok(RankingWindow::Weekly),
            "monthly" | "yearly" => Ok(RankingWindow::Monthly),
            other => Err(AistrologError::Config(format!(
                "unknown ranking period '{}' (expected daily, weekly, monthly or yearly)",
                other
            ))),
        }
    }
}
