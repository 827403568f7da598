//! Zodiac sign and content category tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve zodiac signs.
///
/// Variant order is the canonical order used everywhere a stable
/// iteration over signs is needed (ranking ties, listings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Koc,
    Boga,
    Ikizler,
    Yengec,
    Aslan,
    Basak,
    Terazi,
    Akrep,
    Yay,
    Oglak,
    Kova,
    Balik,
}

/// Static attributes of a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInfo {
    pub slug: &'static str,
    pub display_name: &'static str,
    pub symbol: &'static str,
    pub date_range: &'static str,
}

const SIGN_TABLE: [SignInfo; 12] = [
    SignInfo {
        slug: "koc",
        display_name: "Koç",
        symbol: "♈",
        date_range: "21 Mart - 19 Nisan",
    },
    SignInfo {
        slug: "boga",
        display_name: "Boğa",
        symbol: "♉",
        date_range: "20 Nisan - 20 Mayıs",
    },
    SignInfo {
        slug: "ikizler",
        display_name: "İkizler",
        symbol: "♊",
        date_range: "21 Mayıs - 20 Haziran",
    },
    SignInfo {
        slug: "yengec",
        display_name: "Yengeç",
        symbol: "♋",
        date_range: "21 Haziran - 22 Temmuz",
    },
    SignInfo {
        slug: "aslan",
        display_name: "Aslan",
        symbol: "♌",
        date_range: "23 Temmuz - 22 Ağustos",
    },
    SignInfo {
        slug: "basak",
        display_name: "Başak",
        symbol: "♍",
        date_range: "23 Ağustos - 22 Eylül",
    },
    SignInfo {
        slug: "terazi",
        display_name: "Terazi",
        symbol: "♎",
        date_range: "23 Eylül - 22 Ekim",
    },
    SignInfo {
        slug: "akrep",
        display_name: "Akrep",
        symbol: "♏",
        date_range: "23 Ekim - 21 Kasım",
    },
    SignInfo {
        slug: "yay",
        display_name: "Yay",
        symbol: "♐",
        date_range: "22 Kasım - 21 Aralık",
    },
    SignInfo {
        slug: "oglak",
        display_name: "Oğlak",
        symbol: "♑",
        date_range: "22 Aralık - 19 Ocak",
    },
    SignInfo {
        slug: "kova",
        display_name: "Kova",
        symbol: "♒",
        date_range: "20 Ocak - 18 Şubat",
    },
    SignInfo {
        slug: "balik",
        display_name: "Balık",
        symbol: "♓",
        date_range: "19 Şubat - 20 Mart",
    },
];

impl Sign {
    /// All signs in canonical order
    pub const ALL: [Sign; 12] = [
        Sign::Koc,
        Sign::Boga,
        Sign::Ikizler,
        Sign::Yengec,
        Sign::Aslan,
        Sign::Basak,
        Sign::Terazi,
        Sign::Akrep,
        Sign::Yay,
        Sign::Oglak,
        Sign::Kova,
        Sign::Balik,
    ];

    pub fn info(self) -> &'static SignInfo {
        &SIGN_TABLE[self as usize]
    }

    /// URL-safe identifier (e.g. "koc")
    pub fn slug(self) -> &'static str {
        self.info().slug
    }

    /// Name as it appears in content files (e.g. "Koç")
    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn date_range(self) -> &'static str {
        self.info().date_range
    }

    pub fn from_slug(slug: &str) -> Option<Sign> {
        Sign::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn from_display_name(name: &str) -> Option<Sign> {
        Sign::ALL.into_iter().find(|s| s.display_name() == name)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Content and scoring dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Love,
    Money,
    Health,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Love,
        Category::Money,
        Category::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Love => "love",
            Category::Money => "money",
            Category::Health => "health",
        }
    }

    /// Field key used by the content pipeline ("genel", "aşk", ...)
    pub fn source_key(self) -> &'static str {
        match self {
            Category::General => "genel",
            Category::Love => "aşk",
            Category::Money => "para",
            Category::Health => "sağlık",
        }
    }

    /// Section heading for text output
    pub fn title(self) -> &'static str {
        match self {
            Category::General => "Genel",
            Category::Love => "Aşk",
            Category::Money => "Para",
            Category::Health => "Sağlık",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
