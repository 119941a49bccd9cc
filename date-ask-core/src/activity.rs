//! The closed set of date activities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the date is going to be. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityType {
    #[default]
    Coffee,
    #[serde(rename = "Casual walk")]
    CasualWalk,
    Dinner,
    Movie,
    Silent,
    Karaoke,
    #[serde(rename = "Street food crawl")]
    StreetFoodCrawl,
}

impl ActivityType {
    /// Every activity, in picker order.
    pub const ALL: [ActivityType; 7] = [
        ActivityType::Coffee,
        ActivityType::CasualWalk,
        ActivityType::Dinner,
        ActivityType::Movie,
        ActivityType::Silent,
        ActivityType::Karaoke,
        ActivityType::StreetFoodCrawl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Coffee => "Coffee",
            ActivityType::CasualWalk => "Casual walk",
            ActivityType::Dinner => "Dinner",
            ActivityType::Movie => "Movie",
            ActivityType::Silent => "Silent",
            ActivityType::Karaoke => "Karaoke",
            ActivityType::StreetFoodCrawl => "Street food crawl",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown activity '{}'", s))
    }
}
