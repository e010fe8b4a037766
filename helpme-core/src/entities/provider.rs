use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::gamification::{Badge, LevelProgress};
use super::{Listing, ServiceCategory};
use crate::geo::{Coordinate, Located};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    #[default]
    Available,
    Busy,
    Offline,
}

/// A person offering services on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: CompactString,
    pub name: String,
    pub avatar: String,
    pub rating: f64,
    pub reviews: u32,
    pub verified: bool,
    pub categories: SmallVec<[ServiceCategory; 2]>,
    /// Base rate for custom-length jobs.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub bio: String,
    pub location: Coordinate,
    #[serde(default)]
    pub status: ProviderStatus,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub completed_tasks: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl Provider {
    pub fn offers(&self, category: ServiceCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::new(self.level, self.xp, self.xp_to_next_level)
    }
}

impl Located for Provider {
    fn location(&self) -> Coordinate {
        self.location
    }
}

impl Listing for Provider {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_category(&self, category: ServiceCategory) -> bool {
        self.offers(category)
    }
}
