//! Provider levels, XP and badges.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeIcon {
    Trophy,
    Clock,
    Dog,
    Zap,
    Star,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: CompactString,
    pub name: String,
    pub description: String,
    pub icon: BadgeIcon,
}

/// Progress of a provider toward the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
}

impl LevelProgress {
    pub fn new(level: u32, xp: u32, xp_to_next_level: u32) -> Self {
        Self {
            level,
            xp,
            xp_to_next_level,
        }
    }

    /// Percentage toward the next level, in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        if self.xp_to_next_level == 0 {
            return 100.0;
        }
        (f64::from(self.xp) / f64::from(self.xp_to_next_level) * 100.0).clamp(0.0, 100.0)
    }

    pub fn xp_remaining(&self) -> u32 {
        self.xp_to_next_level.saturating_sub(self.xp)
    }
}
