use std::fmt;
use std::str::FromStr;

use crate::errors::TrackerError;

/// Games a pilot can take jobs for.
///
/// Only Call of Duty: Mobile has a rank ladder and price table. The second
/// title is listed so it can be chosen, but every pricing operation on it
/// reports `UnsupportedGame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    CallOfDutyMobile,
    MobileLegends,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::CallOfDutyMobile, Game::MobileLegends];

    /// Short identifier used in storage keys (`prices:{user}:{slug}`)
    pub fn slug(self) -> &'static str {
        match self {
            Game::CallOfDutyMobile => "codm",
            Game::MobileLegends => "mlbb",
        }
    }

    /// Name stored under `session:game`
    pub fn display_name(self) -> &'static str {
        match self {
            Game::CallOfDutyMobile => "Call of Duty: Mobile",
            Game::MobileLegends => "Mobile Legends: Bang Bang",
        }
    }

    pub fn has_ladder(self) -> bool {
        matches!(self, Game::CallOfDutyMobile)
    }

    pub fn from_display_name(name: &str) -> Option<Game> {
        Self::ALL.into_iter().find(|game| game.display_name() == name)
    }

    pub fn from_slug(slug: &str) -> Option<Game> {
        Self::ALL.into_iter().find(|game| game.slug() == slug)
    }

    /// Fails with `UnsupportedGame` unless the game has a rank ladder
    pub fn require_ladder(self) -> Result<Self, TrackerError> {
        if self.has_ladder() {
            Ok(self)
        } else {
            Err(TrackerError::UnsupportedGame(self.display_name().to_string()))
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Game {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Game::from_slug(&trimmed.to_lowercase())
            .or_else(|| Game::from_display_name(trimmed))
            .ok_or_else(|| TrackerError::invalid(format!("unknown game: {trimmed}")))
    }
}
