//! Player profile persistence.
//!
//! Profiles are versioned JSON on disk: the chosen display name plus a
//! running win/loss tally. Loading rejects files written by an
//! incompatible version instead of misreading them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::engine::MatchOutcome;

/// Bumped whenever the on-disk layout changes shape.
pub const PROFILE_VERSION: u32 = 1;

/// Fallback display name when none has been entered.
pub const DEFAULT_NAME: &str = "Player";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profile version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// A persisted player identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub version: u32,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PROFILE_VERSION,
            name: name.into(),
            wins: 0,
            losses: 0,
        }
    }

    /// Store a name with surrounding whitespace removed.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
    }

    /// True once a non-empty name has been entered.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The name to show, falling back to [`DEFAULT_NAME`] when unset.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_NAME
        } else {
            trimmed
        }
    }

    /// Fold a finished match into the tally.
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::PlayerWon => self.wins += 1,
            MatchOutcome::CpuWon => self.losses += 1,
        }
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProfileError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let json = fs::read_to_string(path)?;
        let profile: Profile = serde_json::from_str(&json)?;
        if profile.version != PROFILE_VERSION {
            return Err(ProfileError::VersionMismatch {
                expected: PROFILE_VERSION,
                found: profile.version,
            });
        }
        Ok(profile)
    }

    /// Load a profile, falling back to the default when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");

        let mut profile = Profile::new("Aria");
        profile.record(MatchOutcome::PlayerWon);
        profile.record(MatchOutcome::CpuWon);
        profile.record(MatchOutcome::PlayerWon);
        profile.save(&path).unwrap();

        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.wins, 2);
        assert_eq!(loaded.losses, 1);
        assert_eq!(loaded.matches_played(), 3);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");

        let mut profile = Profile::new("Aria");
        profile.version = 99;
        fs::write(&path, serde_json::to_string(&profile).unwrap()).unwrap();

        match Profile::load(&path) {
            Err(ProfileError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, PROFILE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected a version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let profile = Profile::load_or_default(dir.path().join("nope.json"));
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.display_name(), "Player");
    }

    #[test]
    fn test_display_name_falls_back_when_blank() {
        let mut profile = Profile::new("  ");
        assert!(!profile.has_name());
        assert_eq!(profile.display_name(), "Player");

        profile.set_name("  Kestrel  ");
        assert!(profile.has_name());
        assert_eq!(profile.name, "Kestrel");
        assert_eq!(profile.display_name(), "Kestrel");
    }
}
