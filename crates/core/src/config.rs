//! Game configuration loaded from disk and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::{error::GameError, history::DEFAULT_WINDOW, models::Money};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "ponzi";
/// Prefix for environment overrides such as `PONZI_SEED`.
pub const ENV_PREFIX: &str = "PONZI";

const DEFAULT_CONFIG: &str = r#"# Ponzi operator settings.
# Every value may be overridden from the environment, e.g. PONZI_SEED=42
# or PONZI_ODDS__ARRIVAL=80.

# Starting funds of the organizer; profit is measured against this.
organizer_funds = 1000

# Entries shown in the per-round action history.
history_len = 10

# Fixed seed for a reproducible run. Leave unset for a fresh game each time.
# seed = 42

# Also end the game once no active participant remains.
end_when_no_active = false

# Pay referral bonuses out of the treasury instead of minting them.
bonus_from_treasury = false

[odds]
arrival = 60
invitation = 30
special_event = 25
anger_on_decline = 40
anger_on_refusal = 60
"#;

/// Percent chances for every probability gate of a round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Odds {
    /// A newcomer joins at the start of the round.
    pub arrival: u8,
    /// An active participant proposes an invitation.
    pub invitation: u8,
    /// A special event fires at the end of the round.
    pub special_event: u8,
    /// A refused payout demand turns the participant angry.
    pub anger_on_decline: u8,
    /// A refused refund during a crisis turns the participant angry.
    pub anger_on_refusal: u8,
}

impl Default for Odds {
    fn default() -> Self {
        Self {
            arrival: 60,
            invitation: 30,
            special_event: 25,
            anger_on_decline: 40,
            anger_on_refusal: 60,
        }
    }
}

/// Tunables for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Organizer's starting funds.
    pub organizer_funds: i64,
    /// Entries kept in the recent history view.
    pub history_len: usize,
    /// Seed for the decision source.
    pub seed: Option<u64>,
    /// End the game when nobody is active, on top of an empty treasury.
    pub end_when_no_active: bool,
    /// Draw referral bonuses from the treasury.
    pub bonus_from_treasury: bool,
    /// Probability gates.
    pub odds: Odds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            organizer_funds: 1000,
            history_len: DEFAULT_WINDOW,
            seed: None,
            end_when_no_active: false,
            bonus_from_treasury: false,
            odds: Odds::default(),
        }
    }
}

impl GameConfig {
    /// Load from the default path, falling back to defaults when missing.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Layer the file at `path` (optional) and `PONZI_*` variables over the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config: GameConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), GameError> {
        let odds = [
            ("arrival", self.odds.arrival),
            ("invitation", self.odds.invitation),
            ("special_event", self.odds.special_event),
            ("anger_on_decline", self.odds.anger_on_decline),
            ("anger_on_refusal", self.odds.anger_on_refusal),
        ];
        if let Some((name, value)) = odds.iter().find(|(_, value)| *value > 100) {
            return Err(GameError::InvalidConfig(format!(
                "odds.{name} is {value}, expected 0..=100"
            )));
        }
        if self.history_len == 0 {
            return Err(GameError::InvalidConfig(
                "history_len is 0, expected at least one entry".to_string(),
            ));
        }
        if self.organizer_funds < 0 {
            return Err(GameError::InvalidConfig(format!(
                "organizer_funds is {}, expected a non-negative amount",
                self.organizer_funds
            )));
        }
        Ok(())
    }

    /// Organizer funds as money.
    pub fn organizer_money(&self) -> Money {
        Money::from(self.organizer_funds)
    }
}

/// Default location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default file when none exists yet and return its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Same as [`ensure_default_config`] for an explicit path.
pub fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Default configuration written");
    Ok(())
}
