use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use taskrank_core::{DEFAULT_SUGGESTION_LIMIT, Profile};

use crate::state::ensure_taskrank_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub suggest: SuggestSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSection {
    #[serde(default)]
    pub default_profile: Profile,
    /// IANA zone used to decide what "today" is.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestSection {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            default_profile: Profile::default(),
            timezone: default_timezone(),
        }
    }
}

impl Default for SuggestSection {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_taskrank_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config(
            "[scoring]\ndefault_profile = \"deadline_driven\"\ntimezone = \"America/Chicago\"\n",
        )
        .unwrap();
        assert_eq!(cfg.scoring.default_profile, Profile::DeadlineDriven);
        assert_eq!(cfg.scoring.timezone, "America/Chicago");
        assert_eq!(cfg.suggest.limit, 3);
    }

    #[test]
    fn test_section_without_every_key() {
        let toml = "[scoring]\ndefault_profile = \"high_impact\"\n[suggest]\n";
        let cfg = parse_config(toml).unwrap();
        assert_eq!(cfg.scoring.default_profile, Profile::HighImpact);
        assert_eq!(cfg.scoring.timezone, "UTC");
        assert_eq!(cfg.suggest.limit, 3);

        let cfg = parse_config("[scoring]\ntimezone = \"Europe/Berlin\"\n").unwrap();
        assert_eq!(cfg.scoring.default_profile, Profile::SmartBalance);
    }

    #[test]
    fn test_unknown_profile_in_config_fails() {
        assert!(parse_config("[scoring]\ndefault_profile = \"turbo\"\n").is_err());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(s.contains("default_profile = \"smart_balance\""));
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }
}
