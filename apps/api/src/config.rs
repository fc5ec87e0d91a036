use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::relevance::extractor::ExtractionMode;
use crate::relevance::scorer::{ScoringWeights, DEFAULT_MATCH_THRESHOLD};
use crate::relevance::verdict::VerdictScale;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset → in-memory JD store.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub extraction_mode: ExtractionMode,
    pub verdict_scale: VerdictScale,
    /// Fuzzy match threshold, 0–100.
    pub match_threshold: u8,
    pub weights: ScoringWeights,
    /// Resumes longer than this are rejected before fuzzy matching.
    pub max_resume_chars: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            extraction_mode: ExtractionMode::default(),
            verdict_scale: VerdictScale::default(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            weights: ScoringWeights::default(),
            max_resume_chars: 200_000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let match_threshold = parse_env("MATCH_THRESHOLD", defaults.match_threshold)?;
        if match_threshold > 100 {
            return Err(anyhow!("MATCH_THRESHOLD must be between 0 and 100"));
        }

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            extraction_mode: parse_env("EXTRACTION_MODE", defaults.extraction_mode)?,
            verdict_scale: parse_env("VERDICT_SCALE", defaults.verdict_scale)?,
            match_threshold,
            weights: ScoringWeights {
                skill: parse_env("SKILL_WEIGHT", defaults.weights.skill)?,
                secondary: parse_env("SECONDARY_WEIGHT", defaults.weights.secondary)?,
            },
            max_resume_chars: parse_env("MAX_RESUME_CHARS", defaults.max_resume_chars)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

/// Reads `key`, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.match_threshold, 70);
        assert_eq!(config.extraction_mode, ExtractionMode::ScopedThenGlobal);
        assert_eq!(config.verdict_scale, VerdictScale::Fine);
        assert_eq!(config.weights.secondary, 0.0);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_parse_value_accepts_enums_and_numbers() {
        let mode: ExtractionMode = parse_value("EXTRACTION_MODE", "scoped").unwrap();
        assert_eq!(mode, ExtractionMode::Scoped);
        let scale: VerdictScale = parse_value("VERDICT_SCALE", " coarse ").unwrap();
        assert_eq!(scale, VerdictScale::Coarse);
        let port: u16 = parse_value("PORT", "9000").unwrap();
        assert_eq!(port, 9000);
    }

    #[test]
    fn test_parse_value_error_names_the_variable() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));
    }
}
