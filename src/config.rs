use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Points and thresholds used when scoring a product against preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchPoints {
    pub season: i32,
    pub temperature: i32,
    pub size: i32,
    pub budget: i32,
    pub allergy_bonus: i32,
    /// Subtracted when allergies matter and the product is not allergy friendly.
    pub allergy_penalty: i32,
    pub gold_bonus: i32,
    pub platinum_bonus: i32,
    pub rating_bonus: i32,
    pub rating_threshold: f64,
    /// Inclusive upper price for the low budget tier.
    pub low_budget_max: u32,
    /// Inclusive upper price for the medium budget tier.
    pub medium_budget_max: u32,
    pub single_width: u32,
    pub double_min_width: u32,
}

impl Default for MatchPoints {
    fn default() -> Self {
        Self {
            season: 30,
            temperature: 25,
            size: 10,
            budget: 15,
            allergy_bonus: 30,
            allergy_penalty: 20,
            gold_bonus: 10,
            platinum_bonus: 15,
            rating_bonus: 5,
            rating_threshold: 4.5,
            low_budget_max: 2000,
            medium_budget_max: 3500,
            single_width: 135,
            double_min_width: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub points: MatchPoints,
    /// How many recommendations the caller keeps.
    pub top_n: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            points: MatchPoints::default(),
            top_n: 6,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: RunConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::load(Path::new(path))?;
                tracing::debug!(path = %path, top_n = config.top_n, "Loaded run config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_points() {
        let points = MatchPoints::default();
        assert_eq!(points.season, 30);
        assert_eq!(points.temperature, 25);
        assert_eq!(points.size, 10);
        assert_eq!(points.budget, 15);
        assert_eq!(points.allergy_bonus, 30);
        assert_eq!(points.allergy_penalty, 20);
        assert_eq!(points.gold_bonus, 10);
        assert_eq!(points.platinum_bonus, 15);
        assert_eq!(points.rating_bonus, 5);
        assert_eq!(points.rating_threshold, 4.5);
        assert_eq!(points.low_budget_max, 2000);
        assert_eq!(points.medium_budget_max, 3500);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"top_n": 3, "points": {{"season": 40}}}}"#).unwrap();

        let config = RunConfig::load(file.path()).unwrap();

        assert_eq!(config.top_n, 3);
        assert_eq!(config.points.season, 40);
        assert_eq!(config.points.temperature, 25);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = RunConfig::load_or_default(None).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.top_n, 6);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = RunConfig::load(Path::new("/nonexistent/duvet-config.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
