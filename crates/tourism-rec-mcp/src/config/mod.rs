//! Configuration loading and resolution.

use std::path::PathBuf;

use tourism_rec::{RecommendConfig, DEFAULT_THRESHOLD, DEFAULT_TOP_K, DEFAULT_TOP_N};

use crate::types::{McpError, McpResult};

/// Resolve the dataset file path.
pub fn resolve_dataset_path(explicit: Option<&str>) -> String {
    if let Some(path) = explicit {
        return path.to_string();
    }

    if let Ok(env_path) = std::env::var("TOURISM_DATASET") {
        return env_path;
    }

    let cwd_dataset = PathBuf::from(".tourism/dataset.trec");
    if cwd_dataset.exists() {
        return cwd_dataset.display().to_string();
    }

    resolve_default_dataset_path()
}

fn resolve_default_dataset_path() -> String {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());

    format!("{home}/.tourism-rec/dataset.trec")
}

/// Server-wide defaults, overridable per tool call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineDefaults {
    pub threshold: f64,
    pub top_n: usize,
    pub content_top_k: usize,
    pub popular_n: usize,
    /// Minimum ratings a place needs to enter the "top rated" list.
    pub min_ratings: usize,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            content_top_k: DEFAULT_TOP_K,
            popular_n: 5,
            min_ratings: 5,
        }
    }
}

impl EngineDefaults {
    /// Defaults with `TOURISM_THRESHOLD` and `TOURISM_TOP_N` applied.
    pub fn from_env() -> McpResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> McpResult<Self> {
        let mut defaults = Self::default();

        if let Some(raw) = lookup("TOURISM_THRESHOLD") {
            defaults.threshold = raw.trim().parse().map_err(|_| {
                McpError::InvalidParams(format!("TOURISM_THRESHOLD is not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup("TOURISM_TOP_N") {
            defaults.top_n = raw.trim().parse().map_err(|_| {
                McpError::InvalidParams(format!("TOURISM_TOP_N is not a count: {raw}"))
            })?;
        }

        defaults.recommend_config(None, None)?;
        Ok(defaults)
    }

    /// Engine config for one request, falling back to these defaults.
    pub fn recommend_config(
        &self,
        threshold: Option<f64>,
        top_n: Option<usize>,
    ) -> McpResult<RecommendConfig> {
        let config = RecommendConfig {
            threshold: threshold.unwrap_or(self.threshold),
            top_n: top_n.unwrap_or(self.top_n),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(resolve_dataset_path(Some("/tmp/x.trec")), "/tmp/x.trec");
    }

    #[test]
    fn test_env_overrides() {
        let defaults = EngineDefaults::from_lookup(|key| match key {
            "TOURISM_THRESHOLD" => Some("0.25".to_string()),
            "TOURISM_TOP_N" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(defaults.threshold, 0.25);
        assert_eq!(defaults.top_n, 3);
        assert_eq!(defaults.content_top_k, 5);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        assert!(EngineDefaults::from_lookup(|_| Some("abc".to_string())).is_err());
        assert!(EngineDefaults::from_lookup(|key| {
            (key == "TOURISM_THRESHOLD").then(|| "1.5".to_string())
        })
        .is_err());
        assert!(EngineDefaults::from_lookup(|key| {
            (key == "TOURISM_TOP_N").then(|| "0".to_string())
        })
        .is_err());
    }

    #[test]
    fn test_per_call_override() {
        let defaults = EngineDefaults::default();
        let config = defaults.recommend_config(Some(0.0), None).unwrap();
        assert_eq!(config.threshold, 0.0);
        assert_eq!(config.top_n, 10);
        assert!(defaults.recommend_config(Some(-1.0), None).is_err());
    }
}
