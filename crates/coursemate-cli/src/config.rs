//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coursemate_core::engine::{RecommendationConfig, DIFFICULTY_BONUS, TOPIC_BONUS};

/// Top-level coursemate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursemateConfig {
    /// How many recommendations to show when `--top-k` is not given.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    /// Bonus for matching the learner's preferred difficulty.
    #[serde(default = "default_difficulty_bonus")]
    pub difficulty_bonus: f64,
    /// Bonus for any tag/topic overlap.
    #[serde(default = "default_topic_bonus")]
    pub topic_bonus: f64,
    /// Where `--output` paths without a directory are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_top_k() -> usize {
    3
}
fn default_difficulty_bonus() -> f64 {
    DIFFICULTY_BONUS
}
fn default_topic_bonus() -> f64 {
    TOPIC_BONUS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./coursemate-results")
}

impl Default for CoursemateConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            difficulty_bonus: default_difficulty_bonus(),
            topic_bonus: default_topic_bonus(),
            output_dir: default_output_dir(),
        }
    }
}

impl CoursemateConfig {
    /// Engine settings derived from this config.
    pub fn recommendation(&self) -> RecommendationConfig {
        RecommendationConfig {
            difficulty_bonus: self.difficulty_bonus,
            topic_bonus: self.topic_bonus,
        }
    }

    /// Resolve an output file name against `output_dir` when it has no
    /// directory component of its own.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
            _ => self.output_dir.join(path),
        }
    }

    fn validate(&self) -> Result<()> {
        self.recommendation().validate()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `coursemate.toml` in the current directory
/// 2. `~/.config/coursemate/config.toml`
///
/// `COURSEMATE_TOP_K` overrides `default_top_k`.
pub fn load_config_from(path: Option<&Path>) -> Result<CoursemateConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coursemate.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CoursemateConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CoursemateConfig::default(),
    };

    if let Ok(top_k) = std::env::var("COURSEMATE_TOP_K") {
        config.default_top_k = top_k
            .trim()
            .parse()
            .with_context(|| format!("COURSEMATE_TOP_K is not a number: {top_k}"))?;
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    config.validate()?;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coursemate"))
}
