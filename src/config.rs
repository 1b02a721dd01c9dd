//! Benchmark settings. Precedence: CLI > environment > config file > defaults.

use crate::driver::DEFAULT_TARGET;
use crate::errors::BenchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dataset read when nothing else is configured.
pub const DEFAULT_INPUT: &str = "tmp/mcc.json";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "viewbench.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub input: Option<PathBuf>,
    pub target: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
    /// log4rs YAML file; takes over from `log_dir` when set.
    pub log_config: Option<PathBuf>,
}

impl BenchConfig {
    /// # Errors
    /// `Config` if the text is not a valid config table.
    pub fn from_toml_str(s: &str) -> Result<Self, BenchError> {
        toml::from_str(s).map_err(|e| BenchError::Config(e.to_string()))
    }

    /// # Errors
    /// `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, BenchError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&s).map_err(|e| BenchError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Reads the `VIEWBENCH_*` variables through `env`.
    ///
    /// # Errors
    /// `Config` if a numeric variable does not parse.
    pub fn from_env<F>(env: F) -> Result<Self, BenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = env("VIEWBENCH_TARGET")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|e| BenchError::Config(format!("VIEWBENCH_TARGET={s}: {e}")))
            })
            .transpose()?;
        let log_retention = env("VIEWBENCH_LOG_RETENTION")
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|e| BenchError::Config(format!("VIEWBENCH_LOG_RETENTION={s}: {e}")))
            })
            .transpose()?;
        Ok(Self {
            input: env("VIEWBENCH_INPUT").map(PathBuf::from),
            target,
            log_dir: env("VIEWBENCH_LOG_DIR").map(PathBuf::from),
            log_level: env("VIEWBENCH_LOG_LEVEL"),
            log_retention,
            log_config: env("VIEWBENCH_LOG_CONFIG").map(PathBuf::from),
        })
    }

    /// Fills every unset field from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            input: self.input.or(fallback.input),
            target: self.target.or(fallback.target),
            log_dir: self.log_dir.or(fallback.log_dir),
            log_level: self.log_level.or(fallback.log_level),
            log_retention: self.log_retention.or(fallback.log_retention),
            log_config: self.log_config.or(fallback.log_config),
        }
    }

    /// Environment layered over the config file.
    ///
    /// The file is `cli_cfg`, else `VIEWBENCH_CONFIG`, else `./viewbench.toml` if it
    /// exists. An explicitly named file must be readable.
    ///
    /// # Errors
    /// `Config` on unreadable or malformed files and bad environment values.
    pub fn load<F>(cli_cfg: Option<&Path>, env: F) -> Result<Self, BenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = cli_cfg
            .map(Path::to_path_buf)
            .or_else(|| env("VIEWBENCH_CONFIG").map(PathBuf::from));
        let file_cfg = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() { Self::from_file(implicit)? } else { Self::default() }
            }
        };
        Ok(Self::from_env(env)?.or(file_cfg))
    }

    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    #[must_use]
    pub fn target(&self) -> u64 {
        self.target.unwrap_or(DEFAULT_TARGET)
    }
}
