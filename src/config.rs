//! Settings resolution: CLI flag, then BRANCHCHECK_* environment, then defaults.
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::color::{parse_color_mode, ColorMode};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_DIR: &str = "BRANCHCHECK_DIR";
pub const ENV_GIT: &str = "BRANCHCHECK_GIT";
pub const ENV_TIMEOUT_SECS: &str = "BRANCHCHECK_TIMEOUT_SECS";
pub const ENV_COLOR: &str = "BRANCHCHECK_COLOR";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub git: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workdir: PathBuf,
    pub git: PathBuf,
    pub timeout: Duration,
    pub color: ColorMode,
}

impl Settings {
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        Self::resolve(overrides, |k| std::env::var(k).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve<F>(overrides: Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| env(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let workdir = match overrides.dir.or_else(|| non_empty(ENV_DIR).map(PathBuf::from)) {
            Some(d) => d,
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        ensure_dir(&workdir)?;

        let git = overrides
            .git
            .or_else(|| non_empty(ENV_GIT).map(PathBuf::from))
            .unwrap_or_else(default_git);

        let secs = overrides
            .timeout_secs
            .or_else(|| non_empty(ENV_TIMEOUT_SECS).and_then(|v| v.parse::<u64>().ok()))
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let color = overrides
            .color
            .or_else(|| non_empty(ENV_COLOR).and_then(|v| parse_color_mode(&v)))
            .unwrap_or(ColorMode::Auto);

        Ok(Self {
            workdir,
            git,
            timeout: Duration::from_secs(secs),
            color,
        })
    }
}

fn ensure_dir(p: &Path) -> Result<()> {
    let meta = std::fs::metadata(p)
        .with_context(|| format!("working directory {} is not accessible", p.display()))?;
    if !meta.is_dir() {
        bail!("working directory {} is not a directory", p.display());
    }
    Ok(())
}

/// git from PATH; the bare name is kept when lookup fails so the launch error surfaces later.
fn default_git() -> PathBuf {
    which::which("git").unwrap_or_else(|_| PathBuf::from("git"))
}
