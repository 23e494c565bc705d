use std::path::PathBuf;

use clap::Parser;

use branchcheck::config::Overrides;
use branchcheck::ColorMode;

#[derive(Parser, Debug)]
#[command(
    name = "branchcheck",
    version,
    about = "Check whether a git branch can be created or switched to, then optionally do it."
)]
pub(crate) struct Cli {
    /// Branch to switch to (or create when it does not exist)
    pub(crate) branch: String,

    /// Repository working directory (default: BRANCHCHECK_DIR or the current directory)
    #[arg(short = 'C', long = "dir")]
    pub(crate) dir: Option<PathBuf>,

    /// Path to the git binary (default: BRANCHCHECK_GIT or git on PATH)
    #[arg(long)]
    pub(crate) git: Option<PathBuf>,

    /// Per-command timeout in seconds (default: BRANCHCHECK_TIMEOUT_SECS or 30)
    #[arg(long = "timeout", value_name = "SECS")]
    pub(crate) timeout_secs: Option<u64>,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<ColorMode>,

    /// Evaluate and report only; never prompt or change branches
    #[arg(long)]
    pub(crate) check: bool,

    /// Emit the decision as JSON (implies --check)
    #[arg(long)]
    pub(crate) json: bool,

    /// Proceed without interactive confirmation
    #[arg(short = 'y', long)]
    pub(crate) yes: bool,

    /// Print detailed execution info
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl Cli {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            dir: self.dir.clone(),
            git: self.git.clone(),
            timeout_secs: self.timeout_secs,
            color: self.color,
        }
    }
}
