//! Optional tracing subscriber (cargo feature `trace`), filtered by BRANCHCHECK_LOG.
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "BRANCHCHECK_LOG";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a stderr fmt subscriber once; later calls are no-ops. `verbose` raises the
/// default level from warn to debug when BRANCHCHECK_LOG is unset.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let default = if verbose { "branchcheck=debug" } else { "warn" };
        let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
