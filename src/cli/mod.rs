pub mod config;
pub mod port;
pub mod ps;

pub use config::ConfigAction;
pub use port::PortOptions;
pub use ps::PsOptions;

use crate::domain::CommandExecutor;
use crate::infra::AppConfig;
use crate::services::PsCommand;
use std::sync::Arc;

/// Listing pipeline configured from the effective config.
pub fn ps_command(config: &AppConfig, executor: Arc<dyn CommandExecutor>) -> PsCommand {
    let mut ps = PsCommand::new(executor).with_binary(config.binary());
    ps.set_all(config.all());
    ps
}

/// Command line `--all` / `--no-all` win over the configured default.
pub fn apply_all_override(ps: &mut PsCommand, all: bool, no_all: bool) {
    if all {
        ps.set_all(true);
    } else if no_all {
        ps.set_all(false);
    }
}
