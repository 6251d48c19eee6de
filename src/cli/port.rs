use crate::domain::CommandExecutor;
use crate::infra::AppConfig;
use anyhow::{Result, bail};
use clap::Args;
use std::io::Write;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct PortOptions {
    /// Nome ou ID do container
    pub container: String,
    /// Porta interna do container
    pub port: u16,
    /// Procura também entre containers parados
    #[arg(short, long, overrides_with = "no_all")]
    pub all: bool,
    /// Ignora `all = true` da configuração
    #[arg(long, overrides_with = "all")]
    pub no_all: bool,
}

/// Prints the host port published for `options.port` of one container.
pub fn run(
    options: &PortOptions,
    config: &AppConfig,
    executor: Arc<dyn CommandExecutor>,
    out: &mut impl Write,
) -> Result<()> {
    let mut ps = super::ps_command(config, executor);
    super::apply_all_override(&mut ps, options.all, options.no_all);
    ps.run()?;

    let target = options.container.as_str();
    let Some(container) = ps
        .containers()
        .iter()
        .find(|c| c.name() == target || c.id() == target)
    else {
        bail!("Container {target} não encontrado");
    };

    match container.host_port(options.port) {
        Some(host) => {
            writeln!(out, "{host}")?;
            Ok(())
        }
        None => bail!(
            "Porta {} de {} não está publicada no host",
            options.port,
            container.name()
        ),
    }
}
