use crate::infra::AppConfig;
use crate::infra::config::RuntimeConfig;
use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Mostra a configuração efetiva (global + local)
    Show,
}

pub fn run(action: &ConfigAction, config: &AppConfig, out: &mut impl Write) -> Result<()> {
    match action {
        ConfigAction::Show => show(config, out),
    }
}

fn show(config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let effective = AppConfig {
        runtime: RuntimeConfig {
            binary: Some(config.binary().to_string()),
            all: Some(config.all()),
        },
    };

    let rendered = toml::to_string_pretty(&effective).context("serializando config")?;
    write!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_defaults_explicitly() {
        let mut out = Vec::new();
        run(&ConfigAction::Show, &AppConfig::default(), &mut out).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("[runtime]"));
        assert!(rendered.contains("binary = \"docker\""));
        assert!(rendered.contains("all = false"));
    }
}
