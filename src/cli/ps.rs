use crate::domain::{CommandExecutor, ContainerInstance};
use crate::infra::AppConfig;
use anyhow::{Context, Result, anyhow};
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct PsOptions {
    /// Inclui containers parados
    #[arg(short, long, overrides_with = "no_all")]
    pub all: bool,
    /// Ignora `all = true` da configuração
    #[arg(long, overrides_with = "all")]
    pub no_all: bool,
    /// Mostra apenas containers cujo nome contém este texto
    #[arg(long)]
    pub name: Option<String>,
    /// Mostra apenas containers com o label KEY=VALUE
    #[arg(long, value_parser = parse_label_filter)]
    pub label: Option<(String, String)>,
    /// Saída em JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_label_filter(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("label deve estar no formato KEY=VALUE: {raw}"))?;
    Ok((key.to_string(), value.to_string()))
}

pub fn run(
    options: &PsOptions,
    config: &AppConfig,
    executor: Arc<dyn CommandExecutor>,
    out: &mut impl Write,
) -> Result<()> {
    let mut ps = super::ps_command(config, executor);
    super::apply_all_override(&mut ps, options.all, options.no_all);
    ps.run()?;

    if let Some(name) = &options.name {
        ps.filter_by_name(name);
    }
    if let Some((key, value)) = &options.label {
        ps.filter_by_label(key, value);
    }

    info!(" {} container(s) encontrados", ps.containers().len());

    if options.json {
        serde_json::to_writer_pretty(&mut *out, ps.containers())
            .context("serializando containers")?;
        writeln!(out)?;
        return Ok(());
    }

    write_table(ps.containers(), out)
}

const HEADERS: [&str; 5] = ["CONTAINER ID", "NAME", "IMAGE", "STATUS", "PORTS"];

fn write_table(containers: &[ContainerInstance], out: &mut impl Write) -> Result<()> {
    let rows: Vec<[String; 5]> = containers.iter().map(table_row).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(String::from), &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }

    Ok(())
}

fn table_row(container: &ContainerInstance) -> [String; 5] {
    let ports: Vec<String> = container
        .ports()
        .iter()
        .flatten()
        .map(ToString::to_string)
        .collect();

    [
        container.id().chars().take(12).collect(),
        container.name().to_string(),
        container.image().unwrap_or_default().to_string(),
        container.status().unwrap_or_default().to_string(),
        ports.join(", "),
    ]
}

fn write_row(out: &mut impl Write, row: &[String; 5], widths: &[usize; 5]) -> Result<()> {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();

    writeln!(out, "{}", cells.join("   ").trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_filter() {
        assert_eq!(
            parse_label_filter("tier=back").unwrap(),
            ("tier".to_string(), "back".to_string())
        );
        assert_eq!(
            parse_label_filter("url=http://x?a=b").unwrap(),
            ("url".to_string(), "http://x?a=b".to_string())
        );
        assert!(parse_label_filter("tier").is_err());
    }

    #[test]
    fn table_row_shortens_id_and_formats_ports() {
        let container = ContainerInstance::new(
            "2b60df10327d743d6cc50f5821156fd2",
            "web",
            [
                ("image", "nginx"),
                ("status", "Up"),
                ("ports", "0.0.0.0:8080->80/tcp, 443/tcp"),
            ],
        );

        let row = table_row(&container);
        assert_eq!(row[0], "2b60df10327d");
        assert_eq!(row[4], "0.0.0.0:8080->80/tcp, 443/tcp");
    }
}
