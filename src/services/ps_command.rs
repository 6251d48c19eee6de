use crate::domain::placeholders::{FIELD_SEPARATOR, field_names, format_string};
use crate::domain::{CommandExecutor, ContainerInstance};
use crate::infra::config::DEFAULT_RUNTIME_BINARY;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lists containers through `<runtime> ps` and keeps the decoded snapshot.
///
/// ```ignore
/// let mut ps = PsCommand::new(Arc::new(ProcessExecutor::new()));
/// ps.all().run()?.filter_by_name("postgres");
/// ```
#[derive(Debug)]
pub struct PsCommand {
    executor: Arc<dyn CommandExecutor>,
    binary: String,
    all: bool,
    containers: Vec<ContainerInstance>,
}

impl PsCommand {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            binary: DEFAULT_RUNTIME_BINARY.to_string(),
            all: false,
            containers: Vec::new(),
        }
    }

    /// Uses another runtime binary (e.g. `podman`) as the base invocation.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Includes stopped containers in subsequent runs.
    pub fn all(&mut self) -> &mut Self {
        self.set_all(true)
    }

    pub fn set_all(&mut self, all: bool) -> &mut Self {
        self.all = all;
        self
    }

    /// Runs the listing command and replaces the held containers with the
    /// fresh snapshot. On failure the previous snapshot is kept.
    pub fn run(&mut self) -> Result<&mut Self> {
        let ps_command = self.ps_command();
        let output = self.ps_output(&ps_command)?;
        self.containers = parse_ps_output(&output);

        debug!("{} container(s) listados", self.containers.len());

        Ok(self)
    }

    pub fn containers(&self) -> &[ContainerInstance] {
        &self.containers
    }

    pub fn into_containers(self) -> Vec<ContainerInstance> {
        self.containers
    }

    /// Keeps only the containers matching `predicate`, in their current order.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&ContainerInstance) -> bool,
    {
        self.containers.retain(|container| predicate(container));
        self
    }

    pub fn filter_by_name(&mut self, needle: &str) -> &mut Self {
        self.filter(|container| container.name().contains(needle))
    }

    pub fn filter_by_label(&mut self, key: &str, value: &str) -> &mut Self {
        self.filter(|container| container.label(key) == Some(value))
    }

    /// Argument vector of the listing command. Pure; depends only on the
    /// binary and the `all` flag.
    pub fn ps_command(&self) -> Vec<String> {
        let mut params = vec![
            self.binary.clone(),
            "ps".to_string(),
            "--no-trunc".to_string(),
            "--format".to_string(),
            format_string(),
        ];

        if self.all {
            params.push("-a".to_string());
        }

        params
    }

    /// Raw stdout of the listing command.
    pub fn ps_output(&self, ps_command: &[String]) -> Result<String> {
        debug!("Comando: {}", ps_command.join(" "));

        self.executor
            .execute(ps_command)
            .with_context(|| format!("listando containers com {}", self.binary))
    }
}

/// Converts `ps` output into one container per non-blank line, in output
/// order.
///
/// Lines shorter than the placeholder set produce containers without the
/// trailing attributes.
pub fn parse_ps_output(output: &str) -> Vec<ContainerInstance> {
    let keys = field_names();

    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_ps_line(line, &keys))
        .collect()
}

fn parse_ps_line(line: &str, keys: &[String]) -> ContainerInstance {
    let line = strip_template_quotes(line);
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    if fields.len() < keys.len() {
        warn!(
            "  Linha com {} de {} campos: {:?}",
            fields.len(),
            keys.len(),
            line
        );
    }

    let attributes: HashMap<&str, &str> = keys
        .iter()
        .map(String::as_str)
        .zip(fields.iter().copied())
        .collect();

    let id = attributes.get("id").copied().unwrap_or_default();
    let name = attributes.get("names").copied().unwrap_or_default();

    if id.is_empty() {
        warn!("  Linha sem ID de container: {:?}", line);
    }

    ContainerInstance::new(id, name, attributes)
}

// Without a shell in between, the quotes around the format string are
// echoed by the runtime around every line. Field contents are left as is.
fn strip_template_quotes(line: &str) -> &str {
    line.trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(line)
}
