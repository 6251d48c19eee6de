pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{AttributeValue, CommandExecutor, ContainerInstance, ExecError, PortMapping};
pub use infra::{AppConfig, ProcessExecutor};
pub use services::{PsCommand, parse_ps_output};
