mod ps_command;

pub use ps_command::{PsCommand, parse_ps_output};
