mod container;
mod error;
pub mod placeholders;
pub mod ports;
pub mod traits;

pub use container::{AttributeValue, ContainerInstance};
pub use error::ExecError;
pub use ports::PortMapping;
pub use traits::CommandExecutor;
