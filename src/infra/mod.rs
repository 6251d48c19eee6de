pub mod config;
pub mod process_executor;

pub use config::AppConfig;
pub use process_executor::ProcessExecutor;
