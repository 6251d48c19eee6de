use crate::domain::{CommandExecutor, ExecError};
use std::sync::RwLock;

/// Executor returning canned stdout and recording every command it receives.
#[derive(Debug)]
pub struct MockExecutor {
    output: RwLock<String>,
    commands: RwLock<Vec<Vec<String>>>,
    fail: RwLock<bool>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::with_output("")
    }

    pub fn with_output(output: &str) -> Self {
        Self {
            output: RwLock::new(output.to_string()),
            commands: RwLock::new(Vec::new()),
            fail: RwLock::new(false),
        }
    }

    pub fn set_output(&self, output: &str) {
        *self.output.write().unwrap() = output.to_string();
    }

    /// Makes subsequent executions exit non-zero.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
    }

    pub fn get_commands(&self) -> Vec<Vec<String>> {
        self.commands.read().unwrap().clone()
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, args: &[String]) -> Result<String, ExecError> {
        self.commands.write().unwrap().push(args.to_vec());

        if *self.fail.read().unwrap() {
            return Err(ExecError::NonZeroExit {
                program: args.first().cloned().unwrap_or_default(),
                status: Some(1),
                stderr: "Cannot connect to the Docker daemon".to_string(),
            });
        }

        Ok(self.output.read().unwrap().clone())
    }
}
