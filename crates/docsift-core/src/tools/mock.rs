//! Scripted command runner for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::command::{CommandOutput, CommandRunner, ToolCommand};
use crate::error::ToolError;

type Handler = Box<dyn Fn(&ToolCommand) -> Result<CommandOutput, ToolError> + Send + Sync>;

/// Answers commands from per-program handlers and records every call.
///
/// Programs without a handler behave as if they were not installed.
#[derive(Default)]
pub struct MockRunner {
    handlers: HashMap<String, Handler>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `program` with a custom handler.
    pub fn on<F>(mut self, program: &str, handler: F) -> Self
    where
        F: Fn(&ToolCommand) -> Result<CommandOutput, ToolError> + Send + Sync + 'static,
    {
        self.handlers.insert(program.to_string(), Box::new(handler));
        self
    }

    /// Answer `program` with a successful run printing `stdout`.
    pub fn ok(self, program: &str, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        self.on(program, move |_| Ok(CommandOutput::success(stdout.clone())))
    }

    /// Every command run so far.
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands run for `program`.
    pub fn calls_to(&self, program: &str) -> Vec<ToolCommand> {
        self.calls()
            .into_iter()
            .filter(|c| c.program() == program)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError> {
        self.calls.lock().unwrap().push(command.clone());
        match self.handlers.get(command.program()) {
            Some(handler) => handler(command),
            None => Err(ToolError::NotFound(command.program().to_string())),
        }
    }
}
