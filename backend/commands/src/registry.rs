//! Static command registry.
//!
//! Populated once at startup, then shared read-only behind an `Arc`.
//! There is no removal: static commands live for the process lifetime.
use std::collections::HashMap;
use std::sync::Arc;

use mimic_core::BotError;
use tracing::debug;

use crate::types::Command;

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// An empty registry. See [`crate::builtin_registry`] for the default set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Fails if the name is already taken.
    pub fn register(&mut self, command: impl Command + 'static) -> Result<(), BotError> {
        self.register_arc(Arc::new(command))
    }

    /// Register an already shared command.
    pub fn register_arc(&mut self, command: Arc<dyn Command>) -> Result<(), BotError> {
        let name = command.name().to_string();
        if self.index.contains_key(&name) {
            return Err(BotError::DuplicateCommand(name));
        }
        debug!(command = %name, "Registered command");
        self.index.insert(name, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.index.get(name).map(|&i| Arc::clone(&self.commands[i]))
    }

    /// All commands in registration order.
    pub fn all(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name())
    }

    /// Whether `name` is taken by a static command and therefore cannot be learned.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
