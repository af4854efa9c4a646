use crate::commands::handler::CommandHandler;
use std::collections::HashMap;
use std::sync::Arc;

/// Built-in command table.
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<C: CommandHandler + 'static>(&mut self, name: &str, command: C) {
        self.handlers.insert(name.to_lowercase(), Arc::new(command));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs sorted by name.
    pub fn entries(&self) -> Vec<(String, &'static str)> {
        self.get_command_names()
            .into_iter()
            .filter_map(|name| {
                let help = self.handlers.get(&name)?.help();
                Some((name, help))
            })
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
