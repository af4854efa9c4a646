use super::CommandPlugin;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Name to handler table for plugin commands.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn CommandPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Adds `plugin` under its lowercased name. A later registration with the
    /// same name replaces the earlier one.
    pub fn register<P: CommandPlugin + 'static>(&mut self, plugin: P) {
        let name = plugin.name().to_lowercase();
        if self.plugins.insert(name.clone(), Arc::new(plugin)).is_some() {
            debug!(plugin = %name, "plugin replaced an earlier one with the same name");
        }
        info!(plugin = %name, "registered plugin command");
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandPlugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Plugin names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SwaboxError;
    use async_trait::async_trait;

    struct Fixed(&'static str, &'static str);

    #[async_trait]
    impl CommandPlugin for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        async fn run(&self, _args: &str) -> Result<String, SwaboxError> {
            Ok(self.1.to_string())
        }
    }

    #[tokio::test]
    async fn last_registration_wins() {
        let mut registry = PluginRegistry::new();
        registry.register(Fixed("dup", "first"));
        registry.register(Fixed("DUP", "second"));

        assert_eq!(registry.len(), 1);
        let plugin = registry.get("dup").unwrap();
        assert_eq!(plugin.run("").await.unwrap(), "second");
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = PluginRegistry::new();
        registry.register(Fixed("zeta", ""));
        registry.register(Fixed("alpha", ""));
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        assert!(registry.contains("alpha"));
        assert!(!registry.is_empty());
    }
}
