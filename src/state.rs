use crate::config::Config;
use crate::core::error::SwaboxError;
use crate::providers::{AiContext, ProviderManager};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

/// Number of history entries handed to the model as context.
pub const AI_CONTEXT_HISTORY: usize = 10;

const AI_DISABLED: &str = "AI is not enabled. Use 'ai on' to enable AI features.";

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub command: String,
    pub timestamp: DateTime<Local>,
    pub directory: String,
}

/// Mutable state of one shell session.
///
/// Everything the dispatcher mutates lives here and is only touched from the
/// dispatch loop; a concurrent front end would need to put this behind a
/// single writer.
pub struct ShellState {
    start_time: Instant,
    history: VecDeque<HistoryEntry>,
    pub config: Config,
    config_path: Option<PathBuf>,
    ai_enabled: bool,
    ai_manager: Option<ProviderManager>,
    pub current_directory: String,
    pub current_task: String,
}

impl ShellState {
    /// Builds the session state. `config_path` is where mutations are
    /// persisted; `None` keeps everything in memory.
    ///
    /// If the config asks for AI but the provider cannot be built, the
    /// session starts with AI disabled.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let current_directory = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| ".".to_string());
        let wants_ai = config.ai_enabled;

        let mut state = Self {
            start_time: Instant::now(),
            history: VecDeque::new(),
            config,
            config_path,
            ai_enabled: false,
            ai_manager: None,
            current_directory,
            current_task: String::new(),
        };

        if wants_ai {
            if let Err(e) = state.build_manager() {
                warn!("Error initializing AI: {}", e);
                state.config.ai_enabled = false;
            } else {
                state.ai_enabled = true;
            }
        }

        state
    }

    /// Writes the config back to disk if the session has a config file.
    pub fn save_config(&self) -> Result<(), SwaboxError> {
        match &self.config_path {
            Some(path) => self.config.save(path),
            None => Ok(()),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save_config() {
            warn!("Could not save config: {}", e);
        }
    }

    /// Records a command, dropping the oldest entries beyond `history_size`.
    pub fn add_to_history(&mut self, command: &str) {
        self.history.push_back(HistoryEntry {
            command: command.to_string(),
            timestamp: Local::now(),
            directory: self.current_directory.clone(),
        });

        let max = self.config.history_size;
        while self.history.len() > max {
            self.history.pop_front();
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    pub fn ai_manager(&self) -> Option<&ProviderManager> {
        self.ai_manager.as_ref()
    }

    fn build_manager(&mut self) -> Result<(), SwaboxError> {
        if self.ai_manager.is_none() {
            let manager = ProviderManager::new(Some(self.config.ai_config.clone()))?;
            self.ai_manager = Some(manager);
        }
        Ok(())
    }

    /// Turns AI features on, building the provider manager on first use.
    /// On failure AI stays off and the error is returned.
    pub fn enable_ai(&mut self) -> Result<(), SwaboxError> {
        let result = self.build_manager();
        self.ai_enabled = result.is_ok();
        self.config.ai_enabled = self.ai_enabled;
        self.persist();
        result
    }

    pub fn disable_ai(&mut self) {
        self.ai_enabled = false;
        self.config.ai_enabled = false;
        self.persist();
    }

    /// Switches the active provider and stores the new AI config.
    pub fn switch_provider(&mut self, name: &str) -> Result<String, SwaboxError> {
        let manager = self
            .ai_manager
            .as_mut()
            .ok_or_else(|| SwaboxError::Config("AI provider is not initialized".to_string()))?;

        let message = manager.switch_provider(name)?;
        self.config.ai_config = manager.config().clone();
        self.persist();
        Ok(message)
    }

    pub fn set_current_task(&mut self, task: &str) {
        self.current_task = task.to_string();
    }

    /// Assembles the per-request context from the latest history.
    pub fn ai_context(&self) -> AiContext {
        let skip = self.history.len().saturating_sub(AI_CONTEXT_HISTORY);
        AiContext {
            command_history: self
                .history
                .iter()
                .skip(skip)
                .map(|entry| {
                    format!(
                        "[{}] {} $ {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.directory,
                        entry.command
                    )
                })
                .collect(),
            current_directory: self.current_directory.clone(),
            current_task: self.current_task.clone(),
        }
    }

    fn active_manager(&self) -> Option<&ProviderManager> {
        self.ai_manager.as_ref().filter(|_| self.ai_enabled)
    }

    pub async fn ai_suggestion(&self) -> String {
        match self.active_manager() {
            Some(manager) => manager.get_command_suggestion(&self.ai_context()).await,
            None => AI_DISABLED.to_string(),
        }
    }

    pub async fn process_natural_language(&self, query: &str) -> String {
        match self.active_manager() {
            Some(manager) => manager.process_natural_language(query).await,
            None => AI_DISABLED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;

    fn state_with_history_size(size: usize) -> ShellState {
        let config = Config {
            history_size: size,
            ..Config::default()
        };
        ShellState::new(config, None)
    }

    #[test]
    fn history_keeps_most_recent_entries() {
        let mut state = state_with_history_size(3);
        for i in 0..5 {
            state.add_to_history(&format!("cmd{i}"));
        }
        let commands: Vec<&str> = state.history().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["cmd2", "cmd3", "cmd4"]);
    }

    #[test]
    fn ai_context_uses_last_ten_entries() {
        let mut state = state_with_history_size(100);
        for i in 0..15 {
            state.add_to_history(&format!("cmd{i}"));
        }
        state.set_current_task("deploy");

        let context = state.ai_context();
        assert_eq!(context.command_history.len(), AI_CONTEXT_HISTORY);
        assert!(context.command_history[0].ends_with("$ cmd5"));
        assert!(context.command_history[9].ends_with("$ cmd14"));
        assert_eq!(context.current_task, "deploy");
    }

    #[test]
    fn enable_failure_leaves_ai_off() {
        let config = Config {
            ai_config: AiConfig {
                provider: "nope".to_string(),
                ..AiConfig::default()
            },
            ..Config::default()
        };
        let mut state = ShellState::new(config, None);

        assert!(state.enable_ai().is_err());
        assert!(!state.ai_enabled());
        assert!(!state.config.ai_enabled);
        assert!(state.ai_manager().is_none());
    }

    #[test]
    fn startup_with_bad_provider_disables_ai() {
        let config = Config {
            ai_enabled: true,
            ai_config: AiConfig {
                provider: "nope".to_string(),
                ..AiConfig::default()
            },
            ..Config::default()
        };
        let state = ShellState::new(config, None);
        assert!(!state.ai_enabled());
        assert!(!state.config.ai_enabled);
    }

    #[test]
    fn enable_and_disable_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut state = ShellState::new(Config::default(), Some(path.clone()));

        state.enable_ai().unwrap();
        assert!(Config::load(&path).ai_enabled);

        state.disable_ai();
        assert!(!Config::load(&path).ai_enabled);
        assert!(state.ai_manager().is_some());
    }

    #[test]
    fn switch_provider_persists_ai_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut state = ShellState::new(Config::default(), Some(path.clone()));
        state.enable_ai().unwrap();

        state.switch_provider("openai").unwrap();
        assert_eq!(Config::load(&path).ai_config.provider, "openai");

        assert!(state.switch_provider("bogus").is_err());
        assert_eq!(state.config.ai_config.provider, "openai");
    }

    #[tokio::test]
    async fn ai_calls_report_disabled_state() {
        let state = state_with_history_size(10);
        assert_eq!(state.ai_suggestion().await, AI_DISABLED);
        assert_eq!(state.process_natural_language("list files").await, AI_DISABLED);
    }
}
