use crate::cli::Args;
use crate::commands::{CommandDispatcher, create_dispatcher};
use crate::config::Config;
use crate::core::error::SwaboxError;
use crate::display;
use crate::input;
use crate::plugins::{PluginRegistry, load_plugins};
use crate::state::ShellState;
use crate::system::SystemInfo;
use is_terminal::IsTerminal;
use std::io::{self, BufRead};
use tracing::{info, warn};

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

pub struct Application {
    pub args: Args,
    pub state: ShellState,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    /// Loads the config, scans the plugin directory and builds the session.
    pub fn new(args: Args) -> Result<Self, SwaboxError> {
        let config_path = args.config.clone().unwrap_or_else(Config::default_path);
        let mut config = Config::load(&config_path);

        if let Some(dir) = &args.plugins_dir {
            config.plugins_dir = Some(dir.clone());
        }

        let system_info = SystemInfo::new();
        let plugins = if config.plugins_enabled && !args.no_plugins {
            let dir = config.plugins_dir();
            let registry = load_plugins(&dir, &system_info);
            info!(count = registry.len(), dir = %dir.display(), "plugins loaded");
            registry
        } else {
            PluginRegistry::new()
        };

        let command_dispatcher = create_dispatcher(plugins, system_info);
        let mut state = ShellState::new(config, Some(config_path));

        if args.ai && !state.ai_enabled() {
            if let Err(e) = state.enable_ai() {
                warn!("Error initializing AI: {}", e);
            }
        }

        Ok(Self {
            args,
            state,
            command_dispatcher,
        })
    }

    pub async fn run(&mut self) -> Result<(), SwaboxError> {
        if let Some(line) = self.args.command.clone() {
            let output = self.command_dispatcher.process(&mut self.state, &line).await;
            display::display_output(&output);
            return Ok(());
        }

        if !io::stdin().is_terminal() {
            return self.run_batch().await;
        }

        self.run_interactive().await
    }

    /// Dispatches each line of piped stdin in order.
    async fn run_batch(&mut self) -> Result<(), SwaboxError> {
        let lines: Vec<String> = io::stdin().lock().lines().collect::<Result<_, _>>()?;
        for line in lines {
            if is_exit(&line) {
                break;
            }
            let output = self.command_dispatcher.process(&mut self.state, &line).await;
            display::display_output(&output);
        }
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<(), SwaboxError> {
        display::display_welcome(
            self.command_dispatcher.plugins().len(),
            self.state.ai_enabled(),
        );

        let mut editor =
            input::create_editor(&self.command_dispatcher, self.state.config.history_size)?;

        loop {
            let prompt = input::prompt_for(
                &self.state.config.prompt_style,
                &self.state.current_directory,
            );
            let line = match input::read_input(&mut editor, &prompt) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    display::display_error(&e.to_string());
                    break;
                }
            };

            if is_exit(&line) {
                break;
            }

            let output = self.command_dispatcher.process(&mut self.state, &line).await;
            display::display_output(&output);
        }

        if let Err(e) = input::save_history(&mut editor) {
            warn!("Could not save input history: {}", e);
        }
        display::display_goodbye();

        Ok(())
    }
}

fn is_exit(line: &str) -> bool {
    let line = line.trim();
    EXIT_COMMANDS.iter().any(|cmd| line.eq_ignore_ascii_case(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words() {
        assert!(is_exit("exit"));
        assert!(is_exit("  QUIT "));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("echo exit"));
    }
}
