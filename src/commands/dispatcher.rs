use super::{
    ai::{AiCommand, AskCommand, SuggestCommand, TaskCommand},
    handler::{
        CdCommand, ClearCommand, CommandContext, DateCommand, EchoCommand, HelpCommand,
        HistoryCommand, InfoCommand, SystemCommand, TimeCommand,
    },
    registry::CommandRegistry,
};
use crate::core::executor::execute_command;
use crate::plugins::PluginRegistry;
use crate::state::ShellState;
use crate::system::SystemInfo;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const SHELL_ESCAPE: char = '!';
pub const NATURAL_LANGUAGE_ESCAPE: char = '?';

/// How an input line will be handled. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchClass<'a> {
    Builtin { name: String, args: &'a str },
    Plugin { name: String, args: &'a str },
    ShellEscape(&'a str),
    NaturalLanguage(&'a str),
    Unknown(String),
}

/// Splits a line into its lowercased first token and the rest.
pub fn split_command(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, args)) => (command.to_lowercase(), args.trim_start()),
        None => (line.to_lowercase(), ""),
    }
}

/// Routes input lines to built-ins, plugins, the shell or the AI provider.
///
/// `process` never fails: every handler outcome, including errors and
/// plugin panics, comes back as display text.
#[derive(Clone)]
pub struct CommandDispatcher {
    builtins: Arc<CommandRegistry>,
    plugins: Arc<PluginRegistry>,
    system_info: Arc<SystemInfo>,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry, plugins: PluginRegistry, system_info: SystemInfo) -> Self {
        Self {
            builtins: Arc::new(registry),
            plugins: Arc::new(plugins),
            system_info: Arc::new(system_info),
        }
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Built-in and plugin names, for completion.
    pub fn get_command_names(&self) -> Vec<String> {
        let mut names = self.builtins.get_command_names();
        names.extend(self.plugins.names());
        names.sort();
        names.dedup();
        names
    }

    pub fn classify<'a>(&self, line: &'a str, ai_enabled: bool) -> DispatchClass<'a> {
        let line = line.trim();
        let (command, args) = split_command(line);

        if self.builtins.contains(&command) {
            DispatchClass::Builtin {
                name: command,
                args,
            }
        } else if self.plugins.contains(&command) {
            DispatchClass::Plugin {
                name: command,
                args,
            }
        } else if let Some(shell) = line.strip_prefix(SHELL_ESCAPE) {
            DispatchClass::ShellEscape(shell.trim())
        } else if let Some(query) = line
            .strip_prefix(NATURAL_LANGUAGE_ESCAPE)
            .filter(|_| ai_enabled)
        {
            DispatchClass::NaturalLanguage(query.trim())
        } else {
            DispatchClass::Unknown(command)
        }
    }

    /// Records `line` in the history, routes it and returns the text to show.
    /// Blank lines produce an empty string and are not recorded.
    pub async fn process(&self, state: &mut ShellState, line: &str) -> String {
        let line = line.trim();
        if line.is_empty() {
            return String::new();
        }

        state.add_to_history(line);

        let class = self.classify(line, state.ai_enabled());
        debug!(?class, "dispatching");

        match class {
            DispatchClass::Builtin { name, args } => self.run_builtin(state, &name, args).await,
            DispatchClass::Plugin { name, args } => self.run_plugin(&name, args).await,
            DispatchClass::ShellEscape(command) => self.run_shell(state, command).await,
            DispatchClass::NaturalLanguage(query) => {
                if query.is_empty() {
                    return format!("Usage: {}<query>", NATURAL_LANGUAGE_ESCAPE);
                }
                state.process_natural_language(query).await
            }
            DispatchClass::Unknown(command) => {
                let mut message = format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    command
                );
                if state.ai_enabled() {
                    message.push_str("\n\nDid you mean one of these?\n");
                    message.push_str(&state.ai_suggestion().await);
                }
                message
            }
        }
    }

    async fn run_builtin(&self, state: &mut ShellState, name: &str, args: &str) -> String {
        let Some(handler) = self.builtins.get(name) else {
            return format!("Unknown command: {}. Type 'help' for available commands.", name);
        };

        let mut ctx = CommandContext {
            state,
            builtins: &self.builtins,
            plugins: &self.plugins,
            system_info: &self.system_info,
        };

        match handler.execute(&mut ctx, args).await {
            Ok(output) => output,
            Err(e) => format!("Error executing command '{}': {}", name, e),
        }
    }

    /// Runs the plugin on its own task so a panicking plugin is contained.
    async fn run_plugin(&self, name: &str, args: &str) -> String {
        let Some(plugin) = self.plugins.get(name) else {
            return format!("Unknown command: {}. Type 'help' for available commands.", name);
        };

        let args = args.to_string();
        let task = tokio::spawn(async move { plugin.run(&args).await });

        match task.await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => format!("Error executing plugin command: {}", e),
            Err(join_error) if join_error.is_panic() => {
                format!("Error executing plugin command: {} panicked", name)
            }
            Err(join_error) => format!("Error executing plugin command: {}", join_error),
        }
    }

    async fn run_shell(&self, state: &ShellState, command: &str) -> String {
        if command.is_empty() {
            return format!("Usage: {}<command>", SHELL_ESCAPE);
        }

        let cwd = Path::new(&state.current_directory);
        match execute_command(command, &self.system_info, cwd, &[]).await {
            Ok(output) if !output.stdout.is_empty() => output.stdout,
            Ok(output) => format!("Command executed. {}", output.stderr),
            Err(e) => format!("Error executing shell command: {}", e),
        }
    }
}

pub fn create_command_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("help", HelpCommand);
    registry.register("clear", ClearCommand);
    registry.register("history", HistoryCommand);
    registry.register("echo", EchoCommand);
    registry.register("date", DateCommand);
    registry.register("time", TimeCommand);
    registry.register("info", InfoCommand);
    registry.register("system", SystemCommand);
    registry.register("ai", AiCommand);
    registry.register("ask", AskCommand);
    registry.register("task", TaskCommand);
    registry.register("suggest", SuggestCommand);
    registry.register("cd", CdCommand);

    registry
}

/// Dispatcher with the standard built-ins and the given plugins.
pub fn create_dispatcher(plugins: PluginRegistry, system_info: SystemInfo) -> CommandDispatcher {
    CommandDispatcher::new(create_command_registry(), plugins, system_info)
}
