use super::registry::CommandRegistry;
use crate::core::error::SwaboxError;
use crate::plugins::PluginRegistry;
use crate::state::ShellState;
use crate::system::SystemInfo;
use async_trait::async_trait;
use chrono::Local;
use std::io;
use std::path::PathBuf;

/// What a built-in gets to see while it runs.
pub struct CommandContext<'a> {
    pub state: &'a mut ShellState,
    pub builtins: &'a CommandRegistry,
    pub plugins: &'a PluginRegistry,
    pub system_info: &'a SystemInfo,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError>;

    /// One-line description shown by `help`.
    fn help(&self) -> &'static str;
}

pub struct HelpCommand;
pub struct ClearCommand;
pub struct HistoryCommand;
pub struct EchoCommand;
pub struct DateCommand;
pub struct TimeCommand;
pub struct InfoCommand;
pub struct SystemCommand;
pub struct CdCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        let mut help_text = String::from("Available commands:\n\nBuilt-in commands:\n");
        for (name, description) in ctx.builtins.entries() {
            help_text.push_str(&format!("  {} - {}\n", name, description));
        }

        help_text.push_str("\nPlugin commands:\n");
        if ctx.plugins.is_empty() {
            help_text.push_str("  (none)\n");
        }
        for name in ctx.plugins.names() {
            let description = ctx
                .plugins
                .get(&name)
                .and_then(|p| p.description().map(str::to_string))
                .unwrap_or_else(|| "No description".to_string());
            help_text.push_str(&format!("  {} - {}\n", name, description));
        }

        help_text.push_str("\nSpecial syntax:\n");
        help_text.push_str("  !<command> - Execute shell command\n");
        help_text.push_str("  ?<query> - Natural language query (when AI enabled)\n");

        Ok(help_text)
    }

    fn help(&self) -> &'static str {
        "Display available commands"
    }
}

#[async_trait]
impl CommandHandler for ClearCommand {
    async fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        let term = console::Term::stdout();
        if term.is_term() {
            term.clear_screen()?;
        }
        Ok(String::new())
    }

    fn help(&self) -> &'static str {
        "Clear the screen"
    }
}

#[async_trait]
impl CommandHandler for HistoryCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        if ctx.state.history_len() == 0 {
            return Ok("No command history.".to_string());
        }

        let mut history_text = String::from("Command History:\n");
        for (i, entry) in ctx.state.history().enumerate() {
            history_text.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.command
            ));
        }
        Ok(history_text)
    }

    fn help(&self) -> &'static str {
        "Show command history"
    }
}

#[async_trait]
impl CommandHandler for EchoCommand {
    async fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError> {
        Ok(args.to_string())
    }

    fn help(&self) -> &'static str {
        "Display the provided text"
    }
}

#[async_trait]
impl CommandHandler for DateCommand {
    async fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        Ok(Local::now().format("%Y-%m-%d").to_string())
    }

    fn help(&self) -> &'static str {
        "Display the current date"
    }
}

#[async_trait]
impl CommandHandler for TimeCommand {
    async fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        Ok(Local::now().format("%H:%M:%S").to_string())
    }

    fn help(&self) -> &'static str {
        "Display the current time"
    }
}

#[async_trait]
impl CommandHandler for InfoCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        let uptime = ctx.state.uptime().as_secs();
        let (hours, minutes, seconds) = (uptime / 3600, (uptime % 3600) / 60, uptime % 60);

        let ai_status = match ctx.state.ai_manager() {
            Some(manager) if ctx.state.ai_enabled() => format!(
                "Enabled ({}, {})",
                manager.active_provider(),
                manager.model()
            ),
            _ => "Disabled".to_string(),
        };

        Ok(format!(
            "Swabox: AI-Enhanced Terminal\n\
             Version: {}\n\
             Description: Modern terminal with AI capabilities\n\
             Uptime: {}h {}m {}s\n\
             AI Features: {}\n",
            env!("CARGO_PKG_VERSION"),
            hours,
            minutes,
            seconds,
            ai_status
        ))
    }

    fn help(&self) -> &'static str {
        "Display information about Swabox"
    }
}

#[async_trait]
impl CommandHandler for SystemCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        Ok(ctx.system_info.summary())
    }

    fn help(&self) -> &'static str {
        "Display system information"
    }
}

#[async_trait]
impl CommandHandler for CdCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError> {
        let target = args.trim();
        if target.is_empty() {
            return Ok(format!("Current directory: {}", current_dir_display()));
        }

        let target = expand_home(target);
        let shown = target.display();
        match std::env::set_current_dir(&target) {
            Ok(()) => {
                let now = current_dir_display();
                ctx.state.current_directory = now.clone();
                Ok(format!("Changed directory to: {}", now))
            }
            Err(e) => Ok(match e.kind() {
                io::ErrorKind::NotFound => format!("Directory not found: {}", shown),
                io::ErrorKind::PermissionDenied => format!("Permission denied: {}", shown),
                _ => format!("Error changing directory: {}", e),
            }),
        }
    }

    fn help(&self) -> &'static str {
        "Change directory"
    }
}

fn current_dir_display() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| ".".to_string())
}

/// Expands a leading `~` or `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return match path.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => home,
            };
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_expansion() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/src"), home.join("src"));
        assert_eq!(expand_home("~user"), PathBuf::from("~user"));
        assert_eq!(expand_home("/tmp"), PathBuf::from("/tmp"));
    }
}
