use super::handler::{CommandContext, CommandHandler};
use crate::config::Provider;
use crate::core::error::SwaboxError;
use async_trait::async_trait;

const AI_NOT_ENABLED: &str = "AI features are not enabled. Use 'ai on' to enable.";
const AI_USAGE: &str = "Usage: ai [on|off|ask <query>|provider <name>]";

pub struct AiCommand;
pub struct AskCommand;
pub struct TaskCommand;
pub struct SuggestCommand;

#[async_trait]
impl CommandHandler for AiCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError> {
        let args = args.trim();
        if args.is_empty() {
            let status = if ctx.state.ai_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            return Ok(format!("AI features are currently {}. {}", status, AI_USAGE));
        }

        let (sub, rest) = match args.split_once(char::is_whitespace) {
            Some((sub, rest)) => (sub.to_lowercase(), rest.trim()),
            None => (args.to_lowercase(), ""),
        };

        match sub.as_str() {
            "on" => Ok(match ctx.state.enable_ai() {
                Ok(()) => "AI features enabled".to_string(),
                Err(e) => format!("AI features could not be enabled: {}", e),
            }),
            "off" => {
                ctx.state.disable_ai();
                Ok("AI features disabled".to_string())
            }
            "ask" => {
                if !ctx.state.ai_enabled() {
                    return Ok(AI_NOT_ENABLED.to_string());
                }
                if rest.is_empty() {
                    return Ok("Usage: ai ask <query>".to_string());
                }
                Ok(ctx.state.process_natural_language(rest).await)
            }
            "provider" => {
                if !ctx.state.ai_enabled() {
                    return Ok(AI_NOT_ENABLED.to_string());
                }
                if rest.is_empty() {
                    return Ok(match ctx.state.ai_manager() {
                        Some(manager) => format!(
                            "Current provider: {} ({})",
                            manager.active_provider(),
                            manager.model()
                        ),
                        None => AI_NOT_ENABLED.to_string(),
                    });
                }
                if Provider::from_str(rest).is_none() {
                    return Ok(format!("Supported providers: {}", Provider::supported_names()));
                }
                Ok(match ctx.state.switch_provider(rest) {
                    Ok(message) => message,
                    Err(e) => format!("Could not switch provider: {}", e),
                })
            }
            "model" => Ok(match ctx.state.ai_manager() {
                Some(manager) if ctx.state.ai_enabled() => {
                    format!("Model: {} ({})", manager.model(), manager.active_provider())
                }
                _ => AI_NOT_ENABLED.to_string(),
            }),
            _ => Ok(format!("Invalid AI command. {}", AI_USAGE)),
        }
    }

    fn help(&self) -> &'static str {
        "Toggle AI features or interact with AI"
    }
}

#[async_trait]
impl CommandHandler for AskCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError> {
        if args.trim().is_empty() {
            return Ok("Usage: ask <natural language query>".to_string());
        }
        if !ctx.state.ai_enabled() {
            return Ok(AI_NOT_ENABLED.to_string());
        }
        Ok(ctx.state.process_natural_language(args).await)
    }

    fn help(&self) -> &'static str {
        "Process natural language query"
    }
}

#[async_trait]
impl CommandHandler for TaskCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
    ) -> Result<String, SwaboxError> {
        let task = args.trim();
        if task.is_empty() {
            return Ok(if ctx.state.current_task.is_empty() {
                "No current task set. Usage: task <description>".to_string()
            } else {
                format!("Current task: {}", ctx.state.current_task)
            });
        }

        ctx.state.set_current_task(task);
        Ok(format!("Task set: {}", task))
    }

    fn help(&self) -> &'static str {
        "Set the current task description"
    }
}

#[async_trait]
impl CommandHandler for SuggestCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &str,
    ) -> Result<String, SwaboxError> {
        if !ctx.state.ai_enabled() {
            return Ok(AI_NOT_ENABLED.to_string());
        }
        Ok(ctx.state.ai_suggestion().await)
    }

    fn help(&self) -> &'static str {
        "Get AI command suggestions"
    }
}
