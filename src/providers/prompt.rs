use super::AiContext;

/// Prompt asking the model for a next command given recent activity.
pub fn suggestion_prompt(context: &AiContext) -> String {
    let history = if context.command_history.is_empty() {
        "(no commands yet)".to_string()
    } else {
        context.command_history.join("\n")
    };
    let task = if context.current_task.is_empty() {
        "(none)"
    } else {
        context.current_task.as_str()
    };

    format!(
        "Based on the following command history and context, suggest the next command:\n\n\
         Command History:\n{history}\n\n\
         Current Directory: {}\n\
         Current Task: {task}\n\n\
         Suggest a command that would be helpful in this context.",
        context.current_directory
    )
}

/// Prompt asking the model to translate a request into a bare command.
pub fn translation_prompt(query: &str) -> String {
    format!(
        "Convert the following natural language request into a terminal command:\n\n\
         Request: {}\n\n\
         Provide only the executable command without any explanation.",
        query.trim()
    )
}

/// Extracts a command from a model reply that may be wrapped in Markdown.
pub fn process_response(content: &str) -> String {
    let content = content.trim();

    if content.is_empty() {
        return String::new();
    }

    // Fenced code block, with or without a language tag
    if let Some(start_idx) = content.find("```") {
        let after_start = &content[start_idx + 3..];
        let code_block = match after_start.find("```") {
            Some(end) => &after_start[..end],
            None => after_start,
        };

        if let Some(first_newline) = code_block.find('\n') {
            let (tag, body) = code_block.split_at(first_newline);
            if !tag.trim().contains(' ') {
                return body.trim().to_string();
            }
        }
        return code_block.trim().to_string();
    }

    // Inline backticks
    if let Some(start) = content.find('`') {
        if let Some(end) = content[start + 1..].find('`').map(|i| i + start + 1) {
            return content[start + 1..end].trim().to_string();
        }
    }

    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_prompt_embeds_context() {
        let context = AiContext {
            command_history: vec!["[10:00:00] /tmp $ ls".to_string()],
            current_directory: "/tmp".to_string(),
            current_task: "clean up logs".to_string(),
        };
        let prompt = suggestion_prompt(&context);
        assert!(prompt.contains("[10:00:00] /tmp $ ls"));
        assert!(prompt.contains("Current Directory: /tmp"));
        assert!(prompt.contains("Current Task: clean up logs"));
    }

    #[test]
    fn translation_prompt_asks_for_bare_command() {
        let prompt = translation_prompt("  list big files ");
        assert!(prompt.contains("Request: list big files\n"));
        assert!(prompt.contains("only the executable command"));
    }

    #[test]
    fn strips_fences_and_backticks() {
        assert_eq!(process_response("```bash\nls -la\n```"), "ls -la");
        assert_eq!(process_response("```\ndu -sh *\n```"), "du -sh *");
        assert_eq!(process_response("Run `git status` now"), "git status");
        assert_eq!(process_response("  ls -la \n"), "ls -la");
        assert_eq!(process_response(""), "");
    }
}
