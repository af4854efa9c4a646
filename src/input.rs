use crate::commands::CommandDispatcher;
use crate::config::Config;
use crate::core::error::SwaboxError;

use console::style;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Context, EditMode, Editor, Helper};
use std::fs;

/// Completes command names in first position and file names elsewhere.
pub struct ShellHelper {
    filename_completer: FilenameCompleter,
    history_hinter: HistoryHinter,
    commands: Vec<String>,
}

impl ShellHelper {
    pub fn new(dispatcher: &CommandDispatcher) -> Self {
        Self {
            filename_completer: FilenameCompleter::new(),
            history_hinter: HistoryHinter::new(),
            commands: dispatcher.get_command_names(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let start = before_cursor.len() - before_cursor.trim_start().len();
        let word = &before_cursor[start..];

        if !word.contains(char::is_whitespace) && !word.starts_with(['!', '?']) {
            let word = word.to_lowercase();
            let matches: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(&word))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();

            if !matches.is_empty() {
                return Ok((start, matches));
            }
        }

        self.filename_completer.complete(line, pos, ctx)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.history_hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

/// Prompt text for the configured `prompt_style`.
pub fn prompt_for(prompt_style: &str, current_directory: &str) -> String {
    match prompt_style {
        "minimal" => "> ".to_string(),
        "path" => format!("{} $ ", style(current_directory).bold().blue()),
        _ => style("swabox> ").bold().green().to_string(),
    }
}

/// Creates a configured rustyline editor with the saved input history.
pub fn create_editor(
    dispatcher: &CommandDispatcher,
    max_history: usize,
) -> Result<Editor<ShellHelper, FileHistory>, SwaboxError> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .max_history_size(max_history.max(1))?
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)?;
    editor.set_helper(Some(ShellHelper::new(dispatcher)));

    let _ = editor.load_history(&Config::input_history_path());

    Ok(editor)
}

/// Reads a line. `Ok(None)` means the user asked to leave (Ctrl-C / Ctrl-D).
pub fn read_input(
    editor: &mut Editor<ShellHelper, FileHistory>,
    prompt: &str,
) -> Result<Option<String>, SwaboxError> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Saves the editor history next to the config file.
pub fn save_history(editor: &mut Editor<ShellHelper, FileHistory>) -> Result<(), SwaboxError> {
    let history_path = Config::input_history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    editor.save_history(&history_path)?;
    Ok(())
}
