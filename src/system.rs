use crate::core::error::SwaboxError;
use std::env;
use std::path::Path;

/// Shell families, which differ in how a command string is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Cmd,
    PowerShell,
    /// sh, bash, zsh and friends
    UnixLike,
    Fish,
}

impl ShellType {
    /// Classifies a shell by its executable name.
    pub fn from_path(shell_path: &str) -> Self {
        let name = Path::new(shell_path)
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("sh")
            .to_lowercase();

        match name.as_str() {
            "fish" => ShellType::Fish,
            "cmd" => ShellType::Cmd,
            "powershell" | "pwsh" => ShellType::PowerShell,
            _ => ShellType::UnixLike,
        }
    }

    /// Flag that makes the shell execute the following string as a command.
    pub fn command_flag(&self) -> &'static str {
        match self {
            ShellType::Cmd => "/C",
            ShellType::PowerShell => "-Command",
            ShellType::UnixLike | ShellType::Fish => "-c",
        }
    }

    /// Quotes `arg` so the shell reads it back as one literal word.
    ///
    /// `cmd.exe` still expands `%VAR%` inside double quotes.
    pub fn quote(&self, arg: &str) -> Result<String, SwaboxError> {
        match self {
            ShellType::UnixLike => shlex::try_quote(arg)
                .map(|quoted| quoted.into_owned())
                .map_err(|e| SwaboxError::Input(format!("Cannot quote argument: {}", e))),
            ShellType::Fish => Ok(format!(
                "'{}'",
                arg.replace('\\', "\\\\").replace('\'', "\\'")
            )),
            ShellType::PowerShell => Ok(format!("'{}'", arg.replace('\'', "''"))),
            ShellType::Cmd => Ok(format!("\"{}\"", arg.replace('"', "\"\""))),
        }
    }
}

/// Host facts shown by the `system` built-in and the shell used to run
/// `!` commands and plugin scripts.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os_type: String,
    pub os_version: String,
    pub architecture: String,
    pub shell_path: String,
    pub shell_type: ShellType,
}

impl SystemInfo {
    pub fn new() -> Self {
        let os = os_info::get();
        let shell_path = detect_shell_path();

        SystemInfo {
            os_type: os.os_type().to_string(),
            os_version: os.version().to_string(),
            architecture: os.architecture().unwrap_or(env::consts::ARCH).to_string(),
            shell_type: ShellType::from_path(&shell_path),
            shell_path,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Operating System: {} {}\nArchitecture: {}\nShell: {}\nSwabox Version: {}\n",
            self.os_type,
            self.os_version,
            self.architecture,
            self.shell_path,
            env!("CARGO_PKG_VERSION"),
        )
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(windows)]
fn detect_shell_path() -> String {
    if env::var("PSModulePath").is_ok() {
        return env::var("POSH_EXECUTABLE")
            .ok()
            .filter(|path| Path::new(path).exists())
            .unwrap_or_else(|| "powershell.exe".to_string());
    }
    env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
}

#[cfg(not(windows))]
fn detect_shell_path() -> String {
    env::var("SHELL")
        .ok()
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| "/bin/sh".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_family_from_path() {
        assert_eq!(ShellType::from_path("/bin/bash"), ShellType::UnixLike);
        assert_eq!(ShellType::from_path("/usr/local/bin/fish"), ShellType::Fish);
        assert_eq!(ShellType::from_path("cmd.exe"), ShellType::Cmd);
        assert_eq!(ShellType::from_path("pwsh.exe"), ShellType::PowerShell);
        assert_eq!(ShellType::from_path(""), ShellType::UnixLike);
    }

    #[test]
    fn command_flag_matches_shell_family() {
        assert_eq!(ShellType::UnixLike.command_flag(), "-c");
        assert_eq!(ShellType::Fish.command_flag(), "-c");
        assert_eq!(ShellType::Cmd.command_flag(), "/C");
        assert_eq!(ShellType::PowerShell.command_flag(), "-Command");
    }

    #[test]
    fn summary_lists_platform_facts() {
        let info = SystemInfo::new();
        let summary = info.summary();
        assert!(summary.starts_with("Operating System: "));
        assert!(summary.contains("Architecture: "));
        assert!(summary.contains(&info.shell_path));
    }

    #[test]
    fn quoting_keeps_arguments_literal() {
        assert_eq!(ShellType::UnixLike.quote("world").unwrap(), "world");
        let quoted = ShellType::UnixLike.quote("it's; rm -rf ~").unwrap();
        assert_eq!(shlex::split(&quoted).unwrap(), vec!["it's; rm -rf ~".to_string()]);
        assert!(ShellType::UnixLike.quote("nul\0byte").is_err());

        assert_eq!(ShellType::Fish.quote(r"it's a\b").unwrap(), r"'it\'s a\\b'");
        assert_eq!(ShellType::PowerShell.quote("it's").unwrap(), "'it''s'");
        assert_eq!(ShellType::Cmd.quote(r#"say "hi""#).unwrap(), r#""say ""hi""""#);
    }
}
