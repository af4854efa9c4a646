use super::CommandPlugin;
use crate::core::error::SwaboxError;
use crate::core::executor::execute_command;
use crate::system::SystemInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ARGS_PLACEHOLDER: &str = "{{args}}";
pub const ARGS_ENV: &str = "SWABOX_ARGS";

/// On-disk shape of a plugin file. Both contract fields are optional here so
/// that a file without them still parses and can be skipped quietly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManifest {
    pub command_name: Option<String>,
    pub run: Option<String>,
    pub description: Option<String>,
}

/// A plugin backed by a shell command template.
#[derive(Debug, Clone)]
pub struct ScriptPlugin {
    name: String,
    template: String,
    description: Option<String>,
    source: PathBuf,
    system_info: SystemInfo,
}

impl ScriptPlugin {
    /// Returns `None` unless the manifest carries a non-empty name and entry point.
    pub fn from_manifest(
        manifest: PluginManifest,
        source: PathBuf,
        system_info: SystemInfo,
    ) -> Option<Self> {
        let name = manifest.command_name?.trim().to_lowercase();
        let template = manifest.run?;
        if name.is_empty() || name.contains(char::is_whitespace) || template.trim().is_empty() {
            return None;
        }

        Some(Self {
            name,
            template,
            description: manifest.description.filter(|d| !d.trim().is_empty()),
            source,
            system_info,
        })
    }

    /// Manifest file the plugin was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Substitutes `args` for `{{args}}` as a single quoted word, so the
    /// script sees the text verbatim. Empty args substitute nothing.
    fn render(&self, args: &str) -> Result<String, SwaboxError> {
        if !self.template.contains(ARGS_PLACEHOLDER) {
            return Ok(self.template.clone());
        }
        let value = if args.is_empty() {
            String::new()
        } else {
            self.system_info.shell_type.quote(args)?
        };
        Ok(self.template.replace(ARGS_PLACEHOLDER, &value))
    }
}

#[async_trait]
impl CommandPlugin for ScriptPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn run(&self, args: &str) -> Result<String, SwaboxError> {
        let command = self.render(args)?;
        let cwd = std::env::current_dir()?;
        let output =
            execute_command(&command, &self.system_info, &cwd, &[(ARGS_ENV, args)]).await?;

        if output.success {
            return Ok(output.stdout);
        }

        let reason = if output.stderr.trim().is_empty() {
            match output.status {
                Some(code) => format!("{} exited with status {}", self.name, code),
                None => format!("{} was terminated by a signal", self.name),
            }
        } else {
            output.stderr.trim().to_string()
        };
        Err(SwaboxError::PluginExecution(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ShellType;

    fn manifest(name: Option<&str>, run: Option<&str>) -> PluginManifest {
        PluginManifest {
            command_name: name.map(String::from),
            run: run.map(String::from),
            description: None,
        }
    }

    fn build(m: PluginManifest) -> Option<ScriptPlugin> {
        ScriptPlugin::from_manifest(m, PathBuf::from("p.json"), SystemInfo::new())
    }

    #[test]
    fn requires_name_and_entry_point() {
        assert!(build(manifest(None, Some("echo hi"))).is_none());
        assert!(build(manifest(Some("hi"), None)).is_none());
        assert!(build(manifest(Some("  "), Some("echo hi"))).is_none());
        assert!(build(manifest(Some("hi"), Some(" "))).is_none());
        assert!(build(manifest(Some("two words"), Some("echo"))).is_none());
    }

    #[test]
    fn name_is_lowercased() {
        let plugin = build(manifest(Some("Weather"), Some("echo"))).unwrap();
        assert_eq!(plugin.name(), "weather");
        assert_eq!(plugin.description(), None);
    }

    fn posix(m: PluginManifest) -> ScriptPlugin {
        let system_info = SystemInfo {
            shell_path: "/bin/sh".to_string(),
            shell_type: ShellType::UnixLike,
            ..SystemInfo::new()
        };
        ScriptPlugin::from_manifest(m, PathBuf::from("p.json"), system_info).unwrap()
    }

    #[test]
    fn template_substitutes_args() {
        let plugin = posix(manifest(Some("greet"), Some("echo hello {{args}}")));
        assert_eq!(plugin.render("world").unwrap(), "echo hello world");
        assert_eq!(plugin.render("").unwrap(), "echo hello ");
        assert_eq!(
            plugin.render("a; b").unwrap(),
            format!("echo hello {}", shlex::try_quote("a; b").unwrap())
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_syntax_in_args_is_not_interpreted() {
        let plugin = posix(manifest(Some("say"), Some("echo {{args}}")));

        assert_eq!(plugin.run("it's fine").await.unwrap(), "it's fine\n");
        assert_eq!(plugin.run("a; echo b").await.unwrap(), "a; echo b\n");
        assert_eq!(plugin.run("$HOME `id`").await.unwrap(), "$HOME `id`\n");
    }
}
