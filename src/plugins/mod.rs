//! Command plugins.
//!
//! A plugin contributes one command to the shell. Plugins are discovered at
//! startup from a directory of JSON manifests, one file per plugin:
//!
//! ```json
//! {
//!   "command_name": "weather",
//!   "description": "Show the weather for a city",
//!   "run": "echo Weather for {{args}}: 22C, partly cloudy"
//! }
//! ```
//!
//! `command_name` is the command token and `run` is the entry point, a shell
//! command template. `{{args}}` is replaced with everything after the command
//! token, quoted as one word for the detected shell, so it must not sit inside
//! quotes of its own. The same string is exported unquoted as `SWABOX_ARGS`. A file missing either
//! field does not take part. Plugins run with the full privileges of the
//! shell, there is no sandbox.
//!
//! Compiled-in commands can implement [`CommandPlugin`] directly and be added
//! with [`PluginRegistry::register`].

mod loader;
mod registry;
mod script;

pub use loader::{PLUGIN_EXTENSION, load_plugin, load_plugins};
pub use registry::PluginRegistry;
pub use script::{PluginManifest, ScriptPlugin};

use crate::core::error::SwaboxError;
use async_trait::async_trait;

/// The two-member plugin contract: a command name and an entry point.
#[async_trait]
pub trait CommandPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    async fn run(&self, args: &str) -> Result<String, SwaboxError>;
}
