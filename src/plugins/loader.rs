use super::registry::PluginRegistry;
use super::CommandPlugin;
use super::script::{PluginManifest, ScriptPlugin};
use crate::core::error::SwaboxError;
use crate::system::SystemInfo;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extension of plugin manifests.
pub const PLUGIN_EXTENSION: &str = "json";

/// Files starting with this prefix are private and never loaded.
const PRIVATE_PREFIX: &str = "__";

/// Scans `dir` and builds a registry from every valid plugin in it.
///
/// A missing directory is created and yields an empty registry. Files are
/// visited in file-name order, so on a name clash the lexicographically last
/// file wins. A file that cannot be read or parsed is reported and skipped.
pub fn load_plugins(dir: &Path, system_info: &SystemInfo) -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Could not create plugin directory {}: {}", dir.display(), e);
        }
        return registry;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not read plugin directory {}: {}", dir.display(), e);
            return registry;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_candidate(path))
        .collect();
    candidates.sort();

    for path in candidates {
        match load_plugin(&path, system_info) {
            Ok(Some(plugin)) => {
                debug!(plugin = plugin.name(), source = %plugin.source().display(), "loaded plugin");
                registry.register(plugin)
            }
            Ok(None) => debug!("{} does not define a plugin command", path.display()),
            Err(e) => warn!("{}", e),
        }
    }

    registry
}

/// Loads one manifest. `Ok(None)` means the file parsed but does not
/// satisfy the plugin contract.
pub fn load_plugin(
    path: &Path,
    system_info: &SystemInfo,
) -> Result<Option<ScriptPlugin>, SwaboxError> {
    let load_error = |reason: String| SwaboxError::PluginLoad {
        path: path.to_path_buf(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let manifest: PluginManifest =
        serde_json::from_str(&contents).map_err(|e| load_error(e.to_string()))?;

    Ok(ScriptPlugin::from_manifest(
        manifest,
        path.to_path_buf(),
        system_info.clone(),
    ))
}

fn is_candidate(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PLUGIN_EXTENSION));
    let is_private = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(PRIVATE_PREFIX));
    has_extension && !is_private
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_filter() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let private = dir.path().join("__init__.json");
        let other = dir.path().join("notes.txt");
        for path in [&good, &private, &other] {
            fs::write(path, "{}").unwrap();
        }
        fs::create_dir(dir.path().join("folder.json")).unwrap();

        assert!(is_candidate(&good));
        assert!(!is_candidate(&private));
        assert!(!is_candidate(&other));
        assert!(!is_candidate(&dir.path().join("folder.json")));
    }
}
