use std::fs;
use std::path::Path;
use swabox::SwaboxError;
use swabox::commands::create_dispatcher;
use swabox::config::Config;
use swabox::plugins::{CommandPlugin, load_plugin, load_plugins};
use swabox::state::ShellState;
use swabox::system::SystemInfo;
use tempfile::TempDir;

fn write_plugin(dir: &Path, file: &str, contents: &str) {
    fs::write(dir.join(file), contents).unwrap();
}

fn manifest(name: &str, run: &str) -> String {
    serde_json::json!({
        "command_name": name,
        "description": format!("{name} plugin"),
        "run": run,
    })
    .to_string()
}

#[test]
fn missing_directory_is_created() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("plugins");

    let registry = load_plugins(&dir, &SystemInfo::new());

    assert!(registry.is_empty());
    assert!(dir.is_dir());
}

#[test]
fn bad_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "alpha.json", &manifest("alpha", "echo alpha"));
    write_plugin(dir.path(), "beta.json", &manifest("Beta", "echo beta"));
    write_plugin(dir.path(), "broken.json", "{ not json");
    write_plugin(
        dir.path(),
        "no_contract.json",
        r#"{"description": "nothing to run"}"#,
    );
    write_plugin(dir.path(), "__private.json", &manifest("private", "echo no"));
    write_plugin(dir.path(), "readme.txt", &manifest("readme", "echo no"));

    let registry = load_plugins(dir.path(), &SystemInfo::new());

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.names(), vec!["alpha".to_string(), "beta".to_string()]);
    assert!(!registry.contains("private"));
    assert!(!registry.contains("readme"));
}

#[test]
fn load_plugin_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "broken.json", "[1, 2");

    let result = load_plugin(&dir.path().join("broken.json"), &SystemInfo::new());
    match result {
        Err(SwaboxError::PluginLoad { path, .. }) => {
            assert_eq!(path, dir.path().join("broken.json"));
        }
        other => panic!("expected a load error, got {:?}", other.map(|p| p.is_some())),
    }
}

#[test]
fn bundled_weather_plugin_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("plugins/weather.json");
    let plugin = load_plugin(&path, &SystemInfo::new()).unwrap().unwrap();

    assert_eq!(plugin.name(), "weather");
    assert_eq!(plugin.source(), path.as_path());
    assert!(plugin.description().unwrap().contains("weather"));
}

#[cfg(unix)]
#[tokio::test]
async fn last_file_wins_on_name_clash() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "a_first.json", &manifest("dup", "echo first"));
    write_plugin(dir.path(), "b_second.json", &manifest("DUP", "echo second"));

    let registry = load_plugins(dir.path(), &SystemInfo::new());
    assert_eq!(registry.len(), 1);

    let plugin = registry.get("dup").unwrap();
    assert_eq!(plugin.run("").await.unwrap(), "second\n");
}

#[cfg(unix)]
#[tokio::test]
async fn arguments_reach_the_script() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "greet.json", &manifest("greet", "echo hello {{args}}"));
    write_plugin(dir.path(), "env.json", &manifest("env", "echo \"$SWABOX_ARGS\""));

    let registry = load_plugins(dir.path(), &SystemInfo::new());

    let greet = registry.get("greet").unwrap();
    assert_eq!(greet.run("world").await.unwrap(), "hello world\n");

    let env = registry.get("env").unwrap();
    assert_eq!(env.run("a b").await.unwrap(), "a b\n");
}

#[cfg(unix)]
#[tokio::test]
async fn arguments_are_passed_verbatim() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "say.json", &manifest("say", "echo {{args}}"));

    let registry = load_plugins(dir.path(), &SystemInfo::new());
    let dispatcher = create_dispatcher(registry, SystemInfo::new());
    let mut state = ShellState::new(Config::default(), None);

    assert_eq!(
        dispatcher.process(&mut state, "say it's fine").await,
        "it's fine\n"
    );
    assert_eq!(
        dispatcher.process(&mut state, "say a; echo INJECTED").await,
        "a; echo INJECTED\n"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn failing_scripts_surface_through_dispatch() {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "bad.json", &manifest("bad", "echo broken >&2; exit 2"));
    write_plugin(dir.path(), "quiet.json", &manifest("quiet", "exit 4"));
    write_plugin(dir.path(), "greet.json", &manifest("greet", "echo hello {{args}}"));

    let registry = load_plugins(dir.path(), &SystemInfo::new());
    let dispatcher = create_dispatcher(registry, SystemInfo::new());
    let mut state = ShellState::new(Config::default(), None);

    assert_eq!(
        dispatcher.process(&mut state, "bad").await,
        "Error executing plugin command: broken"
    );
    assert_eq!(
        dispatcher.process(&mut state, "quiet").await,
        "Error executing plugin command: quiet exited with status 4"
    );
    assert_eq!(
        dispatcher.process(&mut state, "GREET there").await,
        "hello there\n"
    );

    let help = dispatcher.process(&mut state, "help").await;
    assert!(help.contains("  greet - greet plugin\n"));
}
