use crate::core::error::SwaboxError;
use crate::system::SystemInfo;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of one shell invocation.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
    pub success: bool,
}

/// Runs `command` through the detected shell in `cwd` and captures both streams.
///
/// There is no timeout: an unresponsive command blocks the caller until it exits.
pub async fn execute_command(
    command: &str,
    system_info: &SystemInfo,
    cwd: &Path,
    envs: &[(&str, &str)],
) -> Result<ShellOutput, SwaboxError> {
    let mut cmd = Command::new(&system_info.shell_path);
    cmd.arg(system_info.shell_type.command_flag()).arg(command);

    if cwd.is_dir() {
        cmd.current_dir(cwd);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().await?;

    Ok(ShellOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
        success: output.status.success(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::system::ShellType;

    fn sh() -> SystemInfo {
        SystemInfo {
            shell_path: "/bin/sh".to_string(),
            shell_type: ShellType::UnixLike,
            ..SystemInfo::new()
        }
    }

    #[tokio::test]
    async fn captures_stdout_and_status() {
        let cwd = std::env::temp_dir();
        let out = execute_command("echo hi", &sh(), &cwd, &[]).await.unwrap();
        assert_eq!(out.stdout, "hi\n");
        assert!(out.success);
        assert_eq!(out.status, Some(0));
    }

    #[tokio::test]
    async fn passes_environment_and_reports_failure() {
        let cwd = std::env::temp_dir();
        let out = execute_command("echo $FOO >&2; exit 3", &sh(), &cwd, &[("FOO", "bar")])
            .await
            .unwrap();
        assert_eq!(out.stderr, "bar\n");
        assert!(!out.success);
        assert_eq!(out.status, Some(3));
    }

    #[tokio::test]
    async fn runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = execute_command("pwd", &sh(), dir.path(), &[]).await.unwrap();
        let reported = std::path::PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
