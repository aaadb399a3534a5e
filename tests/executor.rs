//! ProcessExecutor tests against real subprocesses (unix shells only).
#![cfg(unix)]

use std::collections::HashMap;

use odo_adapter::adapter::OdoAdapter;
use odo_adapter::config::Config;
use odo_adapter::dispatch::cli::{MAX_OUTPUT_BYTES, ProcessExecutor};
use odo_adapter::dispatch::{CommandExecutor, CommandLine, ExecOptions};
use odo_adapter::error::{OdoError, SIGNALLED_EXIT_CODE};

fn sh(script: &str) -> CommandLine {
    CommandLine::new("sh").arg("-c").arg(script)
}

#[test]
fn output_cap_is_bounded() {
    assert!(MAX_OUTPUT_BYTES > 0 && MAX_OUTPUT_BYTES <= 10 * 1024 * 1024);
}

#[test]
fn command_line_display_joins_args() {
    let cmd = CommandLine::new("odo").args(["catalog", "list", "components"]);
    assert_eq!(cmd.to_string(), "odo catalog list components");
}

#[tokio::test]
async fn captures_stdout_verbatim_including_trailing_newline() {
    let result = ProcessExecutor::new()
        .execute(&sh("printf 'odo v0.0.13 (65b5bed8)\\n'"), &ExecOptions::default())
        .await;
    assert!(result.is_success(), "unexpected error: {:?}", result.error);
    assert_eq!(result.stdout, "odo v0.0.13 (65b5bed8)\n");
    assert_eq!(result.stderr.as_deref(), Some(""));
    assert_eq!(result.exit_code, Some(0));
}

#[tokio::test]
async fn non_zero_exit_sets_error_and_keeps_streams() {
    let result = ProcessExecutor::new()
        .execute(
            &sh("echo partial; echo 'not logged in' >&2; exit 3"),
            &ExecOptions::default(),
        )
        .await;
    assert_eq!(result.exit_code, Some(3));
    assert_eq!(result.stdout, "partial\n");
    assert_eq!(
        result.error,
        Some(OdoError::ProcessExit {
            code: 3,
            stderr: "not logged in\n".to_string(),
        })
    );
}

#[tokio::test]
async fn missing_program_reports_spawn_failure() {
    let result = ProcessExecutor::new()
        .execute(
            &CommandLine::new("odo-adapter-test-definitely-missing"),
            &ExecOptions::default(),
        )
        .await;
    let err = result.error.expect("spawn should fail");
    assert!(err.is_spawn_failure());
    assert!(result.stdout.is_empty());
    assert_eq!(result.exit_code, None);
}

#[tokio::test]
async fn options_are_passed_through() {
    let dir = std::env::temp_dir();
    let mut env = HashMap::new();
    env.insert("ODO_ADAPTER_TEST_VAR".to_string(), "hello".to_string());
    let options = ExecOptions {
        working_directory: Some(dir.clone()),
        env,
    };
    let result = ProcessExecutor::new()
        .execute(&sh("echo \"$ODO_ADAPTER_TEST_VAR\"; pwd -P"), &options)
        .await;
    let mut lines = result.stdout.lines();
    assert_eq!(lines.next(), Some("hello"));
    let expected = dir.canonicalize().unwrap();
    assert_eq!(lines.next().map(std::path::PathBuf::from), Some(expected));
}

#[tokio::test]
async fn runaway_output_is_capped() {
    let executor = ProcessExecutor::new().with_max_output_bytes(1024);
    // `yes` itself, not via sh, so the killed process is the direct child.
    let runaway = CommandLine::new("yes").arg("odo");
    let result = executor.execute(&runaway, &ExecOptions::default()).await;
    assert_eq!(result.stdout.len(), 1024);
    assert_eq!(result.exit_code, None);
    assert_eq!(
        result.error,
        Some(OdoError::ProcessExit {
            code: SIGNALLED_EXIT_CODE,
            stderr: String::new(),
        })
    );
}

#[tokio::test]
async fn output_of_exactly_cap_bytes_exits_cleanly() {
    let executor = ProcessExecutor::new().with_max_output_bytes(1024);
    let result = executor
        .execute(
            &sh("head -c 1024 /dev/zero | tr '\\0' a"),
            &ExecOptions::default(),
        )
        .await;
    assert!(result.is_success(), "unexpected error: {:?}", result.error);
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.stdout, "a".repeat(1024));
}

#[tokio::test]
async fn one_byte_over_cap_is_truncated_and_killed() {
    let executor = ProcessExecutor::new().with_max_output_bytes(1024);
    let result = executor
        .execute(
            &sh("head -c 1025 /dev/zero | tr '\\0' a; sleep 5"),
            &ExecOptions::default(),
        )
        .await;
    assert_eq!(result.stdout, "a".repeat(1024));
    assert_eq!(result.exit_code, None);
    assert!(!result.is_success());
}

#[tokio::test]
async fn concurrent_invocations_are_independent() {
    let executor = ProcessExecutor::new();
    let options = ExecOptions::default();
    let cmd_a = sh("sleep 0.2; echo a");
    let cmd_b = sh("echo b");
    let (a, b) = tokio::join!(
        executor.execute(&cmd_a, &options),
        executor.execute(&cmd_b, &options),
    );
    assert_eq!(a.stdout, "a\n");
    assert_eq!(b.stdout, "b\n");
}

#[tokio::test]
async fn adapter_end_to_end_with_fake_odo_script() {
    let dir = std::env::temp_dir().join(format!("odo-adapter-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let script = dir.join("odo");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
case \"$1\" in\n\
  version) echo 'odo v0.0.17 (deadbeef)' ;;\n\
  catalog) if [ \"$3\" = services ]; then printf 'NAME PLANS\\nmongodb default,large\\n'; \
else printf 'NAME PROJECT TAGS\\nnodejs openshift 8,10,latest\\n'; fi ;;\n\
  *) echo unknown >&2; exit 1 ;;\n\
esac\n",
    )
    .unwrap();
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = Config {
        odo_path: script.display().to_string(),
        ..Config::default()
    };
    let adapter = OdoAdapter::new(config);

    assert_eq!(adapter.version().await, "0.0.17");
    assert_eq!(adapter.component_types().await, vec!["nodejs"]);
    assert_eq!(
        adapter.component_type_versions("nodejs").await,
        vec!["8", "10", "latest"]
    );
    assert_eq!(adapter.service_templates().await, vec!["mongodb"]);
    assert_eq!(
        adapter.service_template_plans("mongodb").await,
        vec!["default", "large"]
    );

    let raw = adapter
        .execute(&CommandLine::new(adapter.program()).arg("bogus"))
        .await;
    assert_eq!(raw.exit_code, Some(1));

    std::fs::remove_dir_all(&dir).ok();
}
