//! End-to-end tests that drive the compiled `tramp` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn tramp_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tramp"))
}

fn run_stdin(args: &[&str], input: &str) -> Output {
    let mut child = tramp_bin()
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn default_mode_interprets() {
    let out = run_stdin(&[], "_let x = 2 _in x + 8");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "The interpretation result is : 10\n");
}

#[test]
fn step_interp_runs_a_million_tail_calls() {
    let src = "_let countdown = _fun (countdown) _fun (n) \
                 _if n == 0 _then 0 _else countdown (countdown) (n + -1) \
               _in countdown (countdown) (1000000)";
    let out = run_stdin(&["--step_interp"], src);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "The interp_by_steps result is : 0\n");
}

#[test]
fn step_interp_handles_deep_non_tail_recursion() {
    let src = "_let count = _fun (count) _fun (n) \
                 _if n == 0 _then 0 _else 1 + count (count) (n + -1) \
               _in count (count) (10000)";
    let out = run_stdin(&["--step_interp"], src);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "The interp_by_steps result is : 10000\n");
}

#[test]
fn opt_prints_the_folded_expression() {
    let out = run_stdin(&["--opt"], "_let x = 5 _in _let y = z + 2 _in x + y + (2 * 3)");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "The optimization result is : _let y = z + 2 _in 5 + y + 6\n"
    );
}

#[test]
fn functions_print_as_literals() {
    let out = run_stdin(&[], "_fun (x) x + 1");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "The interpretation result is : _fun (x) x + 1\n");
}

#[test]
fn reads_a_source_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = dir.path().join("fac.tramp");
    std::fs::write(
        &file,
        "_let factrl = _fun (factrl) _fun (x)\n\
         \x20 _if x == 1 _then 1 _else x * factrl(factrl)(x + -1)\n\
         _in factrl(factrl)(5)\n",
    )
    .expect("write source");

    let out = tramp_bin()
        .args(["--step_interp", file.to_str().unwrap()])
        .output()
        .expect("run binary");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "The interp_by_steps result is : 120\n");
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = dir.path().join("absent.tramp");
    let out = tramp_bin()
        .arg(file.to_str().unwrap())
        .output()
        .expect("run binary");
    assert!(!out.status.success());
    assert!(stderr(&out).contains("failed to read"), "stderr: {}", stderr(&out));
}

#[test]
fn dump_ast_prints_json() {
    let out = run_stdin(&["--dump-ast"], "_if _true _then 1 _else 2");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(v["If"]["cond"]["Boolean"], true);
    assert_eq!(v["If"]["else_"]["Number"], 2);
}

#[test]
fn opt_and_step_interp_conflict() {
    let out = tramp_bin()
        .args(["--opt", "--step_interp"])
        .stdin(Stdio::null())
        .output()
        .expect("run binary");
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn parse_errors_are_reported() {
    let out = run_stdin(&[], "(1 + 2");
    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("expected a close parenthesis"), "stderr: {err}");
    assert!(err.contains("<stdin>"), "stderr: {err}");
}

#[test]
fn evaluation_errors_are_reported() {
    for flag in [&[][..], &["--step_interp"][..]] {
        let out = run_stdin(flag, "y");
        assert!(!out.status.success());
        assert!(stderr(&out).contains("unbound variable: y"), "stderr: {}", stderr(&out));

        let out = run_stdin(flag, "(_fun (x) x)(_true) + 1");
        assert!(!out.status.success());
        assert!(
            stderr(&out).contains("cannot add booleans"),
            "stderr: {}",
            stderr(&out)
        );
    }
}

#[test]
fn long_application_chains_are_rejected_not_fatal() {
    let src = format!("_let f = _fun (s) s _in f{}", "(f)".repeat(300_000));
    for flag in ["--opt", "--step_interp"] {
        let out = run_stdin(&[flag], &src);
        assert!(!out.status.success());
        assert_eq!(out.status.code(), Some(1), "stderr: {}", stderr(&out));
        assert!(
            stderr(&out).contains("nesting depth exceeds limit"),
            "stderr: {}",
            stderr(&out)
        );
    }
}

#[test]
fn closure_chains_from_tail_calls_print_and_exit_cleanly() {
    let src = "_let build = _fun (b) _fun (n) _fun (acc) \
                 _if n == 0 _then acc _else b(b)(n + -1)(_fun (x) acc(x)) \
               _in build(build)(300000)(_fun (x) x + 7)";
    let out = run_stdin(&["--step_interp"], src);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "The interp_by_steps result is : _fun (x) acc(x)\n"
    );
}

#[test]
fn oversized_input_is_rejected() {
    let src = "1 + ".repeat(300_000) + "1";
    let out = run_stdin(&[], &src);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("exceeds"), "stderr: {}", stderr(&out));
}
