//! End-to-end REPL scenarios, run against the real compiled binary in both
//! evaluation modes. These are the exact transcripts from the scenarios
//! table: input on stdin, expected `stdout`.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(mode: &str, input: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dotjit"))
        .arg("--mode")
        .arg(mode)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should launch");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().expect("binary should exit");
    assert!(
        output.status.success(),
        "expected success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn run_both_modes(input: &str, expected: &str) {
    assert_eq!(run("interp", input), expected, "interp mode mismatch");
    assert_eq!(run("jit", input), expected, "jit mode mismatch");
}

#[test]
fn simple_addition() {
    run_both_modes("1 + 2\n", "3 \n");
}

#[test]
fn left_associative_subtraction() {
    run_both_modes("3 - 1 - 1\n", "1 \n");
}

#[test]
fn parenthesized_comparison() {
    run_both_modes("(2 + 3) < (1 + 5)\n", "1 \n");
}

#[test]
fn funcdef_then_call() {
    run_both_modes("sq = . + .\nsq.5\n", "0 10 \n");
}

#[test]
fn if_with_lesser_and_subtraction() {
    run_both_modes("fact = if . < 2 1 . - 1\nfact.5\n", "0 4 \n");
}

#[test]
fn dot_preservation_across_nested_calls() {
    run_both_modes("f = . + 1\ng = f.(f..)\ng.10\n", "0 0 12 \n");
}

#[test]
fn undeclared_function_is_a_fatal_error() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dotjit"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should launch");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"nope.1\n")
        .unwrap();
    let output = child.wait_with_output().expect("binary should exit");
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}

#[test]
fn empty_input_prints_just_a_newline() {
    run_both_modes("", "\n");
}
