#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::run_craig;
use helpers::scratch_path;
use regex::Regex;

#[test]
fn truth_table_is_printed_by_default() {
    let run = run_craig("single_a_clause", &[]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 0111"], run.answer_lines());
}

#[test]
fn learned_clauses_contribute_to_the_interpolant() {
    let run = run_craig("learned_units", &[]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 01"], run.answer_lines());
}

#[test]
fn unsat_core_lists_one_based_clause_numbers() {
    let run = run_craig("learned_units", &["--backend", "unsat-core"]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 1 2 3 4 0"], run.answer_lines());
}

#[test]
fn circuit_is_printed_in_ascii_aiger() {
    let run = run_craig("single_a_clause", &["--backend", "circuit"]);

    assert!(run.status.success());
    let lines = run.answer_lines();
    assert_eq!("s REFUTED", lines[0]);

    let header = Regex::new(r"^aag (\d+) 2 0 1 (\d+)$").expect("valid regex");
    let captures = header.captures(lines[1]).expect("an aag header");
    let num_ands: usize = captures[2].parse().expect("a number");
    // Header, two inputs, the output and one line per and-gate.
    assert_eq!(1 + 1 + 2 + 1 + num_ands, lines.len());
    assert_eq!(vec!["2", "4"], lines[2..4].to_vec());
}

#[test]
fn payload_can_be_redirected_to_a_file() {
    let output_path = scratch_path("redirected_payload.txt");

    let run = run_craig(
        "single_a_clause",
        &["--output", output_path.to_str().expect("utf-8 path")],
    );

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED"], run.answer_lines());
    let payload = std::fs::read_to_string(&output_path).expect("payload was written");
    assert_eq!("v 0111\n", payload);
    std::fs::remove_file(output_path).expect("Failed to remove payload file.");
}

#[test]
fn proof_log_is_written_to_the_given_path() {
    let proof_path = scratch_path("single_a_clause.resolution");

    let run = run_craig(
        "single_a_clause",
        &["--proof-log", proof_path.to_str().expect("utf-8 path")],
    );

    assert!(run.status.success());
    let proof = std::fs::read_to_string(&proof_path).expect("proof was written");
    assert_eq!(
        "1 1 2 0 0\n2 -1 0 0\n3 -2 0 0\n4 * 1 3 0 0\n5 * 4 2 0 0\n",
        proof
    );
    std::fs::remove_file(proof_path).expect("Failed to remove proof file.");
}

#[test]
fn exhausted_conflict_budget_reports_unknown() {
    let run = run_craig("two_learned_units", &["--conflict-limit", "1"]);

    assert!(run.status.success());
    assert_eq!(vec!["s UNKNOWN"], run.answer_lines());
}

#[test]
fn conflict_budget_covering_every_learned_clause_refutes() {
    let run = run_craig("two_learned_units", &["--conflict-limit", "2"]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 01"], run.answer_lines());
}

#[test]
fn refutation_found_before_the_budget_runs_out_is_reported() {
    let run = run_craig("learned_units", &["--conflict-limit", "1"]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 01"], run.answer_lines());
}

#[test]
fn generous_time_limit_does_not_change_the_answer() {
    let run = run_craig("learned_units", &["--time-limit", "60000"]);

    assert!(run.status.success());
    assert_eq!(vec!["s REFUTED", "v 01"], run.answer_lines());
}

#[test]
fn statistics_are_logged_in_camel_case() {
    let run = run_craig("learned_units", &["--log-statistics"]);

    assert!(run.status.success());
    assert_eq!(Some("4".to_owned()), run.statistic("numRoots"));
    assert_eq!(Some("3".to_owned()), run.statistic("numLearned"));
    assert_eq!(Some("1".to_owned()), run.statistic("numGlobalVariables"));
    assert!(run.statistic("timeTotalSeconds").is_some());
}

#[test]
fn verbose_run_logs_comment_lines() {
    let run = run_craig("single_a_clause", &["--verbose"]);

    assert!(run.status.success());
    assert!(run
        .stdout
        .lines()
        .any(|line| line == "c Logging successfully configured"));
}

#[test]
fn unproven_clause_is_an_error() {
    let run = run_craig("unproven", &[]);

    assert_eq!(Some(1), run.status.code());
    assert!(run.answer_lines().is_empty());
    assert!(run.stdout.contains("Execution failed"));
}

#[test]
fn inconsistent_header_is_an_error() {
    let run = run_craig("wrong_clause_count", &[]);

    assert_eq!(Some(1), run.status.code());
    assert!(run.stdout.contains("Failed to load the trace"));
}
