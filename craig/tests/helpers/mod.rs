//! Helpers to run the `craig` binary on the traces in `tests/traces`.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

static NEXT_RUN: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) status: ExitStatus,
    pub(crate) stdout: String,
}

impl Run {
    /// The lines which are not comments.
    pub(crate) fn answer_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|line| !line.starts_with("c "))
            .collect()
    }

    /// The value of the statistic `name`, if it was logged.
    pub(crate) fn statistic(&self, name: &str) -> Option<String> {
        let pattern = Regex::new(&format!(r"(?m)^c stat: {name}=(\S+)$"))
            .expect("statistic names are valid in a regex");

        pattern
            .captures(&self.stdout)
            .map(|captures| captures[1].to_owned())
    }
}

pub(crate) fn trace_path(trace_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("traces")
        .join(format!("{trace_name}.trace"))
}

/// A fresh path in the scratch directory of the integration tests.
pub(crate) fn scratch_path(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_TARGET_TMPDIR")).join(file_name)
}

pub(crate) fn run_craig(trace_name: &str, args: &[&str]) -> Run {
    let trace_path = trace_path(trace_name);
    let run_id = NEXT_RUN.fetch_add(1, Ordering::Relaxed);
    let stdout_path = scratch_path(&format!("{trace_name}-{}-{run_id}.log", std::process::id()));

    let mut child = Command::new(env!("CARGO_BIN_EXE_craig"))
        .args(args)
        .arg(&trace_path)
        .stdout(File::create(&stdout_path).expect("Failed to create log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run craig.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("craig took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting craig: {e}"),
    };

    let stdout = std::fs::read_to_string(&stdout_path).expect("Failed to read log file.");
    std::fs::remove_file(&stdout_path).expect("Failed to remove log file.");

    Run { status, stdout }
}
