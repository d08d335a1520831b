use std::fs;
use std::io::Write;

use color_eyre::eyre::{eyre, Result};
use duct::cmd;

use crate::cli::LintArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fmt,
    Clippy,
    Test,
}

impl Step {
    const ALL: [Step; 3] = [Step::Fmt, Step::Clippy, Step::Test];

    fn skipped(self, args: &LintArgs) -> bool {
        match self {
            Step::Fmt => args.no_fmt,
            Step::Clippy => args.no_clippy,
            Step::Test => args.no_test,
        }
    }

    /// cargo arguments, with fixes applied in place when `fix` is set
    fn cargo_args(self, fix: bool) -> Vec<&'static str> {
        match (self, fix) {
            (Step::Fmt, false) => vec!["fmt", "--all", "--check"],
            (Step::Fmt, true) => vec!["fmt", "--all"],
            (Step::Clippy, false) => vec![
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
            (Step::Clippy, true) => vec![
                "clippy",
                "--workspace",
                "--all-targets",
                "--fix",
                "--allow-dirty",
                "--",
                "-D",
                "warnings",
            ],
            (Step::Test, _) => vec!["test", "--workspace"],
        }
    }
}

fn label(args: &[&str]) -> String {
    format!("cargo {}", args.join(" "))
}

fn log_entry(label: &str, output: &str) -> String {
    format!("=== {label} ===\n{output}\n")
}

/// Run every enabled step in order; the combined output lands in `target/xtask-lint.log`
pub fn run(args: &LintArgs) -> Result<()> {
    let target = std::env::current_dir()?.join("target");
    fs::create_dir_all(&target)?;
    let log_path = target.join("xtask-lint.log");
    let mut log = fs::File::create(&log_path)?;

    for step in Step::ALL.into_iter().filter(|step| !step.skipped(args)) {
        let cargo_args = step.cargo_args(args.fix);
        let label = label(&cargo_args);

        let output = cmd("cargo", &cargo_args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()?;
        let text = String::from_utf8_lossy(&output.stdout);

        write!(log, "{}", log_entry(&label, &text))?;

        if !output.status.success() {
            print!("{text}");
            println!("log: {}", log_path.display());
            return Err(eyre!("lint failed at: {label}"));
        }

        if args.verbose {
            print!("{text}");
        }
    }

    println!("log: {}", log_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_mode_rewrites_fmt_and_clippy_only() {
        assert_eq!(label(&Step::Fmt.cargo_args(true)), "cargo fmt --all");
        assert!(Step::Clippy.cargo_args(true).contains(&"--fix"));
        assert_eq!(Step::Test.cargo_args(true), Step::Test.cargo_args(false));
    }

    #[test]
    fn test_skip_flags() {
        let args = LintArgs {
            no_clippy: true,
            ..Default::default()
        };

        let enabled: Vec<_> = Step::ALL
            .into_iter()
            .filter(|step| !step.skipped(&args))
            .collect();

        assert_eq!(enabled, vec![Step::Fmt, Step::Test]);
    }

    #[test]
    fn test_log_entry_format() {
        let entry = log_entry("cargo test --workspace", "ok\n");

        assert!(entry.starts_with("=== cargo test --workspace ===\n"));
        assert!(entry.contains("ok"));
    }
}
