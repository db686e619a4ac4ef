use std::process::Command;

use crate::utils::{check_command, project_root};

pub(crate) fn lint() {
    println!("Running cargo fmt");
    let mut fmt_cmd = Command::new("cargo");
    fmt_cmd.current_dir(project_root());
    fmt_cmd.args(["fmt", "--check"]);
    check_command!(fmt_cmd, "Failed to run cargo fmt: {}");

    println!("Running clippy");
    let mut lint_cmd = Command::new("cargo");
    lint_cmd.current_dir(project_root());
    lint_cmd.args(["clippy", "--color=always", "--all-targets", "--", "-D", "warnings"]);
    check_command!(lint_cmd, "Failed to run cargo clippy: {}");
}
