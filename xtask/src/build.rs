use std::process::Command;

use crate::utils::{check_command, project_root};

pub(crate) fn build(release: bool) {
    println!("Building dipscan");
    let mut build_cmd = Command::new("cargo");
    build_cmd.current_dir(project_root());
    build_cmd.args(["build", "--color=always", "-p", "dipscan"]);
    if release {
        build_cmd.arg("--release");
    }
    check_command!(build_cmd, "Failed to build dipscan: {}");
}
