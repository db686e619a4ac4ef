use xshell::{cmd, Shell};

use crate::utils::project_root;

pub(crate) fn clean() {
    let sh = Shell::new().expect("Failed to open a shell");
    sh.change_dir(project_root());
    cmd!(sh, "cargo clean")
        .read()
        .expect("Failed to run cargo clean");
}
