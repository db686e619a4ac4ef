use std::path::{Path, PathBuf};

/// Run `$cmd`, and if it fails dump whatever it printed and bail out of the
/// whole task.  cargo fmt reports on stdout while most of cargo uses stderr,
/// so both streams are shown.
macro_rules! check_command {
    ($cmd:tt, $msg:tt) => {
        let output = $cmd.output().expect("Failed to spawn command");
        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            eprintln!($msg, format!("\n\n{}{}", stdout, stderr));
            eprintln!("Try again with command: {:?}", $cmd);
            std::process::exit(1);
        }
    };
}
pub(crate) use check_command;

pub(crate) fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .expect("xtask lives one level below the workspace root")
        .to_path_buf()
}
