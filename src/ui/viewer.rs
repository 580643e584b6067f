use std::path::Path;
use std::process::Command;

/// Platform command used to open a file with its associated application
pub fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(all(unix, not(target_os = "macos")))]
    let program = "xdg-open";

    let mut cmd = Command::new(program);
    cmd.arg(path);
    cmd
}

/// Open `path` in the platform viewer.
///
/// Fire and forget: a launch failure is logged and otherwise ignored.
pub fn open_in_viewer(path: &Path) -> bool {
    match viewer_command(path).spawn() {
        Ok(_) => {
            tracing::info!(path = %path.display(), "opened in viewer");
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to launch viewer: {}", e);
            false
        }
    }
}
