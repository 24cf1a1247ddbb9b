//! Opening exported files with the platform's default application.

use std::io;
use std::path::Path;
use std::process::Command;

/// Seam for launching a file in the reader's default browser.
///
/// The export driver never waits on the browser's lifecycle; launching is
/// fire-and-forget. Tests substitute a recording implementation.
pub trait BrowserLauncher: Send + Sync {
    /// Ask the platform to open `path` with its default handler.
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Launcher using the operating system's "open with default application"
/// command.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLauncher;

impl BrowserLauncher for SystemLauncher {
    fn open(&self, path: &Path) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = Command::new("open");

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = Command::new("xdg-open");

        command.arg(path).spawn().map(|_| ())
    }
}
