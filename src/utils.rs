use std::process::Command;
use tracing::warn;

/// Opens `url` in the system browser. Failures are logged, never fatal.
pub fn open_in_browser(url: &str) {
    let result = match std::env::consts::OS {
        "macos" => Command::new("open").arg(url).spawn(),
        "windows" => Command::new("cmd").args(["/C", "start", "", url]).spawn(),
        _ => Command::new("xdg-open").arg(url).spawn(),
    };

    if let Err(e) = result {
        warn!("⚠️  Could not open browser for {}: {}", url, e);
    }
}
