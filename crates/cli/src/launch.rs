use anyhow::{bail, Context, Result};
use log::debug;
use recents_history::Product;
use std::process::Command;

/// Bring the product forward and launch it with the given arguments.
///
/// Activation covers the case where the app is already open but no project
/// window has focus; `open -nb` then starts a fresh launch by bundle id.
pub fn activate_and_open(product: &Product, args: &[String]) -> Result<()> {
    let script = format!("tell application \"{}\" to activate", product.name());
    let status = Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .status()
        .with_context(|| format!("can't activate {}", product.name()))?;
    if !status.success() {
        bail!("can't activate {}", product.name());
    }

    let mut command = Command::new("open");
    command.arg("-nb").arg(&product.bundle_id);
    if !args.is_empty() {
        command.arg("--args").args(args);
    }
    debug!("launching {command:?}");

    let status = command
        .status()
        .with_context(|| format!("can't open {}", product.keyword))?;
    if !status.success() {
        bail!("can't open {}", product.keyword);
    }
    Ok(())
}
