use log::warn;
use std::process::Command;

/// Whether a process whose command line contains `fragment` is running
/// (case-insensitive).
///
/// Fails closed: anything other than a clean "no match" answer is logged
/// and reported as not running.
#[must_use]
pub fn is_running(fragment: &str) -> bool {
    match Command::new("/usr/bin/pgrep")
        .arg("-i")
        .arg("-f")
        .arg(fragment)
        .output()
    {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            // pgrep exits 1 for "no process matched"
            if output.status.code() != Some(1) {
                warn!(
                    "process table query for '{fragment}' failed with {}; assuming not running",
                    output.status
                );
            }
            false
        }
        Err(err) => {
            warn!("process table query for '{fragment}' failed: {err}; assuming not running");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_fragment_is_not_running() {
        assert!(!is_running("no-such-process-c3a1f2e9"));
    }
}
