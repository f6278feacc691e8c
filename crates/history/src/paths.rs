use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// Paths without the shorthand pass through unchanged, as does `~` itself
/// when no home directory can be resolved.
#[must_use]
pub fn expand_user(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(expand_user("/tmp/proj"), PathBuf::from("/tmp/proj"));
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_user("~/proj"), home.join("proj"));
        assert_eq!(expand_user("~"), home);
    }

    #[test]
    fn tilde_in_the_middle_is_not_expanded() {
        assert_eq!(expand_user("/data/~user"), PathBuf::from("/data/~user"));
    }
}
