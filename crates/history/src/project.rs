use crate::paths::expand_user;
use std::fs;

/// Characters that split a project name into abbreviation segments.
pub const BREAK_CHARACTERS: &[char] = &['_', '-'];

/// One on-disk project reference from the history file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Home-relative path exactly as stored in history (the launcher handles
    /// the `~` shorthand in the emitted document).
    pub path: String,
    pub name: String,
    pub abbreviation: String,
}

impl ProjectRecord {
    /// Build a record from a history path.
    ///
    /// The name comes from the project's own `.idea/.name` file when present
    /// (verbatim, including any trailing whitespace), else the last path
    /// segment.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name_file = expand_user(&path).join(".idea").join(".name");
        let name = match fs::read_to_string(&name_file) {
            Ok(contents) => contents,
            Err(_) => path.split('/').next_back().unwrap_or_default().to_string(),
        };
        let abbreviation = abbreviate(&name, BREAK_CHARACTERS);
        Self {
            path,
            name,
            abbreviation,
        }
    }
}

/// First character of the name plus the first character after every run of
/// break characters: "My-Cool_Project" → "MCP", "simple" → "s".
///
/// The name must be non-empty; HistorySource never yields an empty path
/// segment.
#[must_use]
pub fn abbreviate(name: &str, break_characters: &[char]) -> String {
    let mut chars = name.chars();
    let mut abbreviation = String::new();
    abbreviation.push(chars.next().expect("project name is never empty"));

    let mut previous_was_break = false;
    for ch in chars {
        if break_characters.contains(&ch) {
            previous_was_break = true;
        } else if previous_was_break {
            abbreviation.push(ch);
            previous_was_break = false;
        }
    }
    abbreviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn abbreviation_takes_first_char_after_each_break_run() {
        assert_eq!(abbreviate("My-Cool_Project", BREAK_CHARACTERS), "MCP");
        assert_eq!(abbreviate("a-b-c", BREAK_CHARACTERS), "abc");
        assert_eq!(abbreviate("spring-petclinic", BREAK_CHARACTERS), "sp");
    }

    #[test]
    fn name_without_breaks_yields_single_char() {
        assert_eq!(abbreviate("simple", BREAK_CHARACTERS), "s");
    }

    #[test]
    fn consecutive_breaks_count_as_one() {
        assert_eq!(abbreviate("a--__b", BREAK_CHARACTERS), "ab");
    }

    #[test]
    fn name_falls_back_to_last_path_segment() {
        let record = ProjectRecord::from_path("~/Desktop/trash/My Project (42)");
        assert_eq!(record.name, "My Project (42)");
        assert_eq!(record.path, "~/Desktop/trash/My Project (42)");
        assert_eq!(record.abbreviation, "M");
    }

    #[test]
    fn name_file_wins_over_path_segment() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("checkout");
        fs::create_dir_all(project.join(".idea")).unwrap();
        fs::write(project.join(".idea").join(".name"), "custom_project_name").unwrap();

        let record = ProjectRecord::from_path(project.to_str().unwrap());
        assert_eq!(record.name, "custom_project_name");
        assert_eq!(record.abbreviation, "cpn");
    }

    #[test]
    fn name_file_contents_are_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("checkout");
        fs::create_dir_all(project.join(".idea")).unwrap();
        fs::write(project.join(".idea").join(".name"), "spaced name\n").unwrap();

        let record = ProjectRecord::from_path(project.to_str().unwrap());
        assert_eq!(record.name, "spaced name\n");
    }

    #[test]
    fn records_compare_on_all_fields() {
        let a = ProjectRecord::from_path("~/Documents/spring-petclinic");
        let b = ProjectRecord::from_path("~/Documents/spring-petclinic");
        assert_eq!(a, b);
    }
}
