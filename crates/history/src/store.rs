use crate::error::{HistoryError, Result};
use crate::source::{key_attribute, ElementPath, USER_HOME_PLACEHOLDER};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;

/// Remove `target` (a `~`-relative history path) from the history file.
///
/// Returns whether an entry was removed; the file is rewritten only in that
/// case. Everything except the matching `<entry>` subtree is copied through
/// at event granularity. Callers must confirm the owning IDE process is not
/// running before mutating its file.
pub fn remove_entry(file: &Path, target: &str) -> Result<bool> {
    if !file.is_file() {
        return Err(HistoryError::HistoryFileMissing {
            path: file.to_path_buf(),
        });
    }
    let xml = fs::read_to_string(file)?;

    let mut reader = Reader::from_str(&xml);
    let mut writer = Writer::new(Vec::new());
    let mut path = ElementPath::default();
    let mut removed = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) => {
                if path.at_history_entries()
                    && start.name().as_ref() == b"entry"
                    && entry_matches(&start, target)?
                {
                    let end = start.to_end().into_owned();
                    reader.read_to_end(end.name())?;
                    removed = true;
                    continue;
                }
                path.push(&start)?;
                writer.write_event(Event::Start(start))?;
            }
            Event::Empty(start) => {
                if path.at_history_entries()
                    && start.name().as_ref() == b"entry"
                    && entry_matches(&start, target)?
                {
                    removed = true;
                    continue;
                }
                writer.write_event(Event::Empty(start))?;
            }
            Event::End(end) => {
                path.pop();
                writer.write_event(Event::End(end))?;
            }
            event => writer.write_event(event)?,
        }
    }

    if removed {
        debug!("removing '{target}' from {}", file.display());
        fs::write(file, writer.into_inner())?;
    }
    Ok(removed)
}

fn entry_matches(start: &BytesStart<'_>, target: &str) -> Result<bool> {
    Ok(key_attribute(start)?
        .map(|key| key.replace(USER_HOME_PLACEHOLDER, "~") == target)
        .unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::read_recent_projects;
    use pretty_assertions::assert_eq;

    const HISTORY_XML: &str = r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>
        <entry key="$USER_HOME$/Desktop/trash/My Project (42)" />
        <entry key="$USER_HOME$/Documents/spring-petclinic">
          <value>
            <RecentProjectMetaInfo frameTitle="spring-petclinic">
              <option name="activationTimestamp" value="1596289320000" />
            </RecentProjectMetaInfo>
          </value>
        </entry>
        <entry key="$USER_HOME$/Documents/zebra" />
      </map>
    </option>
  </component>
</application>"#;

    fn history_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("recentProjects.xml");
        fs::write(&file, contents).unwrap();
        (dir, file)
    }

    #[test]
    fn removes_entry_with_nested_metadata() {
        let (_dir, file) = history_file(HISTORY_XML);

        let removed = remove_entry(&file, "~/Documents/spring-petclinic").unwrap();
        assert!(removed);

        let remaining = read_recent_projects(&file).unwrap();
        assert_eq!(
            remaining,
            vec![
                "~/Documents/zebra".to_string(),
                "~/Desktop/trash/My Project (42)".to_string(),
            ]
        );

        let rewritten = fs::read_to_string(&file).unwrap();
        assert!(!rewritten.contains("spring-petclinic"));
        assert!(!rewritten.contains("RecentProjectMetaInfo"));
    }

    #[test]
    fn removes_self_closing_entry_and_preserves_order() {
        let (_dir, file) = history_file(HISTORY_XML);

        assert!(remove_entry(&file, "~/Desktop/trash/My Project (42)").unwrap());

        let remaining = read_recent_projects(&file).unwrap();
        assert_eq!(
            remaining,
            vec![
                "~/Documents/zebra".to_string(),
                "~/Documents/spring-petclinic".to_string(),
            ]
        );
        // the untouched entry keeps its metadata subtree
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("RecentProjectMetaInfo"));
    }

    #[test]
    fn removal_is_idempotent() {
        let (_dir, file) = history_file(HISTORY_XML);

        assert!(remove_entry(&file, "~/Documents/zebra").unwrap());
        let after_first = fs::read_to_string(&file).unwrap();

        assert!(!remove_entry(&file, "~/Documents/zebra").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }

    #[test]
    fn unknown_target_leaves_file_untouched() {
        let (_dir, file) = history_file(HISTORY_XML);

        assert!(!remove_entry(&file, "~/not/in/history").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), HISTORY_XML);
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = remove_entry(&dir.path().join("recentProjects.xml"), "~/proj").unwrap_err();
        assert!(matches!(err, HistoryError::HistoryFileMissing { .. }));
    }
}
