use crate::catalog::Product;
use crate::error::{HistoryError, Result};
use crate::paths::expand_user;
use crate::project::ProjectRecord;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Placeholder the IDE writes in place of the user's home directory.
pub const USER_HOME_PLACEHOLDER: &str = "$USER_HOME$";

/// Ordered sequence of project records for a product, most recently used
/// first.
pub fn recent_projects(product: &Product) -> Result<Vec<ProjectRecord>> {
    let file = recent_projects_file(product)?;
    debug!("reading recent projects from {}", file.display());
    Ok(read_recent_projects(&file)?
        .into_iter()
        .map(ProjectRecord::from_path)
        .collect())
}

/// Resolve the history file of the most recent preferences snapshot.
pub fn recent_projects_file(product: &Product) -> Result<PathBuf> {
    let root = expand_user(&product.preferences_path);
    let folder = newest_preferences_folder(&root, &product.folder_name)?;
    Ok(root
        .join(folder)
        .join("options")
        .join("recentProjects.xml"))
}

/// Pick the preference folder of the newest installed version: folder names
/// containing the product token, minus backups, compared as plain strings
/// (version folder names sort so the newest is lexicographically greatest).
fn newest_preferences_folder(root: &Path, token: &str) -> Result<String> {
    let not_found = || HistoryError::NoPreferencesFolder {
        token: token.to_string(),
        root: root.to_path_buf(),
    };

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(err) => return Err(err.into()),
    };

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.contains(token) && !name.contains("backup") {
            folders.push(name);
        }
    }

    folders.into_iter().max().ok_or_else(not_found)
}

/// Parse a recentProjects.xml into history paths, most recently used first.
pub fn read_recent_projects(file: &Path) -> Result<Vec<String>> {
    if !file.is_file() {
        return Err(HistoryError::HistoryFileMissing {
            path: file.to_path_buf(),
        });
    }
    let xml = fs::read_to_string(file)?;
    let mut paths = parse_history_entries(&xml)?;
    // entries are stored oldest-first
    paths.reverse();
    Ok(paths)
}

fn parse_history_entries(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut path = ElementPath::default();
    let mut entries = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if path.at_history_entries() && start.name().as_ref() == b"entry" {
                    if let Some(key) = key_attribute(&start)? {
                        entries.push(key.replace(USER_HOME_PLACEHOLDER, "~"));
                    }
                }
                path.push(&start)?;
            }
            Event::Empty(start) => {
                if path.at_history_entries() && start.name().as_ref() == b"entry" {
                    if let Some(key) = key_attribute(&start)? {
                        entries.push(key.replace(USER_HOME_PLACEHOLDER, "~"));
                    }
                }
            }
            Event::End(_) => path.pop(),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

/// Stack of open elements with their `name` attributes, used to address the
/// history entries without being fooled by the nested metadata the IDE
/// stores inside each entry.
#[derive(Debug, Default)]
pub(crate) struct ElementPath {
    stack: Vec<(String, Option<String>)>,
}

impl ElementPath {
    pub(crate) fn push(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let name = name_attribute(start)?;
        self.stack.push((tag, name));
        Ok(())
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
    }

    /// Directly inside component[RecentProjectsManager] / option[additionalInfo]
    /// / map, where each child `<entry key="..">` is one history record.
    pub(crate) fn at_history_entries(&self) -> bool {
        let n = self.stack.len();
        n >= 3
            && self.segment(n - 1, "map", None)
            && self.segment(n - 2, "option", Some("additionalInfo"))
            && self.segment(n - 3, "component", Some("RecentProjectsManager"))
    }

    fn segment(&self, idx: usize, tag: &str, name: Option<&str>) -> bool {
        let (t, n) = &self.stack[idx];
        t == tag && name.map_or(true, |expected| n.as_deref() == Some(expected))
    }
}

fn name_attribute(start: &BytesStart<'_>) -> Result<Option<String>> {
    attribute(start, b"name")
}

pub(crate) fn key_attribute(start: &BytesStart<'_>) -> Result<Option<String>> {
    attribute(start, b"key")
}

fn attribute(start: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    Ok(start
        .try_get_attribute(name)?
        .map(|attr| attr.unescape_value().map(|value| value.into_owned()))
        .transpose()?)
}
