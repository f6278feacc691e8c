use recents_history::ProjectRecord;

/// How strongly a record matched the query. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    /// Query equals the abbreviation exactly (case-sensitive).
    Abbreviation,
    /// Query is a case-sensitive substring of the name.
    Name,
    /// Matched only case-insensitively, or via the path.
    Other,
}

/// Keep records matching the query and order them by match strength.
///
/// An empty query returns the input unchanged, preserving the
/// most-recent-first order from the history source. The sort is stable, so
/// records of equal rank also keep that order.
#[must_use]
pub fn filter_and_sort(query: &str, records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    if query.is_empty() {
        return records;
    }

    let needle = query.to_lowercase();
    let mut results: Vec<ProjectRecord> = records
        .into_iter()
        .filter(|record| matches_query(record, &needle))
        .collect();
    results.sort_by_key(|record| match_rank(record, query));
    results
}

/// Case-insensitive substring match against path, abbreviation, or name.
/// `needle` must already be lower-cased.
#[must_use]
pub fn matches_query(record: &ProjectRecord, needle: &str) -> bool {
    record.path.to_lowercase().contains(needle)
        || record.abbreviation.to_lowercase().contains(needle)
        || record.name.to_lowercase().contains(needle)
}

#[must_use]
pub fn match_rank(record: &ProjectRecord, query: &str) -> MatchRank {
    if query == record.abbreviation {
        MatchRank::Abbreviation
    } else if record.name.contains(query) {
        MatchRank::Name
    } else {
        MatchRank::Other
    }
}
