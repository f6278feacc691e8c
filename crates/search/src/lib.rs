//! Query filtering and ranking over recent-project records.

mod ranker;

pub use ranker::{filter_and_sort, match_rank, matches_query, MatchRank};
