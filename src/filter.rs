//! Pure filter/search derivation for the list view.
//!
//! Given the full collection, a free-text query and an optional status
//! filter, [`visible_records`] produces the ordered sub-sequence of records
//! to display. The function is pure and cheap: no memoization, no side
//! effects, safe to recompute on every keystroke.
//!
//! # Matching Rules
//!
//! - **Name**: case-insensitive, whitespace-insensitive substring match.
//!   Both the record name and the query have all whitespace stripped and are
//!   lowercased before the substring test, so `"onepiece"` finds
//!   `"One  Piece"`. An empty query matches everything.
//! - **Status**: equality against the filter value when one is set; `None`
//!   ("All") disables the predicate.
//! - **Combination**: a record is shown iff both predicates pass.
//!
//! # Examples
//!
//! ```rust
//! use tana::filter::{ListFilter, visible_records};
//! use tana::types::ReadingStatus;
//! # let records: Vec<tana::types::MangaRecord> = vec![];
//!
//! let filter = ListFilter {
//!     query: "one piece".to_string(),
//!     status: Some(ReadingStatus::Reading),
//! };
//! let visible = visible_records(&records, &filter);
//! ```

use derive_builder::Builder;

use crate::types::{MangaRecord, ReadingStatus};

/// Active search and filter state for the list view.
///
/// The builder generated by `derive_builder` mirrors the fluent construction
/// used elsewhere in the crate:
///
/// ```rust
/// use tana::filter::ListFilterBuilder;
/// use tana::types::ReadingStatus;
///
/// let filter = ListFilterBuilder::default()
///     .query("bleach")
///     .status(Some(ReadingStatus::Reading))
///     .build()
///     .unwrap();
/// assert_eq!(filter.query, "bleach");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(setter(into))]
pub struct ListFilter {
    /// Free-text name query; empty matches everything
    #[builder(default)]
    pub query: String,

    /// Status to keep; `None` means "All"
    #[builder(default)]
    pub status: Option<ReadingStatus>,
}

impl ListFilter {
    /// Returns `true` if this filter lets every record through.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.status.is_none()
    }

    /// Checks a single record against both predicates.
    pub fn matches(&self, record: &MangaRecord) -> bool {
        self.matches_name(record) && self.matches_status(record)
    }

    fn matches_name(&self, record: &MangaRecord) -> bool {
        let query = normalize(&self.query);
        query.is_empty() || normalize(&record.name).contains(&query)
    }

    fn matches_status(&self, record: &MangaRecord) -> bool {
        self.status.is_none_or(|status| record.status == status)
    }
}

impl From<&str> for ListFilter {
    /// Creates a name-only filter from a query string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::filter::ListFilter;
    ///
    /// let filter: ListFilter = "naruto".into();
    /// assert_eq!(filter.query, "naruto");
    /// assert!(filter.status.is_none());
    /// ```
    fn from(query: &str) -> Self {
        ListFilter {
            query: query.to_string(),
            ..Default::default()
        }
    }
}

impl From<String> for ListFilter {
    fn from(query: String) -> Self {
        ListFilter {
            query,
            ..Default::default()
        }
    }
}

/// Derives the visible sub-sequence of `records` under `filter`.
///
/// The result preserves the original collection order and borrows from it;
/// nothing is cloned or reordered.
///
/// # Examples
///
/// ```rust
/// use tana::filter::{ListFilter, visible_records};
/// use tana::types::{MangaRecord, ReadingStatus, ReleaseStatus};
///
/// let records = vec![MangaRecord {
///     id: Some(1),
///     name: "Bleach".to_string(),
///     total_chapters: 700,
///     completed_chapters: 690,
///     comment: None,
///     status: ReadingStatus::Reading,
///     release_status: ReleaseStatus::Finished,
///     cover_image: None,
///     user_id: Some(1),
/// }];
///
/// let visible = visible_records(&records, &ListFilter::from("blea"));
/// assert_eq!(visible.len(), 1);
///
/// let visible = visible_records(&records, &ListFilter::from("naruto"));
/// assert!(visible.is_empty());
/// ```
pub fn visible_records<'a>(records: &'a [MangaRecord], filter: &ListFilter) -> Vec<&'a MangaRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Strips all whitespace and lowercases, the shared normalization for name
/// matching.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReleaseStatus;

    fn record(id: u64, name: &str, status: ReadingStatus) -> MangaRecord {
        MangaRecord {
            id: Some(id),
            name: name.to_string(),
            total_chapters: 100,
            completed_chapters: 10,
            comment: None,
            status,
            release_status: ReleaseStatus::Ongoing,
            cover_image: None,
            user_id: Some(1),
        }
    }

    #[test]
    fn test_whitespace_and_case_insensitive_match() {
        let records = vec![record(1, "One  Piece", ReadingStatus::Reading)];

        for query in ["onepiece", "ONE PIECE", "one  piece", "nep"] {
            let visible = visible_records(&records, &ListFilter::from(query));
            assert_eq!(visible.len(), 1, "query {:?} should match", query);
        }

        assert!(visible_records(&records, &ListFilter::from("naruto")).is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let records = vec![
            record(1, "Bleach", ReadingStatus::Reading),
            record(2, "Naruto", ReadingStatus::Completed),
        ];

        let visible = visible_records(&records, &ListFilter::default());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_status_filter() {
        let records = vec![
            record(1, "Bleach", ReadingStatus::Reading),
            record(2, "Naruto", ReadingStatus::Completed),
            record(3, "Berserk", ReadingStatus::Reading),
        ];

        let filter = ListFilterBuilder::default()
            .status(Some(ReadingStatus::Reading))
            .build()
            .unwrap();
        let visible = visible_records(&records, &filter);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.status == ReadingStatus::Reading));

        // None disables the predicate
        let all = visible_records(&records, &ListFilter::default());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let records = vec![
            record(1, "Bleach", ReadingStatus::Reading),
            record(2, "Bleach Side Story", ReadingStatus::Dropped),
        ];

        let filter = ListFilterBuilder::default()
            .query("bleach")
            .status(Some(ReadingStatus::Dropped))
            .build()
            .unwrap();
        let visible = visible_records(&records, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, Some(2));
    }

    #[test]
    fn test_order_preserving_subsequence() {
        let records = vec![
            record(3, "A Manga", ReadingStatus::Reading),
            record(1, "Another Manga", ReadingStatus::Reading),
            record(2, "Unrelated", ReadingStatus::Reading),
            record(7, "Manga Again", ReadingStatus::Reading),
        ];

        let visible = visible_records(&records, &ListFilter::from("manga"));
        let ids: Vec<_> = visible.iter().map(|r| r.id.unwrap()).collect();
        assert_eq!(ids, vec![3, 1, 7]);
    }
}
