//! Fetch keys derived from view state.

use std::fmt;

use url::form_urlencoded;

use super::ColumnSort;
use super::Direction;
use super::ViewState;

/// Outgoing parameter holding the page index.
pub const FETCH_PAGE_PARAM: &str = "page";
/// Outgoing parameter holding the sorted column.
pub const FETCH_SORT_PARAM: &str = "sort";
/// Outgoing parameter holding the sort direction.
pub const FETCH_DIRECTION_PARAM: &str = "sortDirection";

/// The normalized identity of a request.
///
/// Used as the cache key and as the outgoing query. Keys are only built
/// through [`FetchKey::page`], [`FetchKey::sorted`] or from a [`ViewState`],
/// so two keys that send the same request compare and hash equal. An empty
/// column counts as unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FetchKey {
    page_index: usize,
    sort: Option<ColumnSort>,
}

impl FetchKey {
    /// Creates an unsorted key for a page.
    pub fn page(page_index: usize) -> Self {
        Self {
            page_index,
            ..Self::default()
        }
    }

    /// Creates a sorted key for a page.
    pub fn sorted(page_index: usize, column: impl Into<String>, direction: Direction) -> Self {
        Self {
            page_index,
            sort: Some(ColumnSort {
                column: column.into(),
                direction,
            })
            .filter(|sort| !sort.column.is_empty()),
        }
    }

    /// Returns the zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<(&str, Direction)> {
        self.sort
            .as_ref()
            .map(|sort| (sort.column.as_str(), sort.direction))
    }

    /// Returns the outgoing query parameters.
    ///
    /// `sort` and `sortDirection` are only present when a sort is active.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(FETCH_PAGE_PARAM, self.page_index.to_string())];
        if let Some((column, direction)) = self.sort() {
            pairs.push((FETCH_SORT_PARAM, column.to_string()));
            pairs.push((FETCH_DIRECTION_PARAM, direction.as_str().to_string()));
        }
        pairs
    }
}

impl From<&ViewState> for FetchKey {
    fn from(state: &ViewState) -> Self {
        match &state.sort {
            Some(sort) => Self::sorted(state.page_index, sort.column.as_str(), sort.direction),
            None => Self::page(state.page_index),
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish();
        f.write_str(&query)
    }
}

/// Builds the fetch key for a view state.
pub fn build_key(state: &ViewState) -> FetchKey {
    FetchKey::from(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_unsorted_key() {
        let key = build_key(&ViewState::new(3));
        assert_eq!(key, FetchKey::page(3));
        assert_eq!(key.page_index(), 3);
        assert_eq!(key.sort(), None);
        assert_eq!(key.to_string(), "page=3");
    }

    #[test]
    fn test_sorted_key() {
        let state = ViewState {
            page_index: 1,
            sort: Some(ColumnSort::desc("name")),
        };
        let key = build_key(&state);
        assert_eq!(key.sort(), Some(("name", Direction::Desc)));
        assert_eq!(key.to_string(), "page=1&sort=name&sortDirection=desc");
    }

    #[test]
    fn test_independent_states_share_a_key() {
        let a = ViewState {
            page_index: 2,
            sort: Some(ColumnSort::asc("fuel")),
        };
        let b = ViewState::new(2).with_sort(Some(ColumnSort::asc(String::from("fuel"))));

        assert_eq!(build_key(&a), build_key(&b));
        assert_eq!(build_key(&a), build_key(&a));

        let keys: HashSet<_> = [build_key(&a), build_key(&b)].into_iter().collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_equivalent_keys_coalesce() {
        let a = FetchKey::sorted(0, "name", Direction::from_param("ASC"));
        let b = FetchKey::sorted(0, String::from("name"), Direction::Asc);
        assert_eq!(a, b);

        let keys: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(keys.len(), 1);

        assert_eq!(FetchKey::sorted(4, "", Direction::Desc), FetchKey::page(4));
        assert_eq!(FetchKey::sorted(4, "", Direction::Desc).to_string(), "page=4");
    }
}
