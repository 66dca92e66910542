//! Page and sort transitions over the persisted view state.

use log::debug;
use log::trace;

use crate::query::QueryStore;

use super::codec;
use super::ColumnSort;
use super::Direction;
use super::FetchKey;
use super::TableConfig;
use super::Update;
use super::ViewState;

/// Drives view-state transitions.
///
/// The controller holds no view state of its own: every read decodes the
/// store, and every transition writes the next state back through the
/// codec. It never fetches; callers read [`fetch_key`](Self::fetch_key) and
/// hand it to a [`RemoteCache`](crate::cache::RemoteCache).
///
/// Transition methods return `true` when the state changed and was written.
///
/// # Example
///
/// ```
/// use tableview_lib::query::MemoryStore;
/// use tableview_lib::view::{TableConfig, ViewController};
///
/// let mut controller = ViewController::new(MemoryStore::new(), TableConfig::default());
/// controller.toggle_sort("name");
/// controller.next_page();
///
/// assert_eq!(
///     controller.store().params().to_query_string(),
///     "page=1&sort=name&direction=asc"
/// );
/// ```
#[derive(Debug)]
pub struct ViewController<S> {
    store: S,
    page_count: usize,
}

impl<S: QueryStore> ViewController<S> {
    /// Creates a controller over `store`.
    pub fn new(store: S, config: TableConfig) -> Self {
        Self {
            store,
            page_count: config.page_count,
        }
    }

    /// Decodes the current view state from the store.
    pub fn state(&self) -> ViewState {
        codec::decode(&self.store.read())
    }

    /// Builds the fetch key for the current view state.
    pub fn fetch_key(&self) -> FetchKey {
        FetchKey::from(&self.state())
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the last known page count.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Updates the last known page count.
    ///
    /// The persisted page is left alone even if it is now out of range.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
    }

    /// Moves to page `page`, ignoring targets outside `0..page_count`.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        match usize::try_from(page) {
            Ok(page) => self.set_pagination(Update::Direct(page)),
            Err(_) => {
                trace!("Ignoring page transition to {}", page);
                false
            }
        }
    }

    /// Applies a pagination update.
    ///
    /// The resolved page must lie in `0..page_count`; otherwise nothing
    /// happens.
    pub fn set_pagination(&mut self, update: Update<usize>) -> bool {
        let current = self.state();
        let page = update.resolve(&current.page_index);

        if page >= self.page_count {
            trace!(
                "Ignoring page transition to {} (page count {})",
                page, self.page_count
            );
            return false;
        }

        self.commit(&current, current.with_page(page))
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) -> bool {
        self.set_pagination(Update::Direct(0))
    }

    /// Moves one page back.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.set_pagination(Update::derive(|page: &usize| page.saturating_sub(1)))
    }

    /// Moves one page forward.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.set_pagination(Update::derive(|page: &usize| page.saturating_add(1)))
    }

    /// Moves to the last known page.
    pub fn last_page(&mut self) -> bool {
        match self.page_count.checked_sub(1) {
            Some(last) => self.set_pagination(Update::Direct(last)),
            None => false,
        }
    }

    /// Returns `true` if there is a page before the current one.
    pub fn can_previous_page(&self) -> bool {
        self.state().page_index > 0
    }

    /// Returns `true` if there is a page after the current one.
    pub fn can_next_page(&self) -> bool {
        self.state().page_index.saturating_add(1) < self.page_count
    }

    /// Cycles the sort on `column`: unsorted, ascending, descending, unsorted.
    ///
    /// Switching from another sorted column always starts at ascending.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        self.set_sorting(Update::Direct(next_sort(
            self.state().sort.as_ref(),
            column,
        )))
    }

    /// Applies a sorting update. `None` clears the sort.
    pub fn set_sorting(&mut self, update: Update<Option<ColumnSort>>) -> bool {
        let current = self.state();
        let sort = update.resolve(&current.sort);
        self.commit(&current, current.with_sort(sort))
    }

    fn commit(&mut self, current: &ViewState, next: ViewState) -> bool {
        if *current == next {
            return false;
        }

        let patch = codec::patch(&next);
        debug!(
            "View transition {} -> {}",
            FetchKey::from(current),
            FetchKey::from(&next)
        );
        self.store.write(&patch);
        true
    }
}

/// Computes the sort that follows a toggle of `column`.
pub fn next_sort(current: Option<&ColumnSort>, column: &str) -> Option<ColumnSort> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            Direction::Asc => Some(ColumnSort::desc(column)),
            Direction::Desc => None,
        },
        _ => Some(ColumnSort::asc(column)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MemoryStore;

    fn controller(query: &str) -> ViewController<MemoryStore> {
        ViewController::new(MemoryStore::parse(query), TableConfig::default())
    }

    fn query(controller: &ViewController<MemoryStore>) -> String {
        controller.store().params().to_query_string()
    }

    #[test]
    fn test_toggle_from_empty() {
        let mut c = controller("");
        assert_eq!(c.state(), ViewState::default());

        assert!(c.toggle_sort("name"));
        assert_eq!(
            c.state(),
            ViewState {
                page_index: 0,
                sort: Some(ColumnSort::asc("name")),
            }
        );
        assert!(query(&c).contains("sort=name&direction=asc"));
    }

    #[test]
    fn test_toggle_cycle_removes_sort_fields() {
        let mut c = controller("tab=cars");

        c.toggle_sort("name");
        assert_eq!(c.state().sort, Some(ColumnSort::asc("name")));
        c.toggle_sort("name");
        assert_eq!(c.state().sort, Some(ColumnSort::desc("name")));
        c.toggle_sort("name");
        assert_eq!(c.state().sort, None);

        let params = c.store().params();
        assert!(!params.contains("sort"));
        assert!(!params.contains("direction"));
        assert_eq!(params.get("tab"), Some("cars"));
    }

    #[test]
    fn test_switching_column_resets_to_asc() {
        let mut c = controller("sort=name&direction=desc");
        c.toggle_sort("fuel");
        assert_eq!(c.state().sort, Some(ColumnSort::asc("fuel")));
    }

    #[test]
    fn test_toggle_keeps_page() {
        let mut c = controller("page=4");
        c.toggle_sort("type");
        assert_eq!(c.state().page_index, 4);
    }

    #[test]
    fn test_out_of_range_pages_are_ignored() {
        let mut c = controller("page=3&sort=type&direction=desc");
        let before = query(&c);

        assert!(!c.go_to_page(-1));
        assert!(!c.go_to_page(c.page_count() as i64));
        assert_eq!(query(&c), before);

        assert!(c.go_to_page(9));
        assert_eq!(c.state().page_index, 9);
        assert_eq!(c.state().sort, Some(ColumnSort::desc("type")));
    }

    #[test]
    fn test_pager_buttons() {
        let mut c = controller("");
        assert!(!c.can_previous_page());
        assert!(!c.previous_page());

        assert!(c.next_page());
        assert_eq!(c.state().page_index, 1);

        assert!(c.last_page());
        assert_eq!(c.state().page_index, 9);
        assert!(!c.can_next_page());
        assert!(!c.next_page());

        assert!(c.previous_page());
        assert_eq!(c.state().page_index, 8);

        assert!(c.first_page());
        assert_eq!(c.state().page_index, 0);
    }

    #[test]
    fn test_direct_and_derived_updates_agree() {
        let mut direct = controller("page=2");
        let mut derived = controller("page=2");

        direct.set_pagination(Update::Direct(5));
        derived.set_pagination(Update::derive(|page: &usize| page + 3));
        assert_eq!(query(&direct), query(&derived));

        direct.set_sorting(Update::Direct(Some(ColumnSort::desc("name"))));
        derived.set_sorting(Update::derive(|_: &Option<ColumnSort>| {
            Some(ColumnSort::desc("name"))
        }));
        assert_eq!(query(&direct), query(&derived));
    }

    #[test]
    fn test_unchanged_transition_writes_nothing() {
        let mut c = controller("page=abc");
        assert!(!c.go_to_page(0));
        assert_eq!(query(&c), "page=abc");
    }

    #[test]
    fn test_zero_page_count_blocks_paging() {
        let mut c = ViewController::new(
            MemoryStore::new(),
            TableConfig::default().with_page_count(0),
        );
        assert!(!c.go_to_page(0));
        assert!(!c.last_page());
        assert!(!c.next_page());
    }

    #[test]
    fn test_huge_persisted_page_is_not_fatal() {
        let mut c = controller("page=18446744073709551615&sort=name&direction=asc");
        assert_eq!(c.state().page_index, usize::MAX);
        let before = query(&c);

        assert!(!c.can_next_page());
        assert!(!c.next_page());
        assert!(c.can_previous_page());
        assert!(!c.previous_page());
        assert_eq!(query(&c), before);

        assert!(c.first_page());
        assert_eq!(c.state().page_index, 0);
    }

    #[test]
    fn test_page_count_update_moves_range() {
        let mut c = controller("page=9");
        assert!(!c.next_page());
        assert!(!c.go_to_page(12));

        c.set_page_count(15);
        assert_eq!(c.page_count(), 15);
        assert!(c.next_page());
        assert_eq!(c.state().page_index, 10);
        assert!(c.go_to_page(14));
        assert!(!c.go_to_page(15));

        c.set_page_count(3);
        assert_eq!(c.state().page_index, 14);
        assert!(!c.next_page());
        assert!(c.last_page());
        assert_eq!(c.state().page_index, 2);
    }
}
