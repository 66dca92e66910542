//! Table configuration

/// Configuration for a remotely paged table.
///
/// # Example
///
/// ```
/// use tableview_lib::view::TableConfig;
///
/// let config = TableConfig::default().with_page_count(25);
/// assert_eq!(config.page_count, 25);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Number of pages the backend is known to serve.
    ///
    /// Page transitions outside `0..page_count` are ignored.
    ///
    /// Default: 10
    pub page_count: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { page_count: 10 }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page count.
    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }
}
