//! View state types.

use std::fmt;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Parses a direction parameter. Only `"desc"` is descending.
    pub fn from_param(value: &str) -> Self {
        if value == "desc" { Self::Desc } else { Self::Asc }
    }

    /// Returns the parameter form (`"asc"` or `"desc"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSort {
    /// The column identifier.
    pub column: String,
    /// The direction to sort in.
    pub direction: Direction,
}

impl ColumnSort {
    /// Creates an ascending sort on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

/// What the table currently shows: a page and an optional sort.
///
/// A fresh value is decoded from the store on every read; transitions build
/// a new one rather than mutating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ViewState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Active sort, if any.
    pub sort: Option<ColumnSort>,
}

impl ViewState {
    /// Creates an unsorted view of a page.
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            sort: None,
        }
    }

    /// Returns a copy with a different page.
    pub fn with_page(&self, page_index: usize) -> Self {
        Self {
            page_index,
            sort: self.sort.clone(),
        }
    }

    /// Returns a copy with a different sort.
    pub fn with_sort(&self, sort: Option<ColumnSort>) -> Self {
        Self {
            page_index: self.page_index,
            sort,
        }
    }

    /// Returns the direction `column` is sorted in, if it is the sorted column.
    pub fn sorted(&self, column: &str) -> Option<Direction> {
        self.sort
            .as_ref()
            .filter(|s| s.column == column)
            .map(|s| s.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_param() {
        assert_eq!(Direction::from_param("desc"), Direction::Desc);
        assert_eq!(Direction::from_param("asc"), Direction::Asc);
        assert_eq!(Direction::from_param("DESC"), Direction::Asc);
        assert_eq!(Direction::from_param(""), Direction::Asc);
    }

    #[test]
    fn test_sorted_column() {
        let state = ViewState::new(0).with_sort(Some(ColumnSort::desc("name")));
        assert_eq!(state.sorted("name"), Some(Direction::Desc));
        assert_eq!(state.sorted("fuel"), None);
        assert_eq!(ViewState::default().sorted("name"), None);
    }
}
