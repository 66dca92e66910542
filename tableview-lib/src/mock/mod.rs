//! Mock vehicles backend.
//!
//! A fixed, seeded dataset served with the pagination and sort contract the
//! cache expects: case-insensitive ordering on one field, ties kept in
//! dataset order, then a fixed-size page slice. [`MockServer`] exposes it
//! over HTTP at `GET /vehicles`.

mod data;
mod server;

pub use server::MockServer;
pub use server::VEHICLES_PATH;

use serde::Deserialize;
use serde::Serialize;

use crate::query::QueryParams;
use crate::view::Direction;
use crate::view::FETCH_DIRECTION_PARAM;
use crate::view::FETCH_PAGE_PARAM;
use crate::view::FETCH_SORT_PARAM;
use crate::view::FetchKey;

/// A row of the mock dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fuel: String,
}

/// A sortable field of [`Vehicle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VehicleField {
    #[default]
    Id,
    Name,
    Type,
    Fuel,
}

impl VehicleField {
    /// Parses a column id. Unknown ids yield `None`.
    pub fn parse(column: &str) -> Option<Self> {
        match column {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "type" => Some(Self::Type),
            "fuel" => Some(Self::Fuel),
            _ => None,
        }
    }
}

impl Vehicle {
    /// Returns the value of `field`.
    pub fn field(&self, field: VehicleField) -> &str {
        match field {
            VehicleField::Id => &self.id,
            VehicleField::Name => &self.name,
            VehicleField::Type => &self.kind,
            VehicleField::Fuel => &self.fuel,
        }
    }
}

/// Configuration for the mock dataset.
///
/// # Example
///
/// ```
/// use tableview_lib::mock::{MockConfig, MockVehicleService};
///
/// let service = MockVehicleService::new(MockConfig::default().with_rows(45));
/// assert_eq!(service.page_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Rows per page.
    ///
    /// Default: 20
    pub page_size: usize,
    /// Total rows in the dataset.
    ///
    /// Default: 200
    pub rows: usize,
    /// Seed for the dataset generator.
    ///
    /// Default: 0
    pub seed: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            rows: 200,
            seed: 0,
        }
    }
}

impl MockConfig {
    /// Creates a new mock config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A page request against the mock service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleQuery {
    /// Zero-based page index.
    pub page: usize,
    /// Column to sort by; `id` when absent.
    pub sort: Option<String>,
    /// Sort direction.
    pub direction: Direction,
}

impl VehicleQuery {
    /// Reads `page`, `sort` and `sortDirection` from request parameters.
    ///
    /// Malformed values fall back to page 0, default order, ascending.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params
                .get(FETCH_PAGE_PARAM)
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(0),
            sort: params
                .get(FETCH_SORT_PARAM)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            direction: params
                .get(FETCH_DIRECTION_PARAM)
                .map(Direction::from_param)
                .unwrap_or_default(),
        }
    }
}

impl From<&FetchKey> for VehicleQuery {
    fn from(key: &FetchKey) -> Self {
        let (sort, direction) = match key.sort() {
            Some((column, direction)) => (Some(column.to_string()), direction),
            None => (None, Direction::Asc),
        };
        Self {
            page: key.page_index(),
            sort,
            direction,
        }
    }
}

/// In-process mock backend over a fixed dataset.
#[derive(Debug, Clone)]
pub struct MockVehicleService {
    rows: Vec<Vehicle>,
    page_size: usize,
}

impl MockVehicleService {
    /// Generates the dataset described by `config`.
    pub fn new(config: MockConfig) -> Self {
        Self {
            rows: data::generate(config.rows, config.seed),
            page_size: config.page_size,
        }
    }

    /// Serves an explicit dataset.
    pub fn with_rows(rows: Vec<Vehicle>, page_size: usize) -> Self {
        Self { rows, page_size }
    }

    /// Returns the dataset in its original order.
    pub fn rows(&self) -> &[Vehicle] {
        &self.rows
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of non-empty pages.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.rows.len().div_ceil(self.page_size)
        }
    }

    /// Returns the ordered slice of rows for `query`.
    ///
    /// Pages past the end of the dataset are empty.
    pub fn page(&self, query: &VehicleQuery) -> Vec<Vehicle> {
        let field = query
            .sort
            .as_deref()
            .and_then(VehicleField::parse)
            .unwrap_or_default();

        let mut ordered: Vec<(String, &Vehicle)> = self
            .rows
            .iter()
            .map(|row| (row.field(field).to_lowercase(), row))
            .collect();

        // stable: equal keys stay in dataset order in both directions
        ordered.sort_by(|(a, _), (b, _)| match query.direction {
            Direction::Asc => a.cmp(b),
            Direction::Desc => b.cmp(a),
        });

        let start = query.page.saturating_mul(self.page_size);
        ordered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .map(|(_, row)| row.clone())
            .collect()
    }
}
