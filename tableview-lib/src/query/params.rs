//! Ordered query-string parameters and patches.

use std::fmt;

use url::form_urlencoded;

/// An ordered list of key/value pairs, as found in a URL query string.
///
/// Duplicate keys are allowed; lookups return the first occurrence.
///
/// # Example
///
/// ```
/// use tableview_lib::query::QueryParams;
///
/// let mut params = QueryParams::parse("?page=2&tab=cars");
/// params.set("page", "3");
/// params.remove("tab");
/// assert_eq!(params.to_query_string(), "page=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A single leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if at least one pair uses `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Sets `key` to `value`.
    ///
    /// The first occurrence keeps its position and later duplicates are
    /// dropped. Appends when the key is absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    /// Removes every pair using `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Iterates over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the pairs as a query string, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A single change to a [`QueryParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Set a key to a value.
    Set(String, String),
    /// Remove every occurrence of a key.
    Remove(String),
}

/// An ordered set of changes merged into existing parameters.
///
/// Keys the patch does not mention are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    ops: Vec<PatchOp>,
}

impl QueryPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a set operation.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(PatchOp::Set(key.into(), value.into()));
        self
    }

    /// Adds a remove operation.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push(PatchOp::Remove(key.into()));
        self
    }

    /// Returns the operations in order.
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies the operations to `params` in order.
    pub fn apply(&self, params: &mut QueryParams) {
        for op in &self.ops {
            match op {
                PatchOp::Set(key, value) => params.set(key.as_str(), value.as_str()),
                PatchOp::Remove(key) => params.remove(key),
            }
        }
    }
}
