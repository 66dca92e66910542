//! Update intents accepted by transitions.

use std::fmt;

/// A requested change to a piece of view state.
///
/// Either the next value itself or a function computing it from the current
/// value. Both resolve the same way for equivalent inputs.
///
/// # Example
///
/// ```
/// use tableview_lib::view::Update;
///
/// assert_eq!(Update::Direct(4).resolve(&1), 4);
/// assert_eq!(Update::derive(|page: &usize| page + 3).resolve(&1), 4);
/// ```
pub enum Update<T> {
    /// Replace with this value.
    Direct(T),
    /// Compute the next value from the current one.
    Derive(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    /// Wraps a function as a derived update.
    pub fn derive(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Self::Derive(Box::new(f))
    }

    /// Resolves the update against the current value.
    pub fn resolve(self, current: &T) -> T {
        match self {
            Self::Direct(value) => value,
            Self::Derive(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Direct(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(value) => f.debug_tuple("Direct").field(value).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_and_derive_agree() {
        let current = Some(String::from("name"));
        let direct: Update<Option<String>> = None.into();
        let derived = Update::derive(|_: &Option<String>| None);

        assert_eq!(direct.resolve(&current), derived.resolve(&current));
    }

    #[test]
    fn test_derive_sees_current() {
        let update = Update::derive(|page: &usize| page * 2);
        assert_eq!(update.resolve(&21), 42);
    }
}
