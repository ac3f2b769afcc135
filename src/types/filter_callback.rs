//! Inclusion filter trait evaluated by the candidate selector.

use crate::types::ResourceValue;

/// Decides whether a listed resource is a deletion candidate.
///
/// Implementations receive the `{name, time}` view of a resource and return
/// `true` to include it. The rule language behind the decision (tags, age
/// windows, name patterns) belongs to the implementation.
///
/// Any `Fn(&ResourceValue) -> bool` closure is an `InclusionFilter`:
///
/// ```
/// use nuke_rs::types::ResourceValue;
/// use nuke_rs::types::filter_callback::InclusionFilter;
///
/// let filter = |value: &ResourceValue| value.name.is_some_and(|n| n.starts_with("drop"));
/// assert!(filter.should_include(&ResourceValue { name: Some("drop-1"), time: None }));
/// assert!(!filter.should_include(&ResourceValue { name: Some("keep"), time: None }));
/// ```
pub trait InclusionFilter: Send + Sync {
    fn should_include(&self, value: &ResourceValue) -> bool;
}

impl<F> InclusionFilter for F
where
    F: Fn(&ResourceValue) -> bool + Send + Sync,
{
    fn should_include(&self, value: &ResourceValue) -> bool {
        self(value)
    }
}
