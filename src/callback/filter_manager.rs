//! Inclusion filter manager.
//!
//! Wraps a single `InclusionFilter` trait object for use by the
//! `CandidateSelector`.

use std::fmt;
use std::sync::Arc;

use crate::types::ResourceValue;
use crate::types::filter_callback::InclusionFilter;

/// Manages a registered inclusion filter.
///
/// With no filter registered every resource is included, which is what an
/// empty rule set means.
#[derive(Clone)]
pub struct FilterManager {
    filter: Option<Arc<dyn InclusionFilter>>,
}

impl Default for FilterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterManager {
    pub fn new() -> Self {
        Self { filter: None }
    }

    /// Register an inclusion filter implementation, replacing any previous one.
    pub fn register_filter<T: InclusionFilter + 'static>(&mut self, filter: T) {
        self.filter = Some(Arc::new(filter));
    }

    /// Returns true if an inclusion filter has been registered.
    pub fn is_filter_registered(&self) -> bool {
        self.filter.is_some()
    }

    pub fn should_include(&self, value: &ResourceValue) -> bool {
        match &self.filter {
            Some(filter) => filter.should_include(value),
            None => true,
        }
    }
}

impl fmt::Debug for FilterManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterManager")
            .field("filter_registered", &self.filter.is_some())
            .finish()
    }
}
