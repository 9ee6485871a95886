//! Filter-application resolution: decide the most specific way to apply or
//! clear a textual filter against a widget tree this crate does not own.

mod error;

pub use error::DiscoveryError;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::context::{ContextStore, ContextValue, ORDER_FILTER_PATH, WORK_LIST_PATH};
use crate::filter::{
    build_contains_any, Filterable, FALLBACK_ORDER_FIELDS, PRIMARY_ORDER_FIELDS,
};
use crate::locator::TargetLocator;

/// Where a filter can be applied, resolved fresh on every invocation.
/// The widget tree may change between calls, so targets are never cached.
pub enum FilterTarget {
    /// The published work-list handle filters directly.
    WorkList(Arc<dyn Filterable>),
    /// Row bindings of discovered table controls. The filter is broadcast
    /// to every binding in the set.
    TableBindings(Vec<Arc<dyn Filterable>>),
}

impl fmt::Debug for FilterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkList(_) => f.write_str("WorkList(..)"),
            Self::TableBindings(bindings) => {
                write!(f, "TableBindings(len={})", bindings.len())
            }
        }
    }
}

/// Applies the operator's filter text to the best available target,
/// falling back through strategies of decreasing confidence.
pub struct FilterResolver {
    context: Arc<dyn ContextStore>,
    locator: Arc<dyn TargetLocator>,
}

impl FilterResolver {
    pub fn new(context: Arc<dyn ContextStore>, locator: Arc<dyn TargetLocator>) -> Self {
        Self { context, locator }
    }

    /// Apply (or, for blank text, clear) the order filter.
    ///
    /// Runs inside UI event handlers and therefore never fails outward:
    /// every failure is logged and absorbed. The only observable symptom of
    /// a failed resolution is an unchanged table.
    pub fn apply_filter(&self, search_text: &str) {
        let text = search_text.trim();
        debug!(filter = text, "applying order filter");

        // Publish first so sibling widgets can observe the value even when
        // this resolver finds nothing to act on.
        self.context
            .set(ORDER_FILTER_PATH, ContextValue::Text(text.to_string()));

        match self.discover() {
            Ok(FilterTarget::WorkList(handle)) => {
                let filters = build_contains_any(text, PRIMARY_ORDER_FIELDS);
                handle.filter(&filters);
                debug!("filter applied to work list handle");
            }
            Ok(FilterTarget::TableBindings(bindings)) => {
                let filters = build_contains_any(text, FALLBACK_ORDER_FIELDS);
                for binding in &bindings {
                    binding.filter(&filters);
                }
                debug!(targets = bindings.len(), "filter applied to table bindings");
            }
            Err(err @ DiscoveryError::ProbeFailed(_)) => {
                error!(code = err.code_str(), "{err}");
            }
            Err(err) => {
                warn!(code = err.code_str(), "{err}");
            }
        }
    }

    /// Resolve the current filter target, most specific strategy first.
    pub fn discover(&self) -> Result<FilterTarget, DiscoveryError> {
        let handle = self
            .context
            .get(WORK_LIST_PATH)
            .and_then(|value| value.as_work_list().cloned())
            .ok_or(DiscoveryError::WorkListUnavailable)?;

        if let Some(filterable) = handle.filterable() {
            return Ok(FilterTarget::WorkList(filterable));
        }

        match self.locator.locate() {
            Ok(bindings) if !bindings.is_empty() => Ok(FilterTarget::TableBindings(bindings)),
            Ok(_) => Err(DiscoveryError::NoCompatibleBinding),
            Err(err) => Err(DiscoveryError::ProbeFailed(err.to_string())),
        }
    }
}
