//! Order filter bar extension for a work-list table widget.
//!
//! The crate owns no row data. It publishes the operator's filter text to a
//! shared context store, resolves the best available filter target (the
//! work-list handle directly, or discovered table row bindings as a
//! fallback) and applies a contains-match expression to it. Resolution is
//! best-effort: when no compatible target exists the apply is a logged
//! no-op and the UI stays responsive.

pub mod context;
pub mod filter;
pub mod locator;
pub mod resolver;
pub mod widget;

pub use context::{
    shared, ContextCallback, ContextStore, ContextValue, MemoryContextStore, WorkListHandle,
    ORDER_FILTER_PATH, WORK_LIST_PATH,
};
pub use filter::{
    build_contains_any, FilterExpr, FilterOperator, Filterable, FALLBACK_ORDER_FIELDS,
    PRIMARY_ORDER_FIELDS,
};
pub use locator::{
    Control, ControlRegistry, HeuristicLocator, LocateError, TableControl, TargetLocator,
    ROW_BINDING_NAMES,
};
pub use resolver::{DiscoveryError, FilterResolver, FilterTarget};
pub use widget::{
    FilterBarState, FilterBarView, FilterBarWidget, Widget, WidgetBase, WidgetDescriptor,
    WidgetProperty, PROP_FILTER_ON_ENTER, PROP_ORDER_FILTER_VISIBLE,
};
