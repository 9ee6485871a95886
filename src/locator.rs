use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::filter::Filterable;

/// Binding names a table control may expose its rows under. Checked in
/// order; the first hit wins.
pub const ROW_BINDING_NAMES: &[&str] = &["items", "rows"];

/// Tabular capability of a control: access to its named row bindings.
pub trait TableControl: Send + Sync {
    fn binding(&self, name: &str) -> Option<Arc<dyn Filterable>>;
}

/// A control attached somewhere under the host view root.
pub trait Control: Send + Sync {
    fn id(&self) -> &str;
    fn class_name(&self) -> &str;
    /// Present only when the control is a known tabular widget.
    fn as_table(&self) -> Option<&dyn TableControl>;
}

/// Enumerates the controls currently attached under the host view root.
/// Enumeration may fail when the host registry is unavailable.
pub trait ControlRegistry: Send + Sync {
    fn controls(&self) -> Result<Vec<Arc<dyn Control>>, LocateError>;
}

/// Failure raised inside a locator probe.
#[derive(Debug, Clone)]
pub struct LocateError {
    message: String,
}

impl LocateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LocateError {}

/// Strategy for finding filterable row bindings when the work-list handle
/// offers no direct filter capability.
pub trait TargetLocator: Send + Sync {
    fn locate(&self) -> Result<Vec<Arc<dyn Filterable>>, LocateError>;
}

fn looks_table_like(control: &dyn Control) -> bool {
    let id = control.id();
    let class = control.class_name();
    id.contains("Table")
        || id.contains("table")
        || class.contains("workList")
        || class.contains("WorkList")
}

/// Default locator: substring heuristics on control ids and class names,
/// narrowed to controls with tabular capability, then the conventional row
/// binding names.
pub struct HeuristicLocator {
    registry: Arc<dyn ControlRegistry>,
}

impl HeuristicLocator {
    pub fn new(registry: Arc<dyn ControlRegistry>) -> Self {
        Self { registry }
    }
}

impl TargetLocator for HeuristicLocator {
    fn locate(&self) -> Result<Vec<Arc<dyn Filterable>>, LocateError> {
        let controls = self.registry.controls()?;
        let mut bindings: Vec<Arc<dyn Filterable>> = Vec::new();
        for control in &controls {
            if !looks_table_like(control.as_ref()) {
                continue;
            }
            let Some(table) = control.as_table() else {
                continue;
            };
            let binding = ROW_BINDING_NAMES
                .iter()
                .find_map(|name| table.binding(name));
            if let Some(binding) = binding {
                debug!(id = control.id(), "found filterable table binding");
                bindings.push(binding);
            }
        }
        debug!(
            scanned = controls.len(),
            matched = bindings.len(),
            "table discovery pass finished"
        );
        Ok(bindings)
    }
}
