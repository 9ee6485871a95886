use serde::Serialize;
use serde_json::Value;

pub const PROP_ORDER_FILTER_VISIBLE: &str = "orderFilterVisible";
pub const PROP_FILTER_ON_ENTER: &str = "filterOnEnter";

/// Grouping shown by the property-editing host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyCategory {
    Main,
}

/// Which editor the host should render for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyEditor {
    Boolean { property: &'static str },
}

/// One entry of the declarative property list a widget exposes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProperty {
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: PropertyCategory,
    pub editor: PropertyEditor,
}

/// Resolution rule for the boolean properties: default true unless the
/// stored value is the literal `false`. Absent, null, strings and numbers
/// all resolve to true; this is deliberately not a truthiness check.
pub fn resolve_default_true(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Bool(false)))
}
