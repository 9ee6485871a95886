//! The order filter bar: a composite of label, text input and two buttons
//! that owns the current filter text and drives the resolver.

mod properties;

pub use properties::{
    resolve_default_true, PropertyCategory, PropertyEditor, WidgetProperty,
    PROP_FILTER_ON_ENTER, PROP_ORDER_FILTER_VISIBLE,
};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::context::ContextStore;
use crate::locator::TargetLocator;
use crate::resolver::FilterResolver;

/// Static metadata shown in the host's widget gallery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescriptor {
    pub display_name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

/// Contract every hosted widget fulfills. The host drives the lifecycle:
/// `create_view` once after construction, property get/set from the editor,
/// `on_exit` at teardown.
pub trait Widget {
    fn id(&self) -> &str;
    fn create_view(&mut self);
    fn on_exit(&mut self);
    fn properties(&self) -> Vec<WidgetProperty>;
    fn property_value(&self, name: &str) -> Option<Value>;
    fn set_property_value(&mut self, name: &str, value: Value);
}

/// Base property storage shared by widget implementations. Accessor
/// overrides call through here for names they do not handle.
pub struct WidgetBase {
    id: String,
    config: HashMap<String, Value>,
}

impl WidgetBase {
    pub fn new(id: impl Into<String>, config: HashMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn property_value(&self, name: &str) -> Option<Value> {
        self.config.get(name).cloned()
    }

    pub fn set_property_value(&mut self, name: &str, value: Value) {
        self.config.insert(name.to_string(), value);
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelControl {
    pub text: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputControl {
    pub placeholder: &'static str,
    pub width: &'static str,
    pub value: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonControl {
    pub text: &'static str,
    pub emphasized: bool,
    pub visible: bool,
}

/// The rendered control row. Pure view state; the host owns the actual
/// rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBarView {
    pub label: LabelControl,
    pub input: InputControl,
    pub filter_button: ButtonControl,
    pub clear_button: ButtonControl,
    pub style_class: &'static str,
}

/// Where the widget sits between user edits and resolver invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBarState {
    /// No pending change.
    Idle,
    /// Text changed but not yet applied (filter-on-enter mode only).
    Editing,
    /// The last resolver invocation completed.
    Applied,
}

/// Filter bar widget extension for the work-list table.
pub struct FilterBarWidget {
    base: WidgetBase,
    context: Arc<dyn ContextStore>,
    resolver: FilterResolver,
    current_filter: String,
    state: FilterBarState,
    view: Option<FilterBarView>,
}

impl FilterBarWidget {
    pub fn new(
        id: impl Into<String>,
        context: Arc<dyn ContextStore>,
        locator: Arc<dyn TargetLocator>,
    ) -> Self {
        let resolver = FilterResolver::new(context.clone(), locator);
        Self {
            base: WidgetBase::new(id, Self::default_config()),
            context,
            resolver,
            current_filter: String::new(),
            state: FilterBarState::Idle,
            view: None,
        }
    }

    pub fn descriptor() -> WidgetDescriptor {
        WidgetDescriptor {
            display_name: "Order Filter for Work List",
            description: "Adds an Order filter that filters the Work List Table widget.",
            icon: "filter",
            category: "Custom Widgets",
        }
    }

    pub fn default_config() -> HashMap<String, Value> {
        HashMap::from([
            (PROP_ORDER_FILTER_VISIBLE.to_string(), Value::Bool(true)),
            (PROP_FILTER_ON_ENTER.to_string(), Value::Bool(true)),
        ])
    }

    pub fn state(&self) -> FilterBarState {
        self.state
    }

    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    pub fn view(&self) -> Option<&FilterBarView> {
        self.view.as_ref()
    }

    pub fn order_filter_visible(&self) -> bool {
        resolve_default_true(self.base.property_value(PROP_ORDER_FILTER_VISIBLE).as_ref())
    }

    pub fn filter_on_enter(&self) -> bool {
        resolve_default_true(self.base.property_value(PROP_FILTER_ON_ENTER).as_ref())
    }

    /// Text-change event from the input control.
    pub fn handle_live_change(&mut self, value: &str) {
        self.current_filter = value.to_string();
        if let Some(view) = &mut self.view {
            view.input.value = self.current_filter.clone();
        }
        if self.filter_on_enter() {
            self.state = FilterBarState::Editing;
        } else {
            self.apply();
        }
    }

    /// Enter pressed in the input control.
    pub fn handle_submit(&mut self) {
        debug!(filter = %self.current_filter, "order filter submitted");
        self.apply();
    }

    /// Filter button pressed.
    pub fn press_filter(&mut self) {
        self.apply();
    }

    /// Clear button pressed: reset the owned text, then apply the empty
    /// filter so previously filtered targets are reset too.
    pub fn press_clear(&mut self) {
        self.current_filter.clear();
        if let Some(view) = &mut self.view {
            view.input.value.clear();
        }
        self.apply();
    }

    fn apply(&mut self) {
        self.resolver.apply_filter(&self.current_filter);
        self.state = FilterBarState::Applied;
    }

    fn set_controls_visible(&mut self, visible: bool) {
        if let Some(view) = &mut self.view {
            view.label.visible = visible;
            view.input.visible = visible;
            view.filter_button.visible = visible;
            view.clear_button.visible = visible;
        }
    }
}

impl Widget for FilterBarWidget {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn create_view(&mut self) {
        let visible = self.order_filter_visible();
        self.view = Some(FilterBarView {
            label: LabelControl {
                text: "Order Filter:",
                visible,
            },
            input: InputControl {
                placeholder: "Enter Order number to filter...",
                width: "250px",
                value: self.current_filter.clone(),
                visible,
            },
            filter_button: ButtonControl {
                text: "Filter",
                emphasized: true,
                visible,
            },
            clear_button: ButtonControl {
                text: "Clear",
                emphasized: false,
                visible,
            },
            style_class: "smallMargin",
        });
    }

    fn on_exit(&mut self) {
        // This widget registers no subscriptions itself; any made on its
        // behalf must not outlive it.
        self.context.unsubscribe_all(self.base.id());
        self.view = None;
    }

    fn properties(&self) -> Vec<WidgetProperty> {
        vec![
            WidgetProperty {
                display_name: "Order Filter Visible",
                description: "Shows or hides the Order filter.",
                category: PropertyCategory::Main,
                editor: PropertyEditor::Boolean {
                    property: PROP_ORDER_FILTER_VISIBLE,
                },
            },
            WidgetProperty {
                display_name: "Filter on Enter Only",
                description: "If true, filter only when Enter is pressed. \
                              If false, filter as you type.",
                category: PropertyCategory::Main,
                editor: PropertyEditor::Boolean {
                    property: PROP_FILTER_ON_ENTER,
                },
            },
        ]
    }

    fn property_value(&self, name: &str) -> Option<Value> {
        let value = self.base.property_value(name);
        match name {
            PROP_ORDER_FILTER_VISIBLE | PROP_FILTER_ON_ENTER => {
                Some(Value::Bool(resolve_default_true(value.as_ref())))
            }
            _ => value,
        }
    }

    fn set_property_value(&mut self, name: &str, value: Value) {
        if name == PROP_ORDER_FILTER_VISIBLE {
            self.set_controls_visible(resolve_default_true(Some(&value)));
        }
        self.base.set_property_value(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        ContextValue, MemoryContextStore, WorkListHandle, ORDER_FILTER_PATH, WORK_LIST_PATH,
    };
    use crate::filter::{Filterable, FilterExpr};
    use crate::locator::{LocateError, TargetLocator};
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingFilter {
        calls: Mutex<Vec<Vec<FilterExpr>>>,
    }

    impl RecordingFilter {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Filterable for RecordingFilter {
        fn filter(&self, filters: &[FilterExpr]) {
            self.calls.lock().unwrap().push(filters.to_vec());
        }
    }

    struct DirectHandle {
        filterable: Arc<RecordingFilter>,
    }

    impl WorkListHandle for DirectHandle {
        fn filterable(&self) -> Option<Arc<dyn Filterable>> {
            Some(self.filterable.clone())
        }
    }

    struct EmptyLocator;

    impl TargetLocator for EmptyLocator {
        fn locate(&self) -> Result<Vec<Arc<dyn Filterable>>, LocateError> {
            Ok(Vec::new())
        }
    }

    fn widget_with_target() -> (FilterBarWidget, Arc<RecordingFilter>, Arc<MemoryContextStore>)
    {
        let store = Arc::new(MemoryContextStore::new());
        let target = RecordingFilter::new();
        store.set(
            WORK_LIST_PATH,
            ContextValue::WorkList(Arc::new(DirectHandle {
                filterable: target.clone(),
            })),
        );
        let mut widget = FilterBarWidget::new("widget-1", store.clone(), Arc::new(EmptyLocator));
        widget.create_view();
        (widget, target, store)
    }

    #[test]
    fn starts_idle_with_empty_text_and_visible_controls() {
        let (widget, target, _) = widget_with_target();
        assert_eq!(widget.state(), FilterBarState::Idle);
        assert_eq!(widget.current_filter(), "");
        let view = widget.view().unwrap();
        assert!(view.label.visible && view.input.visible);
        assert!(view.filter_button.visible && view.clear_button.visible);
        assert_eq!(target.call_count(), 0);
    }

    #[test]
    fn typing_alone_does_not_filter_in_enter_mode() {
        let (mut widget, target, _) = widget_with_target();

        widget.handle_live_change("SO");
        widget.handle_live_change("SO-42");

        assert_eq!(widget.state(), FilterBarState::Editing);
        assert_eq!(target.call_count(), 0);

        widget.handle_submit();
        assert_eq!(widget.state(), FilterBarState::Applied);
        assert_eq!(target.call_count(), 1);
    }

    #[test]
    fn live_mode_filters_on_every_text_change() {
        let (mut widget, target, _) = widget_with_target();
        widget.set_property_value(PROP_FILTER_ON_ENTER, json!(false));

        widget.handle_live_change("S");
        widget.handle_live_change("SO");

        assert_eq!(target.call_count(), 2);
        assert_eq!(widget.state(), FilterBarState::Applied);
    }

    #[test]
    fn filter_button_applies_the_current_text() {
        let (mut widget, target, _) = widget_with_target();
        widget.handle_live_change("SO-42");
        widget.press_filter();
        assert_eq!(target.call_count(), 1);
        assert_eq!(widget.state(), FilterBarState::Applied);
    }

    #[test]
    fn clear_resets_text_and_applies_the_empty_filter() {
        let (mut widget, target, _) = widget_with_target();
        widget.handle_live_change("SO-42");
        widget.handle_submit();

        widget.press_clear();

        assert_eq!(widget.current_filter(), "");
        assert_eq!(widget.view().unwrap().input.value, "");
        let calls = target.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].is_empty());
        assert!(calls[1].is_empty());
    }

    #[test]
    fn visibility_property_hides_and_restores_all_controls() {
        let (mut widget, _, _) = widget_with_target();

        widget.set_property_value(PROP_ORDER_FILTER_VISIBLE, json!(false));
        let view = widget.view().unwrap();
        assert!(!view.label.visible && !view.input.visible);
        assert!(!view.filter_button.visible && !view.clear_button.visible);

        widget.set_property_value(PROP_ORDER_FILTER_VISIBLE, json!(true));
        let view = widget.view().unwrap();
        assert!(view.label.visible && view.input.visible);
        assert!(view.filter_button.visible && view.clear_button.visible);
    }

    #[test]
    fn boolean_properties_resolve_default_true() {
        let (mut widget, _, _) = widget_with_target();

        assert_eq!(
            widget.property_value(PROP_FILTER_ON_ENTER),
            Some(json!(true))
        );

        // Anything but the literal false stays true.
        widget.set_property_value(PROP_FILTER_ON_ENTER, Value::Null);
        assert_eq!(
            widget.property_value(PROP_FILTER_ON_ENTER),
            Some(json!(true))
        );

        widget.set_property_value(PROP_FILTER_ON_ENTER, json!(false));
        assert_eq!(
            widget.property_value(PROP_FILTER_ON_ENTER),
            Some(json!(false))
        );
        assert!(!widget.filter_on_enter());
    }

    #[test]
    fn unhandled_properties_fall_through_to_the_base() {
        let (mut widget, _, _) = widget_with_target();
        assert_eq!(widget.property_value("title"), None);
        widget.set_property_value("title", json!("Orders"));
        assert_eq!(widget.property_value("title"), Some(json!("Orders")));
    }

    #[test]
    fn property_list_matches_the_two_configurable_flags() {
        let (widget, _, _) = widget_with_target();
        let props = widget.properties();
        assert_eq!(props.len(), 2);
        assert_eq!(
            props[0].editor,
            PropertyEditor::Boolean {
                property: PROP_ORDER_FILTER_VISIBLE
            }
        );
        assert_eq!(
            props[1].editor,
            PropertyEditor::Boolean {
                property: PROP_FILTER_ON_ENTER
            }
        );
    }

    #[test]
    fn descriptor_and_default_config_are_stable() {
        let descriptor = FilterBarWidget::descriptor();
        assert_eq!(descriptor.display_name, "Order Filter for Work List");
        assert_eq!(descriptor.category, "Custom Widgets");

        let config = FilterBarWidget::default_config();
        assert_eq!(config.get(PROP_ORDER_FILTER_VISIBLE), Some(&json!(true)));
        assert_eq!(config.get(PROP_FILTER_ON_ENTER), Some(&json!(true)));
    }

    #[test]
    fn exit_drops_the_view_and_releases_subscriptions() {
        let (mut widget, _, store) = widget_with_target();
        let fired = Arc::new(Mutex::new(0usize));
        let counter = fired.clone();
        store.subscribe(
            ORDER_FILTER_PATH,
            widget.id(),
            Box::new(move |_| {
                *counter.lock().unwrap() += 1;
            }),
        );

        widget.on_exit();
        assert!(widget.view().is_none());

        store.set(ORDER_FILTER_PATH, ContextValue::Text("x".into()));
        assert_eq!(*fired.lock().unwrap(), 0);
    }
}
