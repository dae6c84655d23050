//! Acceptance scenarios for the panel engine
//!
//! Each test drives the engine through its public API only, the way a host
//! would, and checks what observers receive.

use panelkit::delegate::PendingValue;
use panelkit::model::{
    CustomModule, ItemId, ListItem, Module, ModuleKind, RenderContent, RenderItem,
};
use panelkit::surface::RecordingObserver;
use panelkit::{
    Delegate, DelegateRegistry, Engine, ItemAction, ItemsObserver, JsonFileStore, ModuleId,
    ModuleValue, PersistenceStore, Positioning, ValueWrapper,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ===== Test Helpers =====

fn engine() -> Engine {
    Engine::builder().build().expect("engine should build")
}

fn ids(items: &[RenderItem]) -> Vec<String> {
    items.iter().map(|item| item.id.to_string()).collect()
}

/// Custom kind whose delegate stages values in its own table.
#[derive(Debug)]
struct Counter {
    value: ValueWrapper,
}

impl CustomModule for Counter {
    fn kind_name(&self) -> &str {
        "counter"
    }

    fn value_wrapper(&self) -> Option<&ValueWrapper> {
        Some(&self.value)
    }

    fn create_module_delegate(&self) -> Arc<dyn Delegate> {
        Arc::new(CounterDelegate::default())
    }

    fn render(&self, id: &ModuleId, value: Option<&ModuleValue>) -> Vec<RenderItem> {
        let count = match value {
            Some(ModuleValue::Integer(count)) => *count,
            _ => 0,
        };
        vec![RenderItem::new(
            ItemId::module(id),
            RenderContent::Text {
                text: format!("count = {count}"),
                is_title: false,
            },
        )]
    }
}

#[derive(Debug, Default)]
struct CounterDelegate {
    values: Mutex<HashMap<ModuleId, PendingValue<ModuleValue>>>,
}

impl Delegate for CounterDelegate {
    fn current_value(&self, module: &Module) -> Option<ModuleValue> {
        let values = self.values.lock();
        Some(
            values
                .get(module.id())
                .map(|state| state.current().clone())
                .unwrap_or(ModuleValue::Integer(0)),
        )
    }

    fn set_current_value(&self, module: &Module, value: ModuleValue) {
        self.values
            .lock()
            .entry(module.id().clone())
            .or_insert_with(|| PendingValue::new(ModuleValue::Integer(0)))
            .staged = Some(value);
    }

    fn has_pending_changes(&self, module: &Module) -> bool {
        self.values
            .lock()
            .get(module.id())
            .is_some_and(PendingValue::has_pending_changes)
    }

    fn apply_pending_changes(&self, module: &Module) {
        if let Some(state) = self.values.lock().get_mut(module.id()) {
            state.commit();
        }
    }

    fn reset_pending_changes(&self, module: &Module) {
        if let Some(state) = self.values.lock().get_mut(module.id()) {
            state.staged = None;
        }
    }
}

fn counter_module() -> Module {
    Module::custom(
        "counter",
        Arc::new(Counter {
            value: ValueWrapper::new(ModuleValue::Integer(0), |_v: &ModuleValue| {})
                .requiring_confirmation(),
        }),
    )
}

// ===== Scenarios =====

#[tokio::test]
async fn header_and_toggle_scenario() {
    // GIVEN [Header("H"), Toggle("t1", false)] and an observer
    let fired = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&fired);
    let mut engine = engine();
    let recorder = Arc::new(RecordingObserver::new());
    engine.subscribe(recorder.clone());
    engine.replace_all(vec![
        Module::header("H", "H"),
        Module::toggle("t1", "t1", false, move |_on: bool| {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    ]);

    // WHEN the user switches the toggle on through its item action
    engine.settled().await;
    let action = engine.items()[1].action.clone().expect("toggle has an action");
    engine.dispatch(action);
    engine.settled().await;

    // THEN the last publication shows the header and the toggle set to true
    let last = recorder.last().expect("a list was published");
    assert_eq!(ids(&last), vec!["H", "t1"]);
    assert!(matches!(last[1].content, RenderContent::Toggle { is_on: true, .. }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // WHEN true is submitted again
    engine.dispatch(ItemAction::SetToggle {
        module: ModuleId::from("t1"),
        value: true,
    });
    engine.settled().await;

    // THEN the listener does not fire again
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rapid_interaction_converges_to_latest_state() {
    // GIVEN a collapsed long text section
    let mut engine = engine();
    engine.replace_all(vec![Module::long_text("lt", "Long", "Body")]);
    engine.settled().await;
    let recorder = Arc::new(RecordingObserver::new());
    engine.subscribe(recorder.clone());
    let before = recorder.count();

    // WHEN it is toggled 25 times without yielding
    for _ in 0..25 {
        engine.toggle_expansion(&ModuleId::from("lt"));
    }
    engine.settled().await;

    // THEN exactly one new list is published, showing the expanded section
    assert_eq!(recorder.count(), before + 1);
    assert_eq!(
        recorder.last().map(|items| ids(&items)),
        Some(vec!["lt".to_string(), "lt/text".to_string()])
    );
}

#[tokio::test]
async fn every_observer_receives_the_same_snapshot() {
    #[derive(Default)]
    struct Capture(Mutex<Option<usize>>);

    impl ItemsObserver for Capture {
        fn on_items_changed(&self, items: &[RenderItem]) {
            *self.0.lock() = Some(items.as_ptr() as usize);
        }
    }

    let mut engine = engine();
    let first = Arc::new(Capture::default());
    let second = Arc::new(Capture::default());
    engine.subscribe(first.clone());
    engine.subscribe(second.clone());

    engine.replace_all(vec![Module::text("a", "x"), Module::text("b", "y")]);
    engine.settled().await;

    let first = *first.0.lock();
    assert!(first.is_some());
    assert_eq!(first, *second.0.lock(), "Observers should share one list");
}

#[tokio::test]
async fn unsubscribed_observer_stops_receiving() {
    let mut engine = engine();
    let recorder = Arc::new(RecordingObserver::new());
    let id = engine.subscribe(recorder.clone());

    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id), "Second unsubscribe finds nothing");
    engine.replace_all(vec![Module::text("a", "x")]);
    engine.settled().await;

    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn positioning_places_new_modules() {
    let mut engine = engine();
    engine.replace_all(vec![Module::text("a", "a"), Module::text("c", "c")]);

    engine.upsert(Module::text("b", "b"), Positioning::Below("a".into()));
    engine.upsert(Module::text("z", "z"), Positioning::Above("missing".into()));
    engine.upsert(Module::header("h", "h"), Positioning::Bottom);
    engine.settled().await;

    assert_eq!(ids(&engine.items()), vec!["h", "z", "a", "b", "c"]);
}

#[tokio::test]
async fn custom_module_with_its_own_delegate() {
    // GIVEN a custom module whose delegate is registered by the host
    let mut engine = engine();
    let module = counter_module();
    engine
        .register_module_delegate(&module)
        .expect("custom modules supply a delegate");
    assert!(engine.has_delegate(&ModuleKind::Custom("counter".to_string())));
    engine.replace_all(vec![module]);

    // WHEN a value is staged
    let id = ModuleId::from("counter");
    engine.set_current_value(&id, ModuleValue::Integer(3));
    engine.settled().await;

    // THEN the module renders the staged value and the pending bar appears
    let items = engine.items();
    assert_eq!(ids(&items), vec!["counter", "apply_pending_changes", "reset_pending_changes"]);
    assert!(matches!(
        &items[0].content,
        RenderContent::Text { text, .. } if text == "count = 3"
    ));

    // WHEN the change is applied
    engine.dispatch(ItemAction::ApplyPendingChanges);
    engine.settled().await;

    // THEN the value is committed and the bar is gone
    assert_eq!(ids(&engine.items()), vec!["counter"]);
    assert_eq!(engine.current_value(&id), Some(ModuleValue::Integer(3)));
}

#[tokio::test]
async fn noop_engine_renders_without_delegates() {
    let mut engine = Engine::builder()
        .delegates(DelegateRegistry::empty())
        .build()
        .expect("engine should build");
    engine.replace_all(vec![Module::multiple_selection_list(
        "flags",
        "Flags",
        vec![ListItem::titled("a")],
        ValueWrapper::new(ModuleValue::selection(["a"]), |_v: &ModuleValue| {}),
    )
    .initially_expanded(true)]);

    engine.dispatch(ItemAction::ToggleMultiple {
        module: ModuleId::from("flags"),
        item_id: "a".to_string(),
    });
    engine.settled().await;

    // The initial value is still shown and no pending bar exists.
    let items = engine.items();
    assert_eq!(items.len(), 2);
    assert!(matches!(
        items[1].content,
        RenderContent::MultipleSelectionItem { is_selected: true, .. }
    ));
}

#[tokio::test]
async fn persisted_selection_survives_engine_restart() {
    let path = std::env::temp_dir().join(format!(
        "panelkit_scenario_values_{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let flags = || {
        Module::multiple_selection_list(
            "flags",
            "Flags",
            vec![ListItem::titled("a"), ListItem::titled("b")],
            ValueWrapper::new(ModuleValue::empty_selection(), |_v: &ModuleValue| {}).persisted(),
        )
    };

    // GIVEN an engine persisting to a JSON file, with one flag checked
    {
        let store: Arc<dyn PersistenceStore> = Arc::new(JsonFileStore::new(&path));
        let mut engine = Engine::builder()
            .persistence(store)
            .build()
            .expect("engine should build");
        engine.replace_all(vec![flags()]);
        engine.toggle_multiple_selection(&ModuleId::from("flags"), "b");
    }

    // WHEN a new engine loads the same file
    let store: Arc<dyn PersistenceStore> = Arc::new(JsonFileStore::new(&path));
    let mut engine = Engine::builder()
        .persistence(store)
        .build()
        .expect("engine should build");
    engine.replace_all(vec![flags()]);

    // THEN the flag is still checked
    assert_eq!(
        engine.current_value(&ModuleId::from("flags")),
        Some(ModuleValue::selection(["b"]))
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn log_buffer_cap_keeps_five_hundred_newest() {
    let mut engine = engine();
    engine.replace_all(vec![Module::log_feed()]);

    for index in 0..501 {
        engine.log(format!("entry {index}"), None, None);
    }
    engine.settled().await;

    let logs = engine.buffers().logs.entries(None, usize::MAX);
    assert_eq!(logs.len(), 500);
    assert_eq!(logs.first().map(|e| e.message.as_str()), Some("entry 500"));
    assert_eq!(logs.last().map(|e| e.message.as_str()), Some("entry 1"));
}
