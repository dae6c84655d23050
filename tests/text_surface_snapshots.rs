//! Snapshot tests for the plain-text render surface
//!
//! Builds panels through the public engine API, waits for the rebuild to
//! converge and captures the text rendering with insta. Timestamps are off
//! in every feed so the output is stable.

use panelkit::model::{
    LifecycleEvent, LifecycleLogEntry, ListItem, LogFeedModule, ModuleBody, NetworkLogEntry,
    NetworkLogFeedModule,
};
use panelkit::surface::text::render_items;
use panelkit::{Engine, EngineConfig, ItemAction, Module, ModuleId, ModuleValue, ValueWrapper};

// ===== Test Helpers =====

fn engine() -> Engine {
    Engine::builder().build().expect("engine should build")
}

async fn render(engine: &Engine) -> String {
    engine.settled().await;
    render_items(&engine.items())
}

fn log_feed(max_item_count: usize) -> Module {
    Module::new(
        LogFeedModule::ID,
        ModuleBody::LogFeed(LogFeedModule {
            title: "Logs".to_string(),
            label: None,
            max_item_count: Some(max_item_count),
            is_initially_expanded: true,
            should_show_timestamp: false,
        }),
    )
}

// ===== Snapshots =====

#[tokio::test]
async fn snapshot_basic_panel() {
    let mut engine = engine();
    engine.replace_all(vec![
        Module::toggle("dark", "Dark mode", true, |_on: bool| {}),
        Module::header("title", "Debug menu"),
        Module::button("clear", "Clear cache", || {}),
        Module::key_value_list(
            "device",
            "Device",
            vec![("os".to_string(), "linux".to_string())],
        ),
        Module::long_text("about", "About", "Hidden until expanded"),
    ]);

    insta::assert_snapshot!(render(&engine).await, @r"
    # Debug menu
    [x] Dark mode
    <Clear cache>
    Device
      os: linux
    + About
    ");
}

#[tokio::test]
async fn snapshot_buttons_as_list_items() {
    let mut engine = Engine::builder()
        .config(EngineConfig {
            use_list_items_for_buttons: true,
            ..EngineConfig::default()
        })
        .build()
        .expect("engine should build");
    engine.replace_all(vec![Module::app_info_button(), Module::screenshot_button()]);

    insta::assert_snapshot!(render(&engine).await, @r"
    > Show app info
    > Take a screenshot
    ");
}

#[tokio::test]
async fn snapshot_selection_lists() {
    let mut engine = engine();
    engine.replace_all(vec![
        Module::single_selection_list(
            "env",
            "Environment",
            vec![ListItem::new("prod", "Production"), ListItem::new("dev", "Development")],
            Some("prod".to_string()),
            |_item: &str| {},
        )
        .initially_expanded(true),
        Module::multiple_selection_list(
            "flags",
            "Flags",
            vec![ListItem::new("a", "Alpha"), ListItem::new("b", "Beta")],
            ValueWrapper::new(ModuleValue::selection(["a"]), |_v: &ModuleValue| {})
                .requiring_confirmation(),
        )
        .initially_expanded(true),
    ]);

    engine.select_single(&ModuleId::from("env"), "dev");
    engine.dispatch(ItemAction::ToggleMultiple {
        module: ModuleId::from("flags"),
        item_id: "b".to_string(),
    });

    insta::assert_snapshot!(render(&engine).await, @r"
    - Environment
      ( ) Production
      (o) Development
    - Flags
      [x] Alpha
      [x] Beta
    <Apply>
    <Reset>
    ");
}

#[tokio::test]
async fn snapshot_log_feed_with_show_more() {
    let mut engine = engine();
    engine.replace_all(vec![log_feed(2)]);
    engine.log("first", None, None);
    engine.log("second", Some("net".to_string()), None);
    engine.log("third", None, Some("payload".to_string()));

    insta::assert_snapshot!(render(&engine).await, @r"
    - Logs
      third
      [net] second
      ... 1 more
    ");

    engine.show_more(&ModuleId::from(LogFeedModule::ID));

    insta::assert_snapshot!(render(&engine).await, @r"
    - Logs
      third
      [net] second
      first
    ");
}

#[tokio::test]
async fn snapshot_network_and_lifecycle_feeds() {
    let mut engine = engine();
    engine.replace_all(vec![
        Module::new(
            NetworkLogFeedModule::ID,
            ModuleBody::NetworkLogFeed(NetworkLogFeedModule {
                title: "Network".to_string(),
                base_url: Some("https://api.example.com".to_string()),
                max_item_count: None,
                is_initially_expanded: true,
                should_show_timestamp: false,
                should_show_headers: true,
            }),
        ),
        Module::lifecycle_log_feed().initially_expanded(true),
    ]);

    let id = engine.next_entry_id();
    let mut request = NetworkLogEntry::request(id, "POST", "https://api.example.com/login");
    request.headers = vec!["Content-Type: application/json".to_string()];
    engine.append_network_log(request);
    let id = engine.next_entry_id();
    engine.append_network_log(NetworkLogEntry::response(
        id,
        "POST",
        "https://api.example.com/login",
        120,
    ));
    for event in [LifecycleEvent::Created, LifecycleEvent::Resumed] {
        let id = engine.next_entry_id();
        engine.append_lifecycle_log(LifecycleLogEntry::new(id, "LoginScreen", event));
    }

    insta::assert_snapshot!(render(&engine).await, @r"
    - Network
      <- POST /login (120 ms)
      -> POST /login
         Content-Type: application/json
    - Lifecycle logs
      LoginScreen: resumed
      LoginScreen: created
    ");
}

#[tokio::test]
async fn snapshot_empty_feed_hides_icon() {
    let mut engine = engine();
    engine.replace_all(vec![Module::log_feed()]);

    assert_eq!(
        render(&engine).await,
        "  Logs\n",
        "An empty feed shows its title without an expansion marker"
    );
}
