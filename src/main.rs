//! panelkit - Demo entry point
//!
//! Builds a sample panel, streams a few log entries into it and prints the
//! converged render list as text.

use clap::Parser;
use panelkit::model::{
    EntryId, LifecycleEvent, LifecycleLogEntry, ListItem, ModuleBody, NetworkLogEntry,
    NetworkLogFeedModule,
};
use panelkit::{
    Engine, EngineConfig, ItemAction, JsonFileStore, MemoryStore, Module, ModuleValue,
    PersistenceStore, Positioning, ValueWrapper,
};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use tracing::info;

/// panelkit - render a sample debug panel as text
#[derive(Parser, Debug)]
#[command(name = "panelkit")]
#[command(version)]
#[command(about = "Render a sample debug panel built with the panelkit engine")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Expand every section before printing
    #[arg(short, long)]
    pub expand_all: bool,

    /// Capacity of each log buffer
    #[arg(long)]
    pub log_capacity: Option<usize>,

    /// Draw buttons as list rows
    #[arg(long)]
    pub list_buttons: bool,

    /// JSON file for persisted module values
    #[arg(long)]
    pub persistence: Option<PathBuf>,

    /// Persist module values to the default data file
    #[arg(long)]
    pub persist: bool,

    /// Stage a feature flag change so the Apply/Reset bar is shown
    #[arg(long)]
    pub stage_change: bool,
}

/// Where persisted values live: an explicit path wins, `--persist` falls
/// back to the platform data directory.
fn store_path(explicit: Option<PathBuf>, persist: bool) -> Option<PathBuf> {
    explicit.or_else(|| persist.then(JsonFileStore::default_path).flatten())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = panelkit::config::loader::load_config_with_precedence(args.config.clone())?;
        let merged = panelkit::config::loader::merge_config(config_file);
        let with_env = panelkit::config::loader::apply_env_overrides(merged);

        let list_buttons_override = if args.list_buttons { Some(true) } else { None };
        panelkit::config::loader::apply_cli_overrides(
            with_env,
            args.log_capacity,
            list_buttons_override,
            args.persistence.clone(),
        )
    };

    // Tracing goes to the log file and into the panel's log feed
    let (feed_tx, feed_rx) = mpsc::channel();
    panelkit::logging::init_with_feed(&config.log_file_path, Some(feed_tx))?;

    info!(config = ?config, "Configuration loaded and resolved");

    let store: Arc<dyn PersistenceStore> =
        match store_path(config.persistence_path.clone(), args.persist) {
            Some(path) => Arc::new(JsonFileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        };

    let mut engine = Engine::builder()
        .config(EngineConfig::from(&config))
        .persistence(store)
        .build()?;

    engine.replace_all(sample_modules());
    engine.upsert(
        Module::text("build", format!("panelkit {}", env!("CARGO_PKG_VERSION"))),
        Positioning::Below("title".into()),
    );
    feed_sample_entries(&mut engine);

    if args.stage_change {
        engine.dispatch(ItemAction::ToggleMultiple {
            module: "features".into(),
            item_id: "beta_search".to_string(),
        });
    }

    if args.expand_all {
        let expandable: Vec<_> = engine
            .modules()
            .into_iter()
            .filter(|module| module.initial_expansion() == Some(false))
            .map(|module| module.id().clone())
            .collect();
        for id in expandable {
            engine.toggle_expansion(&id);
        }
    }

    info!(modules = engine.modules().len(), "Sample panel ready");
    engine.drain_log_channel(&feed_rx);

    engine.settled().await;
    print!("{}", panelkit::surface::text::render_items(&engine.items()));

    Ok(())
}

fn sample_modules() -> Vec<Module> {
    let features = ValueWrapper::new(
        ModuleValue::selection(["new_onboarding"]),
        |value: &ModuleValue| info!(?value, "Feature flags changed"),
    )
    .persisted()
    .requiring_confirmation();

    vec![
        Module::header("title", "Debug menu"),
        Module::toggle("dark_mode", "Dark mode", false, |on: bool| {
            info!(on, "Dark mode toggled")
        }),
        Module::single_selection_list(
            "environment",
            "Environment",
            vec![
                ListItem::new("prod", "Production"),
                ListItem::new("staging", "Staging"),
            ],
            Some("prod".to_string()),
            |item: &str| info!(item, "Environment selected"),
        ),
        Module::multiple_selection_list(
            "features",
            "Feature flags",
            vec![
                ListItem::new("new_onboarding", "New onboarding"),
                ListItem::new("beta_search", "Beta search"),
            ],
            features,
        )
        .initially_expanded(true),
        Module::key_value_list(
            "device",
            "Device",
            vec![
                ("os".to_string(), std::env::consts::OS.to_string()),
                ("arch".to_string(), std::env::consts::ARCH.to_string()),
            ],
        ),
        Module::long_text(
            "about",
            "About",
            "Modules are rendered in registration order, headers first.",
        ),
        Module::keyline_overlay_toggle(),
        Module::app_info_button(),
        Module::screenshot_button(),
        Module::button("clear_cache", "Clear cache", || info!("Cache cleared")),
        Module::log_feed().initially_expanded(true),
        network_feed(),
        Module::lifecycle_log_feed(),
    ]
}

fn network_feed() -> Module {
    Module::new(
        NetworkLogFeedModule::ID,
        ModuleBody::NetworkLogFeed(NetworkLogFeedModule {
            title: "Network".to_string(),
            base_url: Some("https://api.example.com".to_string()),
            max_item_count: Some(5),
            is_initially_expanded: true,
            should_show_timestamp: false,
            should_show_headers: false,
        }),
    )
}

fn feed_sample_entries(engine: &mut Engine) {
    engine.log("Session started", Some("app".to_string()), None);
    engine.log(
        "Sync failed",
        Some("sync".to_string()),
        Some("{\"status\":503}".to_string()),
    );

    let request: EntryId = engine.next_entry_id();
    engine.append_network_log(NetworkLogEntry::request(
        request,
        "GET",
        "https://api.example.com/v1/profile",
    ));
    let response = engine.next_entry_id();
    engine.append_network_log(NetworkLogEntry::response(
        response,
        "GET",
        "https://api.example.com/v1/profile",
        84,
    ));

    for event in [
        LifecycleEvent::Created,
        LifecycleEvent::Started,
        LifecycleEvent::Resumed,
    ] {
        let id = engine.next_entry_id();
        engine.append_lifecycle_log(LifecycleLogEntry::new(id, "MainScreen", event));
    }
}
