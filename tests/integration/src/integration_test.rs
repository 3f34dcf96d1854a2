//! End-to-end integration tests
//!
//! These tests exercise the complete flow: project files -> registry ->
//! resolution against an application config -> switching.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use swapcon_core::{Category, ConfigStore, Error, MemoryStore, SwapCon};
use swapcon_test_utils::pool::RecordingPool;
use swapcon_test_utils::project::{TestProject, sample_env};

/// Application config for a typical web app: one concrete connection per
/// category, each the active default.
const APP_CONFIG: &str = r#"
[broadcasting]
default = "test1"
[broadcasting.connections.test1]
a = "b"

[cache]
default = "test1"
[cache.stores.test1]
a = "b"

[database]
default = "test1"
[database.connections.test1]
a = "b"

[filesystems]
default = "test1"
[filesystems.disks.test1]
a = "b"

[logging]
default = "test1"
[logging.channels.test1]
a = "b"

[queue]
default = "test1"
[queue.connections.test1]
a = "b"
"#;

fn fallback_settings() -> String {
    let mut settings = String::new();
    for category in Category::ALL {
        settings.push_str(&format!(
            "[fallbacks.reuse.{category}]\ncon3 = \"test1\"\n\n[fallbacks.clone.{category}]\ncon4 = \"test1\"\n\n"
        ));
    }
    settings
}

fn swapcon_for(project: &TestProject) -> SwapCon<MemoryStore> {
    let registry = swapcon_env::build_config(project.root()).unwrap();
    let store = MemoryStore::from_toml_str(APP_CONFIG).unwrap();
    SwapCon::new(store, registry)
}

#[rstest]
fn test_env_project_end_to_end(
    #[values(
        Category::Broadcasting,
        Category::Cache,
        Category::Database,
        Category::Filesystem,
        Category::Logging,
        Category::Queue
    )]
    category: Category,
) {
    let project = TestProject::new();
    project.write_env(&sample_env()).write_settings(&fallback_settings());
    let mut swapcon = swapcon_for(&project);

    // the group settles on one member, materialized from its definition
    let member = swapcon.use_connection(category, "con").unwrap();
    assert!(member == "con1" || member == "con2", "got {member}");
    assert_eq!(swapcon.current(category), Some(member.clone()));

    // a scoped swap to a clone fallback, then back
    swapcon
        .swap(category, "con4", |inner| {
            assert_eq!(inner.current(category).as_deref(), Some("con4"));
            assert_eq!(
                inner.store().get(&category.connection_path("con4")),
                Some(json!({ "a": "b" }))
            );
            Ok::<_, Error>(())
        })
        .unwrap();
    assert_eq!(swapcon.current(category), Some(member));

    // reuse fallback never creates a connection of its own
    assert_eq!(swapcon.use_connection(category, "con3").unwrap(), "test1");
    assert!(!swapcon.store().has(&category.connection_path("con3")));

    // definitions layer their values over the template
    assert_eq!(swapcon.resolve(category, "con1").unwrap(), "con1");
    assert_eq!(
        swapcon.store().get(&category.connection_path("con1")),
        Some(json!({ "a": "b", "myval": "con1" }))
    );
}

#[test]
fn test_read_replica_scenario() {
    let project = TestProject::new();
    project
        .write_env(
            "SWAPCON__DATABASE__REPLICA1__CLONE=mysql\n\
             SWAPCON__DATABASE__REPLICA1__HOST=10.0.0.2\n\
             SWAPCON__DATABASE__REPLICA2__CLONE=mysql\n\
             SWAPCON__DATABASE__REPLICA2__HOST=10.0.0.3\n\
             SWAPCON__GROUP__DATABASE__READ=\"replica1, replica2\"\n",
        )
        .write_settings("[fallbacks.reuse.database]\nreporting = \"read\"\n");
    let registry = swapcon_env::build_config(project.root()).unwrap();

    let mut store = MemoryStore::new();
    store.set("database.default", json!("mysql"));
    store.set(
        "database.connections.mysql",
        json!({ "driver": "mysql", "host": "10.0.0.1", "port": 3306 }),
    );
    let mut swapcon = SwapCon::new(store, registry);

    let report = swapcon
        .swap(Category::Database, "reporting", |inner| {
            let active = inner.current(Category::Database).unwrap_or_default();
            let connection = inner
                .store()
                .get(&Category::Database.connection_path(&active))
                .unwrap_or_default();
            Ok::<_, Error>((active, connection))
        })
        .unwrap();

    let (active, connection) = report;
    assert!(active == "replica1" || active == "replica2", "got {active}");
    assert_eq!(connection["driver"], "mysql");
    assert_eq!(connection["port"], 3306);
    assert_ne!(connection["host"], "10.0.0.1");
    assert_eq!(swapcon.current(Category::Database).as_deref(), Some("mysql"));
}

#[test]
fn test_circular_fallbacks_from_settings() {
    let project = TestProject::new();
    project.write_settings(
        "[fallbacks.reuse.cache]\nsessions = \"tenant\"\n\n[fallbacks.clone.cache]\ntenant = \"sessions\"\n",
    );
    let mut swapcon = swapcon_for(&project);

    let err = swapcon.use_connection(Category::Cache, "sessions").unwrap_err();

    assert!(matches!(
        err,
        Error::MaxRecursionExceeded { category: Category::Cache, ref connection } if connection == "sessions"
    ));
    assert_eq!(swapcon.current(Category::Cache).as_deref(), Some("test1"));
}

#[test]
fn test_registry_kept_in_application_config() {
    let mut store = MemoryStore::from_toml_str(APP_CONFIG).unwrap();
    let project = TestProject::new();
    project.write_env("SWAPCON__QUEUE__HIGH__QUEUE=high\nSWAPCON__QUEUE__HIGH__CLONE=test1\n");
    let registry = swapcon_env::build_config(project.root()).unwrap();
    store.set("swapcon", registry.to_value().unwrap());

    let mut swapcon = SwapCon::from_store(store, "swapcon").unwrap();

    assert_eq!(swapcon.use_connection(Category::Queue, "high").unwrap(), "high");
    assert_eq!(
        swapcon.store().get("queue.connections.high"),
        Some(json!({ "a": "b", "queue": "high" }))
    );
}

#[test]
fn test_swaps_across_categories_restore_on_failure() {
    let project = TestProject::new();
    project.write_env(&sample_env()).write_settings(&fallback_settings());
    let mut swapcon = swapcon_for(&project);

    let result = swapcon.swap(Category::Database, "con2", |outer| {
        outer.swap(Category::Cache, "con4", |inner| {
            assert_eq!(inner.current(Category::Database).as_deref(), Some("con2"));
            assert_eq!(inner.current(Category::Cache).as_deref(), Some("con4"));
            Err::<(), _>(Error::Unresolvable {
                category: Category::Cache,
                connection: "job failed".into(),
            })
        })
    });

    assert!(result.is_err());
    assert_eq!(swapcon.current(Category::Database).as_deref(), Some("test1"));
    assert_eq!(swapcon.current(Category::Cache).as_deref(), Some("test1"));
}

#[test]
fn test_materializing_purges_open_database_handle() {
    let project = TestProject::new();
    project.write_env("SWAPCON__DATABASE__TEST1__HOST=changed\n");
    let registry = swapcon_env::build_config(project.root()).unwrap();
    let pool = RecordingPool::new(&["test1"]);
    let purged = pool.purged();
    let mut swapcon = SwapCon::new(MemoryStore::from_toml_str(APP_CONFIG).unwrap(), registry)
        .with_pool(Category::Database, pool);

    // test1 is already concrete, so the definition isn't applied
    assert_eq!(swapcon.resolve(Category::Database, "test1").unwrap(), "test1");
    assert!(purged.borrow().is_empty());

    swapcon
        .update(
            Category::Database,
            "test1",
            swapcon_test_utils::fixtures::settings(json!({ "host": "changed" })),
        )
        .unwrap();
    assert_eq!(*purged.borrow(), vec!["test1".to_string()]);
}
