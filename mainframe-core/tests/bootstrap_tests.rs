//! Sequencing and failure behavior of the bootstrap coordinator.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{Entry, ScriptedEngine};
use mainframe_core::{
    bootstrap::{Bootstrap, DEFAULT_STORE_NAME, bootstrap},
    collection::CollectionConfig,
    diagnostics::NoopLogger,
    error::{BootstrapError, ConfigurationError, EngineError},
    hook::{HookBindings, HookKind, HookLibrary, HookRegistry, hook_fn},
    settings::{ConnectionOptions, MainframeSettings},
};

fn config(name: &str) -> CollectionConfig {
    CollectionConfig::new(name, json!({ "title": name }))
}

fn noop_hook() -> mainframe_core::hook::HookRef {
    hook_fn(|_doc| Ok(()))
}

#[tokio::test]
async fn test_empty_config_list_never_touches_engine() {
    let engine = ScriptedEngine::new();

    let result = bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        Some(vec!["p1".to_string()]),
        Vec::<CollectionConfig>::new(),
        engine.logger(),
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Configuration(ConfigurationError::EmptyConfigList)
    );
    assert!(engine.entries().is_empty());
}

#[tokio::test]
async fn test_empty_collection_name_is_rejected_before_engine() {
    let engine = ScriptedEngine::new();

    let result = bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![config("students"), config("")],
        NoopLogger,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Configuration(ConfigurationError::EmptyCollectionName(1))
    );
    assert!(engine.entries().is_empty());
}

#[tokio::test]
async fn test_collections_created_in_order_using_alias() {
    let engine = ScriptedEngine::new();

    bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![
            config("students"),
            config("academicSettings").alias("academicsettings"),
            config("teachers"),
        ],
        NoopLogger,
    )
    .await
    .unwrap();

    assert_eq!(
        engine.created(),
        vec!["students", "academicsettings", "teachers"]
    );
}

#[tokio::test]
async fn test_empty_alias_falls_back_to_name() {
    let engine = ScriptedEngine::new();

    bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![config("students").alias(""), config("teachers")],
        NoopLogger,
    )
    .await
    .unwrap();

    assert_eq!(engine.created(), vec!["students", "teachers"]);
}

#[tokio::test]
async fn test_each_binding_is_bound_once_with_batch_disabled() {
    let engine = ScriptedEngine::new();

    bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![
            config("students"),
            config("teachers")
                .hook("preInsert", noop_hook())
                .hook("postSave", noop_hook()),
        ],
        NoopLogger,
    )
    .await
    .unwrap();

    let mut binds = engine.binds();
    binds.sort();

    assert_eq!(
        binds,
        vec![
            ("teachers".to_string(), HookKind::PreInsert, false),
            ("teachers".to_string(), HookKind::PostSave, false),
        ]
    );
}

#[tokio::test]
async fn test_create_failure_stops_remaining_configs() {
    let engine = ScriptedEngine {
        fail_create: Some("parents".to_string()),
        ..Default::default()
    };

    let result = bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![
            config("students").hook("preSave", noop_hook()),
            config("parents"),
            config("teachers").hook("preSave", noop_hook()),
        ],
        NoopLogger,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Engine(EngineError::Backend("cannot create parents".to_string()))
    );
    assert_eq!(engine.created(), vec!["students", "parents"]);
    assert_eq!(
        engine.binds(),
        vec![("students".to_string(), HookKind::PreSave, false)]
    );
}

#[tokio::test]
async fn test_plugins_omitted_still_reports_once_before_open() {
    let engine = ScriptedEngine::new();

    bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![config("students")],
        engine.logger(),
    )
    .await
    .unwrap();

    let entries = engine.entries();
    assert!(!entries.iter().any(|e| matches!(e, Entry::RegisterPlugin(_))));
    assert_eq!(
        entries
            .iter()
            .filter(|e| **e == Entry::Info("apply_plugins".to_string()))
            .count(),
        1
    );
    assert_eq!(entries[0], Entry::Info("apply_plugins".to_string()));
    assert!(matches!(entries[1], Entry::OpenStore { .. }));
}

#[tokio::test]
async fn test_full_sequence_is_strictly_ordered() {
    let engine = ScriptedEngine::new();

    Bootstrap::new(&engine)
        .store_name("school")
        .plugins(vec!["first".to_string(), "second".to_string()])
        .logger(engine.logger())
        .run(
            "memory",
            &ConnectionOptions::default(),
            vec![config("students"), config("teachers").hook("preSave", noop_hook())],
        )
        .await
        .unwrap();

    assert_eq!(
        engine.entries(),
        vec![
            Entry::RegisterPlugin("first".to_string()),
            Entry::RegisterPlugin("second".to_string()),
            Entry::Info("apply_plugins".to_string()),
            Entry::OpenStore {
                name: "school".to_string(),
                adapter: "memory".to_string(),
            },
            Entry::Debug("bootstrap".to_string()),
            Entry::CreateCollection("students".to_string()),
            Entry::Debug("initialize_collections".to_string()),
            Entry::CreateCollection("teachers".to_string()),
            Entry::Debug("initialize_collections".to_string()),
            Entry::BindHook {
                collection: "teachers".to_string(),
                kind: HookKind::PreSave,
                batch: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_plugin_failure_prevents_open() {
    let engine = ScriptedEngine {
        fail_plugin: Some("broken".to_string()),
        ..Default::default()
    };

    let result = Bootstrap::new(&engine)
        .plugins(vec!["ok".to_string(), "broken".to_string(), "never".to_string()])
        .logger(engine.logger())
        .run("memory", &ConnectionOptions::default(), vec![config("students")])
        .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Engine(EngineError::Plugin("broken".to_string()))
    );
    assert_eq!(
        engine.entries(),
        vec![
            Entry::RegisterPlugin("ok".to_string()),
            Entry::RegisterPlugin("broken".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_open_failure_propagates_unchanged() {
    let engine = ScriptedEngine {
        fail_open: Some(EngineError::UnknownAdapter("leveldb".to_string())),
        ..Default::default()
    };

    let result = bootstrap(
        &engine,
        "leveldb",
        &ConnectionOptions::default(),
        None,
        vec![config("students")],
        NoopLogger,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Engine(EngineError::UnknownAdapter("leveldb".to_string()))
    );
    assert!(engine.created().is_empty());
}

#[tokio::test]
async fn test_connection_failure_leaves_no_collections() {
    let engine = ScriptedEngine {
        fail_open: Some(EngineError::Connection("refused".to_string())),
        ..Default::default()
    };

    let result = Bootstrap::new(&engine)
        .plugin("p1".to_string())
        .run("memory", &ConnectionOptions::default(), vec![config("students")])
        .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Engine(EngineError::Connection("refused".to_string()))
    );
    assert!(engine.opened());
    assert!(engine.created().is_empty());
}

#[tokio::test]
async fn test_unknown_hook_kind_is_configuration_error_without_bind() {
    let engine = ScriptedEngine::new();

    let result = bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![
            config("students").hook("onTeleport", noop_hook()),
            config("teachers"),
        ],
        NoopLogger,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Configuration(ConfigurationError::UnknownHookKind("onTeleport".to_string()))
    );
    assert!(engine.binds().is_empty());
    assert_eq!(engine.created(), vec!["students"]);
}

#[tokio::test]
async fn test_engine_refusing_hook_is_hook_binding_error() {
    let engine = ScriptedEngine {
        fail_bind: Some(HookKind::PostCreate),
        ..Default::default()
    };

    let result = bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![
            config("students").hook("postCreate", noop_hook()),
            config("teachers"),
        ],
        NoopLogger,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::HookBinding {
            collection: "students".to_string(),
            kind: HookKind::PostCreate,
            source: EngineError::UnsupportedHook(HookKind::PostCreate),
        }
    );
    assert_eq!(engine.created(), vec!["students"]);
}

#[tokio::test]
async fn test_default_hooks_apply_only_without_own_bindings() {
    let engine = ScriptedEngine::new();

    Bootstrap::new(&engine)
        .default_hook("preInsert", noop_hook())
        .run(
            "memory",
            &ConnectionOptions::default(),
            vec![
                config("students"),
                config("teachers").hooks(HookBindings::new()),
                config("parents").hook("postSave", noop_hook()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(
        engine.binds(),
        vec![
            ("students".to_string(), HookKind::PreInsert, false),
            ("parents".to_string(), HookKind::PostSave, false),
        ]
    );
}

#[tokio::test]
async fn test_registry_alias_binds_underlying_kind() {
    let engine = ScriptedEngine::new();

    Bootstrap::new(&engine)
        .hook_registry(HookRegistry::default().with_alias("onSave", HookKind::PreSave))
        .run(
            "memory",
            &ConnectionOptions::default(),
            vec![config("teachers").hook("onSave", noop_hook())],
        )
        .await
        .unwrap();

    assert_eq!(
        engine.binds(),
        vec![("teachers".to_string(), HookKind::PreSave, false)]
    );
}

#[tokio::test]
async fn test_default_store_name() {
    let engine = ScriptedEngine::new();

    bootstrap(
        &engine,
        "memory",
        &ConnectionOptions::default(),
        None,
        vec![config("students")],
        NoopLogger,
    )
    .await
    .unwrap();

    assert!(engine.entries().contains(&Entry::OpenStore {
        name: DEFAULT_STORE_NAME.to_string(),
        adapter: "memory".to_string(),
    }));
}

#[tokio::test]
async fn test_run_settings_resolves_named_hooks() {
    let engine = ScriptedEngine::new();
    let settings = MainframeSettings::from_json(
        r#"{
            "storeName": "carddemodb",
            "adapter": "memory",
            "collections": [
                { "name": "student", "schema": {} },
                { "name": "receipt", "collection": "receipts", "hooks": { "preInsert": "stamp" } }
            ]
        }"#,
    )
    .unwrap();
    let library = HookLibrary::new().with("stamp", noop_hook());

    Bootstrap::new(&engine)
        .run_settings(&settings, &library)
        .await
        .unwrap();

    assert_eq!(engine.created(), vec!["student", "receipts"]);
    assert_eq!(
        engine.binds(),
        vec![("receipts".to_string(), HookKind::PreInsert, false)]
    );
    assert!(engine.entries().contains(&Entry::OpenStore {
        name: "carddemodb".to_string(),
        adapter: "memory".to_string(),
    }));
}

#[tokio::test]
async fn test_run_settings_unknown_hook_name_never_touches_engine() {
    let engine = ScriptedEngine::new();
    let settings = MainframeSettings::from_json(
        r#"{ "collections": [ { "name": "receipt", "hooks": { "preInsert": "missing" } } ] }"#,
    )
    .unwrap();

    let result = Bootstrap::new(&engine)
        .run_settings(&settings, &HookLibrary::new())
        .await;

    assert_eq!(
        result.unwrap_err(),
        BootstrapError::Configuration(ConfigurationError::UnknownHook(
            "missing".to_string(),
            "receipt".to_string()
        ))
    );
    assert!(engine.entries().is_empty());
}
