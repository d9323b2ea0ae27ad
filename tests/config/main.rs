//! Loading catalogs from configuration documents.

#![cfg(feature = "config")]

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use command_chain::config::{CommandTypes, ConfigLoader};
use command_chain::{CatalogFactory, ChainError, Command, Context, ContextExt, Link, MapContext};

const WEB: &str = r#"{
    "catalog": [
        {
            "command": [
                {
                    "name": "main",
                    "type": "chain",
                    "command": [
                        { "type": "copy", "properties": { "from_key": "input", "to_key": "output" } },
                        { "type": "lookup", "properties": { "catalog_name": "steps", "name_key": "step" } },
                        { "type": "remove", "properties": { "from_key": "input" } }
                    ]
                }
            ]
        },
        {
            "name": "steps",
            "command": [
                { "name": "greet", "type": "copy", "properties": { "value": "hello", "to_key": "greeting" } },
                { "name": "reset", "type": "remove", "properties": { "from_key": "greeting" } }
            ]
        }
    ]
}"#;

#[test]
fn json_document_builds_working_chains() {
    let factory = Arc::new(CatalogFactory::new());
    ConfigLoader::new(factory.clone()).load_json(WEB).unwrap();

    assert_eq!(factory.catalog_names(), vec!["steps".to_string()]);
    let main = factory.command("main").unwrap().unwrap();

    let mut ctx = MapContext::new();
    ctx.put("input", json!(42)).unwrap();
    ctx.put("step", json!("greet")).unwrap();
    assert!(!main.execute(&mut ctx).unwrap());

    assert_eq!(ctx.get("output"), Some(json!(42)));
    assert_eq!(ctx.get_str("greeting").as_deref(), Some("hello"));
    assert!(!ctx.contains_key("input"));
}

#[test]
fn lookup_targets_resolve_at_execution_time() {
    let factory = Arc::new(CatalogFactory::new());
    let loader = ConfigLoader::new(factory.clone());
    loader
        .load_json(
            r#"{ "catalog": [{ "command": [
                { "name": "main", "type": "lookup", "properties": { "catalog_name": "late", "name": "x" } }
            ] }] }"#,
        )
        .unwrap();

    let main = factory.command("main").unwrap().unwrap();
    let mut ctx = MapContext::new();
    assert!(main.execute(&mut ctx).is_err());

    loader
        .load_json(
            r#"{ "catalog": [{ "name": "late", "command": [
                { "name": "x", "type": "copy", "properties": { "value": 1, "to_key": "done" } }
            ] }] }"#,
        )
        .unwrap();
    main.execute(&mut ctx).unwrap();
    assert_eq!(ctx.get("done"), Some(json!(1)));
}

#[test]
fn failing_entry_leaves_catalog_untouched() {
    let factory = Arc::new(CatalogFactory::new());
    let err = ConfigLoader::new(factory.clone())
        .load_json(
            r#"{ "catalog": [{ "name": "web", "command": [
                { "name": "ok", "type": "remove" },
                { "name": "bad", "type": "teleport" }
            ] }] }"#,
        )
        .unwrap_err();
    assert!(matches!(err, ChainError::Config(ref m) if m.contains("teleport")));
    assert!(factory.catalog("web").is_none());
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StampProperties {
    key: String,
    #[serde(default)]
    stop: bool,
}

#[test]
fn custom_command_types() {
    let types = CommandTypes::new().register("stamp", |config, _, _| {
        let props: StampProperties = config.properties_as()?;
        Ok(Link::from_fn(move |ctx| {
            ctx.put(&props.key, json!(true))?;
            Ok(props.stop)
        }))
    });

    let factory = Arc::new(CatalogFactory::new());
    ConfigLoader::new(factory.clone())
        .with_types(types)
        .load_json(
            r#"{ "catalog": [{ "command": [{ "name": "main", "type": "chain", "command": [
                { "type": "stamp", "properties": { "key": "a" } },
                { "type": "stamp", "properties": { "key": "b", "stop": true } },
                { "type": "stamp", "properties": { "key": "c" } }
            ] }] }] }"#,
        )
        .unwrap();

    let mut ctx = MapContext::new();
    assert!(factory.command("main").unwrap().unwrap().execute(&mut ctx).unwrap());
    assert_eq!(ctx.keys(), vec!["a", "b"]);
}

#[test]
fn custom_container_types_take_children() {
    let types = CommandTypes::new().register_container("first_of", |config, types, catalogs| {
        let children = config
            .commands
            .iter()
            .map(|child| types.build(child, catalogs))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Link::from_fn(move |ctx| {
            for child in &children {
                child.execute(ctx)?;
                if ctx.contains_key("picked") {
                    break;
                }
            }
            Ok(false)
        }))
    });

    let doc = r#"{ "catalog": [{ "command": [{ "name": "main", "type": "first_of", "command": [
        { "type": "copy", "properties": { "value": "a", "to_key": "picked" } },
        { "type": "copy", "properties": { "value": "b", "to_key": "picked" } }
    ] }] }] }"#;

    let factory = Arc::new(CatalogFactory::new());
    ConfigLoader::new(factory.clone()).with_types(types).load_json(doc).unwrap();

    let mut ctx = MapContext::new();
    factory.command("main").unwrap().unwrap().execute(&mut ctx).unwrap();
    assert_eq!(ctx.get_str("picked").as_deref(), Some("a"));

    let plain = ConfigLoader::new(Arc::new(CatalogFactory::new()))
        .load_json(&doc.replace("first_of", "copy"))
        .unwrap_err();
    assert!(matches!(plain, ChainError::Config(ref m) if m.contains("cannot contain commands")));
}

#[test]
fn load_path_reads_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalogs.json");
    std::fs::write(&path, WEB).unwrap();

    let factory = Arc::new(CatalogFactory::new());
    ConfigLoader::new(factory.clone()).load_path(&path).unwrap();
    assert!(factory.command("steps:greet").unwrap().is_some());

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        ConfigLoader::new(factory).load_path(&missing),
        Err(ChainError::Config(_))
    ));
}

#[cfg(feature = "toml")]
mod toml_documents {
    use super::*;

    const DOC: &str = r#"
[[catalog]]
name = "web"

  [[catalog.command]]
  name = "main"
  type = "chain"

    [[catalog.command.command]]
    type = "copy"
    properties = { from_key = "input", to_key = "output" }

    [[catalog.command.command]]
    type = "lookup"
    properties = { catalog_name = "auth", name = "check", optional = true }
"#;

    #[test]
    fn toml_document_matches_json_semantics() {
        let factory = Arc::new(CatalogFactory::new());
        ConfigLoader::new(factory.clone()).load_toml(DOC).unwrap();

        let mut ctx = MapContext::new();
        ctx.put("input", json!("x")).unwrap();
        let main = factory.command("web:main").unwrap().unwrap();
        assert!(!main.execute(&mut ctx).unwrap());
        assert_eq!(ctx.get("output"), Some(json!("x")));
    }

    #[test]
    fn load_path_reads_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogs.toml");
        std::fs::write(&path, DOC).unwrap();

        let factory = Arc::new(CatalogFactory::new());
        ConfigLoader::new(factory.clone()).load_path(&path).unwrap();
        assert_eq!(factory.catalog_names(), vec!["web".to_string()]);
    }
}
