use std::sync::Arc;
use std::thread;

use command_chain::{Catalog, CatalogFactory, CatalogScopes, ChainError, Link, DEFAULT_SCOPE};

use crate::support::{populated, step};

#[test]
fn composite_ids_resolve_registered_commands() {
    let factory = populated();

    let main = factory.default_catalog().unwrap().command("main").unwrap();
    assert!(factory.command("main").unwrap().unwrap().ptr_eq(&main));

    let check = factory.catalog("auth").unwrap().command("check").unwrap();
    let found = factory.command("auth:check").unwrap().unwrap();
    assert!(found.ptr_eq(&check));
    assert!(found.is_filter());
}

#[test]
fn missing_parts_resolve_to_none() {
    let factory = populated();
    assert!(factory.command("auth:nothing").unwrap().is_none());
    assert!(factory.command("billing:charge").unwrap().is_none());
    assert!(factory.command("nothing").unwrap().is_none());

    let empty = CatalogFactory::new();
    assert!(empty.command("main").unwrap().is_none());
}

#[test]
fn more_than_one_delimiter_always_fails() {
    let factory = populated();
    for id in ["a:b:c", "auth:check:extra", "::", "a::"] {
        let err = factory.command(id).unwrap_err();
        assert!(matches!(err, ChainError::InvalidArgument(_)), "{}", id);
    }
}

#[test]
fn catalog_replacement_and_names() {
    let factory = populated();
    factory.add_catalog("auth", Arc::new(Catalog::new()));
    assert!(factory.command("auth:check").unwrap().is_none());
    assert_eq!(factory.catalog_names(), vec!["auth".to_string()]);

    factory.clear();
    assert!(factory.default_catalog().is_none());
    assert!(factory.catalog_names().is_empty());
}

#[test]
fn re_registering_a_name_replaces_the_command() {
    let catalog = Catalog::new();
    let first = step("first", false);
    let second = step("second", false);
    catalog.add_command("x", first.clone());
    catalog.add_command("x", second.clone());
    assert_eq!(catalog.len(), 1);
    assert!(catalog.command("x").unwrap().ptr_eq(&second));
    assert!(!catalog.command("x").unwrap().ptr_eq(&first));
}

#[test]
fn scopes_are_isolated() {
    let scopes = CatalogScopes::new();
    let tenant_a = scopes.instance("tenant-a");
    let tenant_b = scopes.instance("tenant-b");
    tenant_a.set_default_catalog(Arc::new(Catalog::new().with_command("main", step("a", false))));

    assert!(tenant_a.command("main").unwrap().is_some());
    assert!(tenant_b.command("main").unwrap().is_none());
    assert!(Arc::ptr_eq(&tenant_a, &scopes.instance("tenant-a")));
    assert!(Arc::ptr_eq(&scopes.default_instance(), &scopes.instance(DEFAULT_SCOPE)));

    scopes.clear("tenant-a");
    assert!(!Arc::ptr_eq(&tenant_a, &scopes.instance("tenant-a")));
    assert!(scopes.instance("tenant-a").command("main").unwrap().is_none());
}

#[test]
fn concurrent_registration_and_lookup() {
    let catalog = Arc::new(Catalog::new());
    thread::scope(|scope| {
        for worker in 0..8 {
            let catalog = catalog.clone();
            scope.spawn(move || {
                for n in 0..50 {
                    let name = format!("w{}-{}", worker, n);
                    catalog.add_command(name.clone(), Link::from_fn(|_| Ok(false)));
                    assert!(catalog.command(&name).is_some());
                }
            });
        }
    });
    assert_eq!(catalog.len(), 400);
}
