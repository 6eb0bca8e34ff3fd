use super::*;
use serde_json::json;

fn workload(name: &str, resources: &[(&str, ResourceDecl)]) -> Workload {
    let mut metadata = crate::domain::entities::Mapping::new();
    if !name.is_empty() {
        metadata.insert("name".to_string(), json!(name));
    }
    Workload {
        api_version: "score.dev/v1b1".to_string(),
        metadata,
        service: None,
        containers: BTreeMap::new(),
        resources: resources
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

#[test]
fn new_context_is_empty_and_versioned() {
    let ctx = Context::new("demo");
    assert_eq!(ctx.project_name(), "demo");
    assert_eq!(ctx.version(), env!("CARGO_PKG_VERSION"));
    assert_eq!(ctx.resources().count(), 0);
    assert_eq!(ctx.specs().count(), 0);
}

#[test]
fn update_requires_a_name() {
    let mut ctx = Context::new("demo");
    let err = ctx.update(workload("", &[])).unwrap_err();
    assert!(matches!(err, ComposeError::Validation(_)));
    assert!(err.to_string().contains("name"));
}

#[test]
fn update_registers_spec_and_bindings() {
    let mut ctx = Context::new("demo");
    ctx.update(workload(
        "web",
        &[
            ("db", ResourceDecl::new("postgres")),
            ("cache", ResourceDecl::new("redis").with_class("large")),
        ],
    ))
    .unwrap();

    assert!(ctx.spec("web").is_some());
    assert_eq!(
        ctx.resource_uid("web", "db").map(|u| u.as_str()),
        Some("postgres::default::web.db")
    );
    assert_eq!(
        ctx.resource_uid("web", "cache").map(|u| u.as_str()),
        Some("redis::large::web.cache")
    );

    let db = ctx.resource(&ResourceUid::from("postgres::default::web.db")).unwrap();
    assert!(db.current);
    assert_eq!(db.name, "web.db");
    assert_eq!(db.class(), "default");
    assert_eq!(db.res_type(), "postgres");
}

#[test]
fn repeated_updates_yield_same_ids() {
    let mut ctx = Context::new("demo");
    let spec = workload("web", &[("db", ResourceDecl::new("postgres"))]);
    ctx.update(spec.clone()).unwrap();
    let first = ctx.resource_uid("web", "db").cloned();
    ctx.update(spec).unwrap();
    assert_eq!(ctx.resource_uid("web", "db").cloned(), first);
    assert_eq!(ctx.resources().count(), 1);
}

#[test]
fn update_preserves_existing_provisioned_state() {
    let mut ctx = Context::new("demo");
    let spec = workload("web", &[("db", ResourceDecl::new("postgres"))]);
    ctx.update(spec.clone()).unwrap();

    let id = ctx.resource_uid("web", "db").cloned().unwrap();
    let mut provisioned = Provisioned::new();
    provisioned
        .state
        .insert("password".to_string(), json!("s3cret"));
    ctx.set_provisioned_resource(id.clone(), provisioned.clone());

    ctx.update(spec).unwrap();
    assert_eq!(ctx.provisioned_resource(&id), Some(&provisioned));
}

#[test]
fn removed_resource_is_not_current_but_keeps_outputs() {
    let mut ctx = Context::new("demo");
    ctx.update(workload("web", &[("db", ResourceDecl::new("postgres"))]))
        .unwrap();
    let id = ctx.resource_uid("web", "db").cloned().unwrap();

    let mut provisioned = Provisioned::new();
    provisioned.outputs.insert("host".to_string(), json!("pg-1"));
    ctx.set_provisioned_resource(id.clone(), provisioned.clone());

    ctx.update(workload("web", &[])).unwrap();

    let resource = ctx.resource(&id).unwrap();
    assert!(!resource.current);
    assert_eq!(ctx.resource_uid("web", "db"), None);
    assert_eq!(ctx.provisioned_resource(&id), Some(&provisioned));
    assert_eq!(ctx.current_provisioned_resources().count(), 0);
    assert_eq!(ctx.current_resources().count(), 0);
}

#[test]
fn readding_resource_makes_it_current_again() {
    let mut ctx = Context::new("demo");
    let with_db = workload("web", &[("db", ResourceDecl::new("postgres"))]);
    ctx.update(with_db.clone()).unwrap();
    ctx.update(workload("web", &[])).unwrap();
    ctx.update(with_db).unwrap();

    let id = ctx.resource_uid("web", "db").cloned().unwrap();
    assert!(ctx.resource(&id).unwrap().current);
}

#[test]
fn current_is_recomputed_across_all_workloads() {
    let mut ctx = Context::new("demo");
    ctx.update(workload("a", &[("db", ResourceDecl::new("postgres"))]))
        .unwrap();
    ctx.update(workload("b", &[("db", ResourceDecl::new("postgres"))]))
        .unwrap();

    // Updating b must not touch a's binding.
    ctx.update(workload("b", &[])).unwrap();
    let a_db = ResourceUid::from("postgres::default::a.db");
    let b_db = ResourceUid::from("postgres::default::b.db");
    assert!(ctx.resource(&a_db).unwrap().current);
    assert!(!ctx.resource(&b_db).unwrap().current);
}

#[test]
fn changing_class_creates_a_new_instance() {
    let mut ctx = Context::new("demo");
    ctx.update(workload("web", &[("db", ResourceDecl::new("postgres"))]))
        .unwrap();
    ctx.update(workload(
        "web",
        &[("db", ResourceDecl::new("postgres").with_class("ha"))],
    ))
    .unwrap();

    let old = ResourceUid::from("postgres::default::web.db");
    let new = ResourceUid::from("postgres::ha::web.db");
    assert!(!ctx.resource(&old).unwrap().current);
    assert!(ctx.resource(&new).unwrap().current);
}

#[test]
fn build_config_is_tracked_per_workload() {
    let mut ctx = Context::new("demo");
    ctx.set_build("web", json!({"context": "."}));
    assert_eq!(ctx.build("web"), Some(&json!({"context": "."})));
    assert_eq!(ctx.build("other"), None);
}

#[test]
fn context_round_trips_through_yaml() {
    let mut ctx = Context::new("demo");
    ctx.update(workload(
        "web",
        &[(
            "db",
            ResourceDecl::new("postgres").with_params(
                json!({"version": 16})
                    .as_object()
                    .cloned()
                    .unwrap(),
            ),
        )],
    ))
    .unwrap();
    let mut provisioned = Provisioned::new();
    provisioned.outputs.insert("port".to_string(), json!(5432));
    ctx.set_provisioned_resource(ResourceUid::from("postgres::default::web.db"), provisioned);

    let yaml = serde_yaml_ng::to_string(&ctx).unwrap();
    assert!(yaml.contains("composeProjectName: demo"));
    assert!(yaml.contains("postgres::default::web.db"));

    let back: Context = serde_yaml_ng::from_str(&yaml).unwrap();
    assert_eq!(back, ctx);
}

#[test]
fn source_dirs_persist_per_workload() {
    let mut ctx = Context::new("demo");
    ctx.set_source_dir("a", "/p/a");
    ctx.set_source_dir("b", "/p/b");

    let yaml = serde_yaml_ng::to_string(&ctx).unwrap();
    assert!(yaml.contains("sourceDirs:"));

    let back: Context = serde_yaml_ng::from_str(&yaml).unwrap();
    assert_eq!(back.source_dir("a"), Some(Path::new("/p/a")));
    assert_eq!(back.source_dir("b"), Some(Path::new("/p/b")));
    assert_eq!(back.source_dir("c"), None);
}

#[test]
fn context_without_source_dirs_loads() {
    let ctx: Context =
        serde_yaml_ng::from_str("version: 0.1.0\ncomposeProjectName: demo\nworkloads:\n  specs: {}\n")
            .unwrap();
    assert_eq!(ctx.project_name(), "demo");
    assert_eq!(ctx.source_dir("a"), None);
}
