use std::fs;

use ambulance_cost_simulator::{
    catalog::Catalog,
    scenario::{JsonFileStore, OwnerId, ScenarioError, ScenarioId, ScenarioStore},
    simulation::InputModel,
};

fn owner(raw: &str) -> OwnerId {
    OwnerId::parse(raw).expect("owner")
}

#[test]
fn save_list_load_delete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let alice = owner("alice");
    let catalog = Catalog::standard();
    let mut inputs = InputModel::default_for(&catalog);
    inputs.set_parameter("trips_per_day", 6.0).expect("set");
    inputs
        .set_source_link("rent", "https://example.com/rent")
        .expect("link");

    assert!(store.list(&alice).expect("list").is_empty());

    let id = store.save(&alice, "  Plan 2025 ", &inputs).expect("save");
    let list = store.list(&alice).expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].name, "Plan 2025");

    let loaded = store.load(&alice, &id).expect("load");
    assert_eq!(loaded.inputs, inputs);
    assert_eq!(loaded.owner, alice);

    store.delete(&alice, &id).expect("delete");
    assert!(store.list(&alice).expect("list").is_empty());
    assert!(matches!(
        store.delete(&alice, &id),
        Err(ScenarioError::NotFound(_))
    ));
}

#[test]
fn owners_do_not_see_each_other() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let inputs = InputModel::default_for(&Catalog::standard());
    let alice = owner("alice");
    let bob = owner("bob");

    let id = store.save(&alice, "privado", &inputs).expect("save");
    assert!(store.list(&bob).expect("list").is_empty());
    assert!(matches!(store.load(&bob, &id), Err(ScenarioError::NotFound(_))));
    assert!(matches!(store.delete(&bob, &id), Err(ScenarioError::NotFound(_))));
    assert!(store.load(&alice, &id).is_ok());
}

#[test]
fn blank_name_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let inputs = InputModel::default_for(&Catalog::standard());
    assert!(matches!(
        store.save(&owner("alice"), "   ", &inputs),
        Err(ScenarioError::EmptyName)
    ));
    assert!(store.list(&owner("alice")).expect("list").is_empty());
}

#[test]
fn corrupt_file_is_skipped_in_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let alice = owner("alice");
    let inputs = InputModel::default_for(&Catalog::standard());
    store.save(&alice, "bueno", &inputs).expect("save");

    let bad_id = ScenarioId::generate();
    fs::write(
        dir.path().join("alice").join(format!("{bad_id}.json")),
        "{ not json",
    )
    .expect("write");
    fs::write(dir.path().join("alice").join("notes.txt"), "ignored").expect("write");

    let list = store.list(&alice).expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "bueno");
    assert!(matches!(
        store.load(&alice, &bad_id),
        Err(ScenarioError::Serde(_))
    ));
}
