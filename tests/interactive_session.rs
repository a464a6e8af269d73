use std::io::Cursor;

use ambulance_cost_simulator::{
    app::{self, Session},
    config::Config,
    scenario::{OwnerId, ScenarioStore},
};

fn session_in(dir: &tempfile::TempDir, owner: Option<&str>) -> Session {
    let config = Config {
        scenario_dir: dir.path().join("scenarios"),
        ..Config::default()
    };
    Session::new(config, dir.path().join("config.toml"), Some("en"), owner).expect("session")
}

fn drive(session: &mut Session, script: &str) {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    app::run_interactive(session, &mut input).expect("interactive session");
}

#[test]
fn failed_client_removal_keeps_earlier_edits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(&dir, None);

    // 8번 rent를 바꾼 뒤 없는 고객 99 삭제 시도, 그 다음 종료
    drive(&mut session, "2\n8\n12345\n\n4\n2\n99\n0\n");

    assert_eq!(session.input.shared_fixed.rent, 12_345.0);
    assert_eq!(session.input.clients.len(), 3);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn closed_input_ends_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(&dir, None);
    drive(&mut session, "");
    drive(&mut session, "abc\n");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn closed_input_inside_a_prompt_ends_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(&dir, None);
    drive(&mut session, "2\n8\n");
    drive(&mut session, "4\n5\n");
    assert_eq!(session.input.shared_fixed.rent, 2_500_000.0);
}

#[test]
fn bad_scenario_id_is_reported_and_menu_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(&dir, Some("alice"));

    drive(&mut session, "5\n3\nnot-a-uuid\n5\n2\nPlan A\n0\n");

    let owner = OwnerId::parse("alice").expect("owner");
    let list = session.store.list(&owner).expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Plan A");
}

#[test]
fn zero_trips_keeps_previous_result_as_stale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(&dir, None);

    // 22번 operating_days
    drive(&mut session, "2\n22\n0\n\n0\n");

    assert!(session.result.is_some());
    assert!(session.result_is_stale);
}
