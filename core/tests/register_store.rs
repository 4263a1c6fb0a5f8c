use burndown_core::{
    command::NewRisk,
    error::BurndownError,
    record::{RecordSet, RiskRecord},
    role::Role,
    store::RegisterStore,
};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn make_store() -> RegisterStore {
    let store = RegisterStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn temp_db_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("burndown-{name}-{}.db", std::process::id()))
}

fn remove_db(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

fn new_risk(id: &str) -> NewRisk {
    NewRisk {
        id: id.into(),
        description: "Vendor API change".into(),
        open_date: Some(d(2024, 1, 5)),
        expected_end_date: Some(d(2024, 2, 1)),
        closure_date: None,
        risk_type: "Technical".into(),
        probability: "High".into(),
        impact: "Medium".into(),
        difficulty: "Low".into(),
        priority: "Critical".into(),
        owner: "ana".into(),
        action_plan: "Pin client version".into(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn added_risk_round_trips_through_store() {
    let store = make_store();
    let record = new_risk("R1").into_record().unwrap();
    store.insert_risk(&record).unwrap();

    let loaded = store.all_risks().unwrap();
    assert_eq!(loaded.records(), &[record]);
}

#[test]
fn duplicate_risk_id_is_rejected_on_add() {
    let store = make_store();
    store.insert_risk(&new_risk("R1").into_record().unwrap()).unwrap();

    let err = store
        .insert_risk(&new_risk("R1").into_record().unwrap())
        .unwrap_err();
    assert!(
        matches!(err, BurndownError::DuplicateRiskId { ref risk_id } if risk_id == "R1"),
        "unexpected error: {err}"
    );
    assert_eq!(store.risk_count().unwrap(), 1);
}

#[test]
fn add_form_requires_owner_and_dates() {
    let mut risk = new_risk("R2");
    risk.owner = "  ".into();
    assert!(matches!(
        risk.into_record(),
        Err(BurndownError::MissingField { field: "owner", .. })
    ));

    let mut risk = new_risk("R3");
    risk.expected_end_date = None;
    assert!(matches!(
        risk.into_record(),
        Err(BurndownError::MissingField { field: "expected_end_date", .. })
    ));
}

/// Saving replaces the register wholesale and keeps insertion order.
#[test]
fn replace_all_overwrites_register() {
    let store = make_store();
    store.insert_risk(&new_risk("OLD").into_record().unwrap()).unwrap();

    let register = RecordSet::new(vec![
        RiskRecord::new("B", d(2024, 3, 1), d(2024, 3, 20), Some(d(2024, 3, 18))),
        RiskRecord::new("A", d(2024, 1, 1), d(2024, 1, 10), None),
        // Duplicates are tolerated in a saved register.
        RiskRecord::new("A", d(2024, 1, 2), d(2024, 1, 11), None),
    ]);
    store.replace_all(&register).unwrap();

    assert_eq!(store.risk_count().unwrap(), 3);
    assert!(!store.contains_risk("OLD").unwrap());
    assert_eq!(store.all_risks().unwrap(), register);
}

#[test]
fn empty_store_loads_empty_register() {
    let store = make_store();
    let normalized = store.load_register().unwrap();
    assert!(normalized.records.is_empty());
    assert!(normalized.rejected.is_empty());
}

#[test]
fn blank_risk_type_takes_the_role_default() {
    let mut risk = new_risk("R4");
    risk.risk_type = "   ".into();
    let tech = risk.clone().into_record_for(Role::Technical).unwrap();
    let upper = risk.into_record_for(Role::Upper).unwrap();

    assert_eq!(tech.risk_type, "Technical");
    assert_eq!(upper.risk_type, "Quality");
}

#[test]
fn explicit_risk_type_is_kept_for_any_role() {
    let record = new_risk("R5").into_record_for(Role::Upper).unwrap();
    assert_eq!(record.risk_type, "Technical");
}

#[test]
fn file_backed_store_persists_between_opens() {
    let path = temp_db_path("persist");
    remove_db(&path);
    let path_str = path.to_str().expect("utf-8 temp path");

    {
        let store = RegisterStore::open(path_str).expect("open file store");
        store.migrate().unwrap();
        store.insert_risk(&new_risk("R1").into_record().unwrap()).unwrap();
    }
    let reopened = RegisterStore::open(path_str).expect("reopen file store");
    reopened.migrate().unwrap();
    assert!(reopened.contains_risk("R1").unwrap());
    assert_eq!(reopened.risk_count().unwrap(), 1);

    drop(reopened);
    remove_db(&path);
}

#[test]
fn open_in_missing_directory_is_an_error() {
    let path = std::env::temp_dir()
        .join(format!("burndown-missing-{}", std::process::id()))
        .join("register.db");
    let result = RegisterStore::open(path.to_str().expect("utf-8 temp path"));
    assert!(
        matches!(result, Err(BurndownError::Database(_))),
        "opening under a missing directory should fail"
    );
}
