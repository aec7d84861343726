use super::*;

fn check_at_revision_one(store: &PosStore) -> Check {
    let check = open_check(store, "d-01");
    add(store, &check.id, "Oyster", 28.0);
    store.get_check(&check.id).unwrap()
}

#[test]
fn test_stale_client_loses_status_race() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);
    assert_eq!(check.revision, 1);

    // Expo marks served
    let served = store
        .update_check(
            &check.id,
            CheckPatch::status(ServiceStatus::Served).expecting(1),
            "expo",
        )
        .unwrap();
    assert_eq!(served.status, ServiceStatus::Served);
    assert_eq!(served.revision, 2);
    assert_eq!(served.updated_by, "expo");

    // Server phone still holds revision 1
    let result = store.update_check(
        &check.id,
        CheckPatch::status(ServiceStatus::Paying).expecting(1),
        "server-phone",
    );
    match result {
        Err(PosError::RevisionMismatch { expected, actual }) => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("expected RevisionMismatch, got {other:?}"),
    }

    let after = store.get_check(&check.id).unwrap();
    assert_eq!(after.status, ServiceStatus::Served);
    assert_eq!(after.revision, 2);
}

#[test]
fn test_mismatch_leaves_check_untouched() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);

    for stale in [0, 2, 99] {
        let patch = CheckPatch {
            status: Some(ServiceStatus::Paying),
            expected_revision: Some(stale),
            note: Some("table wants the bill".to_string()),
            party_size: Some(6),
            guest_names: Some(vec!["Ada".to_string()]),
        };
        assert!(matches!(
            store.update_check(&check.id, patch, ACTOR),
            Err(PosError::RevisionMismatch { .. })
        ));
    }

    assert_eq!(store.get_check(&check.id).unwrap(), check);
    let session = store.active_session_for_table("d-01").unwrap().unwrap();
    assert_eq!(session.status, ServiceStatus::Ordering);
    assert!(session.guest_names.is_empty());
}

#[test]
fn test_update_without_revision_is_last_writer_wins() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);

    store
        .update_check(&check.id, CheckPatch::status(ServiceStatus::Served), ACTOR)
        .unwrap();
    let paying = store
        .update_check(&check.id, CheckPatch::status(ServiceStatus::Paying), ACTOR)
        .unwrap();

    assert_eq!(paying.status, ServiceStatus::Paying);
    assert_eq!(paying.revision, 3);
}

#[test]
fn test_status_mirrors_to_session() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);

    let patch = CheckPatch {
        status: Some(ServiceStatus::Served),
        party_size: Some(3),
        guest_names: Some(vec!["Ada".to_string(), " ".to_string(), "Grace".to_string()]),
        note: Some("  anniversary ".to_string()),
        ..Default::default()
    };
    let updated = store.update_check(&check.id, patch, ACTOR).unwrap();
    assert_eq!(updated.note.as_deref(), Some("anniversary"));

    let session = store.active_session_for_table("d-01").unwrap().unwrap();
    assert_eq!(session.status, ServiceStatus::Served);
    assert_eq!(session.party_size, 3);
    assert_eq!(session.guest_names, vec!["Ada".to_string(), "Grace".to_string()]);
}

#[test]
fn test_update_check_rejects_zero_party() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);

    let patch = CheckPatch {
        party_size: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        store.update_check(&check.id, patch, ACTOR),
        Err(PosError::InvalidInput(_))
    ));
    assert_eq!(store.get_check(&check.id).unwrap().revision, 1);
}

#[test]
fn test_closed_check_rejects_mutations() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);
    let line_id = check.lines[0].id.clone();

    let closed = store
        .update_check(&check.id, CheckPatch::status(ServiceStatus::Closed), ACTOR)
        .unwrap();
    assert!(closed.is_closed());

    // Still readable after close
    assert_eq!(store.get_check(&check.id).unwrap().revision, closed.revision);

    let closed_err = |r: PosResult<()>| matches!(r, Err(PosError::CheckClosed(_)));
    assert!(closed_err(
        store
            .add_line(&check.id, AddLineInput::new("Tart", "1", 14.0), ACTOR)
            .map(|_| ())
    ));
    assert!(closed_err(
        store
            .update_line(&check.id, LinePatch::for_line(&line_id), ACTOR)
            .map(|_| ())
    ));
    assert!(closed_err(store.remove_line(&check.id, &line_id, ACTOR).map(|_| ())));
    assert!(closed_err(store.clear_lines(&check.id, ACTOR).map(|_| ())));
    assert!(closed_err(
        store
            .update_check(&check.id, CheckPatch::status(ServiceStatus::Paying), ACTOR)
            .map(|_| ())
    ));

    assert_eq!(store.get_check(&check.id).unwrap().revision, closed.revision);
}

#[test]
fn test_closed_check_is_evicted_but_readable() {
    let store = create_test_store();
    let check = check_at_revision_one(&store);

    let closed = store
        .update_check(&check.id, CheckPatch::status(ServiceStatus::Closed), ACTOR)
        .unwrap();
    assert!(!store.checks.contains_key(&check.id));

    let read = store.get_check(&check.id).unwrap();
    assert!(read.is_closed());
    assert_eq!(read.revision, closed.revision);
    assert_eq!(read.lines.len(), 1);

    // A busy table turning over all day leaves nothing behind
    for _ in 0..20 {
        let next = open_check(&store, "d-01");
        store
            .update_check(&next.id, CheckPatch::status(ServiceStatus::Closed), ACTOR)
            .unwrap();
    }
    assert!(store.checks.is_empty());
    assert!(store.registry.read().is_empty());
}

#[test]
fn test_update_unknown_check() {
    let store = create_test_store();
    assert!(matches!(
        store.update_check("missing", CheckPatch::default(), ACTOR),
        Err(PosError::CheckNotFound(_))
    ));
    assert!(matches!(
        store.get_check("missing"),
        Err(PosError::CheckNotFound(_))
    ));
}

#[test]
fn test_bootstrap_lists_active_sessions_only() {
    let store = create_test_store();
    let kept = open_check(&store, "d-01");
    let closed = open_check(&store, "d-02");
    store
        .update_check(&closed.id, CheckPatch::status(ServiceStatus::Closed), ACTOR)
        .unwrap();

    let boot = store.bootstrap();
    assert_eq!(boot.tables.len(), store.tables().len());
    assert_eq!(boot.menu.len(), store.menu().len());
    assert_eq!(boot.sessions.len(), 1);
    assert_eq!(boot.checks.len(), 1);
    assert_eq!(boot.checks[0].id, kept.id);
}

#[test]
fn test_table_blocks_follow_store_state() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    let mut oyster = AddLineInput::new("Oyster", "1", 28.0);
    oyster.course = Some("first".to_string());
    store.add_line(&check.id, oyster, ACTOR).unwrap();

    let blocks = store.table_blocks(now_millis());
    assert_eq!(blocks.len(), store.tables().len());

    let d01 = blocks.iter().find(|b| b.table_id == "d-01").unwrap();
    assert_eq!(d01.status, ServiceStatus::Ordering);
    assert_eq!(d01.check_id.as_deref(), Some(check.id.as_str()));
    assert_eq!(d01.revision, Some(1));
    assert_eq!(d01.course.as_deref(), Some("first"));
    assert_eq!(d01.bill_total, 28.0);
    assert_eq!(d01.minutes_seated, Some(0));

    let d02 = blocks.iter().find(|b| b.table_id == "d-02").unwrap();
    assert_eq!(d02.status, ServiceStatus::Open);
    assert!(d02.check_id.is_none());
}
