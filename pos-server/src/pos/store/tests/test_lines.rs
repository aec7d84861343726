use super::*;

#[test]
fn test_open_and_add_first_line() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");

    let added = add(&store, &check.id, "Oyster", 28.0);

    assert_eq!(added.revision, 1);
    assert_eq!(added.line.name, "Oyster");
    assert_eq!(added.line.seat, "1");
    assert_eq!(added.line.qty, 1);
    assert_eq!(added.line.created_by, ACTOR);

    let check = store.get_check(&check.id).unwrap();
    assert_eq!(check.lines.len(), 1);
    assert_eq!(check.revision, 1);
    assert_eq!(check.last_fire_at, Some(added.line.created_at));
    assert_eq!(check.updated_by, ACTOR);
    assert_eq!(bill_total(&check), 28.0);
}

#[test]
fn test_negative_price_rejected_without_side_effects() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");

    let result = store.add_line(&check.id, AddLineInput::new("Oyster", "1", -5.0), ACTOR);

    assert!(matches!(result, Err(PosError::InvalidInput(_))));
    let after = store.get_check(&check.id).unwrap();
    assert!(after.lines.is_empty());
    assert_eq!(after.revision, 0);
}

#[test]
fn test_add_line_validation() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");

    let no_price = AddLineInput {
        name: "Oyster".to_string(),
        seat: "1".to_string(),
        ..Default::default()
    };
    let mut too_many = AddLineInput::new("Oyster", "1", 28.0);
    too_many.qty = Some(10_000);

    for input in [
        AddLineInput::new("", "1", 28.0),
        AddLineInput::new("Oyster", "", 28.0),
        AddLineInput::new("Oyster", "1", f64::INFINITY),
        AddLineInput::new("Oyster", "1", 1_000_000.01),
        no_price,
        too_many,
    ] {
        assert!(matches!(
            store.add_line(&check.id, input, ACTOR),
            Err(PosError::InvalidInput(_))
        ));
    }
    assert_eq!(store.get_check(&check.id).unwrap().revision, 0);
}

#[test]
fn test_add_line_unknown_check() {
    let store = create_test_store();
    assert!(matches!(
        store.add_line("missing", AddLineInput::new("Oyster", "1", 28.0), ACTOR),
        Err(PosError::CheckNotFound(_))
    ));
}

#[test]
fn test_comped_line_never_changes_bill() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    add(&store, &check.id, "Oyster", 28.0);
    let before = bill_total(&store.get_check(&check.id).unwrap());

    let mut comped = AddLineInput::new("Dry-aged Duck", "2", 62.0);
    comped.comp = Some(true);
    comped.qty = Some(2);
    store.add_line(&check.id, comped, ACTOR).unwrap();

    let check = store.get_check(&check.id).unwrap();
    assert_eq!(check.lines.len(), 2);
    assert_eq!(bill_total(&check), before);

    let totals = crate::pos::money::check_totals(&check.lines);
    assert_eq!(totals.subtotal, 152.0);
    assert_eq!(totals.comp_total, 124.0);
}

#[test]
fn test_bill_total_matches_non_comp_sum() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");

    let inputs = [(12.5, 3, false), (8.0, 1, true), (0.1, 7, false), (99.99, 2, false)];
    for (price, qty, comp) in inputs {
        let mut input = AddLineInput::new("Item", "1", price);
        input.qty = Some(qty);
        input.comp = Some(comp);
        store.add_line(&check.id, input, ACTOR).unwrap();
    }

    let check = store.get_check(&check.id).unwrap();
    // 37.5 + 0.7 + 199.98
    assert_eq!(bill_total(&check), 238.18);
}

#[test]
fn test_update_line_fields() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    let added = add(&store, &check.id, "Oyster", 28.0);

    let mut patch = LinePatch::for_line(&added.line.id);
    patch.qty = Some(3);
    patch.comp = Some(true);
    patch.seat = Some("4".to_string());
    patch.modifiers = Some(vec!["no ice".to_string(), " ".to_string()]);
    let updated = store.update_line(&check.id, patch, ACTOR).unwrap().unwrap();

    assert_eq!(updated.revision, 2);
    assert_eq!(updated.line.qty, 3);
    assert!(updated.line.comp);
    assert_eq!(updated.line.seat, "4");
    assert_eq!(updated.line.modifiers, vec!["no ice".to_string()]);
    assert_eq!(updated.line.name, "Oyster");
    assert_eq!(updated.line.created_at, added.line.created_at);

    let check = store.get_check(&check.id).unwrap();
    assert_eq!(check.lines[0], updated.line);
    assert_eq!(bill_total(&check), 0.0);
}

#[test]
fn test_update_missing_line_is_noop() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    add(&store, &check.id, "Oyster", 28.0);

    let mut patch = LinePatch::for_line("no-such-line");
    patch.comp = Some(true);
    let result = store.update_line(&check.id, patch, ACTOR).unwrap();

    assert!(result.is_none());
    let after = store.get_check(&check.id).unwrap();
    assert_eq!(after.revision, 1);
    assert!(!after.lines[0].comp);
}

#[test]
fn test_update_line_invalid_patch() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    let added = add(&store, &check.id, "Oyster", 28.0);

    let mut patch = LinePatch::for_line(&added.line.id);
    patch.price = Some(f64::NAN);
    assert!(matches!(
        store.update_line(&check.id, patch, ACTOR),
        Err(PosError::InvalidInput(_))
    ));

    assert!(matches!(
        store.update_line(&check.id, LinePatch::for_line(" "), ACTOR),
        Err(PosError::InvalidInput(_))
    ));
    assert_eq!(store.get_check(&check.id).unwrap().lines[0].price, 28.0);
}

#[test]
fn test_remove_line() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    let oyster = add(&store, &check.id, "Oyster", 28.0);
    add(&store, &check.id, "Bread & Butter", 8.0);

    let revision = store.remove_line(&check.id, &oyster.line.id, ACTOR).unwrap();
    assert_eq!(revision, Some(3));

    let check_now = store.get_check(&check.id).unwrap();
    assert_eq!(check_now.lines.len(), 1);
    assert_eq!(check_now.lines[0].name, "Bread & Butter");

    // Second removal finds nothing and leaves the revision alone
    assert_eq!(store.remove_line(&check.id, &oyster.line.id, ACTOR).unwrap(), None);
    assert_eq!(store.get_check(&check.id).unwrap().revision, 3);
}

#[test]
fn test_clear_lines() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    add(&store, &check.id, "Oyster", 28.0);
    add(&store, &check.id, "Sea Bass", 48.0);

    let revision = store.clear_lines(&check.id, ACTOR).unwrap();
    assert_eq!(revision, 3);
    assert!(store.get_check(&check.id).unwrap().lines.is_empty());

    // Clearing an empty check still counts as a mutation
    assert_eq!(store.clear_lines(&check.id, ACTOR).unwrap(), 4);

    assert!(matches!(
        store.clear_lines("missing", ACTOR),
        Err(PosError::CheckNotFound(_))
    ));
}

#[test]
fn test_revision_strictly_increases() {
    let store = create_test_store();
    let check = open_check(&store, "d-01");
    let mut last = check.revision;

    let line = add(&store, &check.id, "Oyster", 28.0);
    assert!(line.revision > last);
    last = line.revision;

    let mut patch = LinePatch::for_line(&line.line.id);
    patch.qty = Some(2);
    let updated = store.update_line(&check.id, patch, ACTOR).unwrap().unwrap();
    assert!(updated.revision > last);
    last = updated.revision;

    let served = store
        .update_check(&check.id, CheckPatch::status(ServiceStatus::Served), ACTOR)
        .unwrap();
    assert!(served.revision > last);
    last = served.revision;

    let removed = store.remove_line(&check.id, &line.line.id, ACTOR).unwrap().unwrap();
    assert!(removed > last);
    last = removed;

    let cleared = store.clear_lines(&check.id, ACTOR).unwrap();
    assert!(cleared > last);
}
