use listedit_core::{
    Command, CommandError, CommandResult, EditCommand, FocusCommand, ListChangeType,
    ListDefinition, ListStateManager, QueryCommand, ValueBlockDef,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn manager(states: &[serde_json::Value]) -> ListStateManager {
    let definition = ListDefinition::new(
        "entries",
        Arc::new(ValueBlockDef::new("entry").with_default_state(json!(""))),
    );
    ListStateManager::new(definition, states, None).unwrap()
}

#[test]
fn test_construction_does_not_bump_version() {
    let mgr = manager(&[json!("a"), json!("b")]);
    assert_eq!(mgr.version(), 0);
    assert!(!mgr.is_modified());
    assert_eq!(mgr.get_list_state().len, 2);
}

#[test]
fn test_each_edit_bumps_version_once() {
    let mut mgr = manager(&[json!("a"), json!("b")]);

    mgr.execute(Command::Edit(EditCommand::Insert {
        index: 0,
        state: json!("x"),
    }))
    .unwrap();
    assert_eq!(mgr.version(), 1);

    mgr.execute(Command::Edit(EditCommand::Move { from: 0, to: 2 }))
        .unwrap();
    assert_eq!(mgr.version(), 2);

    mgr.execute(Command::Edit(EditCommand::Delete { index: 2 }))
        .unwrap();
    assert_eq!(mgr.version(), 3);
}

#[test]
fn test_queries_never_bump_version() {
    let mut mgr = manager(&[json!("a")]);

    let result = mgr.execute(Command::Query(QueryCommand::GetState)).unwrap();
    assert_eq!(result, CommandResult::States(vec![json!("a")]));

    let result = mgr.execute(Command::Query(QueryCommand::GetValue)).unwrap();
    assert_eq!(result, CommandResult::Values(vec![json!("a")]));

    let snapshot = match mgr
        .execute(Command::Query(QueryCommand::GetSnapshot))
        .unwrap()
    {
        CommandResult::Snapshot(snapshot) => snapshot,
        other => panic!("unexpected result: {other:?}"),
    };
    assert_eq!(snapshot.row_count(), 1);
    assert_eq!(snapshot.version, 0);
    assert_eq!(mgr.version(), 0);
}

#[test]
fn test_noop_commands_report_ignored_without_bump() {
    let mut mgr = manager(&[json!("a"), json!("b")]);

    // Equal-index move.
    let result = mgr
        .execute(Command::Edit(EditCommand::Move { from: 1, to: 1 }))
        .unwrap();
    assert_eq!(result, CommandResult::Ignored);

    // Moves against a disabled affordance.
    let result = mgr
        .execute(Command::Edit(EditCommand::MoveUp { index: 0 }))
        .unwrap();
    assert_eq!(result, CommandResult::Ignored);
    let result = mgr
        .execute(Command::Edit(EditCommand::MoveDown { index: 1 }))
        .unwrap();
    assert_eq!(result, CommandResult::Ignored);

    assert_eq!(mgr.version(), 0);
    assert!(!mgr.is_modified());
}

#[test]
fn test_move_up_down_commands() {
    let mut mgr = manager(&[json!("a"), json!("b"), json!("c")]);

    mgr.execute(Command::Edit(EditCommand::MoveDown { index: 0 }))
        .unwrap();
    assert_eq!(
        mgr.editor().get_state(),
        vec![json!("b"), json!("a"), json!("c")]
    );

    mgr.execute(Command::Edit(EditCommand::MoveUp { index: 2 }))
        .unwrap();
    assert_eq!(
        mgr.editor().get_state(),
        vec![json!("b"), json!("c"), json!("a")]
    );
}

#[test]
fn test_insert_default_focuses_new_item() {
    let mut mgr = manager(&[]);

    let result = mgr
        .execute(Command::Edit(EditCommand::InsertDefault { index: 0 }))
        .unwrap();

    let CommandResult::Inserted { index, id } = result else {
        panic!("expected Inserted");
    };
    assert_eq!(index, 0);
    assert_eq!(mgr.editor().item(0).unwrap().id(), id);
    assert!(mgr.editor().item(0).unwrap().is_focused());
    assert_eq!(mgr.editor().get_state(), vec![json!("")]);
}

#[test]
fn test_empty_list_insert_scenario() {
    let mut mgr = manager(&[]);
    mgr.execute(Command::Edit(EditCommand::SetState { values: vec![] }))
        .unwrap();
    assert_eq!(mgr.editor().insertion_points().len(), 1);

    let request = mgr.editor().insertion_points()[0].insert_request();
    mgr.execute(request).unwrap();

    assert_eq!(mgr.editor().len(), 1);
    assert_eq!(mgr.editor().get_state(), vec![json!("")]);
    let item = mgr.editor().item(0).unwrap();
    assert!(!item.can_move_up());
    assert!(!item.can_move_down());
}

#[test]
fn test_change_records_carry_metadata() {
    let mut mgr = manager(&[json!("a"), json!("b")]);
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();

    mgr.subscribe(move |change| {
        changes_clone.lock().unwrap().push(change.clone());
    });

    mgr.execute(Command::Edit(EditCommand::Insert {
        index: 1,
        state: json!("x"),
    }))
    .unwrap();
    mgr.execute(Command::Edit(EditCommand::Delete { index: 1 }))
        .unwrap();
    mgr.execute(Command::Edit(EditCommand::Move { from: 0, to: 1 }))
        .unwrap();
    mgr.execute(Command::Focus(FocusCommand::FocusFirst))
        .unwrap();

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 4);

    assert_eq!(changes[0].change_type, ListChangeType::Inserted);
    assert_eq!(changes[0].affected, Some(1..3));
    assert!(changes[0].item.is_some());
    assert!(changes[0].animate);
    assert_eq!((changes[0].old_version, changes[0].new_version), (0, 1));

    assert_eq!(changes[1].change_type, ListChangeType::Removed);
    assert!(changes[1].animate);

    assert_eq!(changes[2].change_type, ListChangeType::Moved);
    assert_eq!(changes[2].affected, Some(0..2));
    assert!(!changes[2].animate);

    assert_eq!(changes[3].change_type, ListChangeType::FocusChanged);
    assert_eq!((changes[3].old_version, changes[3].new_version), (3, 4));
}

#[test]
fn test_refocusing_same_item_is_ignored() {
    let mut mgr = manager(&[json!("a"), json!("b")]);

    mgr.execute(Command::Focus(FocusCommand::FocusItem { index: 1 }))
        .unwrap();
    assert_eq!(mgr.version(), 1);

    let result = mgr
        .execute(Command::Focus(FocusCommand::FocusItem { index: 1 }))
        .unwrap();
    assert_eq!(result, CommandResult::Ignored);
    assert_eq!(mgr.version(), 1);

    // Focusing an empty list is a no-op, not an error.
    let mut empty = manager(&[]);
    let result = empty
        .execute(Command::Focus(FocusCommand::FocusFirst))
        .unwrap();
    assert_eq!(result, CommandResult::Ignored);
}

#[test]
fn test_batch_stops_at_first_error() {
    let mut mgr = manager(&[json!("a")]);

    let err = mgr
        .execute_batch(vec![
            Command::Edit(EditCommand::InsertDefault { index: 1 }),
            Command::Edit(EditCommand::Delete { index: 5 }),
            Command::Edit(EditCommand::InsertDefault { index: 0 }),
        ])
        .unwrap_err();

    assert_eq!(err, CommandError::InvalidItemIndex { index: 5, len: 2 });
    // The first command applied; the third never ran.
    assert_eq!(mgr.editor().len(), 2);
}

#[test]
fn test_batch_results_in_order() {
    let mut mgr = manager(&[]);

    let results = mgr
        .execute_batch(vec![
            Command::Edit(EditCommand::InsertDefault { index: 0 }),
            Command::Edit(EditCommand::Duplicate { index: 0 }),
            Command::Query(QueryCommand::GetState),
        ])
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(matches!(results[0], CommandResult::Inserted { index: 0, .. }));
    assert!(matches!(results[1], CommandResult::Inserted { index: 1, .. }));
    assert_eq!(
        results[2],
        CommandResult::States(vec![json!(""), json!("")])
    );
}

#[test]
fn test_item_states_mirror_handles() {
    let mut mgr = manager(&[json!("a"), json!("b"), json!("c")]);
    mgr.execute(Command::Focus(FocusCommand::FocusItem { index: 1 }))
        .unwrap();

    let states = mgr.get_item_states();
    assert_eq!(states.len(), 3);
    for (i, state) in states.iter().enumerate() {
        assert_eq!(state.index, i);
        assert_eq!(state.can_move_up, i > 0);
        assert_eq!(state.can_move_down, i < 2);
        assert_eq!(state.focused, i == 1);
        assert!(!state.has_error);
    }

    assert_eq!(mgr.get_item_state(3), None);
    assert_eq!(mgr.get_list_state().focused_index, Some(1));
}

#[test]
fn test_snapshot_version_tracks_manager() {
    let mut mgr = manager(&[json!("a")]);
    mgr.execute(Command::Edit(EditCommand::Duplicate { index: 0 }))
        .unwrap();

    let snapshot = mgr.get_snapshot();
    assert_eq!(snapshot.version, mgr.version());
    assert_eq!(snapshot.row_count(), 2);
    assert!(snapshot.rows[1].focused);
}

#[test]
fn test_set_state_reload_change() {
    let mut mgr = manager(&[json!("a")]);
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();
    mgr.subscribe(move |change| changes_clone.lock().unwrap().push(change.clone()));

    mgr.execute(Command::Edit(EditCommand::SetState {
        values: vec![json!("x"), json!("y")],
    }))
    .unwrap();

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, ListChangeType::Reloaded);
    assert_eq!(changes[0].affected, Some(0..2));
    assert!(mgr.is_modified());
}
