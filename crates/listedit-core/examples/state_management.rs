//! State management example
//!
//! Demonstrates how to use `ListStateManager` to query list state, subscribe
//! to change notifications, and route validation errors.

use listedit_core::{
    Command, EditCommand, FocusCommand, ListDefinition, ListStateManager, ListValidationError,
    ValidateCommand, ValueBlockDef,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn main() {
    println!("=== List Editor State Management Example ===\n");

    let definition = ListDefinition::new(
        "emails",
        Arc::new(ValueBlockDef::new("email").with_default_state(json!(""))),
    );
    let mut manager = ListStateManager::new(
        definition,
        &[json!("a@example.com"), json!("b@example.com"), json!("b@example.com")],
        None,
    )
    .unwrap();

    println!("1. Initial list state:");
    print_list_state(&manager);

    // Change notifications.
    println!("\n2. Subscribing to state changes:");
    let change_count = Arc::new(Mutex::new(0));
    let change_count_clone = change_count.clone();
    manager.subscribe(move |change| {
        let mut count = change_count_clone.lock().unwrap();
        *count += 1;
        println!(
            "   change #{}: {:?} (version {} -> {}, affected {:?}, animate {})",
            count, change.change_type, change.old_version, change.new_version,
            change.affected, change.animate
        );
    });

    println!("\n3. Structural edits:");
    manager
        .execute(Command::Edit(EditCommand::InsertDefault { index: 3 }))
        .unwrap();
    manager
        .execute(Command::Edit(EditCommand::Move { from: 3, to: 0 }))
        .unwrap();
    manager
        .execute(Command::Edit(EditCommand::Delete { index: 0 }))
        .unwrap();
    print_list_state(&manager);

    println!("\n4. No-ops do not bump the version:");
    let before = manager.version();
    manager
        .execute(Command::Edit(EditCommand::Move { from: 1, to: 1 }))
        .unwrap();
    manager
        .execute(Command::Edit(EditCommand::MoveUp { index: 0 }))
        .unwrap();
    println!("   version still {} (was {})", manager.version(), before);

    println!("\n5. Validation error routing:");
    let error = ListValidationError::new([(2, json!("duplicate address"))]);
    manager
        .execute(Command::Validate(ValidateCommand::SetErrors {
            errors: vec![error],
        }))
        .unwrap();
    println!(
        "   items with errors: {}",
        manager.get_validation_state().error_count
    );
    for state in manager.get_item_states() {
        println!(
            "   [{}] {} has_error={}",
            state.index, state.id, state.has_error
        );
    }

    println!("\n6. Host-driven focus (focus the first error):");
    manager
        .execute(Command::Focus(FocusCommand::FocusItem { index: 2 }))
        .unwrap();
    println!("   focused index: {:?}", manager.get_list_state().focused_index);

    println!("\n7. Renderer snapshot:");
    let snapshot = manager.get_snapshot();
    println!(
        "   {} rows, {} insertion points, version {}",
        snapshot.row_count(),
        snapshot.insertion_points.len(),
        snapshot.version
    );
    println!("   as JSON: {}", serde_json::to_string(&snapshot).unwrap());

    println!("\n8. Dirty tracking:");
    println!("   modified: {}", manager.is_modified());
    manager.mark_clean();
    println!("   after mark_clean: {}", manager.is_modified());

    println!("\n   total changes observed: {}", *change_count.lock().unwrap());
    println!("\n=== Example Complete ===");
}

fn print_list_state(manager: &ListStateManager) {
    let state = manager.get_list_state();
    println!(
        "   len={} version={} modified={} focused={:?}",
        state.len, state.version, state.is_modified, state.focused_index
    );
    for item in manager.editor().items() {
        println!("   [{}] {} {}", item.index(), item.id(), item.state());
    }
}
