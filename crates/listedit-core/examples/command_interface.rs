//! Command interface example
//!
//! Demonstrates driving the list kernel the way a frontend does: intents are
//! minted by insertion points and item handles, and every intent flows through
//! `ListStateManager::execute`.

use listedit_core::{
    Command, CommandResult, EditCommand, ListDefinition, ListStateManager, QueryCommand,
    ValueBlockDef,
};
use serde_json::json;
use std::sync::Arc;

fn main() {
    println!("=== List Editor Command Interface Example ===\n");

    let definition = ListDefinition::new(
        "checklist",
        Arc::new(ValueBlockDef::new("task").with_default_state(json!({"title": "", "done": false}))),
    );
    let mut manager = ListStateManager::empty(definition);

    // The user clicks the "+" affordance of the only insertion point.
    println!("1. Insert via the insertion point's minted command:");
    let request = manager.editor().insertion_points()[0].insert_request();
    let result = manager.execute(request).unwrap();
    println!("   result: {result:?}");
    print_list(&manager);

    // Seed a few tasks directly.
    println!("\n2. Insert explicit states:");
    manager
        .execute_batch(vec![
            Command::Edit(EditCommand::Insert {
                index: 1,
                state: json!({"title": "write docs", "done": false}),
            }),
            Command::Edit(EditCommand::Insert {
                index: 2,
                state: json!({"title": "ship release", "done": false}),
            }),
        ])
        .unwrap();
    print_list(&manager);

    // The user clicks "duplicate" on row 1.
    println!("\n3. Duplicate row 1 via its minted command:");
    let request = manager.editor().item(1).unwrap().duplicate_request();
    manager.execute(request).unwrap();
    print_list(&manager);

    // The user clicks "move down" on row 0; row 3 has no "move down".
    println!("\n4. Move affordances gate the minted intents:");
    let down = manager.editor().item(0).unwrap().move_down_request();
    println!("   row 0 move down -> {:?}", down.is_some());
    let last = manager.editor().len() - 1;
    let blocked = manager.editor().item(last).unwrap().move_down_request();
    println!("   row {last} move down -> {:?}", blocked.is_some());
    if let Some(command) = down {
        manager.execute(command).unwrap();
    }
    print_list(&manager);

    // The user deletes row 2.
    println!("\n5. Delete row 2:");
    let request = manager.editor().item(2).unwrap().delete_request();
    let result = manager.execute(request).unwrap();
    if let CommandResult::Removed { id } = result {
        println!("   removed {id}");
    }
    print_list(&manager);

    // Round-trip the whole list.
    println!("\n6. Serialize and reload:");
    let CommandResult::States(saved) = manager
        .execute(Command::Query(QueryCommand::GetState))
        .unwrap()
    else {
        unreachable!()
    };
    println!("   saved {} states", saved.len());
    manager
        .execute(Command::Edit(EditCommand::SetState { values: saved }))
        .unwrap();
    println!("   reloaded (fresh identities):");
    print_list(&manager);

    println!("\n   final version: {}", manager.version());
    println!("\n=== Example Complete ===");
}

fn print_list(manager: &ListStateManager) {
    for item in manager.editor().items() {
        println!(
            "   [{}] {} up={} down={} focus={} state={}",
            item.index(),
            item.id(),
            item.can_move_up(),
            item.can_move_down(),
            item.is_focused(),
            item.state()
        );
    }
    println!(
        "   ({} items, {} insertion points)",
        manager.editor().len(),
        manager.editor().insertion_points().len()
    );
}
