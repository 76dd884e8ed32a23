//! Quick walkthrough of the workspace session
//!
//! Run with: cargo run --example workspace_session

use drawspace_core::config::StorageBackendKind;
use drawspace_core::{autosave_hook, DrawingSnapshot, WorkspaceManager};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> drawspace_core::Result<()> {
    drawspace_core::init_tracing();
    println!("=== Workspace Session Demo ===\n");

    let mut config = drawspace_core::load_config(&std::env::current_dir()?)?;
    config.storage.backend = StorageBackendKind::Filesystem;
    config.storage.data_dir = Some(std::env::temp_dir().join("drawspace-demo"));
    config.autosave.interval_secs = 1;

    let manager = Arc::new(WorkspaceManager::from_config(&config)?);

    let weak = Arc::downgrade(&manager);
    manager.set_autosave_hook(Some(autosave_hook(move |id| {
        let weak = weak.clone();
        async move {
            let Some(manager) = weak.upgrade() else {
                return;
            };
            let snapshot = DrawingSnapshot::new(
                vec![json!({"id": "autosaved", "type": "rectangle"})],
                Default::default(),
                Default::default(),
            );
            match manager.save_current_workspace(snapshot).await {
                Ok(()) => println!("  autosaved {}", id),
                Err(e) => eprintln!("  autosave failed: {}", e),
            }
        }
    })));

    // List existing workspaces
    println!("Existing workspaces:");
    let workspaces = manager.get_all_workspaces().await;
    if workspaces.is_empty() {
        println!("  (none)\n");
    } else {
        for ws in &workspaces {
            println!("  - {} ({})", ws.name, ws.id);
        }
        println!();
    }

    let ws = manager.create_workspace("Trip Plan").await?;
    println!("Created: {} [{}]", ws.name, ws.id);

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    manager.update_workspace_name(&ws.id, "Trip Plan (final)").await?;
    if let Some(current) = manager.current_workspace().await {
        println!(
            "Current: {} with {} element(s)",
            current.name,
            current.elements.len()
        );
    }

    manager.delete_workspace(&ws.id).await;
    println!("Deleted; current = {:?}", manager.current_workspace_id());

    manager.cleanup();
    println!("\n=== Done ===");
    Ok(())
}
