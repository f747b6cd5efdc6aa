use std::sync::Arc;
use tokio::sync::Mutex;

use crate::mvu::table::{Deps, Msg, TableModel, run_effect, update};

pub type TableHandle = Arc<Mutex<TableModel>>;

/// Runs the MVU loop for one table view: seeds with `msg` and drains effects.
///
/// The model lock is held only while `update` runs, never across a store
/// round-trip, so a sort click can land while a page fetch is outstanding.
/// Fetch failures are folded into the model rather than returned.
pub async fn run_table(handle: &TableHandle, msg: Msg, deps: Deps<'_>) {
    let mut effects = {
        let mut model = handle.lock().await;
        update(&mut model, msg)
    };
    while let Some(effect) = effects.pop() {
        if cfg!(debug_assertions) {
            log::debug!("table effect: {effect:?}");
        }
        let msg = run_effect(effect, deps).await;
        let mut model = handle.lock().await;
        effects.extend(update(&mut model, msg));
    }
}
