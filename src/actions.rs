use tracing::{debug, info};

use crate::pipeline::DeletedIds;
use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Detail,
    Edit,
    Delete,
}

/// The dialogs behind the row actions.
pub trait ActionHandler {
    fn show_detail(&mut self, row: &Product);
    fn edit(&mut self, row: &Product);
    /// Returns true when the user agreed to delete `row`.
    fn confirm_delete(&mut self, row: &Product) -> bool;
}

/// Run `action` for `row`. A confirmed delete marks the row in `deleted`;
/// a rejected one leaves everything as it was.
pub fn dispatch(
    action: RowAction,
    row: &Product,
    handler: &mut impl ActionHandler,
    deleted: &mut DeletedIds,
) {
    debug!("Dispatch {:?} for row {}", action, row.id);
    match action {
        RowAction::Detail => handler.show_detail(row),
        RowAction::Edit => handler.edit(row),
        RowAction::Delete => {
            if handler.confirm_delete(row) {
                if deleted.mark(row.id_key()) {
                    info!("Deleted row {}", row.id);
                }
            } else {
                debug!("Delete of row {} not confirmed", row.id);
            }
        }
    }
}
