//! Action identity: slot encoding, catalog lookup, and interchange groups

mod catalog;
mod groups;
mod types;

pub use catalog::{ActionCatalog, ActionInfo, ActionTable, CATCH_ALL_NAME, OLD_ACTION_NAME};
pub use groups::{ActionGroup, GroupRegistry};
pub use types::{ActionType, CATCH_ALL_ID, Job, Slot, TRUE_NORTH_ID};
