//! Opener Trainer - rehearse and verify opening action sequences
//!
//! Records the actions a player actually performs, compares them against a
//! prescribed opener, and reports the first real deviation while tolerating
//! timing noise: extra or renamed actions, upgraded action tiers, and
//! interchangeable group actions.

pub mod actions;
pub mod compare;
pub mod config;
pub mod events;
pub mod feedback;
pub mod history;
pub mod openers;
pub mod recording;

// Re-export commonly used types for convenience
pub use actions::{
    ActionCatalog, ActionGroup, ActionInfo, ActionTable, ActionType, CATCH_ALL_ID, CATCH_ALL_NAME,
    GroupRegistry, Job, OLD_ACTION_NAME, Slot, TRUE_NORTH_ID,
};
pub use compare::{PERFECT_MESSAGE, compare, slot_name, slots_equal};
pub use config::{CONFIG_FILE, TrainerConfig};
pub use events::{ActionStream, ActionUseEvent, parse_capture_log, parse_line, serialize_event};
pub use feedback::{Feedback, FeedbackMessage, MessageKind};
pub use history::{AttemptHistory, AttemptOutcome, AttemptRecord};
pub use openers::{Opener, OpenerStore, StoreError};
pub use recording::{
    Recorder, RecordingPolicy, RecordingSession, SessionCallbacks, SessionStatus,
};
