//! Event type produced by the action-use hook

use serde::{Deserialize, Serialize};

/// One "action used" notification from the game client.
///
/// The producer has already filtered raw network frames down to completed
/// action uses; the recorder still filters by actor and catalog validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUseEvent {
    /// Entity id of the actor that used the action
    pub actor_id: u32,
    /// Catalog id of the action
    pub action_id: u32,
    /// Milliseconds since the capture started
    pub time_ms: u32,
}

impl ActionUseEvent {
    pub fn new(actor_id: u32, action_id: u32, time_ms: u32) -> Self {
        Self {
            actor_id,
            action_id,
            time_ms,
        }
    }
}
