//! Action-use event plumbing
//!
//! The game-client hook is an external collaborator; this module provides the
//! event type it produces, a buffer that adapts the producer to serial
//! single-consumer delivery, and a compact text format for capture logs so
//! recorded streams can be replayed offline.

mod format;
mod stream;
mod types;

pub use format::{parse_capture_log, parse_line, serialize_event};
pub use stream::ActionStream;
pub use types::ActionUseEvent;
