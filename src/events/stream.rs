//! Action stream - buffers hook events for serial single-consumer delivery
//!
//! The hook side pushes events as they arrive; the consumer drains them in
//! order, one at a time, so the recording session never sees two events for
//! the same capture concurrently.

use super::types::ActionUseEvent;

/// Buffer between the external action-use producer and the recorder
#[derive(Debug, Default)]
pub struct ActionStream {
    pending: Vec<ActionUseEvent>,
    elapsed_ms: u32,
    enabled: bool,
}

impl ActionStream {
    /// Create a new enabled stream
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled stream (events are dropped)
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Update the elapsed time used to stamp incoming events
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Record an action use at the current elapsed time
    pub fn record(&mut self, actor_id: u32, action_id: u32) {
        if !self.enabled {
            return;
        }
        self.pending
            .push(ActionUseEvent::new(actor_id, action_id, self.elapsed_ms));
    }

    /// Push an already-stamped event
    pub fn push(&mut self, event: ActionUseEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(event);
    }

    /// Drain all pending events in arrival order
    pub fn drain(&mut self) -> Vec<ActionUseEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Deliver pending events to `handler` one at a time, in arrival order.
    /// Each call runs to completion before the next event is delivered.
    pub fn deliver(&mut self, mut handler: impl FnMut(ActionUseEvent)) {
        for event in self.drain() {
            handler(event);
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_drain() {
        let mut stream = ActionStream::new();
        stream.update_time(1.5);
        stream.record(7, 2259);

        assert_eq!(stream.pending_count(), 1);
        let events = stream.drain();
        assert_eq!(events, vec![ActionUseEvent::new(7, 2259, 1500)]);
        assert!(!stream.has_pending());
    }

    #[test]
    fn test_disabled_stream_drops_events() {
        let mut stream = ActionStream::disabled();
        stream.record(7, 2259);
        stream.push(ActionUseEvent::new(7, 2261, 10));
        assert_eq!(stream.pending_count(), 0);
    }

    #[test]
    fn test_deliver_preserves_order() {
        let mut stream = ActionStream::new();
        stream.push(ActionUseEvent::new(7, 1, 0));
        stream.push(ActionUseEvent::new(7, 2, 100));
        stream.push(ActionUseEvent::new(7, 3, 200));

        let mut seen = Vec::new();
        stream.deliver(|e| seen.push(e.action_id));
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(!stream.has_pending());
    }
}
