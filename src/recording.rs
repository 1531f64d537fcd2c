//! Recording session - the state machine behind live opener rehearsal
//!
//! A session starts `Idle`, moves to `Recording` on `start`, consumes one
//! action-use event at a time, and returns to `Idle` on stop, first-mistake
//! abort, stale recovery, or natural completion (which runs the comparator
//! exactly once). Every abnormal condition resolves to `Idle`; nothing
//! panics across the public boundary.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::actions::{ActionCatalog, GroupRegistry, Slot, TRUE_NORTH_ID};
use crate::compare::{compare, slot_name, slots_equal};
use crate::events::ActionUseEvent;
use crate::feedback::{Feedback, MessageKind};

/// Early-abort and filtering policy for one recording session
#[derive(Debug, Clone, Copy)]
pub struct RecordingPolicy {
    /// Abort with a single Error line on the first mismatching action
    pub stop_at_first_mistake: bool,
    /// Skip True North uses without consuming a slot, unless the opener
    /// itself contains True North
    pub ignore_true_north: bool,
    /// Fire the upcoming-action callback so the UI can preview the next slot
    pub preview_upcoming: bool,
}

impl Default for RecordingPolicy {
    fn default() -> Self {
        Self {
            stop_at_first_mistake: false,
            ignore_true_north: true,
            preview_upcoming: true,
        }
    }
}

/// Per-session callback context, handed in at `start` and dropped at the
/// terminal transition. Passing a fresh set per session avoids stale
/// closures when `start` is called again.
pub struct SessionCallbacks {
    /// Receives the finished feedback value at every terminal transition
    /// except a silent stop
    pub on_feedback: Box<dyn FnMut(Feedback) + Send>,
    /// Expected-sequence index of a mismatch, for slot highlighting
    pub on_wrong: Box<dyn FnMut(usize) + Send>,
    /// Index the current event is meant to satisfy, fired for every
    /// consumed event regardless of match outcome
    pub on_current_index: Box<dyn FnMut(usize) + Send>,
    /// Raw slot id of the upcoming expected action, for preview
    pub on_upcoming: Box<dyn FnMut(i32) + Send>,
}

impl SessionCallbacks {
    /// Callbacks that discard everything
    pub fn noop() -> Self {
        Self {
            on_feedback: Box::new(|_| {}),
            on_wrong: Box::new(|_| {}),
            on_current_index: Box::new(|_| {}),
            on_upcoming: Box::new(|_| {}),
        }
    }

    pub fn with_feedback(mut self, f: impl FnMut(Feedback) + Send + 'static) -> Self {
        self.on_feedback = Box::new(f);
        self
    }

    pub fn with_wrong(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_wrong = Box::new(f);
        self
    }

    pub fn with_current_index(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_current_index = Box::new(f);
        self
    }

    pub fn with_upcoming(mut self, f: impl FnMut(i32) + Send + 'static) -> Self {
        self.on_upcoming = Box::new(f);
        self
    }
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Recording,
}

/// Live rehearsal state machine. Owns the capture buffer and the per-session
/// callbacks; collaborators are injected at construction.
pub struct RecordingSession {
    catalog: Arc<dyn ActionCatalog + Send + Sync>,
    groups: Arc<GroupRegistry>,
    status: SessionStatus,
    expected: Vec<i32>,
    used: Vec<u32>,
    remaining: usize,
    local_actor: u32,
    policy: RecordingPolicy,
    callbacks: SessionCallbacks,
}

impl RecordingSession {
    pub fn new(catalog: Arc<dyn ActionCatalog + Send + Sync>, groups: Arc<GroupRegistry>) -> Self {
        Self {
            catalog,
            groups,
            status: SessionStatus::Idle,
            expected: Vec::new(),
            used: Vec::new(),
            remaining: 0,
            local_actor: 0,
            policy: RecordingPolicy::default(),
            callbacks: SessionCallbacks::noop(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_recording(&self) -> bool {
        self.status == SessionStatus::Recording
    }

    /// Number of captured actions so far
    pub fn captured_len(&self) -> usize {
        self.used.len()
    }

    /// Begin recording against an opener. Silently ignored while a session
    /// is already active.
    pub fn start(
        &mut self,
        opener_slots: &[i32],
        policy: RecordingPolicy,
        local_actor: u32,
        callbacks: SessionCallbacks,
    ) {
        if self.is_recording() {
            return;
        }

        self.expected = opener_slots.to_vec();
        self.used = Vec::with_capacity(self.expected.len());
        self.remaining = self.expected.len();
        self.local_actor = local_actor;
        self.policy = policy;
        self.callbacks = callbacks;
        self.status = SessionStatus::Recording;
        debug!("Recording started, {} expected actions", self.remaining);
    }

    /// Forced abort: discard the buffer, emit nothing
    pub fn stop(&mut self) {
        if !self.is_recording() {
            return;
        }
        self.reset();
        debug!("Recording stopped");
    }

    /// Consume one action-use event. Runs to completion, including the
    /// embedded comparator call when the capture fills.
    pub fn on_action_used(&mut self, event: ActionUseEvent) {
        if !self.is_recording() {
            return;
        }

        // External filters: only the local actor's real PvE actions count
        if event.actor_id != self.local_actor {
            return;
        }
        if !self.catalog.is_valid_action(event.action_id) {
            return;
        }

        // Policy filter: ignore True North unless the opener asks for it
        if self.policy.ignore_true_north
            && event.action_id == TRUE_NORTH_ID
            && !self.expected.contains(&(TRUE_NORTH_ID as i32))
        {
            return;
        }

        if self.remaining == 0 {
            // Stale state: the opener was already fully processed
            debug!("Stale action-use event, resetting to idle");
            self.reset();
            return;
        }

        let index = self.expected.len() - self.remaining;

        if index + 1 < self.expected.len() && self.policy.preview_upcoming {
            (self.callbacks.on_upcoming)(self.expected[index + 1]);
        }
        (self.callbacks.on_current_index)(index);

        if self.policy.stop_at_first_mistake {
            let slot = Slot::decode(self.expected[index]);
            if !slots_equal(slot, event.action_id, self.catalog.as_ref(), &self.groups) {
                (self.callbacks.on_wrong)(index);
                let mut feedback = Feedback::new();
                feedback.add(
                    MessageKind::Error,
                    format!(
                        "Difference in action {}: Substituted {} for {}",
                        index + 1,
                        slot_name(slot, self.catalog.as_ref(), &self.groups),
                        self.catalog.action_name(event.action_id)
                    ),
                );
                (self.callbacks.on_feedback)(feedback);
                self.reset();
                return;
            }
        }

        self.used.push(event.action_id);
        self.remaining -= 1;

        if self.remaining == 0 {
            self.finish();
        }
    }

    /// Natural completion: leave Recording, then run the comparator once and
    /// deliver its feedback
    fn finish(&mut self) {
        self.status = SessionStatus::Idle;
        let expected = std::mem::take(&mut self.expected);
        let used = std::mem::take(&mut self.used);
        let mut callbacks = std::mem::replace(&mut self.callbacks, SessionCallbacks::noop());

        let feedback = compare(&expected, &used, self.catalog.as_ref(), &self.groups, |i| {
            (callbacks.on_wrong)(i)
        });
        (callbacks.on_feedback)(feedback);
    }

    fn reset(&mut self) {
        self.status = SessionStatus::Idle;
        self.expected.clear();
        self.used.clear();
        self.remaining = 0;
        self.callbacks = SessionCallbacks::noop();
    }
}

/// Thread-safe wrapper serializing UI-side start/stop against hook-side
/// event delivery
pub struct Recorder {
    session: Mutex<RecordingSession>,
}

impl Recorder {
    pub fn new(catalog: Arc<dyn ActionCatalog + Send + Sync>, groups: Arc<GroupRegistry>) -> Self {
        Self {
            session: Mutex::new(RecordingSession::new(catalog, groups)),
        }
    }

    pub fn start(
        &self,
        opener_slots: &[i32],
        policy: RecordingPolicy,
        local_actor: u32,
        callbacks: SessionCallbacks,
    ) {
        if let Ok(mut session) = self.session.lock() {
            session.start(opener_slots, policy, local_actor, callbacks);
        }
    }

    pub fn stop(&self) {
        if let Ok(mut session) = self.session.lock() {
            session.stop();
        }
    }

    pub fn on_action_used(&self, event: ActionUseEvent) {
        if let Ok(mut session) = self.session.lock() {
            session.on_action_used(event);
        }
    }

    pub fn is_recording(&self) -> bool {
        self.session.lock().map(|s| s.is_recording()).unwrap_or(false)
    }
}
