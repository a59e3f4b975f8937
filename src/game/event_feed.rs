use crate::models::RawGameEvent;

/// Monotonic cursor into the upstream event log, scoped to one game session.
///
/// The Live Client Data event log is append-only with stable indices for the
/// lifetime of a game, so remembering how many events were already emitted is
/// enough to surface each one exactly once. Truncation or reordering by the
/// client would silently under- or over-report; no recovery is attempted.
#[derive(Debug, Default)]
pub struct EventCursor {
    emitted: usize,
}

impl EventCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the events not yet emitted and advance the cursor past them
    pub fn drain<'a>(&mut self, log: &'a [RawGameEvent]) -> &'a [RawGameEvent] {
        let start = self.emitted.min(log.len());
        self.emitted = log.len();
        &log[start..]
    }

    /// Rewind to the start of a new session's log
    pub fn reset(&mut self) {
        self.emitted = 0;
    }
}
