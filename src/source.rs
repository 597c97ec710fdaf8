//! The authoritative move source consumed by the engine.
//!
//! Submission is fire-and-forget: the only acknowledged outcome of
//! [`MoveSource::submit`] is a handle, and the move takes effect locally
//! only when the source later echoes it back as a
//! [`Confirmation`](crate::Confirmation). Byte-level encoding of moves and
//! events is the transport's concern, not the engine's.

use crate::board::Line;
use derive_more::{Display, Error};
use tracing::instrument;

/// Opaque handle identifying a submitted move at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveHandle(u64);

impl MoveHandle {
    /// Creates a handle from the source's own identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The source-assigned identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Error raised when the source refuses a submission outright.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move source error: {} at {}:{}", message, file, line)]
pub struct SourceError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl SourceError {
    /// Creates a new source error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// An external authority that accepts move submissions.
///
/// Implementations wrap whatever transport actually carries the moves; the
/// engine only requires that confirmations eventually come back through
/// [`GameSession::apply_confirmation`](crate::GameSession::apply_confirmation)
/// in commit order.
pub trait MoveSource {
    /// Submits a line claim. The returned handle does not mean the move
    /// succeeded; only a later confirmation does.
    fn submit(&mut self, line: Line) -> Result<MoveHandle, SourceError>;
}

/// In-memory move source that records every submission.
///
/// Stands in for a real transport in tests and offline play; the recorded
/// lines let a test harness echo confirmations back in submission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingMoveSource {
    submitted: Vec<Line>,
}

impl RecordingMoveSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line submitted so far, in order.
    pub fn submitted(&self) -> &[Line] {
        &self.submitted
    }
}

impl MoveSource for RecordingMoveSource {
    #[instrument(skip(self), fields(line = %line))]
    fn submit(&mut self, line: Line) -> Result<MoveHandle, SourceError> {
        self.submitted.push(line);
        Ok(MoveHandle::new(self.submitted.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Orientation};

    #[test]
    fn test_recording_source_hands_out_sequential_handles() {
        let mut source = RecordingMoveSource::new();
        let a = Line::new(Orientation::Horizontal, Coord::new(0, 0));
        let b = Line::new(Orientation::Vertical, Coord::new(1, 1));

        assert_eq!(source.submit(a).unwrap(), MoveHandle::new(0));
        assert_eq!(source.submit(b).unwrap(), MoveHandle::new(1));
        assert_eq!(source.submitted(), &[a, b]);
    }
}
