//! Pointer events and cursor hints.
//!
//! The host feeds pointer events with surface-relative coordinates into the
//! display session; resolution against the hit canvas turns them into region
//! interactions. The session answers with a [`Cursor`] hint for the host to
//! apply.

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Cursor hint attached to a hit region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

// ---------------------------------------------------------------------------
// Pointer events
// ---------------------------------------------------------------------------

/// What the pointer did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
    Click,
}

/// A pointer event in surface-relative pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, kind: PointerKind) -> Self {
        Self { x, y, kind }
    }
}

/// The interaction delivered to a widget after hit resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionEvent {
    /// The region was clicked.
    Click,
    /// The pointer went down on the region.
    Press,
    /// The pointer was released after a press on the region.
    Release,
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cursor_is_default() {
        assert_eq!(Cursor::default(), Cursor::Default);
    }

    #[test]
    fn pointer_event_construction() {
        let e = PointerEvent::new(3.0, 4.0, PointerKind::Click);
        assert_eq!(e.x, 3.0);
        assert_eq!(e.kind, PointerKind::Click);
    }
}
