//! Input events delivered by the windowing host.

use crate::geometry::Point;

/// A discrete input event.
///
/// Hosts translate their device events into these and queue them with
/// [`Game::push_event`](crate::Game::push_event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer button was pressed.
    PointerDown(Point),
    /// A pointer button was released.
    PointerUp(Point),
    /// The pointer moved.
    PointerMove(Point),
    /// The window lost input focus.
    FocusLost,
    /// The user asked to close the game.
    Quit,
}

impl InputEvent {
    /// Returns the dispatch phase of the event within a frame.
    ///
    /// Presses and moves keep their arrival order, so motion made before a
    /// press never drags the run picked up by it. Releases and focus changes
    /// run after them, and [`Quit`](Self::Quit) is handled last.
    #[must_use]
    pub const fn phase(&self) -> u8 {
        match self {
            Self::PointerDown(_) | Self::PointerMove(_) => 0,
            Self::PointerUp(_) | Self::FocusLost => 1,
            Self::Quit => 2,
        }
    }
}
