//! Per-frame output types: the draw list and drag resolutions.

extern crate alloc;

use crate::card::{Card, Rank, Suit};
use crate::game::PileId;
use crate::geometry::{Point, Size};

/// One card to paint, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawRecord {
    /// The card to paint.
    pub card: Card,
    /// Top-left corner.
    pub position: Point,
    /// Card size.
    pub size: Size,
    /// Whether the face is shown; otherwise the back pattern is drawn.
    pub face_up: bool,
    /// Whether the card belongs to the run being dragged.
    pub dragging: bool,
}

impl DrawRecord {
    /// Returns the suit of the card.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.card.suit
    }

    /// Returns the rank of the card.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.card.rank
    }
}

/// Paints a composed frame.
///
/// Implemented by the host; the engine calls it once per
/// [`Game::tick`](crate::Game::tick).
pub trait Renderer {
    /// Paints the records in order, so later records cover earlier ones.
    fn render(&mut self, scene: &[DrawRecord]);
}

impl Renderer for alloc::vec::Vec<DrawRecord> {
    fn render(&mut self, scene: &[DrawRecord]) {
        self.clear();
        self.extend_from_slice(scene);
    }
}

/// A committed run move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The lead card of the run.
    pub lead: Card,
    /// Number of cards moved.
    pub count: usize,
    /// Where the run came from.
    pub from: PileId,
    /// The tableau stack it landed on.
    pub to: u8,
    /// The card turned face up on the source stack, if any.
    pub revealed: Option<Card>,
}

/// Why a drag was rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackReason {
    /// The run was released without being moved.
    NotMoved,
    /// The run was dropped back on its own stack.
    SameStack,
    /// Only a King may lead a run onto an empty stack.
    NotKing,
    /// The lead card is not one rank below the target's top card.
    RankMismatch,
    /// The lead card has the same color as the target's top card.
    SameColor,
    /// The run was released too far above or below the target.
    OutOfReach,
    /// The window lost focus mid-drag.
    FocusLost,
    /// The lead card left its origin while the drag was active.
    Stale,
}

/// Resolution of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The run moved to a tableau stack.
    Committed(MoveRecord),
    /// Every run member went back to where it was picked up.
    RolledBack(RollbackReason),
}

impl DropOutcome {
    /// Returns whether the run moved.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// State reported after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Keep running.
    Running,
    /// A [`Quit`](crate::InputEvent::Quit) event was received.
    Quit,
}
