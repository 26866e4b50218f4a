//! Drag session types.

use alloc::vec::Vec;

use crate::card::Card;
use crate::geometry::Point;

use super::PileId;

/// Phase of the pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No card is held.
    Idle,
    /// A run was picked up but has not moved yet.
    Pressed,
    /// The run follows the pointer.
    Dragging,
}

/// A run of cards held by the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The card under the pointer at press time.
    pub lead: Card,
    /// The lead card and every card above it, bottom to top.
    pub run: Vec<Card>,
    /// Container the run was picked up from.
    pub origin: PileId,
    /// Position of each run member at press time.
    pub origin_positions: Vec<Point>,
    /// Pointer position at press time.
    pub pointer_anchor: Point,
    /// Most recent pointer position.
    pub last_pointer: Point,
    /// Current phase; never [`DragPhase::Idle`] while the session exists.
    pub phase: DragPhase,
}

impl DragSession {
    /// Returns whether `card` is part of the held run.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.run.contains(&card)
    }

    /// Returns the total pointer travel since the press.
    #[must_use]
    pub fn displacement(&self) -> Point {
        self.last_pointer - self.pointer_anchor
    }
}
