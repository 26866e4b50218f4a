//! Tableau stacks and card placements.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::geometry::{Point, Rect};
use crate::layout::LayoutOptions;

/// A card placed in a container, with its visibility and screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    /// The card.
    pub card: Card,
    /// Whether the face of the card is visible.
    pub face_up: bool,
    /// Top-left corner of the card on screen.
    pub position: Point,
}

impl Slot {
    /// Creates a new slot.
    #[must_use]
    pub const fn new(card: Card, face_up: bool, position: Point) -> Self {
        Self {
            card,
            face_up,
            position,
        }
    }
}

/// A tableau stack.
///
/// The stack only manages membership, order, and visibility. Whether a run may
/// legally land on it is decided by the drag engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    /// Cards from bottom to top.
    slots: Vec<Slot>,
    /// Screen anchor of the bottom card.
    origin: Point,
}

impl Stack {
    /// Creates a new empty stack anchored at `origin`.
    #[must_use]
    pub const fn new(origin: Point) -> Self {
        Self {
            slots: Vec::new(),
            origin,
        }
    }

    /// Returns the screen anchor of the stack.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the slots from bottom to top.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the topmost slot.
    #[must_use]
    pub fn top(&self) -> Option<&Slot> {
        self.slots.last()
    }

    /// Returns the topmost card.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.top().map(|slot| slot.card)
    }

    /// Returns the number of cards in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the depth of `card` in the stack, counted from the bottom.
    #[must_use]
    pub fn position_of(&self, card: Card) -> Option<usize> {
        self.slots.iter().position(|slot| slot.card == card)
    }

    /// Returns the slot holding `card`.
    #[must_use]
    pub fn slot(&self, card: Card) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.card == card)
    }

    pub(crate) fn slot_mut(&mut self, card: Card) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.card == card)
    }

    /// Places a card on top of the stack during the deal.
    pub fn push(&mut self, card: Card, face_up: bool, layout: &LayoutOptions) {
        let position = self.slot_position(self.slots.len(), layout);
        self.slots.push(Slot::new(card, face_up, position));
    }

    /// Returns the topmost card whose rectangle contains `point`.
    ///
    /// Cards are scanned from the top down, so a card covered by another one
    /// only wins where it is not overlapped.
    #[must_use]
    pub fn hit(&self, point: Point, layout: &LayoutOptions) -> Option<&Slot> {
        self.slots
            .iter()
            .rev()
            .find(|slot| layout.card_rect(slot.position).contains(point))
    }

    /// Returns the rectangle the next appended card would occupy.
    #[must_use]
    pub fn landing_rect(&self, layout: &LayoutOptions) -> Rect {
        layout.card_rect(self.slot_position(self.slots.len(), layout))
    }

    /// Removes `card` and every card above it.
    ///
    /// The removed slots are returned bottom to top. If cards remain, the new
    /// top card is turned face up. Returns `None` if `card` is not in the stack.
    pub fn remove_run_from(&mut self, card: Card) -> Option<Vec<Slot>> {
        let depth = self.position_of(card)?;
        let run = self.slots.split_off(depth);
        self.reveal_top();
        Some(run)
    }

    /// Appends a run on top of the stack, preserving its order.
    ///
    /// Appended cards are marked face up. Positions are left untouched until
    /// [`relayout`](Self::relayout) is called.
    pub fn append_run(&mut self, run: Vec<Slot>) {
        self.slots.extend(run.into_iter().map(|mut slot| {
            slot.face_up = true;
            slot
        }));
    }

    /// Turns the top card face up and returns it if it was face down.
    pub fn reveal_top(&mut self) -> Option<Card> {
        let top = self.slots.last_mut()?;
        if top.face_up {
            return None;
        }
        top.face_up = true;
        Some(top.card)
    }

    /// Moves every card to its resting position: `origin + depth * vertical_spacing`.
    pub fn relayout(&mut self, layout: &LayoutOptions) {
        let origin = self.origin;
        for (depth, slot) in self.slots.iter_mut().enumerate() {
            slot.position = origin + depth_offset(depth, layout);
        }
    }

    fn slot_position(&self, depth: usize, layout: &LayoutOptions) -> Point {
        self.origin + depth_offset(depth, layout)
    }
}

fn depth_offset(depth: usize, layout: &LayoutOptions) -> Point {
    #[expect(
        clippy::cast_precision_loss,
        reason = "stack depths are far below f32 precision limits"
    )]
    let offset = depth as f32 * layout.vertical_spacing;
    Point::new(0.0, offset)
}
