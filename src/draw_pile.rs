//! Stock and waste piles.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::debug;

use crate::card::Card;
use crate::geometry::Point;
use crate::stack::Slot;

/// Result of clicking the stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A card moved from the stock to the top of the waste.
    Drew(Card),
    /// The stock was empty and this many waste cards were returned to it.
    Recycled(usize),
    /// Both piles are empty; nothing happened.
    Empty,
}

/// The stock (face-down reserve) and the waste (face-up discard).
///
/// Waste cards return to the stock in the order they were drawn, so every
/// pass through the stock deals the same sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPile {
    /// Face-down cards; the front is drawn next.
    stock: VecDeque<Slot>,
    /// Face-up cards, bottom to top.
    waste: Vec<Slot>,
    stock_origin: Point,
    waste_origin: Point,
}

impl DrawPile {
    /// Creates empty piles anchored at the given positions.
    #[must_use]
    pub const fn new(stock_origin: Point, waste_origin: Point) -> Self {
        Self {
            stock: VecDeque::new(),
            waste: Vec::new(),
            stock_origin,
            waste_origin,
        }
    }

    /// Puts a face-down card at the back of the stock.
    pub fn push_stock(&mut self, card: Card) {
        self.stock
            .push_back(Slot::new(card, false, self.stock_origin));
    }

    /// Draws from the stock, or recycles the waste when the stock is empty.
    pub fn draw(&mut self) -> DrawOutcome {
        if let Some(mut slot) = self.stock.pop_front() {
            slot.face_up = true;
            slot.position = self.waste_origin;
            self.waste.push(slot);
            debug!("drew {} to the waste", slot.card);
            return DrawOutcome::Drew(slot.card);
        }

        if self.waste.is_empty() {
            return DrawOutcome::Empty;
        }

        let count = self.waste.len();
        let origin = self.stock_origin;
        self.stock.extend(self.waste.drain(..).map(|mut slot| {
            slot.face_up = false;
            slot.position = origin;
            slot
        }));
        debug!("recycled {count} waste cards into the stock");
        DrawOutcome::Recycled(count)
    }

    /// Moves every card back onto its pile's anchor.
    pub fn relayout(&mut self) {
        let (stock_origin, waste_origin) = (self.stock_origin, self.waste_origin);
        for slot in &mut self.stock {
            slot.position = stock_origin;
        }
        for slot in &mut self.waste {
            slot.position = waste_origin;
        }
    }

    /// Returns the stock cards, next to draw first.
    pub fn stock(&self) -> impl ExactSizeIterator<Item = &Slot> + DoubleEndedIterator {
        self.stock.iter()
    }

    /// Returns the waste cards, bottom to top.
    #[must_use]
    pub fn waste(&self) -> &[Slot] {
        &self.waste
    }

    /// Returns the top waste slot, the only interactive one.
    #[must_use]
    pub fn waste_top(&self) -> Option<&Slot> {
        self.waste.last()
    }

    pub(crate) fn waste_top_mut(&mut self) -> Option<&mut Slot> {
        self.waste.last_mut()
    }

    /// Removes the top waste card if it is `card`.
    pub fn take_waste_top(&mut self, card: Card) -> Option<Slot> {
        if self.waste.last().is_some_and(|slot| slot.card == card) {
            self.waste.pop()
        } else {
            None
        }
    }

    /// Returns the number of cards in the stock.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// Returns the number of cards in the waste.
    #[must_use]
    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    /// Returns the number of cards in both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stock.len() + self.waste.len()
    }

    /// Returns whether both piles are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty() && self.waste.is_empty()
    }

    /// Returns the stock anchor.
    #[must_use]
    pub const fn stock_origin(&self) -> Point {
        self.stock_origin
    }

    /// Returns the waste anchor.
    #[must_use]
    pub const fn waste_origin(&self) -> Point {
        self.waste_origin
    }
}
