//! Game engine and table state.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{Card, DECK_SIZE};
use crate::draw_pile::DrawPile;
use crate::error::InvariantError;
use crate::input::InputEvent;
use crate::layout::LayoutOptions;
use crate::stack::{Slot, Stack};

mod dealer;
mod drag;
mod frame;
pub mod state;
mod stock;

pub use drag::Hit;
pub use state::{DragPhase, DragSession};

/// Identifies the container a card lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileId {
    /// The face-down stock.
    Stock,
    /// The face-up waste.
    Waste,
    /// A tableau stack, by index.
    Tableau(u8),
}

/// A Klondike table: the tableau stacks, stock, waste, and the drag in progress.
///
/// The game is the single owner of every card. Each card is indexed by the
/// [`PileId`] of its container, so lookups never walk back-references.
/// All mutation goes through `&mut self` on the game thread.
pub struct Game {
    /// Layout the positions are derived from.
    layout: LayoutOptions,
    /// Tableau stacks, left to right.
    stacks: Vec<Stack>,
    /// Stock and waste.
    draw_pile: DrawPile,
    /// Container of every card.
    locations: HashMap<Card, PileId>,
    /// The drag in progress, if any.
    session: Option<DragSession>,
    /// Events queued for the next tick.
    events: VecDeque<InputEvent>,
    /// Random number generator used for shuffling.
    rng: ChaCha8Rng,
}

impl Game {
    /// Returns the layout.
    #[must_use]
    pub const fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the tableau stacks, left to right.
    #[must_use]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Returns the tableau stack at `index`.
    #[must_use]
    pub fn stack(&self, index: u8) -> Option<&Stack> {
        self.stacks.get(usize::from(index))
    }

    /// Returns the stock and waste.
    #[must_use]
    pub const fn draw_pile(&self) -> &DrawPile {
        &self.draw_pile
    }

    /// Returns the container holding `card`.
    #[must_use]
    pub fn locate(&self, card: Card) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Returns the slot holding `card`.
    #[must_use]
    pub fn slot(&self, card: Card) -> Option<&Slot> {
        match self.locate(card)? {
            PileId::Stock => self.draw_pile.stock().find(|slot| slot.card == card),
            PileId::Waste => self.draw_pile.waste().iter().find(|slot| slot.card == card),
            PileId::Tableau(index) => self.stack(index)?.slot(card),
        }
    }

    /// Returns the number of cards on the tableau, stock, and waste combined.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.draw_pile.len() + self.stacks.iter().map(Stack::len).sum::<usize>()
    }

    /// Returns whether every card is face up on the tableau and the stock and
    /// waste are empty.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.draw_pile.is_empty()
            && self
                .stacks
                .iter()
                .all(|stack| stack.slots().iter().all(|slot| slot.face_up))
    }

    /// Verifies the board invariants.
    ///
    /// Checks that the containers hold each of the 52 cards exactly once,
    /// that the location index agrees with them, and that no tableau stack
    /// has a face-down card above a face-up one.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let count = self.card_count();
        if count != DECK_SIZE {
            return Err(InvariantError::CardCount(count));
        }

        let mut seen: HashMap<Card, PileId> = HashMap::with_capacity(DECK_SIZE);
        let stock = self.draw_pile.stock().map(|slot| (slot.card, PileId::Stock));
        let waste = self
            .draw_pile
            .waste()
            .iter()
            .map(|slot| (slot.card, PileId::Waste));
        let tableau = self.stacks.iter().zip(0u8..).flat_map(|(stack, index)| {
            stack
                .slots()
                .iter()
                .map(move |slot| (slot.card, PileId::Tableau(index)))
        });

        for (card, pile) in stock.chain(waste).chain(tableau) {
            if seen.insert(card, pile).is_some() {
                return Err(InvariantError::DuplicateCard(card));
            }
            if self.locate(card) != Some(pile) {
                return Err(InvariantError::LocationMismatch(card));
            }
        }

        if let Some(card) = Card::full_deck()
            .into_iter()
            .find(|card| !seen.contains_key(card))
        {
            return Err(InvariantError::MissingCard(card));
        }

        for (stack, index) in self.stacks.iter().zip(0u8..) {
            let face_down_above = stack
                .slots()
                .iter()
                .skip_while(|slot| !slot.face_up)
                .any(|slot| !slot.face_up);
            if face_down_above {
                return Err(InvariantError::FaceDownRun(index));
            }
        }

        Ok(())
    }

    pub(crate) fn slot_mut(&mut self, card: Card) -> Option<&mut Slot> {
        match self.locations.get(&card).copied()? {
            PileId::Stock => None,
            PileId::Waste => self
                .draw_pile
                .waste_top_mut()
                .filter(|slot| slot.card == card),
            PileId::Tableau(index) => self.stacks.get_mut(usize::from(index))?.slot_mut(card),
        }
    }
}
