use alloc::vec::Vec;

use log::debug;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE};
use crate::draw_pile::DrawPile;
use crate::error::DealError;
use crate::layout::LayoutOptions;
use crate::stack::Stack;

use super::{Game, HashMap, PileId};

impl Game {
    /// Creates a new game with a deck shuffled from the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use solrs::{Game, LayoutOptions};
    ///
    /// let game = Game::new(LayoutOptions::default(), 42).unwrap();
    /// assert_eq!(game.stacks().len(), 7);
    /// assert_eq!(game.draw_pile().stock_len(), 24);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid.
    pub fn new(layout: LayoutOptions, seed: u64) -> Result<Self, DealError> {
        layout.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::shuffled_deck(&mut rng);

        let mut game = Self::empty(layout, rng);
        game.deal_cards(cards);
        Ok(game)
    }

    /// Creates a new game dealing `cards` in the given order, without shuffling.
    ///
    /// Stack `i` receives the next `i + 1` cards, the last of them face up;
    /// the rest form the stock, first card drawn first.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid or `cards` is not exactly the
    /// 52 distinct cards of a deck.
    pub fn with_deck(layout: LayoutOptions, cards: Vec<Card>) -> Result<Self, DealError> {
        layout.validate()?;
        Self::check_deck(&cards)?;

        let mut game = Self::empty(layout, ChaCha8Rng::seed_from_u64(0));
        game.deal_cards(cards);
        Ok(game)
    }

    /// Shuffles a fresh deck and deals it again, dropping any drag in progress
    /// and any events still queued for the old table.
    pub fn redeal(&mut self) {
        let cards = Self::shuffled_deck(&mut self.rng);
        self.deal_cards(cards);
    }

    fn empty(layout: LayoutOptions, rng: ChaCha8Rng) -> Self {
        let draw_pile = DrawPile::new(layout.stock_origin(), layout.waste_origin());
        Self {
            layout,
            stacks: Vec::new(),
            draw_pile,
            locations: HashMap::with_capacity(DECK_SIZE),
            session: None,
            events: alloc::collections::VecDeque::new(),
            rng,
        }
    }

    /// Creates and shuffles a standard deck.
    fn shuffled_deck(rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Card::full_deck();
        cards.shuffle(rng);
        cards
    }

    fn check_deck(cards: &[Card]) -> Result<(), DealError> {
        if cards.len() != DECK_SIZE {
            return Err(DealError::WrongCardCount(cards.len()));
        }

        let mut sorted = cards.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DealError::DuplicateCard(pair[0]));
        }

        Ok(())
    }

    /// Lays out `cards` in the triangular deal. `cards` must be a checked deck.
    fn deal_cards(&mut self, cards: Vec<Card>) {
        self.session = None;
        self.events.clear();
        self.locations.clear();
        self.draw_pile = DrawPile::new(self.layout.stock_origin(), self.layout.waste_origin());
        self.stacks = (0..self.layout.num_stacks)
            .map(|index| Stack::new(self.layout.tableau_origin(index)))
            .collect();

        let mut cards = cards.into_iter();
        for (stack, index) in self.stacks.iter_mut().zip(0u8..) {
            for (card, depth) in cards.by_ref().take(usize::from(index) + 1).zip(0u8..) {
                stack.push(card, depth == index, &self.layout);
                self.locations.insert(card, PileId::Tableau(index));
            }
        }

        for card in cards {
            self.draw_pile.push_stock(card);
            self.locations.insert(card, PileId::Stock);
        }

        debug!(
            "dealt {} stacks, {} cards left in the stock",
            self.stacks.len(),
            self.draw_pile.stock_len()
        );
    }
}
