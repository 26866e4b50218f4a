//! Error types for game setup and integrity checks.
//!
//! Rejected moves are not errors; see [`DropOutcome`](crate::DropOutcome).

use thiserror::Error;

use crate::card::Card;

/// Errors that can occur when validating a [`LayoutOptions`](crate::LayoutOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Card width or height is zero, negative, or not finite.
    #[error("card dimensions must be positive")]
    InvalidCardSize,
    /// A spacing or padding value is negative or not finite.
    #[error("spacing and padding must not be negative")]
    NegativeSpacing,
    /// No tableau stacks are configured.
    #[error("at least one tableau stack is required")]
    NoStacks,
    /// The triangular deal for this many stacks needs more than one deck.
    #[error("{0} stacks need more cards than a single deck holds")]
    TooManyStacks(u8),
    /// The drop tolerance is zero, negative, or not finite.
    #[error("drop tolerance must be positive")]
    InvalidDropTolerance,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// The supplied deck does not hold exactly 52 cards.
    #[error("expected 52 cards, found {0}")]
    WrongCardCount(usize),
    /// A card appears more than once in the supplied deck.
    #[error("duplicate card in deck: {0}")]
    DuplicateCard(Card),
    /// The layout cannot be dealt.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Broken board invariants reported by [`Game::check_invariants`](crate::Game::check_invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// The containers hold a total other than 52 cards.
    #[error("containers hold {0} cards instead of 52")]
    CardCount(usize),
    /// A card lies in more than one container slot.
    #[error("card appears more than once: {0}")]
    DuplicateCard(Card),
    /// A card of the deck is in no container.
    #[error("card is missing from the table: {0}")]
    MissingCard(Card),
    /// A stack holds a face-up card below a face-down one.
    #[error("face-down card above a face-up card in stack {0}")]
    FaceDownRun(u8),
    /// The location index disagrees with the container holding a card.
    #[error("location index is out of date for {0}")]
    LocationMismatch(Card),
}
