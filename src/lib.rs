//! A Klondike solitaire engine for pointer-driven games, with optional
//! `no_std` support.
//!
//! The crate provides a [`Game`] type that owns the tableau stacks, the stock,
//! and the waste, and turns pointer events into card moves: hit-testing, the
//! drag lifecycle, move legality, and the stock recycling cycle. Each frame it
//! composes an ordered list of [`DrawRecord`]s for the host's [`Renderer`].
//! Windowing, rasterizing, and asset loading are left to the host.
//!
//! # Example
//!
//! ```
//! use solrs::{DrawRecord, Game, InputEvent, LayoutOptions, Point, TickStatus};
//!
//! let mut game = Game::new(LayoutOptions::default(), 42).unwrap();
//! let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);
//!
//! game.push_event(InputEvent::PointerDown(stock));
//! game.push_event(InputEvent::PointerUp(stock));
//!
//! let mut scene: Vec<DrawRecord> = Vec::new();
//! assert_eq!(game.tick(&mut scene), TickStatus::Running);
//! assert_eq!(game.draw_pile().waste_len(), 1);
//! assert_eq!(scene.len(), 52);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod draw_pile;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod scene;
pub mod stack;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, Rank, Suit};
pub use draw_pile::{DrawOutcome, DrawPile};
pub use error::{DealError, InvariantError, LayoutError};
pub use game::{DragPhase, DragSession, Game, Hit, PileId};
pub use geometry::{Point, Rect, Size};
pub use input::InputEvent;
pub use layout::LayoutOptions;
pub use scene::{DrawRecord, DropOutcome, MoveRecord, Renderer, RollbackReason, TickStatus};
pub use stack::{Slot, Stack};
