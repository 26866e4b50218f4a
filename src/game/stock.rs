use crate::draw_pile::DrawOutcome;

use super::{Game, PileId};

impl Game {
    /// Clicks the stock: draws one card to the waste, or recycles the waste
    /// into the stock once the stock is empty.
    ///
    /// Does nothing when both piles are empty.
    pub fn draw(&mut self) -> DrawOutcome {
        let outcome = self.draw_pile.draw();

        match outcome {
            DrawOutcome::Drew(card) => {
                self.locations.insert(card, PileId::Waste);
            }
            DrawOutcome::Recycled(_) => {
                for slot in self.draw_pile.stock() {
                    self.locations.insert(slot.card, PileId::Stock);
                }
            }
            DrawOutcome::Empty => {}
        }

        outcome
    }
}
