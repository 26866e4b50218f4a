use alloc::vec::Vec;

use log::{debug, trace, warn};

use crate::card::{Card, Rank};
use crate::geometry::{self, Point, Rect};
use crate::scene::{DropOutcome, MoveRecord, RollbackReason};
use crate::stack::Slot;

use super::{DragPhase, DragSession, Game, PileId};

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The stock anchor, whether or not cards remain in it.
    Stock,
    /// The top card of the waste.
    Waste(Card),
    /// A tableau card.
    Tableau {
        /// Index of the stack.
        index: u8,
        /// The topmost card under the pointer.
        card: Card,
        /// Whether that card is face up.
        face_up: bool,
    },
}

impl Game {
    /// Returns the current drag phase.
    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, |session| session.phase)
    }

    /// Returns the drag in progress.
    #[must_use]
    pub const fn drag_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Finds what lies under `point`.
    ///
    /// Within a stack the scan runs from the top card down, so covered cards
    /// never steal the hit from the cards lying over them.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        for (stack, index) in self.stacks.iter().zip(0u8..) {
            if let Some(slot) = stack.hit(point, &self.layout) {
                trace!("hit {} in stack {index}", slot.card);
                return Some(Hit::Tableau {
                    index,
                    card: slot.card,
                    face_up: slot.face_up,
                });
            }
        }

        if let Some(slot) = self
            .draw_pile
            .waste_top()
            .filter(|slot| self.layout.card_rect(slot.position).contains(point))
        {
            return Some(Hit::Waste(slot.card));
        }

        self.layout
            .card_rect(self.draw_pile.stock_origin())
            .contains(point)
            .then_some(Hit::Stock)
    }

    /// Handles a pointer press at `point`.
    ///
    /// Pressing a face-up tableau card picks up that card and every card above
    /// it; pressing the waste picks up its top card; pressing the stock draws.
    /// Presses are ignored while a run is held.
    ///
    /// Returns `true` if the press had an effect.
    pub fn press(&mut self, point: Point) -> bool {
        if self.session.is_some() {
            trace!("press ignored, a run is already held");
            return false;
        }

        match self.hit_test(point) {
            Some(Hit::Stock) => {
                self.draw();
                true
            }
            Some(Hit::Waste(card)) => self.begin_drag(card, PileId::Waste, point),
            Some(Hit::Tableau {
                index,
                card,
                face_up: true,
            }) => self.begin_drag(card, PileId::Tableau(index), point),
            Some(Hit::Tableau { face_up: false, .. }) | None => false,
        }
    }

    /// Handles pointer motion, translating the held run by the distance
    /// travelled since the previous pointer event.
    pub fn move_pointer(&mut self, point: Point) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        let delta = point - session.last_pointer;
        session.last_pointer = point;
        if delta != Point::ZERO {
            session.phase = DragPhase::Dragging;
            for &card in &session.run {
                if let Some(slot) = self.slot_mut(card) {
                    slot.position += delta;
                }
            }
        }

        self.session = Some(session);
    }

    /// Handles a pointer release at `point`.
    ///
    /// The held run moves onto the tableau stack nearest to its center if the
    /// move is legal; otherwise every card returns to where it was picked up.
    /// Returns `None` if no run was held.
    pub fn release(&mut self, point: Point) -> Option<DropOutcome> {
        self.move_pointer(point);
        let session = self.session.take()?;

        let outcome = match self.evaluate_drop(&session) {
            Ok(target) => self
                .commit(&session, target)
                .map_or(
                    DropOutcome::RolledBack(RollbackReason::Stale),
                    DropOutcome::Committed,
                ),
            Err(reason) => DropOutcome::RolledBack(reason),
        };

        if let DropOutcome::RolledBack(reason) = outcome {
            self.roll_back(&session, reason);
        }

        Some(outcome)
    }

    /// Handles loss of input focus: a held run is rolled back.
    pub fn focus_lost(&mut self) -> Option<DropOutcome> {
        let session = self.session.take()?;
        self.roll_back(&session, RollbackReason::FocusLost);
        Some(DropOutcome::RolledBack(RollbackReason::FocusLost))
    }

    fn begin_drag(&mut self, lead: Card, origin: PileId, point: Point) -> bool {
        let slots: Vec<Slot> = match origin {
            PileId::Tableau(index) => {
                let Some(stack) = self.stack(index) else {
                    return false;
                };
                let Some(depth) = stack.position_of(lead) else {
                    return false;
                };
                stack.slots()[depth..].to_vec()
            }
            PileId::Waste => self.draw_pile.waste_top().copied().into_iter().collect(),
            PileId::Stock => return false,
        };

        if slots.is_empty() || slots.iter().any(|slot| !slot.face_up) {
            return false;
        }

        debug!(
            "picked up {} card(s) led by {lead} from {origin:?}",
            slots.len()
        );
        self.session = Some(DragSession {
            lead,
            run: slots.iter().map(|slot| slot.card).collect(),
            origin,
            origin_positions: slots.iter().map(|slot| slot.position).collect(),
            pointer_anchor: point,
            last_pointer: point,
            phase: DragPhase::Pressed,
        });
        true
    }

    /// Returns whether the held run still sits, in order, on top of its origin.
    fn run_in_place(&self, session: &DragSession) -> bool {
        match session.origin {
            PileId::Tableau(index) => self
                .stack(index)
                .and_then(|stack| {
                    let depth = stack.position_of(session.lead)?;
                    Some(
                        stack.slots()[depth..]
                            .iter()
                            .map(|slot| slot.card)
                            .eq(session.run.iter().copied()),
                    )
                })
                .unwrap_or(false),
            PileId::Waste => {
                session.run.len() == 1
                    && self
                        .draw_pile
                        .waste_top()
                        .is_some_and(|slot| slot.card == session.lead)
            }
            PileId::Stock => false,
        }
    }

    fn run_bounds(&self, session: &DragSession) -> Option<Rect> {
        session
            .run
            .iter()
            .filter_map(|&card| self.slot(card))
            .map(|slot| self.layout.card_rect(slot.position))
            .reduce(|bounds, rect| bounds.union(&rect))
    }

    /// Picks the target stack for the held run and checks the move rules.
    fn evaluate_drop(&self, session: &DragSession) -> Result<u8, RollbackReason> {
        if !self.run_in_place(session) {
            return Err(RollbackReason::Stale);
        }

        let lead_position = self
            .slot(session.lead)
            .map(|slot| slot.position)
            .ok_or(RollbackReason::Stale)?;
        if session.phase == DragPhase::Pressed
            || session.origin_positions.first() == Some(&lead_position)
        {
            return Err(RollbackReason::NotMoved);
        }

        let bounds = self.run_bounds(session).ok_or(RollbackReason::Stale)?;
        let target = self.layout.nearest_column(bounds.center().x);
        if session.origin == PileId::Tableau(target) {
            return Err(RollbackReason::SameStack);
        }

        let stack = self.stack(target).ok_or(RollbackReason::Stale)?;
        match stack.top() {
            None if session.lead.rank != Rank::King => return Err(RollbackReason::NotKing),
            None => {}
            Some(top) if !session.lead.stacks_on(&top.card) => {
                return Err(if session.lead.rank.is_one_below(top.card.rank) {
                    RollbackReason::SameColor
                } else {
                    RollbackReason::RankMismatch
                });
            }
            Some(_) => {}
        }

        // The lead card must land within reach of the slot it would take.
        let landing = stack.landing_rect(&self.layout).center();
        let lead_center = self.layout.card_rect(lead_position).center();
        let reach = self.layout.drop_tolerance * self.layout.card_height;
        if geometry::abs(lead_center.y - landing.y) >= reach {
            return Err(RollbackReason::OutOfReach);
        }

        Ok(target)
    }

    /// Detaches the held run from its origin and attaches it to `target`.
    ///
    /// Returns `None`, leaving the board untouched, if the run cannot be
    /// detached.
    fn commit(&mut self, session: &DragSession, target: u8) -> Option<MoveRecord> {
        if usize::from(target) >= self.stacks.len() {
            return None;
        }

        let (run, revealed) = match session.origin {
            PileId::Tableau(index) => {
                let stack = self.stacks.get_mut(usize::from(index))?;
                let depth = stack.position_of(session.lead)?;
                let covered = depth
                    .checked_sub(1)
                    .and_then(|below| stack.slots().get(below))
                    .filter(|slot| !slot.face_up)
                    .map(|slot| slot.card);
                (stack.remove_run_from(session.lead)?, covered)
            }
            PileId::Waste => (
                alloc::vec![self.draw_pile.take_waste_top(session.lead)?],
                None,
            ),
            PileId::Stock => return None,
        };

        let count = run.len();
        for slot in &run {
            self.locations.insert(slot.card, PileId::Tableau(target));
        }

        let stack = &mut self.stacks[usize::from(target)];
        stack.append_run(run);
        stack.relayout(&self.layout);

        debug!(
            "moved {count} card(s) led by {} from {:?} to stack {target}",
            session.lead, session.origin
        );
        if let Some(card) = revealed {
            debug!("revealed {card}");
        }

        Some(MoveRecord {
            lead: session.lead,
            count,
            from: session.origin,
            to: target,
            revealed,
        })
    }

    /// Returns every run member to its press-time position.
    ///
    /// If the run no longer sits on its origin, every card is settled onto its
    /// current container's resting position instead.
    fn roll_back(&mut self, session: &DragSession, reason: RollbackReason) {
        if !self.run_in_place(session) {
            warn!(
                "{} left {:?} during the drag, settling all cards",
                session.lead, session.origin
            );
            self.settle_all();
            return;
        }

        for (&card, &position) in session.run.iter().zip(&session.origin_positions) {
            if let Some(slot) = self.slot_mut(card) {
                slot.position = position;
            }
        }
        debug!("rolled back {} ({reason:?})", session.lead);
    }

    fn settle_all(&mut self) {
        for stack in &mut self.stacks {
            stack.relayout(&self.layout);
        }
        self.draw_pile.relayout();
    }
}
