use alloc::vec::Vec;

use crate::card::DECK_SIZE;
use crate::input::InputEvent;
use crate::scene::{DrawRecord, Renderer, TickStatus};
use crate::stack::Slot;

use super::Game;

impl Game {
    /// Queues an input event for the next [`tick`](Self::tick).
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Returns the number of events waiting for the next tick.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Applies a single input event immediately.
    ///
    /// Returns [`TickStatus::Quit`] for [`InputEvent::Quit`].
    pub fn handle_event(&mut self, event: InputEvent) -> TickStatus {
        match event {
            InputEvent::PointerDown(point) => {
                self.press(point);
            }
            InputEvent::PointerMove(point) => self.move_pointer(point),
            InputEvent::PointerUp(point) => {
                self.release(point);
            }
            InputEvent::FocusLost => {
                self.focus_lost();
            }
            InputEvent::Quit => return TickStatus::Quit,
        }
        TickStatus::Running
    }

    /// Runs one frame.
    ///
    /// Drains the queued events (presses and moves in arrival order, then
    /// releases and focus changes), composes the scene, and hands it to
    /// `renderer`.
    ///
    /// A press that arrives while a run is still held is retried once the
    /// frame's releases have resolved, so releasing one run and pressing again
    /// within a single frame behaves like two frames.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> TickStatus {
        let mut events: Vec<InputEvent> = self.events.drain(..).collect();
        events.sort_by_key(InputEvent::phase);

        let mut status = TickStatus::Running;
        let mut deferred = Vec::new();
        for event in events {
            if matches!(event, InputEvent::PointerDown(_)) && self.session.is_some() {
                deferred.push(event);
                continue;
            }
            if self.handle_event(event) == TickStatus::Quit {
                status = TickStatus::Quit;
            }
        }
        for event in deferred {
            self.handle_event(event);
        }

        let scene = self.compose();
        renderer.render(&scene);
        status
    }

    /// Composes the draw list for the current state.
    ///
    /// Static cards come first: stock, waste, then the tableau stacks left to
    /// right, each bottom to top. The held run comes last so it paints over
    /// everything else.
    #[must_use]
    pub fn compose(&self) -> Vec<DrawRecord> {
        let size = self.layout.card_size();
        let held = self.session.as_ref();
        let record = |slot: &Slot, dragging: bool| DrawRecord {
            card: slot.card,
            position: slot.position,
            size,
            face_up: slot.face_up,
            dragging,
        };

        let slots = self
            .draw_pile
            .stock()
            .chain(self.draw_pile.waste())
            .chain(self.stacks.iter().flat_map(|stack| stack.slots()));

        let mut scene = Vec::with_capacity(DECK_SIZE);
        let mut dragged = Vec::new();
        for slot in slots {
            if held.is_some_and(|session| session.contains(slot.card)) {
                dragged.push(record(slot, true));
            } else {
                scene.push(record(slot, false));
            }
        }
        scene.extend(dragged);
        scene
    }
}
