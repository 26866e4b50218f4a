//! Drag-and-drop and frame tests.

use solrs::{
    Card, DragPhase, DrawOutcome, DrawRecord, DropOutcome, Game, Hit, InputEvent, LayoutOptions,
    MoveRecord, PileId, Point, Rank, Renderer, RollbackReason, Stack, Suit, TickStatus,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Deck dealing `prefix` first, then the rest of the deck in suit order.
///
/// Stack 0 gets `prefix[0]`, stack 1 gets `prefix[1..3]` (the last face up),
/// stack 2 gets `prefix[3..6]`, stack 3 gets `prefix[6..10]`; the stock
/// starts at index 28.
fn deck_with(prefix: &[Card]) -> Vec<Card> {
    let mut deck = prefix.to_vec();
    deck.extend(
        Card::full_deck()
            .into_iter()
            .filter(|card| !prefix.contains(card)),
    );
    deck
}

fn game_with(prefix: &[Card]) -> Game {
    Game::with_deck(LayoutOptions::default(), deck_with(prefix)).unwrap()
}

/// A point on the visible strip of `card`.
fn grab_point(game: &Game, card: Card) -> Point {
    game.slot(card).unwrap().position + Point::new(55.0, 10.0)
}

/// Drags `card` so that it lands exactly on the next free slot of `to`,
/// shifted by `offset`.
fn drag_with_offset(game: &mut Game, card: Card, to: u8, offset: Point) -> Option<DropOutcome> {
    let from = grab_point(game, card);
    let start = game.slot(card).unwrap().position;
    let landing = game.stack(to).unwrap().landing_rect(game.layout()).origin;
    let target = from + (landing - start) + offset;

    assert!(game.press(from));
    game.move_pointer(target);
    game.release(target)
}

fn drag(game: &mut Game, card: Card, to: u8) -> Option<DropOutcome> {
    drag_with_offset(game, card, to, Point::ZERO)
}

fn cards_of(stack: &Stack) -> Vec<Card> {
    stack.slots().iter().map(|slot| slot.card).collect()
}

const BLACK_EIGHT: Card = card(Suit::Spades, Rank::Eight);
const HIDDEN_KING: Card = card(Suit::Clubs, Rank::King);
const RED_SEVEN: Card = card(Suit::Hearts, Rank::Seven);

#[test]
fn red_seven_onto_black_eight_commits_and_reveals() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);

    let outcome = drag(&mut game, RED_SEVEN, 0);
    assert_eq!(
        outcome,
        Some(DropOutcome::Committed(MoveRecord {
            lead: RED_SEVEN,
            count: 1,
            from: PileId::Tableau(1),
            to: 0,
            revealed: Some(HIDDEN_KING),
        }))
    );

    let target = game.stack(0).unwrap();
    assert_eq!(cards_of(target), vec![BLACK_EIGHT, RED_SEVEN]);
    assert_eq!(
        target.slots()[1].position,
        game.layout().tableau_origin(0) + Point::new(0.0, 40.0)
    );

    let source = game.stack(1).unwrap();
    assert_eq!(source.top_card(), Some(HIDDEN_KING));
    assert!(source.top().unwrap().face_up);

    assert_eq!(game.locate(RED_SEVEN), Some(PileId::Tableau(0)));
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn whole_run_moves_in_order() {
    let red_nine = card(Suit::Diamonds, Rank::Nine);
    let mut game = game_with(&[
        BLACK_EIGHT,
        HIDDEN_KING,
        RED_SEVEN,
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        red_nine,
    ]);

    assert!(drag(&mut game, RED_SEVEN, 0).unwrap().is_committed());

    let outcome = drag(&mut game, BLACK_EIGHT, 2).unwrap();
    let DropOutcome::Committed(record) = outcome else {
        panic!("expected a commit, got {outcome:?}");
    };
    assert_eq!(record.count, 2);
    assert_eq!(record.revealed, None);

    assert!(game.stack(0).unwrap().is_empty());
    let target = game.stack(2).unwrap();
    assert_eq!(&cards_of(target)[2..], &[red_nine, BLACK_EIGHT, RED_SEVEN]);
    let origin = game.layout().tableau_origin(2);
    assert_eq!(target.slots()[3].position, origin + Point::new(0.0, 120.0));
    assert_eq!(target.slots()[4].position, origin + Point::new(0.0, 160.0));
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn same_color_is_rolled_back_exactly() {
    let mut game = game_with(&[card(Suit::Diamonds, Rank::Eight), HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();

    assert_eq!(
        drag(&mut game, RED_SEVEN, 0),
        Some(DropOutcome::RolledBack(RollbackReason::SameColor))
    );
    assert_eq!(game.stacks(), before.as_slice());
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn non_adjacent_rank_is_rolled_back_exactly() {
    let mut game = game_with(&[card(Suit::Clubs, Rank::Nine), HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();

    assert_eq!(
        drag(&mut game, RED_SEVEN, 0),
        Some(DropOutcome::RolledBack(RollbackReason::RankMismatch))
    );
    assert_eq!(game.stacks(), before.as_slice());
}

#[test]
fn only_kings_fill_empty_stacks() {
    let red_king = card(Suit::Diamonds, Rank::King);
    let hidden = card(Suit::Clubs, Rank::Four);
    let mut game = game_with(&[
        BLACK_EIGHT,
        HIDDEN_KING,
        RED_SEVEN,
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Clubs, Rank::Five),
        card(Suit::Clubs, Rank::Six),
        hidden,
        red_king,
    ]);

    assert!(drag(&mut game, BLACK_EIGHT, 2).unwrap().is_committed());
    assert!(game.stack(0).unwrap().is_empty());

    let before: Vec<Stack> = game.stacks().to_vec();
    assert_eq!(
        drag(&mut game, RED_SEVEN, 0),
        Some(DropOutcome::RolledBack(RollbackReason::NotKing))
    );
    assert_eq!(game.stacks(), before.as_slice());

    let outcome = drag(&mut game, red_king, 0).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Committed(MoveRecord {
            lead: red_king,
            count: 1,
            from: PileId::Tableau(3),
            to: 0,
            revealed: Some(hidden),
        })
    );
    assert_eq!(
        game.stack(0).unwrap().slots()[0].position,
        game.layout().tableau_origin(0)
    );
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn far_vertical_drop_is_rejected() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();

    assert_eq!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(0.0, 400.0)),
        Some(DropOutcome::RolledBack(RollbackReason::OutOfReach))
    );
    assert_eq!(game.stacks(), before.as_slice());

    // Within one card height the drop is accepted.
    assert!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(20.0, 100.0))
            .unwrap()
            .is_committed()
    );
}

#[test]
fn drop_exactly_one_card_height_away_is_rejected() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();

    assert_eq!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(0.0, 160.0)),
        Some(DropOutcome::RolledBack(RollbackReason::OutOfReach))
    );
    assert_eq!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(0.0, -160.0)),
        Some(DropOutcome::RolledBack(RollbackReason::OutOfReach))
    );
    assert_eq!(game.stacks(), before.as_slice());

    assert!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(0.0, 159.0))
            .unwrap()
            .is_committed()
    );
}

#[test]
fn rank_mismatch_is_reported_before_color() {
    let mut game = game_with(&[card(Suit::Diamonds, Rank::Nine), HIDDEN_KING, RED_SEVEN]);

    assert_eq!(
        drag(&mut game, RED_SEVEN, 0),
        Some(DropOutcome::RolledBack(RollbackReason::RankMismatch))
    );
}

#[test]
fn dropping_on_own_stack_rolls_back() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();
    let from = grab_point(&game, RED_SEVEN);

    assert!(game.press(from));
    game.move_pointer(from + Point::new(15.0, 30.0));
    assert_eq!(game.drag_phase(), DragPhase::Dragging);
    assert_eq!(
        game.release(from + Point::new(15.0, 30.0)),
        Some(DropOutcome::RolledBack(RollbackReason::SameStack))
    );
    assert_eq!(game.stacks(), before.as_slice());
}

#[test]
fn click_without_movement_leaves_board_identical() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();
    let from = grab_point(&game, RED_SEVEN);

    assert!(game.press(from));
    assert_eq!(game.drag_phase(), DragPhase::Pressed);
    assert_eq!(
        game.release(from),
        Some(DropOutcome::RolledBack(RollbackReason::NotMoved))
    );
    assert_eq!(game.stacks(), before.as_slice());

    // A failed drag followed by a plain click changes nothing either.
    assert_eq!(
        drag_with_offset(&mut game, RED_SEVEN, 0, Point::new(0.0, 400.0)),
        Some(DropOutcome::RolledBack(RollbackReason::OutOfReach))
    );
    assert!(game.press(from));
    assert_eq!(
        game.release(from),
        Some(DropOutcome::RolledBack(RollbackReason::NotMoved))
    );
    assert_eq!(game.stacks(), before.as_slice());
    assert_eq!(game.drag_phase(), DragPhase::Idle);
}

#[test]
fn moves_accumulate_relative_to_last_pointer() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let start = game.slot(RED_SEVEN).unwrap().position;
    let from = grab_point(&game, RED_SEVEN);

    assert!(game.press(from));
    game.move_pointer(from + Point::new(10.0, 0.0));
    game.move_pointer(from + Point::new(25.0, -5.0));
    assert_eq!(
        game.slot(RED_SEVEN).unwrap().position,
        start + Point::new(25.0, -5.0)
    );

    let session = game.drag_session().unwrap();
    assert_eq!(session.displacement(), Point::new(25.0, -5.0));
    assert_eq!(session.origin_positions, vec![start]);
}

#[test]
fn focus_loss_rolls_back() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();
    let from = grab_point(&game, RED_SEVEN);

    assert!(game.press(from));
    game.move_pointer(from + Point::new(-120.0, -40.0));
    assert_ne!(game.stacks(), before.as_slice());

    assert_eq!(
        game.focus_lost(),
        Some(DropOutcome::RolledBack(RollbackReason::FocusLost))
    );
    assert_eq!(game.stacks(), before.as_slice());
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert_eq!(game.focus_lost(), None);
}

#[test]
fn face_down_cards_cannot_be_picked_up() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let point = grab_point(&game, HIDDEN_KING);

    assert_eq!(
        game.hit_test(point),
        Some(Hit::Tableau {
            index: 1,
            card: HIDDEN_KING,
            face_up: false,
        })
    );
    assert!(!game.press(point));
    assert_eq!(game.drag_phase(), DragPhase::Idle);
}

#[test]
fn hit_test_prefers_the_top_card() {
    let game = Game::new(LayoutOptions::default(), 8).unwrap();
    let stack = game.stack(6).unwrap();
    let top = *stack.top().unwrap();
    let center = game.layout().card_rect(top.position).center();

    assert_eq!(
        game.hit_test(center),
        Some(Hit::Tableau {
            index: 6,
            card: top.card,
            face_up: true,
        })
    );
    assert_eq!(
        game.hit_test(game.layout().stock_origin() + Point::new(1.0, 1.0)),
        Some(Hit::Stock)
    );
    assert_eq!(game.hit_test(Point::new(-10.0, -10.0)), None);
}

#[test]
fn pressing_the_stock_draws() {
    let mut game = Game::new(LayoutOptions::default(), 8).unwrap();
    let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);

    assert!(game.press(stock));
    assert_eq!(game.draw_pile().waste_len(), 1);
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert_eq!(game.release(stock), None);
}

#[test]
fn waste_top_can_be_dragged_to_the_tableau() {
    let mut prefix = vec![BLACK_EIGHT];
    prefix.extend(
        Card::full_deck()
            .into_iter()
            .filter(|card| *card != BLACK_EIGHT && *card != RED_SEVEN)
            .take(27),
    );
    prefix.push(RED_SEVEN);
    let mut game = game_with(&prefix);

    assert_eq!(game.draw(), DrawOutcome::Drew(RED_SEVEN));
    let outcome = drag(&mut game, RED_SEVEN, 0).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Committed(MoveRecord {
            lead: RED_SEVEN,
            count: 1,
            from: PileId::Waste,
            to: 0,
            revealed: None,
        })
    );
    assert_eq!(game.draw_pile().waste_len(), 0);
    assert_eq!(game.locate(RED_SEVEN), Some(PileId::Tableau(0)));
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn drawing_under_a_held_waste_card_is_a_stale_release() {
    let mut game = Game::new(LayoutOptions::default(), 13).unwrap();
    let DrawOutcome::Drew(held) = game.draw() else {
        panic!("stock should not be empty after the deal");
    };
    let from = grab_point(&game, held);

    assert!(game.press(from));
    game.move_pointer(from + Point::new(0.0, 200.0));
    assert!(matches!(game.draw(), DrawOutcome::Drew(_)));

    assert_eq!(
        game.release(from + Point::new(0.0, 200.0)),
        Some(DropOutcome::RolledBack(RollbackReason::Stale))
    );
    assert_eq!(game.locate(held), Some(PileId::Waste));
    assert_eq!(
        game.slot(held).unwrap().position,
        game.layout().waste_origin()
    );
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn presses_are_ignored_while_a_run_is_held() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let from = grab_point(&game, RED_SEVEN);

    assert!(game.press(from));
    assert!(!game.press(grab_point(&game, BLACK_EIGHT)));
    assert_eq!(game.drag_session().unwrap().lead, RED_SEVEN);
}

#[test]
fn dragged_cards_are_composed_last() {
    let mut game = Game::new(LayoutOptions::default(), 5).unwrap();
    let lead = game.stack(0).unwrap().top_card().unwrap();
    let from = grab_point(&game, lead);

    assert!(game.press(from));
    game.move_pointer(from + Point::new(300.0, 50.0));

    let scene = game.compose();
    assert_eq!(scene.len(), 52);
    let last = scene.last().unwrap();
    assert_eq!(last.card, lead);
    assert!(last.dragging);
    assert!(scene[..51].iter().all(|record| !record.dragging));
}

#[test]
fn held_run_is_composed_after_later_stacks() {
    let mut game = game_with(&[
        BLACK_EIGHT,
        HIDDEN_KING,
        RED_SEVEN,
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Diamonds, Rank::Nine),
    ]);
    assert!(drag(&mut game, RED_SEVEN, 0).unwrap().is_committed());

    let from = grab_point(&game, BLACK_EIGHT);
    assert!(game.press(from));
    game.move_pointer(from + Point::new(5.0, 5.0));

    let scene = game.compose();
    let tail: Vec<Card> = scene[50..].iter().map(|record| record.card).collect();
    assert_eq!(tail, vec![BLACK_EIGHT, RED_SEVEN]);
    assert!(scene[50..].iter().all(|record| record.dragging));
}

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    last_len: usize,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, scene: &[DrawRecord]) {
        self.frames += 1;
        self.last_len = scene.len();
    }
}

#[test]
fn tick_applies_press_move_release_in_one_frame() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let from = grab_point(&game, RED_SEVEN);
    let start = game.slot(RED_SEVEN).unwrap().position;
    let landing = game.stack(0).unwrap().landing_rect(game.layout()).origin;
    let target = from + (landing - start);

    game.push_event(InputEvent::PointerUp(target));
    game.push_event(InputEvent::PointerMove(target));
    game.push_event(InputEvent::PointerDown(from));
    assert_eq!(game.pending_events(), 3);

    let mut renderer = CountingRenderer::default();
    assert_eq!(game.tick(&mut renderer), TickStatus::Running);
    assert_eq!(renderer.frames, 1);
    assert_eq!(renderer.last_len, 52);
    assert_eq!(game.pending_events(), 0);
    assert_eq!(game.locate(RED_SEVEN), Some(PileId::Tableau(0)));
}

#[test]
fn tick_renders_dragged_run_on_top() {
    let mut game = Game::new(LayoutOptions::default(), 5).unwrap();
    let lead = game.stack(3).unwrap().top_card().unwrap();
    let from = grab_point(&game, lead);

    game.push_event(InputEvent::PointerDown(from));
    game.push_event(InputEvent::PointerMove(from + Point::new(-200.0, 10.0)));

    let mut scene: Vec<DrawRecord> = Vec::new();
    game.tick(&mut scene);
    assert_eq!(game.drag_phase(), DragPhase::Dragging);
    assert_eq!(scene.last().unwrap().card, lead);
    assert!(scene.last().unwrap().dragging);

    game.push_event(InputEvent::FocusLost);
    game.tick(&mut scene);
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert!(scene.iter().all(|record| !record.dragging));
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn quit_is_reported_after_the_frame() {
    let mut game = Game::new(LayoutOptions::default(), 5).unwrap();
    let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);

    game.push_event(InputEvent::Quit);
    game.push_event(InputEvent::PointerDown(stock));

    let mut renderer = CountingRenderer::default();
    assert_eq!(game.tick(&mut renderer), TickStatus::Quit);
    assert_eq!(renderer.frames, 1);
    assert_eq!(game.draw_pile().waste_len(), 1);
}

#[test]
fn tick_ignores_motion_from_before_the_press() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let start = game.slot(RED_SEVEN).unwrap().position;
    let from = grab_point(&game, RED_SEVEN);

    game.push_event(InputEvent::PointerMove(from + Point::new(300.0, 0.0)));
    game.push_event(InputEvent::PointerDown(from));

    let mut scene: Vec<DrawRecord> = Vec::new();
    game.tick(&mut scene);
    assert_eq!(game.drag_phase(), DragPhase::Pressed);
    assert_eq!(game.slot(RED_SEVEN).unwrap().position, start);
    assert_eq!(scene.last().unwrap().position, start);
}

#[test]
fn tick_retries_a_press_after_the_held_run_is_released() {
    let mut game = game_with(&[BLACK_EIGHT, HIDDEN_KING, RED_SEVEN]);
    let before: Vec<Stack> = game.stacks().to_vec();
    let from = grab_point(&game, RED_SEVEN);
    let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);

    assert!(game.press(from));
    game.push_event(InputEvent::PointerUp(from));
    game.push_event(InputEvent::PointerDown(stock));

    let mut renderer = CountingRenderer::default();
    game.tick(&mut renderer);
    assert_eq!(game.stacks(), before.as_slice());
    assert_eq!(game.draw_pile().waste_len(), 1);
    assert_eq!(game.drag_phase(), DragPhase::Idle);
    assert_eq!(game.check_invariants(), Ok(()));
}

#[test]
fn redeal_discards_queued_events() {
    let mut game = Game::new(LayoutOptions::default(), 5).unwrap();
    let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);

    game.push_event(InputEvent::PointerDown(stock));
    game.push_event(InputEvent::PointerUp(stock));
    game.redeal();
    assert_eq!(game.pending_events(), 0);

    let mut renderer = CountingRenderer::default();
    game.tick(&mut renderer);
    assert_eq!(game.draw_pile().waste_len(), 0);
    assert_eq!(game.draw_pile().stock_len(), 24);
}
