//! Terminal Klondike example driving the engine with synthetic pointer events.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use solrs::{
    Card, Color, DrawRecord, DropOutcome, Game, InputEvent, LayoutOptions, PileId, Point, Slot,
    TickStatus,
};

fn main() {
    println!("Klondike CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let Ok(mut game) = Game::new(LayoutOptions::default(), seed) else {
        println!("Invalid layout.");
        return;
    };
    let mut scene: Vec<DrawRecord> = Vec::new();

    loop {
        print_table(&game);
        if game.is_fully_revealed() {
            println!("Every card is face up. Well played.");
            break;
        }

        let input = prompt_line("[d]raw, [m]ove <from> <to>, [w]aste <to>, [n]ew, [q]uit: ");
        let words: Vec<&str> = input.split_whitespace().collect();

        let lead = match words.as_slice() {
            ["d" | "draw"] => {
                let stock = game.layout().stock_origin() + Point::new(5.0, 5.0);
                game.push_event(InputEvent::PointerDown(stock));
                game.push_event(InputEvent::PointerUp(stock));
                None
            }
            ["m" | "move", from, to] => match (from.parse::<u8>(), to.parse::<u8>()) {
                (Ok(from), Ok(to)) => run_lead(&game, from).map(|card| (card, to)),
                _ => {
                    println!("Stack numbers expected.");
                    continue;
                }
            },
            ["w" | "waste", to] => match to.parse::<u8>() {
                Ok(to) => game.draw_pile().waste_top().map(|slot| (slot.card, to)),
                Err(_) => {
                    println!("Stack number expected.");
                    continue;
                }
            },
            ["n" | "new"] => {
                game.redeal();
                continue;
            }
            ["q" | "quit"] => {
                game.push_event(InputEvent::Quit);
                None
            }
            _ => {
                println!("Unknown command.");
                continue;
            }
        };

        if let Some((card, to)) = lead {
            if let Some(outcome) = drag_to(&mut game, card, to) {
                println!("{}", describe(outcome));
            }
        }

        let before = game.card_count();
        if game.tick(&mut scene) == TickStatus::Quit {
            println!("Goodbye.");
            break;
        }
        debug_assert_eq!(before, game.card_count());
        println!("Rendered {} cards.", scene.len());
    }
}

/// Returns the deepest face-up card of a stack.
fn run_lead(game: &Game, index: u8) -> Option<Card> {
    let stack = game.stack(index)?;
    stack
        .slots()
        .iter()
        .find(|slot| slot.face_up)
        .map(|slot| slot.card)
}

/// Presses on `card`, drags it over the next free slot of stack `to`, and releases.
fn drag_to(game: &mut Game, card: Card, to: u8) -> Option<DropOutcome> {
    let start = game.slot(card)?.position;
    let Some(landing) = game
        .stack(to)
        .map(|stack| stack.landing_rect(game.layout()).origin)
    else {
        println!("No stack {to}.");
        return None;
    };

    let grab = start + Point::new(game.layout().card_width / 2.0, 10.0);
    let drop = grab + (landing - start);

    let origin = game.locate(card);
    println!("Dragging {card} from {} to stack {to}.", format_pile(origin));

    if !game.press(grab) {
        return None;
    }
    game.move_pointer(drop);
    game.release(drop)
}

fn format_pile(pile: Option<PileId>) -> String {
    match pile {
        Some(PileId::Tableau(index)) => format!("stack {index}"),
        Some(PileId::Waste) => "the waste".to_string(),
        Some(PileId::Stock) => "the stock".to_string(),
        None => "nowhere".to_string(),
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn print_table(game: &Game) {
    let pile = game.draw_pile();
    let waste = pile
        .waste_top()
        .map_or_else(|| "--".to_string(), format_slot);
    println!(
        "\nStock: {} cards | Waste: {} ({} cards)",
        pile.stock_len(),
        waste,
        pile.waste_len()
    );

    for (index, stack) in game.stacks().iter().enumerate() {
        let cards: Vec<String> = stack.slots().iter().map(format_slot).collect();
        println!("{index}: {}", cards.join(" "));
    }
    println!();
}

fn format_slot(slot: &Slot) -> String {
    if !slot.face_up {
        return "##".to_string();
    }
    let text = format!("{}{}", slot.card.rank_glyph(), slot.card.suit_glyph());
    match slot.card.color() {
        Color::Red => colorize(&text, "31"),
        Color::Black => text,
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn describe(outcome: DropOutcome) -> String {
    match outcome {
        DropOutcome::Committed(record) => format!("moved {} card(s)", record.count),
        DropOutcome::RolledBack(reason) => format!("rolled back: {reason:?}"),
    }
}
