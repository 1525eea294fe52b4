use std::io::{BufRead, Write};

use log::debug;

use crate::prompt::Console;
use crate::roster::Roster;

const MAX_PLAYERS: u32 = 100;

fn read_decks<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    name: &str,
    count: usize,
) -> Option<Vec<String>> {
    (0..count)
        .map(|j| console.line_or(&format!("  Deck {} name for {name}: ", j + 1), &format!("Deck{}", j + 1)))
        .collect()
}

/// Blank names become `Player{k}` where k is the next free position.
fn read_new_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &Roster,
    prompt: &str,
) -> Option<String> {
    loop {
        let default = format!("Player{}", roster.len() + 1);
        let name = console.line_or(prompt, &default)?;
        if roster.contains(&name) {
            console.say(&format!("{name} is already playing, pick another name."));
            continue;
        }
        return Some(name);
    }
}

/// Builds a roster from scratch. `None` if input ends early.
pub fn enter_players<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    decks_per_player: usize,
) -> Option<Roster> {
    console.say(&format!("Enter player names and their {decks_per_player} decks"));
    console.say("(Press Enter after each name and deck)\n");

    let count = console.number("How many players? (e.g. 4): ", 2, MAX_PLAYERS)?;
    let mut roster = Roster::new();
    for i in 0..count {
        let name = read_new_player(console, &roster, &format!("\nPlayer {} name: ", i + 1))?;
        let decks = read_decks(console, &name, decks_per_player)?;
        roster.add(&name, decks).ok()?;
    }
    Some(roster)
}

fn list_players<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &Roster) {
    console.say("\nPlayers:");
    for (idx, p) in roster.iter().enumerate() {
        console.say(&format!("  {}. {}", idx + 1, p.name));
    }
}

fn select_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &Roster,
    verb: &str,
) -> Option<String> {
    list_players(console, roster);
    let sel = console.line(&format!("Select player number to {verb}: "))?;
    let name = sel.parse::<usize>().ok().and_then(|pos| roster.name_at(pos));
    if name.is_none() {
        console.say("Invalid selection.");
    }
    name.map(str::to_string)
}

/// Players loaded with fewer than `decks_per_player` decks are asked for the rest.
fn edit_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &mut Roster,
    decks_per_player: usize,
) -> Option<()> {
    let Some(mut name) = select_player(console, roster, "edit") else {
        return Some(());
    };

    let new_name = console.line(&format!("Enter new name for {name} (or press Enter to keep): "))?;
    if !new_name.is_empty() {
        match roster.rename(&name, &new_name) {
            Ok(()) => name = new_name,
            Err(e) => console.say(&format!("{e}; keeping {name}.")),
        }
    }

    console.say(&format!("Editing decks for {name}:"));
    let current = roster.get(&name).map(|p| p.decks.clone()).unwrap_or_default();
    for (i, deck) in current.iter().enumerate() {
        let new_deck = console.line(&format!("  Deck {} name (current: {deck}): ", i + 1))?;
        if !new_deck.is_empty() {
            if let Err(e) = roster.set_deck(&name, i, &new_deck) {
                console.say(&e.to_string());
            }
        }
    }
    for j in current.len()..decks_per_player {
        let deck = console.line_or(&format!("  Deck {} name for {name}: ", j + 1), &format!("Deck{}", j + 1))?;
        roster.add_deck(&name, &deck).ok()?;
    }
    Some(())
}

fn add_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &mut Roster,
    decks_per_player: usize,
) -> Option<()> {
    let name = read_new_player(console, roster, "New player name: ")?;
    let decks = read_decks(console, &name, decks_per_player)?;
    roster.add(&name, decks).ok()
}

fn remove_player<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> Option<()> {
    if let Some(name) = select_player(console, roster, "remove") {
        if roster.remove(&name).is_ok() {
            console.say(&format!("{name} removed."));
        }
    }
    Some(())
}

/// Edit/add/remove menu over an existing roster. Returns when the user picks
/// "Done editing" or input ends.
pub fn edit_players<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &mut Roster,
    decks_per_player: usize,
) {
    loop {
        console.say("\nPlayer Editing Menu:");
        console.say("1. Edit a player");
        console.say("2. Add a new player");
        console.say("3. Remove a player");
        console.say("4. Done editing");
        let Some(choice) = console.line("Choose an option: ") else {
            return;
        };

        let step = match choice.as_str() {
            "1" => edit_player(console, roster, decks_per_player),
            "2" => add_player(console, roster, decks_per_player),
            "3" => remove_player(console, roster),
            "4" => return,
            _ => {
                console.say("Invalid choice.");
                Some(())
            }
        };
        if step.is_none() {
            debug!("input ended inside the editing menu");
            return;
        }
    }
}
