use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use log::{info, warn};
use rand::Rng;

use crate::draw::{assign_decks, Assignment};
use crate::editor::{edit_players, enter_players};
use crate::error::DrawError;
use crate::images::CardImages;
use crate::prompt::Console;
use crate::roster::Roster;
use crate::storage::{load_roster, save_roster};

pub struct DrawSettings {
    pub roster_file: PathBuf,
    pub decks_per_player: usize,
    pub seed: Option<u64>,
    pub once: bool,
    pub show_images: bool,
}

pub struct Session<R, W, G> {
    settings: DrawSettings,
    console: Console<R, W>,
    rng: G,
    images: Option<CardImages>,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(settings: DrawSettings, console: Console<R, W>, rng: G) -> Self {
        let images = if settings.show_images {
            CardImages::new()
                .map_err(|e| warn!("card images disabled: {e}"))
                .ok()
        } else {
            None
        };
        Self { settings, console, rng, images }
    }

    /// Draws once and prints the result. Nothing is kept between calls.
    pub fn draw(&mut self, roster: &Roster) -> Result<Assignment, DrawError> {
        let assignment = assign_decks(roster, &mut self.rng)?;
        self.console.say("\nRandom Deck Assignments:");
        self.console.say(assignment.to_string().trim_end());
        if let Some(images) = &self.images {
            for p in assignment.pairings() {
                self.console.say(&format!("  {}", images.describe(&p.deck)));
            }
        }
        self.console.say("");
        Ok(assignment)
    }

    pub fn run_once(&mut self) -> anyhow::Result<Assignment> {
        let path = self.settings.roster_file.clone();
        let roster = match load_roster(&path) {
            Ok(roster) => roster,
            Err(e) if e.is_not_found() => {
                bail!("no roster file at '{}', run without --once to create one", path.display())
            }
            Err(e) => return Err(e).with_context(|| format!("could not load '{}'", path.display())),
        };
        Ok(self.draw(&roster)?)
    }

    fn load_saved_roster(&mut self) -> Option<Roster> {
        let path = self.settings.roster_file.clone();
        if !path.exists() {
            return None;
        }
        if !self.console.yes_no(&format!("Load players from '{}'? (y/n): ", path.display())) {
            return None;
        }
        match load_roster(&path) {
            Ok(roster) => {
                self.console.say(&format!("\nLoaded players from '{}'.", path.display()));
                Some(roster)
            }
            Err(e) => {
                warn!("ignoring {}: {e}", path.display());
                self.console.say(&format!("Could not load '{}': {e}", path.display()));
                None
            }
        }
    }

    fn obtain_roster(&mut self) -> anyhow::Result<Roster> {
        let decks = self.settings.decks_per_player;
        if let Some(mut roster) = self.load_saved_roster().filter(|r| !r.is_empty()) {
            if self.console.yes_no("Do you want to edit the loaded players? (y/n): ") {
                edit_players(&mut self.console, &mut roster, decks);
            }
            return Ok(roster);
        }
        enter_players(&mut self.console, decks)
            .ok_or_else(|| anyhow!("input ended before all players were entered"))
    }

    pub fn run_interactive(&mut self) -> anyhow::Result<Roster> {
        self.console.say("Magic Deck Randomizer");
        self.console.say("----------------------");

        let mut roster = self.obtain_roster()?;
        self.console.say("\nPlayers loaded:");
        self.console.say(roster.to_string().trim_end());

        let mut rolls = 0u32;
        loop {
            match self.draw(&roster) {
                Ok(_) => {
                    rolls += 1;
                    if !self.console.yes_no("Reroll? (y/n): ") {
                        break;
                    }
                }
                Err(e) => {
                    self.console.say(&format!("Cannot draw: {e}"));
                    if !self.console.yes_no("Edit the players and try again? (y/n): ") {
                        break;
                    }
                    edit_players(&mut self.console, &mut roster, self.settings.decks_per_player);
                }
            }
        }
        info!("{rolls} draw(s) for {} player(s)", roster.len());

        let path = self.settings.roster_file.clone();
        let question = format!("\nDo you want to save these players to '{}'? (y/n): ", path.display());
        if self.console.yes_no(&question) {
            match save_roster(&path, &roster) {
                Ok(()) => self.console.say(&format!("\nPlayer data saved to '{}'.", path.display())),
                Err(e) => self.console.say(&format!("Could not save '{}': {e}", path.display())),
            }
        }

        self.console.say("Good luck and have fun!");
        Ok(roster)
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.console.into_output()
    }
}
