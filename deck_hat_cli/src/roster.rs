use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RosterError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub decks: Vec<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, decks: Vec<String>) -> Self {
        Self { name: name.into(), decks }
    }
}

/// Participants in insertion order. Names are unique and non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 1-based, the way the editing menu numbers players.
    pub fn name_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.participants.get(i))
            .map(|p| p.name.as_str())
    }

    fn index_of(&self, name: &str) -> Result<usize, RosterError> {
        self.participants
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| RosterError::UnknownParticipant(name.to_string()))
    }

    /// Returns the trimmed name if it is non-empty and not taken.
    fn check_new_name<'a>(&self, name: &'a str) -> Result<&'a str, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(name) {
            return Err(RosterError::DuplicateParticipant(name.to_string()));
        }
        Ok(name)
    }

    /// Surrounding whitespace is dropped from `name`.
    pub fn add(&mut self, name: &str, decks: Vec<String>) -> Result<(), RosterError> {
        let name = self.check_new_name(name)?;
        self.participants.push(Participant::new(name, decks));
        Ok(())
    }

    /// Renames in place; the participant keeps its position.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), RosterError> {
        let idx = self.index_of(old)?;
        if old == new.trim() {
            return Ok(());
        }
        let new = self.check_new_name(new)?;
        self.participants[idx].name = new.to_string();
        Ok(())
    }

    pub fn add_deck(&mut self, name: &str, deck: &str) -> Result<(), RosterError> {
        let idx = self.index_of(name)?;
        self.participants[idx].decks.push(deck.to_string());
        Ok(())
    }

    /// `index` is 0-based.
    pub fn set_deck(&mut self, name: &str, index: usize, deck: &str) -> Result<(), RosterError> {
        let idx = self.index_of(name)?;
        let p = &mut self.participants[idx];
        match p.decks.get_mut(index) {
            Some(slot) => {
                *slot = deck.to_string();
                Ok(())
            }
            None => Err(RosterError::DeckIndexOutOfRange { participant: p.name.clone(), index }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<Participant, RosterError> {
        let idx = self.index_of(name)?;
        Ok(self.participants.remove(idx))
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.participants {
            writeln!(f, "  {}: {}", p.name, p.decks.join(", "))?;
        }
        Ok(())
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.participants.len()))?;
        for p in &self.participants {
            map.serialize_entry(&p.name, &p.decks)?;
        }
        map.end()
    }
}

struct RosterVisitor;

impl<'de> Visitor<'de> for RosterVisitor {
    type Value = Roster;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping participant names to arrays of deck names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Roster, A::Error> {
        let mut roster = Roster::new();
        while let Some((name, decks)) = access.next_entry::<String, Vec<String>>()? {
            roster.add(&name, decks).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(roster)
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Roster, D::Error> {
        deserializer.deserialize_map(RosterVisitor)
    }
}

#[cfg(test)]
pub(crate) fn sample(entries: &[(&str, &[&str])]) -> Roster {
    let mut roster = Roster::new();
    for (name, decks) in entries {
        roster.add(name, decks.iter().map(|d| d.to_string()).collect()).unwrap();
    }
    roster
}
