//! The draw itself: a random derangement of participants, then one deck
//! picked from each counterpart's list.

use std::fmt;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DrawError;
use crate::roster::Roster;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub participant: String,
    pub counterpart: String,
    pub deck: String,
}

/// Result of a single draw, in roster order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gets {}'s '{}' deck", self.participant, self.counterpart, self.deck)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.pairings {
            writeln!(f, "  {p}")?;
        }
        Ok(())
    }
}

/// Returns a permutation of `items` where no element stays at its index.
///
/// Shuffles and retries until there is no fixed point. Every derangement is
/// equally likely since the shuffle is uniform. The expected number of
/// shuffles approaches e as the input grows (2 for two items, 3 for three).
pub fn derangement<T, R>(items: &[T], rng: &mut R) -> Result<Vec<T>, DrawError>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if items.len() < 2 {
        return Err(DrawError::InvalidInput { count: items.len() });
    }

    let mut shuffled = items.to_vec();
    let mut attempts = 1u32;
    loop {
        shuffled.shuffle(rng);
        if items.iter().zip(&shuffled).all(|(a, b)| a != b) {
            debug!("derangement of {} found after {} shuffle(s)", items.len(), attempts);
            return Ok(shuffled);
        }
        attempts += 1;
    }
}

/// Assigns every participant a counterpart and a deck from that counterpart's list.
pub fn assign_decks<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Result<Assignment, DrawError> {
    if roster.len() < 2 {
        return Err(DrawError::InvalidInput { count: roster.len() });
    }
    if let Some(p) = roster.iter().find(|p| p.decks.is_empty()) {
        return Err(DrawError::EmptyDeckList { participant: p.name.clone() });
    }

    let names = roster.names();
    let counterparts = derangement(&names, rng)?;

    let mut pairings = Vec::with_capacity(names.len());
    for (participant, counterpart) in names.iter().zip(counterparts) {
        let decks = roster
            .get(counterpart)
            .map(|p| p.decks.as_slice())
            .unwrap_or_default();
        let deck = decks
            .choose(rng)
            .ok_or_else(|| DrawError::EmptyDeckList { participant: counterpart.to_string() })?;
        pairings.push(Pairing {
            participant: participant.to_string(),
            counterpart: counterpart.to_string(),
            deck: deck.clone(),
        });
    }
    Ok(Assignment { pairings })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::roster::sample;

    fn numbered_roster(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            let decks = (0..3).map(|j| format!("P{i}-D{j}")).collect();
            roster.add(&format!("P{i}"), decks).unwrap();
        }
        roster
    }

    #[test]
    fn derangement_has_no_fixed_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..15 {
            let items: Vec<usize> = (0..n).collect();
            for _ in 0..50 {
                let out = derangement(&items, &mut rng).unwrap();
                assert!(out.iter().enumerate().all(|(i, &v)| i != v), "{out:?}");
                let mut sorted = out.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, items);
            }
        }
    }

    #[test]
    fn two_items_always_swap() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(derangement(&["a", "b"], &mut rng).unwrap(), vec!["b", "a"]);
        }
    }

    #[test]
    fn derangement_needs_two_items() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(derangement::<u8, _>(&[], &mut rng), Err(DrawError::InvalidInput { count: 0 }));
        assert_eq!(derangement(&[1], &mut rng), Err(DrawError::InvalidInput { count: 1 }));
    }

    #[test]
    fn same_seed_same_draw() {
        let roster = numbered_roster(6);
        let a = assign_decks(&roster, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = assign_decks(&roster, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn assignment_is_a_derangement_with_counterpart_decks() {
        let mut rng = StdRng::seed_from_u64(2024);
        for n in 2..12 {
            let roster = numbered_roster(n);
            for _ in 0..20 {
                let assignment = assign_decks(&roster, &mut rng).unwrap();
                let pairings = assignment.pairings();
                assert_eq!(pairings.len(), n);

                let keys: Vec<&str> = pairings.iter().map(|p| p.participant.as_str()).collect();
                assert_eq!(keys, roster.names());

                let targets: HashSet<&str> = pairings.iter().map(|p| p.counterpart.as_str()).collect();
                assert_eq!(targets.len(), n);

                for p in pairings {
                    assert_ne!(p.participant, p.counterpart);
                    assert!(roster.get(&p.counterpart).unwrap().decks.contains(&p.deck));
                    assert!(!roster.get(&p.participant).unwrap().decks.contains(&p.deck));
                }
            }
        }
    }

    #[test]
    fn three_players_form_a_cycle() {
        let roster = sample(&[
            ("Alice", &["A1", "A2", "A3"]),
            ("Bob", &["B1", "B2", "B3"]),
            ("Carol", &["C1", "C2", "C3"]),
        ]);
        let forward = ["Bob", "Carol", "Alice"];
        let backward = ["Carol", "Alice", "Bob"];
        let mut seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let assignment = assign_decks(&roster, &mut rng).unwrap();
            let cycle: Vec<&str> =
                assignment.pairings().iter().map(|p| p.counterpart.as_str()).collect();
            assert!(cycle == forward || cycle == backward, "{cycle:?}");
            seen.insert(cycle == forward);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn single_participant_is_rejected() {
        let roster = sample(&[("Alice", &["A1"])]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(assign_decks(&roster, &mut rng), Err(DrawError::InvalidInput { count: 1 }));
        assert_eq!(
            assign_decks(&Roster::new(), &mut rng),
            Err(DrawError::InvalidInput { count: 0 })
        );
    }

    #[test]
    fn empty_deck_list_is_rejected() {
        let roster = sample(&[("Alice", &["A1"]), ("Bob", &[]), ("Carol", &["C1"])]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            assign_decks(&roster, &mut rng),
            Err(DrawError::EmptyDeckList { participant: "Bob".into() })
        );
    }

    #[test]
    fn display_lines() {
        let roster = sample(&[("Alice", &["Elves"]), ("Bob", &["Goblins"])]);
        let assignment = assign_decks(&roster, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(
            assignment.to_string(),
            "  Alice gets Bob's 'Goblins' deck\n  Bob gets Alice's 'Elves' deck\n"
        );
        assert_eq!(assignment.pairings()[1].deck, "Elves");
    }
}
