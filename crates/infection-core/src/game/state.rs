use super::error::TrackerError;
use crate::model::city::{CityId, normalize_name};
use crate::model::deck::InfectionDeck;
use crate::model::round::Round;
use serde::Serialize;

/// Cities, their believed totals, and the ordered observation rounds.
///
/// `rounds` is never empty and the last entry is the open round. Every round
/// carries one entry per city in the deck. Edits return a new value built
/// from `self`; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckState {
    deck: InfectionDeck,
    rounds: Vec<Round>,
}

impl DeckState {
    pub fn new(deck: InfectionDeck) -> Self {
        let rounds = vec![Round::empty(deck.len())];
        Self { deck, rounds }
    }

    pub fn standard() -> Self {
        Self::new(InfectionDeck::standard())
    }

    /// Reassembles a state from recorded history. Returns `None` when there
    /// are no rounds or a round does not cover exactly the deck's cities.
    pub fn from_parts(deck: InfectionDeck, rounds: Vec<Round>) -> Option<Self> {
        if rounds.is_empty() || rounds.iter().any(|round| round.len() != deck.len()) {
            return None;
        }
        Some(Self { deck, rounds })
    }

    pub fn deck(&self) -> &InfectionDeck {
        &self.deck
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn open_round_index(&self) -> usize {
        self.rounds.len() - 1
    }

    pub fn open_round(&self) -> &Round {
        &self.rounds[self.open_round_index()]
    }

    /// Rounds already ended by an epidemic, oldest first.
    pub fn closed_rounds(&self) -> &[Round] {
        &self.rounds[..self.open_round_index()]
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.deck.names()
    }

    pub fn city(&self, name: &str) -> Result<CityId, TrackerError> {
        self.deck
            .position(name)
            .ok_or_else(|| TrackerError::UnknownCity(name.to_string()))
    }

    pub fn observed(&self, round: usize, name: &str) -> Option<u32> {
        let id = self.deck.position(name)?;
        self.rounds.get(round).map(|r| r.count(id))
    }

    pub fn with_city_total(&self, city: &str, count: u32) -> Result<Self, TrackerError> {
        let id = self.city(city)?;
        let mut next = self.clone();
        next.deck.set_total(id, count);
        Ok(next)
    }

    pub fn with_adjusted_city_total(&self, city: &str, delta: i64) -> Result<Self, TrackerError> {
        let id = self.city(city)?;
        let count = offset(city, self.deck.total(id), delta)?;
        self.with_city_total(city, count)
    }

    /// Adds `name` with a total of zero and a zero entry in every round.
    /// A name that is already present leaves the state unchanged.
    pub fn with_city(&self, name: &str) -> Result<Self, TrackerError> {
        let name = normalize_name(name).ok_or(TrackerError::InvalidCityName)?;
        let mut next = self.clone();
        let (_, created) = next.deck.insert(name);
        if created {
            for round in next.rounds.iter_mut() {
                round.backfill_city();
            }
        }
        Ok(next)
    }

    pub fn with_round_count(
        &self,
        round: usize,
        city: &str,
        count: u32,
    ) -> Result<Self, TrackerError> {
        let id = self.city(city)?;
        self.check_round(round)?;
        let mut next = self.clone();
        next.rounds[round].set(id, count);
        Ok(next)
    }

    pub fn with_adjusted_round_count(
        &self,
        round: usize,
        city: &str,
        delta: i64,
    ) -> Result<Self, TrackerError> {
        let id = self.city(city)?;
        self.check_round(round)?;
        let count = offset(city, self.rounds[round].count(id), delta)?;
        self.with_round_count(round, city, count)
    }

    /// Counts the epidemic card against the open round, then opens a fresh one.
    pub(crate) fn with_epidemic_closed(&self, id: CityId) -> Self {
        let mut next = self.clone();
        let open = next.open_round_index();
        let drawn = next.rounds[open].count(id).saturating_add(1);
        next.rounds[open].set(id, drawn);
        next.rounds.push(Round::empty(next.deck.len()));
        next
    }

    /// Drops the open round. `None` when it is the only round.
    pub(crate) fn without_open_round(&self) -> Option<Self> {
        if self.rounds.len() <= 1 {
            return None;
        }
        let mut next = self.clone();
        next.rounds.pop();
        Some(next)
    }

    fn check_round(&self, index: usize) -> Result<(), TrackerError> {
        if index < self.rounds.len() {
            Ok(())
        } else {
            Err(TrackerError::RoundOutOfRange {
                index,
                len: self.rounds.len(),
            })
        }
    }
}

impl Default for DeckState {
    fn default() -> Self {
        Self::standard()
    }
}

fn offset(city: &str, current: u32, delta: i64) -> Result<u32, TrackerError> {
    let overflow = || TrackerError::CountOverflow {
        city: city.to_string(),
        current,
        delta,
    };
    let next = i64::from(current).checked_add(delta).ok_or_else(overflow)?;
    if next < 0 {
        return Err(TrackerError::NegativeCount {
            city: city.to_string(),
            current,
            delta,
        });
    }
    u32::try_from(next).map_err(|_| overflow())
}
