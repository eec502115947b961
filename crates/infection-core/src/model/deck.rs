use crate::model::city::CityId;
use crate::model::roster::STANDARD_ROSTER;
use serde::Serialize;

/// Believed composition of the full infection deck, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InfectionDeck {
    names: Vec<String>,
    totals: Vec<u32>,
}

impl InfectionDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self::from_roster(STANDARD_ROSTER.iter().copied())
    }

    /// Builds a deck from `(name, total)` pairs. A repeated name keeps its
    /// first position and takes the later total.
    pub fn from_roster<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut deck = Self::new();
        for (name, total) in entries {
            let (id, _) = deck.insert(name.as_ref());
            deck.set_total(id, total);
        }
        deck
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<CityId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(CityId::from_index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn name(&self, id: CityId) -> &str {
        &self.names[id.index()]
    }

    pub fn total(&self, id: CityId) -> u32 {
        self.totals[id.index()]
    }

    pub fn total_of(&self, name: &str) -> Option<u32> {
        self.position(name).map(|id| self.total(id))
    }

    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    pub fn total_count(&self) -> u32 {
        self.totals.iter().sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CityId, &str, u32)> {
        self.names
            .iter()
            .zip(self.totals.iter())
            .enumerate()
            .map(|(index, (name, total))| (CityId::from_index(index), name.as_str(), *total))
    }

    pub(crate) fn set_total(&mut self, id: CityId, total: u32) {
        self.totals[id.index()] = total;
    }

    /// Returns the id for `name`, appending it with a total of zero when it
    /// is not yet known. The flag reports whether a new entry was created.
    pub(crate) fn insert(&mut self, name: &str) -> (CityId, bool) {
        if let Some(id) = self.position(name) {
            return (id, false);
        }
        self.names.push(name.to_string());
        self.totals.push(0);
        (CityId::from_index(self.names.len() - 1), true)
    }
}
