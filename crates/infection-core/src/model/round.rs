use crate::model::city::CityId;
use serde::Serialize;

/// Observed draw counts for one span between epidemics, indexed by [`CityId`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Round {
    counts: Vec<u32>,
}

impl Round {
    /// A round with a zero entry for each of `cities` known cities.
    pub fn empty(cities: usize) -> Self {
        Self {
            counts: vec![0; cities],
        }
    }

    pub fn with_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, id: CityId) -> u32 {
        self.counts[id.index()]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_blank(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub(crate) fn set(&mut self, id: CityId, count: u32) {
        self.counts[id.index()] = count;
    }

    pub(crate) fn backfill_city(&mut self) {
        self.counts.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::Round;
    use crate::model::city::CityId;

    #[test]
    fn empty_round_is_blank() {
        let round = Round::empty(14);
        assert_eq!(round.len(), 14);
        assert!(round.is_blank());
        assert_eq!(round.total(), 0);
    }

    #[test]
    fn set_and_backfill_track_totals() {
        let mut round = Round::empty(2);
        round.set(CityId::from_index(1), 2);
        round.backfill_city();
        assert_eq!(round.counts(), &[0, 2, 0]);
        assert_eq!(round.total(), 2);
        assert!(!round.is_blank());
    }
}
