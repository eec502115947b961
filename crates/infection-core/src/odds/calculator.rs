use crate::game::state::DeckState;
use crate::model::deck::InfectionDeck;
use serde::Serialize;

/// Probability per city, in deck order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CityOdds {
    entries: Vec<(String, f64)>,
}

impl CityOdds {
    pub fn get(&self, city: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, probability)| *probability)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, probability)| (name.as_str(), *probability))
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, probability)| *probability)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights().sum()
    }

    /// True when nothing is believed left to draw.
    pub fn is_all_zero(&self) -> bool {
        self.weights().all(|probability| probability == 0.0)
    }

    pub(crate) fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }
}

pub fn total_count(counts: &[u32]) -> u64 {
    counts.iter().map(|&count| u64::from(count)).sum()
}

/// Per city, the highest count seen in any closed round. Before the first
/// epidemic there is no history, so the whole deck stands in for it.
pub fn infected_cities(state: &DeckState) -> Vec<u32> {
    let closed = state.closed_rounds();
    if closed.is_empty() {
        return state.deck().totals().to_vec();
    }

    let mut infected = vec![0u32; state.deck().len()];
    for round in closed {
        for (seen, &count) in infected.iter_mut().zip(round.counts()) {
            *seen = (*seen).max(count);
        }
    }
    infected
}

/// Element-wise `a - b`. Entries go negative when a round has drawn more
/// copies of a city than `a` accounts for.
pub fn difference(a: &[u32], b: &[u32]) -> Vec<i64> {
    a.iter()
        .zip(b)
        .map(|(&lhs, &rhs)| i64::from(lhs) - i64::from(rhs))
        .collect()
}

/// Scales `remaining` into probabilities. A city cannot have fewer than zero
/// copies left, so negative entries weigh nothing. Without any positive
/// weight every city gets zero.
pub fn normalize(deck: &InfectionDeck, remaining: &[i64]) -> CityOdds {
    let weights: Vec<u64> = remaining
        .iter()
        .map(|&count| u64::try_from(count).unwrap_or(0))
        .collect();
    let total: u64 = weights.iter().sum();
    let entries = deck
        .names()
        .zip(&weights)
        .map(|(name, &weight)| {
            let probability = if total == 0 {
                0.0
            } else {
                weight as f64 / total as f64
            };
            (name.to_string(), probability)
        })
        .collect();
    CityOdds { entries }
}

/// Odds for the next card drawn during normal play.
///
/// Cards drawn in closed rounds sit on top of the shuffled pile, so the
/// history bounds what can come next. Once that bound is used up (or there
/// is no history) the odds fall back to the full deck minus this round.
/// The decision is taken on the signed sum, so a city drawn past its
/// history offsets copies still expected elsewhere.
pub fn remaining_deck_probabilities(state: &DeckState) -> CityOdds {
    let open = state.open_round().counts();
    let known = difference(&infected_cities(state), open);
    let known_remaining: i64 = known.iter().sum();
    if known_remaining > 0 {
        return normalize(state.deck(), &known);
    }
    epidemic_selection_probabilities(state)
}

/// Odds for the bottom card revealed by an epidemic: anything not yet drawn
/// this round.
pub fn epidemic_selection_probabilities(state: &DeckState) -> CityOdds {
    let unseen = difference(state.deck().totals(), state.open_round().counts());
    normalize(state.deck(), &unseen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round::Round;

    const EPSILON: f64 = 1e-9;

    fn two_city_state(totals: [u32; 2], rounds: &[[u32; 2]]) -> DeckState {
        let deck = InfectionDeck::from_roster([("Lima", totals[0]), ("Paris", totals[1])]);
        let rounds = rounds
            .iter()
            .map(|counts| Round::with_counts(counts.to_vec()))
            .collect();
        DeckState::from_parts(deck, rounds).unwrap()
    }

    #[test]
    fn initial_odds_follow_deck_totals() {
        let state = DeckState::standard();
        let odds = remaining_deck_probabilities(&state);
        assert_eq!(odds.len(), 14);
        for (_, name, total) in state.deck().iter() {
            let expected = f64::from(total) / 39.0;
            assert!((odds.get(name).unwrap() - expected).abs() < EPSILON);
        }
        assert!((odds.sum() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn infected_cities_uses_max_across_closed_rounds() {
        let state = two_city_state([3, 3], &[[2, 0], [1, 1], [0, 0]]);
        assert_eq!(infected_cities(&state), vec![2, 1]);
    }

    #[test]
    fn infected_cities_without_history_is_deck() {
        let state = two_city_state([3, 2], &[[1, 0]]);
        assert_eq!(infected_cities(&state), vec![3, 2]);
    }

    #[test]
    fn closed_round_bounds_next_draws() {
        let state = two_city_state([3, 3], &[[2, 1], [1, 0]]);
        let odds = remaining_deck_probabilities(&state);
        assert!((odds.get("Lima").unwrap() - 0.5).abs() < EPSILON);
        assert!((odds.get("Paris").unwrap() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn exhausted_history_falls_back_to_deck() {
        let state = two_city_state([3, 1], &[[1, 1], [1, 1]]);
        let odds = remaining_deck_probabilities(&state);
        assert!((odds.get("Lima").unwrap() - 1.0).abs() < EPSILON);
        assert_eq!(odds.get("Paris"), Some(0.0));
    }

    #[test]
    fn empty_fallback_is_all_zero() {
        let state = two_city_state([1, 1], &[[1, 1]]);
        let odds = remaining_deck_probabilities(&state);
        assert!(odds.is_all_zero());
        assert_eq!(odds.sum(), 0.0);
    }

    #[test]
    fn overdrawn_city_cancels_history_and_falls_back() {
        let state = two_city_state([3, 3], &[[1, 1], [2, 0]]);
        let odds = remaining_deck_probabilities(&state);
        assert!((odds.get("Lima").unwrap() - 0.25).abs() < EPSILON);
        assert!((odds.get("Paris").unwrap() - 0.75).abs() < EPSILON);
    }

    #[test]
    fn negative_entries_weigh_nothing_while_history_remains() {
        let state = two_city_state([3, 3], &[[1, 2], [2, 0]]);
        let odds = remaining_deck_probabilities(&state);
        assert_eq!(odds.get("Lima"), Some(0.0));
        assert!((odds.get("Paris").unwrap() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn epidemic_selection_ignores_history() {
        let state = two_city_state([3, 1], &[[3, 0], [1, 0]]);
        let odds = epidemic_selection_probabilities(&state);
        assert!((odds.get("Lima").unwrap() - 2.0 / 3.0).abs() < EPSILON);
        assert!((odds.get("Paris").unwrap() - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn difference_keeps_sign() {
        assert_eq!(difference(&[3, 0, 2], &[1, 2, 2]), vec![2, -2, 0]);
        assert_eq!(total_count(&[3, 0, 2]), 5);
    }
}
