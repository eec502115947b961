use super::state::DeckState;
use super::tracker::Tracker;
use crate::odds::calculator::total_count;
use serde::Serialize;

/// Deck total per city plus card totals for each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub deck: Vec<(String, u32)>,
    pub deck_total: u64,
    pub rounds: Vec<u64>,
}

impl Totals {
    pub fn from_state(state: &DeckState) -> Self {
        Self {
            deck: state
                .deck()
                .iter()
                .map(|(_, name, total)| (name.to_string(), total))
                .collect(),
            deck_total: total_count(state.deck().totals()),
            rounds: state
                .rounds()
                .iter()
                .map(|round| total_count(round.counts()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRow {
    pub name: String,
    pub total: u32,
    pub rounds: Vec<u32>,
    pub probability: f64,
}

/// Everything a presentation layer renders for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerReport {
    pub mode: &'static str,
    pub open_round: usize,
    pub cities: Vec<CityRow>,
    pub deck_total: u64,
    pub round_totals: Vec<u64>,
}

impl TrackerReport {
    pub fn capture(tracker: &Tracker) -> Self {
        let state = tracker.state();
        let odds = tracker.probabilities();
        let totals = Totals::from_state(state);

        let cities = state
            .deck()
            .iter()
            .zip(odds.weights())
            .map(|((id, name, total), probability)| CityRow {
                name: name.to_string(),
                total,
                rounds: state.rounds().iter().map(|round| round.count(id)).collect(),
                probability,
            })
            .collect();

        Self {
            mode: tracker.mode().as_str(),
            open_round: state.open_round_index(),
            cities,
            deck_total: totals.deck_total,
            round_totals: totals.rounds,
        }
    }

    pub fn to_json(tracker: &Tracker) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(tracker))
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackerReport, Totals};
    use crate::game::tracker::Tracker;

    #[test]
    fn totals_cover_deck_and_every_round() {
        let tracker = Tracker::standard()
            .record_draw("Atlanta")
            .unwrap()
            .declare_epidemic()
            .unwrap()
            .select_epidemic_city(Some("Denver"))
            .unwrap()
            .record_draw("Atlanta")
            .unwrap();
        let totals = Totals::from_state(tracker.state());
        assert_eq!(totals.deck_total, 39);
        assert_eq!(totals.rounds, vec![2, 1]);
        assert_eq!(totals.deck[0], ("Atlanta".to_string(), 3));
    }

    #[test]
    fn report_rows_follow_deck_order() {
        let report = Tracker::standard().report();
        assert_eq!(report.mode, "tracking");
        assert_eq!(report.cities.len(), 14);
        assert_eq!(report.cities[0].name, "Atlanta");
        assert_eq!(report.cities[0].rounds, vec![0]);
        assert!((report.cities[0].probability - 3.0 / 39.0).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_to_json() {
        let tracker = Tracker::standard().declare_epidemic().unwrap();
        let json = TrackerReport::to_json(&tracker).unwrap();
        assert!(json.contains("\"mode\": \"selecting_epidemic_city\""));
        assert!(json.contains("\"deck_total\": 39"));
    }
}
