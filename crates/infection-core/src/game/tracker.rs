use super::error::TrackerError;
use super::intent::Intent;
use super::report::{TrackerReport, Totals};
use super::state::DeckState;
use crate::model::deck::InfectionDeck;
use crate::odds::calculator::{
    CityOdds, epidemic_selection_probabilities, remaining_deck_probabilities,
};
use serde::Serialize;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Tracking,
    SelectingEpidemicCity,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Tracking => "tracking",
            Mode::SelectingEpidemicCity => "selecting_epidemic_city",
        }
    }
}

/// Session state machine over a [`DeckState`].
///
/// `Tracking` accumulates observations in the open round. After
/// `DeclareEpidemic` the tracker waits in `SelectingEpidemicCity` for the
/// city whose card triggered it; only selection or cancellation is accepted
/// there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "state", rename_all = "snake_case")]
pub enum Tracker {
    Tracking(DeckState),
    SelectingEpidemicCity(DeckState),
}

impl Tracker {
    pub fn new(deck: InfectionDeck) -> Self {
        Tracker::Tracking(DeckState::new(deck))
    }

    pub fn standard() -> Self {
        Self::new(InfectionDeck::standard())
    }

    pub fn state(&self) -> &DeckState {
        match self {
            Tracker::Tracking(state) | Tracker::SelectingEpidemicCity(state) => state,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Tracker::Tracking(_) => Mode::Tracking,
            Tracker::SelectingEpidemicCity(_) => Mode::SelectingEpidemicCity,
        }
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, Tracker::SelectingEpidemicCity(_))
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.state().cities()
    }

    /// Odds shown for the current mode.
    pub fn probabilities(&self) -> CityOdds {
        match self {
            Tracker::Tracking(state) => remaining_deck_probabilities(state),
            Tracker::SelectingEpidemicCity(state) => epidemic_selection_probabilities(state),
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::from_state(self.state())
    }

    pub fn report(&self) -> TrackerReport {
        TrackerReport::capture(self)
    }

    /// Applies `intent`, returning the next tracker. `self` is left intact
    /// whether or not the intent is accepted.
    pub fn apply(&self, intent: Intent) -> Result<Self, TrackerError> {
        let label = intent.label();
        let next = match self {
            Tracker::Tracking(state) => Self::track(state, intent),
            Tracker::SelectingEpidemicCity(state) => Self::select(state, intent),
        }?;

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "infection_core::tracker",
                Level::DEBUG,
                intent = label,
                mode = next.mode().as_str(),
                rounds = next.state().round_count(),
                open_total = next.state().open_round().total(),
            );
        }
        Ok(next)
    }

    pub fn adjust_deck_count(&self, city: &str, delta: i64) -> Result<Self, TrackerError> {
        self.apply(Intent::AdjustDeckCount {
            city: city.to_string(),
            delta,
        })
    }

    pub fn add_city(&self, name: &str) -> Result<Self, TrackerError> {
        self.apply(Intent::AddCity {
            name: name.to_string(),
        })
    }

    pub fn adjust_round_count(
        &self,
        round: usize,
        city: &str,
        delta: i64,
    ) -> Result<Self, TrackerError> {
        self.apply(Intent::AdjustRoundCount {
            round,
            city: city.to_string(),
            delta,
        })
    }

    pub fn record_draw(&self, city: &str) -> Result<Self, TrackerError> {
        self.apply(Intent::RecordDraw {
            city: city.to_string(),
        })
    }

    pub fn retract_draw(&self, city: &str) -> Result<Self, TrackerError> {
        self.apply(Intent::RetractDraw {
            city: city.to_string(),
        })
    }

    pub fn declare_epidemic(&self) -> Result<Self, TrackerError> {
        self.apply(Intent::DeclareEpidemic)
    }

    pub fn select_epidemic_city(&self, city: Option<&str>) -> Result<Self, TrackerError> {
        self.apply(Intent::SelectEpidemicCity {
            city: city.map(str::to_string),
        })
    }

    pub fn undo_last_epidemic(&self) -> Result<Self, TrackerError> {
        self.apply(Intent::UndoLastEpidemic)
    }

    fn track(state: &DeckState, intent: Intent) -> Result<Self, TrackerError> {
        let open = state.open_round_index();
        let next = match intent {
            Intent::AdjustDeckCount { city, delta } => {
                state.with_adjusted_city_total(&city, delta)?
            }
            Intent::SetDeckCount { city, count } => state.with_city_total(&city, count)?,
            Intent::AddCity { name } => state.with_city(&name)?,
            Intent::AdjustRoundCount { round, city, delta } => {
                state.with_adjusted_round_count(round, &city, delta)?
            }
            Intent::SetRoundCount { round, city, count } => {
                state.with_round_count(round, &city, count)?
            }
            Intent::RecordDraw { city } => {
                state.city(&city)?;
                let odds = remaining_deck_probabilities(state);
                if odds.get(&city).unwrap_or(0.0) <= 0.0 {
                    return Err(TrackerError::NoCopiesRemaining(city));
                }
                state.with_adjusted_round_count(open, &city, 1)?
            }
            Intent::RetractDraw { city } => state.with_adjusted_round_count(open, &city, -1)?,
            Intent::DeclareEpidemic => {
                return Ok(Tracker::SelectingEpidemicCity(state.clone()));
            }
            Intent::UndoLastEpidemic => match state.without_open_round() {
                Some(previous) => previous,
                None => {
                    event!(
                        target: "infection_core::tracker",
                        Level::DEBUG,
                        "undo ignored: only the initial round is recorded"
                    );
                    state.clone()
                }
            },
            Intent::SelectEpidemicCity { .. } | Intent::CancelEpidemicSelection => {
                return Err(TrackerError::NoEpidemicPending);
            }
        };
        Ok(Tracker::Tracking(next))
    }

    fn select(state: &DeckState, intent: Intent) -> Result<Self, TrackerError> {
        match intent {
            Intent::SelectEpidemicCity { city: Some(city) } => {
                let id = state.city(&city)?;
                Ok(Tracker::Tracking(state.with_epidemic_closed(id)))
            }
            Intent::SelectEpidemicCity { city: None } | Intent::CancelEpidemicSelection => {
                Ok(Tracker::Tracking(state.clone()))
            }
            _ => Err(TrackerError::EpidemicPending),
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::standard()
    }
}
