//! Draw probabilities derived from a [`DeckState`](crate::game::DeckState).
//!
//! - `calculator`: pure functions for the remaining-deck and epidemic-selection odds.
//! - `sampler`: weighted previews of the next draw.

pub mod calculator;
pub mod sampler;

pub use calculator::{
    CityOdds, difference, epidemic_selection_probabilities, infected_cities, normalize,
    remaining_deck_probabilities, total_count,
};
pub use sampler::OddsSampler;
