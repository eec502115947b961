pub mod error;
pub mod intent;
pub mod report;
pub mod state;
pub mod tracker;

pub use error::TrackerError;
pub use intent::Intent;
pub use report::{CityRow, TrackerReport, Totals};
pub use state::DeckState;
pub use tracker::{Mode, Tracker};
