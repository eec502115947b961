use thiserror::Error;

/// Reasons an intent is refused. The state it was applied to is left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("city name must not be blank")]
    InvalidCityName,
    #[error("round R{} does not exist ({len} rounds recorded)", .index + 1)]
    RoundOutOfRange { index: usize, len: usize },
    #[error("{city}: adjusting {current} by {delta} would go below zero")]
    NegativeCount {
        city: String,
        current: u32,
        delta: i64,
    },
    #[error("{city}: adjusting {current} by {delta} exceeds the largest count")]
    CountOverflow {
        city: String,
        current: u32,
        delta: i64,
    },
    #[error("no copies of {0} are expected in the draw pile")]
    NoCopiesRemaining(String),
    #[error("an epidemic is waiting for its city to be selected")]
    EpidemicPending,
    #[error("no epidemic has been declared")]
    NoEpidemicPending,
}
