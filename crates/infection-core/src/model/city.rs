use core::fmt;
use serde::{Deserialize, Serialize};

/// Dense position of a city in the infection deck, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CityId(usize);

impl CityId {
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Normalises a user-entered city name. Returns `None` for blank input.
pub fn normalize_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{CityId, normalize_name};

    #[test]
    fn index_roundtrip() {
        for i in 0..14 {
            assert_eq!(CityId::from_index(i).index(), i);
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("  Hong Kong "), Some("Hong Kong"));
    }
}
