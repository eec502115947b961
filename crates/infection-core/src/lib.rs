#![deny(warnings)]
pub mod game;
pub mod model;
pub mod odds;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "infection-odds"
    }

    pub const fn codename() -> &'static str {
        "Pandemic Calculator"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "infection-odds");
        assert_eq!(AppInfo::codename(), "Pandemic Calculator");
        assert!(!AppInfo::version().is_empty());
    }
}
