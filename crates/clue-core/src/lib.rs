#![deny(warnings)]
pub mod belief;
pub mod board;
pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "clue-core"
    }

    pub const fn codename() -> &'static str {
        "Envelope"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
