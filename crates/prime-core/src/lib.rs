#![deny(warnings)]
pub mod game;
pub mod model;
pub mod prime;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "prime-daihinmin"
    }

    pub const fn codename() -> &'static str {
        "akemi"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
