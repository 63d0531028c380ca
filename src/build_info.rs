//! Version details baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `0.1.0 (2026-10-19, abc1234)`
pub fn version_string() -> String {
    format!("{} ({}, {})", PACKAGE_VERSION, BUILD_DATE, BUILD_COMMIT)
}
