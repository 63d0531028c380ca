//! World map and region data.

pub mod map;
pub mod regions;

pub use map::{Direction, Position, WorldMap};
pub use regions::{get_all_regions, get_region, Region, RegionKind};
