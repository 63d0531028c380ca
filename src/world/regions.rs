//! Region definitions for every tile kind on the map.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    Village,
    Forest,
    Lake,
    Mountain,
    Cave,
}

/// Static properties of a region.
#[derive(Debug, Clone)]
pub struct Region {
    pub kind: RegionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub monsters: &'static [&'static str],
    /// Scales monster stats and rewards (1 = easiest).
    pub difficulty: u32,
    pub has_shop: bool,
}

static REGIONS: [Region; 5] = [
    Region {
        kind: RegionKind::Village,
        name: "Village",
        description: "A quiet village with a well-stocked shop.",
        monsters: &["Rat", "Stray Dog"],
        difficulty: 1,
        has_shop: true,
    },
    Region {
        kind: RegionKind::Forest,
        name: "Whispering Forest",
        description: "Tall trees murmur secrets in the wind.",
        monsters: &["Wolf", "Goblin", "Giant Spider"],
        difficulty: 1,
        has_shop: false,
    },
    Region {
        kind: RegionKind::Lake,
        name: "Misty Lake",
        description: "Fog hangs low over still, dark water.",
        monsters: &["Water Sprite", "Giant Frog", "Lake Serpent"],
        difficulty: 2,
        has_shop: false,
    },
    Region {
        kind: RegionKind::Mountain,
        name: "Stormy Peaks",
        description: "Jagged cliffs under a restless sky.",
        monsters: &["Harpy", "Rock Golem", "Mountain Troll"],
        difficulty: 3,
        has_shop: false,
    },
    Region {
        kind: RegionKind::Cave,
        name: "Shadow Cave",
        description: "Something breathes in the dark below.",
        monsters: &["Bat Swarm", "Cave Troll", "Shadow Wraith"],
        difficulty: 4,
        has_shop: false,
    },
];

/// Region kinds that may be placed anywhere except the starting tile.
pub const WILD_REGIONS: [RegionKind; 4] = [
    RegionKind::Forest,
    RegionKind::Lake,
    RegionKind::Mountain,
    RegionKind::Cave,
];

pub fn get_region(kind: RegionKind) -> &'static Region {
    let index = match kind {
        RegionKind::Village => 0,
        RegionKind::Forest => 1,
        RegionKind::Lake => 2,
        RegionKind::Mountain => 3,
        RegionKind::Cave => 4,
    };
    &REGIONS[index]
}

pub fn get_all_regions() -> &'static [Region] {
    &REGIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_kind() {
        for region in get_all_regions() {
            assert_eq!(get_region(region.kind).kind, region.kind);
        }
    }

    #[test]
    fn test_every_region_has_monsters_and_difficulty() {
        for region in get_all_regions() {
            assert!(!region.monsters.is_empty(), "{} has no monsters", region.name);
            assert!(region.difficulty >= 1);
        }
    }

    #[test]
    fn test_only_village_has_shop() {
        let shops: Vec<_> = get_all_regions().iter().filter(|r| r.has_shop).collect();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].kind, RegionKind::Village);
        assert!(!WILD_REGIONS.contains(&RegionKind::Village));
    }
}
