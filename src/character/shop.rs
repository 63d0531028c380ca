//! Shop catalog.

use super::inventory::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub kind: ItemKind,
    pub name: &'static str,
    pub price: u32,
    pub effect: &'static str,
}

pub static SHOP_CATALOG: [ShopItem; 3] = [
    ShopItem {
        kind: ItemKind::HealthPotion,
        name: "Health Potion",
        price: 20,
        effect: "Restores 50 HP",
    },
    ShopItem {
        kind: ItemKind::DamageBooster,
        name: "Damage Booster",
        price: 30,
        effect: "+5 attack for the current fight",
    },
    ShopItem {
        kind: ItemKind::EnergyPotion,
        name: "Energy Potion",
        price: 25,
        effect: "Restores 5 energy",
    },
];

pub fn shop_item(kind: ItemKind) -> &'static ShopItem {
    match kind {
        ItemKind::HealthPotion => &SHOP_CATALOG[0],
        ItemKind::DamageBooster => &SHOP_CATALOG[1],
        ItemKind::EnergyPotion => &SHOP_CATALOG[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_item_kind_is_sold() {
        for kind in ItemKind::all() {
            assert_eq!(shop_item(kind).kind, kind);
            assert!(shop_item(kind).price > 0);
        }
    }

    #[test]
    fn test_health_potion_price() {
        assert_eq!(shop_item(ItemKind::HealthPotion).price, 20);
    }
}
