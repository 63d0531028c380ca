//! Player entity, inventory and shop catalog.

pub mod inventory;
pub mod player;
pub mod shop;

pub use inventory::{Inventory, ItemKind};
pub use player::Player;
pub use shop::{shop_item, ShopItem, SHOP_CATALOG};
