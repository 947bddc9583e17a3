//! Доменная модель драфта: карты, паки, игроки, конфиг.

pub mod card;
pub mod config;
pub mod pack;
pub mod player;

// Базовые идентификаторы
pub type CardId = String;
pub type PackId = String;
pub type PlayerId = String;

/// Индекс места за столом драфта (0..player_count-1).
pub type SeatIndex = u8;

pub use card::*;
pub use config::*;
pub use pack::*;
pub use player::*;
