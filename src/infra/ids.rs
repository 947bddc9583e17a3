//! Детерминированные идентификаторы драфта.
//!
//! Никаких счётчиков и глобального состояния: любой ID: чистая функция
//! от позиции в драфте, поэтому реплей воспроизводит их байт в байт.

use crate::domain::{PackId, PlayerId, SeatIndex};

/// Префикс ID ботов. По нему при загрузке восстанавливается `is_bot`.
pub const BOT_ID_PREFIX: &str = "bot_";

/// Префикс ID живого игрока.
pub const HUMAN_ID_PREFIX: &str = "player_";

/// ID пака: `r<round>s<seat>`.
pub fn pack_id(round: u8, seat: SeatIndex) -> PackId {
    format!("r{round}s{seat}")
}

/// ID экземпляра карты в паке: `<pack_id>:<slot>:<card_id>`.
///
/// Одинаковые карты в разных паках получают разные ID.
pub fn instance_id(pack_id: &str, slot: &str, card_id: &str) -> String {
    format!("{pack_id}:{slot}:{card_id}")
}

pub fn human_player_id(seat: SeatIndex) -> PlayerId {
    format!("{HUMAN_ID_PREFIX}{seat}")
}

pub fn bot_player_id(seat: SeatIndex) -> PlayerId {
    format!("{BOT_ID_PREFIX}{seat}")
}

pub fn is_bot_player_id(player_id: &str) -> bool {
    player_id.starts_with(BOT_ID_PREFIX)
}

/// ID события пика: `<seed>#<overall_pick>`. Не хранится, считается на лету.
pub fn event_id(seed: &str, overall_pick: u32) -> String {
    format!("{seed}#{overall_pick}")
}

/// Метка под-потока RNG для решений бота на конкретном месте.
pub fn bot_stream_label(seat: SeatIndex) -> String {
    format!("{BOT_ID_PREFIX}{seat}")
}

/// Метка под-потока для конкретного пика внутри потока бота.
pub fn pick_stream_label(round: u8, pick: u8) -> String {
    format!("r{round}p{pick}")
}
