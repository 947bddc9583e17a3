use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PlayerId};
use crate::infra::ids::{event_id, is_bot_player_id};

/// Тип события в логе драфта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Pick,
}

/// Одна записанная волна пиков: выбор человека.
///
/// Пики ботов в той же волне не пишутся: реплей выводит их заново
/// из seed. После записи дельта не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Delta {
    pub event_type: DeltaKind,
    pub round: u8,
    pub pick: u8,
    /// Абсолютный номер пика, с 1.
    pub overall_pick: u32,
    pub card_id: CardId,
    pub player_id: PlayerId,
    /// Unix-время в миллисекундах. На состояние не влияет.
    pub timestamp: u64,
    pub pick_time_ms: Option<u64>,
}

impl Delta {
    pub fn pick(
        round: u8,
        pick: u8,
        picks_per_round: u8,
        card_id: impl Into<CardId>,
        player_id: impl Into<PlayerId>,
        timestamp: u64,
    ) -> Self {
        Self {
            event_type: DeltaKind::Pick,
            round,
            pick,
            overall_pick: overall_pick(round, pick, picks_per_round),
            card_id: card_id.into(),
            player_id: player_id.into(),
            timestamp,
            pick_time_ms: None,
        }
    }

    pub fn with_pick_time(mut self, pick_time_ms: u64) -> Self {
        self.pick_time_ms = Some(pick_time_ms);
        self
    }

    pub fn is_bot(&self) -> bool {
        is_bot_player_id(&self.player_id)
    }

    pub fn event_id(&self, seed: &str) -> String {
        event_id(seed, self.overall_pick)
    }
}

/// `(round - 1) * picks_per_round + pick`.
pub fn overall_pick(round: u8, pick: u8, picks_per_round: u8) -> u32 {
    (round.saturating_sub(1) as u32) * picks_per_round as u32 + pick as u32
}
