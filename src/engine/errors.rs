use crate::domain::{CardId, ConfigError, PlayerId, Rarity};
use crate::engine::draft::DraftStatus;
use crate::infra::rng::RngError;

use thiserror::Error;

/// Ошибки генерации паков.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackError {
    #[error("В пуле не хватает карт {rarity}: нужно {needed}, доступно {available}")]
    InsufficientPool {
        rarity: Rarity,
        needed: usize,
        available: usize,
    },

    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Ошибки машины состояний драфта и реплея.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DraftError {
    #[error("Переход `{action}` недопустим из состояния {from:?}")]
    InvalidTransition {
        from: DraftStatus,
        action: &'static str,
    },

    #[error("Игрок {0} не найден")]
    PlayerNotFound(PlayerId),

    #[error("Карты {card_id} нет в текущем паке игрока {player_id}")]
    CardNotFound { card_id: CardId, player_id: PlayerId },

    #[error("У игрока {0} нет карт для выбора")]
    PackExhausted(PlayerId),

    #[error("Пик игрока {0} записывается только как часть волны человека")]
    BotDelta(PlayerId),

    #[error(
        "Пик не по порядку: ожидали раунд {expected_round}, пик {expected_pick}, \
         получили раунд {round}, пик {pick} (overall {overall_pick})"
    )]
    DeltaOutOfSequence {
        expected_round: u8,
        expected_pick: u8,
        round: u8,
        pick: u8,
        overall_pick: u32,
    },

    #[error("Позиция {target} за пределами лога длиной {available}")]
    PositionOutOfRange { target: usize, available: usize },

    #[error("Реплей разошёлся с логом: игрок {player_id} сделал {actual} пиков вместо {expected}")]
    ReplayMismatch {
        player_id: PlayerId,
        expected: usize,
        actual: usize,
    },

    #[error("Некорректный конфиг: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Rng(#[from] RngError),
}
