use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::CardPool;
use crate::domain::player::Personality;

/// Доля мификов в слоте редкой карты по умолчанию (1 из 8 бустеров).
pub const DEFAULT_MYTHIC_RATE: f64 = 0.125;

/// Ошибки конфигурации драфта.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Количество игроков должно быть от 1 до {max}, получено {got}")]
    PlayerCount { got: u8, max: u8 },

    #[error("Количество раундов должно быть больше нуля")]
    NoRounds,

    #[error("Количество пиков за раунд должно быть больше нуля")]
    NoPicks,

    #[error("Пиков за раунд ({picks}) больше, чем карт в паке ({pack_size})")]
    PicksExceedPackSize { picks: u8, pack_size: usize },

    #[error("Раскладка пака некорректна: {0}")]
    InvalidLayout(String),

    #[error("Линейка ботов пуста")]
    EmptyBotLineup,
}

/// Раскладка бустера по слотам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PackLayout {
    pub pack_size: usize,
    /// Сколько uncommon. Слот rare/mythic всегда один, остальное: common.
    pub uncommon_slots: usize,
    /// Вероятность заменить rare на mythic.
    pub mythic_rate: f64,
}

impl PackLayout {
    pub fn common_slots(&self) -> usize {
        self.pack_size.saturating_sub(1 + self.uncommon_slots)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pack_size < 1 + self.uncommon_slots {
            return Err(ConfigError::InvalidLayout(format!(
                "pack_size {} не вмещает 1 rare и {} uncommon",
                self.pack_size, self.uncommon_slots
            )));
        }
        if !(0.0..=1.0).contains(&self.mythic_rate) {
            return Err(ConfigError::InvalidLayout(format!(
                "mythic_rate {} вне [0, 1]",
                self.mythic_rate
            )));
        }
        Ok(())
    }
}

impl Default for PackLayout {
    fn default() -> Self {
        Self {
            pack_size: 15,
            uncommon_slots: 3,
            mythic_rate: DEFAULT_MYTHIC_RATE,
        }
    }
}

/// Конфиг драфта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DraftConfig {
    pub pool: CardPool,
    /// Всего игроков: 1 человек + (player_count - 1) ботов.
    pub player_count: u8,
    pub rounds: u8,
    pub picks_per_round: u8,
    pub layout: PackLayout,
    /// Характеры ботов; бот на месте `seat` получает `bot_lineup[(seat - 1) % len]`.
    pub bot_lineup: Vec<Personality>,
}

impl DraftConfig {
    pub const MAX_PLAYERS: u8 = 16;

    /// Стандартный драфт: 8 игроков, 3 пака по 15 карт.
    pub fn new(pool: CardPool) -> Self {
        Self {
            pool,
            player_count: 8,
            rounds: 3,
            picks_per_round: 15,
            layout: PackLayout::default(),
            bot_lineup: Personality::default_lineup(),
        }
    }

    pub fn with_players(mut self, player_count: u8) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    /// Меняет и размер пака, и число пиков за раунд.
    pub fn with_pack_size(mut self, pack_size: u8) -> Self {
        self.layout.pack_size = pack_size as usize;
        self.picks_per_round = pack_size;
        self
    }

    pub fn with_mythic_rate(mut self, rate: f64) -> Self {
        self.layout.mythic_rate = rate;
        self
    }

    pub fn with_bot_lineup(mut self, lineup: Vec<Personality>) -> Self {
        self.bot_lineup = lineup;
        self
    }

    pub fn set_code(&self) -> &str {
        &self.pool.set_code
    }

    /// Всего пиков одного игрока за драфт.
    pub fn total_picks(&self) -> usize {
        self.rounds as usize * self.picks_per_round as usize
    }

    pub fn personality_for_seat(&self, seat: u8) -> Personality {
        if seat == 0 || self.bot_lineup.is_empty() {
            return Personality::default();
        }
        let idx = (seat as usize - 1) % self.bot_lineup.len();
        self.bot_lineup[idx].clone()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > Self::MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                got: self.player_count,
                max: Self::MAX_PLAYERS,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.picks_per_round == 0 {
            return Err(ConfigError::NoPicks);
        }
        self.layout.validate()?;
        // Паки выбираются синхронно, так что при picks <= pack_size
        // пустой пак встречается только после последнего пика раунда.
        if self.picks_per_round as usize > self.layout.pack_size {
            return Err(ConfigError::PicksExceedPackSize {
                picks: self.picks_per_round,
                pack_size: self.layout.pack_size,
            });
        }
        if self.player_count > 1 && self.bot_lineup.is_empty() {
            return Err(ConfigError::EmptyBotLineup);
        }
        Ok(())
    }
}
