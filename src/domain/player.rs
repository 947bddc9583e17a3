use serde::{Deserialize, Serialize};

use crate::domain::pack::{Pack, PackCard};
use crate::domain::{PlayerId, SeatIndex};
use crate::infra::ids::{bot_player_id, human_player_id};

/// Характер бота: чистые данные, решение принимает `bots::PickStrategy`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Personality {
    /// Тег для отображения / хранения: "bronze", "silver", ...
    pub name: String,
    /// 0..1: насколько часто бот берёт лучшую по своей оценке карту.
    pub skill_level: f64,
    /// 0..1: шум в оценке карты.
    pub randomness: f64,
    /// Множитель оценки для rare/mythic.
    pub rare_bias: f64,
    /// 0..1: бонус за карты уже собранных цветов.
    pub color_commitment: f64,
}

impl Personality {
    pub fn bronze() -> Self {
        Self::preset("bronze", 0.3, 0.4, 1.5, 0.5)
    }

    pub fn silver() -> Self {
        Self::preset("silver", 0.5, 0.3, 1.2, 0.7)
    }

    pub fn gold() -> Self {
        Self::preset("gold", 0.7, 0.2, 1.0, 0.85)
    }

    pub fn mythic() -> Self {
        Self::preset("mythic", 0.9, 0.1, 0.9, 0.95)
    }

    /// Пресет по тегу (без учёта регистра).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bronze" => Some(Self::bronze()),
            "silver" => Some(Self::silver()),
            "gold" => Some(Self::gold()),
            "mythic" => Some(Self::mythic()),
            _ => None,
        }
    }

    /// Линейка ботов по умолчанию.
    pub fn default_lineup() -> Vec<Self> {
        vec![Self::bronze(), Self::silver(), Self::gold(), Self::mythic()]
    }

    fn preset(
        name: &str,
        skill_level: f64,
        randomness: f64,
        rare_bias: f64,
        color_commitment: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            skill_level,
            randomness,
            rare_bias,
            color_commitment,
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::silver()
    }
}

/// Участник драфта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DraftPlayer {
    pub id: PlayerId,
    pub seat: SeatIndex,
    pub is_human: bool,
    /// Только у ботов.
    pub personality: Option<Personality>,
    /// Пак, из которого игрок выбирает сейчас. `None`: паков нет
    /// (драфт не начат, пак выбран до конца или драфт завершён).
    pub current_pack: Option<Pack>,
    /// Все выбранные карты по порядку.
    pub picked_cards: Vec<PackCard>,
}

impl DraftPlayer {
    pub fn human(seat: SeatIndex) -> Self {
        Self {
            id: human_player_id(seat),
            seat,
            is_human: true,
            personality: None,
            current_pack: None,
            picked_cards: Vec::new(),
        }
    }

    pub fn bot(seat: SeatIndex, personality: Personality) -> Self {
        Self {
            id: bot_player_id(seat),
            seat,
            is_human: false,
            personality: Some(personality),
            current_pack: None,
            picked_cards: Vec::new(),
        }
    }

    pub fn pack_len(&self) -> usize {
        self.current_pack.as_ref().map(Pack::len).unwrap_or(0)
    }

    /// Сколько карт игрок взял из паков раунда `round`.
    pub fn picks_in_round(&self, round: u8) -> usize {
        let prefix = format!("r{round}s");
        self.picked_cards
            .iter()
            .filter(|c| c.pack_id.starts_with(&prefix))
            .count()
    }
}
