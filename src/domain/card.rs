use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::CardId;

/// Редкость карты (словарь Scryfall).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
}

impl Rarity {
    pub fn is_rare_or_mythic(&self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Mythic)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
        };
        f.write_str(s)
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "mythic" => Ok(Rarity::Mythic),
            "special" => Ok(Rarity::Special),
            "bonus" => Ok(Rarity::Bonus),
            other => Err(format!("Invalid rarity: {other}")),
        }
    }
}

fn default_booster() -> bool {
    true
}

/// Карта из пула сета.
///
/// Движку нужны только `id`, `rarity` и `booster`. Поля `cmc`, `type_line`,
/// `oracle_text`, `color_identity` читает эвристика ботов; всё остальное
/// (картинки, flavor и т.п.) лежит в `extra` как есть.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub name: String,
    pub rarity: Rarity,
    /// Может ли карта попасть в бустер.
    #[serde(default = "default_booster")]
    pub booster: bool,
    #[serde(default)]
    pub cmc: f32,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    /// Цвета вида "W", "U", "B", "R", "G".
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, rarity: Rarity) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            rarity,
            booster: true,
            cmc: 0.0,
            type_line: String::new(),
            oracle_text: String::new(),
            color_identity: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = type_line.into();
        self
    }

    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.color_identity = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn not_in_boosters(mut self) -> Self {
        self.booster = false;
        self
    }

    pub fn is_creature(&self) -> bool {
        self.type_line.to_lowercase().contains("creature")
    }
}

/// Входные данные сета: `{set_code, cards}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardPool {
    pub set_code: String,
    #[serde(default)]
    pub set_name: String,
    pub cards: Vec<Card>,
}

impl CardPool {
    pub fn new(set_code: impl Into<String>, cards: Vec<Card>) -> Self {
        let set_code = set_code.into();
        Self {
            set_name: set_code.clone(),
            set_code,
            cards,
        }
    }

    /// Разобрать JSON сета.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Синтетический пул для тестов и dev-CLI.
    ///
    /// ID вида `<set>-r003`, `<set>-u017`, цвета и типы раскладываются по кругу,
    /// каждая пятая common: creature, каждая седьмая: removal.
    pub fn synthetic(
        set_code: &str,
        mythics: usize,
        rares: usize,
        uncommons: usize,
        commons: usize,
    ) -> Self {
        const COLORS: [&str; 5] = ["W", "U", "B", "R", "G"];

        let mut cards = Vec::with_capacity(mythics + rares + uncommons + commons);
        let groups = [
            (Rarity::Mythic, 'm', mythics),
            (Rarity::Rare, 'r', rares),
            (Rarity::Uncommon, 'u', uncommons),
            (Rarity::Common, 'c', commons),
        ];

        for (rarity, tag, count) in groups {
            for i in 0..count {
                let id = format!("{}-{}{:03}", set_code.to_lowercase(), tag, i);
                let type_line = if i % 5 == 0 { "Creature — Soldier" } else { "Instant" };
                let oracle = if i % 7 == 0 { "Destroy target creature." } else { "" };
                cards.push(
                    Card::new(id, rarity)
                        .with_type_line(type_line)
                        .with_oracle_text(oracle)
                        .with_colors(&[COLORS[i % COLORS.len()]]),
                );
            }
        }

        CardPool::new(set_code, cards)
    }
}
