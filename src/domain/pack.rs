use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::{PackId, SeatIndex};

/// Карта, положенная в конкретный пак.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PackCard {
    /// Уникален в рамках драфта, см. `infra::ids::instance_id`.
    pub instance_id: String,
    pub pack_id: PackId,
    pub card: Card,
}

impl PackCard {
    pub fn card_id(&self) -> &str {
        &self.card.id
    }
}

/// Бустер. В домене: упорядоченный список карт.
/// Собирает его `engine::pack_gen`, НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pack {
    pub id: PackId,
    pub round: u8,
    /// Место, которому пак выдан в начале раунда.
    pub origin_seat: SeatIndex,
    pub cards: Vec<PackCard>,
}

impl Pack {
    pub fn new(id: PackId, round: u8, origin_seat: SeatIndex, cards: Vec<PackCard>) -> Self {
        Self {
            id,
            round,
            origin_seat,
            cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.card.id == card_id)
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.card.id.as_str()).collect()
    }

    /// Вынуть карту из пака. Порядок остальных карт сохраняется.
    pub fn take(&mut self, card_id: &str) -> Option<PackCard> {
        let idx = self.cards.iter().position(|c| c.card.id == card_id)?;
        Some(self.cards.remove(idx))
    }
}
