use std::collections::HashSet;

use crate::domain::{Card, CardPool, Pack, PackCard, PackLayout, Rarity, SeatIndex};
use crate::engine::errors::PackError;
use crate::infra::ids::{instance_id, pack_id};
use crate::infra::rng::SeededRandom;

/// Метка под-потока, из которого собираются все паки драфта.
pub const PACK_STREAM_LABEL: &str = "packs";

/// Карты пула, разложенные по редкостям.
///
/// Только `booster == true`, без дублей по id, в порядке пула:
/// порядок корзин: часть контракта детерминизма.
#[derive(Clone, Debug)]
struct RarityBuckets<'a> {
    mythics: Vec<&'a Card>,
    rares: Vec<&'a Card>,
    uncommons: Vec<&'a Card>,
    commons: Vec<&'a Card>,
}

impl<'a> RarityBuckets<'a> {
    fn from_pool(pool: &'a CardPool) -> Self {
        let mut seen = HashSet::new();
        let mut buckets = Self {
            mythics: Vec::new(),
            rares: Vec::new(),
            uncommons: Vec::new(),
            commons: Vec::new(),
        };

        for card in pool.cards.iter().filter(|c| c.booster) {
            if !seen.insert(card.id.as_str()) {
                continue;
            }
            match card.rarity {
                Rarity::Mythic => buckets.mythics.push(card),
                Rarity::Rare => buckets.rares.push(card),
                Rarity::Uncommon => buckets.uncommons.push(card),
                Rarity::Common => buckets.commons.push(card),
                // special/bonus в обычный бустер не кладём
                Rarity::Special | Rarity::Bonus => {}
            }
        }

        buckets
    }
}

/// Сборщик бустеров из пула.
pub struct PackGenerator<'a> {
    layout: &'a PackLayout,
    buckets: RarityBuckets<'a>,
}

impl<'a> PackGenerator<'a> {
    pub fn new(pool: &'a CardPool, layout: &'a PackLayout) -> Self {
        Self {
            layout,
            buckets: RarityBuckets::from_pool(pool),
        }
    }

    /// Собрать один пак на потоке `rng`.
    ///
    /// Порядок обращений к RNG фиксирован: `next()` для слота rare/mythic,
    /// `choice` для него же, `sample` uncommon, `sample` common, `shuffle`.
    pub fn generate_pack(
        &self,
        id: &str,
        rng: &mut SeededRandom,
    ) -> Result<Vec<PackCard>, PackError> {
        let mut placed: Vec<PackCard> = Vec::with_capacity(self.layout.pack_size);
        let mut used: HashSet<&str> = HashSet::new();

        // Слот rare/mythic.
        let roll = rng.next();
        let want_mythic = !self.buckets.mythics.is_empty() && roll < self.layout.mythic_rate;
        let (primary, fallback) = if want_mythic {
            (&self.buckets.mythics, &self.buckets.rares)
        } else {
            (&self.buckets.rares, &self.buckets.mythics)
        };
        let bucket = if primary.is_empty() { fallback } else { primary };
        if bucket.is_empty() {
            return Err(PackError::InsufficientPool {
                rarity: Rarity::Rare,
                needed: 1,
                available: 0,
            });
        }
        let rare = *rng.choice(bucket)?;
        used.insert(rare.id.as_str());
        placed.push(place(id, "rare".to_string(), rare));

        // Uncommon и common.
        let slots = [
            (Rarity::Uncommon, &self.buckets.uncommons, self.layout.uncommon_slots),
            (Rarity::Common, &self.buckets.commons, self.layout.common_slots()),
        ];
        for (rarity, bucket, needed) in slots {
            let candidates: Vec<&Card> = bucket
                .iter()
                .copied()
                .filter(|c| !used.contains(c.id.as_str()))
                .collect();
            if candidates.len() < needed {
                return Err(PackError::InsufficientPool {
                    rarity,
                    needed,
                    available: candidates.len(),
                });
            }
            for (slot, card) in rng.sample(&candidates, needed)?.into_iter().enumerate() {
                used.insert(card.id.as_str());
                placed.push(place(id, format!("{rarity}{slot}"), card));
            }
        }

        Ok(rng.shuffle(&placed))
    }

    /// Все паки драфта: `packs[round - 1][seat]`.
    ///
    /// Один поток от seed, обход раунд за раундом, внутри: по местам.
    /// Порядок обхода: часть контракта детерминизма.
    pub fn generate_draft(
        &self,
        seed: &str,
        rounds: u8,
        player_count: u8,
    ) -> Result<Vec<Vec<Pack>>, PackError> {
        let mut rng = SeededRandom::new(seed).derive(PACK_STREAM_LABEL);
        let mut all = Vec::with_capacity(rounds as usize);

        for round in 1..=rounds {
            let mut round_packs = Vec::with_capacity(player_count as usize);
            for seat in 0..player_count {
                round_packs.push(self.build(round, seat, &mut rng)?);
            }
            all.push(round_packs);
        }

        Ok(all)
    }

    fn build(&self, round: u8, seat: SeatIndex, rng: &mut SeededRandom) -> Result<Pack, PackError> {
        let id = pack_id(round, seat);
        let cards = self.generate_pack(&id, rng)?;
        Ok(Pack::new(id, round, seat, cards))
    }
}

fn place(pack_id: &str, slot: String, card: &Card) -> PackCard {
    PackCard {
        instance_id: instance_id(pack_id, &slot, &card.id),
        pack_id: pack_id.to_string(),
        card: card.clone(),
    }
}
