//! Эвристическая оценка карты ботом, шкала 0..100.
//!
//! Оценка = база по редкости + бонусы за тип/текст, затем поправки
//! характера: близость к оптимуму, любовь к редким, шум, верность цветам.

use std::collections::BTreeSet;

use rand_distr::{Distribution, Normal};

use crate::domain::{Card, PackCard, Personality, Rarity};
use crate::infra::rng::SeededRandom;

/// Слова в тексте карты, по которым она считается removal.
const REMOVAL_KEYWORDS: [&str; 4] = ["destroy", "exile", "damage", "counter"];

pub fn rarity_score(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 40.0,
        Rarity::Uncommon => 55.0,
        Rarity::Rare => 70.0,
        Rarity::Mythic => 85.0,
        Rarity::Special | Rarity::Bonus => 40.0,
    }
}

pub fn is_removal(card: &Card) -> bool {
    let text = card.oracle_text.to_lowercase();
    REMOVAL_KEYWORDS.iter().any(|w| text.contains(w))
}

/// bronze 0.8, silver 0.9, gold 1.0, mythic 1.1.
pub fn skill_multiplier(skill_level: f64) -> f64 {
    0.65 + 0.5 * skill_level
}

/// Оценка без случайности и без учёта уже собранных карт.
pub fn base_score(card: &Card, personality: &Personality) -> f64 {
    let mut score = rarity_score(card.rarity);
    if card.is_creature() {
        score += 5.0;
    }
    if is_removal(card) {
        score += 10.0;
    }
    score * skill_multiplier(personality.skill_level)
}

/// Все цвета среди уже выбранных карт.
pub fn picked_colors(picked: &[PackCard]) -> BTreeSet<&str> {
    picked
        .iter()
        .flat_map(|c| c.card.color_identity.iter().map(String::as_str))
        .collect()
}

/// Полная оценка карты. Ровно одна выборка шума на карту.
pub fn score_card(
    card: &Card,
    colors: &BTreeSet<&str>,
    personality: &Personality,
    rng: &mut SeededRandom,
) -> f64 {
    let base = base_score(card, personality);
    let mut score = base + (100.0 - base) * (1.0 - personality.skill_level) * 0.3;

    if card.rarity.is_rare_or_mythic() {
        score *= personality.rare_bias;
    }

    let std_dev = (personality.randomness * 20.0).max(0.0);
    score += match Normal::new(0.0, std_dev) {
        Ok(noise) => noise.sample(rng),
        Err(_) => 0.0,
    };

    if !colors.is_empty() && !card.color_identity.is_empty() {
        let matching = card
            .color_identity
            .iter()
            .filter(|c| colors.contains(c.as_str()))
            .count();
        let ratio = matching as f64 / card.color_identity.len() as f64;
        score += ratio * personality.color_commitment * 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Индексы карт пака с оценками, по убыванию оценки.
/// При равенстве раньше идёт карта, которая раньше лежит в паке.
pub fn rank_cards(
    available: &[PackCard],
    picked: &[PackCard],
    personality: &Personality,
    rng: &mut SeededRandom,
) -> Vec<(usize, f64)> {
    let colors = picked_colors(picked);
    let mut ranked: Vec<(usize, f64)> = available
        .iter()
        .enumerate()
        .map(|(i, c)| (i, score_card(&c.card, &colors, personality, rng)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}
