use crate::bots::evaluation::rank_cards;
use crate::domain::{CardId, PackCard, Personality, SeatIndex};
use crate::infra::rng::SeededRandom;

/// Веса выбора среди трёх лучших карт, когда бот "ошибается".
const RUNNER_UP_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];

/// Где в драфте принимается решение.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickContext<'a> {
    pub set_code: &'a str,
    pub round: u8,
    pub pick: u8,
    pub overall_pick: u32,
    pub seat: SeatIndex,
}

/// Стратегия выбора карты ботом.
///
/// Должна быть чистой функцией от аргументов: вся случайность: только
/// из `rng`, который движок выводит из seed для каждого (бот, пик).
/// `None`: выбирать не из чего.
pub trait PickStrategy {
    fn choose_card(
        &self,
        available: &[PackCard],
        picked: &[PackCard],
        personality: &Personality,
        ctx: &PickContext<'_>,
        rng: &mut SeededRandom,
    ) -> Option<CardId>;
}

/// Стратегия по умолчанию: эвристическая оценка + характер.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

impl PickStrategy for HeuristicStrategy {
    fn choose_card(
        &self,
        available: &[PackCard],
        picked: &[PackCard],
        personality: &Personality,
        _ctx: &PickContext<'_>,
        rng: &mut SeededRandom,
    ) -> Option<CardId> {
        let ranked = rank_cards(available, picked, personality, rng);
        let (best, _) = *ranked.first()?;

        // Чем выше skill, тем чаще берём лучшую карту.
        if rng.next() < personality.skill_level {
            return Some(available[best].card.id.clone());
        }

        let top = ranked.len().min(RUNNER_UP_WEIGHTS.len());
        let weights = &RUNNER_UP_WEIGHTS[..top];
        let total: f64 = weights.iter().sum();
        let mut roll = rng.next() * total;
        let mut chosen = ranked[top - 1].0;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                chosen = ranked[i].0;
                break;
            }
            roll -= w;
        }

        Some(available[chosen].card.id.clone())
    }
}

/// Всегда первая карта пака. Без случайности: удобно в тестах и симуляциях.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCardStrategy;

impl PickStrategy for FirstCardStrategy {
    fn choose_card(
        &self,
        available: &[PackCard],
        _picked: &[PackCard],
        _personality: &Personality,
        _ctx: &PickContext<'_>,
        _rng: &mut SeededRandom,
    ) -> Option<CardId> {
        available.first().map(|c| c.card.id.clone())
    }
}
