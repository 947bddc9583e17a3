use serde::{Deserialize, Serialize};

use crate::bots::{PickContext, PickStrategy};
use crate::domain::{CardId, DraftConfig, DraftPlayer, Pack, PlayerId};
use crate::engine::errors::DraftError;
use crate::engine::history::{overall_pick, Delta};
use crate::engine::pack_gen::PackGenerator;
use crate::engine::passing::{pass_packs, PassDirection};
use crate::engine::validation::{validate_card_in_pack, validate_delta};
use crate::infra::ids::{bot_stream_label, pick_stream_label};
use crate::infra::rng::SeededRandom;

/// Статус драфта. `Complete`: терминальный.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Setup,
    Active,
    Complete,
}

/// Полное состояние драфта.
///
/// Восстанавливается из `(seed, config, deltas)`, поэтому хранить его
/// целиком не нужно: см. `engine::replay`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DraftState {
    pub seed: String,
    pub set_code: String,
    pub status: DraftStatus,
    /// 1..=rounds
    pub round: u8,
    /// 1..=picks_per_round: пик, который сейчас на столе.
    pub pick: u8,
    pub direction: PassDirection,
    pub player_count: u8,
    pub rounds: u8,
    pub picks_per_round: u8,
    /// Индекс == seat. Место 0: человек.
    pub players: Vec<DraftPlayer>,
    /// Паки всех раундов в момент генерации: `packs[round - 1][seat]`.
    /// Не меняются; текущие паки лежат у игроков.
    pub packs: Vec<Vec<Pack>>,
    /// Недобранные паки закрытых раундов, чтобы карты раунда сходились.
    #[serde(default)]
    pub retired: Vec<Pack>,
    pub deltas: Vec<Delta>,
}

impl DraftState {
    /// Позиция в логе: сколько волн пиков применено (0: генезис).
    pub fn position(&self) -> usize {
        self.deltas.len()
    }

    pub fn overall_pick(&self) -> u32 {
        overall_pick(self.round, self.pick, self.picks_per_round)
    }

    pub fn is_complete(&self) -> bool {
        self.status == DraftStatus::Complete
    }

    pub fn human(&self) -> Option<&DraftPlayer> {
        self.players.iter().find(|p| p.is_human)
    }

    pub fn player(&self, player_id: &str) -> Option<&DraftPlayer> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Дельта для пика человека в текущей позиции.
    pub fn next_delta(&self, card_id: impl Into<CardId>, timestamp: u64) -> Option<Delta> {
        let human: PlayerId = self.human()?.id.clone();
        Some(Delta::pick(
            self.round,
            self.pick,
            self.picks_per_round,
            card_id,
            human,
            timestamp,
        ))
    }

    /// Сколько карт было роздано в раунде `round`.
    pub fn cards_dealt_in_round(&self, round: u8) -> usize {
        self.packs
            .get(round.saturating_sub(1) as usize)
            .map(|packs| packs.iter().map(Pack::len).sum())
            .unwrap_or(0)
    }

    /// Карты раунда, которые сейчас в паках у игроков, уже выбраны или выбыли.
    pub fn cards_accounted_in_round(&self, round: u8) -> usize {
        let retired: usize = self
            .retired
            .iter()
            .filter(|pack| pack.round == round)
            .map(Pack::len)
            .sum();

        let held: usize = self
            .players
            .iter()
            .map(|p| {
                let in_pack = p
                    .current_pack
                    .as_ref()
                    .filter(|pack| pack.round == round)
                    .map(Pack::len)
                    .unwrap_or(0);
                in_pack + p.picks_in_round(round)
            })
            .sum();

        retired + held
    }
}

/// Создать драфт: игроки рассажены, все паки сгенерированы, статус `Setup`.
pub fn create(seed: &str, config: &DraftConfig) -> Result<DraftState, DraftError> {
    config.validate()?;

    let players = (0..config.player_count)
        .map(|seat| {
            if seat == 0 {
                DraftPlayer::human(seat)
            } else {
                DraftPlayer::bot(seat, config.personality_for_seat(seat))
            }
        })
        .collect();

    let packs = PackGenerator::new(&config.pool, &config.layout).generate_draft(
        seed,
        config.rounds,
        config.player_count,
    )?;

    Ok(DraftState {
        seed: seed.to_string(),
        set_code: config.set_code().to_string(),
        status: DraftStatus::Setup,
        round: 1,
        pick: 1,
        direction: PassDirection::for_round(1),
        player_count: config.player_count,
        rounds: config.rounds,
        picks_per_round: config.picks_per_round,
        players,
        packs,
        retired: Vec::new(),
        deltas: Vec::new(),
    })
}

/// Раздать паки первого раунда и перейти в `Active`.
pub fn start(state: &DraftState) -> Result<DraftState, DraftError> {
    let mut next = state.clone();
    start_in_place(&mut next)?;
    Ok(next)
}

pub(crate) fn start_in_place(state: &mut DraftState) -> Result<(), DraftError> {
    if state.status != DraftStatus::Setup {
        return Err(DraftError::InvalidTransition {
            from: state.status,
            action: "start",
        });
    }
    state.round = 1;
    state.pick = 1;
    state.direction = PassDirection::for_round(1);
    distribute_round_packs(state);
    state.status = DraftStatus::Active;
    Ok(())
}

/// Применить пик человека и всю волну пиков ботов.
///
/// Волна: один переход: снаружи не видно состояния, где часть игроков
/// уже выбрала, а счётчик пиков ещё не сдвинулся. При ошибке исходное
/// состояние не меняется.
pub fn apply_delta<S: PickStrategy + ?Sized>(
    state: &DraftState,
    delta: Delta,
    strategy: &S,
) -> Result<DraftState, DraftError> {
    let mut next = state.clone();
    apply_in_place(&mut next, delta, strategy)?;
    Ok(next)
}

/// То же, что `apply_delta`, но на месте. После `Err` состояние может быть
/// частично изменено и должно быть выброшено.
pub(crate) fn apply_in_place<S: PickStrategy + ?Sized>(
    state: &mut DraftState,
    delta: Delta,
    strategy: &S,
) -> Result<(), DraftError> {
    let human_idx = validate_delta(state, &delta)?;
    take_card(&mut state.players[human_idx], &delta.card_id)?;

    resolve_bot_picks(state, human_idx, delta.overall_pick, strategy)?;

    state.deltas.push(delta);
    pass_packs(&mut state.players, state.direction);
    advance_pick(state);
    Ok(())
}

/// Пики всех ботов текущей волны, по возрастанию места.
fn resolve_bot_picks<S: PickStrategy + ?Sized>(
    state: &mut DraftState,
    skip_idx: usize,
    overall: u32,
    strategy: &S,
) -> Result<(), DraftError> {
    let root = SeededRandom::new(state.seed.as_str());
    let (round, pick) = (state.round, state.pick);

    for idx in 0..state.players.len() {
        if idx == skip_idx || state.players[idx].is_human {
            continue;
        }

        let player = &state.players[idx];
        let pack = player
            .current_pack
            .as_ref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DraftError::PackExhausted(player.id.clone()))?;
        let personality = player.personality.clone().unwrap_or_default();
        let ctx = PickContext {
            set_code: &state.set_code,
            round,
            pick,
            overall_pick: overall,
            seat: player.seat,
        };
        let mut rng = root
            .derive(&bot_stream_label(player.seat))
            .derive(&pick_stream_label(round, pick));

        let card_id = strategy
            .choose_card(&pack.cards, &player.picked_cards, &personality, &ctx, &mut rng)
            .ok_or_else(|| DraftError::PackExhausted(player.id.clone()))?;

        take_card(&mut state.players[idx], &card_id)?;
    }

    Ok(())
}

/// Переложить карту из текущего пака игрока в его пики.
fn take_card(player: &mut DraftPlayer, card_id: &str) -> Result<(), DraftError> {
    validate_card_in_pack(player, card_id)?;
    let picked = player
        .current_pack
        .as_mut()
        .and_then(|pack| pack.take(card_id))
        .ok_or_else(|| DraftError::CardNotFound {
            card_id: card_id.to_string(),
            player_id: player.id.clone(),
        })?;
    player.picked_cards.push(picked);
    Ok(())
}

/// Сдвинуть счётчик пиков после полной волны; за концом раунда: следующий раунд.
fn advance_pick(state: &mut DraftState) {
    // Сравнение до инкремента: picks_per_round может быть u8::MAX.
    if state.pick >= state.picks_per_round {
        advance_round_in_place(state);
    } else {
        state.pick += 1;
    }
}

/// Досрочно закрыть текущий раунд: следующий раунд или завершение драфта.
///
/// Только из `Active`. Недобранные паки уходят в `retired`.
pub fn advance_round(state: &DraftState) -> Result<DraftState, DraftError> {
    if state.status != DraftStatus::Active {
        return Err(DraftError::InvalidTransition {
            from: state.status,
            action: "advance_round",
        });
    }
    let mut next = state.clone();
    advance_round_in_place(&mut next);
    Ok(next)
}

/// Следующий раунд (направление меняется, пик = 1, раздаются паки раунда)
/// или завершение драфта после последнего раунда.
fn advance_round_in_place(state: &mut DraftState) {
    for player in state.players.iter_mut() {
        if let Some(pack) = player.current_pack.take().filter(|p| !p.is_empty()) {
            state.retired.push(pack);
        }
    }

    if state.round < state.rounds {
        state.round += 1;
        state.pick = 1;
        state.direction = state.direction.reversed();
        distribute_round_packs(state);
    } else {
        state.pick = state.picks_per_round;
        state.status = DraftStatus::Complete;
    }
}

fn distribute_round_packs(state: &mut DraftState) {
    let round_idx = state.round as usize - 1;
    for (seat, player) in state.players.iter_mut().enumerate() {
        player.current_pack = state
            .packs
            .get(round_idx)
            .and_then(|packs| packs.get(seat))
            .cloned();
    }
}
