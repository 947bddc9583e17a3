//! Реплей: восстановление состояния драфта из `(seed, config, deltas)`.
//!
//! Всегда с генезиса: `create` → `start` → дельты по порядку. Снапшоты
//! не используются, поэтому "текущее" и "историческое" состояния
//! считаются одной и той же функцией и не могут разойтись.

use crate::bots::PickStrategy;
use crate::domain::DraftConfig;
use crate::engine::draft::{apply_in_place, create, start_in_place, DraftState};
use crate::engine::errors::DraftError;
use crate::engine::history::Delta;

/// Состояние после первых `target_position` дельт.
pub fn replay_to_position<S: PickStrategy + ?Sized>(
    seed: &str,
    config: &DraftConfig,
    deltas: &[Delta],
    target_position: usize,
    strategy: &S,
) -> Result<DraftState, DraftError> {
    if target_position > deltas.len() {
        return Err(DraftError::PositionOutOfRange {
            target: target_position,
            available: deltas.len(),
        });
    }

    let mut state = create(seed, config)?;
    start_in_place(&mut state)?;

    for delta in &deltas[..target_position] {
        apply_in_place(&mut state, delta.clone(), strategy)?;
    }

    Ok(state)
}

/// Состояние после всего лога.
pub fn replay_all<S: PickStrategy + ?Sized>(
    seed: &str,
    config: &DraftConfig,
    deltas: &[Delta],
    strategy: &S,
) -> Result<DraftState, DraftError> {
    replay_to_position(seed, config, deltas, deltas.len(), strategy)
}

/// Самопроверка после загрузки: лог проигрывается без ошибок и каждый
/// игрок сделал ровно `deltas.len()` пиков.
pub fn validate_replay<S: PickStrategy + ?Sized>(
    seed: &str,
    config: &DraftConfig,
    deltas: &[Delta],
    strategy: &S,
) -> Result<DraftState, DraftError> {
    let state = replay_all(seed, config, deltas, strategy)?;

    for player in &state.players {
        if player.picked_cards.len() != deltas.len() {
            return Err(DraftError::ReplayMismatch {
                player_id: player.id.clone(),
                expected: deltas.len(),
                actual: player.picked_cards.len(),
            });
        }
    }

    Ok(state)
}
