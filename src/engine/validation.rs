use crate::domain::DraftPlayer;
use crate::engine::draft::{DraftState, DraftStatus};
use crate::engine::errors::DraftError;
use crate::engine::history::{overall_pick, Delta};

/// Проверка, что дельту можно применить к текущему состоянию.
///
/// Возвращает индекс (== seat) игрока, чей это пик. Состояние не меняет.
pub fn validate_delta(state: &DraftState, delta: &Delta) -> Result<usize, DraftError> {
    if state.status != DraftStatus::Active {
        return Err(DraftError::InvalidTransition {
            from: state.status,
            action: "apply_delta",
        });
    }

    let expected_overall = overall_pick(state.round, state.pick, state.picks_per_round);
    if delta.round != state.round
        || delta.pick != state.pick
        || delta.overall_pick != expected_overall
    {
        return Err(DraftError::DeltaOutOfSequence {
            expected_round: state.round,
            expected_pick: state.pick,
            round: delta.round,
            pick: delta.pick,
            overall_pick: delta.overall_pick,
        });
    }

    let idx = state
        .players
        .iter()
        .position(|p| p.id == delta.player_id)
        .ok_or_else(|| DraftError::PlayerNotFound(delta.player_id.clone()))?;
    let player = &state.players[idx];

    if !player.is_human {
        return Err(DraftError::BotDelta(player.id.clone()));
    }

    validate_card_in_pack(player, &delta.card_id)?;

    Ok(idx)
}

/// Есть ли у игрока непустой пак с этой картой.
pub fn validate_card_in_pack(player: &DraftPlayer, card_id: &str) -> Result<(), DraftError> {
    let pack = player
        .current_pack
        .as_ref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| DraftError::PackExhausted(player.id.clone()))?;

    if !pack.contains(card_id) {
        return Err(DraftError::CardNotFound {
            card_id: card_id.to_string(),
            player_id: player.id.clone(),
        });
    }

    Ok(())
}
