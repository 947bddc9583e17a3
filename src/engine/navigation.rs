use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bots::PickStrategy;
use crate::domain::DraftConfig;
use crate::engine::draft::DraftState;
use crate::engine::errors::DraftError;
use crate::engine::history::Delta;
use crate::engine::replay::replay_to_position;

/// Ошибки навигации по истории драфта.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Позиция раунд {round}, пик {pick} вне границ драфта")]
    InvalidPosition { round: u8, pick: u8 },

    #[error("Позиция {requested} ещё не достигнута (доступно до {available})")]
    PositionNotYetReached { requested: usize, available: usize },

    #[error(transparent)]
    Replay(#[from] DraftError),
}

/// Результат навигации.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NavigatedState {
    pub state: DraftState,
    /// Абсолютная позиция `(round - 1) * picks_per_round + pick`, с 1.
    pub position: usize,
    /// Позиция сразу после последнего записанного пика.
    pub is_live: bool,
}

pub fn absolute_position(round: u8, pick: u8, picks_per_round: u8) -> usize {
    (round as usize - 1) * picks_per_round as usize + pick as usize
}

/// Перейти к "раунд R, пик P": состояние, в котором пик P раунда R на столе.
///
/// Живая и историческая позиции проходят через один и тот же
/// `replay_to_position`, так что уход и возврат дают одинаковое состояние.
pub fn navigate_to_position<S: PickStrategy + ?Sized>(
    seed: &str,
    config: &DraftConfig,
    deltas: &[Delta],
    target_round: u8,
    target_pick: u8,
    strategy: &S,
) -> Result<NavigatedState, NavigationError> {
    if target_round < 1
        || target_round > config.rounds
        || target_pick < 1
        || target_pick > config.picks_per_round
    {
        return Err(NavigationError::InvalidPosition {
            round: target_round,
            pick: target_pick,
        });
    }

    let requested = absolute_position(target_round, target_pick, config.picks_per_round);
    let available = deltas.len() + 1;
    if requested > available {
        return Err(NavigationError::PositionNotYetReached {
            requested,
            available,
        });
    }

    let state = replay_to_position(seed, config, deltas, requested - 1, strategy)?;

    Ok(NavigatedState {
        state,
        position: requested,
        is_live: requested == available,
    })
}

/// Живое состояние: весь лог.
pub fn navigate_to_live<S: PickStrategy + ?Sized>(
    seed: &str,
    config: &DraftConfig,
    deltas: &[Delta],
    strategy: &S,
) -> Result<NavigatedState, NavigationError> {
    let state = replay_to_position(seed, config, deltas, deltas.len(), strategy)?;
    Ok(NavigatedState {
        state,
        position: deltas.len() + 1,
        is_live: true,
    })
}
