use serde::{Deserialize, Serialize};

use crate::domain::{DraftPlayer, Pack, SeatIndex};

/// Направление передачи паков.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassDirection {
    Clockwise,
    Counterclockwise,
}

impl PassDirection {
    /// Нечётные раунды: по часовой, чётные: против.
    pub fn for_round(round: u8) -> Self {
        if round % 2 == 1 {
            PassDirection::Clockwise
        } else {
            PassDirection::Counterclockwise
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            PassDirection::Clockwise => PassDirection::Counterclockwise,
            PassDirection::Counterclockwise => PassDirection::Clockwise,
        }
    }
}

/// Место, чей пак получает `seat` после волны.
///
/// По часовой `seat` берёт пак у `seat + 1`, против: у `seat - 1` (mod N).
pub fn source_seat(seat: SeatIndex, player_count: u8, direction: PassDirection) -> SeatIndex {
    let n = player_count as u16;
    if n == 0 {
        return seat;
    }
    let s = seat as u16;
    let src = match direction {
        PassDirection::Clockwise => (s + 1) % n,
        PassDirection::Counterclockwise => (s + n - 1) % n,
    };
    src as SeatIndex
}

/// Передать паки соседям. Пустые паки выбывают.
///
/// `players` упорядочены по месту (индекс == seat).
pub fn pass_packs(players: &mut [DraftPlayer], direction: PassDirection) {
    let n = players.len() as u8;
    let mut outgoing: Vec<Option<Pack>> = players
        .iter_mut()
        .map(|p| p.current_pack.take().filter(|pack| !pack.is_empty()))
        .collect();

    for player in players.iter_mut() {
        let src = source_seat(player.seat, n, direction) as usize;
        player.current_pack = outgoing[src].take();
    }
}
