//! Маппинг между состоянием движка и записью хранилища.

use crate::domain::{CardPool, DraftConfig, PackLayout, Personality};
use crate::engine::{overall_pick, Delta, DraftState};
use crate::infra::persistence::{DraftRecord, PersistedDelta, StorageError};

impl From<&Delta> for PersistedDelta {
    fn from(delta: &Delta) -> Self {
        Self {
            event_type: delta.event_type,
            pack_number: delta.round,
            pick_number: delta.pick,
            pick: delta.card_id.clone(),
            player_id: delta.player_id.clone(),
            timestamp: delta.timestamp,
            pick_time_ms: delta.pick_time_ms,
        }
    }
}

impl PersistedDelta {
    /// Развернуть обратно в `Delta`. `overall_pick` берётся из позиции в логе.
    pub fn to_delta(&self, index: usize) -> Delta {
        Delta {
            event_type: self.event_type,
            round: self.pack_number,
            pick: self.pick_number,
            overall_pick: index as u32 + 1,
            card_id: self.pick.clone(),
            player_id: self.player_id.clone(),
            timestamp: self.timestamp,
            pick_time_ms: self.pick_time_ms,
        }
    }
}

/// Запись для хранилища: seed, параметры конфига и лог.
pub fn record_from_state(
    state: &DraftState,
    config: &DraftConfig,
    created_at: u64,
) -> DraftRecord {
    let layout = (config.layout != PackLayout::default()).then(|| config.layout.clone());
    let bot_lineup = if config.bot_lineup == Personality::default_lineup() {
        Vec::new()
    } else {
        config.bot_lineup.clone()
    };

    DraftRecord {
        seed: state.seed.clone(),
        set_code: state.set_code.clone(),
        set_name: config.pool.set_name.clone(),
        created_at,
        player_count: state.player_count,
        round_count: state.rounds,
        picks_per_round: state.picks_per_round,
        layout,
        bot_lineup,
        deltas: state.deltas.iter().map(PersistedDelta::from).collect(),
        status: state.status,
        current_pick: overall_pick(state.round, state.pick, state.picks_per_round),
    }
}

/// Лог дельт из записи (после структурной проверки).
pub fn deltas_from_record(id: &str, record: &DraftRecord) -> Result<Vec<Delta>, StorageError> {
    record.check(id)?;
    Ok(record
        .deltas
        .iter()
        .enumerate()
        .map(|(i, d)| d.to_delta(i))
        .collect())
}

/// Конфиг драфта из записи и пула её сета.
pub fn config_from_record(record: &DraftRecord, pool: CardPool) -> Result<DraftConfig, StorageError> {
    if pool.set_code != record.set_code {
        return Err(StorageError::SetMismatch {
            expected: record.set_code.clone(),
            got: pool.set_code,
        });
    }

    let mut config = DraftConfig::new(pool)
        .with_players(record.player_count)
        .with_rounds(record.round_count);
    config.picks_per_round = record.picks_per_round;
    if let Some(layout) = &record.layout {
        config.layout = layout.clone();
    }
    if !record.bot_lineup.is_empty() {
        config.bot_lineup = record.bot_lineup.clone();
    }
    Ok(config)
}
