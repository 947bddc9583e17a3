use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CardId, PackLayout, Personality, PlayerId};
use crate::engine::{DeltaKind, DraftStatus};

fn default_picks_per_round() -> u8 {
    15
}

/// Пик в том виде, в котором он хранится.
///
/// `overall_pick`, `is_bot`, `event_id` сюда не попадают: они
/// пересчитываются при загрузке из индекса и ID игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedDelta {
    pub event_type: DeltaKind,
    pub pack_number: u8,
    pub pick_number: u8,
    /// ID выбранной карты.
    pub pick: CardId,
    pub player_id: PlayerId,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_time_ms: Option<u64>,
}

/// Запись драфта в хранилище. Паки и состояния игроков не хранятся.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DraftRecord {
    pub seed: String,
    pub set_code: String,
    pub set_name: String,
    pub created_at: u64,
    pub player_count: u8,
    pub round_count: u8,
    #[serde(default = "default_picks_per_round")]
    pub picks_per_round: u8,
    /// `None`: раскладка по умолчанию.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PackLayout>,
    /// Пусто: линейка по умолчанию.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bot_lineup: Vec<Personality>,
    pub deltas: Vec<PersistedDelta>,
    pub status: DraftStatus,
    pub current_pick: u32,
}

impl DraftRecord {
    /// Структурная проверка: пики идут подряд и не выходят за границы драфта.
    pub fn check(&self, id: &str) -> Result<(), StorageError> {
        let malformed = |reason: String| StorageError::Malformed {
            id: id.to_string(),
            reason,
        };

        if self.player_count == 0 || self.round_count == 0 || self.picks_per_round == 0 {
            return Err(malformed("нулевое количество игроков/раундов/пиков".into()));
        }

        let ppr = self.picks_per_round as u32;
        for (i, d) in self.deltas.iter().enumerate() {
            if d.pack_number < 1
                || d.pack_number > self.round_count
                || d.pick_number < 1
                || d.pick_number > self.picks_per_round
            {
                return Err(malformed(format!(
                    "пик #{i}: пак {} пик {} вне границ",
                    d.pack_number, d.pick_number
                )));
            }
            let overall = (d.pack_number as u32 - 1) * ppr + d.pick_number as u32;
            if overall != i as u32 + 1 {
                return Err(malformed(format!(
                    "пик #{i}: пак {} пик {} не на своём месте в логе",
                    d.pack_number, d.pick_number
                )));
            }
        }

        Ok(())
    }
}

/// Краткая информация для списка сохранённых драфтов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftMetadata {
    pub id: String,
    pub set_code: String,
    pub set_name: String,
    pub created_at: u64,
    pub player_count: u8,
    pub status: DraftStatus,
    pub current_pick: u32,
    pub pick_count: usize,
}

impl DraftMetadata {
    pub fn from_record(id: &str, record: &DraftRecord) -> Self {
        Self {
            id: id.to_string(),
            set_code: record.set_code.clone(),
            set_name: record.set_name.clone(),
            created_at: record.created_at,
            player_count: record.player_count,
            status: record.status,
            current_pick: record.current_pick,
            pick_count: record.deltas.len(),
        }
    }
}

/// Ошибки на границе хранилища.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Запись {id} повреждена: {reason}")]
    Malformed { id: String, reason: String },

    #[error("Сет записи {expected} не совпадает с пулом {got}")]
    SetMismatch { expected: String, got: String },

    #[error("Ошибка ввода-вывода: {0}")]
    Io(String),

    #[error("Недопустимый id драфта: {0:?}")]
    InvalidId(String),
}

/// Абстракция хранилища драфтов (ключ-значение).
///
/// Реализации хранят `DraftRecord` в JSON. Битые записи при `load`
/// возвращаются как ошибка, а не превращаются в "почти валидное" состояние.
pub trait DraftStorage {
    /// Сохранить запись. `false`: сохранить не удалось.
    fn save(&mut self, id: &str, record: &DraftRecord) -> bool;

    /// Загрузить запись. `Ok(None)`: такой записи нет.
    fn load(&self, id: &str) -> Result<Option<DraftRecord>, StorageError>;

    /// Все читаемые записи, новые первыми.
    fn list(&self) -> Vec<DraftMetadata>;

    /// Удалить запись. `false`: записи не было.
    fn delete(&mut self, id: &str) -> bool;
}

fn parse_record(id: &str, raw: &str) -> Result<DraftRecord, StorageError> {
    let record: DraftRecord =
        serde_json::from_str(raw).map_err(|e| StorageError::Malformed {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
    record.check(id)?;
    Ok(record)
}

fn sort_newest_first(items: &mut [DraftMetadata]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

/// In-memory хранилище: JSON-строки по ключу, как localStorage браузера.
#[derive(Debug, Default)]
pub struct InMemoryDraftStorage {
    entries: BTreeMap<String, String>,
}

impl InMemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Положить строку как есть (например, чужой или испорченный JSON).
    pub fn insert_raw(&mut self, id: &str, raw: impl Into<String>) {
        self.entries.insert(id.to_string(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DraftStorage for InMemoryDraftStorage {
    fn save(&mut self, id: &str, record: &DraftRecord) -> bool {
        match serde_json::to_string(record) {
            Ok(raw) => {
                self.entries.insert(id.to_string(), raw);
                debug!(draft_id = id, picks = record.deltas.len(), "draft saved");
                true
            }
            Err(err) => {
                warn!(draft_id = id, error = %err, "draft serialization failed");
                false
            }
        }
    }

    fn load(&self, id: &str) -> Result<Option<DraftRecord>, StorageError> {
        self.entries
            .get(id)
            .map(|raw| parse_record(id, raw))
            .transpose()
    }

    fn list(&self) -> Vec<DraftMetadata> {
        let mut out: Vec<DraftMetadata> = self
            .entries
            .iter()
            .filter_map(|(id, raw)| match parse_record(id, raw) {
                Ok(record) => Some(DraftMetadata::from_record(id, &record)),
                Err(err) => {
                    warn!(draft_id = %id, error = %err, "skipping unreadable draft");
                    None
                }
            })
            .collect();
        sort_newest_first(&mut out);
        out
    }

    fn delete(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }
}

/// Хранилище на диске: один `<id>.json` на драфт.
#[derive(Debug, Clone)]
pub struct JsonDirStorage {
    root: PathBuf,
}

impl JsonDirStorage {
    /// Создаёт каталог, если его нет.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Путь к записи. id должен быть одним компонентом пути внутри `root`.
    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        let bad = id.is_empty()
            || id.contains(['/', '\\', '\0'])
            || id.contains("..");
        if bad {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl DraftStorage for JsonDirStorage {
    fn save(&mut self, id: &str, record: &DraftRecord) -> bool {
        let path = match self.path_for(id) {
            Ok(path) => path,
            Err(err) => {
                warn!(draft_id = id, error = %err, "draft not saved");
                return false;
            }
        };
        let raw = match serde_json::to_string_pretty(record) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(draft_id = id, error = %err, "draft serialization failed");
                return false;
            }
        };
        match fs::write(path, raw) {
            Ok(()) => {
                debug!(draft_id = id, picks = record.deltas.len(), "draft written to disk");
                true
            }
            Err(err) => {
                warn!(draft_id = id, error = %err, "draft write failed");
                false
            }
        }
    }

    fn load(&self, id: &str) -> Result<Option<DraftRecord>, StorageError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| StorageError::Io(e.to_string()))?;
        parse_record(id, &raw).map(Some)
    }

    fn list(&self) -> Vec<DraftMetadata> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(root = %self.root.display(), error = %err, "cannot list drafts");
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(id) {
                Ok(Some(record)) => out.push(DraftMetadata::from_record(id, &record)),
                Ok(None) => {}
                Err(err) => warn!(draft_id = id, error = %err, "skipping unreadable draft"),
            }
        }
        sort_newest_first(&mut out);
        out
    }

    fn delete(&mut self, id: &str) -> bool {
        match self.path_for(id) {
            Ok(path) => fs::remove_file(path).is_ok(),
            Err(err) => {
                warn!(draft_id = id, error = %err, "draft not deleted");
                false
            }
        }
    }
}
