use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Команда верхнего уровня от слоя представления.
///
/// Все команды проходят через `DraftSession::dispatch`, которая держит
/// единственную ссылку на текущее состояние.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DraftCommand {
    /// Раздать паки первого раунда.
    Start,

    /// Пик человека. Боты выбирают в той же волне.
    Pick(PickCommand),

    /// Посмотреть историю: "раунд R, пик P".
    Navigate(NavigateCommand),

    /// Вернуться к живой позиции.
    ReturnToLive,
}

/// Пик человека.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PickCommand {
    pub card_id: CardId,
    /// Unix-время в миллисекундах: его ставит клиент.
    pub timestamp: u64,
    /// Сколько игрок думал над пиком.
    pub pick_time_ms: Option<u64>,
}

/// Переход к позиции в истории.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigateCommand {
    pub round: u8,
    pub pick: u8,
}
