use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PackCard, PlayerId, Rarity, SeatIndex};
use crate::engine::{DraftState, DraftStatus, NavigationError, NavigatedState, PassDirection};

/// DTO карты в паке или среди пиков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardViewDto {
    pub instance_id: String,
    pub card_id: CardId,
    pub name: String,
    pub rarity: Rarity,
}

impl From<&PackCard> for CardViewDto {
    fn from(c: &PackCard) -> Self {
        Self {
            instance_id: c.instance_id.clone(),
            card_id: c.card.id.clone(),
            name: c.card.name.clone(),
            rarity: c.card.rarity,
        }
    }
}

/// DTO участника. Содержимое паков ботов наружу не отдаём.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSummaryDto {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub is_human: bool,
    pub is_bot: bool,
    pub personality: Option<String>,
    pub pack_size: usize,
    pub picked_count: usize,
}

/// DTO драфта для экрана.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftViewDto {
    pub draft_id: String,
    pub set_code: String,
    pub status: DraftStatus,
    pub round: u8,
    pub pick: u8,
    pub overall_pick: u32,
    pub direction: PassDirection,
    /// Сколько волн пиков применено.
    pub position: usize,
    /// `false`: это историческая позиция.
    pub is_live: bool,
    pub human_pack: Vec<CardViewDto>,
    pub human_picks: Vec<CardViewDto>,
    pub players: Vec<PlayerSummaryDto>,
}

/// Ответ навигации: `{success, state?, error?}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationResponse {
    pub success: bool,
    pub state: Option<DraftViewDto>,
    pub error: Option<String>,
}

impl NavigationResponse {
    pub fn from_result(draft_id: &str, result: &Result<NavigatedState, NavigationError>) -> Self {
        match result {
            Ok(nav) => Self {
                success: true,
                state: Some(build_draft_view(draft_id, &nav.state, nav.is_live)),
                error: None,
            },
            Err(err) => Self {
                success: false,
                state: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Паки первого раунда розданы.
    Started(DraftViewDto),

    /// Волна пиков применена, драфт продолжается.
    Picked(DraftViewDto),

    /// Последний пик сделан.
    Completed(DraftViewDto),

    /// Результат навигации (в том числе неудачной).
    Navigation(NavigationResponse),
}

/// Сформировать DTO драфта из состояния.
pub fn build_draft_view(draft_id: &str, state: &DraftState, is_live: bool) -> DraftViewDto {
    let human = state.human();

    let human_pack = human
        .and_then(|p| p.current_pack.as_ref())
        .map(|pack| pack.cards.iter().map(CardViewDto::from).collect())
        .unwrap_or_default();

    let human_picks = human
        .map(|p| p.picked_cards.iter().map(CardViewDto::from).collect())
        .unwrap_or_default();

    let players = state
        .players
        .iter()
        .map(|p| PlayerSummaryDto {
            player_id: p.id.clone(),
            seat: p.seat,
            is_human: p.is_human,
            is_bot: crate::infra::ids::is_bot_player_id(&p.id),
            personality: p.personality.as_ref().map(|x| x.name.clone()),
            pack_size: p.pack_len(),
            picked_count: p.picked_cards.len(),
        })
        .collect();

    DraftViewDto {
        draft_id: draft_id.to_string(),
        set_code: state.set_code.clone(),
        status: state.status,
        round: state.round,
        pick: state.pick,
        overall_pick: state.overall_pick(),
        direction: state.direction,
        position: state.position(),
        is_live,
        human_pack,
        human_picks,
        players,
    }
}
