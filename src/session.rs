//! Сессия драфта на стороне слоя представления.
//!
//! Единственное место, где живёт "текущее состояние": ядро (engine)
//! только принимает состояние и возвращает новое. Сессия хранит живое
//! состояние, опциональный просмотр истории и умеет сохраняться.

use tracing::{debug, info, warn};

use crate::api::{
    build_draft_view, ApiError, CommandResponse, DraftCommand, DraftViewDto, NavigateCommand,
    NavigationResponse, PickCommand,
};
use crate::bots::{HeuristicStrategy, PickStrategy};
use crate::domain::{CardPool, DraftConfig};
use crate::engine::{
    self, navigate_to_position, validate_replay, Delta, DraftError, DraftState, NavigatedState,
};
use crate::infra::{
    config_from_record, deltas_from_record, record_from_state, DraftRecord, DraftStorage,
};

pub struct DraftSession<S: PickStrategy = HeuristicStrategy> {
    id: String,
    config: DraftConfig,
    strategy: S,
    created_at: u64,
    live: DraftState,
    /// `Some`: пользователь смотрит историческую позицию.
    view: Option<NavigatedState>,
}

impl<S: PickStrategy> DraftSession<S> {
    /// Новая сессия в статусе `Setup`.
    pub fn new(
        id: impl Into<String>,
        seed: &str,
        config: DraftConfig,
        strategy: S,
        created_at: u64,
    ) -> Result<Self, DraftError> {
        let live = engine::create(seed, &config)?;
        Ok(Self {
            id: id.into(),
            config,
            strategy,
            created_at,
            live,
            view: None,
        })
    }

    /// Восстановить сессию из записи. Лог проигрывается целиком и
    /// проверяется (`validate_replay`) до того, как сессия станет доступна.
    pub fn resume(
        id: impl Into<String>,
        record: &DraftRecord,
        pool: CardPool,
        strategy: S,
    ) -> Result<Self, ApiError> {
        let id = id.into();
        let config = config_from_record(record, pool)?;
        let deltas = deltas_from_record(&id, record)?;
        let live = validate_replay(&record.seed, &config, &deltas, &strategy)?;

        if live.status != record.status {
            warn!(
                draft_id = %id,
                stored = ?record.status,
                replayed = ?live.status,
                "stored status differs from replay, using replay"
            );
        }
        info!(draft_id = %id, picks = deltas.len(), "draft resumed");

        Ok(Self {
            id,
            config,
            strategy,
            created_at: record.created_at,
            live,
            view: None,
        })
    }

    /// Загрузить из хранилища. `Ok(None)`: такой записи нет.
    pub fn load<St: DraftStorage + ?Sized>(
        storage: &St,
        id: &str,
        pool: CardPool,
        strategy: S,
    ) -> Result<Option<Self>, ApiError> {
        match storage.load(id)? {
            Some(record) => Self::resume(id, &record, pool, strategy).map(Some),
            None => Ok(None),
        }
    }

    pub fn save<St: DraftStorage + ?Sized>(&self, storage: &mut St) -> bool {
        storage.save(&self.id, &self.to_record())
    }

    pub fn to_record(&self) -> DraftRecord {
        record_from_state(&self.live, &self.config, self.created_at)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn live_state(&self) -> &DraftState {
        &self.live
    }

    /// То, что сейчас на экране: история или живое состояние.
    pub fn viewed_state(&self) -> &DraftState {
        self.view.as_ref().map(|v| &v.state).unwrap_or(&self.live)
    }

    pub fn is_viewing_history(&self) -> bool {
        self.view.is_some()
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.live.deltas
    }

    pub fn live_view(&self) -> DraftViewDto {
        build_draft_view(&self.id, &self.live, true)
    }

    /// Единая точка входа для команд слоя представления.
    pub fn dispatch(&mut self, command: DraftCommand) -> Result<CommandResponse, ApiError> {
        match command {
            DraftCommand::Start => self.start(),
            DraftCommand::Pick(cmd) => self.pick(cmd),
            DraftCommand::Navigate(cmd) => Ok(self.navigate(cmd)),
            DraftCommand::ReturnToLive => Ok(self.return_to_live()),
        }
    }

    fn start(&mut self) -> Result<CommandResponse, ApiError> {
        self.live = engine::start(&self.live)?;
        info!(draft_id = %self.id, players = self.live.player_count, "draft started");
        Ok(CommandResponse::Started(self.live_view()))
    }

    fn pick(&mut self, cmd: PickCommand) -> Result<CommandResponse, ApiError> {
        if self.view.is_some() {
            return Err(ApiError::InvalidCommand(
                "пик невозможен во время просмотра истории".into(),
            ));
        }

        let mut delta = self
            .live
            .next_delta(cmd.card_id, cmd.timestamp)
            .ok_or_else(|| ApiError::InvalidCommand("в драфте нет живого игрока".into()))?;
        delta.pick_time_ms = cmd.pick_time_ms;

        let (round, pick) = (self.live.round, self.live.pick);
        let card_id = delta.card_id.clone();
        self.live = engine::apply_delta(&self.live, delta, &self.strategy)?;
        debug!(draft_id = %self.id, round, pick, card_id = %card_id, "pick applied");

        if self.live.is_complete() {
            info!(draft_id = %self.id, picks = self.live.position(), "draft complete");
            Ok(CommandResponse::Completed(self.live_view()))
        } else {
            Ok(CommandResponse::Picked(self.live_view()))
        }
    }

    fn navigate(&mut self, cmd: NavigateCommand) -> CommandResponse {
        let result = navigate_to_position(
            &self.live.seed,
            &self.config,
            &self.live.deltas,
            cmd.round,
            cmd.pick,
            &self.strategy,
        );
        let response = NavigationResponse::from_result(&self.id, &result);

        match result {
            Ok(nav) if nav.is_live => {
                debug!(draft_id = %self.id, position = nav.position, "navigated to live position");
                self.view = None;
            }
            Ok(nav) => {
                debug!(draft_id = %self.id, position = nav.position, "navigated to history");
                self.view = Some(nav);
            }
            Err(err) => {
                debug!(draft_id = %self.id, error = %err, "navigation rejected");
            }
        }

        CommandResponse::Navigation(response)
    }

    fn return_to_live(&mut self) -> CommandResponse {
        self.view = None;
        CommandResponse::Navigation(NavigationResponse {
            success: true,
            state: Some(self.live_view()),
            error: None,
        })
    }
}
