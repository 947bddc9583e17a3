//! Движок драфта: генерация паков, машина состояний, лог пиков, реплей,
//! навигация по истории.
//!
//! Высокоуровневые операции:
//!   - `create` / `start` – подготовить и запустить драфт
//!   - `apply_delta` – пик человека + волна пиков ботов
//!   - `replay_to_position` – состояние в любой точке лога
//!   - `navigate_to_position` – "раунд R, пик P"

pub mod draft;
pub mod errors;
pub mod history;
pub mod navigation;
pub mod pack_gen;
pub mod passing;
pub mod replay;
pub mod validation;

pub use draft::{advance_round, apply_delta, create, start, DraftState, DraftStatus};
pub use errors::{DraftError, PackError};
pub use history::{overall_pick, Delta, DeltaKind};
pub use navigation::{
    absolute_position, navigate_to_live, navigate_to_position, NavigatedState, NavigationError,
};
pub use pack_gen::PackGenerator;
pub use passing::{pass_packs, source_seat, PassDirection};
pub use replay::{replay_all, replay_to_position, validate_replay};
