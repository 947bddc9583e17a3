//! Детерминированный движок бустер-драфта.
//!
//! Любая точка драфта восстанавливается из seed и упорядоченного лога
//! пиков, без хранения снапшотов состояния:
//! - `infra::SeededRandom`: воспроизводимый RNG с под-потоками;
//! - `engine::PackGenerator`: бустеры из пула сета;
//! - `engine::{create, start, apply_delta}`: машина состояний драфта;
//! - `engine::replay_to_position` / `engine::navigate_to_position`: реплей и навигация;
//! - `bots`: характеры ботов и стратегия выбора;
//! - `session::DraftSession`: владелец текущего состояния для слоя представления.

pub mod api;
pub mod bots;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod session;

pub use session::DraftSession;
