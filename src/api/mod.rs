//! Внешний API движка драфта для слоя представления.
//!
//! Здесь описываются:
//! - команды (commands.rs): всё, что меняет состояние сессии;
//! - DTO (dto.rs): удобные структуры для экрана;
//! - ошибки (errors.rs): то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;

pub use commands::*;
pub use dto::*;
pub use errors::*;
