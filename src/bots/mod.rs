//! Боты драфта: характер (данные) + стратегия выбора (чистая функция).

pub mod evaluation;
pub mod strategy;

pub use evaluation::{base_score, picked_colors, rank_cards, score_card};
pub use strategy::{FirstCardStrategy, HeuristicStrategy, PickContext, PickStrategy};
