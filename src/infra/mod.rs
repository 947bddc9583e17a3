//! Инфраструктурный слой вокруг движка драфта:
//! - детерминированный RNG и его seed;
//! - детерминированные ID;
//! - абстракция хранения (in-memory / каталог JSON);
//! - маппинги между состоянием и записью хранилища.

pub mod ids;
pub mod mapping;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use mapping::*;
pub use persistence::*;
pub use rng::{RngError, SeededRandom};
pub use rng_seed::RngSeed;
