//! RngSeed: 32-байтовый корень случайности драфта.
//!
//! Позволяет:
//!   - превратить произвольную seed-строку в 32 байта:
//!         bytes = H(domain || len || seed)
//!   - делать детерминированное доменное расширение по метке:
//!         child = H(domain || parent || len || label)
//!   - создавать ChaCha8-поток из seed
//!
//! Длина строки входит в хэш, поэтому пары ("ab", "c") и ("a", "bc")
//! дают разные результаты.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SEED_DOMAIN: &[u8] = b"DRAFT_ENGINE_SEED_V1";
const DERIVE_DOMAIN: &[u8] = b"DRAFT_ENGINE_DERIVE_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Seed из строки драфта (единственный корень случайности).
    pub fn from_seed_str(seed: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(SEED_DOMAIN);
        hasher.update((seed.len() as u64).to_le_bytes());
        hasher.update(seed.as_bytes());
        Self::from_digest(hasher)
    }

    /// Дочерний seed для под-потока с меткой `label`.
    ///
    /// Зависит только от родительского seed и метки, но не от того,
    /// сколько значений уже выдал родительский поток.
    pub fn derive(&self, label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DERIVE_DOMAIN);
        hasher.update(self.bytes);
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
        Self::from_digest(hasher)
    }

    /// ChaCha8 в начальном состоянии для этого seed.
    pub fn to_chacha(&self) -> ChaCha8Rng {
        ChaCha8Rng::from_seed(self.bytes)
    }

    fn from_digest(hasher: Sha256) -> Self {
        let hash = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);
        Self { bytes: out }
    }
}
