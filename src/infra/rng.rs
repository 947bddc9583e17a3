use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::infra::rng_seed::RngSeed;

/// Ошибки неправильного использования RNG.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RngError {
    #[error("Некорректный аргумент: {0}")]
    InvalidArgument(String),

    #[error("Выбор из пустого набора")]
    EmptyInput,
}

/// Детерминированный RNG драфта.
///
/// Один и тот же seed всегда даёт одну и ту же последовательность.
/// Экземпляр хранит позицию в потоке, поэтому его нельзя делить между
/// независимыми реплеями: каждый вызов создаёт свой.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: String,
    root: RngSeed,
    inner: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let root = RngSeed::from_seed_str(&seed);
        Self {
            seed,
            inner: root.to_chacha(),
            root,
        }
    }

    /// Исходная seed-строка потока (для дочерних: с меткой).
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Следующее число в [0, 1).
    pub fn next(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Целое в [min, max).
    pub fn next_int(&mut self, min: i64, max: i64) -> Result<i64, RngError> {
        if min >= max {
            return Err(RngError::InvalidArgument(format!(
                "min ({min}) должен быть меньше max ({max})"
            )));
        }
        // Ширина диапазона может не влезть в i64: считаем в i128.
        let (min, max) = (i128::from(min), i128::from(max));
        let span = (max - min) as f64;
        let offset = (self.next() * span).floor() as i128;
        // f64 может округлить вверх на очень больших диапазонах.
        Ok((min + offset).min(max - 1) as i64)
    }

    /// Индекс в [0, n).
    pub fn next_int_max(&mut self, n: usize) -> Result<usize, RngError> {
        self.next_int(0, n as i64).map(|v| v as usize)
    }

    /// Новый вектор, перемешанный Фишером–Йетсом на этом потоке.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = (self.next() * (i + 1) as f64).floor() as usize;
            out.swap(i, j.min(i));
        }
        out
    }

    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyInput);
        }
        let idx = self.next_int_max(items.len())?;
        Ok(&items[idx])
    }

    /// k уникальных (по позиции) элементов.
    pub fn sample<T: Clone>(&mut self, items: &[T], k: usize) -> Result<Vec<T>, RngError> {
        if k > items.len() {
            return Err(RngError::InvalidArgument(format!(
                "нельзя выбрать {k} элементов из {}",
                items.len()
            )));
        }
        let mut shuffled = self.shuffle(items);
        shuffled.truncate(k);
        Ok(shuffled)
    }

    /// Независимый дочерний поток, привязанный к метке.
    ///
    /// Не зависит от текущей позиции родителя: `derive("bot1")` сразу
    /// после создания и после тысячи `next()` даёт один и тот же поток.
    pub fn derive(&self, label: &str) -> SeededRandom {
        let root = self.root.derive(label);
        SeededRandom {
            seed: format!("{}::{}", self.seed, label),
            inner: root.to_chacha(),
            root,
        }
    }

    /// Перемотать поток в начальное состояние.
    pub fn reset(&mut self) {
        self.inner = self.root.to_chacha();
    }
}

/// Нужен, чтобы распределения из `rand_distr` брали значения из нашего потока.
impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

