use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::domain::Card;
use crate::engine::RandomSource;

/// Боевой RNG: Fisher–Yates из `rand` поверх `thread_rng`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }
}

/// "Подтасованная" колода: заданные карты идут первыми в указанном порядке,
/// остальные – за ними в исходном порядке.
///
/// Нужна для реплея конкретной раздачи и для тестов.
#[derive(Clone, Debug, Default)]
pub struct FixedOrderRng {
    top: Vec<Card>,
}

impl FixedOrderRng {
    pub fn new(top: Vec<Card>) -> Self {
        Self { top }
    }
}

impl RandomSource for FixedOrderRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let top = &self.top;
        cards.sort_by_key(|c| top.iter().position(|t| t == c).unwrap_or(usize::MAX));
    }
}
