use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

/// Seeded randomness for a whole run. Every roll flows through one
/// `RngState`, so a seed plus the same action sequence replays a run.
#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// True with probability `percent / 100`. Zero never passes, 100 always does.
    pub fn roll_percent(&mut self, percent: u8) -> bool {
        (self.next_u64() % 100) < u64::from(percent.min(100))
    }

    /// Inclusive pick from `min..=max`; an empty range collapses to `min`.
    pub fn pick_range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + (self.next_u64() % span) as i64
    }
}
