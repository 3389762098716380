//! Per-die RNG streams derived from a single game seed.
use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// One independent stream per die, so adding a die never perturbs the
/// sequences of the dice before it.
#[derive(Debug, Clone)]
pub struct DiceStreams {
    seed: u64,
    streams: Vec<CountingRng<ChaCha20Rng>>,
}

impl DiceStreams {
    /// Derive `die_count` streams from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64, die_count: usize) -> Self {
        let streams = (0..die_count)
            .map(|index| {
                let tag = format!("die-{index}");
                let stream_seed = derive_stream_seed(seed, tag.as_bytes());
                log::trace!("derived stream seed {stream_seed:#018x} for {tag}");
                CountingRng::new(stream_seed)
            })
            .collect();
        Self { seed, streams }
    }

    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy(die_count: usize) -> Self {
        Self::from_user_seed(rand::random::<u64>(), die_count)
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Mutable access to the stream of die `index`.
    pub fn stream(&mut self, index: usize) -> Option<&mut CountingRng<ChaCha20Rng>> {
        self.streams.get_mut(index)
    }

    pub(crate) fn streams_mut(&mut self) -> &mut [CountingRng<ChaCha20Rng>] {
        &mut self.streams
    }

    /// Draw counters for every stream, in die order.
    #[must_use]
    pub fn draws(&self) -> Vec<u64> {
        self.streams.iter().map(CountingRng::draws).collect()
    }
}
