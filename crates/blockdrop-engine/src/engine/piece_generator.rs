use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{ParseSeedError, PieceKind};

/// Supplies the piece kinds the game hands out, each drawn uniformly at random.
///
/// # Example
///
/// ```
/// use blockdrop_engine::{PieceGenerator, PieceSeed};
///
/// let mut a = PieceGenerator::with_seed(PieceSeed::from_u64(7));
/// let mut b = PieceGenerator::with_seed(PieceSeed::from_u64(7));
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the generator's RNG. Its text form is 32 hex digits,
/// which is also how it appears in JSON.
///
/// # Example
///
/// ```
/// use blockdrop_engine::PieceSeed;
///
/// let seed = PieceSeed::from_u64(255);
/// assert_eq!(seed.to_string(), format!("{:0>32}", "ff"));
/// assert_eq!(seed.to_string().parse::<PieceSeed>(), Ok(seed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    const HEX_DIGITS: usize = 32;

    /// Widens a small seed, e.g. one given on the command line.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self(u128::from(seed).to_be_bytes())
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_DIGITS || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError(s.to_owned()));
        }
        u128::from_str_radix(s, 16)
            .map(|num| Self(num.to_be_bytes()))
            .map_err(|_| ParseSeedError(s.to_owned()))
    }
}

impl From<PieceSeed> for String {
    fn from(seed: PieceSeed) -> Self {
        seed.to_string()
    }
}

impl TryFrom<String> for PieceSeed {
    type Error = ParseSeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For a reproducible sequence use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}
