use std::str::FromStr;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidBoundError;

/// Source of uniformly distributed integers for dice rolls.
///
/// Implementations seeded identically must produce identical sequences.
pub trait RandomSource {
    /// Returns an integer in `[0, bound_exclusive)`.
    ///
    /// Fails if `bound_exclusive` is zero.
    fn next_int(&mut self, bound_exclusive: usize) -> Result<usize, InvalidBoundError>;
}

impl<R> RandomSource for &mut R
where
    R: RandomSource + ?Sized,
{
    fn next_int(&mut self, bound_exclusive: usize) -> Result<usize, InvalidBoundError> {
        (**self).next_int(bound_exclusive)
    }
}

/// Seed for reproducible board rolls.
///
/// A 128-bit value serialized as a 32-character hex string. Two
/// [`DiceRng`]s built from the same seed roll the same boards, which is what
/// makes replays and regression tests possible.
///
/// # Example
///
/// ```
/// use lexidice_engine::{DiceRng, DiceSeed, RandomSource as _};
///
/// let seed: DiceSeed = "000000000000000000000000deadbeef".parse().unwrap();
/// let mut a = DiceRng::with_seed(seed);
/// let mut b = DiceRng::with_seed(seed);
/// assert_eq!(a.next_int(100), b.next_int(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceSeed([u8; 16]);

impl DiceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        format!("{num:032x}")
    }
}

impl FromStr for DiceSeed {
    type Err = String;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DiceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DiceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<DiceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DiceSeed(seed)
    }
}

/// PCG32-backed [`RandomSource`].
#[derive(Debug, Clone)]
pub struct DiceRng {
    seed: DiceSeed,
    rng: Pcg32,
}

impl Default for DiceRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRng {
    /// Creates a generator seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: DiceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self::with_seed(DiceSeed::from_u64(value))
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> DiceSeed {
        self.seed
    }
}

impl RandomSource for DiceRng {
    fn next_int(&mut self, bound_exclusive: usize) -> Result<usize, InvalidBoundError> {
        if bound_exclusive == 0 {
            return Err(InvalidBoundError {
                bound: bound_exclusive,
            });
        }
        Ok(self.rng.random_range(0..bound_exclusive))
    }
}
