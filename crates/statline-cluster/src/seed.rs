use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for reproducible centroid initialization.
///
/// Serialized and parsed as a 32-character hexadecimal string, so a run can be
/// repeated by passing the seed it logged.
///
/// # Examples
///
/// ```
/// use rand::Rng as _;
/// use statline_cluster::seed::ClusterSeed;
///
/// let seed: ClusterSeed = rand::rng().random();
/// let parsed: ClusterSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterSeed([u8; 16]);

impl ClusterSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates the random generator that drives a clustering run.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for ClusterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Failure to parse a [`ClusterSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    Length { len: usize },
    #[display("invalid seed: {text} is not hexadecimal")]
    NotHex { text: String },
}

impl FromStr for ClusterSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        // from_str_radix accepts a leading sign
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::NotHex { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParseSeedError::NotHex { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ClusterSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClusterSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `ClusterSeed` values with `rng.random()`.
impl Distribution<ClusterSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ClusterSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ClusterSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed = ClusterSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, r#""0123456789abcdeffedcba9876543210""#);

        let deserialized: ClusterSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let seed = ClusterSeed::from_bytes([0; 16]);
        assert_eq!(seed.to_string(), "0".repeat(32));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(
            "abc".parse::<ClusterSeed>(),
            Err(ParseSeedError::Length { len: 3 })
        );
        let not_hex = "g".repeat(32);
        assert!(matches!(
            not_hex.parse::<ClusterSeed>(),
            Err(ParseSeedError::NotHex { .. })
        ));
        let signed = format!("+{}", "0".repeat(31));
        assert!(signed.parse::<ClusterSeed>().is_err());
        assert!(serde_json::from_str::<ClusterSeed>(r#""1234""#).is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: ClusterSeed = rand::rng().random();
        let a = seed.rng().random::<u64>();
        let b = seed.rng().random::<u64>();
        assert_eq!(a, b);
    }
}
