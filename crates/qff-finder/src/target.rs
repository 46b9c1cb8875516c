//! Ten-bit search targets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FinderError, FinderResult};

/// Number of qubits in the search register.
pub const NUM_QUBITS: u32 = 10;

/// Number of searchable entries, `2^NUM_QUBITS`.
pub const SEARCH_SPACE: usize = 1 << NUM_QUBITS;

/// Index of a directory entry, guaranteed to lie in `0..1024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct TargetIndex(u16);

impl TargetIndex {
    /// Smallest index.
    pub const MIN: TargetIndex = TargetIndex(0);
    /// Largest index.
    pub const MAX: TargetIndex = TargetIndex((SEARCH_SPACE - 1) as u16);

    /// Create an index, rejecting values outside the search space.
    pub fn new(index: u32) -> FinderResult<Self> {
        if (index as usize) < SEARCH_SPACE {
            Ok(Self(index as u16))
        } else {
            Err(FinderError::IndexOutOfRange(index))
        }
    }

    /// Get the raw value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Check whether bit `qubit` (counted from the least significant end) is set.
    pub fn bit(self, qubit: u32) -> bool {
        (self.0 >> qubit) & 1 == 1
    }

    /// Ten characters of `0`/`1`, most significant bit first.
    ///
    /// Character `k` from the right is qubit `k`, which is also how the
    /// simulator keys its counts.
    pub fn to_bitstring(self) -> String {
        format!("{:0width$b}", self.0, width = NUM_QUBITS as usize)
    }

    /// Parse a ten-character binary string.
    pub fn from_bitstring(bits: &str) -> FinderResult<Self> {
        let well_formed =
            bits.len() == NUM_QUBITS as usize && bits.bytes().all(|b| b == b'0' || b == b'1');
        if !well_formed {
            return Err(FinderError::InvalidBitstring(bits.to_string()));
        }
        u16::from_str_radix(bits, 2)
            .map(Self)
            .map_err(|_| FinderError::InvalidBitstring(bits.to_string()))
    }

    /// Iterate over every index in the search space.
    pub fn all() -> impl Iterator<Item = TargetIndex> {
        (0..SEARCH_SPACE as u16).map(Self)
    }
}

impl fmt::Display for TargetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for TargetIndex {
    type Error = FinderError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(u32::from(value))
    }
}

impl From<TargetIndex> for u16 {
    fn from(index: TargetIndex) -> Self {
        index.0
    }
}

impl From<TargetIndex> for usize {
    fn from(index: TargetIndex) -> Self {
        index.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert_eq!(TargetIndex::MIN.to_bitstring(), "0000000000");
        assert_eq!(TargetIndex::MAX.to_bitstring(), "1111111111");
        assert_eq!(TargetIndex::new(5).unwrap().to_bitstring(), "0000000101");
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            TargetIndex::new(1024),
            Err(FinderError::IndexOutOfRange(1024))
        ));
        assert!(TargetIndex::try_from(4000u16).is_err());
    }

    #[test]
    fn test_bits_follow_qubit_order() {
        let t = TargetIndex::new(0b10_0000_0001).unwrap();
        assert!(t.bit(0));
        assert!(t.bit(9));
        assert!(!t.bit(1));
        assert_eq!(t.to_bitstring().chars().last(), Some('1'));
    }

    #[test]
    fn test_rejects_malformed_bitstrings() {
        for bad in ["", "101", "00000000000", "00000000a0", "000000000 "] {
            assert!(TargetIndex::from_bitstring(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_serde_enforces_range() {
        let ok: TargetIndex = serde_json::from_str("17").unwrap();
        assert_eq!(ok.value(), 17);
        assert!(serde_json::from_str::<TargetIndex>("1024").is_err());
    }
}
