//! The synthetic friend directory.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::target::TargetIndex;

/// Length of a generated phone number.
pub const PHONE_DIGITS: usize = 10;

/// Display name of the friend at `index`.
pub fn friend_name(index: TargetIndex) -> String {
    format!("Friend_{index}")
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// Position in the directory, equal to the search target.
    pub index: TargetIndex,
    /// Display name, `Friend_{index}`.
    pub name: String,
    /// Ten random decimal digits.
    pub phone: String,
}

/// 1024 friends with random phone numbers.
///
/// A new directory is generated for every interaction, so phone numbers
/// change between runs while a name always maps to the same index.
#[derive(Debug, Clone)]
pub struct Directory {
    friends: Vec<Friend>,
    by_name: FxHashMap<String, usize>,
}

impl Directory {
    /// Generate the directory, drawing phone digits from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let friends: Vec<Friend> = TargetIndex::all()
            .map(|index| Friend {
                index,
                name: friend_name(index),
                phone: (0..PHONE_DIGITS)
                    .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                    .collect(),
            })
            .collect();

        let by_name = friends
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();

        Self { friends, by_name }
    }

    /// Generate a reproducible directory.
    pub fn generate_seeded(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    /// Generate a directory from OS entropy.
    pub fn random() -> Self {
        Self::generate(&mut StdRng::from_entropy())
    }

    /// Number of entries, always 1024.
    pub fn len(&self) -> usize {
        self.friends.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    /// Look a friend up by exact name.
    pub fn get(&self, name: &str) -> Option<&Friend> {
        self.by_name.get(name).map(|&i| &self.friends[i])
    }

    /// Look a friend up by index.
    pub fn by_index(&self, index: TargetIndex) -> &Friend {
        &self.friends[usize::from(index)]
    }

    /// Names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.friends.iter().map(|f| f.name.as_str())
    }

    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Friend> {
        self.friends.iter()
    }
}
