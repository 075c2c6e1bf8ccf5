//! Tile pool: converts a target word into scored letter tiles.
//!
//! Tiles are created fresh for each round and destroyed when the round is
//! replaced. Randomized ordering goes through an injected [`Rng`] so tests
//! can supply a seeded source.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identity of a tile within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// A single scored letter tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique id within the round.
    pub id: TileId,
    /// Uppercase letter the tile carries.
    pub letter: char,
    /// Point value from the fixed letter table.
    pub value: u32,
    /// Set when the tile was placed by the hint algorithm. Hinted tiles
    /// cannot be picked back up by the player.
    pub hinted: bool,
}

/// Point values for A-Z, letter-frequency weighted (Scrabble distribution).
const LETTER_VALUES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, // A-M
    1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10, // N-Z
];

/// Returns the point value of a letter. Non-alphabetic characters score zero.
pub fn letter_value(letter: char) -> u32 {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        LETTER_VALUES[(upper as u8 - b'A') as usize]
    } else {
        0
    }
}

/// Sum of the letter values of a word.
pub fn word_value(word: &str) -> u32 {
    word.chars().map(letter_value).sum()
}

/// Builds one tile per character of `word`, in original order, with fresh
/// sequential ids. Letters are uppercased; values come from the fixed table.
pub fn tiles_for(word: &str) -> Vec<Tile> {
    word.chars()
        .enumerate()
        .map(|(i, c)| Tile {
            id: TileId(i as u32),
            letter: c.to_ascii_uppercase(),
            value: letter_value(c),
            hinted: false,
        })
        .collect()
}

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Iterates from the last index down to 1, swapping each element with a
/// uniformly random element at an index no greater than its own.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_tiles_reconstruct_word() {
        let tiles = tiles_for("chair");
        let letters: String = tiles.iter().map(|t| t.letter).collect();
        assert_eq!(letters, "CHAIR");
        assert_eq!(tiles.len(), 5);
    }

    #[test]
    fn test_tile_ids_unique() {
        let tiles = tiles_for("LETTER");
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id, TileId(i as u32));
        }
    }

    #[test]
    fn test_chair_value_is_ten() {
        // C=3, H=4, A=1, I=1, R=1
        assert_eq!(word_value("CHAIR"), 10);
        let sum: u32 = tiles_for("CHAIR").iter().map(|t| t.value).sum();
        assert_eq!(sum, 10);
    }

    #[test]
    fn test_extreme_letter_values() {
        assert_eq!(letter_value('A'), 1);
        assert_eq!(letter_value('q'), 10);
        assert_eq!(letter_value('Z'), 10);
        assert_eq!(letter_value('-'), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = tiles_for("ELEPHANT");
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);

        let mut a: Vec<char> = original.iter().map(|t| t.letter).collect();
        let mut b: Vec<char> = shuffled.iter().map(|t| t.letter).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b, "shuffle must preserve the multiset of letters");
    }

    #[test]
    fn test_shuffle_moves_something_eventually() {
        // With 20 attempts on an 8-tile rack, the identity permutation every
        // time is astronomically unlikely.
        let mut rng = StdRng::seed_from_u64(42);
        let original = tiles_for("ELEPHANT");
        let mut moved = false;
        for _ in 0..20 {
            let mut tiles = original.clone();
            shuffle(&mut tiles, &mut rng);
            if tiles != original {
                moved = true;
                break;
            }
        }
        assert!(moved, "shuffle never produced a non-identity permutation");
    }
}
