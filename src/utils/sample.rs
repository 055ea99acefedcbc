use rand::Rng;
use rand::seq::SliceRandom;

/// Draws up to `count` items uniformly without replacement.
///
/// The whole pool is Fisher-Yates shuffled before truncating, so every
/// ordering of the result is equally likely.
pub fn shuffle_and_take<T, R: Rng + ?Sized>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}
