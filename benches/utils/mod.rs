use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeSet;

/// `size` distinct lowercase strings, the same ones on every run.
pub fn random_strings(size: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut set = BTreeSet::new();
    while set.len() < size {
        let len = rng.random_range(5..20);
        let s: String = (0..len)
            .map(|_| rng.random_range(b'a'..=b'z') as char)
            .collect();
        set.insert(s);
    }
    set.into_iter().collect()
}

/// A fixed shuffle of `vec`, for visiting keys out of insertion order.
pub fn reorder<A: Clone>(vec: &[A]) -> Vec<A> {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut out = vec.to_vec();
    out.shuffle(&mut rng);
    out
}
