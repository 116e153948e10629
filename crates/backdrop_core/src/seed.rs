//! Seeds for the decorative randomness
//!
//! Layouts are reproducible when a seed is configured; otherwise a fresh
//! seed is drawn from the thread-local generator.

use rand::RngExt;

/// A seed that differs between runs and between calls
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// `seed` if configured, otherwise [`entropy_seed`]
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(entropy_seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_seed_wins() {
        assert_eq!(resolve_seed(Some(7)), 7);
    }

    #[test]
    fn test_unseeded_draws_differ() {
        let seeds: Vec<u64> = (0..4).map(|_| resolve_seed(None)).collect();
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
    }
}
