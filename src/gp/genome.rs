//! Genome representation for horde search.
//!
//! A genome is the ordered list of archetypes making up a horde. Spawn
//! times are not part of the genome; they follow from gene order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::ArchetypeId;

/// Ordered archetype choices for one candidate horde.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Genome {
    /// Archetypes in spawn order.
    pub genes: Vec<ArchetypeId>,
}

impl Genome {
    /// Create a genome from explicit genes.
    #[must_use]
    pub fn new(genes: Vec<ArchetypeId>) -> Self {
        Self { genes }
    }

    /// Random genome with length uniform in `[1, max_len]`.
    ///
    /// `catalog_len` must be positive.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, catalog_len: usize, max_len: usize) -> Self {
        let len = rng.gen_range(1..=max_len.max(1));
        let genes = (0..len).map(|_| random_gene(rng, catalog_len)).collect();
        Self { genes }
    }

    /// Number of enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Uniform draw from a catalog of `catalog_len` archetypes.
pub(crate) fn random_gene<R: Rng>(rng: &mut R, catalog_len: usize) -> ArchetypeId {
    ArchetypeId(rng.gen_range(0..catalog_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_genome_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let genome = Genome::random(&mut rng, 4, 10);
            assert!((1..=10).contains(&genome.len()));
            assert!(genome.genes.iter().all(|g| g.0 < 4));
        }
    }

    #[test]
    fn test_random_genome_covers_full_length_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let lengths: std::collections::HashSet<usize> =
            (0..2000).map(|_| Genome::random(&mut rng, 2, 5).len()).collect();
        assert_eq!(lengths.len(), 5);
    }

    #[test]
    fn test_zero_max_len_still_yields_one_gene() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(Genome::random(&mut rng, 3, 0).len(), 1);
    }
}
