//! Single-point crossover on horde genomes.

use rand::Rng;

use crate::gp::genome::Genome;

/// Combine two parents into one child of at most `max_len` genes.
///
/// The cut point is drawn from `[0, min(len a, len b))` and the child is
/// `a[..cut] + b[cut..]`. If either parent has fewer than two genes there
/// is nothing to cut, so a coin flip picks one parent to copy whole.
#[must_use]
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, max_len: usize, rng: &mut R) -> Genome {
    if parent1.len() < 2 || parent2.len() < 2 {
        return if rng.gen_bool(0.5) {
            parent1.clone()
        } else {
            parent2.clone()
        };
    }

    let cut = rng.gen_range(0..parent1.len().min(parent2.len()));
    let mut genes = parent1.genes[..cut].to_vec();
    genes.extend_from_slice(&parent2.genes[cut..]);
    genes.truncate(max_len);

    Genome { genes }
}
