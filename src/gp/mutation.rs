//! Per-gene mutation.

use rand::Rng;

use crate::gp::genome::{random_gene, Genome};

/// Redraw each gene from the catalog with probability `rate`.
///
/// `rate` must lie in `[0, 1]`.
pub fn mutate<R: Rng>(genome: &mut Genome, rate: f64, catalog_len: usize, rng: &mut R) {
    for gene in &mut genome.genes {
        if rng.gen_bool(rate) {
            *gene = random_gene(rng, catalog_len);
        }
    }
}
