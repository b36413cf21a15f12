//! Population of tours and the generation step.

use super::config::GaConfig;
use super::selection::roulette;
use super::solution::Solution;
use super::types::Point;
use crate::random::create_rng;
use rand::Rng;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parents and breeding seed of one crossover pair.
#[derive(Debug, Clone, Copy)]
struct Pairing {
    first: usize,
    second: usize,
    seed: u64,
}

/// A fixed-size set of competing tours, kept sorted shortest first.
///
/// The size is derived from the instance by
/// [`GaConfig::population_size`] and never changes.
#[derive(Debug, Clone)]
pub struct Population {
    solutions: Vec<Solution>,
    size: usize,
    elite: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl Population {
    /// Builds the initial population.
    ///
    /// Starts from the tour visiting `points` in input order and adds
    /// `size` independently shuffled copies of it, then keeps the `size`
    /// shortest.
    pub fn new<R: Rng>(points: Arc<[Point]>, config: &GaConfig, rng: &mut R) -> Self {
        let size = config.population_size(points.len());
        let baseline = Solution::new(points);

        let mut solutions = Vec::with_capacity(size + 1);
        for _ in 0..size {
            let mut s = baseline.clone();
            s.randomize(rng);
            solutions.push(s);
        }
        solutions.push(baseline);

        let mut population = Self {
            solutions,
            size,
            elite: config.elite_count(size),
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            parallel: config.parallel,
        };
        population.sort_and_truncate();
        population
    }

    /// Configured number of members.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of members carried unchanged into each new generation.
    pub fn elite_count(&self) -> usize {
        self.elite
    }

    /// Members, shortest tour first.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// The shortest tour of the current generation.
    pub fn best(&self) -> &Solution {
        &self.solutions[0]
    }

    /// Picks a parent by roulette selection.
    pub fn roulette_selection<R: Rng>(&self, rng: &mut R) -> &Solution {
        &self.solutions[roulette(&self.solutions, rng)]
    }

    /// Advances the population by one generation.
    ///
    /// 1. The elites are copied unchanged.
    /// 2. Pairs of roulette-selected parents each produce two children by
    ///    greedy subtour crossover, one per parent order, until the next
    ///    generation is full.
    /// 3. Every member, elites included, gets a chance of hill-climbing
    ///    swap mutation.
    /// 4. The next generation replaces the current one, sorted and
    ///    truncated to `size`.
    ///
    /// Selection and seeding draw from `rng` in a fixed order; breeding
    /// and mutation use per-task generators seeded from those draws, so
    /// the outcome does not depend on whether they run in parallel.
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let pairs = (self.size - self.elite).div_ceil(2);
        let pairings: Vec<Pairing> = (0..pairs)
            .map(|_| Pairing {
                first: roulette(&self.solutions, rng),
                second: roulette(&self.solutions, rng),
                seed: rng.random(),
            })
            .collect();

        let mut next = Vec::with_capacity(self.elite + 2 * pairs);
        next.extend_from_slice(&self.solutions[..self.elite]);
        next.extend(self.breed(&pairings));

        let seeds: Vec<u64> = next.iter().map(|_| rng.random()).collect();
        self.mutate_all(&mut next, &seeds);

        self.solutions = next;
        self.sort_and_truncate();
    }

    fn breed(&self, pairings: &[Pairing]) -> Vec<Solution> {
        let rate = self.crossover_rate;
        let parents = &self.solutions;
        let children = |p: &Pairing| {
            let mut rng = create_rng(p.seed);
            let a = &parents[p.first];
            let b = &parents[p.second];
            [
                a.crossover_greedy(b, rate, &mut rng),
                b.crossover_greedy(a, rate, &mut rng),
            ]
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            return pairings.par_iter().flat_map_iter(children).collect();
        }

        pairings.iter().flat_map(children).collect()
    }

    fn mutate_all(&self, members: &mut [Solution], seeds: &[u64]) {
        let rate = self.mutation_rate;
        let mutate = |(s, &seed): (&mut Solution, &u64)| {
            s.mutate_swap(rate, &mut create_rng(seed));
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            members.par_iter_mut().zip(seeds.par_iter()).for_each(mutate);
            return;
        }

        members.iter_mut().zip(seeds.iter()).for_each(mutate);
    }

    fn sort_and_truncate(&mut self) {
        self.solutions
            .sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        self.solutions.truncate(self.size);
    }
}
