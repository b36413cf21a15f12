//! Fitness-proportionate parent selection.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::solution::Solution;
use rand::Rng;

/// Roulette wheel selection biased toward short tours.
///
/// Each member is weighted `min_distance / distance`, so the shortest tour
/// has weight 1 and longer tours proportionally less. A uniform draw in
/// `[0, sum)` picks the first member whose cumulative weight reaches it.
///
/// A member of length 0 (all points coincident) is returned outright.
///
/// # Complexity
/// O(n) per selection (linear scan)
///
/// # Panics
/// Panics if `population` is empty.
pub fn roulette<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    if n == 1 {
        return 0;
    }

    let distances: Vec<f64> = population.iter().map(Solution::distance).collect();
    let min_distance = distances.iter().copied().fold(f64::INFINITY, f64::min);

    if min_distance <= 0.0 {
        return distances
            .iter()
            .position(|&d| d <= 0.0)
            .unwrap_or(0);
    }

    let weights: Vec<f64> = distances.iter().map(|&d| min_distance / d).collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative >= threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Point;
    use crate::random::create_rng;
    use std::sync::Arc;

    /// Two-point tours whose length is exactly `2 * gap`.
    fn make_population(gaps: &[i32]) -> Vec<Solution> {
        gaps.iter()
            .map(|&g| {
                let points: Arc<[Point]> =
                    vec![Point::new("a", 0, 0), Point::new("b", g, 0)].into();
                Solution::new(points)
            })
            .collect()
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100, 50, 1, 80]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[roulette(&pop, &mut rng)] += 1;
        }
        let best_count = counts[2];
        assert!(
            counts.iter().all(|&c| c <= best_count),
            "best should be selected most often: {counts:?}"
        );
        assert!(counts[0] > 0, "longer tours keep a non-zero chance: {counts:?}");
    }

    #[test]
    fn test_roulette_proportions() {
        // Weights 1 and 0.5: the shorter tour should win about 2/3 of draws.
        let pop = make_population(&[10, 20]);
        let mut rng = create_rng(7);
        let n = 30000;
        let wins = (0..n).filter(|_| roulette(&pop, &mut rng) == 0).count();
        let share = wins as f64 / n as f64;
        assert!((share - 2.0 / 3.0).abs() < 0.02, "share = {share}");
    }

    #[test]
    fn test_equal_distances_are_uniform() {
        let pop = make_population(&[5, 5, 5, 5]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[roulette(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_zero_distance_member_wins() {
        let pop = make_population(&[7, 0, 3]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert_eq!(roulette(&pop, &mut rng), 1);
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5]);
        let mut rng = create_rng(42);
        assert_eq!(roulette(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Solution> = vec![];
        let mut rng = create_rng(42);
        roulette(&pop, &mut rng);
    }
}
