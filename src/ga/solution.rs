//! Tour representation.
//!
//! A [`Solution`] is a permutation of indices into a shared, immutable
//! point set, together with a lazily computed closed-loop length.

use super::operators::{greedy_subtour_crossover, random_pair};
use super::types::Point;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, OnceLock};

/// Number of swap attempts per hill-climbing mutation.
const SWAP_ATTEMPTS: usize = 3;

/// A closed tour visiting every point of the run exactly once.
///
/// The tour length is cached: it is unknown until first read and reset
/// to unknown by every in-place change of the order. Cloning copies the
/// order, so two live tours never share sequence storage.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::ga::{Point, Solution};
///
/// let points: Arc<[Point]> = vec![
///     Point::new("A", 0, 0),
///     Point::new("B", 0, 10),
///     Point::new("C", 10, 10),
///     Point::new("D", 10, 0),
/// ]
/// .into();
/// let tour = Solution::new(points);
/// assert!((tour.distance() - 40.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    points: Arc<[Point]>,
    order: Vec<usize>,
    distance: OnceLock<f64>,
}

impl Solution {
    /// Creates the tour visiting `points` in their given order.
    pub fn new(points: Arc<[Point]>) -> Self {
        let order = (0..points.len()).collect();
        Self {
            points,
            order,
            distance: OnceLock::new(),
        }
    }

    /// Creates a tour from an explicit visiting order.
    ///
    /// Returns `None` unless `order` is a permutation of `0..points.len()`.
    pub fn from_order(points: Arc<[Point]>, order: Vec<usize>) -> Option<Self> {
        let n = points.len();
        if order.len() != n {
            return None;
        }
        let mut seen = vec![false; n];
        for &i in &order {
            if i >= n || std::mem::replace(&mut seen[i], true) {
                return None;
            }
        }
        Some(Self {
            points,
            order,
            distance: OnceLock::new(),
        })
    }

    /// Number of points in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour has no points.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visiting order as indices into the shared point set.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The shared point set, in input order.
    pub fn point_set(&self) -> &Arc<[Point]> {
        &self.points
    }

    /// Points in visiting order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.order.iter().map(move |&i| &self.points[i])
    }

    /// Point names in visiting order.
    pub fn names(&self) -> Vec<String> {
        self.points().map(|p| p.name.clone()).collect()
    }

    /// Total length of the closed tour, including the edge from the last
    /// point back to the first.
    ///
    /// Tours of fewer than two points have length 0.
    pub fn distance(&self) -> f64 {
        *self.distance.get_or_init(|| self.compute_distance())
    }

    fn compute_distance(&self) -> f64 {
        if self.order.len() < 2 {
            return 0.0;
        }
        let closing = (self.order[self.order.len() - 1], self.order[0]);
        self.order
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(std::iter::once(closing))
            .map(|(a, b)| self.points[a].distance_to(&self.points[b]))
            .sum()
    }

    fn invalidate(&mut self) {
        self.distance.take();
    }

    /// Shuffles the visiting order uniformly.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
        self.invalidate();
    }

    /// Two distinct random positions of this tour, or `None` for fewer
    /// than two points.
    pub fn random_index<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        random_pair(self.order.len(), rng)
    }

    /// Hill-climbing swap mutation applied with probability `rate`.
    ///
    /// See [`force_mutate_swap`](Self::force_mutate_swap).
    pub fn mutate_swap<R: Rng>(&mut self, rate: f64, rng: &mut R) -> &mut Self {
        if rng.random_bool(rate.clamp(0.0, 1.0)) {
            self.force_mutate_swap(rng);
        }
        self
    }

    /// Hill-climbing swap mutation, always applied.
    ///
    /// Tries a few random two-position swaps; each one is kept only if it
    /// shortens the tour and reverted otherwise. The tour never gets
    /// longer.
    pub fn force_mutate_swap<R: Rng>(&mut self, rng: &mut R) -> &mut Self {
        for _ in 0..SWAP_ATTEMPTS {
            let Some((a, b)) = self.random_index(rng) else {
                break;
            };
            let before = self.distance();
            self.order.swap(a, b);
            self.invalidate();
            if self.distance() >= before {
                self.order.swap(a, b);
                self.invalidate();
                // Same order as before the swap, so the old length is exact.
                let _ = self.distance.set(before);
            }
        }
        self
    }

    /// Greedy subtour crossover applied with probability `rate`.
    ///
    /// When the crossover is skipped the child is a clone of `self`.
    pub fn crossover_greedy<R: Rng>(&self, other: &Solution, rate: f64, rng: &mut R) -> Solution {
        if rng.random_bool(rate.clamp(0.0, 1.0)) {
            self.force_crossover_greedy(other, rng)
        } else {
            self.clone()
        }
    }

    /// Greedy subtour crossover, always applied.
    ///
    /// The child grows outward from a random anchor point, leftwards in
    /// `self`'s order and rightwards in `other`'s order; points neither
    /// side reaches are appended in random order.
    ///
    /// # Panics
    /// Panics if the parents do not share the same point set.
    pub fn force_crossover_greedy<R: Rng>(&self, other: &Solution, rng: &mut R) -> Solution {
        assert!(
            Arc::ptr_eq(&self.points, &other.points),
            "parents must share the same point set"
        );
        Solution {
            points: Arc::clone(&self.points),
            order: greedy_subtour_crossover(&self.order, &other.order, rng),
            distance: OnceLock::new(),
        }
    }
}
