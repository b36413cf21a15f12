//! Search controller: the generation loop and its termination policy.
//!
//! [`SearchController`] owns a [`Population`] and steps it one generation
//! at a time until one of these holds:
//!
//! - **timed mode** (`max_time` set): the wall-clock budget is spent;
//! - **stagnation mode** (no `max_time`): the best distance stopped
//!   moving, see [`StagnationWindow`];
//! - the optional generation cap is reached;
//! - an observer or the cancellation flag asked to stop;
//! - the instance has fewer than two points, in which case no generation
//!   runs at all.

use super::config::GaConfig;
use super::observer::{Observer, Snapshot};
use super::population::Population;
use super::solution::Solution;
use super::types::Point;
use crate::error::{Error, Result};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The wall-clock budget was spent.
    TimeLimit,
    /// The best distance stopped changing.
    Stagnation,
    /// `max_generations` generations ran.
    GenerationLimit,
    /// An observer or the cancellation flag asked to stop.
    Cancelled,
    /// Fewer than two points; there was nothing to optimize.
    Degenerate,
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Shortest tour of the last generation.
    pub best: Solution,
    /// Length of `best`.
    pub total_distance: f64,
    /// Point names of `best`, in visiting order.
    pub ordered_names: Vec<String>,
    /// Generations executed.
    pub generations: usize,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
    /// Why the search stopped.
    pub stop: StopReason,
}

/// Rolling window of best-of-generation distances.
///
/// Once the window holds more than `capacity` values, its population
/// standard deviation is compared with `epsilon`: at or below it the
/// search has converged, above it the window is cleared and refilled from
/// scratch.
#[derive(Debug, Clone)]
pub struct StagnationWindow {
    values: Vec<f64>,
    capacity: usize,
    epsilon: f64,
}

impl StagnationWindow {
    /// Creates an empty window checked every `capacity + 1` values.
    pub fn new(capacity: usize, epsilon: f64) -> Self {
        Self {
            values: Vec::new(),
            capacity,
            epsilon,
        }
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records one best distance and reports whether the window has
    /// converged.
    pub fn push(&mut self, distance: f64) -> bool {
        self.values.push(distance);
        if self.values.len() <= self.capacity {
            return false;
        }

        let (mean, std_dev) = mean_std_dev(&self.values);
        log::debug!(
            "stagnation window: n={} mean={mean:.6} std_dev={std_dev:e}",
            self.values.len()
        );
        if std_dev <= self.epsilon {
            true
        } else {
            self.values.clear();
            false
        }
    }
}

/// Mean and population standard deviation of a non-empty slice.
fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Drives the evolutionary search.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, Point, SearchController};
///
/// let points = vec![
///     Point::new("A", 0, 0),
///     Point::new("B", 0, 10),
///     Point::new("C", 10, 10),
///     Point::new("D", 10, 0),
/// ];
/// let mut controller = SearchController::new(points, GaConfig::default().with_seed(1))?;
/// let result = controller.run();
/// assert!((result.total_distance - 40.0).abs() < 1e-9);
/// # Ok::<(), u_tsp::Error>(())
/// ```
#[derive(Debug)]
pub struct SearchController {
    config: GaConfig,
    population: Population,
    window: StagnationWindow,
    rng: StdRng,
    start: Instant,
    elapsed: Duration,
    generation: usize,
    converged: bool,
    cancelled: bool,
}

impl SearchController {
    /// Prepares a search over `points`.
    ///
    /// The random generator is seeded here, once, from `config.seed`.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `config` does not validate,
    /// [`Error::DuplicatePoint`] if two points share a name.
    pub fn new(points: Vec<Point>, config: GaConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut names = HashSet::with_capacity(points.len());
        if let Some(dup) = points.iter().find(|p| !names.insert(p.name.as_str())) {
            return Err(Error::DuplicatePoint(dup.name.clone()));
        }

        let points: Arc<[Point]> = points.into();
        let mut rng = rng_from_seed(config.seed);
        let population = Population::new(points, &config, &mut rng);
        let window = StagnationWindow::new(
            config.factor_end_size.saturating_mul(population.size()),
            config.stagnation_epsilon,
        );

        log::info!(
            "search prepared: points={} population={} elites={} mode={}",
            population.best().len(),
            population.size(),
            population.elite_count(),
            match config.max_time {
                Some(t) => format!("timed({t:?})"),
                None => "stagnation".to_string(),
            }
        );

        Ok(Self {
            config,
            population,
            window,
            rng,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            generation: 0,
            converged: false,
            cancelled: false,
        })
    }

    /// Runs one generation and records its best distance.
    pub fn step(&mut self) {
        let previous = self.best().distance();
        self.population.update(&mut self.rng);
        self.generation += 1;
        self.elapsed = self.start.elapsed();

        let best = self.best().distance();
        if best < previous {
            log::debug!("generation {}: best distance {best:.3}", self.generation);
        } else {
            log::trace!("generation {}: best distance {best:.3}", self.generation);
        }

        if self.config.max_time.is_none() {
            self.converged = self.window.push(best);
        }
    }

    /// Why the search should stop now, if it should.
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.best().len() < 2 {
            return Some(StopReason::Degenerate);
        }
        if self.cancelled {
            return Some(StopReason::Cancelled);
        }
        match self.config.max_time {
            Some(limit) if self.start.elapsed() >= limit => return Some(StopReason::TimeLimit),
            Some(_) => {}
            None if self.converged => return Some(StopReason::Stagnation),
            None => {}
        }
        match self.config.max_generations {
            Some(cap) if self.generation >= cap => Some(StopReason::GenerationLimit),
            _ => None,
        }
    }

    /// Whether the search has finished.
    pub fn is_ended(&self) -> bool {
        self.stop_reason().is_some()
    }

    /// Runs until the termination policy is met.
    pub fn run(&mut self) -> SearchResult {
        self.run_with(None, None)
    }

    /// Runs with an optional observer and cancellation flag.
    ///
    /// The observer sees every generation; returning `Break` stops the
    /// search, as does setting `cancel` to `true`. Both are checked once
    /// per generation.
    pub fn run_with(
        &mut self,
        mut observer: Option<&mut dyn Observer>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SearchResult {
        self.start = Instant::now();

        let stop = loop {
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    self.cancelled = true;
                }
            }
            if let Some(reason) = self.stop_reason() {
                break reason;
            }

            self.step();

            if let Some(observer) = observer.as_deref_mut() {
                let flow = observer.on_generation(&self.snapshot());
                if flow.is_break() {
                    self.cancelled = true;
                }
            }
        };
        self.elapsed = self.start.elapsed();

        let result = self.result(stop);
        log::info!(
            "search finished: reason={:?} distance={:.3} generations={} elapsed={:?}",
            result.stop,
            result.total_distance,
            result.generations,
            result.elapsed
        );
        result
    }

    /// Current state, as handed to observers.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            generation: self.generation,
            best: self.best(),
            best_distance: self.best().distance(),
            elapsed: self.elapsed,
        }
    }

    fn result(&self, stop: StopReason) -> SearchResult {
        let best = self.best().clone();
        SearchResult {
            total_distance: best.distance(),
            ordered_names: best.names(),
            best,
            generations: self.generation,
            elapsed: self.elapsed,
            stop,
        }
    }

    /// Shortest tour of the latest generation.
    pub fn best(&self) -> &Solution {
        self.population.best()
    }

    /// Length of the shortest tour.
    pub fn total_distance(&self) -> f64 {
        self.best().distance()
    }

    /// Points of the shortest tour, in visiting order.
    pub fn ordered_points(&self) -> Vec<&Point> {
        self.best().points().collect()
    }

    /// Point names of the shortest tour, in visiting order.
    pub fn ordered_names(&self) -> Vec<String> {
        self.best().names()
    }

    /// Time spent in the search as of the last generation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Generations completed.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The evolving population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The configuration in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use rand::Rng;
    use std::ops::ControlFlow;

    fn square() -> Vec<Point> {
        vec![
            Point::new("A", 0, 0),
            Point::new("B", 0, 10),
            Point::new("C", 10, 10),
            Point::new("D", 10, 0),
        ]
    }

    fn random_points(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = create_rng(seed);
        (0..n)
            .map(|i| {
                Point::new(
                    format!("p{i}"),
                    rng.random_range(0..500),
                    rng.random_range(0..500),
                )
            })
            .collect()
    }

    // ---- StagnationWindow ----

    #[test]
    fn test_window_converges_on_constant_series() {
        let mut window = StagnationWindow::new(8, 1e-10);
        for _ in 0..8 {
            assert!(!window.push(42.0));
        }
        assert!(window.push(42.0));
    }

    #[test]
    fn test_window_clears_when_still_moving() {
        let mut window = StagnationWindow::new(4, 1e-10);
        for d in [50.0, 49.0, 48.0, 47.0] {
            assert!(!window.push(d));
        }
        assert!(!window.push(46.0));
        assert!(window.is_empty());
    }

    #[test]
    fn test_mean_std_dev() {
        let (mean, std_dev) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stagnation_series_ends_controller() {
        let config = GaConfig::default().with_seed(1).with_parallel(false);
        let mut controller = SearchController::new(random_points(6, 1), config).unwrap();
        let threshold = controller.config().factor_end_size * controller.population().size();
        for _ in 0..=threshold {
            assert!(!controller.is_ended());
            controller.converged = controller.window.push(123.0);
        }
        assert!(controller.is_ended());
        assert_eq!(controller.stop_reason(), Some(StopReason::Stagnation));
    }

    // ---- Scenarios ----

    #[test]
    fn test_square_converges_to_optimum() {
        let config = GaConfig::default().with_seed(42).with_parallel(false);
        let mut controller = SearchController::new(square(), config).unwrap();
        let result = controller.run();

        assert_eq!(result.stop, StopReason::Stagnation);
        assert!((result.total_distance - 40.0).abs() < 1e-9);
        let mut names = result.ordered_names.clone();
        names.sort();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert!(result.generations > controller.window.capacity);
    }

    #[test]
    fn test_single_point_ends_immediately() {
        let config = GaConfig::default().with_seed(42);
        let mut controller =
            SearchController::new(vec![Point::new("A", 5, 5)], config).unwrap();
        assert!(controller.is_ended());
        let result = controller.run();
        assert_eq!(result.stop, StopReason::Degenerate);
        assert_eq!(result.generations, 0);
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(result.ordered_names, vec!["A"]);
    }

    #[test]
    fn test_empty_instance() {
        let mut controller = SearchController::new(Vec::new(), GaConfig::default()).unwrap();
        let result = controller.run();
        assert_eq!(result.stop, StopReason::Degenerate);
        assert!(result.ordered_names.is_empty());
        assert_eq!(result.total_distance, 0.0);
    }

    #[test]
    fn test_time_budget() {
        let budget = Duration::from_millis(100);
        let config = GaConfig::default()
            .with_max_time(budget)
            .with_seed(3)
            .with_parallel(false);
        let mut controller = SearchController::new(random_points(30, 2), config).unwrap();
        let result = controller.run();
        assert_eq!(result.stop, StopReason::TimeLimit);
        assert!(result.elapsed >= budget);
        assert!(result.elapsed < budget + Duration::from_secs(5));
        assert!(result.generations > 0);
    }

    #[test]
    fn test_generation_cap() {
        let config = GaConfig::default()
            .with_max_generations(7)
            .with_seed(3)
            .with_parallel(false);
        let mut controller = SearchController::new(random_points(30, 3), config).unwrap();
        let result = controller.run();
        assert_eq!(result.stop, StopReason::GenerationLimit);
        assert_eq!(result.generations, 7);
    }

    #[test]
    fn test_observer_sees_every_generation_and_can_stop() {
        let config = GaConfig::default().with_seed(5).with_parallel(false);
        let mut controller = SearchController::new(random_points(20, 4), config).unwrap();

        let mut seen = Vec::new();
        let mut observer = |s: &Snapshot<'_>| {
            seen.push((s.generation, s.best_distance));
            if s.generation == 10 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let result = controller.run_with(Some(&mut observer), None);

        assert_eq!(result.stop, StopReason::Cancelled);
        assert_eq!(result.generations, 10);
        let generations: Vec<usize> = seen.iter().map(|&(g, _)| g).collect();
        assert_eq!(generations, (1..=10).collect::<Vec<_>>());
        for w in seen.windows(2) {
            assert!(w[1].1 <= w[0].1, "best distance regressed");
        }
    }

    #[test]
    fn test_cancel_flag() {
        let config = GaConfig::default().with_seed(5).with_parallel(false);
        let mut controller = SearchController::new(random_points(20, 5), config).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = controller.run_with(None, Some(cancel));
        assert_eq!(result.stop, StopReason::Cancelled);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let config = GaConfig::default()
            .with_stagnation_epsilon(0.0)
            .with_factor_end_size(1_000_000)
            .with_seed(5)
            .with_parallel(false);
        let mut controller = SearchController::new(random_points(40, 6), config).unwrap();

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::Relaxed);
        });

        let result = controller.run_with(None, Some(cancel));
        assert_eq!(result.stop, StopReason::Cancelled);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let config = GaConfig::default()
                .with_max_generations(30)
                .with_seed(77)
                .with_parallel(false);
            let mut controller = SearchController::new(random_points(25, 7), config).unwrap();
            controller.run().ordered_names
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut points = square();
        points.push(Point::new("B", 1, 1));
        let err = SearchController::new(points, GaConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicatePoint(name) if name == "B"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GaConfig::default().with_max_population(1);
        let err = SearchController::new(square(), config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
