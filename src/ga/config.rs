//! Search configuration.
//!
//! [`GaConfig`] holds every tunable of the evolutionary loop: operator
//! rates, population sizing, and the termination policy.

use std::time::Duration;

/// Configuration for the evolutionary tour search.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_factor, 10);
/// assert_eq!(config.max_population, 100);
/// assert!(config.max_time.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_mutation_rate(0.3)
///     .with_elite_ratio(0.05)
///     .with_max_time(Duration::from_secs(10))
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Probability (0.0–1.0) that a member is hill-climbed by swap
    /// mutation in a generation.
    pub mutation_rate: f64,

    /// Probability (0.0–1.0) that greedy subtour crossover runs.
    ///
    /// When it does not, the child is a clone of the first parent.
    pub crossover_rate: f64,

    /// Fraction of the population copied unchanged into the next
    /// generation. At least one member is always kept.
    pub elite_ratio: f64,

    /// Population size per point of the instance.
    pub population_factor: usize,

    /// Upper bound on the population size.
    pub max_population: usize,

    /// Stagnation window length, as a multiple of the population size.
    pub factor_end_size: usize,

    /// The search is considered stagnant when the standard deviation of
    /// the window of best distances is at most this value.
    pub stagnation_epsilon: f64,

    /// Wall-clock budget. `Some` selects timed mode, `None` runs until
    /// stagnation.
    pub max_time: Option<Duration>,

    /// Optional hard cap on the number of generations.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether breeding and mutation run on rayon.
    ///
    /// Ignored unless the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.2,
            crossover_rate: 0.9,
            elite_ratio: 0.1,
            population_factor: 10,
            max_population: 100,
            factor_end_size: 4,
            stagnation_epsilon: 1e-10,
            max_time: None,
            max_generations: None,
            seed: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl GaConfig {
    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the population size per point.
    pub fn with_population_factor(mut self, factor: usize) -> Self {
        self.population_factor = factor;
        self
    }

    /// Sets the population size cap.
    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = n;
        self
    }

    /// Sets the stagnation window factor.
    pub fn with_factor_end_size(mut self, factor: usize) -> Self {
        self.factor_end_size = factor;
        self
    }

    /// Sets the stagnation threshold.
    pub fn with_stagnation_epsilon(mut self, epsilon: f64) -> Self {
        self.stagnation_epsilon = epsilon.max(0.0);
        self
    }

    /// Switches to timed mode with the given budget.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Sets the time budget in whole seconds; 0 means run until stagnation.
    pub fn with_max_time_secs(mut self, secs: u64) -> Self {
        self.max_time = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Population size for an instance of `point_count` points.
    ///
    /// `point_count * population_factor`, capped at `max_population` and
    /// never below 2.
    pub fn population_size(&self, point_count: usize) -> usize {
        point_count
            .saturating_mul(self.population_factor)
            .clamp(2, self.max_population.max(2))
    }

    /// Number of elites kept for a population of `size` members.
    pub fn elite_count(&self, size: usize) -> usize {
        ((size as f64 * self.elite_ratio).round() as usize).clamp(1, size.max(1))
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_factor == 0 {
            return Err("population_factor must be at least 1".into());
        }
        if self.max_population < 2 {
            return Err("max_population must be at least 2".into());
        }
        if self.factor_end_size == 0 {
            return Err("factor_end_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be within [0, 1]".into());
        }
        if !(0.0..1.0).contains(&self.elite_ratio) {
            return Err("elite_ratio must be within [0, 1)".into());
        }
        if self.stagnation_epsilon.is_nan() || self.stagnation_epsilon < 0.0 {
            return Err("stagnation_epsilon must be non-negative".into());
        }
        if self.max_time == Some(Duration::ZERO) {
            return Err("max_time must be positive or None".into());
        }
        if self.max_generations == Some(0) {
            return Err("max_generations must be positive or None".into());
        }
        Ok(())
    }
}
