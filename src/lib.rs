//! Evolutionary search for short closed tours (Traveling Salesman).
//!
//! A population of candidate tours evolves under:
//!
//! - **Greedy Subtour Crossover (GSX)**: children grow outward from a
//!   shared anchor point following each parent's local ordering.
//! - **Hill-climbing swap mutation**: random swaps kept only when they
//!   shorten the tour.
//! - **Inverse-distance roulette selection** with elitism.
//! - **Termination** on a wall-clock budget or on stagnation of the best
//!   distance, measured by the standard deviation over a rolling window.
//!
//! # Architecture
//!
//! - [`ga`]: the search engine (tours, population, controller)
//! - [`loader`]: `name x y` point files
//! - [`ga_solve`]: one-call orchestration with an optional [`Display`]
//!
//! The engine has no presentation types; displays plug in through the
//! [`Display`] and [`ga::Observer`] traits.
//!
//! # Example
//!
//! ```
//! use u_tsp::ga::{GaConfig, Point, SearchController};
//!
//! let points = vec![
//!     Point::new("A", 0, 0),
//!     Point::new("B", 0, 10),
//!     Point::new("C", 10, 10),
//!     Point::new("D", 10, 0),
//! ];
//! let mut controller = SearchController::new(points, GaConfig::default().with_seed(7))?;
//! let result = controller.run();
//! println!("{:.1} via {:?}", result.total_distance, result.ordered_names);
//! # Ok::<(), u_tsp::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod loader;
pub mod random;
mod solve;

pub use error::{Error, Result};
pub use solve::{ga_solve, ga_solve_with_config, Display, SolveOutcome};
