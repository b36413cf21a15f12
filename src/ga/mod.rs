//! Evolutionary tour search.
//!
//! A population of closed tours over a shared point set evolves by
//! roulette selection, greedy subtour crossover and hill-climbing swap
//! mutation, with elitism, until a time budget is spent or the best
//! distance stagnates.
//!
//! # Key Types
//!
//! - [`Point`]: a named location with integer coordinates
//! - [`Solution`]: one closed tour with a cached length
//! - [`Population`]: fixed-size set of tours and the generation step
//! - [`SearchController`]: the generation loop and termination policy
//! - [`GaConfig`]: operator rates, sizing and termination parameters
//! - [`Observer`]: per-generation hook for displays and progress reports
//!
//! # Submodules
//!
//! - [`operators`]: GSX crossover and index drawing on raw permutations
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Sengoku & Yoshihara (1998), "A Fast TSP Solver Using GA on JAVA"

mod config;
mod controller;
mod observer;
pub mod operators;
mod population;
mod selection;
mod solution;
mod types;

pub use config::GaConfig;
pub use controller::{SearchController, SearchResult, StagnationWindow, StopReason};
pub use observer::{ChannelObserver, Observer, OwnedSnapshot, Snapshot};
pub use population::Population;
pub use selection::roulette;
pub use solution::Solution;
pub use types::Point;
