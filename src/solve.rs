//! Run orchestration: load points, let a display edit them, search, report.

use crate::error::Result;
use crate::ga::{GaConfig, Observer, Point, SearchController, Snapshot, StopReason};
use crate::loader::load_points;
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Duration;

/// A front-end that shows the search while it runs.
///
/// Displays observe every generation through [`Observer`]; they may also
/// add points before the search starts. Once evolution begins the point
/// set is frozen.
pub trait Display: Observer {
    /// Lets the display add points before the run.
    ///
    /// Returning `Break` abandons the run (for example when the user
    /// closed the window).
    fn collect_points(&mut self, _points: &mut Vec<Point>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called once with the final outcome.
    fn finish(&mut self, _outcome: &SolveOutcome) {}
}

/// Hands generations of a running search to a [`Display`].
struct Forward<'a>(&'a mut dyn Display);

impl Observer for Forward<'_> {
    fn on_generation(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        self.0.on_generation(snapshot)
    }
}

/// Final result of [`ga_solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Length of the best tour found.
    pub total_distance: f64,
    /// Point names of the best tour, in visiting order.
    pub ordered_names: Vec<String>,
    /// Generations executed.
    pub generations: usize,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
    /// Why the search stopped; `None` when the display abandoned the run
    /// before it started.
    pub stop: Option<StopReason>,
}

impl SolveOutcome {
    fn abandoned() -> Self {
        Self {
            total_distance: 0.0,
            ordered_names: Vec::new(),
            generations: 0,
            elapsed: Duration::ZERO,
            stop: None,
        }
    }
}

/// Solves the instance in `file` (or an empty one) with default settings.
///
/// `max_time_secs == 0` runs until the best distance stagnates.
///
/// # Errors
/// Fails if the file cannot be read or parsed, or if two points share a
/// name.
pub fn ga_solve(
    file: Option<&Path>,
    display: Option<&mut dyn Display>,
    max_time_secs: u64,
) -> Result<SolveOutcome> {
    ga_solve_with_config(
        file,
        display,
        GaConfig::default().with_max_time_secs(max_time_secs),
    )
}

/// Like [`ga_solve`], with full control over the search configuration.
pub fn ga_solve_with_config(
    file: Option<&Path>,
    mut display: Option<&mut dyn Display>,
    config: GaConfig,
) -> Result<SolveOutcome> {
    let mut points = match file {
        Some(path) => load_points(path)?,
        None => Vec::new(),
    };

    if let Some(display) = display.as_deref_mut() {
        if display.collect_points(&mut points).is_break() {
            log::info!("display closed before the search started");
            return Ok(SolveOutcome::abandoned());
        }
    }

    let mut controller = SearchController::new(points, config)?;
    let result = match display.as_deref_mut() {
        Some(display) => controller.run_with(Some(&mut Forward(display)), None),
        None => controller.run(),
    };

    let outcome = SolveOutcome {
        total_distance: result.total_distance,
        ordered_names: result.ordered_names,
        generations: result.generations,
        elapsed: result.elapsed,
        stop: Some(result.stop),
    };
    if let Some(display) = display {
        display.finish(&outcome);
    }
    Ok(outcome)
}
