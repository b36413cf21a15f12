//! Per-generation observation of a running search.
//!
//! The controller hands a [`Snapshot`] to an [`Observer`] once per
//! generation. Observers can stop the run by returning
//! [`ControlFlow::Break`]; this is how a display that was closed by the
//! user ends the search.

use super::solution::Solution;
use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::time::Duration;

/// State of the search after one generation.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Generations completed so far.
    pub generation: usize,
    /// Shortest tour of this generation.
    pub best: &'a Solution,
    /// Length of `best`.
    pub best_distance: f64,
    /// Time since the search started.
    pub elapsed: Duration,
}

impl Snapshot<'_> {
    /// Copies the snapshot so it can outlive the generation.
    pub fn to_owned_snapshot(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            generation: self.generation,
            best: self.best.clone(),
            best_distance: self.best_distance,
            elapsed: self.elapsed,
        }
    }
}

/// A [`Snapshot`] that owns its tour.
#[derive(Debug, Clone)]
pub struct OwnedSnapshot {
    pub generation: usize,
    pub best: Solution,
    pub best_distance: f64,
    pub elapsed: Duration,
}

/// Receives a snapshot after every generation.
///
/// Implementations run on the search thread and should return quickly;
/// use [`ChannelObserver`] to hand snapshots to a slow consumer.
///
/// Any `FnMut(&Snapshot) -> ControlFlow<()>` closure is an observer.
pub trait Observer {
    /// Called once per generation. Returning `Break` stops the search.
    fn on_generation(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()>;
}

impl<F> Observer for F
where
    F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
{
    fn on_generation(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        self(snapshot)
    }
}

/// Forwards snapshots over a bounded channel without ever blocking.
///
/// When the channel is full the snapshot is dropped and counted; the
/// consumer simply sees the next one. When the receiver is gone the
/// search is asked to stop.
#[derive(Debug)]
pub struct ChannelObserver {
    sender: SyncSender<OwnedSnapshot>,
    dropped: usize,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    ///
    /// `capacity` bounds how many snapshots may wait unread.
    pub fn new(capacity: usize) -> (Self, Receiver<OwnedSnapshot>) {
        let (sender, receiver) = std::sync::mpsc::sync_channel(capacity.max(1));
        (Self { sender, dropped: 0 }, receiver)
    }

    /// Snapshots dropped because the consumer lagged behind.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Observer for ChannelObserver {
    fn on_generation(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        match self.sender.try_send(snapshot.to_owned_snapshot()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                ControlFlow::Continue(())
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("snapshot receiver dropped, requesting stop");
                ControlFlow::Break(())
            }
        }
    }
}
