//! # Generation Engine
//!
//! Drives the greedy loop: validates configuration up front, then runs
//! `thread_count` selection steps, drawing the darkness residual down
//! after each committed segment.
//!
//! The loop itself is inherently sequential (every step depends on the
//! residual left by the previous one); only the per-step candidate scoring
//! inside [`crate::solver`] fans out across rayon workers. Cancellation is
//! cooperative and polled at iteration boundaries only: an in-flight
//! scoring pass always completes.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;
use tracing::{debug, info};

use crate::canvas::{DarknessMap, GrayscaleMap};
use crate::error::TelarError;
use crate::layout::PinLayout;
use crate::raster::LinePixels;
use crate::solver;

/// Every run starts at pin 0 so identical inputs replay to identical
/// sequences.
const START_PIN: usize = 0;

/// One thread segment: run the string from pin `from` to pin `to`.
///
/// The output sequence is ordered; it IS the build instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub from: usize,
    pub to: usize,
}

/// Generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of thread segments to produce. Default: 2000
    pub thread_count: usize,
    /// Darkness removed from every pixel a committed segment crosses,
    /// out of 255. Must be at least 1. Default: 24
    pub line_weight: u8,
    /// Minimum circular index distance between consecutive pins; 1 admits
    /// every pin except the current one. Default: 1
    pub min_pin_distance: usize,
    /// Progress is reported every this many completed segments (and always
    /// at the end of the run). Default: 25
    pub report_every: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            thread_count: 2000,
            line_weight: 24,
            min_pin_distance: 1,
            report_every: 25,
        }
    }
}

/// Fraction of the run completed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }
}

/// Final (or cancelled-partial) result of a generation run.
///
/// Cancellation is a normal terminal status, not an error: `threads` then
/// holds the strict prefix accumulated before the token was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub threads: Vec<Thread>,
    pub cancelled: bool,
}

/// Shared cancellation flag.
///
/// Cloning hands out another handle to the same flag, so one half can live
/// with the generation while the other stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The generation stops at the next iteration
    /// boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress and completion messages from a background generation.
#[derive(Debug)]
pub enum GenerationEvent {
    Progress(Progress),
    Finished(Outcome),
}

/// Handle to a generation running on its own thread.
///
/// The darkness residual and the growing thread list live exclusively on
/// that thread; the only state crossing the boundary is the cancellation
/// token and this event channel.
#[derive(Debug)]
pub struct GenerationTask {
    events: Receiver<GenerationEvent>,
    handle: JoinHandle<Outcome>,
}

impl GenerationTask {
    /// Event channel: progress messages, then a final
    /// [`GenerationEvent::Finished`].
    pub fn events(&self) -> &Receiver<GenerationEvent> {
        &self.events
    }

    /// Block until the run finishes and return its outcome.
    pub fn join(self) -> Outcome {
        self.handle.join().expect("generation thread panicked")
    }
}

/// Run the generator synchronously on the calling thread.
///
/// `on_progress` is invoked every [`GenerationConfig::report_every`]
/// completed segments and once more at the end of a full run. Requesting
/// cancellation through `cancel` ends the run at the next iteration
/// boundary with the partial sequence and `cancelled: true`.
pub fn generate<F>(
    gray: &GrayscaleMap,
    layout: &PinLayout,
    config: &GenerationConfig,
    cancel: &CancelToken,
    mut on_progress: F,
) -> Result<Outcome, TelarError>
where
    F: FnMut(Progress),
{
    validate(gray, layout, config)?;

    if config.thread_count == 0 {
        return Ok(Outcome {
            threads: Vec::new(),
            cancelled: false,
        });
    }

    info!(
        pins = layout.len(),
        thread_count = config.thread_count,
        line_weight = config.line_weight,
        "starting generation"
    );

    let mut residual = DarknessMap::from_grayscale(gray);
    let mut threads = Vec::with_capacity(config.thread_count);
    let mut current = START_PIN;
    let (width, height) = (gray.width(), gray.height());

    for completed in 0..config.thread_count {
        if cancel.is_cancelled() {
            info!(completed, "generation cancelled");
            return Ok(Outcome {
                threads,
                cancelled: true,
            });
        }

        let (next, score) =
            solver::select_next(&residual, layout, current, config.min_pin_distance);
        residual.subtract_line(
            LinePixels::new(layout.get(current), layout.get(next), width, height),
            config.line_weight,
        );
        threads.push(Thread {
            from: current,
            to: next,
        });
        current = next;

        let done = completed + 1;
        if done % config.report_every == 0 || done == config.thread_count {
            debug!(done, score, "progress");
            on_progress(Progress {
                completed: done,
                total: config.thread_count,
            });
        }
    }

    info!(threads = threads.len(), "generation complete");
    Ok(Outcome {
        threads,
        cancelled: false,
    })
}

/// Validate and launch a generation on a dedicated background thread.
///
/// Configuration and dimension errors surface here, synchronously, so a
/// doomed run never spins up a thread. Progress and the final outcome
/// arrive on [`GenerationTask::events`]; the task can also simply be
/// [`GenerationTask::join`]ed.
pub fn spawn(
    gray: GrayscaleMap,
    layout: PinLayout,
    config: GenerationConfig,
    cancel: CancelToken,
) -> Result<GenerationTask, TelarError> {
    validate(&gray, &layout, &config)?;

    let (tx, rx) = mpsc::channel();
    let handle = std::thread::spawn(move || {
        let progress_tx = tx.clone();
        let outcome = generate(&gray, &layout, &config, &cancel, move |progress| {
            // A caller that stopped draining is not an error for the run.
            let _ = progress_tx.send(GenerationEvent::Progress(progress));
        })
        .expect("configuration already validated before spawn");
        let _ = tx.send(GenerationEvent::Finished(outcome.clone()));
        outcome
    });

    Ok(GenerationTask { events: rx, handle })
}

fn validate(
    gray: &GrayscaleMap,
    layout: &PinLayout,
    config: &GenerationConfig,
) -> Result<(), TelarError> {
    if layout.len() < 2 {
        return Err(TelarError::Configuration(format!(
            "at least 2 pins are required, got {}",
            layout.len()
        )));
    }
    if config.line_weight == 0 {
        return Err(TelarError::Configuration(
            "line weight must be between 1 and 255".to_string(),
        ));
    }
    if config.min_pin_distance > layout.len() / 2 {
        return Err(TelarError::Configuration(format!(
            "min pin distance {} leaves no admissible candidates for {} pins",
            config.min_pin_distance,
            layout.len()
        )));
    }
    if config.report_every == 0 {
        return Err(TelarError::Configuration(
            "report interval must be at least 1".to_string(),
        ));
    }
    if gray.width() != layout.width() || gray.height() != layout.height() {
        return Err(TelarError::DimensionMismatch {
            image_width: gray.width(),
            image_height: gray.height(),
            canvas_width: layout.width(),
            canvas_height: layout.height(),
        });
    }
    Ok(())
}
