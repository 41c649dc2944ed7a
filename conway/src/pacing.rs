// pacing.rs - Frame-paced run loop with interrupt-driven shutdown

use std::time::Instant;

use rand::Rng;
use tokio::runtime::{Builder, Runtime};

use crate::cancel::CancellationToken;
use crate::config::FrameBudget;
use crate::engine::SimulationEngine;
use crate::error::{DisplayError, RunError};
use crate::render::render;
use crate::sink::DisplaySink;

/// Counters reported when a run ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub reseeds: u64,
}

/// Drives step, render and push at a bounded frame rate until the
/// cancellation token is set, then clears the display.
pub struct PacingScheduler<S, R> {
    engine: SimulationEngine<R>,
    sink: S,
    budget: FrameBudget,
    token: CancellationToken,
    runtime: Runtime,
    frames: u64,
}

impl<S: DisplaySink, R: Rng> PacingScheduler<S, R> {
    /// Checks that the sink matches the grid and installs the Ctrl+C handler.
    pub fn new(
        engine: SimulationEngine<R>,
        sink: S,
        fps: i64,
        token: CancellationToken,
    ) -> Result<Self, RunError> {
        if sink.width() != engine.width() || sink.height() != engine.height() {
            return Err(DisplayError::FrameSize {
                expected_width: sink.width(),
                expected_height: sink.height(),
                actual_width: engine.width(),
                actual_height: engine.height(),
            }
            .into());
        }

        // One worker keeps the signal task alive while the loop thread
        // is busy stepping or blocked in a push.
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("life-interrupt")
            .enable_all()
            .build()
            .map_err(RunError::Runtime)?;
        install_interrupt_handler(&runtime, token.clone());

        Ok(Self {
            engine,
            sink,
            budget: FrameBudget::from_fps(fps),
            token,
            runtime,
            frames: 0,
        })
    }

    pub fn budget(&self) -> FrameBudget {
        self.budget
    }

    /// Runs until cancelled. The display is cleared exactly once on the
    /// way out, including when a push fails.
    pub fn run(mut self) -> Result<RunSummary, RunError> {
        log::info!(
            "running {}x{} grid at {:?} per frame",
            self.engine.width(),
            self.engine.height(),
            self.budget.duration()
        );

        while !self.token.is_cancelled() {
            let started = Instant::now();

            let frame = render(self.engine.advance());
            if let Err(err) = self.sink.push_frame(&frame) {
                log::error!("frame push failed after {} frames: {err}", self.frames);
                if let Err(clear_err) = self.sink.clear() {
                    log::warn!("clearing after failed push also failed: {clear_err}");
                }
                return Err(err.into());
            }
            self.frames += 1;

            match self.budget.remaining(started.elapsed()) {
                Some(left) => self.runtime.block_on(tokio::time::sleep(left)),
                None => log::trace!("frame {} over budget", self.frames),
            }
        }

        self.sink.clear()?;
        let summary = RunSummary {
            frames: self.frames,
            reseeds: self.engine.reseeds(),
        };
        log::info!(
            "stopped after {} frames ({} generations, {} reseeds)",
            summary.frames,
            self.engine.generation(),
            summary.reseeds
        );
        self.runtime.shutdown_background();
        Ok(summary)
    }
}

/// Sets `token` on the first Ctrl+C. Does not exit the process.
fn install_interrupt_handler(runtime: &Runtime, token: CancellationToken) {
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("interrupt received, finishing current frame");
                token.cancel();
            }
            Err(err) => log::warn!("could not listen for Ctrl+C: {err}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedDensity;
    use crate::grid::Grid;
    use crate::render::Bitmap;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct NullSink {
        width: usize,
        height: usize,
    }

    impl DisplaySink for NullSink {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError> {
            self.check_frame(frame)
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    fn engine(height: usize, width: usize) -> SimulationEngine<StdRng> {
        let grid = Grid::new(height, width).unwrap();
        SimulationEngine::from_grid(grid, SeedDensity::default(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn mismatched_sink_is_rejected() {
        let sink = NullSink { width: 32, height: 16 };
        let result = PacingScheduler::new(engine(16, 16), sink, 30, CancellationToken::new());
        assert!(matches!(
            result,
            Err(RunError::Display(DisplayError::FrameSize { .. }))
        ));
    }

    #[test]
    fn budget_is_fixed_at_construction() {
        let sink = NullSink { width: 4, height: 4 };
        let scheduler =
            PacingScheduler::new(engine(4, 4), sink, 0, CancellationToken::new()).unwrap();
        assert_eq!(scheduler.budget(), FrameBudget::from_fps(1));
    }

    #[test]
    fn cancelled_before_start_only_clears() {
        let token = CancellationToken::new();
        token.cancel();
        let sink = NullSink { width: 4, height: 4 };
        let summary = PacingScheduler::new(engine(4, 4), sink, 30, token).unwrap().run().unwrap();
        assert_eq!(summary, RunSummary::default());
    }
}
