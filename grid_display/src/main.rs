// main.rs - Game of Life on an RGB LED panel (or a stand-in for one)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use conway::{
    CancellationToken, DisplaySink, LifeSettings, PacingScheduler, RunError, RunSummary,
    SimulationEngine, patterns,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod emulator;  // egui panel window
mod panel;     // Wiring options
mod terminal;  // Truecolor terminal panel

use panel::PanelOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Desktop window drawing each LED
    Emulator,
    /// Half-block pixels in the current terminal
    Terminal,
}

/// Runs Conway's Game of Life on a toroidal grid sized to the panel,
/// reseeding whenever the population dies out or stops changing.
#[derive(Debug, Parser)]
#[command(name = "life-matrix", version, about)]
struct Cli {
    /// Rows per panel.
    #[arg(long, default_value_t = 16)]
    rows: usize,
    /// Columns per panel.
    #[arg(long, default_value_t = 32)]
    cols: usize,
    /// Panels daisy-chained horizontally.
    #[arg(long, default_value_t = 1)]
    chain: usize,
    /// Parallel chains stacked vertically.
    #[arg(long, default_value_t = 1)]
    parallel: usize,
    /// Wiring between the controller and the panel.
    #[arg(long, default_value = "adafruit-hat")]
    hardware_mapping: String,
    /// GPIO write slowdown, 0 to 4.
    #[arg(long, default_value_t = 4)]
    gpio_slowdown: u32,
    /// Brightness in percent.
    #[arg(long, default_value_t = 80)]
    brightness: u8,
    /// Probability that a cell starts alive, 0 to 1.
    #[arg(long = "seed", visible_alias = "density", default_value_t = 0.25)]
    density: f64,
    /// Target frames per second; values below 1 run at 1.
    #[arg(long, default_value_t = LifeSettings::DEFAULT_FPS, allow_negative_numbers = true)]
    fps: i64,
    /// Where to draw.
    #[arg(long, value_enum, default_value_t = Backend::Emulator)]
    display: Backend,
    /// Start from a named pattern instead of a random grid.
    #[arg(long)]
    pattern: Option<String>,
    /// Seed for the random source, for reproducible runs.
    #[arg(long)]
    rng_seed: Option<u64>,
}

impl Cli {
    fn settings(&self) -> Result<LifeSettings> {
        let mut settings = LifeSettings::new(self.density, self.fps)?;
        if let Some(name) = &self.pattern {
            let pattern = patterns::find(name).with_context(|| {
                let names: Vec<_> = patterns::names().collect();
                format!("available patterns: {}", names.join(", "))
            })?;
            settings.pattern = Some(pattern);
        }
        settings.rng_seed = self.rng_seed;
        Ok(settings)
    }

    fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            rows: self.rows,
            cols: self.cols,
            chain: self.chain,
            parallel: self.parallel,
            hardware_mapping: self.hardware_mapping.clone(),
            gpio_slowdown: self.gpio_slowdown,
            brightness: self.brightness,
        }
    }
}

/// Builds the engine for the sink's dimensions and runs until interrupted.
fn run_on<S: DisplaySink>(
    sink: S,
    settings: &LifeSettings,
    token: CancellationToken,
) -> Result<RunSummary, RunError> {
    let (height, width) = (sink.height(), sink.width());
    let rng = match settings.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };

    let engine = match settings.pattern {
        Some(pattern) => {
            log::info!("starting from {}", pattern.name);
            SimulationEngine::from_grid(pattern.place(height, width)?, settings.density, rng)
        }
        None => SimulationEngine::new(height, width, settings.density, rng)?,
    };

    PacingScheduler::new(engine, sink, settings.fps, token)?.run()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    // Settings are checked before any display is opened
    let settings = cli.settings().context("invalid settings")?;
    let options = cli.panel_options();
    let token = CancellationToken::new();

    let summary = match cli.display {
        Backend::Terminal => {
            let sink =
                terminal::TerminalPanel::open(&options).context("cannot open terminal panel")?;
            run_on(sink, &settings, token)?
        }
        Backend::Emulator => {
            let loop_token = token.clone();
            emulator::run(options, token, move |sink| run_on(sink, &settings, loop_token))?
        }
    };

    log::info!("{} frames shown, {} reseeds", summary.frames, summary.reseeds);
    Ok(())
}
