// emulator.rs - egui window standing in for the LED panel
//
// The egui event loop needs the main thread, so the run loop goes to a
// worker thread and pushes frames into a shared bitmap the window repaints.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, anyhow, bail};
use conway::{Bitmap, CancellationToken, DisplayError, DisplaySink, RunError, RunSummary};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::panel::PanelOptions;

type Worker = JoinHandle<Result<RunSummary, RunError>>;

const BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;

/// Sink half of the emulator. Lives on the run-loop thread.
pub struct EmulatorSink {
    width: usize,
    height: usize,
    frame: Arc<Mutex<Bitmap>>,
    ctx: egui::Context,
}

impl EmulatorSink {
    fn store(&self, bitmap: Bitmap) -> Result<(), DisplayError> {
        let mut shown = self.frame.lock().map_err(|_| DisplayError::Disconnected)?;
        *shown = bitmap;
        self.ctx.request_repaint();
        Ok(())
    }
}

impl DisplaySink for EmulatorSink {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        self.store(frame.clone())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.store(Bitmap::new(self.height, self.width))
    }
}

/// Window half of the emulator.
struct PanelWindow {
    options: PanelOptions,
    frame: Arc<Mutex<Bitmap>>,
    worker: Arc<Mutex<Option<Worker>>>,
    closing: bool,
}

impl PanelWindow {
    fn run_loop_finished(&self) -> bool {
        match self.worker.lock() {
            Ok(worker) => worker.as_ref().is_none_or(|handle| handle.is_finished()),
            Err(_) => true,
        }
    }
}

impl eframe::App for PanelWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Close once the run loop is done (Ctrl+C or a display error)
        if !self.closing && self.run_loop_finished() {
            self.closing = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let Ok(bitmap) = self.frame.lock().map(|shown| shown.clone()) else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("{}x{} LED panel", bitmap.width(), bitmap.height()));
            ui.label(format!(
                "mapping {} | gpio slowdown {} | brightness {}%",
                self.options.hardware_mapping, self.options.gpio_slowdown, self.options.brightness
            ));
            ui.separator();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (BOX_SIZE + SPACING) * bitmap.width() as f32 - SPACING,
                (BOX_SIZE + SPACING) * bitmap.height() as f32 - SPACING,
            );
            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (row, pixels) in bitmap.rows().enumerate() {
                for (col, pixel) in pixels.iter().enumerate() {
                    let x = start_pos.x + col as f32 * (BOX_SIZE + SPACING);
                    let y = start_pos.y + row as f32 * (BOX_SIZE + SPACING);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(BOX_SIZE));

                    let lit = pixel.dimmed(self.options.brightness);
                    painter.rect_filled(rect, 3.0, Color32::from_rgb(lit.r, lit.g, lit.b));
                    painter.rect_stroke(rect, 3.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        });
    }
}

/// Opens the emulator window and runs `start` on a worker thread with the
/// window's sink. Closing the window counts as an interrupt.
pub fn run<F>(
    options: PanelOptions,
    token: CancellationToken,
    start: F,
) -> anyhow::Result<RunSummary>
where
    F: FnOnce(EmulatorSink) -> Result<RunSummary, RunError> + Send + 'static,
{
    options.validate()?;
    let (width, height) = (options.width(), options.height());

    let frame = Arc::new(Mutex::new(Bitmap::new(height, width)));
    let worker: Arc<Mutex<Option<Worker>>> = Arc::new(Mutex::new(None));

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Life Matrix")
            .with_inner_size([
                (BOX_SIZE + SPACING) * width as f32 + 40.0,
                (BOX_SIZE + SPACING) * height as f32 + 110.0,
            ]),
        ..Default::default()
    };

    let window = PanelWindow {
        options: options.clone(),
        frame: frame.clone(),
        worker: worker.clone(),
        closing: false,
    };

    eframe::run_native(
        "Life Matrix",
        native,
        Box::new(move |cc| {
            let sink = EmulatorSink {
                width,
                height,
                frame,
                ctx: cc.egui_ctx.clone(),
            };
            let spawned = thread::Builder::new()
                .name("life-loop".to_string())
                .spawn(move || start(sink));
            match spawned {
                Ok(handle) => {
                    if let Ok(mut slot) = window.worker.lock() {
                        *slot = Some(handle);
                    }
                }
                Err(err) => log::error!("could not start the run loop: {err}"),
            }
            Box::new(window)
        }),
    )
    .map_err(|err| anyhow!("panel emulator failed: {err}"))?;

    token.cancel();
    let handle = worker
        .lock()
        .ok()
        .and_then(|mut slot| slot.take());
    let Some(handle) = handle else {
        bail!("run loop never started");
    };
    let summary = handle
        .join()
        .map_err(|_| anyhow!("run loop panicked"))?
        .context("run loop failed")?;
    Ok(summary)
}
