//! Window host for the root drawing, built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Driver`] (and through it
//! the simulation and its [`SvgSurface`]) and implements [`eframe::App`].
//! Every egui frame ticks the simulation once, repaints the surface's paths
//! and requests the next repaint, so the drawing keeps evolving for as long
//! as the window is open.

use std::path::PathBuf;

use eframe::App;
use glam::Vec2;
use rand::rngs::ThreadRng;
use roots_core::{
    clock::MonotonicClock,
    config::GrowthConfig,
    driver::{Driver, FrameScheduler},
    export,
    simulation::Simulation,
    surface::SvgSurface,
};

/// Schedules the next frame by asking egui for a repaint.
struct RepaintScheduler<'a>(&'a egui::Context);

impl FrameScheduler for RepaintScheduler<'_> {
    fn schedule_frame(&mut self) {
        self.0.request_repaint();
    }
}

/// Main application state for the viewer.
///
/// ### Fields
/// - `driver` - Frame loop owning the simulation and its surface.
/// - `export_path` - Where "Save SVG" writes the current drawing.
/// - `status` - Outcome of the last export, shown in the status bar.
pub struct Viewer {
    driver: Driver<SvgSurface, ThreadRng, MonotonicClock>,
    export_path: PathBuf,
    status: Option<String>,
}

impl Viewer {
    /// Creates a viewer around a freshly seeded simulation.
    ///
    /// The root origin, angles and speeds come from the thread-local random
    /// generator, so every launch draws something new.
    pub fn new() -> Self {
        let cfg = GrowthConfig::default();
        let surface = SvgSurface::new(cfg.canvas_size, cfg.stroke_width);
        let sim = Simulation::new(cfg, surface, rand::rng(), MonotonicClock::new());

        Self {
            driver: Driver::new(sim),
            export_path: PathBuf::from("roots.svg"),
            status: None,
        }
    }

    fn surface(&self) -> &SvgSurface {
        self.driver.simulation().surface()
    }

    /// Pixels per canvas unit.
    ///
    /// The square canvas is scaled by the larger side of `rect`, so it always
    /// covers the whole area and the overflow on the shorter side is cropped.
    fn scale(&self, rect: egui::Rect) -> f32 {
        rect.width().max(rect.height()) / self.surface().size()
    }

    /// Converts a canvas position to screen-space.
    ///
    /// The canvas center is pinned to the center of `rect`.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let half = self.surface().size() / 2.0;
        let scale = self.scale(rect);
        let center = rect.center();
        egui::pos2(
            center.x + (p.x - half) * scale,
            center.y + (p.y - half) * scale,
        )
    }

    fn save_svg(&mut self) {
        let status = match export::write_svg(&self.export_path, self.surface()) {
            Ok(()) => format!("saved {}", self.export_path.display()),
            Err(err) => {
                tracing::warn!(error = %err, "SVG export failed");
                err.to_string()
            }
        };
        self.status = Some(status);
    }

    /// Builds the top panel with the export button.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("💾 Save SVG").clicked() {
                    self.save_svg();
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
        });
    }

    /// Builds the bottom status bar (tick, population, paths, frame time).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let sim = self.driver.simulation();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.3} s", ctx.input(|i| i.stable_dt)));
                ui.separator();
                ui.label(format!("paths = {}", sim.surface().len()));
                ui.label(format!("active roots = {}", sim.active_roots()));
                ui.label(format!("agents = {}", sim.agents().len()));
                ui.label(format!("tick = {}", sim.ticks()));
            });
        });
    }

    /// Builds the central panel and paints every path of the surface.
    fn ui_canvas(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let painter = ui.painter_at(rect);
                let surface = self.surface();
                let width = (surface.stroke_width() * self.scale(rect)).max(0.5);

                for entry in surface.paths().filter(|e| e.points.len() > 1) {
                    let points: Vec<egui::Pos2> = entry
                        .points
                        .iter()
                        .map(|&p| self.world_to_screen(p, rect))
                        .collect();
                    let alpha = (entry.opacity * 255.0).round() as u8;
                    let stroke = egui::Stroke::new(width, egui::Color32::from_black_alpha(alpha));
                    painter.add(egui::Shape::line(points, stroke));
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback run once per displayed frame.
    ///
    /// Ticks the simulation (which schedules the next repaint), then draws
    /// the panels and the canvas.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.driver.frame(&mut RepaintScheduler(ctx));

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_canvas(ctx);
    }
}
