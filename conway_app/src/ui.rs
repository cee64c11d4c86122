// ui.rs - egui front end: controls, board and stats
//
// The board toggles a cell on click and paints cells alive while the
// pointer is dragged. All numeric fields go through the lenient parsers in
// `conway::controls`, so the game only ever sees clamped values.

use std::sync::Arc;

use conway::codec::GridFormat;
use conway::controls::{cols_from_input, rows_from_input, speed_from_input};
use conway::patterns::PATTERNS;
use conway::{CellCoordinate, GameConfig, GameOfLife};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};

const MAX_BOX_SIZE: f32 = 15.0;
const MIN_BOX_SIZE: f32 = 3.0;
const SPACING: f32 = 0.5;

pub struct ConwayApp {
    // Dropped before the runtime so the timer task is cancelled first.
    game: GameOfLife,
    _runtime: tokio::runtime::Runtime,

    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,

    speed_text: String,
    rows_text: String,
    cols_text: String,
    exchange_text: String,
    status: Option<String>,

    last_painted: Option<CellCoordinate>,
}

impl ConwayApp {
    pub fn new(runtime: tokio::runtime::Runtime, config: &GameConfig) -> Self {
        let game = GameOfLife::new(runtime.handle().clone(), config);
        let size = game.size();
        Self {
            speed_text: game.tick_ms().to_string(),
            rows_text: size.rows.to_string(),
            cols_text: size.cols.to_string(),
            game,
            _runtime: runtime,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            exchange_text: String::new(),
            status: None,
            last_painted: None,
        }
    }

    /// Timer ticks happen off the UI thread; ask egui to redraw after each.
    pub fn repaint_on_tick(&self, ctx: egui::Context) {
        self.game.set_on_tick(Some(Arc::new(move || ctx.request_repaint())));
    }

    fn sync_size_fields(&mut self) {
        let size = self.game.size();
        self.rows_text = size.rows.to_string();
        self.cols_text = size.cols.to_string();
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.game.running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.game.toggle_running();
            }

            if ui.button("⏭ Step").clicked() {
                self.game.step();
            }

            if ui.button("🎲 Reset").clicked() {
                self.game.reset();
            }

            if ui.button("⏹ Clear").clicked() {
                self.game.clear();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.game.load_pattern(&PATTERNS[self.selected_pattern]);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Speed (ms):");
            let speed = ui.add(egui::TextEdit::singleline(&mut self.speed_text).desired_width(50.0));
            if speed.lost_focus() {
                let ms = speed_from_input(&self.speed_text, self.game.tick_ms());
                self.speed_text = self.game.set_speed(ms).to_string();
            }

            ui.separator();

            ui.label("Rows:");
            let rows = ui.add(egui::TextEdit::singleline(&mut self.rows_text).desired_width(40.0));
            if rows.lost_focus() {
                let size = self.game.size();
                let requested = rows_from_input(&self.rows_text, size);
                if requested != size {
                    self.game.resize(requested);
                }
                self.sync_size_fields();
            }

            ui.label("Cols:");
            let cols = ui.add(egui::TextEdit::singleline(&mut self.cols_text).desired_width(40.0));
            if cols.lost_focus() {
                let size = self.game.size();
                let requested = cols_from_input(&self.cols_text, size);
                if requested != size {
                    self.game.resize(requested);
                }
                self.sync_size_fields();
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn exchange(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Import / Export").show(ui, |ui| {
            ui.horizontal(|ui| {
                for (label, format) in [("Plaintext", GridFormat::Plaintext), ("JSON", GridFormat::Json)] {
                    if ui.button(format!("Export {label}")).clicked() {
                        match self.game.export(format) {
                            Ok(text) => {
                                ui.ctx().output_mut(|o| o.copied_text = text.clone());
                                self.exchange_text = text;
                                self.status = Some(format!("Exported {label} (copied to clipboard)"));
                            }
                            Err(err) => self.status = Some(err.to_string()),
                        }
                    }
                    if ui.button(format!("Import {label}")).clicked() {
                        self.status = Some(match self.game.import(&self.exchange_text, format) {
                            Ok(size) => format!("Imported {}x{} grid", size.rows, size.cols),
                            Err(err) => {
                                log::warn!("import failed: {err}");
                                err.to_string()
                            }
                        });
                        self.sync_size_fields();
                    }
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.exchange_text)
                    .code_editor()
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let grid = self.game.grid();
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            ui.label("(empty board)");
            return;
        }

        let box_size = ((ui.available_width() + SPACING) / cols as f32 - SPACING).clamp(MIN_BOX_SIZE, MAX_BOX_SIZE);
        let pitch = box_size + SPACING;
        let total_size = Vec2::new(pitch * cols as f32 - SPACING, pitch * rows as f32 - SPACING);

        let (response, painter) = ui.allocate_painter(total_size, Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(Rect::from_min_size(origin, total_size), 0.0, Color32::BLACK);

        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let min = Pos2::new(origin.x + c as f32 * pitch, origin.y + r as f32 * pitch);
                let rect = Rect::from_min_size(min, Vec2::splat(box_size));
                let color = if cell.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                if box_size >= 6.0 {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        let cell_at = |pos: Pos2| -> Option<CellCoordinate> {
            let offset = pos - origin;
            if offset.x < 0.0 || offset.y < 0.0 {
                return None;
            }
            let (r, c) = ((offset.y / pitch) as usize, (offset.x / pitch) as usize);
            (r < rows && c < cols).then_some(CellCoordinate::new(r, c))
        };

        if response.clicked() {
            if let Some(coordinate) = response.interact_pointer_pos().and_then(cell_at) {
                // The board was sized from this grid, so the edit is in range.
                let _ = self.game.toggle_cell(coordinate);
            }
        } else if response.dragged() {
            if let Some(coordinate) = response.interact_pointer_pos().and_then(cell_at) {
                if self.last_painted != Some(coordinate) {
                    let _ = self.game.drag_set(coordinate);
                    self.last_painted = Some(coordinate);
                }
            }
        }
        if response.drag_released() {
            self.last_painted = None;
        }
    }

    fn stats(&self, ui: &mut egui::Ui) {
        let stats = self.game.stats();
        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", stats.generation));
            ui.label(format!("Live cells: {}", stats.alive_count));
            ui.label(format!("Dead cells: {}", stats.grid_size - stats.alive_count));
            ui.label(format!("Population: {:.1}%", stats.density * 100.0));
        });
    }
}

impl eframe::App for ConwayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui);
            ui.separator();
            self.stats(ui);
            ui.separator();
            self.exchange(ui);
            ui.separator();

            ui.label("Click a cell to toggle it, drag to paint cells alive.");
            egui::ScrollArea::both().show(ui, |ui| self.board(ui));
        });
    }
}
