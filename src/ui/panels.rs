use egui::{Color32, Context, RichText, Ui};

use crate::terrain::GridParams;
use crate::terrain::lifecycle::MeshStats;
use crate::terrain::mesh::{DIMENSION_RANGE, SEGMENT_RANGE};
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default, Debug, PartialEq, Eq)]
pub struct UiActions {
    /// One of the grid sliders changed this frame.
    pub rebuild: bool,
    pub regenerate: bool,
    pub toggle_vsync: bool,
}

pub struct PanelStats {
    pub fps: f32,
    pub mesh: MeshStats,
}

pub fn draw_side_panel(ctx: &Context, state: &mut UiState, stats: &PanelStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .resizable(false)
        .exact_width(260.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(14.0))
        .show(ctx, |ui| {
            ui.heading(RichText::new("Terrain").strong());
            ui.label(RichText::new("Random height plane").color(TEXT_MUTED).size(11.0));
            ui.add_space(14.0);

            section_header(ui, "PLANE");
            actions.rebuild = grid_controls(ui, &mut state.params);
            ui.add_space(8.0);

            if ui
                .add(
                    egui::Button::new(RichText::new("Regenerate").color(BG_PURE_BLACK))
                        .fill(ACCENT_TERRAIN)
                        .min_size(egui::vec2(ui.available_width(), 28.0)),
                )
                .clicked()
            {
                actions.regenerate = true;
            }
            ui.add_space(14.0);
            ui.separator();
            ui.add_space(10.0);

            section_header(ui, "DISPLAY");
            ui.horizontal(|ui| {
                if ui.checkbox(&mut state.vsync_enabled, "VSync").changed() {
                    actions.toggle_vsync = true;
                }
                ui.checkbox(&mut state.show_stats, "Stats");
                ui.checkbox(&mut state.show_help, "Help");
            });

            if state.show_stats {
                ui.add_space(14.0);
                stats_panel(ui, stats);
            }
        });

    actions
}

/// The four grid sliders. Returns true when any of them changed.
fn grid_controls(ui: &mut Ui, params: &mut GridParams) -> bool {
    let mut changed = false;

    egui::Grid::new("grid_params")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            ui.label("width");
            changed |= ui
                .add(egui::Slider::new(&mut params.width, DIMENSION_RANGE))
                .changed();
            ui.end_row();

            ui.label("height");
            changed |= ui
                .add(egui::Slider::new(&mut params.height, DIMENSION_RANGE))
                .changed();
            ui.end_row();

            ui.label("widthSegments");
            changed |= ui
                .add(egui::Slider::new(&mut params.width_segments, SEGMENT_RANGE))
                .changed();
            ui.end_row();

            ui.label("heightSegments");
            changed |= ui
                .add(egui::Slider::new(&mut params.height_segments, SEGMENT_RANGE))
                .changed();
            ui.end_row();
        });

    changed
}

fn section_header(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn stats_panel(ui: &mut Ui, stats: &PanelStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if stats.fps >= 55.0 {
                ACCENT_GREEN
            } else if stats.fps >= 30.0 {
                ACCENT_ORANGE
            } else {
                ACCENT_TERRAIN
            };

            egui::Grid::new("stats").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
                ui.label(RichText::new("FPS").color(TEXT_MUTED));
                ui.label(RichText::new(format!("{:.0}", stats.fps)).color(fps_color));
                ui.end_row();

                ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                ui.label(RichText::new(stats.mesh.vertices.to_string()).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                ui.label(RichText::new(stats.mesh.triangles.to_string()).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Rebuilds").color(TEXT_MUTED));
                ui.label(RichText::new(stats.mesh.rebuilds.to_string()).color(TEXT_PRIMARY));
                ui.end_row();
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, distance: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new("LMB drag - Orbit | RMB drag - Pan | Scroll - Zoom")
                            .color(TEXT_MUTED),
                    );
                    ui.label(RichText::new(format!("Distance: {distance:.2}")).color(TEXT_MUTED));
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> PanelStats {
        PanelStats {
            fps: 60.0,
            mesh: MeshStats {
                vertices: 121,
                triangles: 200,
                rebuilds: 1,
            },
        }
    }

    #[test]
    fn idle_frame_requests_nothing() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut actions = UiActions::default();

        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                actions = draw_side_panel(ctx, &mut state, &stats());
                draw_help_overlay(ctx, 5.0);
            });
        }

        assert_eq!(actions, UiActions::default());
        assert_eq!(state.params, GridParams::default());
    }
}
