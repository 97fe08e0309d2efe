use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use mda::data::series::Axis;

use crate::color::{overlay_color, RAW_COLOR};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Measurement plot (central panel)
// ---------------------------------------------------------------------------

/// Render the raw series and its smoothed overlays in the central panel.
pub fn measurement_plot(ui: &mut Ui, state: &AppState) {
    let (dataset, axes) = match (state.dataset(), state.axes) {
        (Some(ds), Some(axes)) => (ds, axes),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view measurements  (File → Open…)");
            });
            return;
        }
    };

    let names = dataset.column_names();
    let x_label = match axes.x {
        Axis::RowNumber => "Row".to_string(),
        Axis::Column(c) => names[c].clone(),
    };
    let y_label = names[axes.y].clone();

    let count = state.overlays.len();

    Plot::new("measurement_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if state.show_raw {
                let line = Line::new(PlotPoints::from(state.raw_points.clone()))
                    .name(&y_label)
                    .color(RAW_COLOR)
                    .width(0.5);
                plot_ui.line(line);
            }

            for (i, overlay) in state.overlays.iter().enumerate() {
                if !overlay.visible {
                    continue;
                }
                let Ok(points) = &overlay.points else {
                    continue;
                };
                let line = Line::new(PlotPoints::from(points.clone()))
                    .name(overlay.window.to_string())
                    .color(overlay_color(i, count))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
