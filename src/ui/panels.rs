use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use mda::data::series::Axis;
use mda::data::smooth::WindowKind;
use mda::data::sniff::HeaderMode;
use mda::report::ErrorReport;

use crate::color::overlay_color;
use crate::state::AppState;

/// Longest window offered by the length slider.
const MAX_WINDOW_LENGTH: usize = 101;

// ---------------------------------------------------------------------------
// Left side panel – reading, axes and smoothing controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            reading_section(ui, state);
            ui.separator();

            if state.dataset().is_none() {
                ui.label("No dataset loaded.");
            } else {
                axes_section(ui, state);
                ui.separator();
                smoothing_section(ui, state);
            }

            ui.separator();
            error_section(ui, state);
        });
}

fn reading_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Reading");
    egui::Grid::new("reading_grid").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Delimiter");
        ui.add(egui::TextEdit::singleline(&mut state.delimiter_text).desired_width(40.0));
        ui.end_row();

        ui.label("Header");
        egui::ComboBox::from_id_salt("header_mode")
            .selected_text(state.header_mode.name())
            .show_ui(ui, |ui: &mut Ui| {
                for mode in HeaderMode::ALL {
                    ui.selectable_value(&mut state.header_mode, mode, mode.name());
                }
            });
        ui.end_row();
    });

    let can_reload = state.path.is_some();
    if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
        state.reload();
    }
}

fn axes_section(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset() else {
        return;
    };
    let Some(current) = state.axes else {
        return;
    };
    let names = dataset.column_names();

    ui.heading("Columns");
    let mut axes = current;

    let x_label = match axes.x {
        Axis::RowNumber => "Row number".to_string(),
        Axis::Column(c) => names[c].clone(),
    };
    egui::ComboBox::from_label("x")
        .selected_text(x_label)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut axes.x, Axis::RowNumber, "Row number");
            for (c, name) in names.iter().enumerate() {
                ui.selectable_value(&mut axes.x, Axis::Column(c), name.as_str());
            }
        });

    egui::ComboBox::from_label("y")
        .selected_text(names[axes.y].clone())
        .show_ui(ui, |ui: &mut Ui| {
            for (c, name) in names.iter().enumerate() {
                ui.selectable_value(&mut axes.y, c, name.as_str());
            }
        });

    ui.checkbox(&mut state.show_raw, "Show raw data");

    if axes != current {
        state.set_axes(axes);
    }
}

fn smoothing_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Smoothing");

    let window = &mut state.pending_window;
    egui::ComboBox::from_label("Window")
        .selected_text(window.kind.name())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in WindowKind::ALL {
                ui.selectable_value(&mut window.kind, kind, kind.name());
            }
        });
    ui.add(
        egui::Slider::new(&mut window.length, 3..=MAX_WINDOW_LENGTH)
            .text("Length"),
    );
    // Only odd lengths can be centred on a sample.
    if window.length % 2 == 0 {
        window.length += 1;
    }

    if ui.button("Add overlay").clicked() {
        let window = state.pending_window;
        state.add_overlay(window);
    }

    let count = state.overlays.len();
    let mut remove = None;
    for (i, overlay) in state.overlays.iter_mut().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            let text = RichText::new(overlay.window.to_string()).color(overlay_color(i, count));
            ui.checkbox(&mut overlay.visible, text);
            if ui.small_button("✖").clicked() {
                remove = Some(i);
            }
        });
        if let Err(e) = &overlay.points {
            ui.label(RichText::new(e.to_string()).color(Color32::RED).small());
        }
    }
    if let Some(i) = remove {
        state.remove_overlay(i);
    }
}

fn error_section(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };
    let title = format!("Read errors ({})", report.log.count());
    egui::CollapsingHeader::new(RichText::new(title).strong())
        .id_salt("error_report")
        .default_open(!report.log.is_empty())
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(ErrorReport(report).to_string()).monospace());
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let (Some(report), Some(ds)) = (&state.report, state.dataset()) {
            ui.label(format!(
                "{}: {} rows × {} columns, {} plotted",
                report.source,
                ds.row_count(),
                ds.column_count(),
                state.raw_points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg.as_str()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement data")
        .add_filter("Delimited text", &["csv", "txt", "dat", "tsv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.apply_delimiter_text() {
            log::error!("Invalid delimiter: {e}");
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
        state.load(&path);
    }
}
