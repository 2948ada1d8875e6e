use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::model::GroupField;
use crate::data::summary::Report;
use crate::state::AppState;
use crate::ui::{chart, table};

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
        });

        ui.separator();

        if let (Some(name), Some(ds)) = (&state.source_name, &state.dataset) {
            ui.label(format!("{name}: {} records loaded", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central report view
// ---------------------------------------------------------------------------

/// Render the full report body, or the idle prompt when nothing is loaded.
pub fn report_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Please upload your dataset (XLSX, CSV, or JSON)  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            view_toggle(ui, state);
            ui.separator();

            let Some(report) = &state.report else {
                return;
            };

            metrics_row(ui, report);
            ui.add_space(8.0);

            ui.heading(format!("{}-wise Device Usage", report.group_field));
            table::summary_table(ui, report);
            ui.add_space(12.0);

            ui.heading(format!(
                "{}-wise Unauthorized Users & Devices Percentage",
                report.group_field
            ));
            chart::unauthorized_chart(ui, report);
        });
}

/// Mutually exclusive Area / Region selector. Switching triggers one full
/// recomputation of the report.
fn view_toggle(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Group data by:");
        for field in [GroupField::Area, GroupField::Region] {
            if ui
                .radio(state.group_field == field, field.column())
                .clicked()
            {
                state.set_group_field(field);
            }
        }
    });
}

/// Overall distinct counts. The fourth column is reserved and left blank.
fn metrics_row(ui: &mut Ui, report: &Report) {
    ui.columns(4, |columns: &mut [Ui]| {
        metric(
            &mut columns[0],
            &format!("Unique Unauthorized Users ({})", report.group_field),
            report.totals.unauthorized_users,
        );
        metric(
            &mut columns[1],
            "Unique Unauthorized Device IDs",
            report.totals.unauthorized_devices,
        );
        metric(
            &mut columns[2],
            "Unique Authorized Devices",
            report.totals.authorized_devices,
        );
    });
}

fn metric(ui: &mut Ui, caption: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(caption);
        ui.label(RichText::new(value.to_string()).size(26.0).strong());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open usage export")
        .add_filter("Supported files", &["xlsx", "csv", "json"])
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} usage records from {}",
                    dataset.len(),
                    path.display()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                state.set_dataset(name, dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
