use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::summary::Report;

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// Render the merged summary rows, all columns visible, in report order.
/// Vertical scrolling is left to the surrounding panel.
pub fn summary_table(ui: &mut Ui, report: &Report) {
    let rows = &report.rows;

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(90.0)) // group key
        .column(Column::auto().at_least(70.0)) // unauthorized users
        .column(Column::auto().at_least(70.0)) // unauthorized devices
        .column(Column::remainder().clip(true)) // usernames
        .column(Column::auto().at_least(70.0)) // authorized devices
        .column(Column::auto().at_least(80.0)) // percentage
        .column(Column::remainder().clip(true)) // label
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(report.group_field.column());
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Unauthorized Users");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Unauthorized Devices");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Usernames");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Authorized Devices");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Unauthorized %");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Label");
            });
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let summary = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&summary.group);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(summary.unauthorized_users.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(summary.unauthorized_devices.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&summary.usernames);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(summary.authorized_devices.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{}%", summary.percentage));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&summary.label);
                });
            });
        });
}
