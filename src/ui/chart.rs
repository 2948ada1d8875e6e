use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotBounds, PlotPoint, Text};

use crate::color::ColorScale;
use crate::data::summary::Report;

// ---------------------------------------------------------------------------
// Horizontal bar chart (unauthorized users per group)
// ---------------------------------------------------------------------------

/// One horizontal bar per summary row, bottom-up in report order. Bar length
/// and fill colour both come from the unique unauthorized user count; the
/// row label sits just past the bar end, so the x-axis keeps 43% headroom
/// beyond the longest bar. Height grows with the row count so bars stay
/// readable at any group cardinality.
pub fn unauthorized_chart(ui: &mut Ui, report: &Report) {
    let rows = &report.rows;
    if rows.is_empty() {
        ui.label("No unauthorized usage to chart.");
        return;
    }

    let counts: Vec<f64> = rows.iter().map(|r| r.unauthorized_users as f64).collect();
    let min_count = counts.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_count = counts.iter().cloned().fold(1.0_f64, f64::max);
    let scale = ColorScale::new(min_count, max_count);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(i as f64, count)
                .width(0.6)
                .fill(scale.color_for(count))
        })
        .collect();

    let group_names: Vec<String> = rows.iter().map(|r| r.group.clone()).collect();
    let n = rows.len();
    let height = 50.0 * n as f32 + 200.0;
    let x_max = max_count * 1.43;

    Plot::new("unauthorized_chart")
        .height(height)
        .x_axis_label(format!(
            "Number of Unique Unauthorized Users ({}-wise)",
            report.group_field
        ))
        .y_axis_label(report.group_field.to_string())
        .y_axis_formatter(move |mark, _range| {
            // Category axis: label integer marks with the group name pinned
            // to report row order, leave every other gridline blank.
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-3 && idx >= 0.0 && (idx as usize) < group_names.len()
            {
                group_names[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [0.0, -0.7],
                [x_max, n as f64 - 0.3],
            ));
            plot_ui.bar_chart(BarChart::new(bars).horizontal());

            for (i, row) in rows.iter().enumerate() {
                let anchor_x = row.unauthorized_users as f64 + x_max * 0.01;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(anchor_x, i as f64),
                        RichText::new(&row.label).size(12.0),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}
