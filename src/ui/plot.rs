use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::data::model::{Dataset, Measure};
use crate::data::project::{project, ComparisonRow, MeasureSeries, Projection, ViewMode};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – view tabs + mode-specific content
// ---------------------------------------------------------------------------

/// Render the view tabs and the active projection.
pub fn central_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for mode in ViewMode::ALL {
            ui.selectable_value(&mut state.mode, mode, mode.label());
        }
    });
    ui.separator();

    if state.filtered.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows in the selected year range");
        });
        return;
    }

    match project(&state.filtered, state.mode) {
        Projection::TimeSeries(series) => time_series_plot(ui, state, &series),
        Projection::Comparison(rows) => comparison_plot(ui, state, &rows),
        Projection::Tabular(table) => data_table(ui, &table),
    }
}

// ---------------------------------------------------------------------------
// Time series (multi-line plot)
// ---------------------------------------------------------------------------

fn time_series_plot(ui: &mut Ui, state: &AppState, series: &[MeasureSeries]) {
    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let color = state.colors.color_for(s.measure);

                let line_points: PlotPoints = s
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();
                plot_ui.line(
                    Line::new(line_points)
                        .name(s.measure.label())
                        .color(color)
                        .width(2.0),
                );

                let marker_points: PlotPoints = s
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();
                plot_ui.points(
                    Points::new(marker_points)
                        .name(s.measure.label())
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Comparison (grouped bars)
// ---------------------------------------------------------------------------

fn comparison_plot(ui: &mut Ui, state: &AppState, rows: &[ComparisonRow]) {
    const BAR_WIDTH: f64 = 0.25;

    Plot::new("comparison_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .show(ui, |plot_ui| {
            for (i, &measure) in Measure::ALL.iter().enumerate() {
                // Offset each measure's bars so the groups sit side by side.
                let offset = (i as f64 - 1.0) * BAR_WIDTH;
                let bars: Vec<Bar> = rows
                    .iter()
                    .filter(|r| r.measure == measure)
                    .map(|r| Bar::new(r.year as f64 + offset, r.value).width(BAR_WIDTH))
                    .collect();

                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(measure.label())
                        .color(state.colors.color_for(measure)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn data_table(ui: &mut Ui, table: &Dataset) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0), table.columns.len())
        .header(20.0, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(col).strong());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let record = &table.records[row.index()];
                for col in &table.columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.cell(col).to_string());
                    });
                }
            });
        });
}
