use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::{export, ingest};
use crate::state::AppState;

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
            if ui.button("Export filtered…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} in range",
            state.dataset.len(),
            state.filtered.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.strict_ingest, "Strict ingest")
            .on_hover_text("Surface upload errors instead of falling back to demo data")
            .clicked()
        {
            state.strict_ingest = !state.strict_ingest;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – year filter and KPI cards
// ---------------------------------------------------------------------------

/// Render the left controls panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter years");
    ui.separator();

    let (lo, hi) = state.year_bounds();
    let (mut min_year, mut max_year) = state.year_range;

    let changed_min = ui
        .add(egui::Slider::new(&mut min_year, lo..=hi).text("from"))
        .changed();
    let changed_max = ui
        .add(egui::Slider::new(&mut max_year, lo..=hi).text("to"))
        .changed();

    if changed_min || changed_max {
        // Keep the handles from crossing: the one being dragged pushes the other.
        if min_year > max_year {
            if changed_min {
                max_year = min_year;
            } else {
                min_year = max_year;
            }
        }
        state.set_year_range(min_year, max_year);
    }

    ui.add_space(8.0);
    ui.heading("KPIs");
    ui.separator();

    kpi_card(ui, "Total revenue", format!("{:.0}", state.kpis.total_revenue));
    kpi_card(ui, "Total profit", format!("{:.0}", state.kpis.total_profit));
    kpi_card(
        ui,
        "Avg margin",
        format!("{:.2}%", state.kpis.average_margin_pct),
    );
}

/// One KPI card: small muted title over a large value.
fn kpi_card(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).size(13.0).weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open financial data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.apply_ingest(ingest::load_file(&path));
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name("filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::export_csv(&state.filtered, &path) {
            Ok(()) => {
                log::info!(
                    "Exported {} rows to '{}'",
                    state.filtered.len(),
                    path.display()
                );
                state.status_message = Some(format!("Exported {} rows", state.filtered.len()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
