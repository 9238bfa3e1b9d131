//! Stat cards for the dashboard header row.

use clinidesk_business::DashboardStatsCompute;
use clinidesk_states::StateCtx;
use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};

const CARD_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

fn stat_card(ui: &mut Ui, title: &str, value: String, detail: Option<String>) {
    Frame::NONE
        .stroke(Stroke::new(1.0, CARD_BORDER_COLOR))
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                if let Some(detail) = detail {
                    ui.label(RichText::new(detail).small().weak());
                }
            });
        });
}

/// One card per aggregate: total users, doctors, staff, patients, with the
/// role share as a one-decimal percentage where the server page showed a
/// progress bar.
pub fn stat_cards(state_ctx: &StateCtx, ui: &mut Ui) {
    let stats = state_ctx
        .cached::<DashboardStatsCompute>()
        .cloned()
        .unwrap_or_default();

    ui.horizontal(|ui| {
        stat_card(ui, "Usuarios", stats.total_users.to_string(), None);
        stat_card(
            ui,
            "Doctores",
            stats.total_doctors.to_string(),
            Some(format!("{}%", stats.doctors_percentage)),
        );
        stat_card(
            ui,
            "Personal",
            stats.total_staff.to_string(),
            Some(format!(
                "{}% / {}%",
                stats.admin_percentage, stats.staff_percentage
            )),
        );
        stat_card(ui, "Pacientes", stats.total_patients.to_string(), None);
    });
}
