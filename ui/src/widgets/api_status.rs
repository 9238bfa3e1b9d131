use crate::utils::colors::{COLOR_AMBER, COLOR_GREEN, COLOR_RED};
use clinidesk_business::{APIAvailability, ApiStatus};
use clinidesk_states::StateCtx;
use egui::{Color32, Response, Ui};

/// Radius of the status indicator circle (in pixels)
const STATUS_DOT_RADIUS: f32 = 5.0;

/// Cached UI version string to avoid repeated computation
fn ui_version() -> &'static str {
    use std::sync::OnceLock;
    static UI_VERSION: OnceLock<String> = OnceLock::new();
    UI_VERSION.get_or_init(clinidesk_business::version_info::format_env_version)
}

fn format_tooltip(status: &str) -> String {
    format!("UI: {}\nService: {status}", ui_version())
}

/// Renders a single status dot with tooltip using a drawn circle
fn status_dot(ui: &mut Ui, tooltip_text: String, dot_color: Color32) -> Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(STATUS_DOT_RADIUS * 2.0, STATUS_DOT_RADIUS * 2.0),
        egui::Sense::hover(),
    );

    let center = rect.center();
    ui.painter()
        .circle(center, STATUS_DOT_RADIUS, dot_color, egui::Stroke::NONE);

    response.on_hover_text(tooltip_text)
}

/// Displays the dashboard API status as a colored dot with a tooltip
/// carrying the status details and version information.
pub fn api_status(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    let (tooltip, color) = match state_ctx
        .cached::<ApiStatus>()
        .map(|v| v.api_availability())
    {
        Some(APIAvailability::Available(_)) => (format_tooltip("healthy"), COLOR_GREEN),
        Some(APIAvailability::Unavailable((_, err))) => (format_tooltip(err), COLOR_RED),
        _ => (format_tooltip("checking"), COLOR_AMBER),
    };

    status_dot(ui, tooltip, color)
}
