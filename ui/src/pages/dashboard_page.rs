use clinidesk_states::StateCtx;
use egui::Ui;

use crate::widgets;

/// Admin dashboard: stat cards on top, recent users below.
pub fn dashboard_page(state_ctx: &mut StateCtx, ui: &mut Ui) {
    ui.heading("Panel de administración");
    ui.add_space(8.0);

    widgets::stat_cards(state_ctx, ui);
    ui.add_space(12.0);
    ui.separator();

    widgets::users_panel(state_ctx, ui);
}
