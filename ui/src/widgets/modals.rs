//! Blocking dialogs: toggle confirmation and the alert queue.

use clinidesk_business::{
    AlertsState, CONFIRM_TOGGLE_PROMPT, CancelToggleCommand, ConfirmToggleCommand,
    ToggleConfirmState,
};
use clinidesk_states::StateCtx;
use egui::{Color32, Context, RichText, Window};

/// Confirmation dialog for the status toggle. Open while a toggle awaits
/// an answer; "Confirmar" sends the request, "Cancelar" (or closing the
/// window) is the silent no-op.
pub fn confirm_toggle_modal(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    if state_ctx.state::<ToggleConfirmState>().pending.is_none() {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    Window::new("Confirmación")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.label(CONFIRM_TOGGLE_PROMPT);
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Confirmar").color(Color32::WHITE))
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button("Cancelar").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state_ctx.dispatch::<ConfirmToggleCommand>();
    } else if cancelled || !open {
        state_ctx.dispatch::<CancelToggleCommand>();
    }
}

/// Shows the front of the alert queue as a blocking dialog. "Aceptar"
/// (or closing the window) dismisses it; the next alert, if any, shows on
/// the following frame.
pub fn alert_modal(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    let Some(message) = state_ctx
        .state::<AlertsState>()
        .current()
        .map(|alert| alert.message.clone())
    else {
        return;
    };

    let mut open = true;
    let mut acknowledged = false;

    Window::new("Aviso")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.colored_label(Color32::RED, &message);
            ui.add_space(12.0);
            if ui.button("Aceptar").clicked() {
                acknowledged = true;
            }
        });

    if acknowledged || !open {
        state_ctx.update::<AlertsState>(AlertsState::dismiss);
    }
}
