use clinidesk_business::{
    EditSubmitCompute, EditSubmitState, EditUserFormState, ReturnToDashboardCommand,
    SubmitEditUserCommand,
};
use clinidesk_states::StateCtx;
use egui::{Color32, Ui};

use crate::utils::colors::COLOR_GREEN;

/// Edit form for a single user record.
pub fn edit_user_page(state_ctx: &mut StateCtx, user_id: u64, ui: &mut Ui) {
    ui.heading(format!("Editar usuario #{user_id}"));
    ui.add_space(8.0);

    let submit = state_ctx
        .cached::<EditSubmitCompute>()
        .cloned()
        .unwrap_or_default();

    let mut save_clicked = false;
    let mut back_clicked = false;

    {
        let form = state_ctx.state_mut::<EditUserFormState>();
        ui.horizontal(|ui| {
            ui.label("Nombre:");
            ui.text_edit_singleline(&mut form.first_name);
        });
        ui.horizontal(|ui| {
            ui.label("Apellido:");
            ui.text_edit_singleline(&mut form.last_name);
        });
        ui.horizontal(|ui| {
            ui.label("Correo:");
            ui.text_edit_singleline(&mut form.email);
        });
    }

    ui.add_space(12.0);

    match &submit.state {
        EditSubmitState::InFlight => {
            ui.spinner();
            ui.label("Guardando...");
        }
        EditSubmitState::Succeeded => {
            ui.colored_label(COLOR_GREEN, "Usuario actualizado.");
        }
        EditSubmitState::Error { message } => {
            ui.colored_label(Color32::RED, format!("Error: {message}"));
        }
        EditSubmitState::Idle => {}
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if !submit.is_in_flight() && ui.button("Guardar cambios").clicked() {
            save_clicked = true;
        }
        if ui.button("Volver al panel").clicked() {
            back_clicked = true;
        }
    });

    if save_clicked {
        state_ctx.dispatch::<SubmitEditUserCommand>();
    }
    if back_clicked {
        state_ctx.dispatch::<ReturnToDashboardCommand>();
    }
}
