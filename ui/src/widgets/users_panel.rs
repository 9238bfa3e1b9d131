//! Recent-users table of the admin dashboard.
//!
//! Uses a Typora-like table style with clean borders and minimal styling.
//! Row actions only collect the gesture during the grid pass; the matching
//! command is dispatched after the table closure to avoid borrow issues.

use clinidesk_business::{
    OpenEditUserCommand, RefreshUsersCommand, RequestToggleCommand, UserActionInput,
    UsersListCompute,
};
use clinidesk_states::StateCtx;
use egui::{Color32, Frame, InnerResponse, Margin, Response, RichText, ScrollArea, Stroke, Ui};

/// Border color for the table (subtle gray)
const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Header background color (light gray)
const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

enum RowAction {
    Edit(u64),
    ToggleStatus(u64),
}

/// Displays the recent-users table with per-row edit and status-toggle
/// actions.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let mut pending_action: Option<RowAction> = None;
    let list = state_ctx
        .cached::<UsersListCompute>()
        .cloned()
        .unwrap_or_default();

    let response = ui.vertical(|ui| {
        // Toolbar row
        let refresh_clicked = ui
            .horizontal(|ui| {
                ui.strong("Usuarios recientes");
                let clicked = ui.button("🔄 Actualizar").clicked() && !list.is_loading();
                if list.is_loading() {
                    ui.spinner();
                    ui.label("Cargando...");
                }
                clicked
            })
            .inner;
        if refresh_clicked {
            state_ctx.dispatch::<RefreshUsersCommand>();
        }

        if let Some(error) = list.error() {
            ui.colored_label(Color32::RED, format!("Error: {error}"));
        }

        ui.add_space(8.0);

        let users = list.users().unwrap_or(&[]);
        Frame::NONE
            .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
            .inner_margin(Margin::ZERO)
            .show(ui, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("users_table")
                        .num_columns(6)
                        .striped(true)
                        .spacing([16.0, 0.0])
                        .min_col_width(60.0)
                        .show(ui, |ui| {
                            header_cell(ui, |ui| ui.strong("Usuario"));
                            header_cell(ui, |ui| ui.strong("Nombre"));
                            header_cell(ui, |ui| ui.strong("Correo"));
                            header_cell(ui, |ui| ui.strong("Rol"));
                            header_cell(ui, |ui| ui.strong("Estado"));
                            header_cell(ui, |ui| ui.strong("Acciones"));
                            ui.end_row();

                            for user in users {
                                data_cell(ui, |ui| ui.label(&user.username));
                                data_cell(ui, |ui| ui.label(user.full_name()));
                                data_cell(ui, |ui| {
                                    ui.label(RichText::new(&user.email).monospace())
                                });
                                data_cell(ui, |ui| ui.label(user.role.label()));
                                data_cell(ui, |ui| {
                                    if user.is_active {
                                        ui.colored_label(
                                            crate::utils::colors::COLOR_GREEN,
                                            "Activo",
                                        )
                                    } else {
                                        ui.colored_label(Color32::GRAY, "Inactivo")
                                    }
                                });
                                data_cell(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        if ui
                                            .button("Editar")
                                            .on_hover_text("Editar usuario")
                                            .clicked()
                                        {
                                            pending_action = Some(RowAction::Edit(user.id));
                                        }
                                        let toggle_label = if user.is_active {
                                            "Desactivar"
                                        } else {
                                            "Activar"
                                        };
                                        if ui
                                            .button(toggle_label)
                                            .on_hover_text("Cambiar estado del usuario")
                                            .clicked()
                                        {
                                            pending_action =
                                                Some(RowAction::ToggleStatus(user.id));
                                        }
                                    });
                                });
                                ui.end_row();
                            }
                        });
                });
            });
    });

    // Apply the collected action after the table iteration.
    match pending_action {
        Some(RowAction::Edit(user_id)) => {
            state_ctx.update::<UserActionInput>(|input| input.user_id = Some(user_id));
            state_ctx.dispatch::<OpenEditUserCommand>();
        }
        Some(RowAction::ToggleStatus(user_id)) => {
            state_ctx.update::<UserActionInput>(|input| input.user_id = Some(user_id));
            state_ctx.dispatch::<RequestToggleCommand>();
        }
        None => {}
    }

    response.response
}
