use clinidesk_business::{
    RefreshUsersCommand, ResolveToggleOutcomeCommand, Route, UsersListCompute, UsersListState,
};

use crate::{pages, state::State, widgets};

pub struct CliniDeskApp {
    state: State,
}

impl CliniDeskApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for CliniDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync compute caches before rendering.
        self.state.ctx.sync_computes();

        // First frame on the dashboard: load the users table.
        let list_is_idle = self
            .state
            .ctx
            .cached::<UsersListCompute>()
            .is_some_and(|list| list.state == UsersListState::Idle);
        if list_is_idle {
            self.state.ctx.dispatch::<RefreshUsersCommand>();
        }

        // Settle any finished toggle: reload on success, alert on failure.
        self.state.ctx.dispatch::<ResolveToggleOutcomeCommand>();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.heading("CliniDesk");
                ui.separator();
                widgets::api_status(&self.state.ctx, ui);
                widgets::env_version(ui);
            });
        });

        let route = self.state.ctx.state::<Route>().clone();
        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Dashboard => pages::dashboard_page(&mut self.state.ctx, ui),
            Route::EditUser { user_id } => {
                pages::edit_user_page(&mut self.state.ctx, user_id, ui);
            }
        });

        // Blocking dialogs render on top of whatever page is active.
        widgets::confirm_toggle_modal(&mut self.state.ctx, ctx);
        widgets::alert_modal(&mut self.state.ctx, ctx);

        // Run background jobs.
        self.state.ctx.run_computed();
    }
}
