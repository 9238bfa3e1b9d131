//! Dashboard statistics derived from the loaded users list.

use std::any::{Any, TypeId};

use clinidesk_states::{
    Compute, ComputeDeps, ComputeStage, Dep, State, Updater, assign_impl,
};

use crate::UserRole;
use crate::users::list_compute::UsersListCompute;

/// Totals and one-decimal percentages for the dashboard stat cards.
///
/// Pure derivation: reruns whenever [`UsersListCompute`] changes, never
/// touches the network. Percentages are over the total user count and stay
/// at zero while nothing is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStatsCompute {
    pub total_users: usize,
    pub total_doctors: usize,
    pub total_staff: usize,
    pub total_patients: usize,
    pub doctors_percentage: f64,
    pub admin_percentage: f64,
    pub staff_percentage: f64,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64 * 1000.0).round() / 10.0
    }
}

impl Compute for DashboardStatsCompute {
    fn deps(&self) -> ComputeDeps {
        const COMPUTE_IDS: [TypeId; 1] = [TypeId::of::<UsersListCompute>()];
        (&[], &COMPUTE_IDS)
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) -> ComputeStage {
        let list = deps.get_compute_ref::<UsersListCompute>();
        let users = list.users().unwrap_or(&[]);

        let count = |role: UserRole| users.iter().filter(|u| u.role == role).count();
        let total_users = users.len();
        let total_doctors = count(UserRole::Doctor);
        let admins = count(UserRole::Administrator);
        let receptions = count(UserRole::Reception);

        updater.set(Self {
            total_users,
            total_doctors,
            total_staff: admins + receptions,
            total_patients: count(UserRole::Patient),
            doctors_percentage: percentage(total_doctors, total_users),
            admin_percentage: percentage(admins, total_users),
            staff_percentage: percentage(receptions, total_users),
        });
        ComputeStage::Finished
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl State for DashboardStatsCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
