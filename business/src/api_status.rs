use std::any::{Any, TypeId};

use chrono::{DateTime, Utc};
use clinidesk_states::{
    Compute, ComputeDeps, ComputeStage, Dep, State, Time, Updater, assign_impl,
};
use log::{info, warn};

use crate::BusinessConfig;

/// Liveness of the admin dashboard API, probed at most every five minutes.
#[derive(Default, Debug, Clone)]
pub struct ApiStatus {
    last_update_time: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

pub enum APIAvailability<'a> {
    Available(DateTime<Utc>),
    Unavailable((DateTime<Utc>, &'a str)),
    Unknown,
}

impl ApiStatus {
    pub fn api_availability(&self) -> APIAvailability<'_> {
        match (self.last_update_time, &self.last_error) {
            (Some(time), None) => APIAvailability::Available(time),
            (Some(time), Some(err)) => APIAvailability::Unavailable((time, err.as_str())),
            (None, _) => APIAvailability::Unknown,
        }
    }
}

impl Compute for ApiStatus {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 2] = [TypeId::of::<Time>(), TypeId::of::<BusinessConfig>()];
        (&STATE_IDS, &[])
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) -> ComputeStage {
        let now = *deps.get_state_ref::<Time>().as_ref();
        let should_fetch = match &self.last_update_time {
            Some(last_update_time) => {
                now.signed_duration_since(*last_update_time).num_minutes() >= 5
            }
            None => true,
        };
        if !should_fetch {
            return ComputeStage::Finished;
        }

        let config = deps.get_state_ref::<BusinessConfig>();
        let url = format!("{}/health/", config.dashboard_url());
        info!("checking API health at {url}");

        let request = ehttp::Request::get(url);
        ehttp::fetch(request, move |res| match res {
            Ok(response) if response.ok => {
                updater.set(ApiStatus {
                    last_update_time: Some(now),
                    last_error: None,
                });
            }
            Ok(response) => {
                info!("health check returned status {}", response.status);
                updater.set(ApiStatus {
                    last_update_time: Some(now),
                    last_error: Some(format!("Status code: {}", response.status)),
                });
            }
            Err(err) => {
                warn!("health check failed: {err}");
                updater.set(ApiStatus {
                    last_update_time: Some(now),
                    last_error: Some(err),
                });
            }
        });
        ComputeStage::Pending
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl State for ApiStatus {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
