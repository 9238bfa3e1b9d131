use clinidesk_business::UsersListCompute;
use clinidesk_ui::CliniDeskApp;
use clinidesk_ui::state::State;
use egui_kittest::Harness;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, CliniDeskApp>,
}

impl<'a> TestCtx<'a> {
    /// App harness against a mock server that already answers the health
    /// probe. Callers mount the endpoints their scenario needs through
    /// [`TestCtx::mock_server`] before stepping frames.
    pub async fn new_app() -> TestCtx<'a> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin-dashboard/health/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri());
        let app = CliniDeskApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        let mut ctx = TestCtx {
            mock_server,
            harness,
        };
        // Harness construction already runs frames, which starts the
        // first-frame users fetch before the caller could mount its
        // endpoint. Let that stray fetch land, then put the cache back to
        // Idle so the fetch the scenario observes happens against the
        // caller's mocks.
        ctx.settle().await;
        ctx.harness
            .state_mut()
            .state_mut()
            .ctx
            .reset::<UsersListCompute>();
        ctx
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, CliniDeskApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, CliniDeskApp> {
        &self.harness
    }

    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps a few frames with pauses so in-flight responses land.
    pub async fn settle(&mut self) {
        for _ in 0..10 {
            tokio::time::sleep(std::time::Duration::from_millis(30)).await;
            self.harness.step();
        }
    }
}

/// Body of the default users endpoint: one active doctor and one inactive
/// patient.
#[allow(unused)]
pub fn default_users_body() -> serde_json::Value {
    serde_json::json!({
        "users": [
            {
                "id": 7,
                "username": "jgarcia",
                "first_name": "Juan",
                "last_name": "García",
                "email": "jgarcia@example.com",
                "role": "doctor",
                "is_active": true,
                "date_joined": "2026-02-03T10:00:00Z"
            },
            {
                "id": 8,
                "username": "mlopez",
                "first_name": "María",
                "last_name": "López",
                "email": "mlopez@example.com",
                "role": "patient",
                "is_active": false,
                "date_joined": "2026-02-01T09:00:00Z"
            }
        ]
    })
}
