//! Scenario state and mock server plumbing for the project triage BDD tests.

use std::cell::RefCell;
use std::rc::Rc;

use project_triage::{
    EventContext, FilterConfig, OctocrabProjectGateway, PersonalAccessToken, ProjectTriage,
    TriageError, TriageOutcome, TriagePlan, plan,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/api/graphql";

/// Shared runtime wrapper that can be stored in an rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct TriageState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) token: Slot<String>,
    pub(crate) event: Slot<EventContext>,
    pub(crate) filters: Slot<FilterConfig>,
    pub(crate) outcome: Slot<TriageOutcome>,
    pub(crate) error: Slot<TriageError>,
}

impl TriageState {
    /// Applies `update` to the scenario's filters, starting from defaults.
    pub(crate) fn update_filters(&self, update: impl FnOnce(&mut FilterConfig)) {
        let mut filters = self.filters.take().unwrap_or_default();
        update(&mut filters);
        self.filters.set(filters);
    }
}

/// Ensures the runtime and server are initialised in `TriageState`.
fn ensure_runtime_and_server(triage_state: &TriageState) -> SharedRuntime {
    if triage_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        triage_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = triage_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if triage_state.server.with_ref(|_| ()).is_none() {
        triage_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Mounts a GraphQL response for requests whose body contains `marker`.
pub(crate) fn mount_graphql(triage_state: &TriageState, marker: &str, body: &Value) {
    let runtime = ensure_runtime_and_server(triage_state);
    let mock = Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(body));

    triage_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Plans and executes a run against the mock server.
pub(crate) fn run_triage(
    triage_state: &TriageState,
    project_url: &str,
) -> Result<TriageOutcome, TriageError> {
    let server_url = triage_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| TriageError::Api {
            message: "mock server URL missing".to_owned(),
        })?;
    let resolved_url = project_url.trim_matches('"').replace("SERVER", &server_url);

    let event = triage_state
        .event
        .with_ref(Clone::clone)
        .ok_or_else(|| TriageError::InvalidEvent {
            message: "scenario has no event".to_owned(),
        })?;
    let filters = triage_state.filters.with_ref(Clone::clone).unwrap_or_default();

    let planned = plan(&event, &filters, &resolved_url)?;
    let TriagePlan::Apply { locator, .. } = &planned else {
        return Ok(TriageOutcome::Skipped);
    };

    let runtime = triage_state.runtime.get().ok_or_else(|| TriageError::Api {
        message: "runtime not initialised".to_owned(),
    })?;

    runtime.block_on(async {
        let token_value = triage_state.token.get().ok_or(TriageError::MissingToken)?;
        let token = PersonalAccessToken::new(token_value)?;

        let gateway = OctocrabProjectGateway::for_token(&token, locator)?;
        ProjectTriage::new(&gateway).run(&planned, &event).await
    })
}
