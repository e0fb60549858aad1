// src/server/router.rs
use hyper::Method;

use crate::proxy::SimulationEndpoint;

const SIMULATIONS_PREFIX: &str = "/api/simulations/";
const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Simulation {
        endpoint: SimulationEndpoint,
        run_id: String,
    },
    Health,
    MissingRunId,
    InvalidRunId,
    MethodNotAllowed,
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Self {
        if path == HEALTH_PATH {
            return if *method == Method::GET {
                Route::Health
            } else {
                Route::MethodNotAllowed
            };
        }

        let Some(rest) = path.strip_prefix(SIMULATIONS_PREFIX) else {
            return Route::NotFound;
        };

        // `/api/simulations/status` has no run id segment at all.
        let (run_id, suffix) = rest.rsplit_once('/').unwrap_or(("", rest));

        let endpoint = match suffix {
            "status" => SimulationEndpoint::Status,
            "result" => SimulationEndpoint::Result,
            _ => return Route::NotFound,
        };

        // Run id must be a single path segment.
        if run_id.contains('/') {
            return Route::NotFound;
        }

        if *method != Method::GET {
            return Route::MethodNotAllowed;
        }

        if run_id.is_empty() {
            return Route::MissingRunId;
        }

        if is_dot_segment(run_id) {
            return Route::InvalidRunId;
        }

        Route::Simulation {
            endpoint,
            run_id: run_id.to_string(),
        }
    }

    /// Low-cardinality label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Simulation { endpoint, .. } => endpoint.name(),
            Route::Health => "health",
            Route::MissingRunId => "missing_run_id",
            Route::InvalidRunId => "invalid_run_id",
            Route::MethodNotAllowed => "method_not_allowed",
            Route::NotFound => "not_found",
        }
    }
}

/// `.` and `..`, plain or percent-encoded. The engine URL would otherwise
/// be normalized to a different path.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.replace("%2e", ".").replace("%2E", ".");
    decoded == "." || decoded == ".."
}
