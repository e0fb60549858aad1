// tests/routing_props.rs
use hyper::Method;
use proptest::prelude::*;
use sim_gateway::config::EngineConfig;
use sim_gateway::proxy::{EngineClient, SimulationEndpoint};
use sim_gateway::server::Route;

fn engine() -> EngineClient {
    EngineClient::new(&EngineConfig {
        base_url: "http://engine.internal:8081/".to_string(),
        ..EngineConfig::default()
    })
    .unwrap()
}

proptest! {
    #[test]
    fn inbound_path_maps_to_engine_url(run_id in "[A-Za-z0-9_~-][A-Za-z0-9_.~%-]{0,39}", result in any::<bool>()) {
        let suffix = if result { "result" } else { "status" };
        let route = Route::resolve(&Method::GET, &format!("/api/simulations/{}/{}", run_id, suffix));

        match route {
            Route::Simulation { endpoint, run_id: routed } => {
                prop_assert_eq!(&routed, &run_id);
                prop_assert_eq!(
                    engine().url_for(endpoint, &routed),
                    format!("http://engine.internal:8081/simulation/{}/{}", run_id, suffix)
                );
            }
            other => prop_assert!(false, "unexpected route {:?}", other),
        }
    }

    #[test]
    fn non_get_methods_never_forward(run_id in "[a-z0-9]{1,16}") {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let route = Route::resolve(&method, &format!("/api/simulations/{}/status", run_id));
            prop_assert_eq!(route, Route::MethodNotAllowed);
        }
    }
}

#[test]
fn dot_segments_are_not_forwarded() {
    for run_id in [".", "..", "%2e", "%2E%2e", ".%2e"] {
        let route = Route::resolve(&Method::GET, &format!("/api/simulations/{}/status", run_id));
        assert_eq!(route, Route::InvalidRunId, "{}", run_id);
    }
}

#[test]
fn endpoint_labels_are_used_in_routes() {
    let route = Route::resolve(&Method::GET, "/api/simulations/x/result");
    assert_eq!(route.name(), SimulationEndpoint::Result.name());
}
