use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use medref_core::GuardState;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};
use tracing::warn;

/// Install the Prometheus recorder and its upkeep task.
///
/// Returns `None` when metrics are disabled or a recorder is already
/// installed for this process. Must be called inside a Tokio runtime.
pub fn init_metrics(enabled: bool) -> Option<PrometheusHandle> {
    if !enabled {
        return None;
    }

    let builder = match PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
        ],
    ) {
        Ok(builder) => builder,
        Err(e) => {
            warn!(error = %e, "Invalid histogram buckets, metrics disabled");
            return None;
        }
    };

    let handle = match builder.install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Records request count, latency and in-flight gauge per matched route.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        // Guarded pages are served by the fallback; label them all the same
        // to keep cardinality bounded.
        .unwrap_or_else(|| "fallback".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Count one page guard outcome.
pub fn track_guard_decision(state: GuardState, role: Option<&str>) {
    counter!(
        "guard_decisions_total",
        "state" => state.as_str(),
        "role" => role.unwrap_or("anonymous").to_string()
    )
    .increment(1);
}

/// Count one permission or route check answered over the API.
pub fn track_access_check(allowed: bool) {
    let status = if allowed { "allowed" } else { "denied" };
    counter!("access_checks_total", "status" => status).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_metrics_install_nothing() {
        assert!(init_metrics(false).is_none());
    }

    #[test]
    fn test_tracking_without_recorder_is_noop() {
        track_guard_decision(GuardState::Unauthorized, Some("PHU_STAFF"));
        track_guard_decision(GuardState::Unauthenticated, None);
        track_access_check(true);
    }
}
