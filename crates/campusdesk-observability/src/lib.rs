//! CampusDesk observability.
//!
//! - Console and rolling-file logging through `tracing-subscriber`
//! - HTTP request logging middleware
//! - Prometheus metrics, including authentication counters
//!
//! Compiled out with `--no-default-features`: logging then falls back to the
//! console and every tracking function becomes a no-op. At runtime,
//! `OBSERVABILITY_ENABLED=false` has the same effect.
//!
//! ```no_run
//! use campusdesk_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let _metrics = init_metrics();
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, is_observability_enabled, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_app, metrics_middleware, track_authorization_check, track_jwt_issued,
    track_jwt_validation, track_login_failure, track_login_success,
};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Stands in for `metrics_exporter_prometheus::PrometheusHandle`.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_jwt_issued() {}
    pub fn track_jwt_validation(_status: &str) {}
    pub fn track_authorization_check(_allowed: bool, _role: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
