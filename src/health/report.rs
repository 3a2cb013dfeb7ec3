//! Health verdict and report types.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health classification of one dependency at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
    Unknown,
}

impl HealthState {
    pub fn is_healthy(self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

/// Composite status derived by folding all dependency verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Degraded,
}

impl OverallHealth {
    /// Healthy iff every verdict is healthy. Unknown counts as not healthy.
    pub fn fold(states: impl IntoIterator<Item = HealthState>) -> Self {
        if states.into_iter().all(HealthState::is_healthy) {
            OverallHealth::Healthy
        } else {
            OverallHealth::Degraded
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            OverallHealth::Healthy => StatusCode::OK,
            OverallHealth::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Verdict produced by one dependency probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyVerdict {
    pub name: &'static str,
    pub state: HealthState,
}

/// Per-dependency verdicts in fixed order: store, cache, identity service,
/// media service. Field order is the serialization order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceVerdicts {
    pub database: HealthState,
    pub redis: HealthState,
    pub auth_service: HealthState,
    pub image_service: HealthState,
}

/// One composite health report, built fresh per request.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallHealth,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceVerdicts,
}

impl HealthReport {
    /// Assemble a report from the four probe verdicts.
    pub fn assemble(
        database: DependencyVerdict,
        redis: DependencyVerdict,
        auth_service: DependencyVerdict,
        image_service: DependencyVerdict,
    ) -> Self {
        let status = OverallHealth::fold([
            database.state,
            redis.state,
            auth_service.state,
            image_service.state,
        ]);

        Self {
            status,
            timestamp: Utc::now(),
            services: ServiceVerdicts {
                database: database.state,
                redis: redis.state,
                auth_service: auth_service.state,
                image_service: image_service.state,
            },
        }
    }
}
