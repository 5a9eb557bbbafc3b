//! Integration & Health Report Types
//!
//! Result objects returned by the system integration service. Expected
//! business-rule failures are reported through these (success flag +
//! human-readable messages), never as errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a single component probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    pub healthy: bool,
    /// Probe latency (ms), when measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Error detail when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentCheck {
    pub fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            healthy: true,
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

/// Result of cross-component integration validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub success: bool,
    /// Components that resolved and passed their probe
    pub validated_components: Vec<String>,
    /// "component: error" entries for failed probes
    pub failed_components: Vec<String>,
}

/// Result of the business creation workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub success: bool,
    pub business_id: Option<i64>,
    pub shop_ids: Vec<i64>,
    /// Names of steps that completed, in execution order
    pub completed_steps: Vec<String>,
    pub errors: Vec<String>,
}

/// Result of the system health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Conjunction of all component healths
    pub healthy: bool,
    pub components: BTreeMap<String, ComponentCheck>,
}

/// Result of cross-platform compatibility validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// True iff every platform's issue list is empty
    pub compatible: bool,
    pub supported_platforms: Vec<String>,
    /// platform -> issue descriptions
    pub issues: BTreeMap<String, Vec<String>>,
}
