//! Monitor configuration parser
//!
//! Parses the YAML monitor-list configuration into typed [`MonitorSpec`]s.
//! Acceptance is all-or-nothing: the first hard error rejects the whole
//! config and the run never starts. Warnings (missing names or thresholds,
//! unknown stat tests) substitute defaults and never block execution.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use super::{MonitorKind, MonitorSpec, StatTest};
use crate::constants::DEFAULT_TIME_TRAVEL_DAYS;
use crate::error::ConfigError;

/// Validated configuration for one drift run.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Time-travel offset for the reference snapshot, configured once per
    /// run, not per monitor.
    pub time_travel_days: u32,
    pub monitors: Vec<MonitorSpec>,
    /// Non-blocking validation notes, in monitor order.
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_time_travel_days")]
    time_travel_days: u32,
    #[serde(default)]
    monitors: Vec<RawMonitor>,
}

#[derive(Debug, Deserialize)]
struct RawMonitor {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    column: Option<String>,
    threshold: Option<f64>,
    stattest: Option<String>,
}

fn default_time_travel_days() -> u32 {
    DEFAULT_TIME_TRAVEL_DAYS
}

/// Parse and validate a monitor-list configuration.
pub fn parse_monitor_config(yaml: &str) -> Result<ParsedConfig, ConfigError> {
    let raw: RawConfig = serde_yaml::from_str(yaml)?;

    let mut monitors = Vec::with_capacity(raw.monitors.len());
    let mut warnings = Vec::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for (index, monitor) in raw.monitors.into_iter().enumerate() {
        let kind_str = monitor
            .kind
            .ok_or(ConfigError::MissingKind { index })?;
        let kind: MonitorKind = kind_str
            .parse()
            .map_err(|_| ConfigError::UnknownKind {
                index,
                kind: kind_str.clone(),
            })?;

        let name = match monitor.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                let generated = generate_name(kind, index, &used_names);
                warnings.push(format!(
                    "monitor {}: missing name, using '{}'",
                    index, generated
                ));
                generated
            }
        };
        // Names must be unique within a run; a duplicate gets the monitor
        // index appended rather than shadowing the earlier result.
        let name = if used_names.contains(&name) {
            let renamed = format!("{}_{}", name, index);
            warnings.push(format!(
                "monitor {}: duplicate name '{}', using '{}'",
                index, name, renamed
            ));
            renamed
        } else {
            name
        };

        let column = monitor.column.filter(|c| !c.is_empty());
        if kind == MonitorKind::Distribution && column.is_none() {
            return Err(ConfigError::MissingColumn { index, name });
        }

        let threshold = match monitor.threshold {
            Some(t) if t < 0.0 => {
                return Err(ConfigError::NegativeThreshold {
                    index,
                    name,
                    threshold: t,
                })
            }
            Some(t) => t,
            None => {
                let default = kind.default_threshold();
                warnings.push(format!(
                    "monitor {} ('{}'): missing threshold, using kind default {}",
                    index, name, default
                ));
                default
            }
        };

        let stat_test = match monitor.stattest {
            Some(raw_test) => match raw_test.parse::<StatTest>() {
                Ok(test) => {
                    if kind != MonitorKind::Distribution {
                        warnings.push(format!(
                            "monitor {} ('{}'): stattest is ignored for {} monitors",
                            index, name, kind
                        ));
                    }
                    Some(test)
                }
                // Graceful degradation: unknown test falls back to the
                // kind's default behavior.
                Err(_) => {
                    warnings.push(format!(
                        "monitor {} ('{}'): unknown stattest '{}', using default test",
                        index, name, raw_test
                    ));
                    None
                }
            },
            None => None,
        };

        used_names.insert(name.clone());
        monitors.push(MonitorSpec {
            name,
            kind,
            column,
            threshold,
            stat_test,
        });
    }

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(ParsedConfig {
        time_travel_days: raw.time_travel_days,
        monitors,
        warnings,
    })
}

/// Deterministic auto-generated name: `<kind>_monitor`, suffixed with the
/// monitor index when that would collide with a name already taken.
fn generate_name(kind: MonitorKind, index: usize, used: &HashSet<String>) -> String {
    let candidate = format!("{}_monitor", kind);
    if used.contains(&candidate) {
        format!("{}_monitor_{}", kind, index)
    } else {
        candidate
    }
}

// ============================================================================
// TESTS
// ============================================================================
