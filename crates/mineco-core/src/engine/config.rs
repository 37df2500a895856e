use crate::core::graph::builder::{Granularity, GraphParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Distance used by DBSCAN between two contacts in residue-index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMetric {
    /// Largest per-axis index difference.
    #[default]
    Chebyshev,
    Euclidean,
}

impl ClusterMetric {
    pub fn distance(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
        let dx = (a.0 - b.0).abs();
        let dy = (a.1 - b.1).abs();
        match self {
            ClusterMetric::Chebyshev => dx.max(dy),
            ClusterMetric::Euclidean => dx.hypot(dy),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown cluster metric '{0}'. Expected 'chebyshev' or 'euclidean'.")]
pub struct ParseClusterMetricError(pub String);

impl FromStr for ClusterMetric {
    type Err = ParseClusterMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chebyshev" => Ok(ClusterMetric::Chebyshev),
            "euclidean" => Ok(ClusterMetric::Euclidean),
            _ => Err(ParseClusterMetricError(s.to_string())),
        }
    }
}

impl fmt::Display for ClusterMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterMetric::Chebyshev => write!(f, "chebyshev"),
            ClusterMetric::Euclidean => write!(f, "euclidean"),
        }
    }
}

/// Which of the two structures is treated as the contact-rich target state.
///
/// `Auto` takes the structure with more contacts; `Reverse` takes the one with fewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionOverride {
    #[default]
    Auto,
    Reverse,
}

impl From<bool> for DirectionOverride {
    fn from(reverse: bool) -> Self {
        if reverse {
            DirectionOverride::Reverse
        } else {
            DirectionOverride::Auto
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringParams {
    pub eps: f64,
    pub min_samples: usize,
    pub metric: ClusterMetric,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            eps: 1.0,
            min_samples: 1,
            metric: ClusterMetric::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcoConfig {
    pub graph: GraphParams,
    /// Unique contacts whose distance changes by less than this (Å) are dropped.
    pub distance_change_tol: f64,
    pub clustering: ClusteringParams,
    pub direction: DirectionOverride,
    pub pair_timeout: Option<Duration>,
}

impl Default for EcoConfig {
    fn default() -> Self {
        Self {
            graph: GraphParams::default(),
            distance_change_tol: 1.0,
            clustering: ClusteringParams::default(),
            direction: DirectionOverride::default(),
            pair_timeout: None,
        }
    }
}

#[derive(Default)]
pub struct EcoConfigBuilder {
    granularity: Option<Granularity>,
    distance_threshold: Option<f64>,
    long_interaction_threshold: Option<usize>,
    distance_change_tol: Option<f64>,
    cluster_eps: Option<f64>,
    cluster_min_samples: Option<usize>,
    cluster_metric: Option<ClusterMetric>,
    direction: Option<DirectionOverride>,
    pair_timeout: Option<Duration>,
}

impl EcoConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }
    pub fn distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = Some(threshold);
        self
    }
    pub fn long_interaction_threshold(mut self, threshold: usize) -> Self {
        self.long_interaction_threshold = Some(threshold);
        self
    }
    pub fn distance_change_tol(mut self, tol: f64) -> Self {
        self.distance_change_tol = Some(tol);
        self
    }
    pub fn cluster_eps(mut self, eps: f64) -> Self {
        self.cluster_eps = Some(eps);
        self
    }
    pub fn cluster_min_samples(mut self, n: usize) -> Self {
        self.cluster_min_samples = Some(n);
        self
    }
    pub fn cluster_metric(mut self, metric: ClusterMetric) -> Self {
        self.cluster_metric = Some(metric);
        self
    }
    pub fn direction(mut self, direction: DirectionOverride) -> Self {
        self.direction = Some(direction);
        self
    }
    pub fn pair_timeout(mut self, timeout: Duration) -> Self {
        self.pair_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<EcoConfig, ConfigError> {
        let defaults = EcoConfig::default();

        let distance_threshold = self
            .distance_threshold
            .unwrap_or(defaults.graph.distance_threshold);
        require_positive("distance_threshold", distance_threshold)?;

        let distance_change_tol = self
            .distance_change_tol
            .unwrap_or(defaults.distance_change_tol);
        if !distance_change_tol.is_finite() || distance_change_tol < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance_change_tol",
                reason: format!("must be a non-negative number, got {distance_change_tol}"),
            });
        }

        let eps = self.cluster_eps.unwrap_or(defaults.clustering.eps);
        require_positive("cluster_eps", eps)?;

        let min_samples = self
            .cluster_min_samples
            .unwrap_or(defaults.clustering.min_samples);
        if min_samples == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "cluster_min_samples",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.pair_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidParameter {
                name: "pair_timeout",
                reason: "must be longer than zero".to_string(),
            });
        }

        Ok(EcoConfig {
            graph: GraphParams {
                granularity: self.granularity.unwrap_or(defaults.graph.granularity),
                distance_threshold,
                long_interaction_threshold: self
                    .long_interaction_threshold
                    .unwrap_or(defaults.graph.long_interaction_threshold),
            },
            distance_change_tol,
            clustering: ClusteringParams {
                eps,
                min_samples,
                metric: self.cluster_metric.unwrap_or(defaults.clustering.metric),
            },
            direction: self.direction.unwrap_or(defaults.direction),
            pair_timeout: self.pair_timeout,
        })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
