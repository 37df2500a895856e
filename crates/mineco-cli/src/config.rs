use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use mineco::core::graph::builder::Granularity;
use mineco::engine::config::{self as core_config, ClusterMetric, DirectionOverride};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGraphConfig {
    granularity: Option<String>,
    #[serde(rename = "distance-threshold")]
    distance_threshold: Option<f64>,
    #[serde(rename = "long-interaction-threshold")]
    long_interaction_threshold: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFilterConfig {
    #[serde(rename = "distance-change-tol")]
    distance_change_tol: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialClusteringConfig {
    eps: Option<f64>,
    #[serde(rename = "min-samples")]
    min_samples: Option<usize>,
    metric: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRunConfig {
    reverse: Option<bool>,
    #[serde(rename = "pair-timeout-secs")]
    pair_timeout_secs: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEcoConfig {
    graph: Option<PartialGraphConfig>,
    filter: Option<PartialFilterConfig>,
    clustering: Option<PartialClusteringConfig>,
    run: Option<PartialRunConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_named<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| CliError::Config(e.to_string()))
}

fn timeout_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        CliError::Config(format!(
            "Pair timeout must be a non-negative number of seconds, got {}",
            secs
        ))
    })
}

impl PartialEcoConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reads the file named by `--config`, or starts from an empty configuration.
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration with the precedence
    /// CLI flag > `--set` > file > built-in default.
    pub fn merge_with_cli(
        mut self,
        args: &ConfigArgs,
        reverse: Option<bool>,
    ) -> Result<core_config::EcoConfig> {
        self.apply_set_values(&args.set_values)?;

        let graph = self.graph.take().unwrap_or_default();
        let filter = self.filter.take().unwrap_or_default();
        let clustering = self.clustering.take().unwrap_or_default();
        let run = self.run.take().unwrap_or_default();

        let mut builder = core_config::EcoConfigBuilder::new();

        if let Some(name) = args.granularity.as_ref().or(graph.granularity.as_ref()) {
            builder = builder.granularity(parse_named::<Granularity>(name)?);
        }
        if let Some(d) = args.distance_threshold.or(graph.distance_threshold) {
            builder = builder.distance_threshold(d);
        }
        if let Some(n) = args
            .long_interaction_threshold
            .or(graph.long_interaction_threshold)
        {
            builder = builder.long_interaction_threshold(n);
        }
        if let Some(tol) = args.distance_change_tol.or(filter.distance_change_tol) {
            builder = builder.distance_change_tol(tol);
        }
        if let Some(eps) = args.eps.or(clustering.eps) {
            builder = builder.cluster_eps(eps);
        }
        if let Some(n) = args.min_samples.or(clustering.min_samples) {
            builder = builder.cluster_min_samples(n);
        }
        if let Some(name) = args.metric.as_ref().or(clustering.metric.as_ref()) {
            builder = builder.cluster_metric(parse_named::<ClusterMetric>(name)?);
        }

        let reverse = reverse.or(run.reverse).unwrap_or(false);
        builder = builder.direction(DirectionOverride::from(reverse));

        if let Some(secs) = args.pair_timeout.or(run.pair_timeout_secs) {
            builder = builder.pair_timeout(timeout_from_secs(secs)?);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            match key {
                "graph.granularity" => {
                    self.graph.get_or_insert_with(Default::default).granularity =
                        Some(value_str.trim().to_string());
                }
                "graph.distance-threshold" => {
                    self.graph
                        .get_or_insert_with(Default::default)
                        .distance_threshold = Some(parse_value(key, value_str, "float")?);
                }
                "graph.long-interaction-threshold" => {
                    self.graph
                        .get_or_insert_with(Default::default)
                        .long_interaction_threshold = Some(parse_value(key, value_str, "integer")?);
                }
                "filter.distance-change-tol" => {
                    self.filter
                        .get_or_insert_with(Default::default)
                        .distance_change_tol = Some(parse_value(key, value_str, "float")?);
                }
                "clustering.eps" => {
                    self.clustering.get_or_insert_with(Default::default).eps =
                        Some(parse_value(key, value_str, "float")?);
                }
                "clustering.min-samples" => {
                    self.clustering
                        .get_or_insert_with(Default::default)
                        .min_samples = Some(parse_value(key, value_str, "integer")?);
                }
                "clustering.metric" => {
                    self.clustering.get_or_insert_with(Default::default).metric =
                        Some(value_str.trim().to_string());
                }
                "run.reverse" => {
                    self.run.get_or_insert_with(Default::default).reverse =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                "run.pair-timeout-secs" => {
                    self.run
                        .get_or_insert_with(Default::default)
                        .pair_timeout_secs = Some(parse_value(key, value_str, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Loads and merges the configuration for a command.
pub fn resolve(args: &ConfigArgs, reverse: Option<bool>) -> Result<core_config::EcoConfig> {
    PartialEcoConfig::load(args)?.merge_with_cli(args, reverse)
}
