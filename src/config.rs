//! Depth-field configuration
//!
//! Plain serializable settings. Defaults reproduce the classic
//! `distanceField` tool: marching parabolas, square-rooted output, and the
//! field-of-view edge treated as background.
//!
//! Author: Moroya Sakamoto

use serde::{Deserialize, Serialize};

use crate::edt::{EdtStrategy, LineSegmented, PassOptions, PerLabel};
use crate::error::FieldError;

/// Depth estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Exact Euclidean distance transform (lower envelope of parabolas)
    #[default]
    MarchingParabolas,
    /// Onion-peel depth by repeated 6-connected erosion (byte masks only)
    Erosion,
}

impl std::str::FromStr for Metric {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARCHING_PARABOLAS" => Ok(Metric::MarchingParabolas),
            "EROSION" => Ok(Metric::Erosion),
            _ => Err(FieldError::UnknownMetric(s.to_string())),
        }
    }
}

/// How the EDT treats multiple labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdtStrategyKind {
    /// All labels in one label-segmented sweep per axis
    #[default]
    LineSegmented,
    /// One isolated binary transform per label
    PerLabel,
}

impl EdtStrategyKind {
    /// Implementation behind this kind
    pub fn strategy(self) -> &'static dyn EdtStrategy {
        match self {
            EdtStrategyKind::LineSegmented => &LineSegmented,
            EdtStrategyKind::PerLabel => &PerLabel,
        }
    }
}

/// Configuration for [`distance_field`](crate::distance_field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceFieldConfig {
    /// Depth estimator
    pub metric: Metric,
    /// Label handling for the EDT
    pub strategy: EdtStrategyKind,
    /// Output distances instead of squared distances (EDT only)
    pub do_sqrt: bool,
    /// Count the outside of the volume as background (EDT only)
    pub edges_are_zero: bool,
    /// Use the rayon thread pool
    pub parallel: bool,
}

impl Default for DistanceFieldConfig {
    fn default() -> Self {
        Self {
            metric: Metric::MarchingParabolas,
            strategy: EdtStrategyKind::LineSegmented,
            do_sqrt: true,
            edges_are_zero: true,
            parallel: true,
        }
    }
}

impl DistanceFieldConfig {
    /// Set the metric
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the EDT strategy
    pub fn with_strategy(mut self, strategy: EdtStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the final square root
    pub fn with_sqrt(mut self, do_sqrt: bool) -> Self {
        self.do_sqrt = do_sqrt;
        self
    }

    /// Choose the field-of-view edge policy
    pub fn with_edges_are_zero(mut self, edges_are_zero: bool) -> Self {
        self.edges_are_zero = edges_are_zero;
        self
    }

    /// Enable or disable multithreading
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn pass_options(&self) -> PassOptions {
        PassOptions {
            edges_are_zero: self.edges_are_zero,
            parallel: self.parallel,
        }
    }
}
