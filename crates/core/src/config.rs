//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core functions. Core
//! code never reads environment variables itself; the helpers here accept the raw
//! `Option<String>` value so the caller decides where it comes from.

use crate::constants::{
    DEFAULT_GRAPH_CENTER_X, DEFAULT_GRAPH_CENTER_Y, DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_MAX_NODES,
    DEFAULT_GRAPH_RADIUS, DEFAULT_GRAPH_WIDTH,
};
use crate::{CoreError, CoreResult};

/// Environment variable overriding the number of graph slots.
pub const GRAPH_MAX_NODES_ENV: &str = "CC_GRAPH_MAX_NODES";

/// Environment variable overriding the orbit radius of result nodes.
pub const GRAPH_RADIUS_ENV: &str = "CC_GRAPH_RADIUS";

/// Geometry of the similarity graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    width: f64,
    height: f64,
    center_x: f64,
    center_y: f64,
    radius: f64,
    max_nodes: usize,
}

impl GraphConfig {
    /// Create a new `GraphConfig`.
    ///
    /// The canvas is `width` x `height` and result nodes orbit the centre at `radius`.
    pub fn new(
        width: f64,
        height: f64,
        center_x: f64,
        center_y: f64,
        radius: f64,
        max_nodes: usize,
    ) -> CoreResult<Self> {
        for (name, value) in [("width", width), ("height", height), ("radius", radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidInput(format!(
                    "graph {} must be a positive number",
                    name
                )));
            }
        }
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(CoreError::InvalidInput(
                "graph centre must be finite".into(),
            ));
        }
        if max_nodes == 0 {
            return Err(CoreError::InvalidInput(
                "graph max_nodes must be at least 1".into(),
            ));
        }

        Ok(Self {
            width,
            height,
            center_x,
            center_y,
            radius,
            max_nodes,
        })
    }

    /// Default geometry with overridden `radius` and `max_nodes`.
    pub fn with_overrides(radius: f64, max_nodes: usize) -> CoreResult<Self> {
        Self::new(
            DEFAULT_GRAPH_WIDTH,
            DEFAULT_GRAPH_HEIGHT,
            DEFAULT_GRAPH_CENTER_X,
            DEFAULT_GRAPH_CENTER_Y,
            radius,
            max_nodes,
        )
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRAPH_WIDTH,
            height: DEFAULT_GRAPH_HEIGHT,
            center_x: DEFAULT_GRAPH_CENTER_X,
            center_y: DEFAULT_GRAPH_CENTER_Y,
            radius: DEFAULT_GRAPH_RADIUS,
            max_nodes: DEFAULT_GRAPH_MAX_NODES,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoreConfig {
    graph: GraphConfig,
}

impl CoreConfig {
    pub fn new(graph: GraphConfig) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the graph slot count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 8.
pub fn max_nodes_from_env_value(value: Option<String>) -> CoreResult<usize> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_GRAPH_MAX_NODES);
    };
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CoreError::InvalidInput(format!(
            "{} must be a positive integer, got '{}'",
            GRAPH_MAX_NODES_ENV, value
        ))),
    }
}

/// Parse the graph orbit radius from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 200.
pub fn radius_from_env_value(value: Option<String>) -> CoreResult<f64> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_GRAPH_RADIUS);
    };
    match value.parse::<f64>() {
        Ok(r) if r.is_finite() && r > 0.0 => Ok(r),
        _ => Err(CoreError::InvalidInput(format!(
            "{} must be a positive number, got '{}'",
            GRAPH_RADIUS_ENV, value
        ))),
    }
}
