//! Constants used throughout the core crate.
//!
//! Section markers are matched as case-sensitive substrings, so their exact spelling is part of
//! the report contract with the analysis backend.

/// Marker opening the issues section.
pub const ISSUES_MARKER: &str = "ISSUES IDENTIFIED";

/// Marker opening the resolution actions section.
pub const ACTIONS_MARKER: &str = "ACTIONS TO RESOLVE";

/// Marker opening the outcomes section.
pub const OUTCOMES_MARKER: &str = "OUTCOMES";

/// Marker opening the predicted CSAT section.
pub const CSAT_MARKER: &str = "PREDICTED CSAT";

/// Marker opening the first call resolution section.
pub const FCR_MARKER: &str = "FCR";

/// Marker opening the agent performance section.
pub const PERFORMANCE_MARKER: &str = "AGENT PERFORMANCE";

/// Marker opening the overall summary section.
pub const SUMMARY_MARKER: &str = "OVERALL";

/// Number of hits requested from the similarity search endpoint.
pub const DEFAULT_TOP_K: usize = 10;

/// Maximum characters of a preview reused as a "find similar" query.
pub const SIMILAR_QUERY_MAX_CHARS: usize = 200;

pub const DEFAULT_GRAPH_WIDTH: f64 = 800.0;
pub const DEFAULT_GRAPH_HEIGHT: f64 = 600.0;
pub const DEFAULT_GRAPH_CENTER_X: f64 = 400.0;
pub const DEFAULT_GRAPH_CENTER_Y: f64 = 300.0;
pub const DEFAULT_GRAPH_RADIUS: f64 = 200.0;

/// Number of fixed angular slots around the query node.
pub const DEFAULT_GRAPH_MAX_NODES: usize = 8;

/// Radius of the central query node.
pub const QUERY_NODE_RADIUS: f64 = 30.0;

/// Vertical offset of a result's percentage label below its node centre.
pub const NODE_LABEL_OFFSET: f64 = 35.0;

/// Number of most frequent issues kept in batch metrics.
pub const TOP_ISSUES_LIMIT: usize = 5;
