//! # CC Core
//!
//! Client-side logic for the contact-center transcript analytics demo.
//!
//! Generation, scoring, embeddings and similarity search all happen in a remote backend. This
//! crate only reshapes what that backend returns:
//! - [`analysis`]: buckets a free-text analysis report into issues, actions, outcomes, CSAT,
//!   FCR, performance notes and a summary
//! - [`display`]: renders a parsed report, falling back to the raw text when unstructured
//! - [`transcript`]: attributes transcript lines to agent or customer
//! - [`search`] and [`graph`]: similarity search hits as list rows and as an SVG graph
//! - [`metrics`]: rolls a batch of parsed reports up into KPIs
//!
//! **No I/O**: reading files, talking to the backend and authentication belong to callers such
//! as the `ccta` CLI.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod search;
pub mod transcript;

pub use analysis::{parse_report, AnalysisReport, Section};
pub use cc_types::{CsatBand, CsatScore, Similarity};
pub use config::{CoreConfig, GraphConfig};
pub use display::render_report;
pub use error::{CoreError, CoreResult};
pub use graph::{layout_graph, render_svg, SimilarityGraph};
pub use metrics::{aggregate_reports, BatchMetrics};
pub use search::{parse_search_response, SearchRequest, SearchResponse, SearchResult};
pub use transcript::{format_transcript, render_transcript, Speaker, TranscriptLine};
