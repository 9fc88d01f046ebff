//! Similarity graph layout and SVG rendering.
//!
//! Search hits are placed on fixed angular slots around a central query node. Slot `i` sits at
//! angle `i / max_nodes * 2π` regardless of how many hits there are, so a short result list
//! occupies only the first part of the circle and positions stay stable between searches.
//!
//! Node size, opacity and edge width all scale with similarity.

use crate::config::GraphConfig;
use crate::constants::{NODE_LABEL_OFFSET, QUERY_NODE_RADIUS};
use crate::search::SearchResult;
use serde::Serialize;
use std::f64::consts::PI;

const QUERY_FILL: &str = "#667eea";
const NODE_FILL: &str = "#764ba2";
const EDGE_STROKE: &str = "#ddd";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A search hit positioned on the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub position: Point,
    pub radius: f64,
    pub opacity: f64,
    /// Stroke width of the edge from the query node
    pub edge_width: f64,
    /// Rounded similarity percentage, for example `87%`
    pub label: String,
    /// Storage key of the transcript this node opens
    pub s3_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityGraph {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub query_radius: f64,
    pub nodes: Vec<GraphNode>,
}

/// Lays out at most `config.max_nodes()` results around the query node.
pub fn layout_graph(results: &[SearchResult], config: &GraphConfig) -> SimilarityGraph {
    let (cx, cy) = config.center();
    let slots = config.max_nodes();

    if results.len() > slots {
        tracing::debug!(
            "similarity graph shows {} of {} results",
            slots,
            results.len()
        );
    }

    let nodes = results
        .iter()
        .take(slots)
        .enumerate()
        .map(|(i, result)| {
            let angle = (i as f64 / slots as f64) * 2.0 * PI;
            let s = result.similarity.value();
            GraphNode {
                position: Point {
                    x: cx + config.radius() * angle.cos(),
                    y: cy + config.radius() * angle.sin(),
                },
                radius: 20.0 + s * 20.0,
                opacity: 0.3 + s * 0.7,
                edge_width: s * 5.0,
                label: format!("{}%", result.similarity.percent().round()),
                s3_key: result.s3_key.clone(),
            }
        })
        .collect();

    SimilarityGraph {
        width: config.width(),
        height: config.height(),
        center: Point { x: cx, y: cy },
        query_radius: QUERY_NODE_RADIUS,
        nodes,
    }
}

/// Renders the graph as a standalone SVG document.
pub fn render_svg(graph: &SimilarityGraph) -> String {
    let mut svg = String::new();
    let Point { x: cx, y: cy } = graph.center;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        graph.width, graph.height, graph.width, graph.height
    ));

    // Edges first so nodes are drawn over them.
    for node in &graph.nodes {
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\" />\n",
            cx, cy, node.position.x, node.position.y, EDGE_STROKE, node.edge_width
        ));
    }

    svg.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" />\n",
        cx, cy, graph.query_radius, QUERY_FILL
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"white\" font-size=\"12\">Query</text>\n",
        cx,
        cy + 5.0
    ));

    for node in &graph.nodes {
        svg.push_str("  <g>\n");
        svg.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&node.s3_key)
        ));
        svg.push_str(&format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" opacity=\"{:.2}\" />\n",
            node.position.x, node.position.y, node.radius, NODE_FILL, node.opacity
        ));
        svg.push_str(&format!(
            "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"10\">{}</text>\n",
            node.position.x,
            node.position.y + NODE_LABEL_OFFSET,
            escape_xml(&node.label)
        ));
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_types::Similarity;

    fn result(similarity: f64, key: &str) -> SearchResult {
        SearchResult {
            similarity: Similarity::new(similarity).unwrap(),
            preview: String::new(),
            s3_key: key.to_string(),
            entity_name: "Acme".to_string(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_first_slot_is_to_the_right_of_centre() {
        let graph = layout_graph(&[result(1.0, "a")], &GraphConfig::default());
        let node = &graph.nodes[0];
        assert!(approx(node.position.x, 600.0));
        assert!(approx(node.position.y, 300.0));
        assert!(approx(node.radius, 40.0));
        assert!(approx(node.opacity, 1.0));
        assert!(approx(node.edge_width, 5.0));
        assert_eq!(node.label, "100%");
    }

    #[test]
    fn test_slots_are_fixed_not_spread() {
        let graph = layout_graph(&[result(0.5, "a"), result(0.5, "b")], &GraphConfig::default());
        // Second of eight slots is at 45 degrees, not 180.
        let node = &graph.nodes[1];
        let offset = 200.0 * (PI / 4.0).cos();
        assert!(approx(node.position.x, 400.0 + offset));
        assert!(approx(node.position.y, 300.0 + offset));
        assert!(approx(node.radius, 30.0));
        assert!(approx(node.opacity, 0.65));
        assert!(approx(node.edge_width, 2.5));
        assert_eq!(node.label, "50%");
    }

    #[test]
    fn test_results_beyond_slots_are_dropped() {
        let results: Vec<_> = (0..10).map(|i| result(0.1, &format!("k{}", i))).collect();
        let graph = layout_graph(&results, &GraphConfig::default());
        assert_eq!(graph.nodes.len(), 8);
        assert_eq!(graph.nodes[7].s3_key, "k7");

        let small = GraphConfig::with_overrides(100.0, 3).unwrap();
        let graph = layout_graph(&results, &small);
        assert_eq!(graph.nodes.len(), 3);
        assert!(approx(graph.nodes[0].position.x, 500.0));
    }

    #[test]
    fn test_label_rounds_percentage() {
        let graph = layout_graph(&[result(0.876, "a")], &GraphConfig::default());
        assert_eq!(graph.nodes[0].label, "88%");
    }

    #[test]
    fn test_label_rounds_exact_halves_up() {
        let graph = layout_graph(
            &[result(0.125, "a"), result(0.375, "b")],
            &GraphConfig::default(),
        );
        assert_eq!(graph.nodes[0].label, "13%");
        assert_eq!(graph.nodes[1].label, "38%");
    }

    #[test]
    fn test_render_svg() {
        let graph = layout_graph(
            &[result(0.9, "transcripts/a&b.json"), result(0.4, "c")],
            &GraphConfig::default(),
        );
        let svg = render_svg(&graph);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\""));
        assert!(svg.contains(">Query</text>"));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert_eq!(svg.matches("<circle ").count(), 3);
        assert!(svg.contains("<title>transcripts/a&amp;b.json</title>"));
        assert!(svg.contains(">90%</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_results() {
        let graph = layout_graph(&[], &GraphConfig::default());
        assert!(graph.nodes.is_empty());
        let svg = render_svg(&graph);
        assert_eq!(svg.matches("<circle ").count(), 1);
    }
}
