//! Text reports for the CLI frontend.
//!
//! Reports show vertices 1-based (`V1`, `V2`, ...), matching the path
//! requests written in graph files. Everything below this module is 0-based.

use std::io::Write;

use crate::batch::{Batch, GraphRecord};
use crate::error::{GraphError, Result};
use crate::mst::{minimum_spanning_weight, MstStepper, StepperState};

/// Outcome of one Prim run, for the caller's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimSummary {
    pub total_weight: i64,
    pub complete: bool,
    /// `Some(true)` if Kruskal agreed, `None` if not checked
    pub verified: Option<bool>,
}

/// Write connectivity, cycle and bipartite results for every graph, plus the
/// requested shortest path where a line carried one.
pub fn write_analysis<W: Write>(out: &mut W, batch: &Batch) -> Result<()> {
    for (idx, record) in batch.records.iter().enumerate() {
        write_record(out, idx + 1, record)?;
    }
    Ok(())
}

fn write_record<W: Write>(out: &mut W, number: usize, record: &GraphRecord) -> Result<()> {
    let graph = &record.graph;
    writeln!(out, "Graph {}", number).map_err(output_error)?;
    writeln!(
        out,
        "Connected: {}      Has Cycle: {}      Bipartite: {}",
        graph.is_connected(),
        graph.has_cycle(),
        graph.is_bipartite()
    )
    .map_err(output_error)?;

    if let Some(query) = record.path_query {
        let path = query
            .zero_based()
            .and_then(|(from, to)| graph.shortest_path(from, to));
        let shown = match path {
            Ok(path) => display_path(&path),
            Err(GraphError::NoPath { .. }) => "none".to_string(),
            Err(err) => format!("invalid request ({})", err),
        };
        writeln!(out, "Path from {} to {}: {}", query.from, query.to, shown)
            .map_err(output_error)?;
    }

    Ok(())
}

/// Write `line n: <error>` for every rejected line.
pub fn write_rejections<W: Write>(out: &mut W, batch: &Batch) -> Result<()> {
    for (line, err) in &batch.rejected {
        writeln!(out, "line {}: {}", line, err).map_err(output_error)?;
    }
    Ok(())
}

/// Run a stepper to completion, writing each step.
pub fn write_prim<W: Write>(
    out: &mut W,
    number: usize,
    stepper: &mut MstStepper,
    verify: bool,
) -> Result<PrimSummary> {
    writeln!(out, "Graph {}", number).map_err(output_error)?;

    loop {
        let edges_before = stepper.visited_edges().len();
        if !stepper.step_forward() {
            break;
        }
        let written = match stepper.visited_edges().get(edges_before) {
            Some(edge) => writeln!(
                out,
                "Using edge V{}-V{}, with weight {}",
                edge.u + 1,
                edge.v + 1,
                edge.weight
            ),
            None => {
                let start = stepper.visited_vertices().first().copied().unwrap_or_default();
                writeln!(out, "Start at V{}", start + 1)
            }
        };
        written.map_err(output_error)?;
    }

    let complete = stepper.state() == StepperState::Complete;
    let written = if complete {
        writeln!(
            out,
            "Total weight of minimal spanning tree: {}",
            stepper.total_weight()
        )
    } else {
        let reason = if stepper.graph().is_connected() {
            "total weight overflows"
        } else {
            "graph is disconnected"
        };
        writeln!(
            out,
            "Stopped: {} ({} of {} vertices reached, weight {})",
            reason,
            stepper.visited_vertices().len(),
            stepper.graph().vertex_count(),
            stepper.total_weight()
        )
    };
    written.map_err(output_error)?;

    let verified = if verify {
        let expected = minimum_spanning_weight(stepper.graph());
        let agrees = match expected {
            Some(weight) => complete && weight == stepper.total_weight(),
            None => !complete,
        };
        let written = match expected {
            Some(weight) if agrees => writeln!(out, "Kruskal check: ok ({})", weight),
            Some(weight) => writeln!(out, "Kruskal check: MISMATCH (expected {})", weight),
            None if stepper.graph().is_connected() => {
                writeln!(out, "Kruskal check: total weight overflows")
            }
            None => writeln!(out, "Kruskal check: no spanning tree exists"),
        };
        written.map_err(output_error)?;
        Some(agrees)
    } else {
        None
    };

    Ok(PrimSummary {
        total_weight: stepper.total_weight(),
        complete,
        verified,
    })
}

/// Join 0-based vertices as a 1-based comma-separated list.
pub fn display_path(path: &[usize]) -> String {
    path.iter()
        .map(|v| (v + 1).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn output_error(source: std::io::Error) -> GraphError {
    GraphError::OutputError { source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::load_str;
    use crate::config::BatchConfig;
    use crate::graph::Graph;

    fn render_analysis(input: &str) -> String {
        let batch = load_str(input, &BatchConfig::new()).unwrap();
        let mut out = Vec::new();
        write_analysis(&mut out, &batch).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_analysis_report() {
        let text = render_analysis("3,0,1,1,1,0,1,1,1,0\n4,0,1,0,1,1,0,1,0,0,1,0,1,1,0,1,0,1,3\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Graph 1");
        assert_eq!(
            lines[1],
            "Connected: true      Has Cycle: true      Bipartite: false"
        );
        assert_eq!(lines[2], "Graph 2");
        assert_eq!(
            lines[3],
            "Connected: true      Has Cycle: true      Bipartite: true"
        );
        assert_eq!(lines[4], "Path from 1 to 3: 1,2,3");
    }

    #[test]
    fn test_analysis_report_without_path() {
        let text = render_analysis("3,0,1,0,1,0,0,0,0,0,1,3\n3,0,1,0,1,0,0,0,0,0,1,9\n");
        assert!(text.contains("Path from 1 to 3: none"));
        assert!(text.contains("Path from 1 to 9: invalid request"));
    }

    #[test]
    fn test_rejections_report() {
        let batch = load_str("1,0\n2,0,1\n", &BatchConfig::new()).unwrap();
        let mut out = Vec::new();
        write_rejections(&mut out, &batch).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("line 2: Invalid graph representation"));
    }

    #[test]
    fn test_prim_report() {
        let graph = Graph::from_text("3,0,2,5,2,0,1,5,1,0").unwrap();
        let mut stepper = MstStepper::new(graph);
        let mut out = Vec::new();
        let summary = write_prim(&mut out, 1, &mut stepper, true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Graph 1\n\
             Start at V1\n\
             Using edge V1-V2, with weight 2\n\
             Using edge V2-V3, with weight 1\n\
             Total weight of minimal spanning tree: 3\n\
             Kruskal check: ok (3)\n"
        );
        assert_eq!(
            summary,
            PrimSummary {
                total_weight: 3,
                complete: true,
                verified: Some(true)
            }
        );
    }

    #[test]
    fn test_prim_report_disconnected() {
        let graph = Graph::from_text("3,0,4,0,4,0,0,0,0,0").unwrap();
        let mut stepper = MstStepper::new(graph);
        let mut out = Vec::new();
        let summary = write_prim(&mut out, 2, &mut stepper, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Stopped: graph is disconnected (2 of 3 vertices reached, weight 4)"));
        assert!(text.contains("Kruskal check: no spanning tree exists"));
        assert_eq!(summary.verified, Some(true));
        assert!(!summary.complete);
    }

    #[test]
    fn test_prim_report_weight_overflow() {
        let max = i64::MAX;
        let graph = Graph::from_text(&format!("3,0,{max},0,{max},0,{max},0,{max},0")).unwrap();
        let mut stepper = MstStepper::new(graph);
        let mut out = Vec::new();
        let summary = write_prim(&mut out, 1, &mut stepper, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Stopped: total weight overflows (2 of 3 vertices reached"));
        assert!(text.contains("Kruskal check: total weight overflows"));
        assert!(!summary.complete);
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(&[0, 4, 2]), "1,5,3");
        assert_eq!(display_path(&[]), "");
    }
}
