//! CLI presentation: text and JSON rendering of plans and build summaries.

use crate::compile::{BuildSummary, Plan};
use serde_json::json;

/// Mono-state table as aligned text
pub fn format_plan_text(plan: &Plan, fingerprint: &str) -> String {
    let graph = &plan.graph;
    let state_width = graph
        .nodes
        .iter()
        .map(|node| node.state.len())
        .max()
        .unwrap_or(0)
        .max("NEXT".len());

    let mut lines = vec![
        format!(
            "Initial state: {} ({} states, {} mono-states)",
            graph.initial,
            plan.table.states().len(),
            graph.nodes.len()
        ),
        format!("Fingerprint: {}", fingerprint),
        String::new(),
        format!("{:<4}  {:<state_width$}  {:<4}  {:>3}", "TAG", "NEXT", "KIND", "OUT"),
    ];
    for node in &graph.nodes {
        lines.push(format!(
            "{:<4}  {:<state_width$}  {:<4}  {:>3}",
            node.id.tag(),
            node.state,
            node.program.kind(),
            node.edges.len()
        ));
    }
    lines.push(String::new());
    lines.push(format!("Root edges: {}", graph.root_edges.len()));
    lines.join("\n")
}

pub fn format_plan_json(plan: &Plan, fingerprint: &str) -> String {
    let nodes: Vec<_> = plan
        .graph
        .nodes
        .iter()
        .map(|node| {
            let action = plan.canon.action(node.id);
            json!({
                "tag": node.id,
                "next": node.state,
                "kind": node.program.kind(),
                "action": action.map(|a| a.to_string()),
                "out_degree": node.edges.len(),
            })
        })
        .collect();
    let value = json!({
        "initial": plan.graph.initial,
        "states": plan.table.states().len(),
        "mono_states": plan.graph.nodes.len(),
        "root_edges": plan.graph.root_edges.len(),
        "fingerprint": fingerprint,
        "nodes": nodes,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

pub fn format_build_summary(summary: &BuildSummary) -> String {
    let mut out = format!(
        "Wrote {} mono-states, {} edges and {} root edges to {}\nFingerprint: {}",
        summary.nodes,
        summary.edges,
        summary.root_edges,
        summary.root.display(),
        summary.fingerprint
    );
    if summary.duplicate_edges > 0 {
        out.push_str(&format!(
            "\n{} duplicate edges were already satisfied",
            summary.duplicate_edges
        ));
    }
    out
}
