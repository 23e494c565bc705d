//! Rendering of decisions for the terminal.
use crate::color::paint;
use crate::policy::{Action, Decision};

pub const RULE_WIDTH: usize = 50;

/// Status lines for a decision, in display order.
pub fn status_lines(decision: &Decision, use_color: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Checking feature branch: {}", decision.branch_name),
        "-".repeat(RULE_WIDTH),
        format!("Branch: {}", decision.branch_name),
        format!("Can proceed: {}", decision.can_proceed),
        format!("Action: {}", action_label(decision.action, use_color)),
    ];
    if let Some(err) = &decision.error {
        lines.push(format!("Error: {}", paint(use_color, "\x1b[31;1m", err)));
    }
    if !decision.warnings.is_empty() {
        lines.push("Warnings:".to_string());
        for w in &decision.warnings {
            lines.push(format!("  - {}", paint(use_color, "\x1b[33m", w)));
        }
    }
    lines
}

fn action_label(action: Action, use_color: bool) -> String {
    let code = match action {
        Action::Blocked(_) => "\x1b[31;1m",
        Action::AlreadyOnBranch => "\x1b[32m",
        Action::Switch | Action::Create => "\x1b[34;1m",
    };
    paint(use_color, code, action.as_str())
}

/// Single-line JSON object for a decision.
pub fn to_json(decision: &Decision) -> serde_json::Result<String> {
    serde_json::to_string(decision)
}
