//! Plain-text views of a [`SessionState`].

use std::fmt::Write as _;

use crate::state::SessionState;

/// Shown instead of a table when there is no history.
pub const EMPTY_HISTORY: &str = "No conversations yet.";

const PROMPT_WIDTH: usize = 48;

fn truncate(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= width && !text.contains('\n') {
        return line.to_string();
    }
    let mut out: String = line.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Loading indicator, error banner and answer box, in that order.
pub fn render_status(state: &SessionState) -> String {
    let mut out = String::new();
    if state.is_loading() {
        out.push_str("Thinking...\n");
    }
    if let Some(error) = state.error_message() {
        let _ = writeln!(out, "{}", error);
    }
    if let Some(answer) = state.pending_answer() {
        let _ = writeln!(out, "{}", answer);
    }
    out
}

/// History table with the expanded row's response shown beneath it.
pub fn render_history(state: &SessionState) -> String {
    let mut out = String::new();
    if let Some(notice) = state.history_notice() {
        let _ = writeln!(out, "{}", notice);
    }

    let history = state.history();
    if history.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_HISTORY);
        return out;
    }

    let id_width = history
        .iter()
        .map(|e| e.id.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    let _ = writeln!(out, "{:>id_width$}  Prompt", "ID");
    for exchange in history {
        let expanded = state.expanded_exchange_id() == Some(&exchange.id);
        let marker = if expanded { "[-]" } else { "[+]" };
        let _ = writeln!(
            out,
            "{:>id_width$}  {:<PROMPT_WIDTH$}  {}",
            exchange.id.to_string(),
            truncate(&exchange.prompt, PROMPT_WIDTH),
            marker
        );
        if expanded {
            for line in exchange.response.lines() {
                let _ = writeln!(out, "{:>id_width$}    {}", "", line);
            }
        }
    }
    out
}
