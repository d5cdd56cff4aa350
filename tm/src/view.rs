//! Terminal rendering of the task list

use colored::Colorize;
use todostore::{AppState, Filter, Task, selectors};

use crate::config::DisplayConfig;

/// "item" or "items" for a count
pub fn item_word(count: usize) -> &'static str {
    if count == 1 { "item" } else { "items" }
}

/// Render the header, the visible tasks and the footer
///
/// With no tasks at all only the header and a hint are shown.
pub fn render(state: &AppState, visible: &[Task], filter: Filter, display: &DisplayConfig) -> String {
    let mut lines = vec![header(state)];

    if state.is_empty() {
        lines.push(format!("  {}", "Nothing to do. Add a task with: tm add <text>".dimmed()));
        return lines.join("\n");
    }

    if visible.is_empty() {
        lines.push(format!("  {}", format!("(no {} tasks)", filter).dimmed()));
    }
    for task in visible {
        lines.push(task_line(task, display));
    }

    lines.push(footer(state, filter));
    lines.join("\n")
}

fn header(state: &AppState) -> String {
    let title = "todos".bright_red().bold().to_string();
    if selectors::all_completed(state) {
        format!("{}  {}", title, "✔ all completed".green())
    } else {
        title
    }
}

fn task_line(task: &Task, display: &DisplayConfig) -> String {
    let check = if task.completed {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let title = if task.completed {
        task.title.dimmed().strikethrough().to_string()
    } else {
        task.title.clone()
    };

    if display.show_ids {
        format!("  {} {}  {}", check, task.id.short().cyan(), title)
    } else {
        format!("  {} {}", check, title)
    }
}

/// Count of active tasks, filter links and the clear-completed action
pub fn footer(state: &AppState, filter: Filter) -> String {
    let active = selectors::active_count(state);
    let completed = selectors::completed_count(state);

    let count = format!("{} {} left", active.to_string().bold(), item_word(active));

    let links: Vec<String> = Filter::ALL
        .iter()
        .map(|f| {
            if *f == filter {
                format!("[{}]", f.label()).bold().to_string()
            } else {
                f.label().dimmed().to_string()
            }
        })
        .collect();

    let mut parts = vec![count, links.join(" ")];
    if completed > 0 {
        parts.push(format!("Clear completed ({})", completed).yellow().to_string());
    }
    parts.join("  ·  ")
}
