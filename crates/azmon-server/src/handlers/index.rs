//! Process list page.

use axum::extract::State;
use axum::response::Html;

use azmon_core::ProcessEntry;

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

/// Refreshes the monitor, then renders its process list.
///
/// `GET /` and `GET /index`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let monitor = state.monitor.clone();
    let processes = tokio::task::spawn_blocking(move || {
        monitor.refresh()?;
        Ok::<_, ApiError>(monitor.list_processes())
    })
    .await
    .map_err(|e| ApiError::InternalError(e.to_string()))??;

    Ok(Html(render_index(&processes)))
}

pub fn render_index(processes: &[ProcessEntry]) -> String {
    let rows: String = processes.iter().map(render_row).collect();
    INDEX_TEMPLATE
        .replace("__PROCESS_COUNT__", &processes.len().to_string())
        .replace("__PROCESS_ROWS__", &rows)
}

fn render_row(process: &ProcessEntry) -> String {
    let optional = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        process.id,
        escape_html(&process.name),
        escape_html(&process.host),
        process.cmd_port,
        optional(process.web_port.map(u32::from)),
        optional(process.pid),
        if process.running { "running" } else { "stopped" },
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_names() {
        assert_eq!(escape_html("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn renders_one_row_per_process() {
        let mut running = ProcessEntry::new("vatt4k", "localhost", 2402).with_web_port(2403);
        running.running = true;
        running.pid = Some(4242);
        let html = render_index(&[running, ProcessEntry::new("<x>", "lab", 2412)]);

        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>vatt4k</td><td>localhost</td><td>2402</td><td>2403</td><td>4242</td><td>running</td>"));
        assert!(html.contains("<td>&lt;x&gt;</td>"));
        assert!(!html.contains("__PROCESS_ROWS__"));
    }
}
