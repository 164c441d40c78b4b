//! tutorbot-report — Results export and dashboards.

pub mod dashboard;
pub mod html;
pub mod text;

pub use dashboard::{render_dashboard, DashboardContext, DashboardStats, Role};
pub use html::{generate_html, write_html_report};
pub use text::{generate_text, write_text_report};

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
