//! The `tutorbot dashboard` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorbot_core::report::AssessmentReport;
use tutorbot_providers::config::load_config_from;
use tutorbot_report::{render_dashboard, DashboardContext, Role};

pub fn execute(
    role: String,
    user: Option<String>,
    reports_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let role: Role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let dir = reports_dir.unwrap_or_else(|| config.reports_dir.clone());
    let reports = if dir.is_dir() {
        AssessmentReport::load_dir(&dir)?
    } else {
        tracing::info!("no reports directory at {}", dir.display());
        Vec::new()
    };

    let user = user.unwrap_or_else(|| match role {
        Role::Student => config.default_student_id.clone(),
        Role::Teacher => "Teacher".to_string(),
        Role::Admin => "Administrator".to_string(),
    });

    let ctx = DashboardContext {
        role,
        user,
        reports,
    };
    print!("{}", render_dashboard(&ctx));
    Ok(())
}
