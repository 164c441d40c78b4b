//! Role dashboards rendered from an explicit context.
//!
//! Nothing here reads ambient session state: the caller says who is looking
//! (`role`, `user`) and hands over the reports they may see.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tutorbot_core::report::AssessmentReport;

/// Threshold used when comparing a student's last two reports.
const PROGRESS_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Everything a dashboard needs to render.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub role: Role,
    /// Display name, or the student id for the student role.
    pub user: String,
    pub reports: Vec<AssessmentReport>,
}

/// Aggregate figures over a set of reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_reports: usize,
    pub students: usize,
    pub completed: usize,
    pub average_core_score: f64,
    /// Students per suggested pathway, from each student's latest report.
    pub pathway_counts: BTreeMap<String, usize>,
    /// How many latest reports list each category as a weakness.
    pub weakness_counts: BTreeMap<String, usize>,
}

impl DashboardStats {
    pub fn from_reports(reports: &[AssessmentReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }

        let latest = latest_per_student(reports);
        let mut pathway_counts = BTreeMap::new();
        let mut weakness_counts = BTreeMap::new();
        for report in latest.values() {
            if let Some(top) = report.interests.ranked().first() {
                *pathway_counts
                    .entry(top.suggested_pathway().to_string())
                    .or_insert(0) += 1;
            }
            for weakness in &report.profile.weaknesses {
                *weakness_counts.entry(weakness.clone()).or_insert(0) += 1;
            }
        }

        let total_core: f64 = reports.iter().map(|r| r.core_competency_score).sum();
        Self {
            total_reports: reports.len(),
            students: latest.len(),
            completed: reports.iter().filter(|r| r.completed).count(),
            average_core_score: (total_core / reports.len() as f64 * 10.0).round() / 10.0,
            pathway_counts,
            weakness_counts,
        }
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_reports == 0 {
            0.0
        } else {
            self.completed as f64 / self.total_reports as f64
        }
    }
}

/// Most recent report per student id; anonymous reports share one key.
fn latest_per_student(reports: &[AssessmentReport]) -> BTreeMap<&str, &AssessmentReport> {
    let mut latest: BTreeMap<&str, &AssessmentReport> = BTreeMap::new();
    for report in reports {
        let key = report.student_id.as_deref().unwrap_or("anonymous");
        match latest.get(key) {
            Some(existing) if existing.created_at >= report.created_at => {}
            _ => {
                latest.insert(key, report);
            }
        }
    }
    latest
}

/// Render the dashboard for the context's role as plain text.
pub fn render_dashboard(ctx: &DashboardContext) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} dashboard: {}\n", title_case(ctx.role), ctx.user));
    out.push_str(&format!("{}\n", "-".repeat(40)));

    match ctx.role {
        Role::Admin => render_admin(&mut out, &ctx.reports),
        Role::Teacher => render_teacher(&mut out, &ctx.reports),
        Role::Student => render_student(&mut out, &ctx.user, &ctx.reports),
    }
    out
}

fn title_case(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Teacher => "Teacher",
        Role::Student => "Student",
    }
}

fn render_admin(out: &mut String, reports: &[AssessmentReport]) {
    let stats = DashboardStats::from_reports(reports);
    out.push_str(&format!("Students assessed:     {}\n", stats.students));
    out.push_str(&format!("Assessments recorded:  {}\n", stats.total_reports));
    out.push_str(&format!(
        "Completion rate:       {:.0}%\n",
        stats.completion_rate() * 100.0
    ));
    out.push_str(&format!("Average core score:    {:.1} / 10\n", stats.average_core_score));

    let mut banks: BTreeMap<&str, usize> = BTreeMap::new();
    for report in reports {
        *banks.entry(report.bank.name.as_str()).or_insert(0) += 1;
    }
    if !banks.is_empty() {
        out.push_str("\nAssessments by question bank:\n");
        for (bank, count) in banks {
            out.push_str(&format!("  {bank:<32} {count}\n"));
        }
    }
    render_pathways(out, &stats);
}

fn render_teacher(out: &mut String, reports: &[AssessmentReport]) {
    let stats = DashboardStats::from_reports(reports);
    let latest = latest_per_student(reports);
    out.push_str(&format!("Learners: {}\n", stats.students));
    out.push_str(&format!(
        "Class average core score: {:.1} / 10\n",
        stats.average_core_score
    ));

    if !latest.is_empty() {
        out.push_str("\nLatest results:\n");
        for (student, report) in &latest {
            let code = if report.holland_code.is_empty() {
                "-"
            } else {
                report.holland_code.as_str()
            };
            out.push_str(&format!(
                "  {student:<16} core {:>4.1}  code {code:<3}  {}\n",
                report.core_competency_score,
                if report.completed { "complete" } else { "in progress" }
            ));
        }
    }

    if !stats.weakness_counts.is_empty() {
        let mut needs: Vec<(&String, &usize)> = stats.weakness_counts.iter().collect();
        needs.sort_by(|a, b| b.1.cmp(a.1));
        out.push_str("\nAreas needing support:\n");
        for (category, count) in needs {
            out.push_str(&format!("  {category:<24} {count} learner(s)\n"));
        }
    }
    render_pathways(out, &stats);
}

fn render_student(out: &mut String, user: &str, reports: &[AssessmentReport]) {
    let mut mine: Vec<&AssessmentReport> = reports
        .iter()
        .filter(|r| r.student_id.as_deref() == Some(user))
        .collect();
    mine.sort_by_key(|r| r.created_at);

    let Some(latest) = mine.last() else {
        out.push_str("No assessments yet. Run `tutorbot assess` to get started.\n");
        return;
    };

    out.push_str(&format!("Assessments taken:     {}\n", mine.len()));
    out.push_str(&format!(
        "Core competency score: {:.1} / 10\n",
        latest.core_competency_score
    ));
    if !latest.holland_code.is_empty() {
        out.push_str(&format!("Holland code:          {}\n", latest.holland_code));
    }
    if let Some(top) = latest.interests.ranked().first() {
        out.push_str(&format!("Suggested pathway:     {}\n", top.suggested_pathway()));
    }
    if !latest.profile.strengths.is_empty() {
        out.push_str(&format!(
            "Strengths:             {}\n",
            latest.profile.strengths.join(", ")
        ));
    }
    if !latest.profile.weaknesses.is_empty() {
        out.push_str(&format!(
            "Keep practising:       {}\n",
            latest.profile.weaknesses.join(", ")
        ));
    }

    if mine.len() >= 2 {
        let previous = mine[mine.len() - 2];
        let progress = latest.compare(previous, PROGRESS_THRESHOLD);
        out.push_str(&format!(
            "\nSince last time: core score {:+.1}, {} improved, {} declined\n",
            progress.core_score_delta,
            progress.improvements.len(),
            progress.declines.len()
        ));
    }
}

fn render_pathways(out: &mut String, stats: &DashboardStats) {
    if stats.pathway_counts.is_empty() {
        return;
    }
    out.push_str("\nSuggested pathways:\n");
    for (pathway, count) in &stats.pathway_counts {
        out.push_str(&format!("  {pathway:<32} {count}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn reports() -> Vec<AssessmentReport> {
        vec![
            fixtures::report("amina", &[5, 4, 1, 5, 3, 2, 4]),
            fixtures::report("brian", &[2, 2, 4, 1, 5, 3, 2]),
            fixtures::report("chebet", &[3]),
        ]
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("Teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!("parent".parse::<Role>().is_err());
    }

    #[test]
    fn stats_from_reports() {
        let stats = DashboardStats::from_reports(&reports());
        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.students, 3);
        assert_eq!(stats.completed, 2);
        // amina 8.0, brian 4.0, chebet 0.0
        assert_eq!(stats.average_core_score, 4.0);
        assert_eq!(stats.pathway_counts.get("STEM"), Some(&1));
        assert_eq!(stats.pathway_counts.get("Arts and Sports Science"), Some(&1));
        assert_eq!(stats.weakness_counts.get("mathematics"), Some(&1));
    }

    #[test]
    fn empty_stats() {
        let stats = DashboardStats::from_reports(&[]);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.completion_rate(), 0.0);
    }

    #[test]
    fn admin_dashboard() {
        let ctx = DashboardContext {
            role: Role::Admin,
            user: "Head Teacher".into(),
            reports: reports(),
        };
        let out = render_dashboard(&ctx);
        assert!(out.starts_with("Admin dashboard: Head Teacher\n"));
        assert!(out.contains("Completion rate:       67%"));
        assert!(out.contains("Career <Assessment>"));
    }

    #[test]
    fn teacher_dashboard_lists_learners() {
        let ctx = DashboardContext {
            role: Role::Teacher,
            user: "Mr. Otieno".into(),
            reports: reports(),
        };
        let out = render_dashboard(&ctx);
        assert!(out.contains("Learners: 3"));
        assert!(out.contains("  amina "));
        assert!(out.contains("in progress"));
        assert!(out.contains("Areas needing support:"));
    }

    #[test]
    fn student_sees_only_own_reports() {
        let mut all = reports();
        let mut later = fixtures::report("amina", &[5, 5, 3, 5, 3, 2, 5]);
        later.created_at = all[0].created_at + chrono::Duration::seconds(60);
        all.push(later);

        let ctx = DashboardContext {
            role: Role::Student,
            user: "amina".into(),
            reports: all,
        };
        let out = render_dashboard(&ctx);
        assert!(out.contains("Assessments taken:     2"));
        assert!(out.contains("Core competency score: 10.0 / 10"));
        assert!(out.contains("Since last time: core score +2.0, 3 improved, 0 declined"));
    }

    #[test]
    fn student_without_reports() {
        let ctx = DashboardContext {
            role: Role::Student,
            user: "nobody".into(),
            reports: reports(),
        };
        assert!(render_dashboard(&ctx).contains("No assessments yet"));
    }
}
