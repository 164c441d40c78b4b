//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use tutorbot_core::model::{Answers, Score};
use tutorbot_core::parser;
use tutorbot_core::report::AssessmentReport;

const CAREER_BANK: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../question-banks/career-assessment.toml"
);

fn tutorbot() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("tutorbot").unwrap()
}

/// A command isolated from any tutorbot.toml in the working or home directory.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = tutorbot();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("TUTORBOT_API_URL");
    cmd
}

fn save_report(dir: &Path, file: &str, student: &str, scores: &[(&str, i64)]) -> PathBuf {
    let bank = parser::parse_question_bank(Path::new(CAREER_BANK)).unwrap();
    let mut answers = Answers::new();
    for (id, raw) in scores {
        answers.record(*id, Score::new(*raw).unwrap());
    }
    let report = AssessmentReport::from_answers(
        &bank,
        &answers,
        Some(student.to_string()),
        false,
        bank.questions.len(),
    );
    let path = dir.join(file);
    report.save_json(&path).unwrap();
    path
}

fn files_with_extension(dir: &Path, ext: &str) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == ext))
        .count()
}

#[test]
fn validate_career_bank() {
    tutorbot()
        .arg("validate")
        .arg("--bank")
        .arg("../../question-banks/career-assessment.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("24 questions, 4 core competency"))
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn validate_directory() {
    tutorbot()
        .arg("validate")
        .arg("--bank")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade 9 Career Assessment"));
}

#[test]
fn validate_nonexistent_file() {
    tutorbot()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tutorbot.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("tutorbot.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());

    isolated(&dir)
        .arg("validate")
        .arg("--bank")
        .arg("question-banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn assess_full_run_saves_and_exports() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");

    isolated(&dir)
        .args(["assess", "--bank", CAREER_BANK, "--student", "amina", "--export", "all"])
        .arg("--output")
        .arg(&out)
        .write_stdin("3\n".repeat(24))
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessment complete."))
        .stdout(predicate::str::contains("Core competency score: 6.0 / 10"))
        .stdout(predicate::str::contains("Holland code: RIA"))
        .stdout(predicate::str::contains("Suggested pathway: STEM"))
        .stdout(predicate::str::contains("Report saved to"));

    assert_eq!(files_with_extension(&out, "json"), 1);
    assert_eq!(files_with_extension(&out, "txt"), 1);
    assert_eq!(files_with_extension(&out, "html"), 1);

    let reports = AssessmentReport::load_dir(&out).unwrap();
    assert_eq!(reports[0].student_id.as_deref(), Some("amina"));
    assert!(reports[0].completed);
}

#[test]
fn assess_rejects_bad_scores_and_quits() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["assess", "--bank", CAREER_BANK])
        .arg("--output")
        .arg(dir.path())
        .write_stdin("9\nmaybe\nb\n5\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("Enter a score from 1 to 5"))
        .stdout(predicate::str::contains("Already at the first question."))
        .stdout(predicate::str::contains("Assessment incomplete: answered 1 of"));
}

#[test]
fn assess_reads_answers_file() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.txt");
    std::fs::write(&answers, "4\n4\n").unwrap();

    isolated(&dir)
        .args(["assess", "--bank", CAREER_BANK, "--student", "brian"])
        .arg("--answers")
        .arg(&answers)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("answered 2 of"));
}

#[test]
fn assess_unknown_export_format() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["assess", "--bank", CAREER_BANK, "--export", "pdf"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();
    let baseline = save_report(
        dir.path(),
        "baseline.json",
        "amina",
        &[("math-fractions", 2), ("int-i-experiments", 3)],
    );
    let current = save_report(
        dir.path(),
        "current.json",
        "amina",
        &[("math-fractions", 4), ("int-i-experiments", 3)],
    );

    tutorbot()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparison: 1 improvements, 0 declines, 1 unchanged",
        ))
        .stdout(predicate::str::contains("mathematics 2.00 -> 4.00"));

    // Swapped, the same change is a decline.
    tutorbot()
        .arg("compare")
        .arg("--baseline")
        .arg(&current)
        .arg("--current")
        .arg(&baseline)
        .arg("--fail-on-decline")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    tutorbot()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn ph_lab_correct_prediction() {
    tutorbot()
        .args(["lab", "ph", "--substance", "Lemon juice", "--predict", "strongly acidic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! It is Strongly Acidic."))
        .stdout(predicate::str::contains("Lab complete."));
}

#[test]
fn ph_lab_lists_substances() {
    tutorbot()
        .args(["lab", "ph"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substances on the bench:"));
}

#[test]
fn ph_lab_without_indicator_stops() {
    tutorbot()
        .args(["lab", "ph", "--substance", "Lemon juice", "--no-indicator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped at step 2"));
}

#[test]
fn bonding_lab_wrong_prediction() {
    tutorbot()
        .args(["lab", "bond", "--first", "Na", "--second", "Cl", "--predict", "polar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not quite, the bond is ionic."));
}

#[test]
fn bonding_lab_unknown_element() {
    tutorbot()
        .args(["lab", "bond", "--first", "Xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn atom_lab_builds_sodium() {
    tutorbot()
        .args(["lab", "atom", "--protons", "11", "--neutrons", "12", "--electrons", "2,8,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Well done! You built a neutral Sodium atom (2.8.1).",
        ))
        .stdout(predicate::str::contains("Lab complete."));
}

#[test]
fn atom_lab_wrong_protons() {
    tutorbot()
        .args(["lab", "atom", "--protons", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped at step 1"));
}

#[test]
fn experiment_lab_writes_worksheet() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("worksheet.txt");

    tutorbot()
        .args([
            "lab",
            "experiment",
            "--title",
            "Does salt help ice melt?",
            "--hypothesis",
            "Salted ice melts faster",
            "--material",
            "ice cubes",
            "--material",
            "salt",
            "--step",
            "Put ice in two cups",
            "--step",
            "Add salt to one cup",
        ])
        .arg("--output")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab complete."));

    let text = std::fs::read_to_string(&sheet).unwrap();
    assert!(text.contains("EXPERIMENT: Does salt help ice melt?"));
    assert!(text.contains("  2. Add salt to one cup"));
}

#[test]
fn experiment_lab_needs_procedure() {
    tutorbot()
        .args([
            "lab",
            "experiment",
            "--title",
            "Shadows",
            "--hypothesis",
            "Shadows shrink at noon",
            "--material",
            "stick",
            "--step",
            "Measure the shadow",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Add 1 more procedure step(s)."))
        .stdout(predicate::str::contains("Stopped at step 4"));
}

#[test]
fn chat_single_message() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["chat", "--message", "What is photosynthesis?", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tutor: Photosynthesis is"));
}

#[test]
fn chat_stdin_until_exit() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["chat", "--delay-ms", "0"])
        .write_stdin("tell me about fractions\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tutor:"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn curriculum_grade() {
    tutorbot()
        .args(["curriculum", "--grade", "Grade 7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Junior School"))
        .stdout(predicate::str::contains("Integrated Science"));
}

#[test]
fn curriculum_pathways() {
    tutorbot()
        .args(["curriculum", "--pathways"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STEM"));
}

#[test]
fn curriculum_unknown_grade() {
    tutorbot()
        .args(["curriculum", "--grade", "Form 4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grade"));
}

#[test]
fn teacher_dashboard() {
    let dir = TempDir::new().unwrap();
    save_report(dir.path(), "a.json", "amina", &[("math-fractions", 5)]);
    save_report(dir.path(), "b.json", "brian", &[("math-fractions", 1)]);

    isolated(&dir)
        .args(["dashboard", "--role", "teacher"])
        .arg("--reports")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Learners: 2"))
        .stdout(predicate::str::contains("Areas needing support:"));
}

#[test]
fn student_dashboard_without_reports() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["dashboard", "--user", "amina"])
        .arg("--reports")
        .arg(dir.path().join("missing"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No assessments yet"));
}

#[test]
fn dashboard_unknown_role() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["dashboard", "--role", "parent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn learning_path_unreachable_service() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .env("TUTORBOT_API_URL", "http://127.0.0.1:9")
        .args(["learning-path", "--students", "amina,brian", "--personality", "IAS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "We could not reach the learning path service",
        ));
}

#[test]
fn learning_path_requires_personality() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["learning-path", "--students", "amina"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("personality code is required"));
}
