//! The `tutorbot init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("tutorbot.toml").exists() {
        println!("tutorbot.toml already exists, skipping.");
    } else {
        std::fs::write("tutorbot.toml", SAMPLE_CONFIG)?;
        println!("Created tutorbot.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point learning_path.base_url in tutorbot.toml at your backend");
    println!("  2. Run: tutorbot validate --bank question-banks/example.toml");
    println!("  3. Run: tutorbot assess --bank question-banks/example.toml --student <id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tutorbot configuration

default_student_id = "student"
parallelism = 4
reports_dir = "./tutorbot-reports"

[learning_path]
base_url = "${TUTORBOT_BACKEND_URL}"
timeout_secs = 30

[tutor]
thinking_delay_ms = 1500
fallback_responses = [
    "Good question! Which learning area is it from?",
    "Let's work through it step by step. What do you already know?",
]

[[tutor.rules]]
keyword = "pathway"
response = "Senior school has three pathways: STEM, Social Sciences, and Arts and Sports Science."

[assessment]
max_questions = 60
min_questions = 0
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Assessment"
description = "A short starter bank"
grade = "Grade 7"
max_questions = 10
min_questions = 3

[[questions]]
id = "math-1"
text = "I can work out percentages of amounts."
category = "mathematics"
source = "curriculum"
difficulty = "easy"

[[questions]]
id = "math-2"
text = "I can solve problems involving ratios."
category = "mathematics"
source = "curriculum"
difficulty = "hard"
adaptive_level = 2

[[questions]]
id = "int-investigative"
text = "I enjoy finding out why things happen."
category = "investigative"
source = "interest"

[[questions]]
id = "int-social"
text = "I like helping other people learn."
category = "social"
source = "interest"

[[questions]]
id = "cc-communication"
text = "I can share my ideas clearly in a group."
category = "communication"
source = "psychometric"
competency_focus = ["communication and collaboration"]
core_competency = true
"#;
