//! Rule-table chat tutor.
//!
//! Replies are canned: the first rule whose keyword occurs in the lower-cased
//! message wins, otherwise a random fallback is picked. No language model is
//! involved; the delay only simulates "thinking" in the chat UI.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use tutorbot_core::traits::{Tutor, TutorReply};

/// Reply used when no rule matches and there are no fallbacks.
pub const DEFAULT_REPLY: &str =
    "I'm not sure about that yet. Try asking about a CBC learning area or pathway.";

/// One keyword-to-reply mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRule {
    pub keyword: String,
    pub response: String,
}

impl TutorRule {
    pub fn new(keyword: &str, response: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            response: response.to_string(),
        }
    }
}

pub struct RuleTableTutor {
    rules: Vec<TutorRule>,
    fallbacks: Vec<String>,
    delay: Duration,
}

impl RuleTableTutor {
    pub fn new(rules: Vec<TutorRule>, fallbacks: Vec<String>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| TutorRule {
                keyword: r.keyword.to_lowercase(),
                response: r.response,
            })
            .collect();
        Self {
            rules,
            fallbacks,
            delay: Duration::ZERO,
        }
    }

    /// The built-in CBC rule table.
    pub fn cbc_default() -> Self {
        let rules = vec![
            TutorRule::new(
                "cbc",
                "The Competency-Based Curriculum focuses on what learners can do, \
                 building skills and values alongside knowledge.",
            ),
            TutorRule::new(
                "pathway",
                "Senior school offers three pathways: STEM, Social Sciences, and \
                 Arts and Sports Science. Your assessment results suggest which fits you best.",
            ),
            TutorRule::new(
                "career",
                "Take the career assessment to get your Holland code. It links your \
                 interests to suggested pathways and careers.",
            ),
            TutorRule::new(
                "photosynthesis",
                "Photosynthesis is how green plants make food from carbon dioxide and \
                 water using sunlight, releasing oxygen.",
            ),
            TutorRule::new(
                "fraction",
                "A fraction shows part of a whole. The top number is the numerator and \
                 the bottom number is the denominator.",
            ),
            TutorRule::new(
                "acid",
                "pH measures how acidic or basic a solution is, from 0 to 14. Seven is \
                 neutral. Try the pH virtual lab!",
            ),
            TutorRule::new(
                "atom",
                "An atom has protons and neutrons in the nucleus with electrons in \
                 shells around it. Build one in the atom builder lab.",
            ),
            TutorRule::new(
                "bond",
                "Atoms bond by sharing or transferring electrons. A large \
                 electronegativity difference gives an ionic bond.",
            ),
            TutorRule::new(
                "hello",
                "Hello! I'm your CBC tutor. Ask me about any learning area.",
            ),
        ];
        let fallbacks = vec![
            "That's a great question! Let's explore it together. Can you tell me which \
             learning area it belongs to?"
                .to_string(),
            "Interesting! Try breaking the problem into smaller steps. What do you \
             already know about it?"
                .to_string(),
            "Keep asking questions, that's how competencies grow. Could you rephrase \
             that with a keyword like 'pathway' or 'career'?"
                .to_string(),
        ];
        Self::new(rules, fallbacks)
    }

    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    /// First rule whose keyword occurs in `message`, case-insensitively.
    pub fn match_rule(&self, message: &str) -> Option<&TutorRule> {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| !rule.keyword.is_empty() && lowered.contains(&rule.keyword))
    }
}

#[async_trait]
impl Tutor for RuleTableTutor {
    fn name(&self) -> &str {
        "rule-table"
    }

    #[instrument(skip(self, message), fields(len = message.len()))]
    async fn respond(&self, message: &str) -> anyhow::Result<TutorReply> {
        let start = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (content, matched_keyword) = match self.match_rule(message) {
            Some(rule) => (rule.response.clone(), Some(rule.keyword.clone())),
            None => {
                let content = self
                    .fallbacks
                    .choose(&mut rand::rng())
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_REPLY.to_string());
                (content, None)
            }
        };
        debug!(matched = ?matched_keyword, "tutor reply");

        Ok(TutorReply {
            content,
            matched_keyword,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
