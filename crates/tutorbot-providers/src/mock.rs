//! Mock learning-path source for testing without a backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tutorbot_core::traits::{LearningPath, LearningPathRequest, LearningPathSource, PathwayMatch};

use crate::error::ProviderError;

/// Serves canned learning paths keyed by student id.
pub struct MockLearningPathSource {
    paths: HashMap<String, LearningPath>,
    /// Serve a generated path for unknown students instead of 404.
    generate_missing: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<LearningPathRequest>>,
}

impl MockLearningPathSource {
    pub fn new(paths: HashMap<String, LearningPath>) -> Self {
        Self {
            paths,
            generate_missing: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that answers every request with a single pathway built from
    /// the request's personality code.
    pub fn generating() -> Self {
        Self {
            generate_missing: true,
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<LearningPathRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LearningPathSource for MockLearningPathSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &LearningPathRequest) -> anyhow::Result<LearningPath> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(path) = self.paths.get(&request.student_id) {
            return Ok(path.clone());
        }
        if !self.generate_missing {
            return Err(ProviderError::NotFound(request.student_id.clone()).into());
        }

        let pathway = match request.personality.chars().next() {
            Some('R') | Some('I') => "STEM",
            Some('A') => "Arts and Sports Science",
            _ => "Social Sciences",
        };
        Ok(LearningPath {
            student_id: request.student_id.clone(),
            personality: request.personality.clone(),
            recommended_pathway: Some(pathway.to_string()),
            pathways: vec![PathwayMatch {
                name: pathway.to_string(),
                match_score: 75.0,
                description: String::new(),
            }],
            ..Default::default()
        })
    }
}
