use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::evaluation::{Evaluation, NewEvaluation};
use crate::models::job_description::{JobDescription, NewJobDescription};
use crate::storage::{EvaluationStore, JdStore};

/// Volatile, process-local JD store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryJdStore {
    jds: RwLock<HashMap<Uuid, JobDescription>>,
}

impl InMemoryJdStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JdStore for InMemoryJdStore {
    async fn put(&self, jd: NewJobDescription) -> Result<JobDescription> {
        let record = JobDescription {
            id: Uuid::new_v4(),
            title: jd.title,
            raw_text: jd.raw_text,
            skills: jd.skills,
            created_at: Utc::now(),
        };

        self.jds.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobDescription>> {
        Ok(self.jds.read().await.get(&id).cloned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Volatile evaluation history, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryEvaluationStore {
    evaluations: RwLock<Vec<Evaluation>>,
}

impl InMemoryEvaluationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn put(&self, evaluation: NewEvaluation) -> Result<Evaluation> {
        let record = Evaluation {
            id: Uuid::new_v4(),
            jd_id: evaluation.jd_id,
            resume_filename: evaluation.resume_filename,
            score: evaluation.score,
            verdict: evaluation.verdict,
            matched_skills: evaluation.matched_skills,
            missing_skills: evaluation.missing_skills,
            created_at: Utc::now(),
        };

        self.evaluations.write().await.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Evaluation>> {
        Ok(self
            .evaluations
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn list_for_jd(&self, jd_id: Uuid) -> Result<Vec<Evaluation>> {
        Ok(self
            .evaluations
            .read()
            .await
            .iter()
            .rev()
            .filter(|e| e.jd_id == jd_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relevance::skills::SkillSet;
    use crate::relevance::verdict::Verdict;

    fn new_jd(title: &str, text: &str, skills: &[&str]) -> NewJobDescription {
        NewJobDescription {
            title: title.to_string(),
            raw_text: text.to_string(),
            skills: skills.iter().copied().collect::<SkillSet>(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get_returns_same_record() {
        let store = InMemoryJdStore::new();
        let stored = store
            .put(new_jd("Backend", "Skills: Rust", &["rust"]))
            .await
            .unwrap();

        let fetched = store.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Backend");
        assert_eq!(fetched.raw_text, "Skills: Rust");
        assert!(fetched.skills.contains("rust"));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryJdStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_each_put_gets_a_distinct_id() {
        let store = InMemoryJdStore::new();
        let a = store.put(new_jd("A", "x", &[])).await.unwrap();
        let b = store.put(new_jd("A", "x", &[])).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    fn new_evaluation(jd_id: Uuid, score: u8) -> NewEvaluation {
        NewEvaluation {
            jd_id,
            resume_filename: None,
            score,
            verdict: Verdict::Bad,
            matched_skills: SkillSet::new(),
            missing_skills: ["sql"].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_evaluation_put_then_get() {
        let store = InMemoryEvaluationStore::new();
        let jd_id = Uuid::new_v4();
        let stored = store.put(new_evaluation(jd_id, 33)).await.unwrap();

        let fetched = EvaluationStore::get(&store, stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.jd_id, jd_id);
        assert_eq!(fetched.score, 33);
        assert!(fetched.missing_skills.contains("sql"));
        assert!(EvaluationStore::get(&store, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_for_jd_is_newest_first_and_filtered() {
        let store = InMemoryEvaluationStore::new();
        let jd_id = Uuid::new_v4();
        store.put(new_evaluation(jd_id, 10)).await.unwrap();
        store.put(new_evaluation(Uuid::new_v4(), 50)).await.unwrap();
        store.put(new_evaluation(jd_id, 90)).await.unwrap();

        let history = store.list_for_jd(jd_id).await.unwrap();
        let scores: Vec<u8> = history.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 10]);
    }
}
