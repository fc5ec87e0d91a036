//! Storage: the `JdStore` and `EvaluationStore` abstractions injected into `AppState`.
//!
//! The relevance engine never touches storage; handlers put a JD (with its
//! already-extracted skills), fetch it back by id, and record each evaluation.

pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::evaluation::{Evaluation, NewEvaluation};
use crate::models::job_description::{JobDescription, NewJobDescription};

pub use memory::{InMemoryEvaluationStore, InMemoryJdStore};
pub use postgres::{PgEvaluationStore, PgJdStore};

/// Carried in `AppState` as `Arc<dyn JdStore>`.
#[async_trait]
pub trait JdStore: Send + Sync {
    /// Stores a JD under a freshly generated id.
    async fn put(&self, jd: NewJobDescription) -> Result<JobDescription>;

    /// Returns `None` when no JD exists for `id`.
    async fn get(&self, id: Uuid) -> Result<Option<JobDescription>>;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Evaluation history. Carried in `AppState` as `Arc<dyn EvaluationStore>`.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    async fn put(&self, evaluation: NewEvaluation) -> Result<Evaluation>;

    async fn get(&self, id: Uuid) -> Result<Option<Evaluation>>;

    /// Evaluations recorded against one JD, newest first.
    async fn list_for_jd(&self, jd_id: Uuid) -> Result<Vec<Evaluation>>;
}
