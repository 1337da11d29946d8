use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::PipelineError;

/// Pipeline stage, used in error and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Preprocess,
    Recognize,
    Detect,
    Translate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Preprocess => "preprocess",
            Stage::Recognize => "recognize",
            Stage::Detect => "detect",
            Stage::Translate => "translate",
        };
        f.write_str(name)
    }
}

/// Awaits `fut`, giving up with [`PipelineError::Timeout`] after `limit` when one is set.
pub(crate) async fn run_stage<T, F>(
    stage: Stage,
    limit: Option<Duration>,
    fut: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, PipelineError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| PipelineError::Timeout(stage))?,
        None => fut.await,
    }
}
