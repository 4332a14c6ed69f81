//! Background work launched by the session: one job per task kind, each run
//! under its own [`TaskScope`] and reported back as a [`Completion`].

use crate::error::TaskError;
use crate::retry::{RetryPolicy, TaskScope, run_with_retry};
use crate::source::{ReleaseRef, ReleaseSource, Repository};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Refresh,
    Download,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Refresh => write!(f, "refresh"),
            TaskKind::Download => write!(f, "download"),
        }
    }
}

/// Identity of a launched task. Completions are matched against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct RefreshJob {
    pub id: TaskId,
    pub repository: Repository,
    pub token: Option<String>,
    pub policy: RetryPolicy,
    pub scope: TaskScope,
}

impl RefreshJob {
    #[tracing::instrument(skip_all, fields(task = %self.id, repository = %self.repository))]
    pub async fn run<S: ReleaseSource>(self, source: &S) -> Completion {
        let result = run_with_retry(&self.scope, self.policy, || {
            source.list_tags(&self.repository, self.token.as_deref())
        })
        .await;

        match &result {
            Ok(tags) => tracing::info!("Fetched {} tags", tags.len()),
            Err(err) => tracing::warn!("Refresh ended: {err}"),
        }
        Completion::Refresh {
            id: self.id,
            result,
        }
    }
}

#[derive(Debug)]
pub struct DownloadJob {
    pub id: TaskId,
    pub release: ReleaseRef,
    pub asset: String,
    pub destination: PathBuf,
    pub token: Option<String>,
    pub policy: RetryPolicy,
    pub scope: TaskScope,
}

impl DownloadJob {
    #[tracing::instrument(skip_all, fields(task = %self.id, tag = %self.release.tag))]
    pub async fn run<S: ReleaseSource>(self, source: &S) -> Completion {
        let result = run_with_retry(&self.scope, self.policy, || {
            source.download_asset(
                &self.release,
                &self.asset,
                &self.destination,
                self.token.as_deref(),
            )
        })
        .await;

        let result = match result {
            Ok(()) => {
                tracing::info!("Saved {} to {}", self.asset, self.destination.display());
                Ok(self.destination)
            }
            Err(err) => {
                tracing::warn!("Download ended: {err}");
                Err(err)
            }
        };
        Completion::Download {
            id: self.id,
            result,
        }
    }
}

#[derive(Debug)]
pub enum Job {
    Refresh(RefreshJob),
    Download(DownloadJob),
}

impl Job {
    pub fn id(&self) -> TaskId {
        match self {
            Job::Refresh(job) => job.id,
            Job::Download(job) => job.id,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Job::Refresh(_) => TaskKind::Refresh,
            Job::Download(_) => TaskKind::Download,
        }
    }

    pub async fn run<S: ReleaseSource>(self, source: &S) -> Completion {
        match self {
            Job::Refresh(job) => job.run(source).await,
            Job::Download(job) => job.run(source).await,
        }
    }
}

/// Outcome of a job, sent back to the session.
#[derive(Debug)]
pub enum Completion {
    Refresh {
        id: TaskId,
        result: Result<Vec<String>, TaskError>,
    },
    Download {
        id: TaskId,
        result: Result<PathBuf, TaskError>,
    },
}

impl Completion {
    pub fn id(&self) -> TaskId {
        match self {
            Completion::Refresh { id, .. } | Completion::Download { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Completion::Refresh { .. } => TaskKind::Refresh,
            Completion::Download { .. } => TaskKind::Download,
        }
    }
}

/// Spawns jobs onto the runtime and forwards their completions to the event loop.
pub struct TaskExecutor<S> {
    source: Arc<S>,
    completions: UnboundedSender<Completion>,
}

impl<S> TaskExecutor<S>
where
    S: ReleaseSource + Send + Sync + 'static,
{
    pub fn new(source: Arc<S>, completions: UnboundedSender<Completion>) -> Self {
        Self {
            source,
            completions,
        }
    }

    pub fn launch(&self, job: Job) -> JoinHandle<()> {
        tracing::debug!("Launching {} task {}", job.kind(), job.id());
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = job.run(source.as_ref()).await;
            if completions.send(completion).is_err() {
                tracing::debug!("Event loop closed before the task completed");
            }
        })
    }
}
