//! Interactive session state and the event dispatcher that drives it.
//!
//! [`Session::update`] folds one [`Event`] at a time into the state and
//! returns the [`Command`] the event loop should carry out, if any. The
//! session never performs I/O itself, so it can be driven from tests
//! without a terminal or network.

mod tag_list;
mod text_field;

pub use tag_list::TagList;
pub use text_field::TextField;

use crate::config::Config;
use crate::error::{SessionError, TaskError};
use crate::jobs::{Completion, DownloadJob, Job, RefreshJob, TaskId, TaskKind};
use crate::retry::RetryPolicy;
use crate::source::{ReleaseRef, Repository};
use crate::version::{TagItem, rank_tags};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    TagList,
    OutputField,
    TokenField,
}

impl Focus {
    const ORDER: [Focus; 3] = [Focus::TagList, Focus::OutputField, Focus::TokenField];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Status line contents. Only one message is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Banner {
    #[default]
    Ready,
    Status(String),
    Warning(String),
    Error(String),
}

/// Logical key bindings, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    ClearBanner,
    Refresh,
    Download,
    CancelTasks,
    FocusNext,
    FocusPrev,
    Confirm,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Left,
    Right,
    Backspace,
    Delete,
    Char(char),
}

#[derive(Debug)]
pub enum Event {
    Startup,
    Resize { width: u16, height: u16 },
    Key(Key),
    Completed(Completion),
    Tick,
}

/// Work requested by the session from the event loop.
#[derive(Debug)]
pub enum Command {
    Run(Job),
    Quit,
}

#[derive(Debug)]
struct TaskHandle {
    id: TaskId,
    token: CancellationToken,
}

/// Rows taken by everything except the tag list.
const CHROME_HEIGHT: u16 = 14;
const MIN_PAGE_SIZE: u16 = 6;

#[derive(Debug)]
pub struct Session {
    config: Config,
    repository: Repository,
    tags: TagList,
    selected: Option<String>,
    focus: Focus,
    output: TextField,
    token: TextField,
    refresh: Option<TaskHandle>,
    download: Option<TaskHandle>,
    banner: Banner,
    next_task_id: u64,
    started: bool,
    spinner_frame: usize,
    size: (u16, u16),
}

impl Session {
    pub fn new(config: Config) -> Self {
        let repository = Repository::new(&config.owner, &config.repo);
        Self {
            config,
            repository,
            tags: TagList::default(),
            selected: None,
            focus: Focus::default(),
            output: TextField::new(),
            token: TextField::masked(),
            refresh: None,
            download: None,
            banner: Banner::Ready,
            next_task_id: 0,
            started: false,
            spinner_frame: 0,
            size: (0, 0),
        }
    }

    pub fn update(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Startup => {
                if self.started {
                    return None;
                }
                self.started = true;
                self.start_refresh()
            }
            Event::Resize { width, height } => {
                self.size = (width, height);
                let page_size = height.saturating_sub(CHROME_HEIGHT).max(MIN_PAGE_SIZE);
                self.tags.set_page_size(usize::from(page_size));
                None
            }
            Event::Key(key) => self.handle_key(key),
            Event::Completed(completion) => {
                self.complete(completion);
                None
            }
            Event::Tick => {
                if self.is_busy() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                None
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Quit => return Some(self.quit()),
            Key::ClearBanner => self.clear_banner(),
            Key::Refresh => return self.start_refresh(),
            Key::Download => return self.start_download(),
            Key::CancelTasks => self.cancel_tasks(),
            Key::FocusNext => self.focus = self.focus.next(),
            Key::FocusPrev => self.focus = self.focus.prev(),
            _ => match self.focus {
                Focus::TagList => return self.handle_list_key(key),
                Focus::OutputField => edit_field(&mut self.output, key),
                Focus::TokenField => edit_field(&mut self.token, key),
            },
        }
        None
    }

    fn handle_list_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Up => self.tags.cursor_up(),
            Key::Down => self.tags.cursor_down(),
            Key::PageUp => self.tags.page_up(),
            Key::PageDown => self.tags.page_down(),
            Key::Home => self.tags.jump_to_start(),
            Key::End => self.tags.jump_to_end(),
            Key::Confirm => self.select_highlighted(),
            Key::Char('q') => return Some(self.quit()),
            _ => {}
        }
        None
    }

    fn select_highlighted(&mut self) {
        if let Some(item) = self.tags.highlighted() {
            let status = selection_status(item);
            self.selected = Some(item.raw.clone());
            self.set_status(status);
        }
    }

    /// Cancels every live task and asks the event loop to exit.
    pub fn quit(&mut self) -> Command {
        self.cancel(TaskKind::Refresh);
        self.cancel(TaskKind::Download);
        Command::Quit
    }

    /// Starts a tag refresh, cancelling any task already running.
    pub fn start_refresh(&mut self) -> Option<Command> {
        self.cancel(TaskKind::Download);
        self.cancel(TaskKind::Refresh);
        self.clear_banner();

        let (id, token) = self.register(TaskKind::Refresh);
        tracing::info!("Refreshing tags of {} (task {id})", self.repository);
        let job = RefreshJob {
            id,
            repository: self.repository.clone(),
            token: self.resolve_token(),
            policy: RetryPolicy::REFRESH,
            scope: RetryPolicy::REFRESH.scope(token),
        };
        self.set_status("Refreshing version list...");
        Some(Command::Run(Job::Refresh(job)))
    }

    /// Starts downloading the selected tag's asset, cancelling any task already running.
    pub fn start_download(&mut self) -> Option<Command> {
        self.cancel(TaskKind::Refresh);
        self.cancel(TaskKind::Download);

        let tag = match self.selected.clone() {
            Some(tag) => tag,
            None => {
                self.set_error(SessionError::NoTagSelected);
                return None;
            }
        };
        let destination = match self.resolve_output() {
            Ok(destination) => destination,
            Err(err) => {
                self.set_error(err);
                return None;
            }
        };

        self.clear_banner();
        let (id, token) = self.register(TaskKind::Download);
        tracing::info!(
            "Downloading {} of {} to {} (task {id})",
            self.config.asset,
            tag,
            destination.display()
        );
        let job = DownloadJob {
            id,
            release: ReleaseRef {
                repository: self.repository.clone(),
                tag,
            },
            asset: self.config.asset.clone(),
            destination,
            token: self.resolve_token(),
            policy: RetryPolicy::DOWNLOAD,
            scope: RetryPolicy::DOWNLOAD.scope(token),
        };
        self.set_status("Downloading...");
        Some(Command::Run(Job::Download(job)))
    }

    fn register(&mut self, kind: TaskKind) -> (TaskId, CancellationToken) {
        self.next_task_id += 1;
        let handle = TaskHandle {
            id: TaskId(self.next_task_id),
            token: CancellationToken::new(),
        };
        let started = (handle.id, handle.token.clone());
        *self.slot(kind) = Some(handle);
        started
    }

    fn slot(&mut self, kind: TaskKind) -> &mut Option<TaskHandle> {
        match kind {
            TaskKind::Refresh => &mut self.refresh,
            TaskKind::Download => &mut self.download,
        }
    }

    /// Cancels and forgets the live task of `kind`. Its completion will be ignored.
    fn cancel(&mut self, kind: TaskKind) {
        if let Some(handle) = self.slot(kind).take() {
            tracing::debug!("Cancelling {kind} task {}", handle.id);
            handle.token.cancel();
        }
    }

    /// Cancels live tasks but keeps their handles, so their completions still report.
    fn cancel_tasks(&mut self) {
        for handle in [&self.refresh, &self.download].into_iter().flatten() {
            handle.token.cancel();
        }
        if self.is_busy() {
            self.set_status("Canceling...");
        }
    }

    /// Releases the handle of `kind` if `id` is still the live task.
    fn finish(&mut self, kind: TaskKind, id: TaskId) -> bool {
        let slot = self.slot(kind);
        if slot.as_ref().is_some_and(|handle| handle.id == id) {
            *slot = None;
            true
        } else {
            tracing::debug!("Ignoring stale {kind} completion {id}");
            false
        }
    }

    fn complete(&mut self, completion: Completion) {
        if !self.finish(completion.kind(), completion.id()) {
            return;
        }
        match completion {
            Completion::Refresh { result, .. } => match result {
                Ok(tags) => self.apply_tags(tags),
                Err(err) => self.report_failure(TaskKind::Refresh, err),
            },
            Completion::Download { result, .. } => match result {
                Ok(path) => self.set_status(format!("Downloaded: {}", path.display())),
                Err(err) => self.report_failure(TaskKind::Download, err),
            },
        }
    }

    fn report_failure(&mut self, kind: TaskKind, err: TaskError) {
        let (label, context) = match kind {
            TaskKind::Refresh => ("Refresh", "refresh tags"),
            TaskKind::Download => ("Download", "download asset"),
        };
        match err {
            TaskError::Canceled => self.set_status(format!("{label} canceled.")),
            TaskError::DeadlineExceeded(_) => self.set_status(format!("{label} canceled ({err}).")),
            TaskError::Failed(_) => self.set_error(format!("{context}: {err}")),
        }
    }

    /// Replaces the tag list, keeping the previous selection when it is still listed.
    pub fn apply_tags(&mut self, tags: Vec<String>) {
        let items = rank_tags(tags);
        if items.is_empty() {
            self.tags.set_items(items, 0);
            self.selected = None;
            self.set_warning(format!("No versions found for {}.", self.repository));
            return;
        }

        let index = self
            .selected
            .as_deref()
            .and_then(|raw| items.iter().position(|item| item.raw == raw))
            .unwrap_or(0);

        let status = selection_status(&items[index]);
        self.selected = Some(items[index].raw.clone());
        self.tags.set_items(items, index);
        self.set_status(status);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.banner = Banner::Status(message.into());
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.banner = Banner::Warning(message);
    }

    pub fn set_error(&mut self, err: impl ToString) {
        let message = err.to_string();
        tracing::error!("{message}");
        self.banner = Banner::Error(message);
    }

    pub fn clear_banner(&mut self) {
        self.banner = Banner::Ready;
    }

    /// Output path from the field, or `<output_dir>/<asset>` when the field is blank.
    pub fn resolve_output(&self) -> Result<PathBuf, SessionError> {
        match self.output.value() {
            Some(path) => Ok(PathBuf::from(path)),
            None => {
                let path = self.config.default_output_path();
                if path.as_os_str().is_empty() {
                    Err(SessionError::OutputUnresolved)
                } else {
                    Ok(path)
                }
            }
        }
    }

    /// Token from the field, falling back to the configured one.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .value()
            .map(str::to_string)
            .or_else(|| self.config.resolve_token())
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    pub fn is_downloading(&self) -> bool {
        self.download.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_refreshing() || self.is_downloading()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            repository: &self.repository,
            asset: &self.config.asset,
            tags: self.tags.items(),
            cursor: self.tags.cursor(),
            selected: self.selected.as_deref(),
            refreshing: self.is_refreshing(),
            downloading: self.is_downloading(),
            banner: &self.banner,
            focus: self.focus,
            output: &self.output,
            token: &self.token,
            default_output: self.config.default_output_path(),
            spinner_frame: self.spinner_frame,
            size: self.size,
        }
    }
}

/// Read-only snapshot consumed by the renderer.
#[derive(Debug)]
pub struct SessionView<'a> {
    pub repository: &'a Repository,
    pub asset: &'a str,
    pub tags: &'a [TagItem],
    pub cursor: usize,
    pub selected: Option<&'a str>,
    pub refreshing: bool,
    pub downloading: bool,
    pub banner: &'a Banner,
    pub focus: Focus,
    pub output: &'a TextField,
    pub token: &'a TextField,
    pub default_output: PathBuf,
    pub spinner_frame: usize,
    pub size: (u16, u16),
}

fn selection_status(item: &TagItem) -> String {
    if item.is_latest {
        format!("Selected version: {} (latest)", item.display)
    } else {
        format!("Selected version: {}", item.display)
    }
}

fn edit_field(field: &mut TextField, key: Key) {
    match key {
        Key::Left => field.cursor_left(),
        Key::Right => field.cursor_right(),
        Key::Home => field.cursor_home(),
        Key::End => field.cursor_end(),
        Key::Backspace => field.backspace(),
        Key::Delete => field.delete(),
        Key::Char(c) => field.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(Config::default())
    }

    fn run_job(command: Option<Command>) -> Job {
        match command {
            Some(Command::Run(job)) => job,
            other => panic!("expected a job, got {other:?}"),
        }
    }

    fn refresh_job(command: Option<Command>) -> RefreshJob {
        match run_job(command) {
            Job::Refresh(job) => job,
            other => panic!("expected a refresh job, got {other:?}"),
        }
    }

    fn download_job(command: Option<Command>) -> DownloadJob {
        match run_job(command) {
            Job::Download(job) => job,
            other => panic!("expected a download job, got {other:?}"),
        }
    }

    fn tags_loaded(id: TaskId, tags: &[&str]) -> Event {
        Event::Completed(Completion::Refresh {
            id,
            result: Ok(tags.iter().map(|t| t.to_string()).collect()),
        })
    }

    /// Starts a session and loads `tags` through the startup refresh.
    fn loaded_session(tags: &[&str]) -> Session {
        let mut session = session();
        let job = refresh_job(session.update(Event::Startup));
        assert!(session.update(tags_loaded(job.id, tags)).is_none());
        session
    }

    #[test]
    fn test_startup_refreshes_once() {
        let mut session = session();
        let job = refresh_job(session.update(Event::Startup));

        assert_eq!(job.repository, Repository::new("LavaGang", "MelonLoader"));
        assert_eq!(job.policy, RetryPolicy::REFRESH);
        assert!(session.is_refreshing());
        assert_eq!(
            session.banner(),
            &Banner::Status("Refreshing version list...".to_string())
        );
        assert!(session.update(Event::Startup).is_none());
    }

    #[test]
    fn test_loaded_tags_select_latest() {
        let session = loaded_session(&["v0.5.7", "v0.6.5", "0.2.7.4", "nightly"]);

        assert!(!session.is_refreshing());
        assert_eq!(session.selected(), Some("v0.6.5"));
        let view = session.view();
        let order: Vec<&str> = view.tags.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(order, vec!["v0.6.5", "v0.5.7", "0.2.7.4", "nightly"]);
        assert!(view.tags[0].is_latest);
        assert_eq!(view.cursor, 0);
        assert_eq!(
            view.banner,
            &Banner::Status("Selected version: 0.6.5 (latest)".to_string())
        );
    }

    #[test]
    fn test_reload_keeps_selection() {
        let mut session = loaded_session(&["v1.0.0", "v1.1.0", "v1.2.0"]);
        session.update(Event::Key(Key::Down));
        session.update(Event::Key(Key::Confirm));
        assert_eq!(session.selected(), Some("v1.1.0"));
        assert_eq!(
            session.banner(),
            &Banner::Status("Selected version: 1.1.0".to_string())
        );

        let job = refresh_job(session.update(Event::Key(Key::Refresh)));
        session.update(tags_loaded(job.id, &["v1.0.0", "v1.1.0", "v1.2.0", "v1.3.0"]));

        assert_eq!(session.selected(), Some("v1.1.0"));
        assert_eq!(session.tags().cursor(), 2);
        assert_eq!(
            session.banner(),
            &Banner::Status("Selected version: 1.1.0".to_string())
        );
    }

    #[test]
    fn test_reload_falls_back_to_latest() {
        let mut session = loaded_session(&["v1.0.0", "v1.1.0"]);
        session.update(Event::Key(Key::End));
        session.update(Event::Key(Key::Confirm));
        assert_eq!(session.selected(), Some("v1.0.0"));

        let job = refresh_job(session.update(Event::Key(Key::Refresh)));
        session.update(tags_loaded(job.id, &["v2.0.0", "v1.1.0"]));

        assert_eq!(session.selected(), Some("v2.0.0"));
        assert_eq!(session.tags().cursor(), 0);
    }

    #[test]
    fn test_empty_tag_list_warns() {
        let mut session = loaded_session(&["v1.0.0"]);
        let job = refresh_job(session.update(Event::Key(Key::Refresh)));
        session.update(tags_loaded(job.id, &[]));

        assert_eq!(session.selected(), None);
        assert!(session.tags().is_empty());
        assert_eq!(
            session.banner(),
            &Banner::Warning("No versions found for LavaGang/MelonLoader.".to_string())
        );
        assert!(session.update(Event::Key(Key::Download)).is_none());
    }

    #[test]
    fn test_stale_refresh_completion_is_ignored() {
        let mut session = session();
        let first = refresh_job(session.update(Event::Startup));
        let second = refresh_job(session.update(Event::Key(Key::Refresh)));

        assert!(first.scope.token().is_cancelled());
        assert!(!second.scope.token().is_cancelled());
        assert_ne!(first.id, second.id);

        session.update(tags_loaded(first.id, &["v9.9.9"]));
        assert!(session.is_refreshing());
        assert!(session.tags().is_empty());
        assert_eq!(session.selected(), None);

        session.update(tags_loaded(second.id, &["v1.0.0"]));
        assert!(!session.is_refreshing());
        assert_eq!(session.selected(), Some("v1.0.0"));
    }

    #[test]
    fn test_download_requires_selection() {
        let mut session = session();
        assert!(session.update(Event::Key(Key::Download)).is_none());
        assert_eq!(
            session.banner(),
            &Banner::Error(SessionError::NoTagSelected.to_string())
        );
        assert!(!session.is_downloading());
    }

    #[test]
    fn test_download_uses_default_output() {
        let mut session = loaded_session(&["v0.6.5"]);
        let job = download_job(session.update(Event::Key(Key::Download)));

        assert_eq!(job.release.tag, "v0.6.5");
        assert_eq!(job.asset, "MelonLoader.x64.zip");
        assert_eq!(job.destination, Path::new("downloads/MelonLoader.x64.zip"));
        assert_eq!(job.policy, RetryPolicy::DOWNLOAD);
        assert!(session.is_downloading());
        assert_eq!(session.banner(), &Banner::Status("Downloading...".to_string()));

        session.update(Event::Completed(Completion::Download {
            id: job.id,
            result: Ok(job.destination.clone()),
        }));
        assert!(!session.is_downloading());
        assert_eq!(
            session.banner(),
            &Banner::Status("Downloaded: downloads/MelonLoader.x64.zip".to_string())
        );
    }

    #[test]
    fn test_download_uses_output_field() {
        let mut session = loaded_session(&["v0.6.5"]);
        session.update(Event::Key(Key::FocusNext));
        assert_eq!(session.focus(), Focus::OutputField);
        for c in "out/ml.zip".chars() {
            session.update(Event::Key(Key::Char(c)));
        }

        let job = download_job(session.update(Event::Key(Key::Download)));
        assert_eq!(job.destination, Path::new("out/ml.zip"));
    }

    #[test]
    fn test_token_field_overrides_config() {
        let config = Config {
            token: Some("from-config".to_string()),
            ..Config::default()
        };
        let mut session = Session::new(config);
        assert_eq!(session.resolve_token().as_deref(), Some("from-config"));

        session.update(Event::Key(Key::FocusPrev));
        assert_eq!(session.focus(), Focus::TokenField);
        for c in "typed".chars() {
            session.update(Event::Key(Key::Char(c)));
        }
        assert_eq!(session.view().token.display(), "•••••");

        let job = refresh_job(session.update(Event::Startup));
        assert_eq!(job.token.as_deref(), Some("typed"));
    }

    #[test]
    fn test_refresh_and_download_replace_each_other() {
        let mut session = loaded_session(&["v1.0.0"]);
        let download = download_job(session.update(Event::Key(Key::Download)));
        let refresh = refresh_job(session.update(Event::Key(Key::Refresh)));

        assert!(download.scope.token().is_cancelled());
        assert!(!session.is_downloading());
        assert!(session.is_refreshing());

        // The replaced download still completes, but must not touch the banner.
        session.update(Event::Completed(Completion::Download {
            id: download.id,
            result: Err(TaskError::Canceled),
        }));
        assert_eq!(
            session.banner(),
            &Banner::Status("Refreshing version list...".to_string())
        );

        let download = download_job(session.update(Event::Key(Key::Download)));
        assert!(refresh.scope.token().is_cancelled());
        assert!(!session.is_refreshing());
        assert!(session.is_downloading());
        assert!(!download.scope.token().is_cancelled());
    }

    #[test]
    fn test_cancel_tasks_reports_canceled() {
        let mut session = session();
        let job = refresh_job(session.update(Event::Startup));

        assert!(session.update(Event::Key(Key::CancelTasks)).is_none());
        assert!(job.scope.token().is_cancelled());
        assert!(session.is_refreshing());

        session.update(Event::Completed(Completion::Refresh {
            id: job.id,
            result: Err(TaskError::Canceled),
        }));
        assert!(!session.is_refreshing());
        assert_eq!(session.banner(), &Banner::Status("Refresh canceled.".to_string()));
    }

    #[test]
    fn test_deadline_and_failure_banners() {
        let mut session = loaded_session(&["v1.0.0"]);
        let job = download_job(session.update(Event::Key(Key::Download)));
        session.update(Event::Completed(Completion::Download {
            id: job.id,
            result: Err(TaskError::DeadlineExceeded(Duration::from_secs(120))),
        }));
        assert_eq!(
            session.banner(),
            &Banner::Status("Download canceled (timed out after 120s).".to_string())
        );

        let job = refresh_job(session.update(Event::Key(Key::Refresh)));
        session.update(Event::Completed(Completion::Refresh {
            id: job.id,
            result: Err(TaskError::Failed(anyhow::anyhow!("git ls-remote failed"))),
        }));
        assert_eq!(
            session.banner(),
            &Banner::Error("refresh tags: git ls-remote failed".to_string())
        );
        // The previous list stays usable after a failed refresh.
        assert_eq!(session.selected(), Some("v1.0.0"));

        session.update(Event::Key(Key::ClearBanner));
        assert_eq!(session.banner(), &Banner::Ready);
    }

    #[test]
    fn test_quit_cancels_live_tasks() {
        let mut session = loaded_session(&["v1.0.0"]);
        let job = download_job(session.update(Event::Key(Key::Download)));

        assert!(matches!(session.update(Event::Key(Key::Quit)), Some(Command::Quit)));
        assert!(job.scope.token().is_cancelled());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_q_quits_only_from_list() {
        let mut session = loaded_session(&["v1.0.0"]);
        session.update(Event::Key(Key::FocusNext));
        assert!(session.update(Event::Key(Key::Char('q'))).is_none());
        assert_eq!(session.view().output.text(), "q");

        session.update(Event::Key(Key::FocusNext));
        session.update(Event::Key(Key::FocusNext));
        assert_eq!(session.focus(), Focus::TagList);
        assert!(matches!(
            session.update(Event::Key(Key::Char('q'))),
            Some(Command::Quit)
        ));
    }

    #[test]
    fn test_tick_and_resize() {
        let mut session = session();
        session.update(Event::Tick);
        assert_eq!(session.view().spinner_frame, 0);

        session.update(Event::Startup);
        session.update(Event::Tick);
        session.update(Event::Tick);
        assert_eq!(session.view().spinner_frame, 2);

        session.update(Event::Resize {
            width: 100,
            height: 40,
        });
        assert_eq!(session.view().size, (100, 40));
    }
}
