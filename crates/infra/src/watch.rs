// crates/infra/src/watch.rs
use std::{path::Path, time::Duration};

#[cfg(not(feature = "watch"))]
use comment_blocks_shared_kernel::InfrastructureError;
use comment_blocks_shared_kernel::Result;
#[cfg(feature = "watch")]
use {
    comment_blocks_shared_kernel::InfrastructureError,
    notify::{RecommendedWatcher, RecursiveMode, Watcher, event::EventKind},
    std::{sync::mpsc, thread, time::Instant},
    tracing::{debug, warn},
};

#[cfg(feature = "watch")]
type EventReceiver = mpsc::Receiver<std::result::Result<notify::Event, notify::Error>>;

/// Calls back whenever the settings file changes, debounced by `interval`.
#[cfg(feature = "watch")]
pub struct SettingsWatcher;

#[cfg(feature = "watch")]
impl SettingsWatcher {
    /// Watch `file` with filesystem notifications, falling back to polling.
    ///
    /// The parent directory is watched because editors usually replace the
    /// file rather than write into it. Runs until `on_change` fails.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `on_change`.
    pub fn run<F>(file: &Path, interval: Duration, mut on_change: F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        match Self::create_watcher(file) {
            Ok((watcher, rx)) => {
                // Dropping the watcher stops the notifications.
                let _keep = watcher;
                Self::event_loop(file, &rx, interval, &mut on_change)
            }
            Err(err) => {
                warn!(error = %err, ?interval, "file watcher unavailable, falling back to polling");
                Self::poll_loop(interval, &mut on_change)
            }
        }
    }

    fn create_watcher(file: &Path) -> std::result::Result<(RecommendedWatcher, EventReceiver), InfrastructureError> {
        let watch_err =
            |err: notify::Error| InfrastructureError::WatchError { message: err.to_string(), source: Some(Box::new(err)) };
        let (tx, rx) = mpsc::channel();
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .map_err(watch_err)?;

        let dir = file.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive).map_err(watch_err)?;
        debug!(dir = %dir.display(), "watching settings directory");

        Ok((watcher, rx))
    }

    fn event_loop<F>(file: &Path, rx: &EventReceiver, interval: Duration, on_change: &mut F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        let mut pending: Option<Instant> = None;

        loop {
            if pending.is_some() {
                Self::process_pending(file, rx, interval, on_change, &mut pending)?;
            } else {
                Self::process_idle(file, rx, interval, on_change, &mut pending)?;
            }
        }
    }

    fn process_pending<F>(
        file: &Path,
        rx: &EventReceiver,
        interval: Duration,
        on_change: &mut F,
        pending: &mut Option<Instant>,
    ) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        let Some(start) = pending.take() else {
            return Ok(());
        };
        let elapsed = start.elapsed();
        if elapsed >= interval {
            return on_change();
        }

        let remaining = interval.checked_sub(elapsed).unwrap_or_default();
        match rx.recv_timeout(remaining) {
            Ok(Ok(event)) => {
                *pending = Some(if Self::concerns(file, &event) { Instant::now() } else { start });
            }
            Ok(Err(err)) => {
                warn!(error = %err, "watcher error");
                *pending = Some(start);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => on_change()?,
            Err(mpsc::RecvTimeoutError::Disconnected) => return Self::poll_loop(interval, on_change),
        }

        Ok(())
    }

    fn process_idle<F>(
        file: &Path,
        rx: &EventReceiver,
        interval: Duration,
        on_change: &mut F,
        pending: &mut Option<Instant>,
    ) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        match rx.recv() {
            Ok(Ok(event)) => {
                if Self::concerns(file, &event) {
                    *pending = Some(Instant::now());
                }
            }
            Ok(Err(err)) => warn!(error = %err, "watcher error"),
            Err(_) => return Self::poll_loop(interval, on_change),
        }

        Ok(())
    }

    fn poll_loop<F>(interval: Duration, on_change: &mut F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        loop {
            thread::sleep(interval);
            on_change()?;
        }
    }

    fn concerns(file: &Path, event: &notify::Event) -> bool {
        Self::is_relevant(event.kind) && event.paths.iter().any(|path| same_file_name(path, file))
    }

    const fn is_relevant(kind: EventKind) -> bool {
        matches!(
            kind,
            EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Other
        )
    }
}

#[cfg(feature = "watch")]
fn same_file_name(path: &Path, file: &Path) -> bool {
    path.file_name().is_some() && path.file_name() == file.file_name()
}

#[cfg(not(feature = "watch"))]
pub struct SettingsWatcher;

#[cfg(not(feature = "watch"))]
impl SettingsWatcher {
    pub fn run<F>(_file: &Path, _interval: Duration, _on_change: F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        Err(InfrastructureError::WatchError { message: "watch feature disabled at compile time".to_string(), source: None }
            .into())
    }
}
