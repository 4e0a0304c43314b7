//! ExportTask - runs a results export in the background.
//!
//! At most one export runs at a time. The dialog view-model is published
//! through a `watch` channel so any number of observers can follow the
//! progress. An export is cancelled only by an explicit `cancel`, either on
//! the handle or on the task itself; dropping the handle lets it run to
//! completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::announcement::Announcement;
use crate::domain::assessment::AssessmentSession;
use crate::domain::catalog::ValuesCatalog;
use crate::domain::export::{compose_markdown, export_base_filename, ExportDialog, ExportStage};
use crate::domain::foundation::Timestamp;
use crate::domain::results::{assemble, ResultsView};
use crate::ports::{Announcer, DocumentExportService, ExportError, ExportFormat, ExportedDocument};

pub struct ExportTask {
    exporter: Arc<dyn DocumentExportService>,
    announcer: Arc<dyn Announcer>,
    in_flight: Arc<AtomicBool>,
    dialog: Arc<watch::Sender<ExportDialog>>,
    /// Cancel switch of the running export, if any.
    running: Arc<Mutex<Option<Arc<watch::Sender<bool>>>>>,
}

impl ExportTask {
    pub fn new(exporter: Arc<dyn DocumentExportService>, announcer: Arc<dyn Announcer>) -> Self {
        let (dialog, _) = watch::channel(ExportDialog::default());
        Self {
            exporter,
            announcer,
            in_flight: Arc::new(AtomicBool::new(false)),
            dialog: Arc::new(dialog),
            running: Arc::new(Mutex::new(None)),
        }
    }

    /// Current dialog state.
    pub fn dialog(&self) -> ExportDialog {
        self.dialog.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportDialog> {
        self.dialog.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Cancels the running export without needing its handle.
    pub fn cancel(&self) -> Result<(), ExportError> {
        match lock(&self.running).as_ref() {
            Some(cancel) => {
                cancel.send_replace(true);
                tracing::info!("Export cancellation requested");
                Ok(())
            }
            None => Err(ExportError::NotRunning),
        }
    }

    /// Starts exporting the session's results.
    ///
    /// Rejections (not premium, nothing ranked, already running) leave the
    /// dialog closed and are announced.
    pub fn start(
        &self,
        session: &AssessmentSession,
        catalog: &ValuesCatalog,
        format: ExportFormat,
    ) -> Result<ExportHandle, ExportError> {
        if !session.is_premium_user() {
            return Err(self.reject(ExportError::PremiumRequired));
        }

        let results = assemble(session, catalog);
        if results.is_empty() {
            return Err(self.reject(ExportError::NothingToExport));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(self.reject(ExportError::AlreadyInProgress));
        }
        let guard = InFlightGuard(self.in_flight.clone());

        let mut begun = Ok(());
        self.dialog.send_modify(|dialog| begun = dialog.begin(format));
        if let Err(e) = begun {
            return Err(self.reject(e));
        }

        tracing::info!(assessment_id = %session.id(), %format, "Export started");
        self.announcer
            .announce(Announcement::polite(format!("Preparing your {} export.", format)));

        let (cancel, cancel_rx) = watch::channel(false);
        let cancel = Arc::new(cancel);
        *lock(&self.running) = Some(cancel.clone());
        let running = self.running.clone();
        let progress = self.dialog.subscribe();
        let dialog = self.dialog.clone();
        let exporter = self.exporter.clone();
        let announcer = self.announcer.clone();

        let join = tokio::spawn(async move {
            let _guard = guard;

            let result = tokio::select! {
                biased;
                _ = cancelled(cancel_rx) => Err(ExportError::Cancelled),
                result = run(exporter.as_ref(), results, format, &dialog) => result,
            };

            match &result {
                Ok(document) => {
                    dialog.send_modify(ExportDialog::complete);
                    tracing::info!(
                        filename = %document.filename,
                        bytes = document.content.len(),
                        "Export completed"
                    );
                    announcer.announce(Announcement::polite(format!(
                        "Export ready: {}",
                        document.filename
                    )));
                }
                Err(ExportError::Cancelled) => {
                    dialog.send_modify(ExportDialog::cancel);
                    tracing::info!("Export cancelled");
                    announcer.announce(Announcement::polite(
                        ExportError::Cancelled.user_message(),
                    ));
                }
                Err(e) => {
                    dialog.send_modify(|d| d.fail(e));
                    tracing::warn!(error = %e, "Export failed");
                    announcer.announce(Announcement::assertive(e.user_message()));
                }
            }
            // Cleared while the in-flight flag is still held.
            *lock(&running) = None;
            result
        });

        Ok(ExportHandle {
            cancel,
            progress,
            join,
        })
    }

    fn reject(&self, err: ExportError) -> ExportError {
        tracing::debug!(error = %err, "Export rejected");
        self.announcer
            .announce(Announcement::assertive(err.user_message()));
        err
    }
}

/// Handle to a running export.
pub struct ExportHandle {
    cancel: Arc<watch::Sender<bool>>,
    progress: watch::Receiver<ExportDialog>,
    join: JoinHandle<Result<ExportedDocument, ExportError>>,
}

impl ExportHandle {
    /// Requests cancellation. No effect once the export has finished.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn progress(&self) -> watch::Receiver<ExportDialog> {
        self.progress.clone()
    }

    pub async fn wait(self) -> Result<ExportedDocument, ExportError> {
        let ExportHandle { cancel, join, .. } = self;
        let outcome = join.await;
        drop(cancel);
        match outcome {
            Ok(result) => result,
            Err(e) => Err(ExportError::service_unavailable(format!(
                "export task ended unexpectedly: {}",
                e
            ))),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the in-flight flag however the task ends.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Resolves when cancellation is requested. Pends forever if every cancel
/// switch is dropped without cancelling.
async fn cancelled(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

async fn run(
    exporter: &dyn DocumentExportService,
    results: ResultsView,
    format: ExportFormat,
    dialog: &watch::Sender<ExportDialog>,
) -> Result<ExportedDocument, ExportError> {
    dialog.send_modify(|d| d.report(ExportStage::Assembled));

    let generated_on = Timestamp::now();
    let markdown = compose_markdown(&results, generated_on)?;
    dialog.send_modify(|d| d.report(ExportStage::Composed));

    let content = match format {
        ExportFormat::Markdown => markdown.into_bytes(),
        ExportFormat::Html => exporter.to_html(&markdown).await?.into_bytes(),
        ExportFormat::Pdf => exporter.to_pdf(&markdown).await?,
    };
    dialog.send_modify(|d| d.report(ExportStage::Converted));

    Ok(ExportedDocument::new(
        content,
        format,
        &export_base_filename(generated_on),
    ))
}
