//! AssessmentRegistry - the live wizards behind the HTTP API.
//!
//! Each assessment is saved under its own key
//! (`valuesCompass.assessment.<id>`), so one store can host many visitors.
//! Assessments missing from memory are resumed from the store on lookup.
//! At most `max_live` wizards stay in memory; the least recently used one
//! is dropped to make room and comes back from the store when asked for.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::assessment::AssessmentSession;
use crate::domain::foundation::AssessmentId;
use crate::ports::{storage_keys, AuthCapability, DocumentExportService, KeyValueStore};

use super::{AssessmentWizard, ExportTask, LiveRegion, SessionStore, WizardContext};

pub const DEFAULT_MAX_LIVE_ASSESSMENTS: usize = 1024;

/// One visitor's wizard, export slot and announcements.
pub struct AssessmentEntry {
    pub wizard: Mutex<AssessmentWizard>,
    pub export: ExportTask,
    pub live_region: Arc<LiveRegion>,
    last_used: AtomicU64,
}

pub struct AssessmentRegistry {
    ctx: WizardContext,
    store: Arc<dyn KeyValueStore>,
    auth: Arc<dyn AuthCapability>,
    exporter: Arc<dyn DocumentExportService>,
    entries: RwLock<HashMap<AssessmentId, Arc<AssessmentEntry>>>,
    max_live: usize,
    clock: AtomicU64,
}

impl AssessmentRegistry {
    pub fn new(
        ctx: WizardContext,
        store: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthCapability>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            ctx,
            store,
            auth,
            exporter,
            entries: RwLock::new(HashMap::new()),
            max_live: DEFAULT_MAX_LIVE_ASSESSMENTS,
            clock: AtomicU64::new(0),
        }
    }

    /// Caps how many wizards are kept in memory (at least one).
    pub fn with_max_live(mut self, max_live: usize) -> Self {
        self.max_live = max_live.max(1);
        self
    }

    pub fn storage_key(id: &AssessmentId) -> String {
        format!("{}.{}", storage_keys::ASSESSMENT, id)
    }

    /// Starts a new assessment for the current visitor.
    pub async fn create(&self) -> (AssessmentId, Arc<AssessmentEntry>) {
        let premium = self.is_premium().await;
        let session = AssessmentSession::new(premium);
        let id = session.id();
        let store = SessionStore::with_key(self.store.clone(), Self::storage_key(&id));
        // Saved up front so the assessment can be resumed once evicted.
        if let Err(e) = store.save(&session).await {
            tracing::warn!(assessment_id = %id, error = %e, "Could not save new assessment");
        }
        let (ctx, live_region) = self.entry_context();
        let wizard = AssessmentWizard::from_session(ctx, store, session);

        let entry = self.entry(wizard, live_region);
        let mut entries = self.entries.write().await;
        self.make_room(&mut entries);
        entries.insert(id, entry.clone());
        drop(entries);
        tracing::info!(assessment_id = %id, premium, "Assessment created");
        (id, entry)
    }

    /// Looks up a live assessment, resuming a saved one if needed.
    pub async fn get(&self, id: &AssessmentId) -> Option<Arc<AssessmentEntry>> {
        if let Some(entry) = self.entries.read().await.get(id) {
            self.touch(entry);
            return Some(entry.clone());
        }

        let store = SessionStore::with_key(self.store.clone(), Self::storage_key(id));
        match store.load().await {
            Ok(Some(_)) => {}
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(assessment_id = %id, error = %e, "Could not read saved assessment");
                return None;
            }
        }

        let premium = self.is_premium().await;
        let (ctx, live_region) = self.entry_context();
        let wizard = AssessmentWizard::resume(ctx, store, premium).await;
        let entry = self.entry(wizard, live_region);

        // Another request may have resumed it meanwhile; keep the first.
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(id) {
            self.touch(existing);
            return Some(existing.clone());
        }
        self.make_room(&mut entries);
        entries.insert(*id, entry.clone());
        Some(entry)
    }

    /// Forgets a live assessment. The saved copy is left alone.
    pub async fn evict(&self, id: &AssessmentId) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Re-reads the visitor's premium flag into the session.
    pub async fn refresh_premium(&self, entry: &AssessmentEntry) -> bool {
        let premium = self.is_premium().await;
        entry.wizard.lock().await.set_premium(premium);
        premium
    }

    async fn is_premium(&self) -> bool {
        match self.auth.current_user().await {
            Ok(user) => user.map(|u| u.is_premium).unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "Auth unavailable; treating visitor as free");
                false
            }
        }
    }

    /// Wizard context whose announcements also land in the entry's live region.
    fn entry_context(&self) -> (WizardContext, Arc<LiveRegion>) {
        let live_region = Arc::new(LiveRegion::new(self.ctx.announcer.clone()));
        let mut ctx = self.ctx.clone();
        ctx.announcer = live_region.clone();
        (ctx, live_region)
    }

    fn entry(
        &self,
        wizard: AssessmentWizard,
        live_region: Arc<LiveRegion>,
    ) -> Arc<AssessmentEntry> {
        Arc::new(AssessmentEntry {
            wizard: Mutex::new(wizard),
            export: ExportTask::new(self.exporter.clone(), live_region.clone()),
            live_region,
            last_used: AtomicU64::new(self.tick()),
        })
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn touch(&self, entry: &AssessmentEntry) {
        entry.last_used.store(self.tick(), Ordering::Relaxed);
    }

    /// Drops least recently used wizards until one more fits. Entries with
    /// an export running are skipped.
    fn make_room(&self, entries: &mut HashMap<AssessmentId, Arc<AssessmentEntry>>) {
        while entries.len() >= self.max_live {
            let victim = entries
                .iter()
                .filter(|(_, entry)| !entry.export.is_running())
                .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| *id);

            match victim {
                Some(id) => {
                    entries.remove(&id);
                    tracing::debug!(assessment_id = %id, "Evicted idle assessment");
                }
                None => {
                    tracing::warn!(
                        live = entries.len(),
                        max_live = self.max_live,
                        "Every live assessment is exporting; exceeding the cap"
                    );
                    break;
                }
            }
        }
    }
}
