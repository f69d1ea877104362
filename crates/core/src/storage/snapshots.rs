//! Session-scoped cache of leaderboard snapshots, one per [`TimeWindow`].
//!
//! Each window is written at most once. A window that failed to load, or has
//! not finished loading, is simply absent; readers treat that as "no data".

use crate::domain::{ParticipantRecord, Snapshot, TimeWindow};
use crate::ingest::SnapshotSource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: RwLock<HashMap<TimeWindow, Arc<Snapshot>>>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: Vec<TimeWindow>,
    pub failed: Vec<TimeWindow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowStatus {
    pub window: TimeWindow,
    pub loaded: bool,
    pub records: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches one window and stores it. Failures are logged and leave the
    /// window absent; nothing is propagated to the caller.
    pub async fn load(&self, source: &dyn SnapshotSource, window: TimeWindow) -> bool {
        if self.contains(window) {
            tracing::debug!(%window, "snapshot already loaded; skipping");
            return true;
        }

        match source.fetch(window).await {
            Ok(records) => {
                let count = records.len();
                if self.insert(Snapshot::new(window, records)) {
                    tracing::info!(
                        %window,
                        source = source.source_name(),
                        records = count,
                        "loaded leaderboard snapshot"
                    );
                }
                true
            }
            Err(err) => {
                let detail = format!("{err:#}");
                tracing::error!(
                    %window,
                    key = window.retrieval_key(),
                    source = source.source_name(),
                    error = %detail,
                    "failed to load leaderboard snapshot"
                );
                false
            }
        }
    }

    /// Loads every window concurrently. One failure never cancels the others.
    pub async fn load_all(&self, source: &dyn SnapshotSource) -> LoadReport {
        let outcomes =
            futures::future::join_all(TimeWindow::ALL.map(|window| async move {
                (window, self.load(source, window).await)
            }))
            .await;

        let mut report = LoadReport::default();
        for (window, ok) in outcomes {
            if ok {
                report.loaded.push(window);
            } else {
                report.failed.push(window);
            }
        }

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "leaderboard load finished"
        );
        report
    }

    /// Stores a snapshot unless its window is already present. Returns whether it was stored.
    pub fn insert(&self, snapshot: Snapshot) -> bool {
        let mut guard = self.write();
        if guard.contains_key(&snapshot.window) {
            return false;
        }
        guard.insert(snapshot.window, Arc::new(snapshot));
        true
    }

    pub fn insert_records(&self, window: TimeWindow, records: Vec<ParticipantRecord>) -> bool {
        self.insert(Snapshot::new(window, records))
    }

    pub fn get(&self, window: TimeWindow) -> Option<Arc<Snapshot>> {
        self.read().get(&window).cloned()
    }

    pub fn contains(&self, window: TimeWindow) -> bool {
        self.read().contains_key(&window)
    }

    pub fn loaded_windows(&self) -> Vec<TimeWindow> {
        let guard = self.read();
        TimeWindow::ALL
            .into_iter()
            .filter(|w| guard.contains_key(w))
            .collect()
    }

    pub fn status(&self) -> Vec<WindowStatus> {
        let guard = self.read();
        TimeWindow::ALL
            .into_iter()
            .map(|window| match guard.get(&window) {
                Some(s) => WindowStatus {
                    window,
                    loaded: true,
                    records: s.len(),
                    loaded_at: Some(s.loaded_at),
                },
                None => WindowStatus {
                    window,
                    loaded: false,
                    records: 0,
                    loaded_at: None,
                },
            })
            .collect()
    }

    // Writers hold the lock only for a map insert, so a poisoned lock still
    // holds a consistent map.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TimeWindow, Arc<Snapshot>>> {
        self.snapshots.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<TimeWindow, Arc<Snapshot>>> {
        self.snapshots.write().unwrap_or_else(|e| e.into_inner())
    }
}
