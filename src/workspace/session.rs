use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::content::{ContentType, Location};
use super::error::WorkspaceError;
use super::navigation::{NavigateOptions, NavigationController, Navigator};
use super::store::{WorkspaceStore, WorkspaceTab};
use crate::config::WorkspaceConfig;

/// Key of the tab every session starts with
pub const DEFAULT_TAB: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub scroll: bool,
}

/// Navigator that records pushed entries instead of driving a browser
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    entries: Vec<HistoryEntry>,
}

impl HistoryNavigator {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl Navigator for HistoryNavigator {
    fn push(&mut self, url: &str, options: NavigateOptions) {
        tracing::debug!("history push {} (scroll: {})", url, options.scroll);
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            scroll: options.scroll,
        });
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub content: ContentType,
    pub active_tab: Option<String>,
    pub tabs: Vec<WorkspaceTab>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResult {
    /// URL pushed to history, absent when the content was already current
    pub pushed: Option<String>,
    pub workspace: WorkspaceSnapshot,
}

/// Per-session workspace context: tab store, URL and the controller keeping them in sync
#[derive(Debug)]
pub struct WorkspaceSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    default_path: String,
    location: Location,
    store: WorkspaceStore,
    controller: NavigationController,
    history: HistoryNavigator,
}

impl WorkspaceSession {
    pub fn open(id: Uuid, initial_url: Option<&str>, config: &WorkspaceConfig) -> Result<Self, WorkspaceError> {
        let location = match initial_url {
            Some(url) => Location::parse(url, &config.default_path),
            None => Location::new(config.default_path.clone()),
        };

        let mut session = Self {
            id,
            created_at: Utc::now(),
            default_path: config.default_path.clone(),
            location,
            store: WorkspaceStore::new(config.max_tabs_per_session),
            controller: NavigationController::new(),
            history: HistoryNavigator::default(),
        };

        session.store.open_tab(DEFAULT_TAB)?;
        session
            .controller
            .sync_from_url(&session.location, &mut session.store);

        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn navigate(&mut self, content: ContentType) -> Option<String> {
        let pushed = self.controller.navigate_to_content(
            content,
            &mut self.store,
            &mut self.history,
            &self.location,
        )?;
        self.commit(&pushed);
        Some(pushed)
    }

    /// Record a URL change that did not originate from `navigate`
    pub fn observe_location(&mut self, url: &str) -> Option<ContentType> {
        self.location = Location::parse(url, &self.default_path);
        self.controller.sync_from_url(&self.location, &mut self.store)
    }

    pub fn open_tab(&mut self, key: &str) -> Result<Option<String>, WorkspaceError> {
        let content = self.store.open_tab(key)?.active_content;
        Ok(self.follow_tab(content))
    }

    pub fn activate_tab(&mut self, key: &str) -> Result<Option<String>, WorkspaceError> {
        let content = self.store.activate_tab(key)?.active_content;
        Ok(self.follow_tab(content))
    }

    pub fn close_tab(&mut self, key: &str) -> Result<Option<String>, WorkspaceError> {
        self.store.close_tab(key)?;
        let content = self.store.active_tab().map(|t| t.active_content);
        Ok(content.and_then(|c| self.follow_tab(c)))
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            id: self.id,
            created_at: self.created_at,
            url: self.location.href(),
            content: self.controller.current(),
            active_tab: self.store.active_tab().map(|t| t.key.clone()),
            tabs: self.store.tabs().to_vec(),
            history: self.history.entries().to_vec(),
        }
    }

    /// A newly focused tab brings the URL along, unless it has nothing to show yet.
    /// An empty tab leaves the URL alone but still becomes the navigation baseline.
    fn follow_tab(&mut self, content: ContentType) -> Option<String> {
        if content.is_empty() {
            self.controller.focus(content);
            return None;
        }
        self.navigate(content)
    }

    fn commit(&mut self, url: &str) {
        self.location = Location::parse(url, &self.default_path);
        self.controller.sync_from_url(&self.location, &mut self.store);
    }
}

/// Live workspace sessions, each behind its own lock
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<WorkspaceSession>>>>>,
    config: WorkspaceConfig,
}

impl SessionRegistry {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub async fn create(&self, initial_url: Option<&str>) -> Result<WorkspaceSnapshot, WorkspaceError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(WorkspaceError::SessionLimit(self.config.max_sessions));
        }

        let session = WorkspaceSession::open(Uuid::new_v4(), initial_url, &self.config)?;
        let snapshot = session.snapshot();
        sessions.insert(session.id(), Arc::new(Mutex::new(session)));

        tracing::info!("Opened workspace session {} at {}", snapshot.id, snapshot.url);
        Ok(snapshot)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<WorkspaceSession>>, WorkspaceError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(WorkspaceError::SessionNotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), WorkspaceError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::info!("Closed workspace session {}", id))
            .ok_or(WorkspaceError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
