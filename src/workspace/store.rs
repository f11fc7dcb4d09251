use serde::Serialize;

use super::content::ContentType;
use super::error::WorkspaceError;
use super::navigation::ContentStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceTab {
    pub key: String,
    pub active_content: ContentType,
}

/// Tabs of one workspace session. At most one tab is active at a time.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    tabs: Vec<WorkspaceTab>,
    active: Option<usize>,
    max_tabs: usize,
}

impl WorkspaceStore {
    pub fn new(max_tabs: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            max_tabs,
        }
    }

    pub fn tabs(&self) -> &[WorkspaceTab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&WorkspaceTab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    /// Open (or re-focus) a tab and make it active. New tabs start out `Empty`.
    pub fn open_tab(&mut self, key: &str) -> Result<&WorkspaceTab, WorkspaceError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(WorkspaceError::InvalidTabKey(key.to_string()));
        }

        let index = match self.position(key) {
            Some(index) => index,
            None => {
                if self.tabs.len() >= self.max_tabs {
                    return Err(WorkspaceError::TabLimit(self.max_tabs));
                }
                self.tabs.push(WorkspaceTab {
                    key: key.to_string(),
                    active_content: ContentType::Empty,
                });
                self.tabs.len() - 1
            }
        };

        self.active = Some(index);
        Ok(&self.tabs[index])
    }

    pub fn activate_tab(&mut self, key: &str) -> Result<&WorkspaceTab, WorkspaceError> {
        let index = self
            .position(key)
            .ok_or_else(|| WorkspaceError::TabNotFound(key.to_string()))?;
        self.active = Some(index);
        Ok(&self.tabs[index])
    }

    /// Close a tab. When the active tab closes, focus moves to its right-hand
    /// neighbour, else the left-hand one, else nothing.
    pub fn close_tab(&mut self, key: &str) -> Result<WorkspaceTab, WorkspaceError> {
        let index = self
            .position(key)
            .ok_or_else(|| WorkspaceError::TabNotFound(key.to_string()))?;
        let closed = self.tabs.remove(index);

        self.active = match self.active {
            Some(active) if active == index => {
                if self.tabs.is_empty() {
                    None
                } else {
                    Some(index.min(self.tabs.len() - 1))
                }
            }
            Some(active) if active > index => Some(active - 1),
            other => other,
        };

        Ok(closed)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key == key)
    }
}

impl ContentStore for WorkspaceStore {
    fn update_active_tab_content(&mut self, content: ContentType) {
        match self.active.and_then(|i| self.tabs.get_mut(i)) {
            Some(tab) => tab.active_content = content,
            None => tracing::debug!("No active tab; dropping content update to {}", content),
        }
    }
}
