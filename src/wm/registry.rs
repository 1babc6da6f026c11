//! Registry Module
//!
//! Owns every window entity. Windows are registered once and never removed;
//! closing only changes state so handles stay reusable.

use tracing::{debug, info};

use crate::shared::{WindowId, WindowKind};
use crate::wm::client::Client;

/// Pre-declared window description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
}

impl WindowSpec {
    pub fn new(id: impl Into<WindowId>, kind: WindowKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
        }
    }
}

/// Window registry, in declaration order
#[derive(Debug, Default)]
pub struct WindowRegistry {
    clients: Vec<Client>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window; returns false if the id is already taken
    pub fn register(&mut self, spec: WindowSpec) -> bool {
        if self.contains(&spec.id) {
            debug!("Window {} already registered", spec.id);
            return false;
        }
        info!("Registered window {} ({})", spec.id, spec.kind.as_str());
        self.clients.push(Client::new(spec.id, spec.kind, spec.title));
        true
    }

    /// Id of the single window of a dynamic kind, creating it on first use
    pub fn ensure_dynamic(&mut self, kind: WindowKind) -> WindowId {
        if let Some(client) = self.clients.iter().find(|c| c.kind == kind) {
            return client.id.clone();
        }

        let id = format!("{}-window", kind.as_str());
        let title = match kind {
            WindowKind::Home => "Home".to_string(),
            other => other.as_str().to_string(),
        };
        info!("Creating dynamic window {}", id);
        self.clients.push(Client::new(id.clone(), kind, title));
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.clients.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    /// First window of a kind
    pub fn find_kind(&self, kind: WindowKind) -> Option<&Client> {
        self.clients.iter().find(|c| c.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Client> {
        self.clients.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
