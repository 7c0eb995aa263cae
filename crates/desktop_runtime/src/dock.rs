use desktop_app_contract::AppId;

use crate::{apps::AppRegistry, model::SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockItemKind {
    App(AppId),
    /// Pinned after a separator at the end of the dock. Never hosts windows.
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockItem {
    pub kind: DockItemKind,
    pub title: String,
    pub icon_id: String,
    /// Drives the running-indicator dot under the icon.
    pub running: bool,
}

impl DockItem {
    pub fn trash() -> Self {
        Self {
            kind: DockItemKind::Trash,
            title: "Trash".to_string(),
            icon_id: "trash".to_string(),
            running: false,
        }
    }

    pub fn app_id(&self) -> Option<AppId> {
        match self.kind {
            DockItemKind::App(app_id) => Some(app_id),
            DockItemKind::Trash => None,
        }
    }
}

/// Dock apps in catalog order followed by the trash.
pub fn dock_items(state: &SessionState, registry: &AppRegistry) -> Vec<DockItem> {
    let running = state.running_app_ids();
    registry
        .dock_apps()
        .map(|entry| DockItem {
            kind: DockItemKind::App(entry.app_id),
            title: entry.title.clone(),
            icon_id: entry.icon_id.clone(),
            running: running.contains(&entry.app_id),
        })
        .chain(std::iter::once(DockItem::trash()))
        .collect()
}
