use std::{collections::BTreeSet, fmt};

use desktop_app_contract::{AppId, WindowRuntimeId};
pub use desktop_app_contract::{WindowSize, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use serde::{Deserialize, Serialize};

pub const INITIAL_Z_INDEX: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl WindowId {
    pub const fn runtime_id(self) -> WindowRuntimeId {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One open window instance. Only the session reducer mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon_id: String,
    pub z_index: u64,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub windows: Vec<WindowRecord>,
    pub focused_window_id: Option<WindowId>,
    pub next_z_index: u64,
    pub next_window_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(INITIAL_Z_INDEX)
    }
}

impl SessionState {
    pub fn new(initial_z_index: u64) -> Self {
        Self {
            windows: Vec::new(),
            focused_window_id: None,
            next_z_index: initial_z_index,
            next_window_id: 1,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn focused_window(&self) -> Option<&WindowRecord> {
        self.focused_window_id.and_then(|id| self.window(id))
    }

    /// Non-minimized windows, back to front.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Apps with at least one window in the session, minimized or not.
    pub fn running_app_ids(&self) -> BTreeSet<AppId> {
        self.windows.iter().map(|w| w.app_id).collect()
    }

    pub fn windows_for_app(&self, app_id: AppId) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(move |w| w.app_id == app_id)
    }

    pub fn top_z_index(&self) -> Option<u64> {
        self.windows.iter().map(|w| w.z_index).max()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: AppId,
    pub title: Option<String>,
    pub position: Option<WindowPosition>,
    pub size: Option<WindowSize>,
}

impl OpenWindowRequest {
    pub fn new(app_id: AppId) -> Self {
        Self {
            app_id,
            title: None,
            position: None,
            size: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn at(mut self, position: WindowPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn sized(mut self, size: WindowSize) -> Self {
        self.size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: u64, app_id: AppId, z_index: u64, minimized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            app_id,
            title: app_id.default_title().to_string(),
            icon_id: app_id.key().to_string(),
            z_index,
            position: WindowPosition { x: 0, y: 0 },
            size: WindowSize::default(),
            minimized,
        }
    }

    #[test]
    fn visible_windows_are_ordered_by_z_index_and_skip_minimized() {
        let mut state = SessionState::default();
        state.windows = vec![
            record(1, AppId::Finder, 14, false),
            record(2, AppId::Calculator, 11, false),
            record(3, AppId::Terminal, 20, true),
        ];

        let order: Vec<WindowId> = state.visible_windows().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![WindowId(2), WindowId(1)]);
        assert_eq!(state.top_z_index(), Some(20));
    }

    #[test]
    fn running_apps_collapse_duplicates_and_include_minimized() {
        let mut state = SessionState::default();
        state.windows = vec![
            record(1, AppId::Finder, 10, false),
            record(2, AppId::Finder, 11, false),
            record(3, AppId::TextEditor, 12, true),
        ];

        assert_eq!(
            state.running_app_ids(),
            BTreeSet::from([AppId::Finder, AppId::TextEditor])
        );
        assert_eq!(state.windows_for_app(AppId::Finder).count(), 2);
    }

    #[test]
    fn window_id_displays_with_prefix() {
        assert_eq!(WindowId(42).to_string(), "window-42");
        assert_eq!(WindowId(42).runtime_id(), 42);
    }
}
