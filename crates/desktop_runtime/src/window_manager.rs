//! Shared window-manager transition helpers used by the session reducer.

use desktop_app_contract::AppId;

use crate::model::{SessionState, WindowId};

/// Hands out the next session-unique window id.
pub fn next_window_id(state: &mut SessionState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

/// Hands out the next stacking value. Values are never reused.
pub fn next_z_index(state: &mut SessionState) -> u64 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

/// Focuses and raises `window_id`, restoring it first if it was minimized.
///
/// Returns `None` when the window does not exist, otherwise whether a restore happened.
pub fn focus_window_internal(state: &mut SessionState, window_id: WindowId) -> Option<bool> {
    let index = state.windows.iter().position(|w| w.id == window_id)?;
    let z_index = next_z_index(state);
    let window = &mut state.windows[index];
    let restored = window.minimized;
    window.minimized = false;
    window.z_index = z_index;
    state.focused_window_id = Some(window_id);
    Some(restored)
}

/// Highest-stacked non-minimized window, if any.
pub fn topmost_visible_window(state: &SessionState) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| !w.minimized)
        .max_by_key(|w| w.z_index)
        .map(|w| w.id)
}

/// Moves focus to the topmost visible window after the focused one went away.
///
/// Clears focus when nothing visible remains. Returns the new focus.
pub fn refocus_topmost(state: &mut SessionState) -> Option<WindowId> {
    match topmost_visible_window(state) {
        Some(window_id) => {
            focus_window_internal(state, window_id);
            Some(window_id)
        }
        None => {
            state.focused_window_id = None;
            None
        }
    }
}

/// Window a dock click for `app_id` should bring forward: the topmost visible instance,
/// else the topmost minimized one.
pub fn preferred_window_for_app(state: &SessionState, app_id: AppId) -> Option<WindowId> {
    state
        .windows_for_app(app_id)
        .max_by_key(|w| (!w.minimized, w.z_index))
        .map(|w| w.id)
}

/// Drops a focus reference that no longer points at a present, visible window.
pub fn normalize_focus(state: &mut SessionState) {
    let Some(focused) = state.focused_window_id else {
        return;
    };
    let valid = state
        .window(focused)
        .map(|w| !w.minimized)
        .unwrap_or(false);
    if !valid {
        state.focused_window_id = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowPosition, WindowRecord, WindowSize};

    fn push(state: &mut SessionState, app_id: AppId, minimized: bool) -> WindowId {
        let id = next_window_id(state);
        let z_index = next_z_index(state);
        state.windows.push(WindowRecord {
            id,
            app_id,
            title: app_id.default_title().to_string(),
            icon_id: app_id.key().to_string(),
            z_index,
            position: WindowPosition { x: 0, y: 0 },
            size: WindowSize::default(),
            minimized,
        });
        id
    }

    #[test]
    fn focus_restores_and_raises_above_everything() {
        let mut state = SessionState::default();
        let first = push(&mut state, AppId::Finder, true);
        let second = push(&mut state, AppId::Calculator, false);

        assert_eq!(focus_window_internal(&mut state, first), Some(true));
        let window = state.window(first).expect("window");
        assert!(!window.minimized);
        assert_eq!(Some(window.z_index), state.top_z_index());
        assert!(window.z_index > state.window(second).expect("second").z_index);
        assert_eq!(state.focused_window_id, Some(first));
    }

    #[test]
    fn focus_of_missing_window_changes_nothing() {
        let mut state = SessionState::default();
        push(&mut state, AppId::Finder, false);
        let before = state.clone();
        assert_eq!(focus_window_internal(&mut state, WindowId(99)), None);
        assert_eq!(state, before);
    }

    #[test]
    fn refocus_skips_minimized_windows_even_when_higher() {
        let mut state = SessionState::default();
        let low = push(&mut state, AppId::Finder, false);
        push(&mut state, AppId::Terminal, true);

        assert_eq!(refocus_topmost(&mut state), Some(low));
        assert_eq!(state.focused_window_id, Some(low));
    }

    #[test]
    fn refocus_clears_focus_when_nothing_is_visible() {
        let mut state = SessionState::default();
        let only = push(&mut state, AppId::Finder, true);
        state.focused_window_id = Some(only);

        assert_eq!(refocus_topmost(&mut state), None);
        assert_eq!(state.focused_window_id, None);
    }

    #[test]
    fn preferred_window_prefers_visible_instances() {
        let mut state = SessionState::default();
        let visible = push(&mut state, AppId::Finder, false);
        let minimized = push(&mut state, AppId::Finder, true);

        assert_eq!(preferred_window_for_app(&state, AppId::Finder), Some(visible));
        state.windows.retain(|w| w.id != visible);
        assert_eq!(preferred_window_for_app(&state, AppId::Finder), Some(minimized));
        assert_eq!(preferred_window_for_app(&state, AppId::Messages), None);
    }

    #[test]
    fn normalize_focus_drops_stale_and_minimized_targets() {
        let mut state = SessionState::default();
        let id = push(&mut state, AppId::Finder, true);
        state.focused_window_id = Some(id);
        normalize_focus(&mut state);
        assert_eq!(state.focused_window_id, None);

        state.focused_window_id = Some(WindowId(404));
        normalize_focus(&mut state);
        assert_eq!(state.focused_window_id, None);
    }
}
