//! Reducer actions, change events, and transition logic for the desktop session.

use desktop_app_contract::AppId;
use thiserror::Error;

use crate::{
    apps::AppRegistry,
    config::SessionConfig,
    model::{OpenWindowRequest, SessionState, WindowId, WindowRecord},
    window_manager::{
        focus_window_internal, next_window_id, next_z_index, normalize_focus,
        preferred_window_for_app, refocus_topmost,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`SessionState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Replace the title of a window, as requested by the hosted app.
    SetWindowTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title text.
        title: String,
    },
    /// Dock click: bring forward an existing instance of the app, or open one.
    ActivateApp {
        /// App whose dock item was clicked.
        app_id: AppId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a successful [`reduce_desktop`] call changed, in the order it happened.
pub enum SessionEvent {
    /// A window was added to the session.
    WindowOpened {
        /// New window.
        window_id: WindowId,
        /// App hosted by the window.
        app_id: AppId,
    },
    /// A window was removed from the session.
    WindowClosed {
        /// Removed window.
        window_id: WindowId,
        /// App hosted by the window.
        app_id: AppId,
    },
    /// A window was minimized.
    WindowMinimized {
        /// Minimized window.
        window_id: WindowId,
    },
    /// A minimized window was brought back.
    WindowRestored {
        /// Restored window.
        window_id: WindowId,
    },
    /// A window received a fresh top z-index.
    WindowRaised {
        /// Raised window.
        window_id: WindowId,
        /// Its new z-index.
        z_index: u64,
    },
    /// A window's title changed.
    TitleChanged {
        /// Retitled window.
        window_id: WindowId,
    },
    /// The focused window changed. `None` means the shell default is active.
    FocusChanged {
        /// Previously focused window.
        from: Option<WindowId>,
        /// Newly focused window.
        to: Option<WindowId>,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply. All of them leave the state untouched.
pub enum ReducerError {
    /// The app has no registry descriptor and the request carried no explicit size.
    #[error("no descriptor registered for app `{0}`")]
    UnknownApp(AppId),
    /// The target window id was not found in the current state.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),
}

/// Applies a [`DesktopAction`] to the session state and reports what changed.
///
/// This function is the authoritative state transition engine for window management. An
/// empty event list means the action was a no-op.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownApp`] when an open request names an app that cannot be
/// opened, and [`ReducerError::WindowNotFound`] when focus, minimize or retitle target a
/// window that is not present. Closing an absent window is not an error.
pub fn reduce_desktop(
    state: &mut SessionState,
    registry: &AppRegistry,
    config: &SessionConfig,
    action: DesktopAction,
) -> Result<Vec<SessionEvent>, ReducerError> {
    let mut events = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let descriptor = registry.lookup(req.app_id);
            if descriptor.is_none() && req.size.is_none() {
                return Err(ReducerError::UnknownApp(req.app_id));
            }

            let window_id = next_window_id(state);
            let title = req
                .title
                .or_else(|| descriptor.map(|d| d.title.clone()))
                .unwrap_or_else(|| req.app_id.default_title().to_string());
            let icon_id = descriptor
                .map(|d| d.icon_id.clone())
                .unwrap_or_else(|| req.app_id.key().to_string());
            let size = req
                .size
                .or_else(|| descriptor.and_then(|d| d.default_size))
                .unwrap_or(config.fallback_size);
            let position = req
                .position
                .unwrap_or_else(|| config.cascade.position_for(state.windows.len()));
            let z_index = next_z_index(state);

            state.windows.push(WindowRecord {
                id: window_id,
                app_id: req.app_id,
                title,
                icon_id,
                z_index,
                position,
                size,
                minimized: false,
            });
            events.push(SessionEvent::WindowOpened {
                window_id,
                app_id: req.app_id,
            });

            // The new window already holds the highest z-index.
            let previous = state.focused_window_id.replace(window_id);
            events.push(SessionEvent::FocusChanged {
                from: previous,
                to: Some(window_id),
            });
        }
        DesktopAction::CloseWindow { window_id } => {
            let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
                return Ok(events);
            };
            let removed = state.windows.remove(index);
            events.push(SessionEvent::WindowClosed {
                window_id,
                app_id: removed.app_id,
            });
            if state.focused_window_id == Some(window_id) {
                push_refocus(state, window_id, &mut events);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            let previous = state.focused_window_id;
            let restored = focus_window_internal(state, window_id)
                .ok_or(ReducerError::WindowNotFound(window_id))?;
            if restored {
                events.push(SessionEvent::WindowRestored { window_id });
            }
            events.push(raised(state, window_id));
            if previous != Some(window_id) {
                events.push(SessionEvent::FocusChanged {
                    from: previous,
                    to: Some(window_id),
                });
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            if window.minimized {
                return Ok(events);
            }
            window.minimized = true;
            events.push(SessionEvent::WindowMinimized { window_id });
            if state.focused_window_id == Some(window_id) {
                push_refocus(state, window_id, &mut events);
            }
        }
        DesktopAction::SetWindowTitle { window_id, title } => {
            let window = find_window_mut(state, window_id)?;
            if window.title != title {
                window.title = title;
                events.push(SessionEvent::TitleChanged { window_id });
            }
        }
        DesktopAction::ActivateApp { app_id } => {
            let next = match preferred_window_for_app(state, app_id) {
                Some(window_id) => DesktopAction::FocusWindow { window_id },
                None => DesktopAction::OpenWindow(OpenWindowRequest::new(app_id)),
            };
            events = reduce_desktop(state, registry, config, next)?;
        }
    }

    normalize_focus(state);
    Ok(events)
}

fn push_refocus(state: &mut SessionState, lost: WindowId, events: &mut Vec<SessionEvent>) {
    let next = refocus_topmost(state);
    if let Some(window_id) = next {
        events.push(raised(state, window_id));
    }
    events.push(SessionEvent::FocusChanged {
        from: Some(lost),
        to: next,
    });
}

fn raised(state: &SessionState, window_id: WindowId) -> SessionEvent {
    SessionEvent::WindowRaised {
        window_id,
        z_index: state.window(window_id).map(|w| w.z_index).unwrap_or_default(),
    }
}

fn find_window_mut(
    state: &mut SessionState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}
