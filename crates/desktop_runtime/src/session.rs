//! The session manager: sole owner and mutator of [`SessionState`].
//!
//! Every operation runs the reducer to completion, then notifies subscribers with the settled
//! state and the events it produced. Invalid requests (unknown apps, stale window ids) are
//! logged and otherwise ignored; nothing is returned to the caller as an error.

use std::{collections::BTreeSet, fmt, rc::Rc};

use desktop_app_contract::{AppId, MenuCommand};
use leptos::logging;

use crate::{
    apps::AppRegistry,
    config::SessionConfig,
    desktop,
    dock::{DockItem, DockItemKind},
    menu_bar::{derive_menu_bar, MenuBarModel},
    model::{OpenWindowRequest, SessionState, WindowId, WindowRecord},
    reducer::{reduce_desktop, DesktopAction, ReducerError, SessionEvent},
};

/// Callback invoked after every state-changing operation.
pub type SessionListener = Box<dyn FnMut(&SessionState, &[SessionEvent])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct SessionManager {
    registry: Rc<AppRegistry>,
    config: SessionConfig,
    state: SessionState,
    listeners: Vec<(SubscriptionId, SessionListener)>,
    next_subscription: u64,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(registry: Rc<AppRegistry>, config: SessionConfig) -> Self {
        Self {
            registry,
            state: SessionState::new(config.initial_z_index),
            config,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn registry(&self) -> &Rc<AppRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Runs `action` through the reducer and notifies subscribers when anything changed.
    ///
    /// Returns the produced events; empty when the action was a no-op or was rejected.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<SessionEvent> {
        match reduce_desktop(&mut self.state, &self.registry, &self.config, action) {
            Ok(events) => {
                if !events.is_empty() {
                    for (_, listener) in self.listeners.iter_mut() {
                        listener(&self.state, &events);
                    }
                }
                events
            }
            Err(err @ ReducerError::UnknownApp(_)) => {
                logging::warn!("desktop open declined: {err}");
                Vec::new()
            }
            Err(err @ ReducerError::WindowNotFound(_)) => {
                logging::debug_warn!("desktop action ignored: {err}");
                Vec::new()
            }
        }
    }

    pub fn open(&mut self, request: OpenWindowRequest) -> Option<WindowId> {
        opened_window(&self.dispatch(DesktopAction::OpenWindow(request)))
    }

    pub fn open_app(&mut self, app_id: AppId) -> Option<WindowId> {
        self.open(OpenWindowRequest::new(app_id))
    }

    /// Opens an app named by its string key, declining unknown keys.
    pub fn open_by_key(&mut self, key: &str, title: Option<&str>) -> Option<WindowId> {
        let app_id = match key.parse::<AppId>() {
            Ok(app_id) => app_id,
            Err(err) => {
                logging::warn!("desktop open declined: {err}");
                return None;
            }
        };
        let mut request = OpenWindowRequest::new(app_id);
        request.title = title.map(str::to_string);
        self.open(request)
    }

    /// Opens the window behind a desktop icon, see [`desktop::open_request_for_icon`].
    pub fn open_desktop_icon(&mut self, icon_id: &str) -> Option<WindowId> {
        let Some(icon) = desktop::desktop_icon(icon_id) else {
            logging::warn!("desktop icon `{icon_id}` does not exist");
            return None;
        };
        let request = desktop::open_request_for_icon(icon, &self.registry);
        self.open(request)
    }

    pub fn close(&mut self, window_id: WindowId) {
        self.dispatch(DesktopAction::CloseWindow { window_id });
    }

    pub fn focus(&mut self, window_id: WindowId) {
        self.dispatch(DesktopAction::FocusWindow { window_id });
    }

    pub fn minimize(&mut self, window_id: WindowId) {
        self.dispatch(DesktopAction::MinimizeWindow { window_id });
    }

    pub fn set_window_title(&mut self, window_id: WindowId, title: impl Into<String>) {
        self.dispatch(DesktopAction::SetWindowTitle {
            window_id,
            title: title.into(),
        });
    }

    /// Dock click. Returns the window that ends up focused.
    pub fn activate_app(&mut self, app_id: AppId) -> Option<WindowId> {
        self.dispatch(DesktopAction::ActivateApp { app_id });
        self.state
            .focused_window()
            .filter(|w| w.app_id == app_id)
            .map(|w| w.id)
    }

    /// Click on a dock item. The trash has no window behind it and only logs.
    pub fn click_dock_item(&mut self, item: &DockItem) -> Option<WindowId> {
        match item.kind {
            DockItemKind::App(app_id) => self.activate_app(app_id),
            DockItemKind::Trash => {
                logging::log!("dock item `trash` clicked (mock)");
                None
            }
        }
    }

    /// Executes a command picked from the menu bar.
    pub fn run_menu_command(&mut self, command: &MenuCommand) {
        match command {
            MenuCommand::OpenApp {
                app_id,
                title,
                size,
            } => {
                let mut request = OpenWindowRequest::new(*app_id);
                request.title = title.clone();
                request.size = *size;
                self.open(request);
            }
            MenuCommand::CloseWindow { window_id } => self.close(WindowId(*window_id)),
            MenuCommand::Mock { action } => logging::log!("menu action `{action}` (mock)"),
        }
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.state.windows
    }

    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        self.state.visible_windows()
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.state.focused_window_id
    }

    pub fn running_app_ids(&self) -> BTreeSet<AppId> {
        self.state.running_app_ids()
    }

    pub fn menu_bar(&self) -> MenuBarModel {
        derive_menu_bar(&self.state, &self.registry, &self.config)
    }

    /// Registers `listener` for change notifications.
    ///
    /// Listeners run synchronously, in subscription order, after each operation that changed
    /// the session. They only see the settled state.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SessionState, &[SessionEvent]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

fn opened_window(events: &[SessionEvent]) -> Option<WindowId> {
    events.iter().find_map(|event| match event {
        SessionEvent::WindowOpened { window_id, .. } => Some(*window_id),
        _ => None,
    })
}
