//! Runtime provider and context wiring for the desktop shell.
//!
//! The [`SessionManager`] lives in a stored value and stays the only writer of session state.
//! Every dispatch mirrors the settled state into a signal, and the menu bar and dock are memos
//! over that signal so views re-render only when their projection actually changed.
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use desktop_app_contract::MenuCommand;
use leptos::*;

use crate::{
    apps::AppRegistry,
    config::SessionConfig,
    dock::{dock_items, DockItem},
    menu_bar::{derive_menu_bar, MenuBarModel},
    model::{OpenWindowRequest, SessionState, WindowId},
    reducer::DesktopAction,
    session::SessionManager,
};

#[derive(Clone, Copy)]
/// Leptos context for reading session state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Owning session manager.
    pub session: StoredValue<SessionManager>,
    /// Reactive mirror of the settled session state.
    pub state: RwSignal<SessionState>,
    /// Menu bar derived from the focused window.
    pub menu_bar: Memo<MenuBarModel>,
    /// Dock entries with running indicators.
    pub dock: Memo<Vec<DockItem>>,
    /// Session dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Builds the runtime inside the current reactive owner.
    pub fn new(registry: Rc<AppRegistry>, config: SessionConfig) -> Self {
        let session = SessionManager::new(registry.clone(), config.clone());
        let state = create_rw_signal(session.state().clone());
        let session = store_value(session);

        let menu_registry = registry.clone();
        let menu_bar = create_memo(move |_| {
            state.with(|state| derive_menu_bar(state, &menu_registry, &config))
        });
        let dock = create_memo(move |_| state.with(|state| dock_items(state, &registry)));

        // The signal is written outside the stored-value borrow so dependents may read the
        // session while they re-run.
        let dispatch = Callback::new(move |action: DesktopAction| {
            let settled = session
                .try_update_value(|manager| {
                    let events = manager.dispatch(action);
                    (!events.is_empty()).then(|| manager.state().clone())
                })
                .flatten();
            if let Some(next) = settled {
                state.set(next);
            }
        });

        Self {
            session,
            state,
            menu_bar,
            dock,
            dispatch,
        }
    }

    /// Dispatches a session action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Runs a menu-bar command against the session.
    pub fn run_menu_command(&self, command: MenuCommand) {
        match command {
            MenuCommand::OpenApp {
                app_id,
                title,
                size,
            } => {
                let mut request = OpenWindowRequest::new(app_id);
                request.title = title;
                request.size = size;
                self.dispatch_action(DesktopAction::OpenWindow(request));
            }
            MenuCommand::CloseWindow { window_id } => {
                self.dispatch_action(DesktopAction::CloseWindow {
                    window_id: WindowId(window_id),
                });
            }
            MenuCommand::Mock { action } => logging::log!("menu action `{action}` (mock)"),
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// App registry shared with the session.
    registry: Rc<AppRegistry>,
    /// Session tunables; defaults apply when omitted.
    #[prop(optional)]
    config: Option<SessionConfig>,
    children: Children,
) -> impl IntoView {
    let runtime = DesktopRuntimeContext::new(registry, config.unwrap_or_default());
    provide_context(runtime.clone());
    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn runtime() -> DesktopRuntimeContext {
        let registry = AppRegistry::builtin().expect("builtin registry");
        DesktopRuntimeContext::new(Rc::new(registry), SessionConfig::default())
    }

    #[test]
    fn dispatch_mirrors_state_and_projections() {
        let reactive = create_runtime();
        let runtime = runtime();
        assert_eq!(runtime.menu_bar.get_untracked().active_title, "Finder");

        runtime.dispatch_action(DesktopAction::OpenWindow(OpenWindowRequest::new(
            AppId::Calculator,
        )));

        let state = runtime.state.get_untracked();
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state, runtime.session.with_value(|s| s.state().clone()));
        assert_eq!(runtime.menu_bar.get_untracked().active_title, "Calculator");
        let running: Vec<AppId> = runtime
            .dock
            .get_untracked()
            .into_iter()
            .filter(|item| item.running)
            .filter_map(|item| item.app_id())
            .collect();
        assert_eq!(running, vec![AppId::Calculator]);

        reactive.dispose();
    }

    #[test]
    fn rejected_actions_leave_the_signal_untouched() {
        let reactive = create_runtime();
        let runtime = runtime();
        let before = runtime.state.get_untracked();

        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: WindowId(42),
        });

        assert_eq!(runtime.state.get_untracked(), before);
        reactive.dispose();
    }

    #[test]
    fn menu_commands_round_trip_through_dispatch() {
        let reactive = create_runtime();
        let runtime = runtime();
        runtime.run_menu_command(MenuCommand::OpenApp {
            app_id: AppId::TextEditor,
            title: Some("Untitled".to_string()),
            size: None,
        });
        let id = runtime
            .state
            .get_untracked()
            .focused_window_id
            .expect("focused");

        runtime.run_menu_command(MenuCommand::CloseWindow {
            window_id: id.runtime_id(),
        });
        assert!(runtime.state.get_untracked().windows.is_empty());
        reactive.dispose();
    }
}
