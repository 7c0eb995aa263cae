//! Global menu-bar projection.
//!
//! The menu bar has no state of its own: [`derive_menu_bar`] recomputes it from the session
//! every time, so menus minted for a previously focused window are never reused.

use desktop_app_contract::{AppId, MenuBarMenu, MenuContext};

use crate::{
    apps::{fallback_menus, system_menu, AppRegistry},
    config::SessionConfig,
    model::{SessionState, WindowId},
    session::{SessionManager, SubscriptionId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBarModel {
    /// App whose identity the menu bar currently shows.
    pub active_app: AppId,
    /// Focused window title, or the shell default's title.
    pub active_title: String,
    pub active_window_id: Option<WindowId>,
    pub system_menu: MenuBarMenu,
    pub menus: Vec<MenuBarMenu>,
}

pub fn derive_menu_bar(
    state: &SessionState,
    registry: &AppRegistry,
    config: &SessionConfig,
) -> MenuBarModel {
    let focused = state.focused_window();
    let ctx = MenuContext::new(focused.map(|w| w.id.runtime_id()));

    let (active_app, active_title) = match focused {
        Some(window) => (window.app_id, window.title.clone()),
        None => {
            let shell = config.shell_app;
            let title = registry
                .lookup(shell)
                .map(|d| d.title.clone())
                .unwrap_or_else(|| shell.default_title().to_string());
            (shell, title)
        }
    };

    let menus = registry
        .lookup(active_app)
        .map(|descriptor| descriptor.menus(&ctx))
        .filter(|menus| !menus.is_empty())
        .unwrap_or_else(fallback_menus);

    MenuBarModel {
        active_app,
        active_title,
        active_window_id: focused.map(|w| w.id),
        system_menu: system_menu(&ctx),
        menus,
    }
}

/// Keeps a menu-bar view in sync with a session through its change notifications.
pub struct MenuBarBinding;

impl MenuBarBinding {
    /// Pushes the current menu bar into `sink`, then a freshly derived one after every change.
    pub fn attach(
        session: &mut SessionManager,
        mut sink: impl FnMut(MenuBarModel) + 'static,
    ) -> SubscriptionId {
        let registry = session.registry().clone();
        let config = session.config().clone();
        sink(derive_menu_bar(session.state(), &registry, &config));
        session.subscribe(move |state, _| sink(derive_menu_bar(state, &registry, &config)))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use desktop_app_contract::{MenuCommand, MenuItem};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::OpenWindowRequest;

    fn session() -> SessionManager {
        let registry = AppRegistry::builtin().expect("builtin registry");
        SessionManager::new(Rc::new(registry), SessionConfig::default())
    }

    #[test]
    fn idle_session_shows_the_shell_default() {
        let session = session();
        let model = session.menu_bar();
        assert_eq!(model.active_app, AppId::Finder);
        assert_eq!(model.active_title, "Finder");
        assert_eq!(model.active_window_id, None);
        assert_eq!(
            model.menus[0].find("Close Window").and_then(MenuItem::command),
            None
        );
    }

    #[test]
    fn focused_window_title_wins_over_app_title() {
        let mut session = session();
        session.open(OpenWindowRequest::new(AppId::TextEditor).with_title("Project Plan.txt"));
        let model = session.menu_bar();
        assert_eq!(model.active_app, AppId::TextEditor);
        assert_eq!(model.active_title, "Project Plan.txt");
        assert_eq!(model.menus[1].label, "Edit");
    }

    #[test]
    fn unregistered_focus_gets_fallback_menus() {
        let registry = AppRegistry::default();
        let mut session = SessionManager::new(Rc::new(registry), SessionConfig::default());
        session.open(OpenWindowRequest::new(AppId::Messages).sized(Default::default()));

        let model = session.menu_bar();
        assert_eq!(model.active_title, "Messages");
        assert_eq!(model.menus, fallback_menus());
    }

    #[test]
    fn binding_rederives_on_every_focus_change() {
        let mut session = session();
        let titles = Rc::new(RefCell::new(Vec::new()));
        let commands = Rc::new(RefCell::new(Vec::new()));
        let (title_sink, command_sink) = (titles.clone(), commands.clone());
        MenuBarBinding::attach(&mut session, move |model| {
            title_sink.borrow_mut().push(model.active_title.clone());
            command_sink.borrow_mut().push(
                model.menus[0]
                    .find("Close Window")
                    .and_then(MenuItem::command)
                    .cloned(),
            );
        });

        let first = session.open_app(AppId::Finder).expect("open finder");
        let second = session.open_app(AppId::Calculator).expect("open calculator");
        session.focus(first);
        session.close(first);
        session.close(second);

        assert_eq!(
            *titles.borrow(),
            vec!["Finder", "Finder", "Calculator", "Finder", "Calculator", "Finder"]
        );
        assert_eq!(
            *commands.borrow(),
            vec![
                None,
                Some(MenuCommand::CloseWindow {
                    window_id: first.runtime_id()
                }),
                None,
                Some(MenuCommand::CloseWindow {
                    window_id: first.runtime_id()
                }),
                None,
                None,
            ]
        );
    }
}
