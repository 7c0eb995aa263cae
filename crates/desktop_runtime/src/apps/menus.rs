//! Menu-bar content for the built-in apps and the shell.

use desktop_app_contract::{AppId, MenuBarMenu, MenuContext, MenuFactory, MenuItem, WindowSize};

const ABOUT_WINDOW_SIZE: WindowSize = WindowSize::new(500, 300);

pub(crate) fn menu_factory_for(app_id: AppId) -> MenuFactory {
    match app_id {
        AppId::Finder => finder_menus,
        AppId::Calculator => calculator_menus,
        AppId::TextEditor => text_editor_menus,
        AppId::Settings => settings_menus,
        AppId::Messages => messages_menus,
        AppId::Terminal => terminal_menus,
        AppId::AboutThisMac => no_menus,
    }
}

/// Menus shown for a focused app that contributes no menu content of its own.
pub fn fallback_menus() -> Vec<MenuBarMenu> {
    vec![MenuBarMenu::new(
        "File",
        vec![MenuItem::disabled("No actions available")],
    )]
}

/// The system menu at the left edge of the menu bar, independent of focus.
pub fn system_menu(ctx: &MenuContext) -> MenuBarMenu {
    MenuBarMenu::new(
        "System",
        vec![
            MenuItem::action(
                "About This Mac",
                ctx.open_app_sized(AppId::AboutThisMac, None, ABOUT_WINDOW_SIZE),
            ),
            MenuItem::Separator,
            MenuItem::action("System Settings...", ctx.open_app(AppId::Settings, None)),
            MenuItem::mock("App Store...", "System > App Store"),
            MenuItem::Separator,
            MenuItem::mock("Recent Items", "System > Recent Items"),
            MenuItem::Separator,
            MenuItem::mock("Force Quit...", "System > Force Quit"),
            MenuItem::Separator,
            MenuItem::mock("Sleep", "System > Sleep"),
            MenuItem::mock("Restart...", "System > Restart"),
            MenuItem::mock("Shut Down...", "System > Shut Down"),
            MenuItem::Separator,
            MenuItem::mock("Lock Screen", "System > Lock Screen"),
            MenuItem::mock("Log Out User...", "System > Log Out"),
        ],
    )
}

fn no_menus(_ctx: &MenuContext) -> Vec<MenuBarMenu> {
    Vec::new()
}

fn finder_menus(ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![
        MenuBarMenu::new(
            "File",
            vec![
                MenuItem::action("New Finder Window", ctx.open_app(AppId::Finder, None)),
                MenuItem::mock("Open...", "Finder > Open").with_shortcut("⌘O"),
                MenuItem::Separator,
                ctx.close_active_window_item(),
            ],
        ),
        MenuBarMenu::new(
            "Edit",
            vec![
                MenuItem::mock("Cut", "Finder > Cut").with_shortcut("⌘X"),
                MenuItem::mock("Copy", "Finder > Copy").with_shortcut("⌘C"),
                MenuItem::mock("Paste", "Finder > Paste").with_shortcut("⌘V"),
            ],
        ),
        MenuBarMenu::new(
            "View",
            vec![MenuItem::mock("as Icons", "Finder > View > as Icons")],
        ),
        MenuBarMenu::new("Go", vec![MenuItem::mock("Recents", "Finder > Go > Recents")]),
    ]
}

fn calculator_menus(_ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![
        MenuBarMenu::new(
            "File",
            vec![MenuItem::mock("Quit Calculator", "Calculator > Quit")],
        ),
        MenuBarMenu::new("Edit", vec![MenuItem::mock("Copy", "Calculator > Copy")]),
    ]
}

fn text_editor_menus(ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![
        MenuBarMenu::new(
            "File",
            vec![
                MenuItem::action("New", ctx.open_app(AppId::TextEditor, Some("Untitled")))
                    .with_shortcut("⌘N"),
                MenuItem::mock("Open...", "TextEdit > Open").with_shortcut("⌘O"),
                MenuItem::Separator,
                MenuItem::mock("Save", "TextEdit > Save").with_shortcut("⌘S"),
                MenuItem::Separator,
                ctx.close_active_window_item(),
            ],
        ),
        MenuBarMenu::new(
            "Edit",
            vec![MenuItem::mock("Undo", "TextEdit > Undo").with_shortcut("⌘Z")],
        ),
    ]
}

fn settings_menus(_ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![MenuBarMenu::new(
        "File",
        vec![MenuItem::mock("Close Settings", "Settings > Close")],
    )]
}

fn messages_menus(_ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![MenuBarMenu::new("File", vec![MenuItem::inert("New Message")])]
}

fn terminal_menus(_ctx: &MenuContext) -> Vec<MenuBarMenu> {
    vec![MenuBarMenu::new("Shell", vec![MenuItem::inert("New Window")])]
}
