//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! Apps never touch session state directly. They describe their global menu-bar content as
//! plain data ([`MenuBarMenu`]) built against a [`MenuContext`], and every actionable entry
//! carries a [`MenuCommand`] that the runtime executes on their behalf.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Width used when neither the request nor the app manifest sizes a window.
pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
/// Height used when neither the request nor the app manifest sizes a window.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

/// Outer window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl WindowSize {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when both dimensions are greater than zero.
    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    }
}

/// Closed set of desktop applications the window manager can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppId {
    /// File browser. Also the shell default identity when nothing is focused.
    Finder,
    /// Four-function calculator.
    Calculator,
    /// Plain text editor.
    TextEditor,
    /// System settings panel.
    Settings,
    /// Messaging placeholder.
    Messages,
    /// Terminal placeholder.
    Terminal,
    /// System information panel opened from the system menu. Ships no manifest.
    #[serde(rename = "about-this-mac")]
    AboutThisMac,
}

impl AppId {
    /// Every known app. Manifest-backed apps come first, in dock order.
    pub const ALL: [AppId; 7] = [
        Self::Finder,
        Self::Messages,
        Self::Settings,
        Self::Calculator,
        Self::TextEditor,
        Self::Terminal,
        Self::AboutThisMac,
    ];

    /// Returns the stable string key used in manifests, deep links and logs.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Finder => "finder",
            Self::Calculator => "calculator",
            Self::TextEditor => "texteditor",
            Self::Settings => "settings",
            Self::Messages => "messages",
            Self::Terminal => "terminal",
            Self::AboutThisMac => "about-this-mac",
        }
    }

    /// Built-in display name, used when no registry descriptor is available.
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::Calculator => "Calculator",
            Self::TextEditor => "TextEdit",
            Self::Settings => "System Settings",
            Self::Messages => "Messages",
            Self::Terminal => "Terminal",
            Self::AboutThisMac => "About This Mac",
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown application id `{0}`")]
/// Returned when a string key does not name a known [`AppId`].
pub struct ParseAppIdError(pub String);

impl FromStr for AppId {
    type Err = ParseAppIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|app| app.key() == raw)
            .ok_or_else(|| ParseAppIdError(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Intent attached to an actionable menu entry, executed by the window manager.
pub enum MenuCommand {
    /// Open a new window for an app.
    OpenApp {
        /// App to open.
        app_id: AppId,
        /// Optional window title override.
        title: Option<String>,
        /// Optional explicit window size.
        #[serde(default)]
        size: Option<WindowSize>,
    },
    /// Close a specific window.
    CloseWindow {
        /// Window to close.
        window_id: WindowRuntimeId,
    },
    /// Mock action with no session effect; the runtime only logs it.
    Mock {
        /// Human-readable action path, for example `Finder > Copy`.
        action: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry in a menu-bar dropdown.
pub enum MenuItem {
    /// Clickable entry.
    Action {
        /// Entry label.
        label: String,
        /// Keyboard shortcut hint, display only.
        shortcut: Option<String>,
        /// Command to run when clicked. `None` renders the entry inert.
        command: Option<MenuCommand>,
        /// Disabled entries render greyed out and never run their command.
        disabled: bool,
    },
    /// Nested submenu.
    Submenu {
        /// Submenu label.
        label: String,
        /// Nested entries.
        items: Vec<MenuItem>,
    },
    /// Visual separator.
    Separator,
}

impl MenuItem {
    /// Creates an enabled entry that runs `command`.
    pub fn action(label: impl Into<String>, command: MenuCommand) -> Self {
        Self::Action {
            label: label.into(),
            shortcut: None,
            command: Some(command),
            disabled: false,
        }
    }

    /// Creates an enabled entry without a command.
    pub fn inert(label: impl Into<String>) -> Self {
        Self::Action {
            label: label.into(),
            shortcut: None,
            command: None,
            disabled: false,
        }
    }

    /// Creates a disabled entry.
    pub fn disabled(label: impl Into<String>) -> Self {
        Self::Action {
            label: label.into(),
            shortcut: None,
            command: None,
            disabled: true,
        }
    }

    /// Creates an entry for a mock action named `action`.
    pub fn mock(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self::action(
            label,
            MenuCommand::Mock {
                action: action.into(),
            },
        )
    }

    /// Attaches a shortcut hint. No effect on separators and submenus.
    pub fn with_shortcut(mut self, hint: impl Into<String>) -> Self {
        if let Self::Action { shortcut, .. } = &mut self {
            *shortcut = Some(hint.into());
        }
        self
    }

    /// Returns the entry label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Action { label, .. } | Self::Submenu { label, .. } => Some(label),
            Self::Separator => None,
        }
    }

    /// Returns the command this entry would run when clicked.
    pub fn command(&self) -> Option<&MenuCommand> {
        match self {
            Self::Action {
                command: Some(command),
                disabled: false,
                ..
            } => Some(command),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Top-level menu-bar entry (`File`, `Edit`, ...).
pub struct MenuBarMenu {
    /// Label shown in the menu bar.
    pub label: String,
    /// Dropdown entries.
    pub items: Vec<MenuItem>,
}

impl MenuBarMenu {
    /// Creates a top-level menu.
    pub fn new(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// Finds the first entry labelled `label`, searching submenus depth-first.
    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        fn walk<'a>(items: &'a [MenuItem], label: &str) -> Option<&'a MenuItem> {
            items.iter().find_map(|item| match item {
                MenuItem::Submenu { items, .. } => walk(items, label),
                other if other.label() == Some(label) => Some(other),
                _ => None,
            })
        }
        walk(&self.items, label)
    }
}

/// Action-dispatch context handed to an app's menu factory.
///
/// The context is a snapshot taken at derive time. Commands minted from it reference the
/// window that was focused when the menu bar was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuContext {
    /// Window focused when the menu bar was derived.
    pub active_window_id: Option<WindowRuntimeId>,
}

impl MenuContext {
    /// Creates a context for `active_window_id`.
    pub const fn new(active_window_id: Option<WindowRuntimeId>) -> Self {
        Self { active_window_id }
    }

    /// Command that opens a new window for `app_id`.
    pub fn open_app(&self, app_id: AppId, title: Option<&str>) -> MenuCommand {
        MenuCommand::OpenApp {
            app_id,
            title: title.map(str::to_string),
            size: None,
        }
    }

    /// Command that opens a new window for `app_id` with an explicit `size`.
    pub fn open_app_sized(
        &self,
        app_id: AppId,
        title: Option<&str>,
        size: WindowSize,
    ) -> MenuCommand {
        MenuCommand::OpenApp {
            app_id,
            title: title.map(str::to_string),
            size: Some(size),
        }
    }

    /// Command that closes `window_id`.
    pub fn close_window(&self, window_id: WindowRuntimeId) -> MenuCommand {
        MenuCommand::CloseWindow { window_id }
    }

    /// `Close Window` entry bound to the active window, disabled when nothing is focused.
    pub fn close_active_window_item(&self) -> MenuItem {
        match self.active_window_id {
            Some(window_id) => {
                MenuItem::action("Close Window", self.close_window(window_id)).with_shortcut("⌘W")
            }
            None => MenuItem::disabled("Close Window"),
        }
    }
}

/// Pure function from a dispatch context to an app's menu-bar content.
pub type MenuFactory = fn(&MenuContext) -> Vec<MenuBarMenu>;
