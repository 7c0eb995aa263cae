//! Session core of the desktop shell.
//!
//! [`session::SessionManager`] owns the window list, focus and stacking order. Everything the
//! shell draws is derived from its state: the menu bar ([`menu_bar`]), the dock ([`dock`]) and
//! the desktop icons ([`desktop`]). [`runtime_context`] exposes the session to Leptos views.

pub mod apps;
pub mod config;
pub mod desktop;
pub mod dock;
pub mod menu_bar;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod session;
mod window_manager;

pub use apps::{AppDescriptor, AppRegistry, RegistryError};
pub use config::{CascadeConfig, ConfigError, SessionConfig};
pub use desktop::{desktop_icon, desktop_icons, DesktopIcon, DesktopIconKind};
pub use dock::{dock_items, DockItem, DockItemKind};
pub use menu_bar::{derive_menu_bar, MenuBarBinding, MenuBarModel};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, SessionEvent};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use session::{SessionListener, SessionManager, SubscriptionId};
