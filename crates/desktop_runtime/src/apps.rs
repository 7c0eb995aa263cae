use std::fmt;

use desktop_app_contract::{AppId, MenuBarMenu, MenuContext, MenuFactory, ParseAppIdError};
use serde::Deserialize;
use thiserror::Error;

use crate::model::WindowSize;

mod menus;

pub use menus::{fallback_menus, system_menu};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("app catalog is malformed: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownApp(#[from] ParseAppIdError),
    #[error("app `{0}` appears more than once in the catalog")]
    DuplicateApp(AppId),
    #[error("app `{0}` is not registered")]
    NotRegistered(AppId),
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    app_id: String,
    display_name: String,
    icon_id: String,
    #[serde(default)]
    show_in_dock: bool,
    #[serde(default)]
    window_defaults: Option<WindowSize>,
}

/// Static metadata for an installable app.
#[derive(Clone)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: String,
    pub icon_id: String,
    pub default_size: Option<WindowSize>,
    pub show_in_dock: bool,
    pub menu_factory: MenuFactory,
}

impl AppDescriptor {
    pub fn menus(&self, ctx: &MenuContext) -> Vec<MenuBarMenu> {
        (self.menu_factory)(ctx)
    }
}

impl fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("app_id", &self.app_id)
            .field("title", &self.title)
            .field("icon_id", &self.icon_id)
            .field("default_size", &self.default_size)
            .field("show_in_dock", &self.show_in_dock)
            .finish_non_exhaustive()
    }
}

impl TryFrom<CatalogEntry> for AppDescriptor {
    type Error = RegistryError;

    fn try_from(entry: CatalogEntry) -> Result<Self, Self::Error> {
        let app_id: AppId = entry.app_id.parse()?;
        Ok(Self {
            app_id,
            title: entry.display_name,
            icon_id: entry.icon_id,
            default_size: entry.window_defaults.filter(|size| size.is_positive()),
            show_in_dock: entry.show_in_dock,
            menu_factory: menus::menu_factory_for(app_id),
        })
    }
}

/// Immutable app directory consumed by the session manager.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    descriptors: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Registry built from the manifests compiled into this crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_catalog_json(APP_MANIFEST_CATALOG_JSON)
    }

    pub fn from_catalog_json(raw: &str) -> Result<Self, RegistryError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
        let descriptors = entries
            .into_iter()
            .map(AppDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_descriptors(descriptors)
    }

    pub fn from_descriptors(descriptors: Vec<AppDescriptor>) -> Result<Self, RegistryError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptors[..index]
                .iter()
                .any(|seen| seen.app_id == descriptor.app_id)
            {
                return Err(RegistryError::DuplicateApp(descriptor.app_id));
            }
        }
        Ok(Self { descriptors })
    }

    pub fn lookup(&self, app_id: AppId) -> Option<&AppDescriptor> {
        self.descriptors.iter().find(|entry| entry.app_id == app_id)
    }

    pub fn lookup_key(&self, key: &str) -> Result<&AppDescriptor, RegistryError> {
        let app_id: AppId = key.parse()?;
        self.lookup(app_id)
            .ok_or(RegistryError::NotRegistered(app_id))
    }

    pub fn dock_apps(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.descriptors.iter().filter(|entry| entry.show_in_dock)
    }
}
