//! Desktop icons on the wallpaper and what opening them does.

use desktop_app_contract::AppId;

use crate::{apps::AppRegistry, model::OpenWindowRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopIconKind {
    File,
    Folder,
    Drive,
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub id: &'static str,
    pub label: &'static str,
    pub icon_id: &'static str,
    pub kind: DesktopIconKind,
    pub target: Option<AppId>,
}

const DESKTOP_ICONS: [DesktopIcon; 4] = [
    DesktopIcon {
        id: "notes-txt",
        label: "Project Plan.txt",
        icon_id: "file-text",
        kind: DesktopIconKind::File,
        target: Some(AppId::TextEditor),
    },
    DesktopIcon {
        id: "mac-hd",
        label: "Macintosh HD",
        icon_id: "hard-drive",
        kind: DesktopIconKind::Drive,
        target: Some(AppId::Finder),
    },
    DesktopIcon {
        id: "apps-folder",
        label: "Applications",
        icon_id: "folder",
        kind: DesktopIconKind::Folder,
        target: Some(AppId::Finder),
    },
    DesktopIcon {
        id: "terminal-app",
        label: "Terminal",
        icon_id: "terminal",
        kind: DesktopIconKind::App,
        target: Some(AppId::Terminal),
    },
];

pub fn desktop_icons() -> &'static [DesktopIcon] {
    &DESKTOP_ICONS
}

pub fn desktop_icon(id: &str) -> Option<&'static DesktopIcon> {
    desktop_icons().iter().find(|icon| icon.id == id)
}

/// Builds the open request for double-clicking `icon`.
///
/// Files open in their target app titled after the file. Other icons whose target is
/// registered use the app's own title. Anything else opens a Finder window on the item.
pub fn open_request_for_icon(icon: &DesktopIcon, registry: &AppRegistry) -> OpenWindowRequest {
    match icon.target.and_then(|app_id| registry.lookup(app_id)) {
        Some(descriptor) => {
            let request = OpenWindowRequest::new(descriptor.app_id);
            if icon.kind == DesktopIconKind::File {
                request.with_title(icon.label)
            } else {
                request
            }
        }
        None => OpenWindowRequest::new(AppId::Finder).with_title(format!("Finder: {}", icon.label)),
    }
}
