use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    schema_version: u32,
    app_id: String,
    display_name: String,
    icon_id: String,
    show_in_dock: bool,
    window_defaults: Option<WindowDefaults>,
}

// Listed in dock order; the generated catalog keeps this order.
const MANIFEST_NAMES: [&str; 6] = [
    "finder",
    "messages",
    "settings",
    "calculator",
    "texteditor",
    "terminal",
];

fn app_manifest_paths(root: &Path) -> Vec<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|name| root.join("manifests").join(format!("{name}.toml")))
        .collect()
}

fn validate(path: &Path, manifest: &AppManifest) {
    if manifest.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if manifest.app_id != stem {
        panic!(
            "manifest app id mismatch in {}: file is `{stem}` but app_id is `{}`",
            path.display(),
            manifest.app_id
        );
    }
    if manifest.display_name.trim().is_empty() || manifest.icon_id.trim().is_empty() {
        panic!("manifest {} has an empty display_name or icon_id", path.display());
    }
    if let Some(defaults) = &manifest.window_defaults {
        if defaults.width <= 0 || defaults.height <= 0 {
            panic!(
                "manifest {} has non-positive window defaults {}x{}",
                path.display(),
                defaults.width,
                defaults.height
            );
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<AppManifest>::new();

    for path in app_manifest_paths(&crate_root) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: AppManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        validate(&path, &manifest);
        manifests.push(manifest);
    }

    let json = serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
