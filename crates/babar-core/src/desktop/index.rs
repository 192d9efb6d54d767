use ahash::AHashMap;
use compact_str::CompactString;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::parser::{application_dirs, parse_desktop_file, DesktopEntry};
use crate::host::AppInfo;

/// Installed applications, keyed for window-to-app matching.
#[derive(Debug, Default, Clone)]
pub struct AppIndex {
    entries: Vec<DesktopEntry>,
    by_id: AHashMap<CompactString, usize>,
    by_key: AHashMap<CompactString, usize>,
}

impl AppIndex {
    /// Scan the standard application directories
    pub fn scan() -> Self {
        Self::scan_dirs(&application_dirs())
    }

    /// Scan `dirs` in order; a later file with the same id overrides an earlier one
    pub fn scan_dirs(dirs: &[PathBuf]) -> Self {
        let mut index = Self::default();
        for dir in dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if !is_desktop_file(&path) {
                    continue;
                }
                if let Some(app) = parse_desktop_file(&path) {
                    index.insert(app);
                }
            }
        }
        debug!("Indexed {} applications", index.entries.len());
        index
    }

    pub fn from_entries(entries: impl IntoIterator<Item = DesktopEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    fn insert(&mut self, entry: DesktopEntry) {
        let slot = match self.by_id.get(&entry.id) {
            Some(&slot) => {
                self.entries[slot] = entry;
                slot
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        let entry = &self.entries[slot];
        self.by_id.insert(entry.id.clone(), slot);
        self.by_key.insert(lower(entry.stem()), slot);
        if let Some(class) = &entry.startup_wm_class {
            self.by_key.insert(lower(class), slot);
        }
        // reverse-DNS ids are often matched by their last segment
        if let Some(tail) = entry.stem().rsplit('.').next() {
            self.by_key.entry(lower(tail)).or_insert(slot);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up by desktop id, with or without the `.desktop` suffix
    pub fn by_id(&self, id: &str) -> Option<&DesktopEntry> {
        let slot = match self.by_id.get(id) {
            Some(slot) => *slot,
            None => *self.by_id.get(format!("{id}.desktop").as_str())?,
        };
        self.entries.get(slot)
    }

    /// Match a window's app id (Wayland app id or X11 class) to an entry
    pub fn for_window_class(&self, class: &str) -> Option<&DesktopEntry> {
        if class.is_empty() {
            return None;
        }
        self.by_id(class)
            .or_else(|| self.by_key.get(&lower(class)).and_then(|slot| self.entries.get(*slot)))
    }

    /// Icon name for a window's app id
    pub fn icon_for_class(&self, class: &str) -> Option<CompactString> {
        self.for_window_class(class)?.icon.clone()
    }

    /// Resolve favorite desktop ids, skipping ones that are not installed
    pub fn resolve_favorites(&self, ids: &[CompactString]) -> Vec<(AppInfo, &DesktopEntry)> {
        ids.iter()
            .filter_map(|id| {
                let entry = self.by_id(id)?;
                let info = AppInfo {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                };
                Some((info, entry))
            })
            .collect()
    }
}

fn is_desktop_file(path: &Path) -> bool {
    path.extension().map(|e| e == "desktop").unwrap_or(false)
}

fn lower(s: &str) -> CompactString {
    s.to_lowercase().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, icon: &str, class: Option<&str>) -> DesktopEntry {
        DesktopEntry {
            id: id.into(),
            name: name.into(),
            exec: name.to_lowercase(),
            icon: Some(icon.into()),
            startup_wm_class: class.map(Into::into),
            ..Default::default()
        }
    }

    fn index() -> AppIndex {
        AppIndex::from_entries([
            entry("org.gnome.Nautilus.desktop", "Files", "org.gnome.Nautilus", None),
            entry("code.desktop", "Code", "vscode", Some("Code")),
            entry("kitty.desktop", "kitty", "kitty", None),
        ])
    }

    #[test]
    fn test_window_class_matching() {
        let index = index();
        assert_eq!(index.icon_for_class("kitty").as_deref(), Some("kitty"));
        assert_eq!(index.icon_for_class("code").as_deref(), Some("vscode"));
        assert_eq!(index.icon_for_class("org.gnome.Nautilus").as_deref(), Some("org.gnome.Nautilus"));
        assert_eq!(index.icon_for_class("nautilus").as_deref(), Some("org.gnome.Nautilus"));
        assert!(index.icon_for_class("unknown").is_none());
        assert!(index.icon_for_class("").is_none());
    }

    #[test]
    fn test_favorites_keep_order_and_skip_missing() {
        let index = index();
        let ids: Vec<CompactString> = vec!["kitty.desktop".into(), "gone.desktop".into(), "code".into()];
        let names: Vec<_> = index
            .resolve_favorites(&ids)
            .into_iter()
            .map(|(info, _)| info.name)
            .collect();
        assert_eq!(names, vec!["kitty", "Code"]);
    }

    #[test]
    fn test_later_dirs_override_earlier() {
        let system = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        std::fs::write(
            system.path().join("kitty.desktop"),
            "[Desktop Entry]\nName=kitty\nExec=kitty\nIcon=kitty\n",
        )
        .unwrap();
        std::fs::write(
            user.path().join("kitty.desktop"),
            "[Desktop Entry]\nName=kitty\nExec=kitty -1\nIcon=my-kitty\n",
        )
        .unwrap();
        std::fs::write(user.path().join("notes.txt"), "not an app").unwrap();

        let index = AppIndex::scan_dirs(&[system.path().to_path_buf(), user.path().to_path_buf()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.icon_for_class("kitty").as_deref(), Some("my-kitty"));
    }
}
