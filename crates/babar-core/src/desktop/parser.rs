use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// Represents a parsed .desktop file entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Desktop file id, e.g. `org.gnome.Nautilus.desktop`
    pub id: CompactString,
    pub name: CompactString,
    pub exec: String,
    pub icon: Option<CompactString>,
    pub startup_wm_class: Option<CompactString>,
    pub terminal: bool,
    pub no_display: bool,
    pub path: PathBuf,
}

impl DesktopEntry {
    /// Get the command to execute (strips field codes like %f, %u, etc.)
    pub fn command(&self) -> String {
        self.exec
            .split_whitespace()
            .filter(|s| !s.starts_with('%'))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Desktop id without the `.desktop` suffix
    pub fn stem(&self) -> &str {
        self.id.strip_suffix(".desktop").unwrap_or(&self.id)
    }
}

/// Parse the contents of a .desktop file.
///
/// Hidden entries are dropped. NoDisplay entries are kept so that windows of
/// helper apps still resolve an icon; launchers filter them out.
pub fn parse_desktop_entry(id: &str, path: &Path, content: &str) -> Option<DesktopEntry> {
    let mut entry = DesktopEntry {
        id: id.into(),
        path: path.to_path_buf(),
        ..Default::default()
    };

    let mut in_desktop_entry = false;
    let mut hidden = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if !in_desktop_entry {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            match key.trim() {
                "Name" => entry.name = value.into(),
                "Exec" => entry.exec = value.to_string(),
                "Icon" if !value.is_empty() => entry.icon = Some(value.into()),
                "StartupWMClass" if !value.is_empty() => {
                    entry.startup_wm_class = Some(value.into())
                }
                "Terminal" => entry.terminal = value.eq_ignore_ascii_case("true"),
                "NoDisplay" => entry.no_display = value.eq_ignore_ascii_case("true"),
                "Hidden" => hidden = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
    }

    if entry.name.is_empty() || entry.exec.is_empty() || hidden {
        return None;
    }

    Some(entry)
}

/// Parse a single .desktop file
pub fn parse_desktop_file(path: &Path) -> Option<DesktopEntry> {
    let content = std::fs::read_to_string(path).ok()?;
    let id = path.file_name()?.to_str()?;
    parse_desktop_entry(id, path, &content)
}

/// Standard application directories, lowest precedence first
pub fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/applications"),
        PathBuf::from("/usr/local/share/applications"),
    ];
    if let Some(data) = dirs::data_dir() {
        dirs.push(data.join("applications"));
    }
    dirs
}
