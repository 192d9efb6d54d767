use std::path::Path;

/// Screen lockers whose presence means the session is locked
const LOCKERS: &[&str] = &["hyprlock", "swaylock", "gtklock"];

/// Whether a screen locker is running
pub fn session_locked() -> bool {
    any_process_named(Path::new("/proc"), LOCKERS)
}

fn any_process_named(proc_dir: &Path, names: &[&str]) -> bool {
    let Ok(entries) = std::fs::read_dir(proc_dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let is_pid = entry
            .file_name()
            .to_str()
            .map(|n| n.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false);
        is_pid
            && std::fs::read_to_string(entry.path().join("comm"))
                .map(|comm| names.contains(&comm.trim()))
                .unwrap_or(false)
    })
}

/// Quote `s` for `sh -c`
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
