//! Strip evasion wrappers (sudo, absolute binary paths) from a command.

use once_cell::sync::Lazy;
use regex::Regex;

/// `sudo` followed by any single-dash flag clusters.
static SUDO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sudo\s+(?:-[A-Za-z]+\s+)*").expect("sudo prefix regex is valid"));

/// `/bin/`, `/sbin/`, `/usr/bin/`, `/usr/sbin/`, `/usr/local/bin/`, `/local/bin/`.
static BIN_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/(?:usr/)?(?:bin|sbin|local/bin)/").expect("binary path regex is valid")
});

/// Recover the canonical form of a sub-command.
///
/// Examples:
/// - `sudo rm -rf /` -> `rm -rf /`
/// - `sudo -E -H rm x` -> `rm x`
/// - `/usr/bin/git reset --hard` -> `git reset --hard`
/// - `/usr/bin/sudo /bin/rm x` -> `rm x`
///
/// Both strips repeat until nothing changes, so the result never starts
/// with either prefix and normalizing twice is a no-op. Option arguments
/// are not understood: `sudo -u root rm` leaves `root rm`.
pub fn normalize(command: &str) -> String {
    let mut current = command.trim().to_string();
    loop {
        let without_sudo = SUDO_PREFIX.replace(&current, "");
        let stripped = BIN_PATH.replace(&without_sudo, "").trim().to_string();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}
