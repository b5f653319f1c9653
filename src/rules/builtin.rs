//! Built-in rule tables.
//!
//! Patterns run against a normalized command (no `sudo`, no `/usr/bin/`
//! prefix). Command names are matched case-sensitively; the SQL rules opt
//! into `(?i)` because keywords are not.

use super::Category;

/// Destructive operations that are always blocked.
pub const DENY_RULES: &[(&str, Category)] = &[
    // rm with a recursive flag on / or /*, trailing options allowed
    (
        r"^rm\s+(?:.*\s)?(?:-[A-Za-z]*[rR][A-Za-z]*|--recursive)\s+(?:.*\s)?/\*?(?:\s+-\S*)*$",
        Category::RootDeletion,
    ),
    (
        r"^rm\s+(?:.*\s)?(?:-[A-Za-z]*[rR][A-Za-z]*|--recursive)\s+(?:.*\s)?/(?:usr|etc|bin|lib|lib64|boot|var|opt|sbin|home)/?(?:\s+-\S*)*$",
        Category::SystemDirectoryDeletion,
    ),
    // dd from a zero/random source, or any device, onto a raw disk; either operand order
    (
        r"^dd\s+(?:.*\s)?if=/dev/(?:zero|random|urandom)\s+(?:.*\s)?of=/dev/sd[a-z]",
        Category::DiskOverwrite,
    ),
    (
        r"^dd\s+(?:.*\s)?of=/dev/sd[a-z]\S*\s+(?:.*\s)?if=/dev/(?:zero|random|urandom)\b",
        Category::DiskOverwrite,
    ),
    (
        r"^dd\s+(?:.*\s)?if=/dev/\S+\s+(?:.*\s)?of=/dev/nvme",
        Category::DiskOverwrite,
    ),
    (
        r"^dd\s+(?:.*\s)?of=/dev/nvme\S*\s+(?:.*\s)?if=/dev/\S",
        Category::DiskOverwrite,
    ),
    (r"^mkfs\.", Category::FilesystemFormat),
    (r"^chmod\s+.*000\s+/$", Category::PermissionChange),
    (
        r"^chown\s+(?:.*\s)?(?:-[A-Za-z]*R[A-Za-z]*|--recursive)\s+(?:.*\s)?/$",
        Category::PermissionChange,
    ),
    (
        r"^kill\s+(?:.*\s)?-(?:9|KILL|SIGKILL)\s+-1$",
        Category::MassProcessKill,
    ),
    (r"^killall\s+(?:.*\s)?-9\b", Category::MassProcessKill),
    (
        r"(?i)\bdrop\s+(?:database|table)\b",
        Category::DatabaseDestruction,
    ),
    (
        r"(?i)^truncate\s+(?:.*\s)?table\s+\S",
        Category::DatabaseDestruction,
    ),
    (r"^:?>\s*/dev/(?:sd|nvme)", Category::BlockDeviceWrite),
];

/// Risky operations that need the user to confirm.
///
/// Several of these are deliberately broader than their deny counterparts:
/// `kill -9 -1` is denied above while any other `kill` lands here.
pub const ASK_RULES: &[(&str, Category)] = &[
    (
        r"^git\s+(?:reset|rebase|clean)\b",
        Category::VersionControlRewrite,
    ),
    (r"^rm\b", Category::FileRemoval),
    (r"^(?:dd|mkfs)\b", Category::DiskOperation),
    (
        r"^(?:shutdown|reboot|halt|poweroff)\b",
        Category::PowerControl,
    ),
    (r"^(?:kill|killall|pkill)\b", Category::ProcessTermination),
    (
        r"^docker\s+(?:(?:container|image)\s+)?(?:rm|rmi)\b",
        Category::ContainerDeletion,
    ),
    (r"^kubectl\s+delete\b", Category::ContainerDeletion),
];
