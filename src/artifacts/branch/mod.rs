pub mod branch_name;

/// Ref-name rules: no leading dot, no `..`, no `@{`, no control or glob
/// characters, no `.lock` suffix, no leading or trailing slash.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
