//! Read access policy for file entries.

use super::metadata::FileEntry;

/// Whether a caller may read an entry's metadata and content.
///
/// Public entries are readable by anyone, including unauthenticated
/// callers. Non-public entries are readable only by their owner.
pub fn can_read(entry: &FileEntry, caller: Option<i64>) -> bool {
    if entry.is_public {
        return true;
    }
    caller == Some(entry.user_id)
}
