/// Zero-based index encoded by a trailing `_<N>` suffix, where `N` is 1-based.
///
/// `door_2` -> `Some(1)`. Names without a numeric suffix (and `_0`, which has no
/// zero-based counterpart) are not indexed and return `None`.
pub fn variable_index(name: &str) -> Option<usize> {
    let (_, suffix) = name.rsplit_once('_')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse::<usize>().ok()?.checked_sub(1)
}
