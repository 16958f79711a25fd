//! Proptest generators for property-based testing.

use proptest::prelude::*;

/// A plausible username.
pub fn username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// A filename, including characters a path-based store would choke on.
pub fn filename() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9._-]{1,24}".prop_map(String::from),
        "[a-z]{1,8}/[a-z]{1,8}\\.txt".prop_map(String::from),
        Just(String::new()),
    ]
}

/// File content up to `max_len` bytes.
pub fn content(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// An initial content followed by between zero and `max_appends` appends.
pub fn content_parts(max_appends: usize, max_len: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(content(max_len), 1..=max_appends + 1)
}
