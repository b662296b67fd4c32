#![allow(dead_code)]

use proptest::prelude::*;

/// Strategy for a single valid resource id
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}"
}

/// Strategy for the segments of a non-empty resource path
pub fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..8)
}
