//! Per-file three-way merge classification
//!
//! Every path present in the split point (S), the current tip (C) or the given
//! tip (G) is classified by comparing blob ids, an absent file counting as its
//! own value:
//!
//! | C vs G | C vs S    | G vs S    | Action                     |
//! |--------|-----------|-----------|----------------------------|
//! | equal  |           |           | keep (nothing to do)       |
//! |        | unchanged | changed   | take G (or remove if gone) |
//! |        | changed   | unchanged | keep C                     |
//! |        | changed   | changed   | conflict                   |

use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// The current tip already holds the merged result
    Keep,
    /// Check out and stage the given tip's version
    TakeGiven(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides diverged from the split point in different ways
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> MergeAction {
    if current == given || given == split {
        return MergeAction::Keep;
    }

    if current == split {
        return match given {
            Some(given) => MergeAction::TakeGiven(given.clone()),
            None => MergeAction::Remove,
        };
    }

    MergeAction::Conflict {
        current: current.cloned(),
        given: given.cloned(),
    }
}

/// Content written for a conflicted file; a deleted side contributes nothing.
pub fn conflict_content(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = BytesMut::with_capacity(current.len() + given.len() + 32);

    content.put_slice(b"<<<<<<< HEAD\n");
    content.put_slice(current);
    content.put_slice(b"=======\n");
    content.put_slice(given);
    content.put_slice(b">>>>>>>\n");

    content.freeze()
}
