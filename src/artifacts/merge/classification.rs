//! Three-way merge classification
//!
//! Given the file maps of the split point, the current commit, and the
//! given (merged-in) commit, classify every filename in their union into a
//! merge action. Rules are evaluated first-match-wins, per filename:
//!
//! 1. unchanged split→given, present in current → keep current
//! 2. changed split→given, unchanged split→current → take given
//! 3. absent from split and current, present in given → take given
//! 4. present in both sides with different blobs → conflict
//! 5. unchanged split→current, absent from given → delete
//! 6. changed split→given, absent from current → conflict
//! 7. changed split→current, absent from given → conflict
//!
//! Anything else (same blob on both sides, changes confined to one side
//! with the other untouched, deletions already agreed on) keeps the
//! current state.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

type FileMap = BTreeMap<String, ObjectId>;

/// Action the merge takes for a single filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Copy the given side's blob into the working tree and stage it
    TakeGiven(ObjectId),
    /// Delete the file from the working tree and drop removal bookkeeping
    Delete,
    /// Write conflict markers combining both sides (either may be absent)
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Classify every filename in the union of the three snapshots
///
/// Filenames whose current state is already the merge result are omitted.
pub fn classify(split: &FileMap, current: &FileMap, given: &FileMap) -> BTreeMap<String, MergeAction> {
    let filenames = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    let mut actions = BTreeMap::new();

    for filename in filenames {
        let split_blob = split.get(filename);
        let current_blob = current.get(filename);
        let given_blob = given.get(filename);

        if let Some(action) = classify_file(split_blob, current_blob, given_blob) {
            actions.insert(filename.clone(), action);
        }
    }

    actions
}

fn classify_file(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<MergeAction> {
    // both sides agree already (same blob, or both absent)
    if current == given {
        return None;
    }

    match (split, current, given) {
        // unchanged on the given side, so the current side wins
        (Some(split), Some(_), Some(given)) if split == given => None,
        // modified only on the given side
        (Some(split), Some(current), Some(given)) if split == current && split != given => {
            Some(MergeAction::TakeGiven(given.clone()))
        }
        // created only on the given side
        (None, None, Some(given)) => Some(MergeAction::TakeGiven(given.clone())),
        // modified differently on both sides (or created differently on both)
        (_, Some(current), Some(given)) => Some(MergeAction::Conflict {
            current: Some(current.clone()),
            given: Some(given.clone()),
        }),
        // deleted on the given side, untouched on the current side
        (Some(split), Some(current), None) if split == current => Some(MergeAction::Delete),
        // deleted on the current side, modified on the given side
        (Some(split), None, Some(given)) if split != given => Some(MergeAction::Conflict {
            current: None,
            given: Some(given.clone()),
        }),
        // modified on the current side, deleted on the given side
        (Some(split), Some(current), None) if split != current => Some(MergeAction::Conflict {
            current: Some(current.clone()),
            given: None,
        }),
        _ => None,
    }
}
