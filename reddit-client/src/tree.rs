//! Comment forest flattening.
//!
//! Walks the reply tree with an explicit stack, emitting comments in
//! pre-order with their depth. Subtrees deeper than `max_depth` are dropped,
//! as are deleted or removed comments together with all of their replies.

use crate::listing::{Node, RawChild};
use crate::normalize::Normalizer;
use pulse_core::{
    CoreError, ErrorRecovery, NormalizedItem, RecoveryResult, DELETED_MARKER, REMOVED_MARKER,
};
use tracing::debug;

pub fn flatten_comments(
    roots: Vec<RawChild>,
    normalizer: &Normalizer,
    max_depth: u32,
) -> Vec<NormalizedItem> {
    let mut items = Vec::new();
    // Children are pushed in reverse so siblings pop in their original order
    let mut stack: Vec<(RawChild, u32)> = roots.into_iter().rev().map(|c| (c, 0)).collect();

    while let Some((child, level)) = stack.pop() {
        if level > max_depth {
            continue;
        }

        let decoded = child.into_node().map_err(CoreError::from);
        let mut comment = match ErrorRecovery::settle("comment", decoded) {
            RecoveryResult::Recovered(Node::Comment(comment)) => comment,
            RecoveryResult::Recovered(Node::Link(link)) => {
                debug!("Ignoring link {} inside comment tree", link.id);
                continue;
            }
            RecoveryResult::Recovered(Node::Other(kind)) => {
                debug!("Ignoring {} node at level {}", kind, level);
                continue;
            }
            RecoveryResult::Skipped | RecoveryResult::Failed(_) => continue,
        };

        if !has_live_body(comment.body.as_deref()) {
            debug!(
                "Dropping comment {} at level {} with its replies",
                comment.id, level
            );
            continue;
        }

        if level < max_depth {
            let replies = comment.take_replies();
            stack.extend(replies.into_iter().rev().map(|r| (r, level + 1)));
        }

        items.push(normalizer.comment(comment, level));
    }

    items
}

/// Absent, `[deleted]` and `[removed]` bodies are dead. An empty body is
/// still a live comment whose replies are walked.
fn has_live_body(body: Option<&str>) -> bool {
    match body {
        Some(text) => text != DELETED_MARKER && text != REMOVED_MARKER,
        None => false,
    }
}
