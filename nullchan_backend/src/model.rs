//! Read-facing projections of threads and replies.
//!
//! Everything here is pure: records go in, views come out. Moderation-only
//! fields (`reported`, `delete_password`) exist on the records but not on the
//! views, so redaction cannot be forgotten at a call site.

use crate::database::models::{ReplyRecord, ThreadRecord};
use serde::{Deserialize, Serialize};

/// Marker written over a reply's text on soft-delete.
pub const REPLY_TOMBSTONE: &str = "[deleted]";

/// Board listings return at most this many threads.
pub const THREAD_PAGE_LIMIT: usize = 10;

/// Board listings carry at most this many replies per thread.
pub const REPLY_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadView {
    pub id: String,
    pub text: String,
    pub created_on: String,
    pub bumped_on: String,
    /// Total reply count, taken before any truncation.
    #[serde(rename = "replycount")]
    pub reply_count: usize,
    pub replies: Vec<ReplyView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyView {
    pub id: String,
    pub text: String,
    pub created_on: String,
}

/// Projects a thread and its replies into the public shape, dropping the
/// moderation fields at both levels and deriving `replycount`.
pub fn redact(thread: ThreadRecord, replies: Vec<ReplyRecord>) -> ThreadView {
    let reply_count = replies.len();
    ThreadView {
        id: thread.id,
        text: thread.text,
        created_on: thread.created_on,
        bumped_on: thread.bumped_on,
        reply_count,
        replies: replies.into_iter().map(ReplyView::from_record).collect(),
    }
}

/// Keeps only the `keep` most recently created replies, preserving their
/// chronological order. `replycount` is untouched: it reflects the full
/// sequence.
pub fn truncate_replies(mut view: ThreadView, keep: usize) -> ThreadView {
    let skip = view.replies.len().saturating_sub(keep);
    if skip > 0 {
        view.replies.drain(..skip);
    }
    view
}

impl ReplyView {
    fn from_record(record: ReplyRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            created_on: record.created_on,
        }
    }
}
