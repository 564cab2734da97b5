use indexmap::IndexMap;

use crate::domain::email::{Message, RawMessage, Thread, ThreadId};
use crate::mail::message::build_message;

/// Messages grouped by thread id, groups kept in first-seen order.
pub type ThreadGroups = IndexMap<ThreadId, Vec<Message>>;

pub fn group_by_thread<I>(entries: I) -> ThreadGroups
where
    I: IntoIterator<Item = (ThreadId, Message)>,
{
    let mut groups = ThreadGroups::new();
    for (thread_id, message) in entries {
        groups.entry(thread_id).or_default().push(message);
    }
    groups
}

/// Sort every group oldest-first (stable, so equal timestamps keep their
/// arrival order) and take each thread's subject from its earliest message.
pub fn into_threads(groups: ThreadGroups) -> Vec<Thread> {
    groups
        .into_iter()
        .filter_map(|(thread_id, mut messages)| {
            messages.sort_by(|a, b| a.timestamp_raw.total_cmp(&b.timestamp_raw));
            let subject = messages.first()?.subject.clone();
            Some(Thread {
                thread_id,
                subject,
                messages,
            })
        })
        .collect()
}

pub fn assemble<I>(entries: I) -> Vec<Thread>
where
    I: IntoIterator<Item = (ThreadId, Message)>,
{
    into_threads(group_by_thread(entries))
}

/// Build and assemble straight from fetched messages, in fetch order.
pub fn threads_from_raw(raws: &[RawMessage]) -> Vec<Thread> {
    assemble(raws.iter().map(|r| (r.thread_id.clone(), build_message(r))))
}
