//! Local ordered view of the shared agenda.
//!
//! The view is the client-side materialization of the global event stream:
//! Show events insert entries at a deterministic position, Hide events remove
//! them. Rendering is delegated to a [`ViewAdapter`] owned by the embedding
//! application, which keeps the ordering logic itself headless.

use crate::models::Entry;
use crate::ordering::CategoryPriorities;
use crate::sync::ServerEvent;

/// Rendering surface a view drives.
///
/// Implementations materialize rows however they like (a terminal table, a
/// GUI list) but must keep each row retrievable by entry id, and interactive
/// surfaces should wire a row's hide affordance back to
/// [`SyncSession::request_hide`](crate::sync::SyncSession::request_hide).
/// The view calls the adapter, never the reverse.
pub trait ViewAdapter {
    /// Materializes a row for `entry` before the row at index `before`, or
    /// at the end when `before` is `None`.
    fn insert_entry_before(&mut self, entry: &Entry, before: Option<usize>);

    /// Removes the row for `id`. Absent ids are a no-op.
    fn remove_entry_by_id(&mut self, id: i32);
}

/// Adapter for sessions that do not materialize rows, such as one-shot
/// request commands.
impl ViewAdapter for () {
    fn insert_entry_before(&mut self, _entry: &Entry, _before: Option<usize>) {}

    fn remove_entry_by_id(&mut self, _id: i32) {}
}

/// Ordered sequence of agenda entries, kept in category-rank order with
/// arrival order breaking ties.
///
/// Owned exclusively by one sync session; separate sessions only agree with
/// each other through the event stream they both consume.
pub struct AgendaView<A> {
    entries: Vec<Entry>,
    priorities: CategoryPriorities,
    adapter: A,
}

impl<A: ViewAdapter> AgendaView<A> {
    pub fn new(adapter: A, priorities: CategoryPriorities) -> Self {
        Self {
            entries: Vec::new(),
            priorities,
            adapter,
        }
    }

    /// Applies one accepted mutation event. Runs to completion; no other
    /// event touches the view until this one is folded in.
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::Show {
                id,
                name,
                talk_type,
                desc,
            } => self.insert(Entry::new(*id, name.clone(), talk_type.clone(), desc.clone())),
            ServerEvent::Hide { id } => self.remove(*id),
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    fn insert(&mut self, entry: Entry) {
        let before = self.insertion_point(&entry.talk_type);
        self.adapter.insert_entry_before(&entry, before);
        match before {
            Some(index) => self.entries.insert(index, entry),
            None => self.entries.push(entry),
        }
    }

    /// Index of the first entry that should sort after the given category,
    /// or `None` to append.
    ///
    /// The scan only displaces entries of strictly lower rank, so entries of
    /// equal rank keep their arrival order. Comparisons involving an
    /// unranked category are false in both directions: an unranked newcomer
    /// always appends at the end, and an unranked existing row is never
    /// displaced.
    fn insertion_point(&self, talk_type: &str) -> Option<usize> {
        let new_rank = self.priorities.rank(talk_type)?;
        self.entries
            .iter()
            .position(|existing| match self.priorities.rank(&existing.talk_type) {
                Some(rank) => new_rank < rank,
                None => false,
            })
    }

    fn remove(&mut self, id: i32) {
        if let Some(index) = self.entries.iter().position(|entry| entry.id == id) {
            self.entries.remove(index);
            self.adapter.remove_entry_by_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAdapter {
        inserts: Vec<(i32, Option<usize>)>,
        removes: Vec<i32>,
    }

    impl ViewAdapter for RecordingAdapter {
        fn insert_entry_before(&mut self, entry: &Entry, before: Option<usize>) {
            self.inserts.push((entry.id, before));
        }

        fn remove_entry_by_id(&mut self, id: i32) {
            self.removes.push(id);
        }
    }

    fn show(id: i32, talk_type: &str) -> ServerEvent {
        ServerEvent::Show {
            id,
            name: format!("talk {}", id),
            talk_type: talk_type.to_string(),
            desc: "desc".to_string(),
        }
    }

    fn ids<A>(view: &AgendaView<A>) -> Vec<i32>
    where
        A: ViewAdapter,
    {
        view.entries().iter().map(|entry| entry.id).collect()
    }

    fn test_view() -> AgendaView<RecordingAdapter> {
        AgendaView::new(RecordingAdapter::default(), CategoryPriorities::default())
    }

    #[test]
    fn test_show_inserts_by_category_rank() {
        let mut view = test_view();
        view.apply(&show(1, "forum topic"));
        view.apply(&show(2, "project update"));
        view.apply(&show(3, "lightning talk"));

        assert_eq!(ids(&view), vec![1, 3, 2]);
        // lightning talk slotted in front of the project update row
        assert_eq!(view.adapter().inserts, vec![(1, None), (2, None), (3, Some(1))]);
    }

    #[test]
    fn test_equal_ranks_keep_arrival_order() {
        let mut view = test_view();
        view.apply(&show(1, "forum topic"));
        view.apply(&show(2, "announcement"));
        view.apply(&show(3, "forum topic"));
        view.apply(&show(4, "forum topic"));

        assert_eq!(ids(&view), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_show_round_trip_yields_single_entry() {
        let mut view = test_view();
        view.apply(&ServerEvent::Show {
            id: 1,
            name: "A".to_string(),
            talk_type: "forum topic".to_string(),
            desc: "d".to_string(),
        });

        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.entries()[0], Entry::new(1, "A", "forum topic", "d"));
    }

    #[test]
    fn test_unknown_category_appends_last() {
        let mut view = test_view();
        view.apply(&show(1, "announcement"));
        view.apply(&show(2, "after meeting slot"));
        view.apply(&show(3, "keynote"));

        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert_eq!(view.adapter().inserts[2], (3, None));

        // a ranked arrival still sorts among the ranked rows
        view.apply(&show(4, "forum topic"));
        assert_eq!(ids(&view), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_unranked_rows_are_never_displaced() {
        let mut view = test_view();
        view.apply(&show(1, "keynote"));
        view.apply(&show(2, "forum topic"));

        // rank comparisons against the unranked row are false in both
        // directions, so the newcomer scans past it and appends
        assert_eq!(ids(&view), vec![1, 2]);
        assert_eq!(view.adapter().inserts, vec![(1, None), (2, None)]);
    }

    #[test]
    fn test_hide_removes_entry() {
        let mut view = test_view();
        view.apply(&show(1, "forum topic"));
        view.apply(&show(2, "project update"));
        view.apply(&show(3, "lightning talk"));
        assert_eq!(ids(&view), vec![1, 3, 2]);

        view.apply(&ServerEvent::Hide { id: 3 });

        assert_eq!(ids(&view), vec![1, 2]);
        assert_eq!(view.adapter().removes, vec![3]);
    }

    #[test]
    fn test_hide_unknown_id_is_noop() {
        let mut view = test_view();
        view.apply(&show(1, "forum topic"));

        view.apply(&ServerEvent::Hide { id: 99 });

        assert_eq!(ids(&view), vec![1]);
        assert!(view.adapter().removes.is_empty());
    }

    #[test]
    fn test_rank_order_invariant_over_mixed_sequence() {
        let mut view = test_view();
        for (id, talk_type) in [
            (1, "after meeting slot"),
            (2, "forum topic"),
            (3, "announcement"),
            (4, "lightning talk"),
            (5, "forum topic"),
            (6, "project update"),
        ] {
            view.apply(&show(id, talk_type));
        }

        assert_eq!(ids(&view), vec![2, 5, 4, 6, 3, 1]);

        let priorities = CategoryPriorities::default();
        let ranks: Vec<u32> = view
            .entries()
            .iter()
            .map(|entry| priorities.rank(&entry.talk_type).unwrap())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }
}
