//! Ordered-collection maintenance for sibling sets: columns within a board
//! and tasks within a column. Everything here is pure and O(n); persistence
//! of the recomputed ranks is the caller's job.

use thiserror::Error;

/// A sibling carrying a persisted zero-based rank.
pub trait Ordered {
    fn rank(&self) -> i32;
    fn set_rank(&mut self, rank: i32);
}

/// Removes the element at `from` and reinserts it at `to`, clamped to the
/// valid range. Returns `false` without touching the input when `from` is
/// out of range or the move lands on its own position, so callers can skip
/// persistence entirely for the no-op case.
pub fn reorder<T>(siblings: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= siblings.len() {
        return false;
    }
    let to = to.min(siblings.len() - 1);
    if from == to {
        return false;
    }
    let moved = siblings.remove(from);
    siblings.insert(to, moved);
    true
}

/// Moves the element at `from` in `source` into `destination` at `to`,
/// clamped to `[0, destination.len()]`. An empty destination accepts the
/// element at index 0. Returns `false` when `from` is out of range.
pub fn move_across<T>(source: &mut Vec<T>, destination: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= source.len() {
        return false;
    }
    let moved = source.remove(from);
    let to = to.min(destination.len());
    destination.insert(to, moved);
    true
}

/// Reassigns every sibling's rank to its zero-based index and returns the
/// indices whose rank actually changed. Indices between the source and
/// destination of a move all shift, so the caller must persist one write
/// per returned index — and none for the rest.
pub fn reassign<T: Ordered>(siblings: &mut [T]) -> Vec<usize> {
    let mut changed = Vec::new();
    for (index, sibling) in siblings.iter_mut().enumerate() {
        let rank = index as i32;
        if sibling.rank() != rank {
            sibling.set_rank(rank);
            changed.push(index);
        }
    }
    changed
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ArrangeError {
    #[error("unknown id in proposed order: {0}")]
    UnknownId(String),
    #[error("duplicate id in proposed order: {0}")]
    DuplicateId(String),
    #[error("proposed order omits {0} sibling(s)")]
    Incomplete(usize),
}

/// Permutes `items` into the client-proposed id sequence. The proposal must
/// be exactly a permutation of the current sibling set; anything else is a
/// validation failure, never a silent partial apply.
pub fn arrange<T, F>(items: Vec<T>, ids: &[String], id_of: F) -> Result<Vec<T>, ArrangeError>
where
    F: Fn(&T) -> &str,
{
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut arranged = Vec::with_capacity(slots.len());

    for id in ids {
        let mut found = None;
        for slot in slots.iter_mut() {
            if slot.as_ref().is_some_and(|item| id_of(item) == id) {
                found = slot.take();
                break;
            }
        }
        match found {
            Some(item) => arranged.push(item),
            None if arranged.iter().any(|item| id_of(item) == id) => {
                return Err(ArrangeError::DuplicateId(id.clone()))
            }
            None => return Err(ArrangeError::UnknownId(id.clone())),
        }
    }

    let leftover = slots.iter().filter(|slot| slot.is_some()).count();
    if leftover > 0 {
        return Err(ArrangeError::Incomplete(leftover));
    }
    Ok(arranged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        rank: i32,
    }

    impl Item {
        fn new(id: &'static str, rank: i32) -> Self {
            Item { id, rank }
        }
    }

    impl Ordered for Item {
        fn rank(&self) -> i32 {
            self.rank
        }
        fn set_rank(&mut self, rank: i32) {
            self.rank = rank;
        }
    }

    fn ids(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn moves_an_element_forward() {
        // Board with [A(0), C(1)]: moving A to index 1 yields C=0, A=1.
        let mut siblings = vec![Item::new("a", 0), Item::new("c", 1)];
        assert!(reorder(&mut siblings, 0, 1));
        let changed = reassign(&mut siblings);
        assert_eq!(ids(&siblings), ["c", "a"]);
        assert_eq!(siblings[0].rank, 0);
        assert_eq!(siblings[1].rank, 1);
        assert_eq!(changed, [0, 1]);
    }

    #[test]
    fn moves_an_element_backward() {
        let mut siblings = vec![Item::new("a", 0), Item::new("b", 1), Item::new("c", 2)];
        assert!(reorder(&mut siblings, 2, 0));
        assert_eq!(ids(&siblings), ["c", "a", "b"]);
    }

    #[test]
    fn dropping_on_the_same_position_is_a_no_op() {
        let mut siblings = vec![Item::new("a", 0), Item::new("b", 1)];
        let before = siblings.clone();
        assert!(!reorder(&mut siblings, 1, 1));
        assert_eq!(siblings, before);
        // No rank changed, so the caller issues zero writes.
        assert!(reassign(&mut siblings).is_empty());
    }

    #[test]
    fn out_of_range_source_is_a_no_op() {
        let mut siblings = vec![Item::new("a", 0)];
        assert!(!reorder(&mut siblings, 5, 0));
        assert_eq!(ids(&siblings), ["a"]);
    }

    #[test]
    fn destination_is_clamped_to_the_last_index() {
        let mut siblings = vec![Item::new("a", 0), Item::new("b", 1), Item::new("c", 2)];
        assert!(reorder(&mut siblings, 0, 99));
        assert_eq!(ids(&siblings), ["b", "c", "a"]);
    }

    #[test]
    fn a_move_and_its_inverse_restore_the_original_order() {
        let mut siblings = vec![
            Item::new("a", 0),
            Item::new("b", 1),
            Item::new("c", 2),
            Item::new("d", 3),
        ];
        let original = siblings.clone();
        assert!(reorder(&mut siblings, 1, 3));
        reassign(&mut siblings);
        assert!(reorder(&mut siblings, 3, 1));
        reassign(&mut siblings);
        assert_eq!(siblings, original);
    }

    #[test]
    fn reassign_reports_only_shifted_siblings() {
        let mut siblings = vec![Item::new("a", 0), Item::new("b", 5), Item::new("c", 2)];
        let changed = reassign(&mut siblings);
        assert_eq!(changed, [1]);
        assert_eq!(siblings[1].rank, 1);
    }

    #[test]
    fn moves_across_containers() {
        let mut source = vec![Item::new("a", 0), Item::new("b", 1)];
        let mut destination = vec![Item::new("x", 0)];
        assert!(move_across(&mut source, &mut destination, 0, 1));
        assert_eq!(ids(&source), ["b"]);
        assert_eq!(ids(&destination), ["x", "a"]);
    }

    #[test]
    fn moving_into_an_empty_container_lands_at_index_zero() {
        let mut source = vec![Item::new("a", 0)];
        let mut destination: Vec<Item> = Vec::new();
        assert!(move_across(&mut source, &mut destination, 0, 0));
        assert!(source.is_empty());
        assert_eq!(ids(&destination), ["a"]);
    }

    #[test]
    fn move_across_clamps_the_destination_index() {
        let mut source = vec![Item::new("a", 0)];
        let mut destination = vec![Item::new("x", 0)];
        assert!(move_across(&mut source, &mut destination, 0, 42));
        assert_eq!(ids(&destination), ["x", "a"]);
    }

    #[test]
    fn move_across_with_bad_source_index_is_a_no_op() {
        let mut source: Vec<Item> = Vec::new();
        let mut destination = vec![Item::new("x", 0)];
        assert!(!move_across(&mut source, &mut destination, 0, 0));
        assert_eq!(ids(&destination), ["x"]);
    }

    #[test]
    fn arrange_applies_a_permutation() {
        let items = vec![Item::new("a", 0), Item::new("b", 1), Item::new("c", 2)];
        let proposal = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let arranged = arrange(items, &proposal, |item| item.id).unwrap();
        assert_eq!(ids(&arranged), ["c", "a", "b"]);
    }

    #[test]
    fn arrange_rejects_unknown_ids() {
        let items = vec![Item::new("a", 0)];
        let proposal = vec!["a".to_string(), "z".to_string()];
        assert_eq!(
            arrange(items, &proposal, |item| item.id),
            Err(ArrangeError::UnknownId("z".to_string()))
        );
    }

    #[test]
    fn arrange_rejects_duplicates() {
        let items = vec![Item::new("a", 0), Item::new("b", 1)];
        let proposal = vec!["a".to_string(), "a".to_string()];
        assert_eq!(
            arrange(items, &proposal, |item| item.id),
            Err(ArrangeError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn arrange_rejects_incomplete_proposals() {
        let items = vec![Item::new("a", 0), Item::new("b", 1)];
        let proposal = vec!["b".to_string()];
        assert_eq!(
            arrange(items, &proposal, |item| item.id),
            Err(ArrangeError::Incomplete(1))
        );
    }
}
