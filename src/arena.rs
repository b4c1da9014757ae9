use crate::location::*;
use fnv::FnvHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// Search state of a single visited cell.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub parent: Option<Position>,
    pub state: NodeState,
}

impl Node {
    fn fresh() -> Self {
        Node {
            g: u32::MAX,
            h: 0,
            f: u32::MAX,
            parent: None,
            state: NodeState::Unvisited,
        }
    }
}

/// Queue entry ordered by `(f, h, seq)` ascending. `seq` is unique per
/// push, so entries only compare equal to themselves.
#[derive(Copy, Clone, Debug)]
pub struct OpenEntry {
    pub f: u32,
    pub h: u32,
    pub g: u32,
    seq: u64,
    pub pos: Position,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sparse node table plus open list. Memory grows with the cells a search
/// touches, never with the size of the world.
#[derive(Default)]
pub struct NodeArena {
    nodes: FnvHashMap<Position, Node>,
    open: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena::default()
    }

    /// Forget all nodes, keeping allocations for the next search.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.next_seq = 0;
    }

    pub fn get(&self, pos: Position) -> Option<&Node> {
        self.nodes.get(&pos)
    }

    pub fn get_or_create(&mut self, pos: Position) -> &mut Node {
        self.nodes.entry(pos).or_insert_with(Node::fresh)
    }

    /// Record an improved cost for `pos` and queue it.
    pub fn push(&mut self, pos: Position, parent: Option<Position>, g: u32, h: u32, f: u32) {
        let node = self.get_or_create(pos);
        node.g = g;
        node.h = h;
        node.f = f;
        node.parent = parent;
        node.state = NodeState::Open;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.open.push(OpenEntry { f, h, g, seq, pos });
    }

    /// Pop the best open node and close it. Entries superseded by a cheaper
    /// push are skipped.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        while let Some(entry) = self.open.pop() {
            let node = match self.nodes.get_mut(&entry.pos) {
                Some(node) => node,
                None => continue,
            };
            if node.state != NodeState::Open || node.g != entry.g {
                continue;
            }
            node.state = NodeState::Closed;
            return Some(entry);
        }
        None
    }

    pub fn is_closed(&self, pos: Position) -> bool {
        matches!(self.nodes.get(&pos), Some(n) if n.state == NodeState::Closed)
    }

    /// Walk predecessor links from `end` back to the root. The root itself
    /// is not included; the result is in travel order.
    pub fn path_to(&self, end: Position) -> Vec<Position> {
        let mut path = Vec::new();
        let mut current = end;
        while let Some(node) = self.nodes.get(&current) {
            match node.parent {
                Some(parent) => {
                    path.push(current);
                    current = parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    pub fn visited(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        RoomId::from_coords(128, 128).position(x, y).unwrap()
    }

    #[test]
    fn fresh_nodes_are_unvisited_and_unreached() {
        let mut arena = NodeArena::new();
        let node = arena.get_or_create(pos(1, 1));
        assert_eq!(node.g, u32::MAX);
        assert_eq!(node.state, NodeState::Unvisited);
        assert_eq!(arena.visited(), 1);
    }

    #[test]
    fn ties_break_on_heuristic_then_insertion() {
        let mut arena = NodeArena::new();
        arena.push(pos(1, 1), None, 5, 3, 8);
        arena.push(pos(2, 2), None, 6, 2, 8);
        arena.push(pos(3, 3), None, 6, 2, 8);
        arena.push(pos(4, 4), None, 1, 1, 2);

        let order: Vec<_> = std::iter::from_fn(|| arena.pop().map(|e| e.pos)).collect();
        assert_eq!(order, vec![pos(4, 4), pos(2, 2), pos(3, 3), pos(1, 1)]);
    }

    #[test]
    fn entry_equality_follows_queue_order() {
        let a = OpenEntry { f: 3, h: 1, g: 2, seq: 0, pos: pos(1, 1) };
        let later = OpenEntry { seq: 1, ..a };
        let same_key = OpenEntry { g: 0, pos: pos(9, 9), ..a };

        assert_ne!(a, later);
        assert!(a > later);
        assert_eq!(a, same_key);
        assert_eq!(a.cmp(&same_key), Ordering::Equal);
    }

    #[test]
    fn superseded_entries_are_skipped() {
        let mut arena = NodeArena::new();
        arena.push(pos(1, 1), None, 10, 0, 10);
        arena.push(pos(1, 1), None, 4, 0, 4);

        let first = arena.pop().unwrap();
        assert_eq!(first.g, 4);
        assert!(arena.is_closed(pos(1, 1)));
        assert!(arena.pop().is_none());
    }

    #[test]
    fn path_excludes_root_and_runs_forward() {
        let mut arena = NodeArena::new();
        arena.push(pos(0, 0), None, 0, 0, 0);
        arena.push(pos(1, 0), Some(pos(0, 0)), 1, 0, 1);
        arena.push(pos(2, 1), Some(pos(1, 0)), 2, 0, 2);

        assert_eq!(arena.path_to(pos(2, 1)), vec![pos(1, 0), pos(2, 1)]);
        assert!(arena.path_to(pos(0, 0)).is_empty());

        arena.reset();
        assert_eq!(arena.visited(), 0);
        assert!(arena.pop().is_none());
    }
}
