//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized delete_min
//!
//! The structure is a forest of heap-ordered multi-way trees. Roots are linked
//! in a circular doubly linked list and the heap keeps a reference to the
//! minimum root. Work is deferred: insert and merge only splice root lists,
//! and the expensive consolidation of equal-degree trees runs once per
//! delete_min. A marking rule bounds how often decrease_key may cut nodes out
//! of their parents, which is what preserves the amortized bounds.
//!
//! This implementation uses Rc/Weak references instead of raw pointers,
//! providing memory safety for the cyclic sibling structure. Caller handles
//! are weak references, so a handle whose element has been extracted fails to
//! upgrade instead of dangling.

use crate::error::HeapError;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Type alias for strong node reference
type NodeRef<T, P> = Rc<RefCell<Node<T, P>>>;
/// Type alias for weak node reference (used for parent backlinks and handles)
type WeakNodeRef<T, P> = Weak<RefCell<Node<T, P>>>;
/// Type alias for optional strong node reference
type OptNodeRef<T, P> = Option<NodeRef<T, P>>;

/// Handle to an element in a Fibonacci heap
///
/// Returned by [`FibonacciHeap::insert`] and later passed back to
/// [`FibonacciHeap::decrease_key`] or [`FibonacciHeap::delete`]. The handle
/// does not keep the element alive: once the element has been extracted, any
/// further use of the handle reports [`HeapError::StaleHandle`].
///
/// A handle is tied to the heap that issued it. Passing it to a different
/// heap is not detected and mutates the wrong structure.
#[derive(Debug)]
pub struct FibonacciHandle<T, P> {
    node: WeakNodeRef<T, P>,
}

impl<T, P> Clone for FibonacciHandle<T, P> {
    fn clone(&self) -> Self {
        FibonacciHandle {
            node: self.node.clone(),
        }
    }
}

impl<T, P> PartialEq for FibonacciHandle<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(&other.node)
    }
}

impl<T, P> Eq for FibonacciHandle<T, P> {}

struct Node<T, P> {
    item: T,
    priority: P,
    /// Number of immediate children.
    degree: usize,
    /// True once the node has lost a child since it last became a child of
    /// its current parent. A second loss cuts the node itself.
    marked: bool,
    parent: WeakNodeRef<T, P>,
    /// One arbitrary child; the children form their own circular ring.
    child: OptNodeRef<T, P>,
    /// Sibling ring. A node with no siblings references itself both ways.
    /// `None` only while a node is being created or torn down.
    left: OptNodeRef<T, P>,
    right: OptNodeRef<T, P>,
}

/// Fibonacci Heap
///
/// A min-heap over `(priority, item)` pairs. The priority is the ordering
/// key and the item is an opaque payload; the two are independent fields.
///
/// # Example
///
/// ```rust
/// use fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    min: OptNodeRef<T, P>,
    len: usize,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Drop for FibonacciHeap<T, P> {
    fn drop(&mut self) {
        // Sibling rings are strong reference cycles, so every link has to be
        // broken by hand. Each ring is reachable through `right` edges from
        // its entry node, and each node revisits are no-ops because the links
        // were already taken.
        let mut pending = Vec::new();
        if let Some(min) = self.min.take() {
            pending.push(min);
        }
        while let Some(node) = pending.pop() {
            let mut node = node.borrow_mut();
            if let Some(child) = node.child.take() {
                pending.push(child);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
            node.left = None;
        }
        self.len = 0;
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self { min: None, len: 0 }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts an element with the given priority, returning a handle
    ///
    /// The handle can be used later with [`decrease_key`](Self::decrease_key)
    /// or [`delete`](Self::delete). Any priority value is accepted.
    ///
    /// # Time Complexity
    /// O(1): the new singleton ring is spliced into the root list.
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle<T, P> {
        let node = Rc::new(RefCell::new(Node {
            item,
            priority,
            degree: 0,
            marked: false,
            parent: Weak::new(),
            child: None,
            left: None,
            right: None,
        }));
        node.borrow_mut().left = Some(Rc::clone(&node));
        node.borrow_mut().right = Some(Rc::clone(&node));

        let handle = FibonacciHandle {
            node: Rc::downgrade(&node),
        };

        let roots = self.min.take();
        self.min = Self::merge_lists(roots, Some(node));
        self.len += 1;

        handle
    }

    /// Returns the minimum priority and associated item without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(1), no mutation.
    pub fn find_min(&self) -> Result<(&P, &T), HeapError> {
        let min = self.min.as_ref().ok_or(HeapError::EmptyHeap)?;
        // The returned references borrow `self`, which keeps every mutating
        // operation away for their lifetime; nodes are never borrowed outside
        // this module.
        unsafe {
            let node = min.as_ptr();
            Ok((&(*node).priority, &(*node).item))
        }
    }

    /// Option-returning convenience over [`find_min`](Self::find_min)
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.find_min().ok()
    }

    /// Removes and returns the minimum priority and associated item
    ///
    /// The children of the removed root are detached, unmarked, and spliced
    /// into the root list; the surviving roots are then consolidated so that
    /// no two roots share a degree, which also locates the new minimum.
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized, dominated by consolidation.
    pub fn delete_min(&mut self) -> Result<(P, T), HeapError> {
        let min = self.min.take().ok_or(HeapError::EmptyHeap)?;
        self.len -= 1;

        // Splice the minimum out of the root ring.
        let rest = {
            let left = min.borrow_mut().left.take();
            let right = min.borrow_mut().right.take();
            match (left, right) {
                (Some(left), Some(right)) if !Rc::ptr_eq(&left, &min) => {
                    left.borrow_mut().right = Some(Rc::clone(&right));
                    right.borrow_mut().left = Some(left);
                    Some(right)
                }
                // The minimum was the sole root.
                _ => None,
            }
        };

        // Detach the children: each becomes an unmarked, parentless root
        // candidate while the ring itself stays intact.
        let children = min.borrow_mut().child.take();
        if let Some(ref first) = children {
            let mut cursor = Rc::clone(first);
            loop {
                {
                    let mut node = cursor.borrow_mut();
                    node.parent = Weak::new();
                    node.marked = false;
                }
                let next = Self::right_of(&cursor);
                if Rc::ptr_eq(&next, first) {
                    break;
                }
                cursor = next;
            }
        }

        self.min = Self::merge_lists(rest, children);
        if self.min.is_some() {
            self.consolidate();
        }

        #[cfg(debug_assertions)]
        {
            assert_eq!(
                self.count_reachable(),
                self.len,
                "node count diverged from len after delete_min"
            );
        }

        // Every other strong reference was dropped by the splices above.
        match Rc::try_unwrap(min) {
            Ok(cell) => {
                let node = cell.into_inner();
                Ok((node.priority, node.item))
            }
            Err(_) => unreachable!("extracted node is still referenced"),
        }
    }

    /// Option-returning convenience over [`delete_min`](Self::delete_min)
    pub fn pop(&mut self) -> Option<(P, T)> {
        self.delete_min().ok()
    }

    /// Decreases the priority of the element identified by the handle
    ///
    /// If the new priority violates heap order against the parent, the node
    /// is cut out of its parent's child ring and spliced into the root list;
    /// the cut then cascades upward through already-marked ancestors. Equal
    /// priority is accepted and treated as a decrease.
    ///
    /// # Errors
    /// - [`HeapError::StaleHandle`] if the element was already extracted.
    /// - [`HeapError::InvalidPriority`] if `new_priority` is greater than the
    ///   element's current priority. The heap is left unchanged.
    ///
    /// # Time Complexity
    /// O(1) amortized; a single call may cascade through several cuts.
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle<T, P>,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = handle.node.upgrade().ok_or(HeapError::StaleHandle)?;
        if new_priority > node.borrow().priority {
            return Err(HeapError::InvalidPriority);
        }
        node.borrow_mut().priority = new_priority;

        let parent = node.borrow().parent.upgrade();
        if let Some(parent) = parent {
            let violated = node.borrow().priority <= parent.borrow().priority;
            if violated {
                self.cut(&node);
            }
        }

        // The node may now carry the global minimum.
        let take_min = match self.min {
            Some(ref min) => node.borrow().priority <= min.borrow().priority,
            None => true,
        };
        if take_min {
            self.min = Some(node);
        }
        Ok(())
    }

    /// Removes the element identified by the handle from the heap
    ///
    /// Behaves as a decrease to negative infinity followed by
    /// [`delete_min`](Self::delete_min): the node is cut to the root list
    /// unconditionally, crowned minimum, and extracted.
    ///
    /// # Errors
    /// Returns [`HeapError::StaleHandle`] if the element was already
    /// extracted.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    pub fn delete(&mut self, handle: &FibonacciHandle<T, P>) -> Result<(P, T), HeapError> {
        let node = handle.node.upgrade().ok_or(HeapError::StaleHandle)?;
        let has_parent = node.borrow().parent.upgrade().is_some();
        if has_parent {
            self.cut(&node);
        }
        self.min = Some(node);
        self.delete_min()
    }

    /// Merges two heaps into one, consuming both
    ///
    /// The root lists are spliced together and the counts summed; no
    /// consolidation happens until the next
    /// [`delete_min`](Self::delete_min). Taking both heaps by value is what
    /// makes the destructive contract explicit: the inputs cannot be touched
    /// again.
    ///
    /// # Time Complexity
    /// O(1).
    #[must_use]
    pub fn merge(mut first: Self, mut second: Self) -> Self {
        let first_roots = first.min.take();
        let second_roots = second.min.take();
        let len = first.len + second.len;
        first.len = 0;
        second.len = 0;
        Self {
            min: Self::merge_lists(first_roots, second_roots),
            len,
        }
    }

    /// Splices two circular sibling rings into one in O(1)
    ///
    /// Returns whichever of the two entry nodes has the smaller priority, so
    /// callers that track a minimum can assign the result directly. The two
    /// rings must be distinct. Underlies insert, merge, cuts, and linking.
    fn merge_lists(first: OptNodeRef<T, P>, second: OptNodeRef<T, P>) -> OptNodeRef<T, P> {
        match (first, second) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                let a_right = Self::right_of(&a);
                let b_right = Self::right_of(&b);
                a.borrow_mut().right = Some(Rc::clone(&b_right));
                b_right.borrow_mut().left = Some(Rc::clone(&a));
                b.borrow_mut().right = Some(Rc::clone(&a_right));
                a_right.borrow_mut().left = Some(Rc::clone(&b));

                let a_smaller = a.borrow().priority < b.borrow().priority;
                Some(if a_smaller { a } else { b })
            }
        }
    }

    /// Merges equal-degree root trees until every root has a distinct degree,
    /// then recomputes the minimum. Invoked only by delete_min.
    fn consolidate(&mut self) {
        let start = match self.min {
            Some(ref min) => Rc::clone(min),
            None => return,
        };

        // One fixed snapshot of the root ring; linking below rewires the
        // ring mid-pass, so iterating it live would misbehave.
        let mut roots = vec![Rc::clone(&start)];
        let mut cursor = Self::right_of(&start);
        while !Rc::ptr_eq(&cursor, &start) {
            let next = Self::right_of(&cursor);
            roots.push(cursor);
            cursor = next;
        }

        // Degree-indexed table of surviving roots, grown on demand. A single
        // snapshotted root can win several merges in a row, its degree rising
        // by one each time, before it finally lands in an empty slot.
        let mut by_degree: Vec<OptNodeRef<T, P>> = Vec::new();
        for root in roots {
            let mut tree = root;
            loop {
                let degree = tree.borrow().degree;
                if by_degree.len() <= degree {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    Some(other) => tree = Self::link(tree, other),
                    None => {
                        by_degree[degree] = Some(tree);
                        break;
                    }
                }
            }
        }

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            let smaller = match self.min {
                Some(ref min) => root.borrow().priority < min.borrow().priority,
                None => true,
            };
            if smaller {
                self.min = Some(root);
            }
        }
    }

    /// Links two root trees of equal degree: the higher-priority root leaves
    /// the root ring and descends into the other's child ring. Returns the
    /// winner.
    fn link(a: NodeRef<T, P>, b: NodeRef<T, P>) -> NodeRef<T, P> {
        let a_smaller = a.borrow().priority < b.borrow().priority;
        let (winner, loser) = if a_smaller { (a, b) } else { (b, a) };

        // Unlink the loser from the root ring. The winner shares the ring,
        // so the ring has at least two nodes.
        let left = Self::left_of(&loser);
        let right = Self::right_of(&loser);
        left.borrow_mut().right = Some(Rc::clone(&right));
        right.borrow_mut().left = Some(left);
        loser.borrow_mut().left = Some(Rc::clone(&loser));
        loser.borrow_mut().right = Some(Rc::clone(&loser));

        loser.borrow_mut().parent = Rc::downgrade(&winner);
        loser.borrow_mut().marked = false;

        let child = winner.borrow_mut().child.take();
        winner.borrow_mut().child = Self::merge_lists(child, Some(Rc::clone(&loser)));
        winner.borrow_mut().degree += 1;
        winner
    }

    /// Cuts a node out of its parent's child ring into the root list, then
    /// walks upward: a marked non-root ancestor has already lost a child and
    /// is cut as well; an unmarked non-root ancestor takes the mark and the
    /// walk stops. An explicit loop rather than recursion, so a long cascade
    /// cannot overflow the stack.
    fn cut(&mut self, node: &NodeRef<T, P>) {
        let mut current = Rc::clone(node);
        loop {
            // A node entering the root list carries no mark.
            current.borrow_mut().marked = false;

            let parent = match current.borrow().parent.upgrade() {
                Some(parent) => parent,
                None => return,
            };

            // Detach `current` from the sibling ring; an arbitrary sibling
            // takes over the parent's child slot.
            let left = Self::left_of(&current);
            let right = Self::right_of(&current);
            let sole_child = Rc::ptr_eq(&right, &current);
            if !sole_child {
                left.borrow_mut().right = Some(Rc::clone(&right));
                right.borrow_mut().left = Some(left);
            }
            let fills_child_slot = {
                let parent_ref = parent.borrow();
                parent_ref
                    .child
                    .as_ref()
                    .map_or(false, |child| Rc::ptr_eq(child, &current))
            };
            if fills_child_slot {
                parent.borrow_mut().child = if sole_child {
                    None
                } else {
                    Some(Rc::clone(&right))
                };
            }
            parent.borrow_mut().degree -= 1;

            // The subtree re-enters the root list.
            current.borrow_mut().left = Some(Rc::clone(&current));
            current.borrow_mut().right = Some(Rc::clone(&current));
            current.borrow_mut().parent = Weak::new();
            let roots = self.min.take();
            self.min = Self::merge_lists(roots, Some(Rc::clone(&current)));

            let parent_is_root = parent.borrow().parent.upgrade().is_none();
            if parent_is_root {
                return;
            }
            let parent_marked = parent.borrow().marked;
            if parent_marked {
                current = parent;
            } else {
                parent.borrow_mut().marked = true;
                return;
            }
        }
    }

    fn left_of(node: &NodeRef<T, P>) -> NodeRef<T, P> {
        node.borrow().left.clone().expect("sibling ring is broken")
    }

    fn right_of(node: &NodeRef<T, P>) -> NodeRef<T, P> {
        node.borrow().right.clone().expect("sibling ring is broken")
    }

    /// Counts all nodes reachable from the root list (debug builds only)
    #[cfg(debug_assertions)]
    fn count_reachable(&self) -> usize {
        let mut count = 0;
        if let Some(ref min) = self.min {
            let mut cursor = Rc::clone(min);
            loop {
                count += Self::count_subtree(&cursor);
                let next = Self::right_of(&cursor);
                if Rc::ptr_eq(&next, min) {
                    break;
                }
                cursor = next;
            }
        }
        count
    }

    #[cfg(debug_assertions)]
    fn count_subtree(node: &NodeRef<T, P>) -> usize {
        let mut count = 1;
        let child = node.borrow().child.clone();
        if let Some(ref first) = child {
            let mut cursor = Rc::clone(first);
            loop {
                count += Self::count_subtree(&cursor);
                let next = Self::right_of(&cursor);
                if Rc::ptr_eq(&next, first) {
                    break;
                }
                cursor = next;
            }
        }
        count
    }
}
