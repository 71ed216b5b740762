use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::list::iterator::{IntoIter, Iter, IterMut};

pub mod iterator;

mod algorithms;
mod cursor;

/// A doubly-linked list with owned nodes, linked as a cycle through a ghost
/// node.
///
/// The ghost node is allocated once by [`List::new`] and freed by `Drop`, so
/// its address identifies the list even after the `List` value is moved.
/// Its payload is never initialized. There is no cached length;
/// [`List::len`] walks the cycle.
///
/// Nodes are only ever relinked by the reordering operations, never copied.
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A heap node of the list. The ghost node shares this layout, with an
/// uninitialized `element`, so links are always accessed through raw places
/// (see [`Node::next_of`]) and never through a `&Node<T>` that might be the
/// ghost.
#[repr(C)]
pub(crate) struct Node<T> {
    next: NonNull<Node<T>>,
    prev: NonNull<Node<T>>,
    element: T,
}

/// A chain `front..=back` unlinked from any list. The outer links of `front`
/// and `back` are stale until the chain is attached again.
pub(crate) struct DetachedNodes<T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    fn into_element(self: Box<Self>) -> T {
        self.element
    }

    /// Reads the `next` link of `node`, which may be the ghost node.
    ///
    /// It is unsafe because `node` must be a live node of some list.
    #[inline]
    pub(crate) unsafe fn next_of(node: NonNull<Self>) -> NonNull<Self> {
        (*node.as_ptr()).next
    }

    /// Reads the `prev` link of `node`, which may be the ghost node.
    ///
    /// It is unsafe because `node` must be a live node of some list.
    #[inline]
    pub(crate) unsafe fn prev_of(node: NonNull<Self>) -> NonNull<Self> {
        (*node.as_ptr()).prev
    }

    /// It is unsafe because `node` must be a live element node (never the
    /// ghost), and the returned lifetime must not outlive it.
    #[inline]
    pub(crate) unsafe fn element<'a>(node: NonNull<Self>) -> &'a T {
        &(*node.as_ptr()).element
    }

    /// See [`Node::element`].
    #[inline]
    pub(crate) unsafe fn element_mut<'a>(node: NonNull<Self>) -> &'a mut T {
        &mut (*node.as_ptr()).element
    }
}

// Link primitives. Everything that rewires nodes goes through these.
impl<T> List<T> {
    #[inline]
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }

    /// The first element node, or the ghost node if the list is empty.
    #[inline]
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost node lives as long as the list.
        unsafe { Node::next_of(self.ghost) }
    }

    /// The last element node, or the ghost node if the list is empty.
    #[inline]
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost node lives as long as the list.
        unsafe { Node::prev_of(self.ghost) }
    }

    pub(crate) fn has_at_most_one(&self) -> bool {
        self.front_node() == self.back_node()
    }

    /// Unlink the element node `node` and take back its box.
    ///
    /// It is unsafe because `node` must be an element node of this list.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        connect(Node::prev_of(node), Node::next_of(node));
        Box::from_raw(node.as_ptr())
    }

    /// Link the detached `node` between the adjacent nodes `prev` and `next`.
    ///
    /// It is unsafe because `prev` and `next` must be adjacent nodes of this
    /// list (asserted in debug builds), and `node` must not be linked anywhere.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
    }

    /// Unlink the chain `front..=back`, closing the gap behind it.
    ///
    /// It is unsafe because `front..=back` must be a chain of element nodes of
    /// this list, with `front` not after `back`.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
    ) -> DetachedNodes<T> {
        connect(Node::prev_of(front), Node::next_of(back));
        DetachedNodes {
            front,
            back,
            _marker: PhantomData,
        }
    }

    /// Link a detached chain between the adjacent nodes `prev` and `next`.
    ///
    /// It is unsafe for the same reasons as [`List::attach_node`].
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
    }

    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: `front..=back` spans every element node of a non-empty list.
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }

    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        let ghost = list.ghost;
        // SAFETY: the ghost node of an empty list is adjacent to itself.
        unsafe { list.attach_nodes(ghost, ghost, detached) };
        list
    }

    /// Relink the front node to the back of `dest`. Returns `false` if the
    /// list is empty.
    pub(crate) fn move_front_to(&mut self, dest: &mut List<T>) -> bool {
        if self.is_empty() {
            return false;
        }
        let front = self.front_node();
        // SAFETY: `front` is an element node of `self`; the back node and the
        // ghost node of `dest` are adjacent.
        unsafe {
            let detached = self.detach_nodes(front, front);
            dest.attach_nodes(dest.back_node(), dest.ghost, detached);
        }
        true
    }
}

impl<T> List<T> {
    /// Creates an empty `List`.
    pub fn new() -> Self {
        let ghost: Box<Node<MaybeUninit<T>>> = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element: MaybeUninit::uninit(),
        });
        // `Node<MaybeUninit<T>>` and `Node<T>` have the same layout.
        let ghost = NonNull::from(Box::leak(ghost)).cast::<Node<T>>();
        // SAFETY: the ghost node was just allocated.
        unsafe { connect(ghost, ghost) };
        Self {
            ghost,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the list holds no element. *O*(1).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost
    }

    /// Counts the elements by walking the list. *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(["a", "b"]);
    /// list.push_front("c");
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Drops every element, front to back. Each node is unlinked before its
    /// element is dropped.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list is an element node.
        Some(unsafe { Node::element(self.front_node()) })
    }

    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list is an element node.
        Some(unsafe { Node::element(self.back_node()) })
    }

    pub fn push_front(&mut self, elt: T) {
        let node = Node::new_detached(elt);
        let (ghost, front) = (self.ghost, self.front_node());
        // SAFETY: the ghost node and the front node are adjacent.
        unsafe { self.attach_node(ghost, front, node) };
    }

    pub fn push_back(&mut self, elt: T) {
        let node = Node::new_detached(elt);
        let (back, ghost) = (self.back_node(), self.ghost);
        // SAFETY: the back node and the ghost node are adjacent.
        unsafe { self.attach_node(back, ghost, node) };
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list is an element node.
        let node = unsafe { self.detach_node(self.front_node()) };
        Some(node.into_element())
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list is an element node.
        let node = unsafe { self.detach_node(self.back_node()) };
        Some(node.into_element())
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Relinks every node of `other` to the back of the list, leaving `other`
    /// empty. *O*(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1]);
    /// let mut other = List::from_iter([2, 3]);
    /// list.append(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            let (back, ghost) = (self.back_node(), self.ghost);
            // SAFETY: the back node and the ghost node are adjacent.
            unsafe { self.attach_nodes(back, ghost, detached) }
        }
    }

    /// Walks the cycle from the ghost node and checks that every `next` link
    /// is answered by the matching `prev` link, until the walk is back at the
    /// ghost node.
    ///
    /// Since the links are checked to be mutually inverse, the walk cannot be
    /// trapped in a cycle that skips the ghost node.
    pub fn is_well_formed(&self) -> bool {
        let mut node = self.ghost;
        loop {
            // SAFETY: each node is reached from the ghost node through checked
            // links, so it is a live node of the list.
            let next = unsafe { Node::next_of(node) };
            if unsafe { Node::prev_of(next) } != node {
                return false;
            }
            node = next;
            if node == self.ghost {
                return true;
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was leaked from a `Box<Node<MaybeUninit<T>>>`
        // in `List::new`, and its payload needs no drop.
        unsafe { drop(Box::from_raw(self.ghost.cast::<Node<MaybeUninit<T>>>().as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

/// Links `prev` and `next` to each other.
///
/// It is unsafe because both nodes must be live. Either may be a ghost node.
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

/// Relinks the chain `from_front..=from_back` right before `to`.
///
/// It is unsafe because the chain must be made of element nodes of one list,
/// and `to` must be a node of that list outside of the chain.
pub(crate) unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(Node::prev_of(from_front), Node::next_of(from_back));
    connect(Node::prev_of(to), from_front);
    connect(from_back, to);
}

/// Relinks the element node `from` right before `to`.
///
/// It is unsafe because `from` and `to` must be distinct nodes of one list.
pub(crate) unsafe fn move_node<T>(from: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    debug_assert_ne!(from, to, "a node cannot be moved before itself");
    move_nodes(from, from, to);
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    // SAFETY: only called on live nodes by the attach primitives.
    unsafe {
        assert_eq!(Node::next_of(prev), next);
        assert_eq!(Node::prev_of(next), prev);
    }
}

// `List` and `Iter` must stay covariant in `T`.
#[allow(dead_code)]
fn assert_covariance() {
    fn list<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn iter<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn into_iter<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
