//! A queue of owned strings, [`Queue`], stored in a cyclic doubly-linked
//! [`List`] with a ghost node.
//!
//! Strings are copied once, on insertion. From then on every operation works
//! by relinking nodes: inserting and removing at either end, deleting the
//! middle element or duplicated runs, swapping pairs, reversing (whole or in
//! groups of `k`), merge sorting, the monotonic `ascend`/`descend` filters and
//! merging a chain of sorted queues.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::from_iter(["dolphin", "bear", "gerbil", "bear"]);
//!
//! queue.sort(false);
//! assert_eq!(Vec::from_iter(queue.values()), vec!["bear", "bear", "dolphin", "gerbil"]);
//!
//! assert!(queue.delete_dup()); // every copy of "bear" goes
//! assert_eq!(queue.remove_tail().unwrap().value(), "gerbil");
//! assert_eq!(queue.size(), 1);
//! ```
//!
//! # Layout
//!
//! ```text
//!          ┌─────────────────────────────────────────────────────────────┐
//!          ↓                                                  ghost node │
//!    ╔═══════════╗      ╔═══════════╗                     ┌───────────┐  │
//!    ║   next    ║ ───→ ║   next    ║ ───→ ┄┄ ───────────→ │   next    │ ─┘
//!    ╟───────────╢      ╟───────────╢                     ├───────────┤
//! ┌─ ║   prev    ║ ←─── ║   prev    ║ ←─── ┄┄ ←─────────── │   prev    │
//! │  ╟───────────╢      ╟───────────╢                     ├╌╌╌╌╌╌╌╌╌╌╌┤
//! │  ║  element  ║      ║  element  ║                     ┊  (uninit) ┊
//! │  ╚═══════════╝      ╚═══════════╝                     └╌╌╌╌╌╌╌╌╌╌╌┘
//! │     front               ...                              ↑    ↑
//! └──────────────────────────────────────────────────────────┘    │
//!                                                  List { ghost } ┘
//! ```
//!
//! A `List` is a single pointer to its heap-allocated ghost node. The ghost
//! node has the size of an element node, but its element slot is never
//! initialized or read. In an empty list both links of the ghost node point
//! to itself; otherwise `next` is the front node and `prev` the back node.
//! The length is not stored. [`Queue::size`] counts the nodes.
//!
//! # Logging
//!
//! The [`Queue`] operations emit [`tracing`] events carrying counts and
//! flags, never the stored strings. Installing a subscriber is up to the
//! application.
//!
//! # Features
//!
//! - `invariant-checks`: after every mutating [`Queue`] operation, walk the
//!   queue and assert that each `next` link is answered by the matching `prev`
//!   link. This makes every operation *O*(*n*), so it is off by default.

#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::{Element, Queue};

pub mod list;
pub mod queue;

mod error;
