//! A queue of owned strings, backed by a cyclic [`List`].
//!
//! Every operation relinks nodes of the underlying list; a string is copied
//! once when it is inserted and never moved or copied afterwards.

use crate::error::{QueueError, Result};
use crate::list::iterator::Iter;
use crate::list::List;
use std::fmt;
use tracing::{debug, trace, warn};

/// An owned string value stored in a [`Queue`].
///
/// Elements compare by their values, byte-wise.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copy `value` into a new element, reporting allocation failure instead
    /// of aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::new("gerbil").unwrap();
    /// assert_eq!(element.value(), "gerbil");
    /// ```
    pub fn new(value: &str) -> Result<Self> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len())?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Consumes the element. Its string storage is released when `self` is
    /// dropped at the end of this call.
    pub fn release(self) {}
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

/// A queue of strings supporting insertion and removal at both ends, and a
/// set of in-place reordering operations.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("a")?;
/// queue.insert_tail("c")?;
/// queue.insert_tail("b")?;
///
/// queue.sort(false);
/// assert_eq!(queue.remove_head().map(|e| e.into_value()), Some("a".to_owned()));
/// assert_eq!(queue.size(), 2);
/// assert_eq!(Vec::from_iter(queue.values()), vec!["b", "c"]);
/// # Ok::<(), cyclic_queue::QueueError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Queue {
    list: List<Element>,
}

impl Queue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Release the queue and every element it still holds, front to back.
    ///
    /// Dropping the queue has the same effect.
    pub fn free(mut self) {
        self.list.clear();
    }

    /// With the `invariant-checks` feature, walks the whole queue and asserts
    /// that its links are consistent. Without it this is a no-op, so the end
    /// operations stay *O*(1).
    fn check_links(&self) {
        if cfg!(feature = "invariant-checks") {
            assert!(self.list.is_well_formed(), "queue links are corrupted");
        }
    }

    /// Copy `value` into a new element at the head of the queue.
    ///
    /// On allocation failure the queue is left untouched.
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        let element = Element::new(value)?;
        self.list.push_front(element);
        self.check_links();
        Ok(())
    }

    /// Copy `value` into a new element at the tail of the queue.
    ///
    /// On allocation failure the queue is left untouched.
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        let element = Element::new(value)?;
        self.list.push_back(element);
        self.check_links();
        Ok(())
    }

    /// Unlink the head element and hand it over, or return `None` if the
    /// queue is empty.
    pub fn remove_head(&mut self) -> Option<Element> {
        let element = self.list.pop_front();
        self.check_links();
        element
    }

    /// Unlink the tail element and hand it over, or return `None` if the
    /// queue is empty.
    pub fn remove_tail(&mut self) -> Option<Element> {
        let element = self.list.pop_back();
        self.check_links();
        element
    }

    /// Like [`Queue::remove_head`], and also copy the removed value into `buf`
    /// as a zero-terminated byte string, truncated to `buf.len() - 1` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["dolphin", "bear"]);
    /// let mut buf = [0xff_u8; 4];
    /// let removed = queue.remove_head_into(&mut buf).unwrap();
    ///
    /// assert_eq!(removed.value(), "dolphin");
    /// assert_eq!(&buf, b"dol\0");
    /// ```
    pub fn remove_head_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.remove_head()?;
        copy_into(element.value(), buf);
        Some(element)
    }

    /// Like [`Queue::remove_tail`], and also copy the removed value into `buf`
    /// as a zero-terminated byte string, truncated to `buf.len() - 1` bytes.
    pub fn remove_tail_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.remove_tail()?;
        copy_into(element.value(), buf);
        Some(element)
    }

    /// Returns the number of elements, counted by walking the queue.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn head(&self) -> Option<&str> {
        self.list.front().map(Element::value)
    }

    pub fn tail(&self) -> Option<&str> {
        self.list.back().map(Element::value)
    }

    pub fn iter(&self) -> Iter<'_, Element> {
        self.list.iter()
    }

    /// Iterate over the values from head to tail.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.list.iter().map(Element::value)
    }

    /// Delete the middle element, i.e. the one at index ⌊(*n* - 1) / 2⌋ for
    /// a queue with *n* elements. Returns `false` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// assert!(queue.delete_mid());
    /// assert_eq!(Vec::from_iter(queue.values()), vec!["a", "c", "d"]);
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        let deleted = match self.list.remove_mid() {
            Some(_) => {
                trace!(len = self.list.len(), "deleted middle element");
                true
            }
            None => false,
        };
        self.check_links();
        deleted
    }

    /// Delete every value that occurs more than once, all of its copies
    /// included. Returns `true` if anything was deleted.
    ///
    /// The queue must be sorted; that is not checked here. On an unsorted
    /// queue only adjacent runs of equal values are deleted. Use
    /// [`Queue::try_delete_dup`] to check first.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c", "c"]);
    /// assert!(queue.delete_dup());
    /// assert_eq!(Vec::from_iter(queue.values()), vec!["b"]);
    /// ```
    pub fn delete_dup(&mut self) -> bool {
        let removed = self.list.dedup_runs();
        trace!(removed, "deleted duplicated values");
        self.check_links();
        removed > 0
    }

    /// Like [`Queue::delete_dup`], but leave the queue untouched and fail with
    /// [`QueueError::Unsorted`] if it is not sorted in ascending order.
    pub fn try_delete_dup(&mut self) -> Result<bool> {
        if let Some(index) = self.first_unsorted() {
            warn!(index, "refusing to delete duplicates of an unsorted queue");
            return Err(QueueError::Unsorted { index });
        }
        Ok(self.delete_dup())
    }

    fn first_unsorted(&self) -> Option<usize> {
        self.list
            .iter()
            .zip(self.list.iter().skip(1))
            .position(|(prev, next)| next < prev)
            .map(|at| at + 1)
    }

    /// Swap every two adjacent elements. A trailing unpaired element stays.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
        self.check_links();
    }

    /// Reverse the queue in place.
    pub fn reverse(&mut self) {
        self.list.reverse();
        self.check_links();
    }

    /// Reverse every consecutive group of `k` elements from the head. The
    /// trailing elements that do not fill a group keep their order.
    ///
    /// Nothing happens if `k < 2`; see [`Queue::try_reverse_k`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.reverse_k(2);
    /// assert_eq!(Vec::from_iter(queue.values()), vec!["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        self.list.reverse_groups(k);
        trace!(k, "reversed groups");
        self.check_links();
    }

    /// Like [`Queue::reverse_k`], but fail with
    /// [`QueueError::InvalidGroupSize`] if `k < 2`.
    pub fn try_reverse_k(&mut self, k: usize) -> Result<()> {
        if k < 2 {
            return Err(QueueError::InvalidGroupSize(k));
        }
        self.reverse_k(k);
        Ok(())
    }

    /// Sort the queue in ascending order, or in descending order if `descend`
    /// is set, with a merge sort over the nodes.
    pub fn sort(&mut self, descend: bool) {
        self.list.sort();
        if descend {
            self.list.reverse();
        }
        trace!(descend, "sorted queue");
        self.check_links();
    }

    /// Delete every element that has a strictly smaller element anywhere on
    /// its right. The queue is then in ascending order. Returns the number of
    /// deleted elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "5", "2", "2", "3"]);
    /// assert_eq!(queue.ascend(), 1);
    /// assert_eq!(Vec::from_iter(queue.values()), vec!["1", "2", "2", "3"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        let removed = self.list.remove_if_followed_by(|right, elt| right < elt);
        trace!(removed, "filtered queue to ascending");
        self.check_links();
        removed
    }

    /// Delete every element that has a strictly greater element anywhere on
    /// its right. The queue is then in descending order. Returns the number
    /// of deleted elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["5", "2", "9", "3", "8"]);
    /// assert_eq!(queue.descend(), 3);
    /// assert_eq!(Vec::from_iter(queue.values()), vec!["9", "8"]);
    /// ```
    pub fn descend(&mut self) -> usize {
        let removed = self.list.remove_if_followed_by(|right, elt| right > elt);
        trace!(removed, "filtered queue to descending");
        self.check_links();
        removed
    }

    /// Merge `other` into this queue. Both must be sorted in ascending order.
    /// Afterwards this queue holds every element in ascending order and
    /// `other` is empty.
    pub fn merge_two(&mut self, other: &mut Queue) {
        self.list.merge(&mut other.list);
        self.check_links();
        other.check_links();
    }

    /// Merge every queue of the chain into the first one, and return the
    /// number of elements in it, or 0 if the chain is empty.
    ///
    /// Every queue must be sorted in ascending order, or in descending order
    /// if `descend` is set. The other queues are left empty in the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{List, Queue};
    ///
    /// let mut chain = List::from_iter([
    ///     Queue::from_iter(["e", "c", "a"]),
    ///     Queue::from_iter(["d", "b"]),
    ///     Queue::from_iter(["f"]),
    /// ]);
    ///
    /// assert_eq!(Queue::merge(&mut chain, true), 6);
    /// let merged = chain.front().unwrap();
    /// assert_eq!(Vec::from_iter(merged.values()), vec!["f", "e", "d", "c", "b", "a"]);
    /// assert!(chain.iter().skip(1).all(Queue::is_empty));
    /// ```
    pub fn merge(queues: &mut List<Queue>, descend: bool) -> usize {
        let mut chain = queues.iter_mut();
        let first = match chain.next() {
            Some(first) => first,
            None => return 0,
        };
        let mut merged = 1;
        for queue in chain {
            if descend {
                first.list.merge_by(&mut queue.list, |a, b| a > b);
            } else {
                first.list.merge(&mut queue.list);
            }
            queue.check_links();
            merged += 1;
        }
        first.check_links();
        let len = first.size();
        debug!(queues = merged, len, descend, "merged sorted queues");
        len
    }

    /// Checks the links of the queue. See [`List::is_well_formed`].
    pub fn is_well_formed(&self) -> bool {
        self.list.is_well_formed()
    }
}

fn copy_into(value: &str, buf: &mut [u8]) {
    let limit = match buf.len().checked_sub(1) {
        Some(limit) => limit,
        None => return,
    };
    let len = value.len().min(limit);
    buf[..len].copy_from_slice(&value.as_bytes()[..len]);
    buf[len] = 0;
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> Extend<&'a str> for Queue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.list.extend(iter.into_iter().map(Element::from));
    }
}

impl IntoIterator for Queue {
    type Item = Element;
    type IntoIter = crate::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}


#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::Queue;

    /// Short values over a small alphabet, so that equal values are common.
    fn value() -> impl Strategy<Value = String> {
        "[a-d]{0,2}"
    }

    fn value_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(value(), 0..40)
    }

    fn queue_of(values: &[String]) -> Queue {
        Queue::from_iter(values.iter().map(String::as_str))
    }

    fn contents(queue: &Queue) -> Vec<String> {
        queue.values().map(str::to_owned).collect()
    }

    fn dedup_model(values: &[String]) -> Vec<String> {
        let mut kept = Vec::new();
        let mut start = 0;
        while start < values.len() {
            let mut end = start + 1;
            while end < values.len() && values[end] == values[start] {
                end += 1;
            }
            if end - start == 1 {
                kept.push(values[start].clone());
            }
            start = end;
        }
        kept
    }

    fn filter_model(values: &[String], dominates: fn(&String, &String) -> bool) -> Vec<String> {
        values
            .iter()
            .enumerate()
            .filter(|&(i, elt)| !values[i + 1..].iter().any(|right| dominates(right, elt)))
            .map(|(_, elt)| elt.clone())
            .collect()
    }

    fn reverse_k_model(values: &mut [String], k: usize) {
        if k >= 2 {
            values.chunks_exact_mut(k).for_each(|chunk| chunk.reverse());
        }
    }

    fn swap_model(values: &mut [String]) {
        values.chunks_exact_mut(2).for_each(|pair| pair.swap(0, 1));
    }

    proptest! {
        #[test]
        fn sort_orders_and_keeps_values(values in value_list(), descend in any::<bool>()) {
            let mut queue = queue_of(&values);
            queue.sort(descend);

            let mut expected = values;
            expected.sort();
            if descend {
                expected.reverse();
            }
            prop_assert!(queue.is_well_formed());
            prop_assert_eq!(contents(&queue), expected);
        }

        #[test]
        fn reverse_twice_restores(values in value_list()) {
            let mut queue = queue_of(&values);
            queue.reverse();
            let mut reversed = values.clone();
            reversed.reverse();
            prop_assert_eq!(contents(&queue), reversed);
            queue.reverse();
            prop_assert_eq!(contents(&queue), values);
        }

        #[test]
        fn reverse_k_matches_chunks(mut values in value_list(), k in 0_usize..8) {
            let mut queue = queue_of(&values);
            queue.reverse_k(k);
            reverse_k_model(&mut values, k);
            prop_assert!(queue.is_well_formed());
            prop_assert_eq!(contents(&queue), values);
        }

        #[test]
        fn ascend_and_descend_keep_monotonic_survivors(values in value_list()) {
            let mut queue = queue_of(&values);
            let removed = queue.ascend();
            let expected = filter_model(&values, |right, elt| right < elt);
            prop_assert_eq!(removed, values.len() - expected.len());
            prop_assert_eq!(contents(&queue), expected);

            let mut queue = queue_of(&values);
            let removed = queue.descend();
            let expected = filter_model(&values, |right, elt| right > elt);
            prop_assert_eq!(removed, values.len() - expected.len());
            prop_assert_eq!(contents(&queue), expected);
        }

        #[test]
        fn delete_dup_on_sorted_values(mut values in value_list()) {
            values.sort();
            let mut queue = queue_of(&values);
            let expected = dedup_model(&values);
            prop_assert_eq!(queue.try_delete_dup(), Ok(expected.len() < values.len()));
            prop_assert_eq!(contents(&queue), expected);
        }

        #[test]
        fn merge_equals_sort_of_concatenation(
            chain in prop::collection::vec(value_list(), 0..5),
            descend in any::<bool>(),
        ) {
            let mut queues = crate::List::new();
            let mut expected = Vec::new();
            for mut values in chain {
                values.sort();
                if descend {
                    values.reverse();
                }
                expected.extend(values.iter().cloned());
                queues.push_back(queue_of(&values));
            }
            expected.sort();
            if descend {
                expected.reverse();
            }

            prop_assert_eq!(Queue::merge(&mut queues, descend), expected.len());
            if let Some(merged) = queues.front() {
                prop_assert_eq!(contents(merged), expected);
            }
        }
    }

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn queue_state_machine_test(sequential 1..200 => QueueMachine);
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        InsertHead(String),
        InsertTail(String),
        RemoveHead,
        RemoveTail,
        DeleteMid,
        DeleteDup,
        Swap,
        Reverse,
        ReverseK(usize),
        Sort(bool),
        Ascend,
        Descend,
    }

    pub struct QueueReference;

    impl ReferenceStateMachine for QueueReference {
        type State = VecDeque<String>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(VecDeque::new()).boxed()
        }

        fn transitions(_state: &Self::State) -> BoxedStrategy<Self::Transition> {
            prop_oneof![
                4 => value().prop_map(Transition::InsertHead),
                4 => value().prop_map(Transition::InsertTail),
                2 => Just(Transition::RemoveHead),
                2 => Just(Transition::RemoveTail),
                1 => Just(Transition::DeleteMid),
                1 => Just(Transition::DeleteDup),
                1 => Just(Transition::Swap),
                1 => Just(Transition::Reverse),
                1 => (0_usize..5).prop_map(Transition::ReverseK),
                1 => any::<bool>().prop_map(Transition::Sort),
                1 => Just(Transition::Ascend),
                1 => Just(Transition::Descend),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::InsertHead(value) => state.push_front(value.clone()),
                Transition::InsertTail(value) => state.push_back(value.clone()),
                Transition::RemoveHead => {
                    state.pop_front();
                }
                Transition::RemoveTail => {
                    state.pop_back();
                }
                Transition::DeleteMid => {
                    if !state.is_empty() {
                        state.remove((state.len() - 1) / 2);
                    }
                }
                Transition::DeleteDup => {
                    state = dedup_model(state.make_contiguous()).into();
                }
                Transition::Swap => swap_model(state.make_contiguous()),
                Transition::Reverse => state.make_contiguous().reverse(),
                Transition::ReverseK(k) => reverse_k_model(state.make_contiguous(), *k),
                Transition::Sort(descend) => {
                    let values = state.make_contiguous();
                    values.sort();
                    if *descend {
                        values.reverse();
                    }
                }
                Transition::Ascend => {
                    state = filter_model(state.make_contiguous(), |right, elt| right < elt).into();
                }
                Transition::Descend => {
                    state = filter_model(state.make_contiguous(), |right, elt| right > elt).into();
                }
            }
            state
        }
    }

    pub struct QueueMachine;

    impl StateMachineTest for QueueMachine {
        type SystemUnderTest = Queue;
        type Reference = QueueReference;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Queue::new()
        }

        fn apply(
            mut queue: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::InsertHead(value) => queue.insert_head(&value).unwrap(),
                Transition::InsertTail(value) => queue.insert_tail(&value).unwrap(),
                Transition::RemoveHead => {
                    queue.remove_head();
                }
                Transition::RemoveTail => {
                    queue.remove_tail();
                }
                Transition::DeleteMid => {
                    queue.delete_mid();
                }
                Transition::DeleteDup => {
                    queue.delete_dup();
                }
                Transition::Swap => queue.swap(),
                Transition::Reverse => queue.reverse(),
                Transition::ReverseK(k) => queue.reverse_k(k),
                Transition::Sort(descend) => queue.sort(descend),
                Transition::Ascend => {
                    queue.ascend();
                }
                Transition::Descend => {
                    queue.descend();
                }
            }
            queue
        }

        fn check_invariants(
            queue: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert!(queue.is_well_formed());
            assert_eq!(queue.size(), ref_state.len());
            assert!(queue.values().eq(ref_state.iter().map(String::as_str)));
        }
    }
}
