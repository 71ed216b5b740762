use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by the fallible [`Queue`](crate::Queue) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The storage of a new element could not be allocated. Nothing was
    /// linked into the queue.
    #[error("failed to allocate element storage")]
    Alloc(#[from] TryReserveError),

    /// The queue is expected to be sorted, but the element at `index` is
    /// smaller than its predecessor.
    #[error("queue is not sorted at index {index}")]
    Unsorted { index: usize },

    #[error("group size {0} is smaller than 2")]
    InvalidGroupSize(usize),
}

pub type Result<T> = std::result::Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::QueueError;

    #[test]
    fn error_messages() {
        assert_eq!(
            QueueError::Unsorted { index: 3 }.to_string(),
            "queue is not sorted at index 3"
        );
        assert_eq!(
            QueueError::InvalidGroupSize(1).to_string(),
            "group size 1 is smaller than 2"
        );

        let err = String::new().try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(
            QueueError::from(err).to_string(),
            "failed to allocate element storage"
        );
    }
}
