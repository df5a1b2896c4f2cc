//! Single-owner slot for page state driven from a host event loop.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("main map is not open")]
    Empty,
    /// Entered again from inside a callback it triggered.
    #[error("re-entrant call while the main map is busy")]
    Busy,
}

/// Holds at most one value and hands out exclusive access to it.
///
/// Access from inside an ongoing access (a store subscriber calling back into
/// the host API, say) fails with [`SlotError::Busy`] and leaves the slot
/// usable afterwards.
#[derive(Debug)]
pub struct Slot<T> {
    inner: RefCell<Option<T>>,
}

impl<T> Slot<T> {
    pub const fn new() -> Self {
        Self {
            inner: RefCell::new(None),
        }
    }

    /// Replaces the held value.
    pub fn set(&self, value: T) -> Result<(), SlotError> {
        let mut inner = self.inner.try_borrow_mut().map_err(|_| SlotError::Busy)?;
        *inner = Some(value);
        Ok(())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, SlotError> {
        let mut inner = self.inner.try_borrow_mut().map_err(|_| SlotError::Busy)?;
        let value = inner.as_mut().ok_or(SlotError::Empty)?;
        Ok(f(value))
    }
}
