use super::WakeLockService;
use crate::error::ServiceError;

impl<T: WakeLockService + ?Sized> WakeLockService for Box<T> {
    fn acquire(&self) -> Result<(), ServiceError> {
        (**self).acquire()
    }

    fn release(&self) -> Result<(), ServiceError> {
        (**self).release()
    }
}

/// Forwards only real transitions to the wrapped wake-lock.
///
/// Several paths (stop, completion, host shutdown) may each try to release
/// the lock; only the first one reaches the platform.
pub struct IdempotentWakeLock<W> {
    inner: W,
    held: bool,
}

impl<W: WakeLockService> IdempotentWakeLock<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, held: false }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn acquire(&mut self) -> Result<(), ServiceError> {
        if self.held {
            return Ok(());
        }
        self.inner.acquire()?;
        tracing::info!("wake-lock acquired");
        self.held = true;
        Ok(())
    }

    /// Marks the lock released even when the platform call fails, so a
    /// later acquire is not swallowed.
    pub fn release(&mut self) -> Result<(), ServiceError> {
        if !self.held {
            return Ok(());
        }
        self.held = false;
        self.inner.release()?;
        tracing::info!("wake-lock released");
        Ok(())
    }
}
