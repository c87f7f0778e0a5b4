use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGINT;

use crate::process::ProcessError;

/// Keeps SIGINT from killing the interpreter.
///
/// The handler only raises a flag. Caught handlers are reset to the default
/// action by `exec`, so a foreground child still dies on Ctrl-C.
#[derive(Clone, Debug)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn install() -> Result<Self, ProcessError> {
        let raised = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGINT, Arc::clone(&raised))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
        Ok(Self { raised })
    }

    /// Returns whether SIGINT arrived since the last call, clearing it.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_take() {
        let flag = InterruptFlag::install().unwrap();
        assert!(!flag.take());
        // SAFETY: raising SIGINT on ourselves; the registered handler only sets a flag.
        unsafe {
            libc::raise(SIGINT);
        }
        assert!(flag.take());
        assert!(!flag.take());
    }
}
