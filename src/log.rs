//! Levelled log routing and the fatal abort path (§4.5).
//!
//! Mirrors the console's own log taxonomy rather than `log`'s five levels
//! directly: `Stub` has no equivalent in `log` and is carried as a tagged
//! `Debug` record, while `Fatal` always logs and then aborts the process
//! regardless of the configured mask.

use bitflags::bitflags;
use std::cell::Cell;

bitflags! {
    /// Mask of levels a [`Console`](crate::Console) will emit.
    ///
    /// `Fatal` is always emitted; it does not need to be present in the mask.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LogLevel: u8 {
        const DEBUG = 0b00_0001;
        const STUB  = 0b00_0010;
        const INFO  = 0b00_0100;
        const WARN  = 0b00_1000;
        const ERROR = 0b01_0000;
        const FATAL = 0b10_0000;
    }
}

impl LogLevel {
    /// The default mask set during console init: everything but `Debug`/`Stub`.
    pub fn default_mask() -> LogLevel {
        LogLevel::INFO | LogLevel::WARN | LogLevel::ERROR | LogLevel::FATAL
    }
}

/// A caller-supplied sink that replaces the default `log`-crate routing.
pub type LogHandler = Box<dyn FnMut(LogLevel, &str) + Send>;

thread_local! {
    /// Ambient "current console" log mask, consulted by [`log_message`] when a
    /// caller has no console handle in scope. Set only via [`CurrentConsoleGuard`]
    /// so it cannot outlive the call that installed it, even across a panic unwind.
    static CURRENT_MASK: Cell<Option<LogLevel>> = Cell::new(None);
}

/// RAII guard that scopes the thread-local "current console" log mask.
///
/// This is the redesign called out in §9: rather than ambient state a caller
/// can forget to clear, the mask is restored on drop.
pub struct CurrentConsoleGuard {
    previous: Option<LogLevel>,
}

impl CurrentConsoleGuard {
    pub fn install(mask: LogLevel) -> Self {
        let previous = CURRENT_MASK.with(|cell| cell.replace(Some(mask)));
        CurrentConsoleGuard { previous }
    }
}

impl Drop for CurrentConsoleGuard {
    fn drop(&mut self) {
        CURRENT_MASK.with(|cell| cell.set(self.previous));
    }
}

/// Route a log line through `handler` if present, else the ambient mask
/// (own mask if given, else the thread-local fallback), else drop it.
///
/// `Fatal` is always emitted and aborts the process after logging.
pub fn log_message(handler: Option<&mut LogHandler>, own_mask: Option<LogLevel>, level: LogLevel, message: &str) {
    if let Some(handler) = handler {
        handler(level, message);
        if level == LogLevel::FATAL {
            std::process::abort();
        }
        return;
    }

    let mask = own_mask.or_else(|| CURRENT_MASK.with(|cell| cell.get()));
    let visible = level == LogLevel::FATAL || mask.is_some_and(|m| m.contains(level));
    if !visible {
        return;
    }

    match level {
        LogLevel::DEBUG => log::debug!("{message}"),
        LogLevel::STUB => log::debug!("[stub] {message}"),
        LogLevel::INFO => log::info!("{message}"),
        LogLevel::WARN => log::warn!("{message}"),
        LogLevel::ERROR => log::error!("{message}"),
        LogLevel::FATAL => {
            log::error!("{message}");
            std::process::abort();
        }
        _ => log::debug!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_level_is_dropped_without_panicking() {
        // Warn isn't in the mask: should be silently dropped, not emitted.
        log_message(None, Some(LogLevel::INFO), LogLevel::WARN, "should be dropped");
    }

    #[test]
    fn handler_receives_every_level_without_masking() {
        let mut seen = Vec::new();
        let mut handler: LogHandler = Box::new(|level, msg| {
            seen.push((level, msg.to_string()));
        });
        log_message(Some(&mut handler), Some(LogLevel::empty()), LogLevel::DEBUG, "hi");
        assert_eq!(seen, vec![(LogLevel::DEBUG, "hi".to_string())]);
    }

    #[test]
    fn current_console_guard_restores_previous_mask_on_drop() {
        CURRENT_MASK.with(|cell| cell.set(None));
        {
            let _guard = CurrentConsoleGuard::install(LogLevel::default_mask());
            assert_eq!(CURRENT_MASK.with(|cell| cell.get()), Some(LogLevel::default_mask()));
        }
        assert_eq!(CURRENT_MASK.with(|cell| cell.get()), None);
    }
}
