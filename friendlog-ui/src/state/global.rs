//! Global Application State
//!
//! Reactive state management using Leptos signals. Pages own the data they
//! fetch; only cross-page notifications live here.

use leptos::*;

/// How long a success toast stays visible (ms)
pub const SUCCESS_TIMEOUT_MS: u32 = 3000;
/// How long an error toast stays visible (ms)
pub const ERROR_TIMEOUT_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    error_shown: StoredValue<u64>,
    success_shown: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        error_shown: store_value(0),
        success_shown: store_value(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        show_for(self.success, self.success_shown, message, SUCCESS_TIMEOUT_MS);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        show_for(self.error, self.error_shown, message, ERROR_TIMEOUT_MS);
    }
}

/// Show `message` in `signal` for `timeout_ms`. A message shown in the
/// meantime, even an identical one, keeps its own full timeout.
fn show_for(
    signal: RwSignal<Option<String>>,
    shown: StoredValue<u64>,
    message: &str,
    timeout_ms: u32,
) {
    let ticket = shown.with_value(|n| next_ticket(*n));
    shown.set_value(ticket);
    signal.set(Some(message.to_string()));

    gloo_timers::callback::Timeout::new(timeout_ms, move || {
        if shown.get_value() == ticket {
            signal.set(None);
        }
    })
    .forget();
}

fn next_ticket(latest: u64) -> u64 {
    latest.wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_message_gets_a_new_ticket() {
        let first = next_ticket(0);
        let second = next_ticket(first);
        assert_ne!(first, second);
        assert_eq!(next_ticket(u64::MAX), 0);
    }
}
