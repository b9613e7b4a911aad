// Unit Tests for Display Routing
//
// UNIT UNDER TEST: handle / display
//
// BUSINESS RESPONSIBILITY:
//   - Route classified errors to the configured display channel
//   - Select grouped validation details vs. summary message as content
//   - Apply the custom message override without touching details
//   - Invoke the on_error callback and survive its failure
//   - Return the classified error regardless of channel

use crate::error::ErrorCategory;
use crate::handler::{handle, DisplayChannel, HandleOptions, DEFAULT_TOAST_DURATION_SECS};
use crate::tests::helpers::{email_validation_raw, network_raw, server_boom_raw, RecordingNotifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[cfg(test)]
mod channel_routing_tests {
    use super::*;

    #[test]
    fn test_default_channel_shows_toast_with_classified_message() {
        let notifier = RecordingNotifier::default();

        let info = handle(&server_boom_raw(), &notifier, &HandleOptions::default());

        assert_eq!(info.category, ErrorCategory::Server);
        assert_eq!(notifier.toast_count(), 1);
        assert_eq!(notifier.panel_count(), 0);
        let (content, duration) = notifier.last_toast().unwrap();
        assert_eq!(content, "boom");
        assert_eq!(duration, DEFAULT_TOAST_DURATION_SECS);
    }

    #[test]
    fn test_validation_toast_shows_grouped_details() {
        let notifier = RecordingNotifier::default();

        handle(&email_validation_raw(), &notifier, &HandleOptions::default());

        let (content, _) = notifier.last_toast().unwrap();
        assert_eq!(content, "email: Email is required");
    }

    #[test]
    fn test_validation_toast_falls_back_to_message_when_details_disabled() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            show_validation_details: false,
            ..HandleOptions::default()
        };

        handle(&email_validation_raw(), &notifier, &options);

        let (content, _) = notifier.last_toast().unwrap();
        assert_eq!(content, "Validation failed");
    }

    #[test]
    fn test_detail_panel_uses_default_title() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            channel: DisplayChannel::DetailPanel,
            ..HandleOptions::default()
        };

        handle(&server_boom_raw(), &notifier, &options);

        assert_eq!(notifier.toast_count(), 0);
        let (title, content) = notifier.last_panel().unwrap();
        assert_eq!(title, "Error");
        assert_eq!(content, "boom");
    }

    #[test]
    fn test_detail_panel_uses_configured_title() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            channel: DisplayChannel::DetailPanel,
            title: Some("Could not save student".to_string()),
            ..HandleOptions::default()
        };

        handle(&email_validation_raw(), &notifier, &options);

        let (title, content) = notifier.last_panel().unwrap();
        assert_eq!(title, "Could not save student");
        assert_eq!(content, "email: Email is required");
    }

    #[test]
    fn test_silent_return_touches_no_surface_but_returns_info() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            channel: DisplayChannel::SilentReturn,
            ..HandleOptions::default()
        };

        let info = handle(&server_boom_raw(), &notifier, &options);

        assert_eq!(notifier.toast_count(), 0);
        assert_eq!(notifier.panel_count(), 0);
        assert_eq!(info.message, "boom");
    }

    #[test]
    fn test_console_only_skips_the_notifier() {
        // The log write itself is not asserted here; what matters is that
        // no user-visible surface is touched.
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            channel: DisplayChannel::ConsoleOnly,
            ..HandleOptions::default()
        };

        let info = handle(&network_raw(), &notifier, &options);

        assert_eq!(notifier.toast_count(), 0);
        assert_eq!(notifier.panel_count(), 0);
        assert_eq!(info.category, ErrorCategory::Network);
    }

    #[test]
    fn test_duration_is_forwarded_to_toast() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            duration_secs: 2.0,
            ..HandleOptions::default()
        };

        handle(&server_boom_raw(), &notifier, &options);

        let (_, duration) = notifier.last_toast().unwrap();
        assert_eq!(duration, 2.0);
    }
}

#[cfg(test)]
mod override_and_callback_tests {
    use super::*;

    #[test]
    fn test_custom_message_overrides_summary_but_not_details() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            channel: DisplayChannel::SilentReturn,
            custom_message: Some("Could not submit the form".to_string()),
            ..HandleOptions::default()
        };

        let info = handle(&email_validation_raw(), &notifier, &options);

        assert_eq!(info.message, "Could not submit the form");
        assert_eq!(info.details.len(), 1);
        assert_eq!(info.details[0].field.as_deref(), Some("email"));
    }

    #[test]
    fn test_custom_message_is_what_the_toast_shows_for_non_validation() {
        let notifier = RecordingNotifier::default();
        let options = HandleOptions {
            custom_message: Some("Could not load the menu".to_string()),
            ..HandleOptions::default()
        };

        handle(&server_boom_raw(), &notifier, &options);

        let (content, _) = notifier.last_toast().unwrap();
        assert_eq!(content, "Could not load the menu");
    }

    #[test]
    fn test_on_error_callback_receives_classified_info() {
        let notifier = RecordingNotifier::default();
        let seen = Arc::new(Mutex::new(None));
        let seen_in_callback = seen.clone();
        let options = HandleOptions {
            channel: DisplayChannel::SilentReturn,
            on_error: Some(Arc::new(move |info| {
                *seen_in_callback.lock().unwrap() = Some(info.category);
                Ok(())
            })),
            ..HandleOptions::default()
        };

        handle(&server_boom_raw(), &notifier, &options);

        assert_eq!(*seen.lock().unwrap(), Some(ErrorCategory::Server));
    }

    #[test]
    fn test_failing_on_error_callback_does_not_disturb_the_result() {
        let notifier = RecordingNotifier::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_callback = calls.clone();
        let options = HandleOptions {
            on_error: Some(Arc::new(move |_| {
                calls_in_callback.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("callback blew up"))
            })),
            ..HandleOptions::default()
        };

        let info = handle(&server_boom_raw(), &notifier, &options);

        // Callback ran, its failure was logged, and the classified error
        // and display both went through untouched.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(info.message, "boom");
        assert_eq!(notifier.toast_count(), 1);
    }
}
