//! End-to-end operator flows driven through `handle_event`.

use crate::tests::support::{
    BackendCall, FakeBackend, FakeMediaStore, controller, controller_with, current_handle,
    finalize_ok, start_and_confirm,
};
use crate::{
    BackendEvent, CaptureMode, CaptureSettings, ControllerEvent, DiscardReason, FinalizeOutcome,
    Notice, ScanEvent, SessionState,
};

fn settings_for(mode: CaptureMode) -> CaptureSettings {
    CaptureSettings {
        mode,
        ..CaptureSettings::default()
    }
}

/// WHAT: A scan during recording saves the segment under the code and restarts
/// WHY: This is the core packing loop, one clip per scanned package
#[test]
fn given_recording_when_scanned_then_saved_as_code_and_restarted() {
    // Given: A running continuous recording
    let mut c = controller();
    let first = start_and_confirm(&mut c);

    // When: A package is scanned
    c.handle_event(ScanEvent::new("JT0123456789").into());

    // Then: The recording is stopping with a tag
    assert_eq!(c.state(), SessionState::Stopping);
    assert!(c.backend().calls.contains(&BackendCall::Stop(first)));

    // When: The backend finalizes
    let notices = finalize_ok(&mut c);

    // Then: The segment is renamed and a new recording is starting
    assert_eq!(
        notices,
        vec![Notice::SavedAs {
            name: "JT0123456789.mp4".to_string()
        }]
    );
    assert!(
        c.media_store()
            .files
            .contains(&"DCIM/Ecom/Continuous/JT0123456789.mp4".to_string())
    );
    assert_eq!(c.state(), SessionState::Starting);
    assert_ne!(current_handle(&c), first);
    assert_eq!(c.backend().start_count(), 2);
}

/// WHAT: A manual stop without a scan discards the segment
/// WHY: Untagged clips cannot be matched to a package
#[test]
fn given_untagged_recording_when_stopped_then_discarded_without_restart() {
    // Given: A running recording that was never scanned
    let mut c = controller();
    start_and_confirm(&mut c);

    // When: The operator stops and the backend finalizes
    c.handle_event(ControllerEvent::StopRequested);
    let notices = finalize_ok(&mut c);

    // Then: The file is deleted and nothing restarts
    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::NotScanned
        }]
    );
    assert!(c.media_store().files.is_empty());
    assert_eq!(c.media_store().deleted.len(), 1);
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.backend().start_count(), 1);
}

/// WHAT: Backgrounding after a scan discards and cancels the restart
/// WHY: A cut that races with leaving the app must not keep recording unseen
#[test]
fn given_scanned_and_stopping_when_backgrounded_then_tag_kept_without_restart() {
    // Given: A recording that was scanned and is stopping
    let mut c = controller();
    start_and_confirm(&mut c);
    c.handle_event(ScanEvent::new("PKG-1").into());

    // When: The app is backgrounded before finalize
    c.handle_event(ControllerEvent::AppBackgrounded);
    let notices = finalize_ok(&mut c);

    // Then: The scanned segment is still saved but nothing restarts
    assert_eq!(
        notices,
        vec![Notice::SavedAs {
            name: "PKG-1.mp4".to_string()
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.backend().start_count(), 1);
}

/// WHAT: Backgrounding during a recording discards it
/// WHY: Leaving the station forfeits the clip in progress
#[test]
fn given_recording_when_backgrounded_then_left_app_discard() {
    // Given: A running recording
    let mut c = controller();
    start_and_confirm(&mut c);

    // When: The app is backgrounded and the backend finalizes
    c.handle_event(ControllerEvent::AppBackgrounded);
    assert_eq!(c.state(), SessionState::Stopping);
    let notices = finalize_ok(&mut c);

    // Then: Discarded with the left-app reason, no restart
    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::LeftApp
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: Backgrounding a paused recording stops and discards it
/// WHY: A paused clip is still in flight and must not survive leaving the station
#[test]
fn given_paused_when_backgrounded_then_left_app_discard() {
    // Given: A recording paused between packages
    let mut c = controller();
    let handle = start_and_confirm(&mut c);
    c.handle_event(ControllerEvent::PauseRequested);
    assert_eq!(c.state(), SessionState::Paused);

    // When: The app is backgrounded and the backend finalizes
    c.handle_event(ControllerEvent::AppBackgrounded);
    assert_eq!(c.state(), SessionState::Stopping);
    assert!(c.backend().calls.contains(&BackendCall::Stop(handle)));
    let notices = finalize_ok(&mut c);

    // Then: Discarded with the left-app reason, no restart
    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::LeftApp
        }]
    );
    assert!(c.media_store().files.is_empty());
    assert_eq!(c.backend().start_count(), 1);
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: Destroying a paused recording discards it and closes the station
/// WHY: Nothing may record after shutdown, even from a pause
#[test]
fn given_paused_when_destroyed_then_discarded_and_closed() {
    // Given: A recording paused between packages
    let mut c = controller();
    start_and_confirm(&mut c);
    c.handle_event(ControllerEvent::PauseRequested);

    // When: The station shuts down and the backend finalizes
    c.handle_event(ControllerEvent::ActivityDestroyed);
    assert_eq!(c.state(), SessionState::Stopping);
    let notices = finalize_ok(&mut c);

    // Then: Discarded, closed, and a later start is refused
    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::LeftApp
        }]
    );
    assert!(c.is_closed());
    assert_eq!(c.state(), SessionState::Idle);
    c.handle_event(ControllerEvent::StartRequested);
    assert_eq!(c.backend().start_count(), 1);
}

/// WHAT: Backgrounding while Starting cancels the capture
/// WHY: The start confirmation may arrive after the operator left
#[test]
fn given_starting_when_backgrounded_then_stopped_and_discarded() {
    // Given: A start that the backend has not confirmed
    let mut c = controller();
    c.handle_event(ControllerEvent::StartRequested);

    // When: The app is backgrounded and the backend finalizes
    c.handle_event(ControllerEvent::AppBackgrounded);
    assert_eq!(c.state(), SessionState::Stopping);
    let notices = finalize_ok(&mut c);

    // Then: Discarded with the left-app reason
    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::LeftApp
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: A failed finalize discards and does not restart
/// WHY: Restarting on a broken encoder would loop
#[test]
fn given_scanned_when_finalize_fails_then_discarded_without_restart() {
    // Given: A tagged recording that is stopping
    let mut c = controller();
    let handle = start_and_confirm(&mut c);
    c.handle_event(ScanEvent::new("PKG-2").into());

    // When: The backend reports an error
    let outcome = FinalizeOutcome::failed("encoder crashed", None);
    let notices = c.handle_event(BackendEvent::finalized(handle, outcome).into());

    // Then: Idle, artifact deleted, backend released
    assert_eq!(
        notices,
        vec![Notice::FinalizeFailed {
            reason: "encoder crashed".to_string()
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
    assert!(c.media_store().files.is_empty());
    assert!(c.backend().calls.contains(&BackendCall::Close(handle)));
    assert_eq!(c.backend().start_count(), 1);
}

/// WHAT: An unsolicited finalize during recording is processed
/// WHY: The camera can end a recording on its own, for instance when storage fills
#[test]
fn given_recording_when_backend_finalizes_unasked_then_discarded() {
    let mut c = controller();
    start_and_confirm(&mut c);

    let notices = finalize_ok(&mut c);

    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::NotScanned
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: A rename failure keeps the artifact under its temporary name
/// WHY: A scanned clip must never be lost because of a naming problem
#[test]
fn given_rename_fails_when_finalized_then_kept_and_restarted() {
    let store = FakeMediaStore {
        fail_rename: true,
        ..FakeMediaStore::default()
    };
    let mut c = controller_with(FakeBackend::default(), store, CaptureSettings::default());
    start_and_confirm(&mut c);
    let temp_name = c
        .session()
        .map(|s| s.temp_name().to_string())
        .unwrap_or_default();
    c.handle_event(ScanEvent::new("PKG-3").into());

    let notices = finalize_ok(&mut c);

    assert_eq!(notices, vec![Notice::SavedRenameFailed { name: temp_name }]);
    assert!(c.media_store().deleted.is_empty());
    assert_eq!(c.state(), SessionState::Starting);
}

/// WHAT: A delete failure is reported through logs only
/// WHY: The orphan is harmless and the station must keep working
#[test]
fn given_delete_fails_when_discarded_then_still_idle() {
    let store = FakeMediaStore {
        fail_delete: true,
        ..FakeMediaStore::default()
    };
    let mut c = controller_with(FakeBackend::default(), store, CaptureSettings::default());
    start_and_confirm(&mut c);
    c.handle_event(ControllerEvent::StopRequested);

    let notices = finalize_ok(&mut c);

    assert_eq!(
        notices,
        vec![Notice::Discarded {
            reason: DiscardReason::NotScanned
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.media_store().files.len(), 1);
}

/// WHAT: Three scans in a row produce three saved segments
/// WHY: The continuous loop must chain indefinitely
#[test]
fn given_continuous_loop_when_three_packages_scanned_then_three_files() {
    let mut c = controller();
    c.handle_event(ControllerEvent::StartRequested);

    for code in ["A1", "B2", "C3"] {
        let handle = current_handle(&c);
        c.handle_event(BackendEvent::started(handle).into());
        c.handle_event(ScanEvent::new(code).into());
        finalize_ok(&mut c);
    }

    let files = &c.media_store().files;
    for code in ["A1", "B2", "C3"] {
        assert!(files.contains(&format!("DCIM/Ecom/Continuous/{}.mp4", code)));
    }
    // Plus the temporary file of the fourth segment now starting.
    assert_eq!(files.len(), 4);
    assert_eq!(c.state(), SessionState::Starting);
}

/// WHAT: Destroying the activity discards and drops the queued restart
/// WHY: Nothing may record after the station shuts down
#[test]
fn given_scanned_when_destroyed_then_no_restart() {
    // Given: A scanned recording that is stopping with a queued restart
    let mut c = controller();
    start_and_confirm(&mut c);
    c.handle_event(ScanEvent::new("LAST").into());

    // When: The station shuts down and the backend finalizes
    c.handle_event(ControllerEvent::ActivityDestroyed);
    let notices = finalize_ok(&mut c);

    // Then: The tagged clip is saved and nothing restarts
    assert_eq!(
        notices,
        vec![Notice::SavedAs {
            name: "LAST.mp4".to_string()
        }]
    );
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.backend().start_count(), 1);
}

/// WHAT: In pack mode a scan starts a capture named after the code
/// WHY: Single-shot stations start recording from the scanner
#[test]
fn given_pack_mode_idle_when_scanned_then_tagged_capture_without_restart() {
    // Given: An idle pack-mode station
    let mut c = controller_with(
        FakeBackend::default(),
        FakeMediaStore::default(),
        settings_for(CaptureMode::Pack),
    );

    // When: A scan arrives and the recording is later stopped
    c.handle_event(ScanEvent::new("ORD-77").into());
    let handle = current_handle(&c);
    c.handle_event(BackendEvent::started(handle).into());
    c.handle_event(ControllerEvent::StopRequested);
    let notices = finalize_ok(&mut c);

    // Then: Saved under the code in the pack folder, nothing restarts
    assert_eq!(
        notices,
        vec![Notice::SavedAs {
            name: "ORD-77.mp4".to_string()
        }]
    );
    assert_eq!(
        c.media_store().files,
        vec!["DCIM/Ecom/Pack/ORD-77.mp4".to_string()]
    );
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: In pack mode a scan during a capture is ignored
/// WHY: Single-shot captures are tagged once, at start
#[test]
fn given_pack_mode_recording_when_scanned_then_ignored() {
    let mut c = controller_with(
        FakeBackend::default(),
        FakeMediaStore::default(),
        settings_for(CaptureMode::Pack),
    );
    c.handle_event(ScanEvent::new("ORD-1").into());
    let handle = current_handle(&c);
    c.handle_event(BackendEvent::started(handle).into());

    let notices = c.handle_event(ScanEvent::new("ORD-2").into());

    assert_eq!(c.state(), SessionState::Recording);
    assert_eq!(c.backend().stop_count(), 0);
    assert!(matches!(notices.as_slice(), [Notice::ScanIgnored { .. }]));
}

/// WHAT: Manual single-shot captures are kept under their timestamp name
/// WHY: Return and pack stations keep every clip they record
#[test]
fn given_return_mode_manual_start_when_stopped_then_kept_under_timestamp() {
    let mut c = controller_with(
        FakeBackend::default(),
        FakeMediaStore::default(),
        settings_for(CaptureMode::Return),
    );
    start_and_confirm(&mut c);
    let temp_name = c
        .session()
        .map(|s| s.temp_name().to_string())
        .unwrap_or_default();

    c.handle_event(ControllerEvent::StopRequested);
    let notices = finalize_ok(&mut c);

    assert_eq!(notices, vec![Notice::SavedAs { name: temp_name }]);
    assert!(c.media_store().deleted.is_empty());
    assert_eq!(c.state(), SessionState::Idle);
}

/// WHAT: Image mode names the still after the scanned code
/// WHY: Stills use the image extension and a sanitized code
#[test]
fn given_image_mode_when_scanned_then_jpg_named_after_code() {
    // Given: A station in image mode
    let mut c = controller_with(
        FakeBackend::default(),
        FakeMediaStore::default(),
        settings_for(CaptureMode::Image),
    );

    // When: A scan starts a tagged capture that is confirmed, stopped and finalized
    c.handle_event(ScanEvent::new("SKU 5").into());
    let handle = current_handle(&c);
    c.handle_event(BackendEvent::started(handle).into());
    c.handle_event(ControllerEvent::StopRequested);
    let notices = finalize_ok(&mut c);

    // Then: Saved as a jpg named after the code
    assert_eq!(
        notices,
        vec![Notice::SavedAs {
            name: "SKU_5.jpg".to_string()
        }]
    );
}
