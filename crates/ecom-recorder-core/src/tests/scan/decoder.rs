use crate::{KeyInput, KeystrokeDecoder, decode_payload};

fn type_line(decoder: &mut KeystrokeDecoder, text: &str) -> Option<String> {
    for c in text.chars() {
        assert!(decoder.push(KeyInput::Char(c)).is_none());
    }
    decoder
        .push(KeyInput::Enter)
        .map(|event| event.code().to_string())
}

/// WHAT: Enter emits the accumulated code
/// WHY: Keyboard-wedge scanners terminate every barcode with enter
#[test]
fn given_typed_code_when_enter_pressed_then_scan_emitted() {
    // Given: A fresh decoder
    let mut decoder = KeystrokeDecoder::new();

    // When: A barcode is typed followed by enter
    let code = type_line(&mut decoder, "JT0123456789");

    // Then: One scan with the full code is emitted and the buffer is cleared
    assert_eq!(code.as_deref(), Some("JT0123456789"));
    assert_eq!(decoder.buffered(), "");
}

/// WHAT: Characters outside the scan alphabet are dropped silently
/// WHY: Scanner prefixes and stray keys must not end up in file names
#[test]
fn given_disallowed_characters_when_typed_then_ignored() {
    // Given: A fresh decoder
    let mut decoder = KeystrokeDecoder::new();

    // When: A code with spaces, slashes and symbols is typed
    let code = type_line(&mut decoder, " AB/12 #C-3_x.9 ");

    // Then: Only alphanumerics and -_. survive
    assert_eq!(code.as_deref(), Some("AB12C-3_x.9"));
}

/// WHAT: Enter on an empty buffer emits nothing
/// WHY: Double enters from the scanner must not produce empty tags
#[test]
fn given_empty_buffer_when_enter_pressed_then_no_scan() {
    // Given: A decoder that only saw ignored keys
    let mut decoder = KeystrokeDecoder::new();
    decoder.push(KeyInput::Other);
    decoder.push(KeyInput::Char(' '));

    // When: Enter is pressed
    let event = decoder.push(KeyInput::Enter);

    // Then: No scan is produced
    assert!(event.is_none());
}

/// WHAT: Consecutive scans are independent
/// WHY: The buffer must be cleared after each enter
#[test]
fn given_two_scans_when_decoded_then_codes_do_not_bleed() {
    // Given: A fresh decoder
    let mut decoder = KeystrokeDecoder::new();

    // When: Two codes are typed back to back
    let first = type_line(&mut decoder, "ORDER-1");
    let second = type_line(&mut decoder, "ORDER-2");

    // Then: Each scan carries only its own code
    assert_eq!(first.as_deref(), Some("ORDER-1"));
    assert_eq!(second.as_deref(), Some("ORDER-2"));
}

/// WHAT: Partial input can be discarded
/// WHY: Input typed before a mode switch must not prefix the next scan
#[test]
fn given_partial_input_when_cleared_then_next_scan_clean() {
    // Given: A decoder holding partial input
    let mut decoder = KeystrokeDecoder::new();
    decoder.push(KeyInput::Char('X'));

    // When: The buffer is cleared and a new code typed
    decoder.clear();
    let code = type_line(&mut decoder, "Y1");

    // Then: The partial input is gone
    assert_eq!(code.as_deref(), Some("Y1"));
}

/// WHAT: Scanner callback payloads are trimmed
/// WHY: Callback scanners may append line terminators
#[test]
fn given_payload_with_whitespace_when_decoded_then_trimmed() {
    // Given: A payload with surrounding whitespace
    let payload = "  PKG-42\r\n";

    // When: Decoding the callback payload
    let event = decode_payload(payload);

    // Then: The code is trimmed
    assert_eq!(event.map(|e| e.code().to_string()).as_deref(), Some("PKG-42"));
}

/// WHAT: Blank callback payloads produce no scan
/// WHY: An empty tag would name a file ".mp4"
#[test]
fn given_blank_payload_when_decoded_then_none() {
    // Given/When: Decoding a whitespace-only payload
    let event = decode_payload(" \t ");

    // Then: Nothing is emitted
    assert!(event.is_none());
}
