// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Ambiguous prefixes and the keypress timeout.

use super::test_helpers::*;
use crate::{Key, KeyModifiers, SpecialKey};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::time::{Duration, Instant};
use test_case::test_case;

#[test]
#[serial]
fn test_lone_escape_then_silence_is_escape_pressed() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b");
    keyboard.escape_key_handling();
    assert_eq!(take_events(&mut keyboard), vec![]);
    assert!(keyboard.has_unprocessed_input());

    resolve_after_timeout(&mut keyboard);
    assert_eq!(take_events(&mut keyboard), vec![Event::Escape]);
    assert!(!keyboard.has_unprocessed_input());
}

#[test]
#[serial]
fn test_lone_escape_followed_by_a_key_is_meta() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b");
    send_and_process(&mut keyboard, &write_end, b"x");
    resolve_after_timeout(&mut keyboard);

    assert_eq!(take_events(&mut keyboard), press_release(Key::Meta('x')).to_vec());
}

#[test_case(b'O' ; "ss3")]
#[test_case(b'[' ; "csi")]
#[test_case(b']' ; "osc")]
#[serial]
fn test_deferred_prefix_then_silence_is_meta_key(second: u8) {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, &[0x1b, second]);
    keyboard.escape_key_handling();
    assert_eq!(take_events(&mut keyboard), vec![]);

    resolve_after_timeout(&mut keyboard);
    assert_eq!(
        take_events(&mut keyboard),
        press_release(Key::Meta(char::from(second))).to_vec()
    );
    assert!(!keyboard.has_unprocessed_input());
}

#[test_case(b"\x1bO", b"P", Key::function(1) ; "ss3_f1")]
#[test_case(b"\x1b[", b"A", Key::special(SpecialKey::Up) ; "csi_up")]
#[test_case(b"\x1b[1;", b"5D", Key::modified(SpecialKey::Left, KeyModifiers::CTRL) ; "csi_ctrl_left")]
#[serial]
fn test_deferred_prefix_completed_before_timeout(head: &[u8], tail: &[u8], expected: Key) {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, head);
    send_and_process(&mut keyboard, &write_end, tail);
    resolve_after_timeout(&mut keyboard);

    assert_eq!(take_events(&mut keyboard), press_release(expected).to_vec());
}

#[test]
#[serial]
fn test_unknown_escape_sequence_resolves_bytewise() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b[9z");
    assert_eq!(take_events(&mut keyboard), vec![]);

    resolve_after_timeout(&mut keyboard);

    // ESC leads, then the remainder decodes on its own.
    let events = take_events(&mut keyboard);
    assert_eq!(events.first(), Some(&Event::Pressed(Key::ESCAPE)));
    assert!(!keyboard.has_unprocessed_input());
}

#[test]
#[serial]
fn test_double_escape_then_silence() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b\x1b");
    assert_eq!(take_events(&mut keyboard), vec![]);

    resolve_after_timeout(&mut keyboard);

    // The escape sink fires during resolution, the first ESC on dispatch.
    let mut expected = vec![Event::Escape];
    expected.extend(press_release(Key::ESCAPE));
    assert_eq!(take_events(&mut keyboard), expected);
    assert!(!keyboard.has_unprocessed_input());
    assert!(!keyboard.has_data_in_queue());
}

#[test]
#[serial]
fn test_unknown_sequence_ending_in_escape_reports_escape() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b\x1b\x1b");
    resolve_after_timeout(&mut keyboard);

    let events = take_events(&mut keyboard);
    assert_eq!(events.iter().filter(|it| **it == Event::Escape).count(), 1);
    assert_eq!(events.last(), Some(&Event::Released(Key::ESCAPE)));
    assert!(!keyboard.has_unprocessed_input());
}

#[test]
#[serial]
fn test_truncated_utf8_degrades_to_latin1_after_timeout() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, &[0xE2, 0x82]);
    assert_eq!(take_events(&mut keyboard), vec![]);

    resolve_after_timeout(&mut keyboard);

    let expected: Vec<_> = [Key::Char('\u{e2}'), Key::Char('\u{82}')]
        .into_iter()
        .flat_map(press_release)
        .collect();
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test]
#[serial]
fn test_clear_key_buffer_on_timeout() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b[1;");
    keyboard.clear_key_buffer_on_timeout();
    assert_eq!(keyboard.key_buffer().len(), 4);

    std::thread::sleep(PAST_TIMEOUT);
    keyboard.clear_key_buffer_on_timeout();
    assert!(!keyboard.has_unprocessed_input());
    assert!(!keyboard.has_data_in_queue());
    assert_eq!(take_events(&mut keyboard), vec![]);
}

#[test]
#[serial]
fn test_stale_escape_is_resolved_before_new_input() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    send_and_process(&mut keyboard, &write_end, b"\x1b");
    std::thread::sleep(PAST_TIMEOUT);
    send_and_process(&mut keyboard, &write_end, b"x");

    let mut expected = vec![Event::Escape];
    expected.extend(press_release(Key::Char('x')));
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test]
#[serial]
fn test_event_loop_resolves_escape_by_itself() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    send(&write_end, b"\x1b");

    let deadline = Instant::now() + Duration::from_secs(1);
    while Instant::now() < deadline {
        keyboard.process_keyboard_event();
        if !keyboard.reactions().events.is_empty() {
            break;
        }
    }

    assert_eq!(take_events(&mut keyboard), vec![Event::Escape]);
    assert!(keyboard.is_keypress_timeout());
}
