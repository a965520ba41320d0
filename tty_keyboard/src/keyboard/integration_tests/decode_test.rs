// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bytes in, keys out, with no timeout involved.

use super::test_helpers::*;
use crate::{DEFERRED_META_BYTES, KNOWN_KEYS, Key, KeyCapEntry, KeyCapTable, KeyModifiers,
            LinuxConsoleKeyCorrection, MouseProtocol, SgrButtonState, SpecialKey};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_every_printable_ascii_byte_is_one_key() {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    for byte in 33_u8..=126 {
        send_and_process(&mut keyboard, &write_end, &[byte]);
        assert_eq!(
            take_events(&mut keyboard),
            press_release(Key::Char(char::from(byte))).to_vec()
        );
        assert!(!keyboard.has_unprocessed_input());
    }
}

#[test]
fn test_every_known_sequence_in_one_burst_is_one_key() {
    for entry in KNOWN_KEYS {
        let is_deferred =
            matches!(entry.bytes, [_, second] if DEFERRED_META_BYTES.contains(second));
        if is_deferred {
            continue;
        }

        let (mut keyboard, write_end) = create_keyboard(test_config());
        send_and_process(&mut keyboard, &write_end, entry.bytes);

        assert_eq!(
            take_events(&mut keyboard),
            press_release(entry.key).to_vec(),
            "sequence {:?}",
            entry.bytes
        );
        assert!(!keyboard.has_unprocessed_input(), "sequence {:?}", entry.bytes);
    }
}

#[test]
fn test_keys_back_to_back_in_one_burst() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    send_and_process(&mut keyboard, &write_end, b"a\x1b[Ab\x1bOQ\x1b[1;5C\r");

    let expected: Vec<_> = [
        Key::Char('a'),
        Key::special(SpecialKey::Up),
        Key::Char('b'),
        Key::function(2),
        Key::modified(SpecialKey::Right, KeyModifiers::CTRL),
        Key::ENTER,
    ]
    .into_iter()
    .flat_map(press_release)
    .collect();

    assert_eq!(take_events(&mut keyboard), expected);
}

#[test_case("é" ; "two_bytes")]
#[test_case("€" ; "three_bytes")]
#[test_case("🦀" ; "four_bytes")]
fn test_utf8_split_across_reads(text: &str) {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    let (lead, rest) = text.as_bytes().split_at(1);

    send_and_process(&mut keyboard, &write_end, lead);
    assert_eq!(take_events(&mut keyboard), vec![]);
    assert_eq!(keyboard.key_buffer().len(), 1);

    send_and_process(&mut keyboard, &write_end, rest);
    let expected = text.chars().next().map(Key::Char).unwrap();
    assert_eq!(take_events(&mut keyboard), press_release(expected).to_vec());
    assert!(!keyboard.has_unprocessed_input());
}

#[test]
fn test_utf8_disabled_emits_one_key_per_byte() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    keyboard.disable_utf8();
    send_and_process(&mut keyboard, &write_end, "é".as_bytes());

    let expected: Vec<_> = [Key::Char('\u{c3}'), Key::Char('\u{a9}')]
        .into_iter()
        .flat_map(press_release)
        .collect();
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test]
fn test_nul_and_del() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    send_and_process(&mut keyboard, &write_end, b"\x00\x7f");

    let expected: Vec<_> = [Key::CTRL_SPACE, Key::BACKSPACE]
        .into_iter()
        .flat_map(press_release)
        .collect();
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test_case(b"\x1b[M !!", MouseProtocol::X11 ; "x11")]
#[test_case(b"\x1b[<0;12;7M", MouseProtocol::Sgr(SgrButtonState::Pressed) ; "sgr_pressed")]
#[test_case(b"\x1b[<0;12;7m", MouseProtocol::Sgr(SgrButtonState::Released) ; "sgr_released")]
#[test_case(b"\x1b[32;12;7M", MouseProtocol::Urxvt ; "urxvt")]
fn test_mouse_report_then_key(report: &[u8], protocol: MouseProtocol) {
    let (mut keyboard, write_end) = create_keyboard(test_config());

    let mut bytes = report.to_vec();
    bytes.push(b'x');
    send_and_process(&mut keyboard, &write_end, &bytes);

    let mut expected = vec![Event::Mouse(protocol, report.to_vec())];
    expected.extend(press_release(Key::Char('x')));
    assert_eq!(take_events(&mut keyboard), expected);
    assert!(!keyboard.has_unprocessed_input());
}

#[test]
fn test_mouse_report_is_left_alone_when_tracking_is_off() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    keyboard.disable_mouse_tracking();

    send_and_process(&mut keyboard, &write_end, b"\x1b[M !!");

    // Not a known sequence either, so it waits for the timeout.
    assert_eq!(take_events(&mut keyboard), vec![]);
    assert_eq!(keyboard.key_buffer().len(), 6);
}

#[test]
fn test_capability_table_is_checked_before_known_keys() {
    let table = KeyCapTable::from_entries([KeyCapEntry::new(Key::function(5), b"\x1b[A")]);
    let (keyboard, write_end) = create_keyboard(test_config());
    let mut keyboard = keyboard.with_key_cap_table(table);

    send_and_process(&mut keyboard, &write_end, b"\x1b[A\x1b[B");

    let expected: Vec<_> = [Key::function(5), Key::special(SpecialKey::Down)]
        .into_iter()
        .flat_map(press_release)
        .collect();
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test]
fn test_key_correction_applies_before_queueing() {
    let correction = LinuxConsoleKeyCorrection::new(|| KeyModifiers::SHIFT);
    let (keyboard, write_end) = create_keyboard(test_config());
    let mut keyboard = keyboard.with_key_correction(Box::new(correction));

    send_and_process(&mut keyboard, &write_end, b"\x1b[A\tq");

    let expected: Vec<_> = [
        Key::modified(SpecialKey::Up, KeyModifiers::SHIFT),
        Key::special(SpecialKey::BackTab),
        Key::Char('q'),
    ]
    .into_iter()
    .flat_map(press_release)
    .collect();
    assert_eq!(take_events(&mut keyboard), expected);
}

#[test]
fn test_end_of_file_is_not_an_error() {
    let (mut keyboard, write_end) = create_keyboard(test_config());
    send(&write_end, b"z");
    drop(write_end);

    keyboard.process_keyboard_event();
    assert_eq!(take_events(&mut keyboard), press_release(Key::Char('z')).to_vec());

    keyboard.process_keyboard_event();
    assert_eq!(take_events(&mut keyboard), vec![]);
}
