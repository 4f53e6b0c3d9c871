//! A minimal default keymap (§4.10 / §6): maps the obvious movement and
//! selection keys to `Intent`s. Deliberately small — a dozen bindings,
//! not a configurable keymap table. A host wanting vim-style composition
//! or rebindable chords owns that layer itself and feeds `Msg::Intent`
//! values in directly; this exists only so the simplest possible caller
//! doesn't have to hand-write the obvious cases.

use std::collections::HashMap;

use virtua_proto::Intent;

/// A single keystroke, named rather than carrying raw terminal escape
/// bytes — the host's input layer is responsible for turning whatever it
/// reads off the wire into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyChord {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    Enter,
    Char(char),
}

/// Arrows move the cursor, Home/End/PageUp/PageDown jump, Space/Enter
/// select the current row, and `a`/`c` select-all/clear (§4.10).
pub fn default_keymap() -> HashMap<KeyChord, Intent> {
    let mut map = HashMap::new();
    map.insert(KeyChord::Up, Intent::CursorUp);
    map.insert(KeyChord::Down, Intent::CursorDown);
    map.insert(KeyChord::Left, Intent::HorizontalScrollLeft);
    map.insert(KeyChord::Right, Intent::HorizontalScrollRight);
    map.insert(KeyChord::PageUp, Intent::PageUp);
    map.insert(KeyChord::PageDown, Intent::PageDown);
    map.insert(KeyChord::Home, Intent::JumpToStart);
    map.insert(KeyChord::End, Intent::JumpToEnd);
    map.insert(KeyChord::Space, Intent::SelectCurrent);
    map.insert(KeyChord::Enter, Intent::SelectCurrent);
    map.insert(KeyChord::Char('a'), Intent::SelectAll);
    map.insert(KeyChord::Char('c'), Intent::ClearSelection);
    map
}
