/// Keyboard handling for the terminal front end.
///
/// Input model: instead of acting on each key event individually, we keep
/// the frame number of the last press/repeat event for every key. Each frame
/// the keys still "fresh" (within `HOLD_WINDOW` frames) form the held-control
/// snapshot passed to the core, so Space + a direction can be held together.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use galaga_shooter::entities::{Command, PlayerInput, Screen};

/// A key counts as held if its last press/repeat arrived within this many
/// frames. At 60 FPS that is ~133 ms, shorter than any OS repeat interval.
const HOLD_WINDOW: u64 = 8;

/// What a single key press asks the front end to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    /// Ctrl+C: leave immediately from any screen.
    Abort,
}

#[derive(Default)]
pub struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    /// Record a key event. Returns the one-shot action for presses.
    pub fn record(&mut self, event: KeyEvent, screen: Screen, frame: u64) -> Option<KeyAction> {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(code, frame);
                if code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
                    return Some(KeyAction::Abort);
                }
                command_for(code, screen).map(KeyAction::Command)
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
                None
            }
        }
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    pub fn snapshot(&self, frame: u64) -> PlayerInput {
        PlayerInput {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')], frame),
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')], frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

/// Fold upper-case letters onto lower-case so Shift does not matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key press to a screen command for the screen currently shown.
pub fn command_for(code: KeyCode, screen: Screen) -> Option<Command> {
    use KeyCode::{Backspace, Char, Enter, Esc};

    let command = match (screen, code) {
        (Screen::Menu, Enter | Char(' ')) => Command::Start,
        (Screen::Menu, Char('o')) => Command::OpenSettings,
        (Screen::Menu, Esc | Char('q')) => Command::Escape,

        (Screen::Playing, Esc | Char('p')) => Command::Escape,

        (Screen::Paused, Esc | Char('p')) => Command::Escape,
        (Screen::Paused, Enter) => Command::Start,
        (Screen::Paused, Char('o')) => Command::OpenSettings,
        (Screen::Paused, Char('m')) => Command::ToMenu,

        (Screen::Settings, Char('s')) => Command::ToggleStarfield,
        (Screen::Settings, Char('f')) => Command::CycleFrameRate,
        (Screen::Settings, Esc | Backspace) => Command::Escape,

        (Screen::GameOver, Enter | Char('r')) => Command::Start,
        (Screen::GameOver, Char('m')) => Command::ToMenu,
        (Screen::GameOver, Esc) => Command::Escape,

        (Screen::ExitConfirmation, Enter | Char('y')) => Command::ConfirmExit,
        (Screen::ExitConfirmation, Esc | Char('n')) => Command::Escape,

        _ => return None,
    };
    Some(command)
}
