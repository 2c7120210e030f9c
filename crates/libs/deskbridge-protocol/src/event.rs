//! Input events captured on the macOS side and replayed on the Windows side.

use serde::{Deserialize, Serialize};

/// Everything the capture side can send across the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Keyboard(KeyboardEvent),
    MouseMove(MouseMoveEvent),
    MouseButton(MouseButtonEvent),
    /// Scroll from a trackpad or mouse wheel.
    MouseScroll(MouseScrollEvent),
    /// Multi-finger trackpad gesture.
    Gesture(GestureEvent),
    /// Liveness probe. The receiver answers with a `Pong` carrying the
    /// same frame sequence.
    Ping,
    Pong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    /// Virtual key code as reported by the capture side.
    pub key_code: u16,
    /// Resolved character, when the key produces one.
    pub character: Option<char>,
    /// `true` on press, `false` on release.
    pub pressed: bool,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveEvent {
    /// Absolute X position, normalized to `0.0..=1.0`.
    pub x: f64,
    /// Absolute Y position, normalized to `0.0..=1.0`.
    pub y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Button4,
    Button5,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseScrollEvent {
    /// Horizontal delta; negative scrolls left.
    pub delta_x: f64,
    /// Vertical delta; negative scrolls down. macOS natural scrolling is
    /// inverted relative to Windows; the replay side compensates.
    pub delta_y: f64,
    /// Pixel-based (trackpad) rather than line-based (wheel) scrolling.
    pub is_pixel_based: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub gesture_type: GestureType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureType {
    /// Four-finger swipe left: previous virtual desktop.
    SwipeLeft,
    /// Four-finger swipe right: next virtual desktop.
    SwipeRight,
    /// Four-finger swipe up: task view.
    SwipeUp,
    /// Four-finger swipe down: show desktop.
    SwipeDown,
    ZoomIn(f64),
    ZoomOut(f64),
}

/// Modifier state in macOS terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub command: bool,
}

impl Modifiers {
    /// Translate to the Windows dialect: Command maps to Ctrl, Option to
    /// Alt, and Control to the Windows key. Both ends share this mapping
    /// so that exactly one of them applies it.
    pub fn to_windows(self) -> WindowsModifiers {
        WindowsModifiers {
            shift: self.shift,
            ctrl: self.command,
            alt: self.alt,
            win: self.control,
        }
    }
}

/// Modifier state in Windows terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub win: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_translates_to_ctrl() {
        let mods = Modifiers { command: true, ..Modifiers::default() };
        let win = mods.to_windows();
        assert!(win.ctrl);
        assert!(!win.win);
        assert!(!win.alt);
    }

    #[test]
    fn control_translates_to_win_key() {
        let mods = Modifiers { control: true, ..Modifiers::default() };
        let win = mods.to_windows();
        assert!(win.win);
        assert!(!win.ctrl);
    }

    #[test]
    fn shift_and_alt_pass_through() {
        let mods = Modifiers { shift: true, alt: true, ..Modifiers::default() };
        let win = mods.to_windows();
        assert!(win.shift);
        assert!(win.alt);
        assert!(!win.ctrl);
        assert!(!win.win);
    }

    #[test]
    fn default_modifiers_are_all_clear() {
        assert_eq!(Modifiers::default().to_windows(), WindowsModifiers::default());
    }
}
