//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit input events into window events.
//
// Architecture:
//   WindowEvent → InputProcessor → Event → EventQueue
//
// Stateful modifier tracking: caches the modifier state from
// ModifiersChanged and stamps it on every following key and button event.
// Unmapped keys (F13-F24, media keys) are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, KeyCode, Modifiers, MouseButton};

//=== Constants ===========================================================

/// Pixels per wheel line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State ---------------------------------------------------

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.current_modifiers = Modifiers::from(state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a key event, or `None` for keys without an engine code.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<Event> {
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(self.key_event(key, key_event.state))
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> Event {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;
        match state {
            ElementState::Pressed => Event::MouseButtonDown { button, modifiers },
            ElementState::Released => Event::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> Event {
        Event::MouseMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    /// Wheel movement in lines.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> Event {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(dx, dy) => (dx, dy),
            MouseScrollDelta::PixelDelta(pos) => {
                ((pos.x / PIXELS_PER_LINE) as f32, (pos.y / PIXELS_PER_LINE) as f32)
            }
        };
        Event::MouseWheel { dx, dy }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_event(&self, key: KeyCode, state: ElementState) -> Event {
        let modifiers = self.current_modifiers;
        match state {
            ElementState::Pressed => Event::KeyDown { key, modifiers },
            ElementState::Released => Event::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit already maps Cmd to Ctrl and Option to Alt on macOS.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Function Keys ------------------------------------------------
            F1 => KeyCode::F1, F2 => KeyCode::F2, F3 => KeyCode::F3,
            F4 => KeyCode::F4, F5 => KeyCode::F5, F6 => KeyCode::F6,
            F7 => KeyCode::F7, F8 => KeyCode::F8, F9 => KeyCode::F9,
            F10 => KeyCode::F10, F11 => KeyCode::F11, F12 => KeyCode::F12,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Back, Forward and numbered buttons collapse into `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        assert!(InputProcessor::new().current_modifiers().is_empty());
    }

    #[test]
    fn key_events_carry_cached_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, false));

        assert_eq!(
            processor.key_event(KeyCode::KeyS, ElementState::Pressed),
            Event::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
        assert_eq!(
            processor.key_event(KeyCode::KeyS, ElementState::Released),
            Event::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
    }

    #[test]
    fn modifiers_persist_across_events() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        let click = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let key = processor.key_event(KeyCode::Space, ElementState::Pressed);

        assert!(matches!(click, Event::MouseButtonDown { modifiers, .. } if modifiers.shift));
        assert!(matches!(key, Event::KeyDown { modifiers, .. } if modifiers.shift));
    }

    #[test]
    fn mouse_move_keeps_coordinates() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_move(123.5, 456.25),
            Event::MouseMoved { x: 123.5, y: 456.25 }
        );
    }

    #[test]
    fn wheel_pixels_are_converted_to_lines() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_wheel(MouseScrollDelta::LineDelta(0.0, -2.0)),
            Event::MouseWheel { dx: 0.0, dy: -2.0 }
        );
        assert_eq!(
            processor.process_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(40.0, 10.0))),
            Event::MouseWheel { dx: 2.0, dy: 0.5 }
        );
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::F12), KeyCode::F12);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
