use crate::action::Action;
use bitflags::bitflags;

bitflags! {
    /// Set of pressed pointer buttons.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 1;
        const SECONDARY = 1 << 1;
    }
}

/// Stateful mapping from raw events to [`Action`]s.
#[derive(Debug, Default, Clone)]
pub struct InputMapper {
    modifier_held: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modifier(&mut self, held: bool) {
        if self.modifier_held != held {
            tracing::trace!(held, "modifier changed");
        }
        self.modifier_held = held;
    }

    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Pointer motion with the buttons held at the time of the move.
    pub fn pointer_moved(&self, buttons: PointerButtons, dx: f32, dy: f32) -> Action {
        if buttons == PointerButtons::PRIMARY {
            if self.modifier_held {
                Action::OrbitLight(dx)
            } else {
                Action::Orbit { dx, dy }
            }
        } else if buttons == PointerButtons::SECONDARY {
            Action::Pan { dx, dy }
        } else {
            Action::Noop
        }
    }

    pub fn wheel(&self, delta: f32) -> Action {
        if delta == 0.0 {
            Action::Noop
        } else {
            Action::Dolly(delta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_drag_orbits() {
        let mapper = InputMapper::new();
        assert_eq!(
            mapper.pointer_moved(PointerButtons::PRIMARY, 3.0, -2.0),
            Action::Orbit { dx: 3.0, dy: -2.0 }
        );
    }

    #[test]
    fn modifier_turns_primary_drag_into_light_orbit() {
        let mut mapper = InputMapper::new();
        mapper.set_modifier(true);
        assert!(mapper.modifier_held());
        assert_eq!(
            mapper.pointer_moved(PointerButtons::PRIMARY, 7.0, 1.0),
            Action::OrbitLight(7.0)
        );
        mapper.set_modifier(false);
        assert!(matches!(
            mapper.pointer_moved(PointerButtons::PRIMARY, 7.0, 1.0),
            Action::Orbit { .. }
        ));
    }

    #[test]
    fn secondary_drag_pans_even_with_modifier() {
        let mut mapper = InputMapper::new();
        mapper.set_modifier(true);
        assert_eq!(
            mapper.pointer_moved(PointerButtons::SECONDARY, -1.0, 4.0),
            Action::Pan { dx: -1.0, dy: 4.0 }
        );
    }

    #[test]
    fn both_or_no_buttons_do_nothing() {
        let mapper = InputMapper::new();
        let both = PointerButtons::PRIMARY | PointerButtons::SECONDARY;
        assert_eq!(mapper.pointer_moved(both, 1.0, 1.0), Action::Noop);
        assert_eq!(mapper.pointer_moved(PointerButtons::empty(), 1.0, 1.0), Action::Noop);
    }

    #[test]
    fn wheel_dollies() {
        let mapper = InputMapper::new();
        assert_eq!(mapper.wheel(1.5), Action::Dolly(1.5));
        assert_eq!(mapper.wheel(-1.0), Action::Dolly(-1.0));
        assert_eq!(mapper.wheel(0.0), Action::Noop);
    }

    #[test]
    fn button_set_tracks_presses() {
        let mut buttons = PointerButtons::empty();
        buttons.insert(PointerButtons::PRIMARY);
        buttons.set(PointerButtons::SECONDARY, true);
        assert!(buttons.contains(PointerButtons::PRIMARY | PointerButtons::SECONDARY));
        buttons.remove(PointerButtons::PRIMARY);
        assert_eq!(buttons, PointerButtons::SECONDARY);

        // A drag that starts with both buttons and releases one pans.
        let mapper = InputMapper::new();
        assert_eq!(
            mapper.pointer_moved(buttons, 2.0, 0.0),
            Action::Pan { dx: 2.0, dy: 0.0 }
        );
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let buttons = PointerButtons::from_bits_truncate(0b101);
        assert_eq!(buttons, PointerButtons::PRIMARY);
    }
}
