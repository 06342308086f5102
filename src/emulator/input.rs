//
// Game Boy buttons and the pad state they produce
//

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Down,
    Left,
    Right,
    Up,
    // Jump
    A,
    // Sprint
    B,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Press(Button),
    Release(Button),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GamepadState {
    pub left: bool,
    pub down: bool,
    pub up: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
}

impl GamepadState {
    fn button_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Up => &mut self.up,
            Button::A => &mut self.a,
            Button::B => &mut self.b,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(button) => *self.button_mut(button) = true,
            InputEvent::Release(button) => *self.button_mut(button) = false,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == GamepadState::default()
    }
}
