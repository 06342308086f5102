use super::input::{Button, GamepadState, InputEvent};
use super::Emulator;
use crate::ai::policy::{Action, Command};
use crate::error::{Error, Result};

use log::trace;

/// Turns commands into button holds. Each unit of a command's duration is
/// `act_freq` emulator ticks.
pub struct Controller {
    act_freq: u32,
    gamepad: GamepadState,
}

impl Controller {
    pub fn new(act_freq: u32) -> Result<Self> {
        if act_freq == 0 {
            return Err(Error::InvalidActFreq);
        }
        Ok(Self {
            act_freq,
            gamepad: GamepadState::default(),
        })
    }

    pub fn gamepad(&self) -> GamepadState {
        self.gamepad
    }

    // Buttons in press order; they are released in reverse
    fn buttons(action: Action) -> &'static [Button] {
        match action {
            Action::Jump => &[Button::Right, Button::B, Button::A],
            Action::Right => &[Button::Right, Button::B],
            Action::Left => &[Button::Left],
            Action::Up => &[Button::Up],
        }
    }

    fn send<E: Emulator + ?Sized>(&mut self, emulator: &mut E, event: InputEvent) {
        self.gamepad.apply(event);
        emulator.send_input(event);
    }

    pub fn run_action<E: Emulator + ?Sized>(&mut self, emulator: &mut E, command: Command) {
        let buttons = Self::buttons(command.action);
        let ticks = u64::from(command.duration) * u64::from(self.act_freq);
        trace!("Holding {:?} for {} ticks", buttons, ticks);

        for &button in buttons {
            self.send(emulator, InputEvent::Press(button));
        }
        for _ in 0..ticks {
            emulator.tick();
        }
        for &button in buttons.iter().rev() {
            self.send(emulator, InputEvent::Release(button));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Input(InputEvent),
        Tick,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Emulator for Recorder {
        fn send_input(&mut self, event: InputEvent) {
            self.calls.push(Call::Input(event));
        }

        fn tick(&mut self) {
            self.calls.push(Call::Tick);
        }
    }

    #[test]
    fn jump_presses_right_sprint_and_jump() {
        let mut controller = Controller::new(2).unwrap();
        let mut recorder = Recorder::default();
        controller.run_action(&mut recorder, Command::new(Action::Jump, 2));

        use self::Call::*;
        use InputEvent::*;
        assert_eq!(
            recorder.calls,
            vec![
                Input(Press(Button::Right)),
                Input(Press(Button::B)),
                Input(Press(Button::A)),
                Tick,
                Tick,
                Tick,
                Tick,
                Input(Release(Button::A)),
                Input(Release(Button::B)),
                Input(Release(Button::Right)),
            ]
        );
        assert!(controller.gamepad().is_idle());
    }

    #[test]
    fn left_holds_a_single_button() {
        let mut controller = Controller::new(1).unwrap();
        let mut recorder = Recorder::default();
        controller.run_action(&mut recorder, Command::new(Action::Left, 3));
        assert_eq!(recorder.calls.first(), Some(&Call::Input(InputEvent::Press(Button::Left))));
        assert_eq!(recorder.calls.iter().filter(|call| **call == Call::Tick).count(), 3);
        assert_eq!(recorder.calls.last(), Some(&Call::Input(InputEvent::Release(Button::Left))));
    }

    #[test]
    fn zero_act_freq_is_rejected() {
        assert!(Controller::new(0).is_err());
    }
}
