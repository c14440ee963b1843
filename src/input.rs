//! Level-triggered key state, sampled once per tick.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Shoot,
    SpecialAttack,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub shoot: bool,
    pub special_attack: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.move_left = held,
            Action::MoveRight => self.move_right = held,
            Action::Shoot => self.shoot = held,
            Action::SpecialAttack => self.special_attack = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Shoot => self.shoot,
            Action::SpecialAttack => self.special_attack,
        }
    }

    pub fn clear(&mut self) {
        *self = InputState::default();
    }
}
