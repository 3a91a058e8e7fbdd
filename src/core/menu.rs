#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Hidden,
    Shown,
}

impl MenuState {
    pub fn is_hidden(self) -> bool {
        self == MenuState::Hidden
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuController {
    state: MenuState,
}

impl MenuController {
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn toggle(&mut self) -> MenuState {
        self.state = match self.state {
            MenuState::Hidden => MenuState::Shown,
            MenuState::Shown => MenuState::Hidden,
        };
        self.state
    }

    pub fn hide(&mut self) -> MenuState {
        self.state = MenuState::Hidden;
        self.state
    }
}
