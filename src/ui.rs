/// Ephemeral view state; never persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    menu_open: bool,
}

impl UiState {
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}
