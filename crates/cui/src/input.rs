use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Dismiss,
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    Activate,
    PlayGem,
    EndTurn,
    NextStep,
    BuyGem,
    RestockShop,
    TossGem,
    UpgradeGem,
    BuyHeal,
    LeaveShop,
    Rest,
    Train,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Dismiss,
        KeyCode::Tab => InputAction::NextFocus,
        KeyCode::BackTab => InputAction::PrevFocus,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('p') => InputAction::PlayGem,
        KeyCode::Char('e') => InputAction::EndTurn,
        KeyCode::Char('n') => InputAction::NextStep,
        KeyCode::Char('b') => InputAction::BuyGem,
        KeyCode::Char('r') => InputAction::RestockShop,
        KeyCode::Char('x') => InputAction::TossGem,
        KeyCode::Char('u') => InputAction::UpgradeGem,
        KeyCode::Char('h') => InputAction::BuyHeal,
        KeyCode::Char('l') => InputAction::LeaveShop,
        KeyCode::Char('z') => InputAction::Rest,
        KeyCode::Char('t') => InputAction::Train,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_battle_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)),
            InputAction::PlayGem
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE)),
            InputAction::EndTurn
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn maps_shop_and_camp_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)),
            InputAction::BuyGem
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE)),
            InputAction::UpgradeGem
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            InputAction::Rest
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE)),
            InputAction::Train
        );
    }

    #[test]
    fn vim_movement_and_arrows_agree() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
            map_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)),
            map_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE))
        );
    }
}
