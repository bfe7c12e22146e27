use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Dismiss => {
            if app.show_help {
                app.show_help = false;
            }
        }
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Activate => app.activate_primary(),
        InputAction::PlayGem => app.play_at_cursor(),
        InputAction::EndTurn => app.end_turn(),
        InputAction::NextStep => app.next_step(),
        InputAction::BuyGem => app.buy_at_cursor(),
        InputAction::RestockShop => app.restock_shop(),
        InputAction::TossGem => app.toss_at_cursor(),
        InputAction::UpgradeGem => app.upgrade_at_cursor(),
        InputAction::BuyHeal => app.buy_heal(),
        InputAction::LeaveShop => app.leave_shop(),
        InputAction::Rest => app.camp_rest(),
        InputAction::Train => app.train_at_cursor(),
    }
}
