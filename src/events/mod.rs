use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Quit,
    ToggleHelp,
    Back,
    // Mood input screen
    Input(char),
    Backspace,
    SubmitMood,
    PillPrev,
    PillNext,
    PillApply,
    // Tracks screen
    NavigateUp,
    NavigateDown,
    SelectFilter(u8),
    PlaySelected,
    OpenSelected,
    GoMoodInput,
    RetryConnect,
    // Transport
    TogglePlay,
    NextTrack,
    PrevTrack,
    SeekForward,
    SeekBackward,
}

pub fn map_key_to_action(key: KeyEvent, mood_input_active: bool) -> Option<UserAction> {
    if mood_input_active {
        return match key.code {
            KeyCode::Esc => Some(UserAction::Back),
            KeyCode::Enter => Some(UserAction::SubmitMood),
            KeyCode::Backspace => Some(UserAction::Backspace),
            KeyCode::Up => Some(UserAction::PillPrev),
            KeyCode::Down => Some(UserAction::PillNext),
            KeyCode::Tab => Some(UserAction::PillApply),
            KeyCode::Char(c) => Some(UserAction::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UserAction::Quit),
        KeyCode::Char('?') => Some(UserAction::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UserAction::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UserAction::NavigateDown),
        KeyCode::Enter => Some(UserAction::PlaySelected),
        KeyCode::Esc | KeyCode::Char('b') => Some(UserAction::Back),
        KeyCode::Char('o') => Some(UserAction::OpenSelected),
        KeyCode::Char('m') => Some(UserAction::GoMoodInput),
        KeyCode::Char('R') => Some(UserAction::RetryConnect),
        KeyCode::Char(' ') => Some(UserAction::TogglePlay),
        KeyCode::Char('n') => Some(UserAction::NextTrack),
        KeyCode::Char('p') => Some(UserAction::PrevTrack),
        KeyCode::Char('f') => Some(UserAction::SeekForward),
        KeyCode::Char('r') => Some(UserAction::SeekBackward),
        KeyCode::Char('1') => Some(UserAction::SelectFilter(1)),
        KeyCode::Char('2') => Some(UserAction::SelectFilter(2)),
        KeyCode::Char('3') => Some(UserAction::SelectFilter(3)),
        KeyCode::Char('4') => Some(UserAction::SelectFilter(4)),
        KeyCode::Char('5') => Some(UserAction::SelectFilter(5)),
        KeyCode::Char('6') => Some(UserAction::SelectFilter(6)),
        _ => None,
    }
}
