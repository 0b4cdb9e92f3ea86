pub mod help;
pub mod mood_screen;
pub mod player_bar;
pub mod tracks_screen;
