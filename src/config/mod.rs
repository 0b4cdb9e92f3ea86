use anyhow::Result;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the moodify backend (token + recommendation endpoints).
    pub server_url: String,
    /// Base URL of the player Web API (playback commands + state polling).
    pub player_api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // Try loading .env file, ignore if it doesn't exist (e.g. env vars set manually)

        Ok(Config {
            server_url: std::env::var("MOODIFY_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
                .trim_end_matches('/')
                .to_string(),
            player_api_url: std::env::var("MOODIFY_PLAYER_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
