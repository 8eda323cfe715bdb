use std::fmt;

pub const HEADLINE_PLAYING: &str = "NO GOALS ALLOWED";
pub const HEADLINE_GAME_OVER: &str = "YOU LOSE";

pub const COLOR_GREEN: u32 = 0x008000;
pub const COLOR_RED: u32 = 0xff0000;

/// Text shown on the scoreboard. Pure function of (score, game_over).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub headline: String,
    /// 0xRRGGBB
    pub headline_color: u32,
    pub score_line: String,
    pub score_color: u32,
}

impl Scoreboard {
    pub fn render(score: u32, game_over: bool) -> Self {
        let (headline, headline_color) = if game_over {
            (HEADLINE_GAME_OVER, COLOR_RED)
        } else {
            (HEADLINE_PLAYING, COLOR_GREEN)
        };
        Self {
            headline: headline.to_string(),
            headline_color,
            score_line: format!("Score: {score}"),
            score_color: COLOR_GREEN,
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.headline, self.score_line)
    }
}
