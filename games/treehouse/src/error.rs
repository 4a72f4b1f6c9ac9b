use thiserror::Error;

/// Problems found in level data.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level pack contains no levels")]
    Empty,

    #[error("level {level}: width must be positive, got {width}")]
    BadWidth { level: usize, width: f32 },

    #[error("level {level}: spawn point ({x}, {y}) is not finite")]
    BadSpawn { level: usize, x: f32, y: f32 },

    #[error("level {level}: {what} {index} has a degenerate rectangle")]
    BadRect {
        level: usize,
        what: &'static str,
        index: usize,
    },

    #[error("level {level}: exit has a degenerate rectangle")]
    BadExit { level: usize },

    #[error("level {level}: moving platform {index} has negative range {range}")]
    NegativeRange { level: usize, index: usize, range: f32 },

    #[error("level {level}: trampoline {index} must bounce upward, got strength {strength}")]
    BadBounce {
        level: usize,
        index: usize,
        strength: f32,
    },

    #[error("player tuning: {field} is out of range, got {value}")]
    BadTuning { field: &'static str, value: f64 },
}
