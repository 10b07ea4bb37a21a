use std::path::PathBuf;

/// Failures while acquiring the display, font or event source.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to set up the terminal: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("terminal is {actual:?} but the playing field needs at least {required:?}")]
    TerminalTooSmall {
        actual: (u16, u16),
        required: (u16, u16),
    },

    #[error("failed to load '{name}', looked in: {searched:?}. Place it in the working directory")]
    FontNotFound { name: String, searched: Vec<PathBuf> },

    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} is not a TrueType font")]
    NotTrueType(PathBuf),
}

/// Failures while the game loop is running.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_not_found_display() {
        let err = StartupError::FontNotFound {
            name: "arial.ttf".to_string(),
            searched: vec![PathBuf::from("arial.ttf")],
        };
        assert_eq!(
            err.to_string(),
            "failed to load 'arial.ttf', looked in: [\"arial.ttf\"]. Place it in the working directory"
        );
    }

    #[test]
    fn test_terminal_too_small_display() {
        let err = StartupError::TerminalTooSmall { actual: (20, 10), required: (38, 18) };
        assert_eq!(
            err.to_string(),
            "terminal is (20, 10) but the playing field needs at least (38, 18)"
        );
    }
}
