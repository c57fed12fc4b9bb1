//! Type definitions for the application screens.

/// Enumeration of the application screens.
///
/// This enumeration holds the current screen of the game. It determines which screen to render and
/// what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Title screen listing the controls.
    ///
    /// Any key moves on to the level selection, or straight into the game when a level was given on
    /// the command line.
    Welcome,
    /// Level selection screen.
    ///
    /// The player picks one of the shipped levels by pressing its number.
    LevelMenu,
    /// In-game screen where the maze is displayed and played.
    InGame,
    /// Final screen showing how the session ended and how long it took.
    GameOver(Outcome),
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The player reached the exit.
    Won,
    /// The player quit before reaching the exit.
    Abandoned,
}

impl Outcome {
    /// Returns the headline shown on the game over screen.
    pub(crate) const fn headline(self) -> &'static str {
        match self {
            Self::Won => "You found the exit!",
            Self::Abandoned => "Game abandoned",
        }
    }
}
