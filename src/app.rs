//! Core application state and control loop for the maze game.

use color_eyre::eyre::{Result, WrapErr as _};
use ratatui::DefaultTerminal;

use crate::{
    config::{Config, Level},
    events,
    file_loader::{self, level_path},
    maze::GameState,
    movement::{self, Direction, MoveResult},
    types::{Outcome, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state from which Ratatui renders every frame and which Crossterm input
/// events update. It owns the single [`GameState`] of the session.
pub struct App {
    /// Application exit flag.
    ///
    /// Set to `true` once the player quits or dismisses the game over screen.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Runtime configuration, used to locate the level files.
    pub(crate) config: Config,
    /// Level requested on the command line, which skips the level menu.
    pub(crate) preset_level: Option<Level>,
    /// Level being played, once one is chosen.
    pub(crate) level: Option<Level>,
    /// State of the session, once a level is loaded.
    pub(crate) game: Option<GameState>,
    /// Outcome of the latest move, shown in the status bar.
    pub(crate) last_move: Option<MoveResult>,
}

impl App {
    /// Creates the application from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the level given on the command line is out of range.
    pub fn new(config: Config) -> Result<Self> {
        let preset_level = config.level()?;

        Ok(Self {
            exit: false,
            screen: Screen::Welcome,
            config,
            preset_level,
            level: None,
            game: None,
            last_move: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration draws one frame and then blocks until the next input event has been handled.
    /// The loop ends when the exit flag is set.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] from drawing or reading terminal events.
    /// - [`LoadError`](crate::file_loader::LoadError) when the chosen level cannot be loaded.
    /// - [`InvalidLevel`](crate::InvalidLevel) when an out-of-range level is chosen.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Time taken by the finished session, if any.
    #[must_use]
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.game
            .as_ref()
            .and_then(GameState::elapsed)
            .map(|elapsed| elapsed.as_secs_f64())
    }

    /// Leaves the welcome screen, either for the level menu or for the preset level.
    pub(crate) fn leave_welcome(&mut self) -> Result<()> {
        match self.preset_level {
            Some(level) => self.start_level(level),
            None => {
                self.screen = Screen::LevelMenu;
                Ok(())
            }
        }
    }

    /// Loads `level`, starts its timer and switches to the game screen.
    pub(crate) fn start_level(&mut self, level: Level) -> Result<()> {
        let path = level_path(&self.config.levels_dir, level);
        let mut game = file_loader::load_level(&path)
            .wrap_err_with(|| format!("failed to load level {}", level.number()))?;
        game.start();

        tracing::info!(level = level.number(), "level started");
        self.level = Some(level);
        self.game = Some(game);
        self.last_move = None;
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Applies a move to the running session and ends it when the exit is reached.
    pub(crate) fn move_player(&mut self, direction: Direction) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        let result = movement::apply_move(game, direction);
        if result == MoveResult::Won {
            game.finish();
            tracing::info!(elapsed = ?game.elapsed(), "level completed");
            self.screen = Screen::GameOver(Outcome::Won);
        }
        self.last_move = Some(result);
    }

    /// Ends the running session without reaching the exit.
    pub(crate) fn abandon(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.finish();
            tracing::info!(elapsed = ?game.elapsed(), "level abandoned");
        }
        self.screen = Screen::GameOver(Outcome::Abandoned);
    }
}
