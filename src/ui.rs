//! User interface rendering functions for all application screens.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    config::Level,
    maze::{Cell, GameState},
    movement::MoveResult,
    types::{Outcome, Screen},
    App,
};

/// Style of regular text.
const CONTENT_STYLE: Style = Style::new().fg(Color::Green);

/// Style of highlighted text.
const ACTIVE_CONTENT_STYLE: Style = Style::new().fg(Color::White).bg(Color::Green);

/// Updates the application UI based on the persistent state.
///
/// This function renders the screen stored in the [`App`] structure, dispatching to the
/// appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors if the game screen is shown without a loaded level or if the
/// maze dimensions cannot be converted to terminal coordinates.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    match app.screen {
        Screen::Welcome => welcome(frame),
        Screen::LevelMenu => level_menu(frame),
        Screen::InGame => in_game(app, frame)?,
        Screen::GameOver(outcome) => game_over(app, frame, outcome),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders a rounded, centered block and returns the area inside its borders.
///
/// The block is sized to fit `width` by `height` cells of content, shrunk to the frame if needed.
pub(crate) fn centered_block(
    frame: &mut Frame,
    title: &str,
    hint: &str,
    width: u16,
    height: u16,
) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height.saturating_add(2))])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(width.saturating_add(2))])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::bordered()
        .title(title)
        .title_bottom(hint)
        .title_alignment(Alignment::Center)
        .style(CONTENT_STYLE)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);

    frame.render_widget(block, area);

    inner
}

/// Renders the title screen with the list of controls.
pub(crate) fn welcome(frame: &mut Frame) {
    let lines = vec![
        Line::styled("MAZE OUT", ACTIVE_CONTENT_STYLE).centered(),
        Line::default(),
        Line::raw("Walk the player (P) to the exit (E)."),
        Line::raw("The clock starts as soon as the maze appears."),
        Line::default(),
        Line::raw("Up     arrow up    / k"),
        Line::raw("Down   arrow down  / j"),
        Line::raw("Left   arrow left  / h"),
        Line::raw("Right  arrow right / l"),
        Line::raw("Quit   esc         / q"),
    ];

    let inner = centered_block(frame, "Welcome", "press any key to continue", 48, 10);
    frame.render_widget(Paragraph::new(lines).style(CONTENT_STYLE), inner);
}

/// Renders the level selection screen.
pub(crate) fn level_menu(frame: &mut Frame) {
    let lines: Vec<Line> = Level::all()
        .map(|level| Line::raw(format!("{0}. Level {0}", level.number())).centered())
        .collect();

    let inner = centered_block(frame, "Choose your level", "(1-5) select / (q) quit", 30, 5);
    frame.render_widget(Paragraph::new(lines).style(CONTENT_STYLE), inner);
}

/// Returns the style used to draw a maze cell.
pub(crate) const fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Wall => Style::new().fg(Color::Red),
        Cell::Player => Style::new().fg(Color::Green),
        Cell::Exit => Style::new().fg(Color::Yellow),
        Cell::OpenPath => Style::new(),
    }
}

/// Converts the maze into styled terminal lines, one per grid row.
pub(crate) fn maze_lines(game: &GameState) -> Vec<Line<'static>> {
    game.grid()
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|&cell| Span::styled(cell.symbol().to_string(), cell_style(cell)))
                .collect::<Line>()
        })
        .collect()
}

/// First maze row to draw so that `player_row` stays visible in a view `height` rows tall.
///
/// The view follows the player, keeping it near the middle, and never scrolls past the last row.
pub(crate) const fn scroll_offset(player_row: u16, rows: u16, height: u16) -> u16 {
    if rows <= height {
        return 0;
    }

    let offset = player_row.saturating_sub(height / 2);
    let last = rows - height;
    if offset > last {
        last
    } else {
        offset
    }
}

/// Renders the in-game screen with the maze and a status bar.
///
/// The maze is centered in the frame. When it is taller than the space above the status bar, it is
/// scrolled so that the player's row stays in view. The status bar shows the controls and the
/// outcome of the last move.
///
/// # Errors
///
/// This function returns an error if no level is loaded or if the maze does not fit terminal
/// coordinates.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    let game = app
        .game
        .as_ref()
        .ok_or_eyre("failed to retrieve the loaded level")?;

    let maze_rows = u16::try_from(game.rows())?;
    let maze_columns = u16::try_from(game.cols())?;

    let [maze_content_area, tooltip_full_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());

    let visible_rows = maze_rows.min(maze_content_area.height);
    let [maze_area] = Layout::vertical([Constraint::Length(visible_rows)])
        .flex(Flex::Center)
        .areas(maze_content_area);
    let [maze_area] = Layout::horizontal([Constraint::Length(maze_columns)])
        .flex(Flex::Center)
        .areas(maze_area);

    let player_row = u16::try_from(game.player().row)?;
    let offset = scroll_offset(player_row, maze_rows, maze_area.height);
    frame.render_widget(
        Paragraph::new(maze_lines(game)).scroll((offset, 0)),
        maze_area,
    );

    let level = app
        .level
        .map_or_else(String::new, |level| format!("Level {}", level.number()));
    let status = match app.last_move {
        Some(MoveResult::Blocked) => "blocked",
        _ => "",
    };

    let tooltip_block = Block::default()
        .title(format!(" {level} "))
        .title_alignment(Alignment::Center)
        .style(CONTENT_STYLE)
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let tooltip_area = tooltip_block.inner(tooltip_full_area);
    let tooltip = Paragraph::new(vec![
        Line::raw("(arrows / hjkl) move / (esc) quit").centered(),
        Line::raw(status).centered(),
    ]);

    frame.render_widget(tooltip_block, tooltip_full_area);
    frame.render_widget(tooltip, tooltip_area);

    Ok(())
}

/// Formats the time taken by a finished session, in seconds with two decimals.
pub(crate) fn format_elapsed(seconds: Option<f64>) -> String {
    seconds.map_or_else(
        || "Time taken: unknown".to_owned(),
        |seconds| format!("Time taken: {seconds:.2} seconds"),
    )
}

/// Renders the game over screen with the time taken.
pub(crate) fn game_over(app: &App, frame: &mut Frame, outcome: Outcome) {
    let lines = vec![
        Line::styled("GAME OVER!", ACTIVE_CONTENT_STYLE).centered(),
        Line::default(),
        Line::raw(outcome.headline()).centered(),
        Line::raw(format_elapsed(app.elapsed_secs())).centered(),
    ];

    let inner = centered_block(frame, "Game Over", "press any key to exit", 40, 4);
    frame.render_widget(Paragraph::new(lines).style(CONTENT_STYLE), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::{
        app::tests::create_test_app,
        file_loader::parse_level,
        maze::{Position, Status},
        movement::Direction,
    };

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Draws the application once and returns the resulting buffer.
    fn render(app: &App) -> Buffer {
        let mut terminal = create_test_terminal();
        let _ = terminal
            .draw(|frame| draw(app, frame).expect("drawing should succeed in test"))
            .expect("terminal drawing should succeed");
        terminal.backend().buffer().clone()
    }

    /// Concatenates every symbol in the buffer.
    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    /// Returns the style of the first buffer cell showing `symbol`.
    fn first_fg(buffer: &Buffer, symbol: &str) -> Option<Color> {
        buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == symbol)
            .map(|cell| cell.fg)
    }

    #[test]
    fn test_draw_welcome() {
        let app = create_test_app(&[]);

        let buffer = render(&app);

        assert!(text(&buffer).contains("MAZE OUT"));
        assert!(text(&buffer).contains("press any key to continue"));
    }

    #[test]
    fn test_draw_level_menu() {
        let mut app = create_test_app(&[]);
        app.screen = Screen::LevelMenu;

        let content = text(&render(&app));

        for number in 1..=5 {
            assert!(content.contains(&format!("{number}. Level {number}")));
        }
    }

    #[test]
    fn test_draw_in_game_colors_cells() {
        let mut app = create_test_app(&["-l", "1"]);
        app.leave_welcome().expect("level 1 should load");

        let buffer = render(&app);

        assert!(text(&buffer).contains("Level 1"));
        assert_eq!(first_fg(&buffer, "#"), Some(Color::Red));
        assert_eq!(first_fg(&buffer, "P"), Some(Color::Green));
        assert_eq!(first_fg(&buffer, "E"), Some(Color::Yellow));
    }

    #[test]
    fn test_draw_in_game_shows_blocked_moves() {
        let mut app = create_test_app(&["-l", "1"]);
        app.leave_welcome().expect("level 1 should load");
        app.move_player(Direction::Up);

        assert!(text(&render(&app)).contains("blocked"));
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 11, 21), 0, "short mazes never scroll");
        assert_eq!(scroll_offset(5, 31, 21), 0);
        assert_eq!(scroll_offset(15, 31, 21), 5);
        assert_eq!(scroll_offset(29, 31, 21), 10, "the last row is never scrolled past");
        assert_eq!(scroll_offset(39, 40, 21), 19);
    }

    #[test]
    fn test_draw_tall_maze_follows_player() {
        let mut app = create_test_app(&["-l", "5"]);
        app.leave_welcome().expect("level 5 should load");
        let game = app.game.as_mut().expect("game should be loaded");

        // Place the player two steps away from the exit in the bottom row.
        let start = game.player();
        let near_exit = Position::new(29, 56);
        assert_eq!(game.grid().get(near_exit), Some(Cell::OpenPath));
        assert!(game.grid_mut().set(start, Cell::OpenPath));
        assert!(game.grid_mut().set(near_exit, Cell::Player));
        game.set_player(near_exit);

        app.move_player(Direction::Right);
        assert_eq!(
            app.game.as_ref().map(GameState::status),
            Some(Status::Active)
        );

        let buffer = render(&app);

        assert_eq!(first_fg(&buffer, "P"), Some(Color::Green), "player is visible");
        assert_eq!(first_fg(&buffer, "E"), Some(Color::Yellow), "exit is visible");
        assert!(text(&buffer).contains("Level 5"));
    }

    #[test]
    fn test_draw_tall_maze_walking_down() {
        let mut source = String::from("40 3\n###\n#P#\n");
        for _ in 0..36 {
            source.push_str("# #\n");
        }
        source.push_str("#E#\n###\n");
        let mut app = create_test_app(&[]);
        app.game = Some(parse_level(&source).expect("corridor level should parse"));
        app.screen = Screen::InGame;

        assert!(text(&render(&app)).contains('P'), "player is visible at the top");

        for _ in 0..36 {
            app.move_player(Direction::Down);
        }
        assert_eq!(app.last_move, Some(MoveResult::Moved));

        let content = text(&render(&app));
        assert!(content.contains('P'), "player is visible at the bottom");
        assert!(content.contains('E'), "exit is visible at the bottom");
    }

    #[test]
    fn test_in_game_without_level_fails() {
        let mut app = create_test_app(&[]);
        app.screen = Screen::InGame;
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            assert!(in_game(&app, frame).is_err(), "no level is loaded");
        });

        assert!(result.is_ok(), "terminal drawing should succeed even if in_game fails");
    }

    #[test]
    fn test_draw_game_over() {
        let mut app = create_test_app(&["-l", "2"]);
        app.leave_welcome().expect("level 2 should load");
        app.abandon();

        let content = text(&render(&app));

        assert!(content.contains("GAME OVER!"));
        assert!(content.contains("Game abandoned"));
        assert!(content.contains("Time taken: "));
        assert!(content.contains(" seconds"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Some(12.3456)), "Time taken: 12.35 seconds");
        assert_eq!(format_elapsed(None), "Time taken: unknown");
    }

    #[test]
    fn test_cell_styles() {
        assert_eq!(cell_style(Cell::Wall).fg, Some(Color::Red));
        assert_eq!(cell_style(Cell::Player).fg, Some(Color::Green));
        assert_eq!(cell_style(Cell::Exit).fg, Some(Color::Yellow));
        assert_eq!(cell_style(Cell::OpenPath).fg, None);
    }
}
