use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    crossterm::{
        self,
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
// Renamed to avoid clashing with ratatui's layout `Direction`.
use sokoban_core::{
    Direction as MoveDirection, Position,
    board::Board,
    entity::{Entity, PotionKind},
    loader::load_board_from_file,
    tile::Tile,
};
use std::{
    io::{self, Stdout},
    path::PathBuf,
    time::Duration,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze file to load
    #[arg(short, long, value_name = "MAZE_FILE")]
    maze: PathBuf,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won,
    Lost,
}

struct App {
    /// The core game board.
    board: Board,
    /// Feedback line for the last turn.
    status: Option<String>,
    /// Set once the game is over; move input is ignored afterwards.
    outcome: Option<Outcome>,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(board: Board) -> Self {
        let outcome = if board.has_won() {
            Some(Outcome::Won)
        } else if board.player_moves_remaining() == 0 {
            Some(Outcome::Lost)
        } else {
            None
        };
        App {
            board,
            status: None,
            outcome,
            should_quit: false,
        }
    }

    /// Handles one turn of the game.
    fn attempt_move(&mut self, direction: MoveDirection) {
        if self.outcome.is_some() {
            return;
        }
        if self.board.attempt_move(direction) {
            self.status = None;
        } else {
            self.status = Some("Invalid move".to_string());
        }
        if self.board.has_won() {
            self.outcome = Some(Outcome::Won);
        } else if self.board.player_moves_remaining() == 0 {
            self.outcome = Some(Outcome::Lost);
        }
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn main() -> Result<()> {
    // Parse command line arguments; the maze path is always explicit.
    let args = Args::parse();
    let board = load_board_from_file(&args.maze)
        .with_context(|| format!("Failed to load maze file {}", args.maze.display()))?;

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    // Create the application state
    let mut app = App::new(board);

    // Run the main application loop
    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal state before reporting any error
    restore_terminal(&mut terminal)?;

    result
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?; // Put terminal in raw mode
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|f| ui(f, app))?;

        // The game is turn-based, so just wait for the next key.
        if crossterm::event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Up | KeyCode::Char('w') => app.attempt_move(MoveDirection::Up),
                    KeyCode::Down | KeyCode::Char('s') => app.attempt_move(MoveDirection::Down),
                    KeyCode::Left | KeyCode::Char('a') => app.attempt_move(MoveDirection::Left),
                    KeyCode::Right | KeyCode::Char('d') => app.attempt_move(MoveDirection::Right),
                    _ => {}
                }
            }
        }

        // Exit loop if requested
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Area for the maze
            Constraint::Length(3), // Area for player stats
            Constraint::Length(2), // Area for status/help
        ])
        .split(frame.area());

    // Render the maze
    render_maze(frame, main_layout[0], &app.board);

    // Render the player stats
    render_stats(frame, main_layout[1], &app.board);

    // Render status/help text
    let status_line = match app.outcome {
        Some(Outcome::Won) => Line::styled("You won!", Style::default().fg(Color::Green).bold()),
        Some(Outcome::Lost) => Line::styled("You lost!", Style::default().fg(Color::Red).bold()),
        None => match &app.status {
            Some(message) => Line::styled(message.clone(), Style::default().fg(Color::Yellow)),
            None => Line::from("Move with arrow keys or WASD."),
        },
    };
    let help_text = Paragraph::new(vec![
        status_line,
        Line::from("Press 'q' or 'Esc' to quit."),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(help_text, main_layout[2]);
}

/// Renders the player's resources onto the frame.
fn render_stats(frame: &mut Frame, area: Rect, board: &Board) {
    let stats = Line::from(vec![
        Span::raw(format!("Strength: {}", board.player_strength())),
        Span::raw("   "),
        Span::raw(format!(
            "Moves remaining: {}",
            board.player_moves_remaining()
        )),
    ]);
    let stats_widget =
        Paragraph::new(stats).block(Block::default().borders(Borders::ALL).title("Player"));
    frame.render_widget(stats_widget, area);
}

/// Renders the maze with entities and the player overlaid.
fn render_maze(frame: &mut Frame, area: Rect, board: &Board) {
    let maze = board.maze();
    let entities = board.entities();
    let player_position = board.player_position();

    let mut lines: Vec<Line> = Vec::with_capacity(maze.rows());

    for row in 0..maze.rows() {
        let mut spans: Vec<Span> = Vec::with_capacity(maze.cols());
        for col in 0..maze.cols() {
            let pos = Position::new(row, col);

            // Player on top, then entities, then the tile itself.
            if pos == player_position {
                spans.push(Span::styled("P", Style::default().fg(Color::Cyan).bold()));
                continue;
            }
            if let Some(entity) = entities.get(&pos) {
                let span = match entity {
                    Entity::Crate { strength } => Span::styled(
                        strength.to_string(),
                        Style::default().fg(Color::LightRed).bold(),
                    ),
                    Entity::Potion(PotionKind::Strength) => {
                        Span::styled("S", Style::default().fg(Color::Magenta))
                    }
                    Entity::Potion(PotionKind::Move) => {
                        Span::styled("M", Style::default().fg(Color::Blue))
                    }
                    Entity::Potion(PotionKind::Fancy) => {
                        Span::styled("F", Style::default().fg(Color::LightMagenta))
                    }
                };
                spans.push(span);
                continue;
            }
            let span = match &maze[pos] {
                Tile::Floor => Span::raw(" "),
                Tile::Wall => Span::styled("W", Style::default().fg(Color::DarkGray)),
                Tile::Goal { filled: false } => {
                    Span::styled("G", Style::default().fg(Color::Green))
                }
                Tile::Goal { filled: true } => {
                    Span::styled("X", Style::default().fg(Color::Green).bold())
                }
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let maze_paragraph = Paragraph::new(lines)
        .block(Block::default().title("Sokoban").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(maze_paragraph, area);
}
