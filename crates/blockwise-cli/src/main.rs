use anyhow::Result;
use blockwise_config::Config;
use blockwise_engine::{Document, SourceFile, io, outline};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use relative_path::RelativePathBuf;
use std::{env, io::stdout, path::PathBuf, process};

struct App {
    source_path: PathBuf,
    files: Vec<SourceFile>,
    file_list_state: ListState,
    doc: Option<Document>,
    cursor: usize,
    status: String,
}

impl App {
    fn new(source_path: PathBuf, extension: &str) -> Result<Self> {
        let found = io::scan_source_files(&source_path, extension)?;
        let files: Vec<SourceFile> = found
            .iter()
            .filter_map(|p| p.strip_prefix(&source_path).ok())
            .filter_map(|p| RelativePathBuf::from_path(p).ok())
            .map(SourceFile::new)
            .collect();

        let mut app = Self {
            source_path,
            files,
            file_list_state: ListState::default(),
            doc: None,
            cursor: 0,
            status: String::from("n: next unit | N: 5 units | m: next method | r: rewind"),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selected();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.files.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected();
    }

    fn load_selected(&mut self) {
        self.cursor = 0;
        self.doc = None;

        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|i| self.files.get(i))
        else {
            return;
        };

        match io::read_file(file.relative_path(), &self.source_path) {
            Ok(content) => match Document::from_bytes(content.as_bytes()) {
                Ok(doc) => {
                    self.status = format!("{} loaded", file.display_path());
                    self.doc = Some(doc);
                }
                Err(e) => self.status = format!("Error parsing document: {e}"),
            },
            Err(e) => self.status = format!("Error reading file: {e}"),
        }
    }

    /// Advance the scan cursor past `repeat` structural units.
    fn step(&mut self, repeat: usize) {
        let Some(doc) = &self.doc else {
            self.status = String::from("No file loaded");
            return;
        };

        match doc.forward_unit(self.cursor, repeat) {
            Ok(next) if next == self.cursor => {
                self.status = String::from("No further structural unit here");
            }
            Ok(next) => {
                self.cursor = next;
                self.status = format!("Cursor at offset {next}");
            }
            // The scan is value-returning, so a failure costs nothing: the
            // committed cursor stays where it was.
            Err(e) => self.status = format!("Scan stopped: {e}"),
        }
    }

    /// Jump the cursor to the start of the next method header.
    fn next_method(&mut self) {
        let Some(doc) = &self.doc else {
            self.status = String::from("No file loaded");
            return;
        };

        let text = doc.text();
        match outline(&text)
            .into_iter()
            .find(|entry| entry.offset > self.cursor)
        {
            Some(entry) => {
                self.cursor = entry.offset;
                self.status = format!("At method {}", entry.name);
            }
            None => self.status = String::from("No method below the cursor"),
        }
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.status = String::from("Cursor rewound to start");
    }

    /// (line, column) of the cursor in the loaded document.
    fn cursor_position(&self) -> (usize, usize) {
        let Some(doc) = &self.doc else {
            return (0, 0);
        };
        let text = doc.text();
        let before = &text[..self.cursor.min(text.len())];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map_or(before.len(), |i| before.len() - i - 1);
        (line, col)
    }
}

fn main() -> Result<()> {
    // Determine source path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let source_path;
    let mut extension = String::from("magik");
    let from_config;

    if args.len() == 2 {
        source_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                source_path = config.source_path;
                extension = config.file_extension;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No source path provided and no config file found");
                eprintln!("Usage: {} <source-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <source-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [source-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_source_dir(&source_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Source path '{}'{} is invalid: {e}",
            source_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source_path, &extension)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Char('n') | KeyCode::Char(' ') => app.step(1),
                KeyCode::Char('N') => app.step(5),
                KeyCode::Char('m') => app.next_method(),
                KeyCode::Char('r') | KeyCode::Char('0') => app.rewind(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .margin(0)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(chunks[0]);

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| {
            ListItem::new(vec![Line::from(vec![Span::raw(
                file.display_path().to_string(),
            )])])
        })
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Sources"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, panes[0], &mut app.file_list_state);

    // Content panel with the scan cursor marked
    let (cursor_line, cursor_col) = app.cursor_position();
    let content_lines: Vec<Line> = match &app.doc {
        Some(doc) => {
            let text = doc.text();
            text.lines()
                .enumerate()
                .map(|(i, line)| {
                    if i == cursor_line {
                        let mut col = cursor_col.min(line.len());
                        while col > 0 && !line.is_char_boundary(col) {
                            col -= 1;
                        }
                        let (before, rest) = line.split_at(col);
                        let (marked, after) = if rest.is_empty() {
                            ("␣", "")
                        } else {
                            rest.split_at(rest.chars().next().map_or(0, |c| c.len_utf8()))
                        };
                        Line::from(vec![
                            Span::raw(before.to_string()),
                            Span::styled(
                                marked.to_string(),
                                Style::default().bg(Color::Cyan).fg(Color::Black),
                            ),
                            Span::raw(after.to_string()),
                        ])
                    } else {
                        Line::from(vec![Span::raw(line.to_string())])
                    }
                })
                .collect()
        }
        None => vec![Line::from("Select a file to navigate")],
    };

    let scroll = cursor_line.saturating_sub(panes[1].height.saturating_sub(4) as usize) as u16;
    let content = Paragraph::new(content_lines)
        .block(Block::default().borders(Borders::ALL).title("Content"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(content, panes[1]);

    // Status line
    let status = Paragraph::new(vec![Line::from(vec![
        Span::raw(format!(
            "offset {} (line {}, col {}) | ",
            app.cursor,
            cursor_line + 1,
            cursor_col + 1
        )),
        Span::raw(app.status.clone()),
    ])])
    .block(Block::default().borders(Borders::ALL).title("Navigator"));

    f.render_widget(status, chunks[1]);
}
