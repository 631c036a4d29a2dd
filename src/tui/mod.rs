// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): card focus, keyboard drag
//! and resize, zoom, the detail inspector, and SQL submission to the parser
//! service. Parse requests run on worker threads and come back over a
//! channel polled by the event loop, so merges land in network-arrival
//! order and the interaction thread never blocks on the wire.

mod theme;

use std::{
    error::Error,
    io,
    path::Path,
    sync::mpsc::{channel, Receiver, Sender, TryRecvError},
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::ingest::{
    read_schema_file, tables_from_payload, validate_sql_text, HttpSchemaParser, IngestError,
    SchemaParser,
};
use crate::layout::{Point, Size};
use crate::model::{Column, DiagramSession, Table};
use crate::ops::{apply_ops, Op};
use crate::render::{render_diagram, RenderOptions};
use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Keyboard drag/resize step in model units (a tenth of a default card).
const DRAG_STEP_X: f64 = 25.0;
const DRAG_STEP_Y: f64 = 20.0;
const MIN_CARD_WIDTH: f64 = 100.0;
const MIN_CARD_HEIGHT: f64 = 80.0;

const INSPECTOR_WIDTH: u16 = 44;

/// Runs the interactive terminal UI against a session.
///
/// `initial_sql` is submitted to the parser before the first frame, so
/// `galatea schema.sql` shows cards as soon as the service answers.
pub fn run_with_session(
    session: DiagramSession,
    parser: HttpSchemaParser,
    initial_sql: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, parser);

    if let Some(sql) = initial_sql {
        app.submit_sql(sql);
    }

    while !app.should_quit {
        app.drain_parse_results();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// A built-in session so the TUI can run without the parser service.
pub fn demo_session() -> DiagramSession {
    let mut users = Table::new("users");
    let mut id = Column::new("id", "INT");
    id.set_primary_key(true);
    id.set_auto_increment(true);
    users.push_column(id);
    let mut email = Column::new("email", "VARCHAR");
    email.set_length(Some("255"));
    email.set_nullable(false);
    email.set_unique(true);
    users.push_column(email);
    users.push_column(Column::new("created_at", "TIMESTAMP"));

    let mut products = Table::new("products");
    let mut product_id = Column::new("id", "INT");
    product_id.set_primary_key(true);
    products.push_column(product_id);
    let mut price = Column::new("price", "DECIMAL");
    price.set_length(Some("10,2"));
    products.push_column(price);
    products.push_column(Column::new("in_stock", "BOOLEAN"));

    let mut orders = Table::new("orders");
    let mut order_id = Column::new("id", "INT");
    order_id.set_primary_key(true);
    orders.push_column(order_id);
    let mut user_id = Column::new("user_id", "INT");
    user_id.set_reference("users", Some("id"));
    user_id.set_nullable(false);
    orders.push_column(user_id);
    let mut product_id = Column::new("product_id", "INT");
    product_id.set_reference("products", Some("id"));
    orders.push_column(product_id);
    orders.push_column(Column::new("ordered_on", "DATE"));
    orders.add_relationship("users");
    orders.add_relationship("products");

    let mut session = DiagramSession::new();
    session.merge_tables(vec![users, products, orders]);
    session
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

type ParseOutcome = Result<serde_json::Value, IngestError>;

/// Per-card gesture state: Idle → Dragging/Resizing → Idle.
///
/// The live offset stays here until commit; the layout store sees exactly
/// one write per finished gesture. Independent of selection, which lives in
/// the session.
#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging { table: String, current: Point },
    Resizing { table: String, current: Size },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Sql,
    FilePath,
}

#[derive(Debug, Clone, PartialEq)]
enum InputMode {
    Normal,
    Prompt { kind: PromptKind, buffer: String },
}

struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

struct App {
    session: DiagramSession,
    parser: HttpSchemaParser,
    theme: TuiTheme,
    focus_index: usize,
    gesture: Gesture,
    mode: InputMode,
    scroll: (u16, u16),
    toast: Option<Toast>,
    pending_parses: usize,
    parse_tx: Sender<ParseOutcome>,
    parse_rx: Receiver<ParseOutcome>,
    should_quit: bool,
}

impl App {
    fn new(session: DiagramSession, parser: HttpSchemaParser) -> Self {
        let theme = match TuiTheme::from_env() {
            Ok(theme) => theme,
            Err(err) => {
                eprintln!("galatea: {err}");
                TuiTheme::default()
            }
        };
        let (parse_tx, parse_rx) = channel();
        Self {
            session,
            parser,
            theme,
            focus_index: 0,
            gesture: Gesture::Idle,
            mode: InputMode::Normal,
            scroll: (0, 0),
            toast: None,
            pending_parses: 0,
            parse_tx,
            parse_rx,
            should_quit: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: false,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn set_error_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error: true,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn focused_table(&self) -> Option<String> {
        self.session
            .schema()
            .tables()
            .get(self.focus_index)
            .map(|table| table.name().to_owned())
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.session.schema().len();
        if count == 0 {
            self.focus_index = 0;
            return;
        }
        self.focus_index = if forward {
            (self.focus_index + 1) % count
        } else {
            (self.focus_index + count - 1) % count
        };
    }

    /// Validates and ships SQL text to the parser on a worker thread.
    fn submit_sql(&mut self, sql: String) {
        if let Err(err) = validate_sql_text(&sql) {
            self.set_error_toast(err.to_string());
            return;
        }

        let parser = self.parser.clone();
        let tx = self.parse_tx.clone();
        self.pending_parses += 1;
        thread::spawn(move || {
            // The receiver outlives every worker unless the app is gone,
            // in which case the result is moot anyway.
            let _ = tx.send(parser.parse(&sql));
        });
        self.set_toast("Parsing…");
    }

    /// Applies finished parse results in arrival order.
    fn drain_parse_results(&mut self) {
        loop {
            match self.parse_rx.try_recv() {
                Ok(outcome) => {
                    self.pending_parses = self.pending_parses.saturating_sub(1);
                    self.apply_parse_outcome(outcome);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_parse_outcome(&mut self, outcome: ParseOutcome) {
        let payload = match outcome {
            Ok(payload) => payload,
            Err(err) => {
                self.set_error_toast(err.to_string());
                return;
            }
        };

        let parsed = match tables_from_payload(&payload) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.set_error_toast(err.to_string());
                return;
            }
        };

        let table_count = parsed.tables.len();
        let result = apply_ops(
            &mut self.session,
            &[Op::Merge {
                tables: parsed.tables,
            }],
        );

        if !result.conflicts.is_empty() {
            self.set_error_toast(format!(
                "Table name(s) already exist: {}",
                result.conflicts.join(", ")
            ));
        } else if !parsed.report.is_clean() {
            self.set_toast(format!(
                "Added {} table(s); skipped {} record(s), {} column(s)",
                table_count - result.conflicts.len(),
                parsed.report.skipped_records,
                parsed.report.skipped_columns
            ));
        } else {
            self.set_toast(format!("Added {table_count} table(s)"));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let InputMode::Prompt { .. } = self.mode {
            self.handle_prompt_key(key);
            return;
        }
        if !matches!(self.gesture, Gesture::Idle) {
            self.handle_gesture_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                apply_ops(&mut self.session, &[Op::ZoomIn]);
            }
            KeyCode::Char('-') => {
                apply_ops(&mut self.session, &[Op::ZoomOut]);
            }
            KeyCode::Char('g') => {
                if let Some(table) = self.focused_table() {
                    let current = self.session.layout().position_of(&table);
                    self.gesture = Gesture::Dragging { table, current };
                }
            }
            KeyCode::Char('r') => {
                if let Some(table) = self.focused_table() {
                    let current = self.session.layout().size_of(&table);
                    self.gesture = Gesture::Resizing { table, current };
                }
            }
            KeyCode::Enter => {
                if let Some(table) = self.focused_table() {
                    apply_ops(&mut self.session, &[Op::Select { table }]);
                }
            }
            KeyCode::Esc => {
                apply_ops(&mut self.session, &[Op::ClearSelection]);
            }
            KeyCode::Char(':') => {
                self.mode = InputMode::Prompt {
                    kind: PromptKind::Sql,
                    buffer: String::new(),
                };
            }
            KeyCode::Char('o') => {
                self.mode = InputMode::Prompt {
                    kind: PromptKind::FilePath,
                    buffer: String::new(),
                };
            }
            KeyCode::Up => self.scroll.0 = self.scroll.0.saturating_sub(1),
            KeyCode::Down => self.scroll.0 = self.scroll.0.saturating_add(1),
            KeyCode::Left => self.scroll.1 = self.scroll.1.saturating_sub(2),
            KeyCode::Right => self.scroll.1 = self.scroll.1.saturating_add(2),
            _ => {}
        }
    }

    fn handle_gesture_key(&mut self, key: KeyEvent) {
        match (&mut self.gesture, key.code) {
            (Gesture::Dragging { current, .. }, KeyCode::Up) => {
                // Cards stay inside the surface: the offset clamps at the
                // origin on both axes.
                current.y = (current.y - DRAG_STEP_Y).max(0.0);
            }
            (Gesture::Dragging { current, .. }, KeyCode::Down) => {
                current.y += DRAG_STEP_Y;
            }
            (Gesture::Dragging { current, .. }, KeyCode::Left) => {
                current.x = (current.x - DRAG_STEP_X).max(0.0);
            }
            (Gesture::Dragging { current, .. }, KeyCode::Right) => {
                current.x += DRAG_STEP_X;
            }
            (Gesture::Resizing { current, .. }, KeyCode::Up) => {
                current.height = (current.height - DRAG_STEP_Y).max(MIN_CARD_HEIGHT);
            }
            (Gesture::Resizing { current, .. }, KeyCode::Down) => {
                current.height += DRAG_STEP_Y;
            }
            (Gesture::Resizing { current, .. }, KeyCode::Left) => {
                current.width = (current.width - DRAG_STEP_X).max(MIN_CARD_WIDTH);
            }
            (Gesture::Resizing { current, .. }, KeyCode::Right) => {
                current.width += DRAG_STEP_X;
            }
            (_, KeyCode::Enter) => self.commit_gesture(),
            (_, KeyCode::Esc) => {
                self.gesture = Gesture::Idle;
                self.set_toast("Cancelled");
            }
            _ => {}
        }
    }

    /// The single layout-store write for a finished gesture.
    fn commit_gesture(&mut self) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Dragging { table, current } => {
                apply_ops(
                    &mut self.session,
                    &[Op::SetPosition {
                        table: table.clone(),
                        position: current,
                    }],
                );
                self.set_toast(format!("Moved {table}"));
            }
            Gesture::Resizing { table, current } => {
                apply_ops(
                    &mut self.session,
                    &[Op::SetSize {
                        table: table.clone(),
                        size: current,
                    }],
                );
                self.set_toast(format!("Resized {table}"));
            }
            Gesture::Idle => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let InputMode::Prompt { kind, buffer } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => {
                let kind = *kind;
                let text = std::mem::take(buffer);
                self.mode = InputMode::Normal;
                match kind {
                    PromptKind::Sql => self.submit_sql(text),
                    PromptKind::FilePath => match read_schema_file(Path::new(text.trim())) {
                        Ok(sql) => self.submit_sql(sql),
                        Err(err) => self.set_error_toast(err.to_string()),
                    },
                }
            }
            _ => {}
        }
    }

    fn render_options(&self) -> RenderOptions {
        let drag_preview = match &self.gesture {
            Gesture::Dragging { table, current, .. } => Some((table.clone(), *current)),
            _ => None,
        };
        RenderOptions {
            focused: self.focused_table(),
            drag_preview,
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let main_area = layout[0];
    let footer_area = layout[1];

    let selected = app.session.selected().map(ToOwned::to_owned);
    let diagram_area = if selected.is_some() && main_area.width > INSPECTOR_WIDTH + 20 {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(INSPECTOR_WIDTH)])
            .split(main_area);
        draw_inspector(frame, app, split[1], selected.as_deref());
        split[0]
    } else {
        main_area
    };

    draw_diagram(frame, app, diagram_area);
    draw_footer(frame, app, footer_area);
}

fn draw_diagram(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let rendered = render_diagram(&app.session, &app.render_options());
    let text: Vec<Line> = rendered
        .lines()
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect();

    let title = format!(
        " Diagram ({}%, {} tables) ",
        app.session.viewport().percent(),
        app.session.schema().len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.panel_border_style(matches!(app.mode, InputMode::Normal)));

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(app.theme.base_style())
        .scroll(app.scroll);
    frame.render_widget(paragraph, area);
}

fn draw_inspector(frame: &mut Frame<'_>, app: &App, area: Rect, selected: Option<&str>) {
    let Some(table) = selected.and_then(|name| app.session.schema().table(name)) else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        table.name().to_owned(),
        app.theme.selection_style(),
    )));
    lines.push(Line::from(format!("{} column(s)", table.columns().len())));
    lines.push(Line::from(""));

    for column in table.columns() {
        let mut text = format!("{} {}", column.glyph().as_char(), column.name());
        text.push_str(&format!("  {}", column.type_tag().to_ascii_lowercase()));
        if let Some(length) = column.length() {
            text.push_str(&format!("({length})"));
        }
        if column.is_primary_key() {
            text.push_str("  [PK]");
        }
        if !column.nullable() {
            text.push_str("  [NN]");
        }
        if column.is_unique() {
            text.push_str("  [UQ]");
        }
        if column.is_auto_increment() {
            text.push_str("  [AI]");
        }
        if let Some(target) = column.referenced_table() {
            match column.referenced_column() {
                Some(referenced) => text.push_str(&format!("  → {target}.{referenced}")),
                None => text.push_str(&format!("  → {target}")),
            }
        }
        if let Some(default) = column.default_value() {
            text.push_str(&format!("  = {default}"));
        }
        lines.push(Line::from(text));
    }

    if !table.relationships().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Relations:"));
        for target in table.relationships() {
            let marker = if app.session.schema().contains(target) {
                ""
            } else {
                " (missing)"
            };
            lines.push(Line::from(format!("  → {target}{marker}")));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Table details ")
        .border_style(app.theme.panel_border_style(true));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(app.theme.base_style()),
        area,
    );
}

fn draw_footer(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    if let InputMode::Prompt { kind, buffer } = &app.mode {
        let label = match kind {
            PromptKind::Sql => "sql",
            PromptKind::FilePath => "open",
        };
        let line = Line::from(vec![
            Span::styled(format!("{label}> "), app.theme.key_style()),
            Span::raw(buffer.clone()),
            Span::styled("█", app.theme.key_style()),
        ]);
        frame.render_widget(Paragraph::new(line).style(app.theme.base_style()), area);
        return;
    }

    if app
        .toast
        .as_ref()
        .is_some_and(|toast| toast.expires_at <= Instant::now())
    {
        app.toast = None;
    }
    let toast_suffix = app.toast.as_ref().map(|toast| {
        Span::styled(
            format!("  {}", toast.message),
            app.theme.toast_style(toast.is_error),
        )
    });

    let mut spans = Vec::new();
    for (keys, label) in [
        ("Tab", "focus"),
        ("g", "move"),
        ("r", "resize"),
        ("Enter", "details"),
        ("+/-", "zoom"),
        (":", "sql"),
        ("o", "open"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(keys, app.theme.key_style()));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    if app.pending_parses > 0 {
        spans.push(Span::styled("parsing…", app.theme.key_style()));
    }
    if let Some(toast) = toast_suffix {
        spans.push(toast);
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(app.theme.base_style()),
        area,
    );
}
