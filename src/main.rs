use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use t20_terminal::model::WinModel;
use t20_terminal::options::{home_adv_label, SORTED_CITIES, SORTED_TEAMS};
use t20_terminal::report;
use t20_terminal::state::{AppState, FormField, Screen};

struct App {
    state: AppState,
    model: Arc<WinModel>,
    should_quit: bool,
}

impl App {
    fn new(model: Arc<WinModel>) -> Self {
        Self {
            state: AppState::new(),
            model,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.help_overlay = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = true;
                return;
            }
            _ => {}
        }

        match self.state.screen {
            Screen::Form => self.on_form_key(key),
            Screen::Verdict => self.on_verdict_key(key),
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.focus_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.focus_next(),
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::Left | KeyCode::Char('h') => self.state.adjust(-1),
            KeyCode::Right | KeyCode::Char('l') => self.state.adjust(1),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Enter => self.state.submit(&self.model),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                self.state.input_digit(digit);
            }
            _ => {}
        }
    }

    fn on_verdict_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Enter => {
                self.state.screen = Screen::Form;
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let (model, source) = match WinModel::from_env() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(Arc::new(model));
    app.state.push_log(format!("[INFO] Model loaded: {source}"));
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Form => render_form(frame, chunks[1], &app.state),
        Screen::Verdict => render_verdict(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    match state.screen {
        Screen::Form => "T20 TERMINAL | CHASE FORM".to_string(),
        Screen::Verdict => "T20 TERMINAL | VERDICT".to_string(),
    }
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Form => {
            "j/k/↑/↓ Field | h/l/←/→ Change | 0-9 Type | Enter Predict | ? Help | q Quit"
                .to_string()
        }
        Screen::Verdict => "Enter/Esc/b Back to form | ? Help | q Quit".to_string(),
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let block = Block::default().title("Match Situation").borders(Borders::ALL);
    let inner = block.inner(sections[0]);
    frame.render_widget(block, sections[0]);

    let fields = FormField::ALL;
    for (i, field) in fields.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };

        let focused = i == state.focus;
        let row_style = if focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let marker = if focused { "> " } else { "  " };
        let line = format!(
            "{marker}{:<16} {}",
            field.label(),
            field_value(state, *field)
        );
        frame.render_widget(Paragraph::new(line).style(row_style), row_area);
    }

    render_form_status(frame, sections[1], state);
}

fn field_value(state: &AppState, field: FormField) -> String {
    let form = &state.form;
    match field {
        FormField::BattingTeam => SORTED_TEAMS[form.batting_idx].to_string(),
        FormField::BowlingTeam => SORTED_TEAMS[form.bowling_idx].to_string(),
        FormField::City => SORTED_CITIES[form.city_idx].to_string(),
        FormField::MatchStage => form.stage.label().to_string(),
        FormField::HomeAdvantage => home_adv_label(form.home_advantage).to_string(),
        FormField::Target => form.target.to_string(),
        FormField::Score => form.score.to_string(),
        FormField::Overs => report::format_overs(form.overs()),
        FormField::Wickets => form.wickets.to_string(),
    }
}

fn render_form_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = match &state.eval {
        Err(err) => (
            format!("Blocked: {err}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Ok(_) => match &state.warning {
            Some(warn) => (
                format!("Ready (note: {warn})"),
                Style::default().fg(Color::Yellow),
            ),
            None => (
                "Ready: Enter to predict".to_string(),
                Style::default().fg(Color::Green),
            ),
        },
    };
    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_verdict(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(verdict) = &state.verdict else {
        let empty = Paragraph::new("No prediction yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let summary = Paragraph::new(verdict.summary.clone())
        .block(Block::default().title("Match Summary").borders(Borders::ALL));
    frame.render_widget(summary, sections[0]);

    let commentary = Paragraph::new(verdict.commentary.clone())
        .block(Block::default().title("Commentary").borders(Borders::ALL));
    frame.render_widget(commentary, sections[1]);

    let win_pct = report::win_percent(verdict.win_prob);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!("{} Win %", verdict.batting_team))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(win_pct)
        .label(format!("{win_pct}%"));
    frame.render_widget(gauge, sections[2]);

    let chances = format!(
        "{} - {}% chance to win\n{} - {}% chance to win",
        verdict.batting_team,
        report::win_percent(verdict.win_prob),
        verdict.bowling_team,
        report::win_percent(verdict.loss_prob),
    );
    let chances = Paragraph::new(chances)
        .block(Block::default().title("Chances").borders(Borders::ALL));
    frame.render_widget(chances, sections[3]);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "T20 Terminal - Help",
        "",
        "Form:",
        "  j/k or ↑/↓   Move between fields",
        "  h/l or ←/→   Cycle selects, step numbers",
        "  0-9          Type into numeric fields",
        "  Backspace    Delete last digit",
        "  Enter        Predict win probability",
        "",
        "Verdict:",
        "  Enter/Esc/b  Back to the form",
        "",
        "Global:",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
