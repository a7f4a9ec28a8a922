//! Interactive picker screen.

use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tracing::{debug, info};

use tokenfield::prelude::*;
use tokenfield::render::theme::{ACCENT, TEXT_DIM, TEXT_MUTED};

/// Run the picker until the user leaves, returning the final selection.
pub fn run(config: TokenFieldConfig) -> Result<Vec<String>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste,
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(config);
    let result = app.run_loop(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        DisableBracketedPaste,
    )?;
    terminal.show_cursor()?;

    result
}

/// The picker screen: a title, the token field, and key hints.
pub struct App {
    field: TokenFieldComponent,
    changes: usize,
}

impl App {
    /// Create the screen with the field focused.
    pub fn new(config: TokenFieldConfig) -> Self {
        let mut field = TokenFieldComponent::new(config);
        field.set_focus(true);
        Self { field, changes: 0 }
    }

    /// Current selection.
    pub fn selected(&self) -> &[String] {
        self.field.selected()
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<Vec<String>> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? && self.handle_event(event::read()?) {
                info!(selected = self.selected().len(), changes = self.changes, "picker closed");
                return Ok(self.selected().to_vec());
            }
        }
    }

    /// Feed one terminal event to the field. Returns true when the user asked to leave.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let result = match event {
            Event::Key(key) if is_exit(&key) => return true,
            Event::Key(key) => self.field.handle_key(key),
            Event::Mouse(mouse) => self.field.handle_mouse(mouse),
            Event::Paste(text) => {
                self.field.handle_paste(&text);
                ComponentResult::Handled
            }
            Event::FocusGained => {
                self.field.set_focus(true);
                ComponentResult::Handled
            }
            Event::FocusLost => {
                self.field.set_focus(false);
                ComponentResult::Handled
            }
            Event::Resize(..) => ComponentResult::NotHandled,
        };

        if let ComponentResult::Changed(selected) = result {
            self.changes += 1;
            debug!(?selected, "selection changed");
        }

        // Blur decisions wait until the event that caused them is fully handled
        self.field.run_deferred();
        false
    }

    /// Draw the screen.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let [title, _, body, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Line::from(vec![
            Span::styled(
                "tokenfield",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} selected", self.selected().len()),
                Style::default().fg(TEXT_DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), title);

        self.field.render(body, frame.buffer_mut());

        let mut spans = Vec::new();
        for (key, description) in
            std::iter::once(("Esc", "Done")).chain(self.field.key_hints())
        {
            spans.push(Span::styled(key, Style::default().fg(ACCENT)));
            spans.push(Span::styled(
                format!(" {description}  "),
                Style::default().fg(TEXT_MUTED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), hints);
    }
}

fn is_exit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
