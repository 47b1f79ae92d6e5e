use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::VectorSet;
use crate::renderer::{self, braille::BrailleCanvas};

/// What a key press asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Regenerate,
    Save,
    Quit,
}

fn action_for(key: KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Quit),
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => Some(Action::Quit),
        KeyEvent {
            code: KeyCode::Char('g') | KeyCode::Char(' ') | KeyCode::Enter,
            ..
        } => Some(Action::Regenerate),
        KeyEvent {
            code: KeyCode::Char('s'),
            ..
        } => Some(Action::Save),
        _ => None,
    }
}

pub fn run(config: Config, seed: Option<u64>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &config, seed);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    seed: Option<u64>,
) -> Result<()> {
    let mut generator = super::build_generator(config, seed)?;
    // Startup counts as the first trigger
    let mut current = generator.generate()?;
    let mut note: Option<String> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            // Clear with transparent/reset background for terminal transparency support
            let block = ratatui::widgets::Block::default().style(Style::default().bg(Color::Reset));
            frame.render_widget(block, area);

            let canvas_area = Rect::new(
                area.x,
                area.y + 1,
                area.width,
                area.height.saturating_sub(1),
            );
            render_vectors(frame.buffer_mut(), canvas_area, &current, config);
            render_status(frame, area, &current, note.as_deref());
        })?;

        // Blocks until the next event; resizes fall through to a redraw
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key) {
            Some(Action::Quit) => break,
            Some(Action::Regenerate) => {
                current = generator.generate()?;
                note = None;
            }
            Some(Action::Save) => {
                let path = &config.display.output;
                note = Some(match super::image::save(&current, config, path) {
                    Ok(()) => format!("saved {}", path.display()),
                    Err(e) => {
                        warn!("Failed to save {}: {:#}", path.display(), e);
                        format!("save failed: {}", e)
                    }
                });
            }
            None => {}
        }
    }

    info!("Leaving terminal mode");
    Ok(())
}

fn render_vectors(buf: &mut Buffer, area: Rect, set: &VectorSet, config: &Config) {
    let mut canvas = BrailleCanvas::new(
        area.width as usize,
        area.height as usize,
        f64::from(config.canvas.width),
        f64::from(config.canvas.height),
    );
    renderer::draw(&mut canvas, set, &config.style);
    canvas.render(buf, area);
}

fn render_status(frame: &mut Frame, area: Rect, set: &VectorSet, note: Option<&str>) {
    // Status line at top
    let mut status = format!(" [g]enerate | [s]ave | [q]uit | {}", set);
    if let Some(note) = note {
        status.push_str(" | ");
        status.push_str(note);
    }

    for (i, ch) in status.chars().enumerate() {
        if i >= area.width as usize {
            break;
        }
        let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
        if let Some(cell) = cell {
            cell.set_char(ch);
            cell.set_fg(Color::DarkGray);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, PolarVector};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn key_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(action_for(press(KeyCode::Char('g'), none)), Some(Action::Regenerate));
        assert_eq!(action_for(press(KeyCode::Char(' '), none)), Some(Action::Regenerate));
        assert_eq!(action_for(press(KeyCode::Enter, none)), Some(Action::Regenerate));
        assert_eq!(action_for(press(KeyCode::Char('s'), none)), Some(Action::Save));
        assert_eq!(action_for(press(KeyCode::Char('q'), none)), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Esc, none)), Some(Action::Quit));
        assert_eq!(
            action_for(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(action_for(press(KeyCode::Char('c'), none)), None);
        assert_eq!(action_for(press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn vectors_render_into_area_only() {
        let set = VectorSet::from_vectors(
            Point::new(400.0, 400.0),
            [
                PolarVector::new(290, 0),
                PolarVector::new(290, 120),
                PolarVector::new(290, 240),
            ],
        );
        let full = Rect::new(0, 0, 50, 26);
        let canvas_area = Rect::new(0, 1, 50, 25);
        let mut buf = Buffer::empty(full);
        render_vectors(&mut buf, canvas_area, &set, &Config::default());

        let top_row_untouched = (0..full.width).all(|x| buf[(x, 0)].symbol() == " ");
        assert!(top_row_untouched);
        let drawn = (1..full.height)
            .flat_map(|y| (0..full.width).map(move |x| (x, y)))
            .filter(|&pos| buf[pos].symbol() != " ")
            .count();
        assert!(drawn > 0);
    }
}
