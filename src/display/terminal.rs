use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use image::RgbImage;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;

use spinzoom::transform;

use super::panel::{rotated_title, HalfBlockImage};
use crate::color::ColorScheme;
use crate::config::{Config, DisplayConfig};

/// Redraw interval while the last frame is held on screen
const HOLD_REFRESH: Duration = Duration::from_millis(100);

/// Set while the alternate screen owns the terminal
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Everything needed to draw one frame of the sweep.
pub struct FrameView<'a> {
    pub original: &'a RgbImage,
    pub rotated: &'a RgbImage,
    pub angle: f64,
    /// 1-based index of this frame
    pub frame: usize,
    pub total: usize,
}

/// How a sweep ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    /// Frames drawn
    pub shown: usize,
    pub total: usize,
    /// The user quit before the last frame
    pub interrupted: bool,
}

pub fn screen_active() -> bool {
    SCREEN_ACTIVE.load(Ordering::Relaxed)
}

/// Drop log lines while the alternate screen is up, so they cannot scribble
/// over the panels. Lines before setup and after restore go through.
pub fn quiet_while_screen_active<W>(
    make_writer: W,
) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    make_writer.with_filter(|_| !screen_active())
}

pub async fn run(config: Config, original: RgbImage) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    SCREEN_ACTIVE.store(true, Ordering::Relaxed);
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            SCREEN_ACTIVE.store(false, Ordering::Relaxed);
            return Err(e.into());
        }
    };

    let started = Instant::now();
    let result = run_app(&mut terminal, &config, &original, quit_requested).await;
    let restored = restore_terminal(&mut terminal);

    let outcome = finish(result, restored)?;
    if outcome.interrupted {
        info!("Stopped at frame {}/{}", outcome.shown, outcome.total);
    } else {
        info!(
            "Showed {} frames in {:.2}s",
            outcome.shown,
            started.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore terminal. Every step runs even if an earlier one failed.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let steps = [
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ];
    SCREEN_ACTIVE.store(false, Ordering::Relaxed);
    first_error(steps)
}

fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

/// The app's own error wins over a failed restore.
fn finish(result: Result<SweepOutcome>, restored: io::Result<()>) -> Result<SweepOutcome> {
    let outcome = result?;
    restored.context("Failed to restore the terminal")?;
    Ok(outcome)
}

async fn run_app<B, Q>(
    terminal: &mut Terminal<B>,
    config: &Config,
    original: &RgbImage,
    mut quit_requested: Q,
) -> Result<SweepOutcome>
where
    B: Backend,
    Q: FnMut() -> Result<bool>,
{
    let mut angles = config.animation.sequence()?;
    let total = angles.total();
    let frame_delay = Duration::from_millis(config.animation.frame_delay_ms);
    let mut last = None;

    debug!("Sweeping {} frames", total);

    while let Some(angle) = angles.next() {
        let rotated = transform::rotate(original, angle)
            .with_context(|| format!("Failed to rotate frame at {:.1}°", angle))?;

        let view = FrameView {
            original,
            rotated: &rotated,
            angle,
            frame: angles.position(),
            total,
        };
        terminal.draw(|frame| draw_frame(frame, &view, &config.display))?;

        // Let the terminal catch up before the next frame
        tokio::time::sleep(frame_delay).await;

        if quit_requested()? {
            debug!("Quit at {:.1}°", angle);
            return Ok(SweepOutcome {
                shown: view.frame,
                total,
                interrupted: view.frame < total,
            });
        }
        last = Some((angle, rotated));
    }

    let outcome = SweepOutcome {
        shown: total,
        total,
        interrupted: false,
    };
    if !config.animation.hold_last_frame {
        return Ok(outcome);
    }
    let Some((angle, rotated)) = last else {
        return Ok(outcome);
    };

    debug!("Holding final frame at {:.1}°", angle);
    let view = FrameView {
        original,
        rotated: &rotated,
        angle,
        frame: total,
        total,
    };
    loop {
        // Redraw so that resizes are picked up
        terminal.draw(|frame| draw_frame(frame, &view, &config.display))?;
        tokio::time::sleep(HOLD_REFRESH).await;
        if quit_requested()? {
            break;
        }
    }

    Ok(outcome)
}

/// Drain pending input without blocking. Returns true on q, Esc or Ctrl-C.
fn quit_requested() -> Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if is_quit_key(&key) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Lay out the two panels side by side, with the status line below.
pub fn draw_frame(frame: &mut Frame, view: &FrameView, display: &DisplayConfig) {
    let area = frame.area();

    // Clear the whole screen every frame
    let block = Block::default().style(Style::default().bg(Color::Reset));
    frame.render_widget(block, area);

    let status_height = if display.show_status { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(status_height)])
        .split(area);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let (r, g, b) = display.color_scheme.angle_color(view.angle);
    let left = Block::bordered().title(" Original ");
    let right = Block::bordered().title(Line::styled(
        format!(" {} ", rotated_title(view.angle)),
        Style::default().fg(Color::Rgb(r, g, b)),
    ));

    let left_inner = left.inner(panels[0]);
    let right_inner = right.inner(panels[1]);
    frame.render_widget(left, panels[0]);
    frame.render_widget(right, panels[1]);
    frame.render_widget(HalfBlockImage::new(view.original), left_inner);
    frame.render_widget(HalfBlockImage::new(view.rotated), right_inner);

    if display.show_status {
        render_status(frame, rows[1], view, &display.color_scheme);
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &FrameView, color_scheme: &ColorScheme) {
    let status = format!(" frame {}/{} | [q]uit ", view.frame, view.total);
    let label_len = status.chars().count() as u16;
    let bar_space = area.width.saturating_sub(label_len);
    let progress = view.frame as f32 / view.total.max(1) as f32;
    let bar_width = (progress * bar_space as f32).round() as u16;

    for x in 0..bar_width {
        let pos = x as f32 / bar_space.max(1) as f32;
        let (r, g, b) = color_scheme.get_color(pos, 0.8);
        if let Some(cell) = frame.buffer_mut().cell_mut((area.x + x, area.y)) {
            cell.set_char('▀');
            cell.set_fg(Color::Rgb(r, g, b));
        }
    }

    for (i, ch) in status.chars().enumerate() {
        let x = bar_space + i as u16;
        if x < area.width {
            if let Some(cell) = frame.buffer_mut().cell_mut((area.x + x, area.y)) {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
