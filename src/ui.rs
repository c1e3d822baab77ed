pub mod digits;

use chrono::{Duration as ChronoDuration, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use crate::{
    app::App,
    celebration::Celebration,
    timer::{Clock, TimerSnapshot, TimerState},
    util::format_mm_ss,
};

const HORIZONTAL_MARGIN: u16 = 5;
const HINTS: &str = "(r)estart / (q)uit";
// big clock, gap, status, gauge, ends-at, gap, hints
const BIG_LAYOUT_HEIGHT: u16 = digits::GLYPH_HEIGHT as u16 + 6;
const SMALL_LAYOUT_HEIGHT: u16 = 7;
const WARN_SECONDS: u32 = 10;

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.snapshot();
        let clock_text = snapshot.formatted();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let clock_style = Style::default().patch(bold_style).fg(clock_color(&snapshot));
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let usable_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize;
        let big = digits::big_width(&clock_text) <= usable_width
            && area.height >= BIG_LAYOUT_HEIGHT;

        let (clock_height, content_height) = if big {
            (digits::GLYPH_HEIGHT as u16, BIG_LAYOUT_HEIGHT)
        } else {
            (1, SMALL_LAYOUT_HEIGHT)
        };
        let pad = area.height.saturating_sub(content_height) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(pad),
                    Constraint::Length(clock_height),
                    Constraint::Length(1), // gap
                    Constraint::Length(1), // status
                    Constraint::Length(1), // gauge
                    Constraint::Length(1), // ends at
                    Constraint::Length(1), // gap
                    Constraint::Length(1), // hints
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let clock = if big {
            let lines: Vec<Line> = digits::big_text(&clock_text)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, clock_style)))
                .collect();
            Paragraph::new(lines)
        } else {
            Paragraph::new(Span::styled(clock_text, clock_style))
        };
        clock.alignment(Alignment::Center).render(chunks[1], buf);

        Paragraph::new(Span::styled(status_text(&snapshot), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(clock_color(&snapshot)))
            .ratio(snapshot.progress().clamp(0.0, 1.0))
            .label(format!("{:.0}%", snapshot.progress() * 100.0))
            .render(chunks[4], buf);

        if let Some(ends) = ends_at_text(&snapshot) {
            Paragraph::new(Span::styled(ends, dim_style))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled(HINTS, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        if self.celebration.is_active() {
            render_celebration_particles(&self.celebration, area, buf);
        }
    }
}

fn clock_color(snapshot: &TimerSnapshot) -> Color {
    match snapshot.state {
        TimerState::Finished => Color::Yellow,
        TimerState::Idle => Color::Gray,
        TimerState::Running if snapshot.remaining_seconds <= WARN_SECONDS => Color::Red,
        TimerState::Running => Color::Cyan,
    }
}

fn status_text(snapshot: &TimerSnapshot) -> String {
    match snapshot.state {
        TimerState::Idle => "ready".to_string(),
        TimerState::Running => format!("counting down from {}", format_mm_ss(snapshot.total_seconds)),
        TimerState::Finished => "time's up!".to_string(),
    }
}

/// Wall-clock time the countdown will end, for display only.
fn ends_at_text(snapshot: &TimerSnapshot) -> Option<String> {
    if snapshot.state != TimerState::Running {
        return None;
    }
    let ends = Local::now() + ChronoDuration::seconds(i64::from(snapshot.remaining_seconds));
    Some(format!("ends at {}", ends.format("%H:%M")))
}

/// Draw the expiry effect on top of the clock
fn render_celebration_particles(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let style = if particle.is_letter() {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            let life = 1.0 - (particle.age / particle.max_age);
            if life > 0.6 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if life > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            }
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}
