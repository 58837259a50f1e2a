pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::characters::CharacterProvider;
use crate::clock::Clock;
use crate::session::{CharStatus, SessionStats, SessionStatus};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Label/value rows of the statistics panel
pub fn stat_rows(stats: &SessionStats) -> [(&'static str, String); 4] {
    [
        ("Accuracy:", format!("{:.2}%", stats.accuracy)),
        ("NPM:", format!("{:.2}", stats.rate)),
        ("Characters:", format!("{} / {}", stats.correct, stats.total)),
        ("Time:", format!("{:.2}s", stats.elapsed.as_secs_f64())),
    ]
}

fn legend(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Idle => "(enter) start / (esc)ape",
        SessionStatus::Running => "(enter) stop / (r)eset / (esc)ape",
        SessionStatus::Finished => "(enter) new run / (r)eset / (esc)ape",
    }
}

/// Three rows per character so each one renders as a filled box
fn window_lines(window: &[(char, CharStatus)]) -> Vec<Line<'static>> {
    let mut top = Vec::with_capacity(window.len() * 2);
    let mut middle = Vec::with_capacity(window.len() * 2);
    let mut bottom = Vec::with_capacity(window.len() * 2);

    for (i, &(c, status)) in window.iter().enumerate() {
        if i > 0 {
            top.push(Span::raw(" "));
            middle.push(Span::raw(" "));
            bottom.push(Span::raw(" "));
        }
        let style = style::char_style(status);
        top.push(Span::styled("   ", style));
        middle.push(Span::styled(format!(" {c} "), style));
        bottom.push(Span::styled("   ", style));
    }

    vec![Line::from(top), Line::from(middle), Line::from(bottom)]
}

impl<P: CharacterProvider, C: Clock> Widget for &App<P, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let status = session.status();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Min(3),    // character window
                Constraint::Length(6), // statistics
                Constraint::Length(1), // status line
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("NumPad", style::title_style()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let window_area = chunks[1];
        match status {
            SessionStatus::Idle => {
                let message = Paragraph::new(Span::styled(
                    "Press Enter to start",
                    style::value_style(),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });

                let y = window_area.y + window_area.height / 2;
                let line = Rect {
                    y,
                    height: window_area.height.min(1),
                    ..window_area
                };
                message.render(line, buf);
            }
            SessionStatus::Running | SessionStatus::Finished => {
                let lines = window_lines(&session.window());
                let height = (lines.len() as u16).min(window_area.height);
                let y = window_area.y + (window_area.height - height) / 2;

                Paragraph::new(lines).alignment(Alignment::Center).render(
                    Rect {
                        y,
                        height,
                        ..window_area
                    },
                    buf,
                );
            }
        }

        let stats = session.snapshot();
        let rows: Vec<Line> = stat_rows(&stats)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<12}"), style::label_style()),
                    Span::styled(value, style::value_style()),
                ])
            })
            .collect();

        Paragraph::new(rows)
            .block(Block::default().borders(Borders::ALL).title("Statistics"))
            .render(chunks[2], buf);

        let status_line = match (status, session.started_wall()) {
            (SessionStatus::Running, _) => "Type the highlighted character".to_string(),
            (SessionStatus::Finished, Some(started)) => {
                format!("Session complete (started {})", started.format("%H:%M:%S"))
            }
            (SessionStatus::Finished, None) => "Session complete".to_string(),
            (SessionStatus::Idle, _) => format!("Character set: {}", session.charset()),
        };
        Paragraph::new(Span::styled(status_line, style::hint_style()))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(legend(status), style::hint_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
