use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::mode::TuiState;
use crate::catalog::SoundType;
use crate::shared::{DisplayState, Screen};

const VOLUME_BAR_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState, blink_on: bool) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // home list or slot grid
            Constraint::Length(2), // status + key hints
        ])
        .split(area);

    draw_header(frame, sections[0], ds, blink_on);
    match ds.screen {
        Screen::Home => draw_home(frame, sections[1], ds, ts),
        Screen::Mixer => draw_mixer(frame, sections[1], ds, ts),
    }
    draw_footer(frame, sections[2], ds, ts);

    // overlays last so they sit on top of everything
    if ds.picker_open {
        draw_picker(frame, area, ts);
    }
    if let Some(entry) = &ts.name_entry {
        draw_name_prompt(frame, area, entry, blink_on);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ds: &DisplayState, blink_on: bool) {
    let mut spans = vec![Span::styled(
        "flowtty",
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    )];
    if ds.screen == Screen::Mixer {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            ds.flow_name.clone(),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw("  "));
        spans.push(if ds.playing {
            // blink so a silent mix still looks alive
            Span::styled(
                if blink_on { "▶ playing" } else { "  playing" },
                Style::default().fg(Color::Green),
            )
        } else {
            Span::styled("⏸ paused", Style::default().fg(Color::DarkGray))
        });
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_home(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let block = Block::default().borders(Borders::ALL).title(" flows ");
    if ds.saved.is_empty() {
        let placeholder = Paragraph::new("No flows saved yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let lines: Vec<Line> = ds
        .saved
        .iter()
        .enumerate()
        .map(|(i, flow)| {
            let focused = i == ts.home_cursor;
            let marker = if focused { "▸ " } else { "  " };
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let layers = if flow.layers == 1 {
                String::from("1 layer")
            } else {
                format!("{} layers", flow.layers)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}", flow.name), style),
                Span::styled(format!("  {layers}"), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    // keep the cursor on screen once the list outgrows the box
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (ts.home_cursor + 1).saturating_sub(visible.max(1)) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)).block(block), area);
}

fn draw_mixer(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (r, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(*row);
        for (c, col) in cols.iter().enumerate() {
            draw_slot(frame, *col, ds, ts, r * 3 + c);
        }
    }
}

fn draw_slot(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState, slot: usize) {
    let focused = ts.slot_cursor == slot;
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", slot + 1));

    let lines: Vec<Line> = match &ds.slots[slot] {
        None => vec![
            Line::raw(""),
            Line::styled("+", Style::default().fg(Color::DarkGray)),
            Line::styled(
                format!("press {}", slot + 1),
                Style::default().fg(Color::DarkGray),
            ),
        ],
        Some(s) => {
            let color = sound_color(s.sound);
            vec![
                Line::from(vec![
                    Span::raw(format!("{} ", s.sound.icon())),
                    Span::styled(
                        s.sound.label(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::styled(
                    format!("var {}/{}", s.variation, s.sound.variation_count()),
                    Style::default().fg(Color::Gray),
                ),
                volume_line(s.volume),
                Line::styled("x clears", Style::default().fg(Color::DarkGray)),
            ]
        }
    };
    let tile = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(tile, area);
}

fn volume_line(volume: f32) -> Line<'static> {
    let filled = (volume * VOLUME_BAR_WIDTH as f32).round() as usize;
    let empty = VOLUME_BAR_WIDTH.saturating_sub(filled);
    Line::from(vec![
        Span::styled("▓".repeat(filled), Style::default().fg(Color::Green)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {:>3.0}%", volume * 100.0),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn draw_picker(frame: &mut Frame, area: Rect, ts: &TuiState) {
    let width = 24u16.min(area.width.saturating_sub(2));
    let height = (SoundType::ALL.len() as u16 + 2).min(area.height.saturating_sub(2));
    let modal = centered(area, width, height);
    frame.render_widget(Clear, modal);

    let lines: Vec<Line> = SoundType::ALL
        .iter()
        .enumerate()
        .map(|(i, sound)| {
            let focused = i == ts.picker_cursor;
            let marker = if focused { "▸" } else { " " };
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker} {} ", i + 1), style),
                Span::raw(format!("{} ", sound.icon())),
                Span::styled(sound.label(), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" add a sound ")
        .border_style(Style::default().fg(Color::White));
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}

fn draw_name_prompt(frame: &mut Frame, area: Rect, entry: &str, blink_on: bool) {
    let width = 36u16.min(area.width.saturating_sub(2));
    let modal = centered(area, width, 3);
    frame.render_widget(Clear, modal);

    let cursor = if blink_on { "█" } else { " " };
    let text = Line::from(vec![
        Span::raw(entry.to_string()),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" name this flow ")
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Paragraph::new(text).block(block), modal);
}

fn draw_footer(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let hints = if ts.name_entry.is_some() {
        "[enter] save  [esc] cancel"
    } else if ds.picker_open {
        "[1-6] pick  [j/k] move  [enter] pick  [esc] close"
    } else {
        match ds.screen {
            Screen::Home => "[enter] open  [j/k] move  [n] new flow  [q] quit",
            Screen::Mixer => "[1-6] slot  [space] play  [[/]] volume  [x] clear  [s] save  [esc] back",
        }
    };
    let mut lines = vec![Line::styled(hints, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &ds.status {
        lines.insert(0, Line::styled(status.clone(), Style::default().fg(Color::Green)));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

// each catalog sound keeps one accent color everywhere in the ui
fn sound_color(sound: SoundType) -> Color {
    match sound {
        SoundType::River => Color::Blue,
        SoundType::Rain => Color::Cyan,
        SoundType::Insect => Color::Green,
        SoundType::Wind => Color::Gray,
        SoundType::Fire => Color::Red,
        SoundType::Birds => Color::Magenta,
    }
}
