// File: src/tui/view.rs
use crate::tui::state::{AppState, InputMode};
use unicode_width::UnicodeWidthStr;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ?:Toggle Help  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k or Arrows:Up/Down  Mouse Wheel:Scroll"),
        ]),
        Line::from(vec![
            Span::styled(
                " TASKS ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" a:Add  e:Edit  d:Delete  Space:Toggle Done"),
        ]),
        Line::from(vec![
            Span::styled(
                " ORGANIZATION ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" J/K:Move Down/Up  H:Hide Completed  C:Clear All"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), footer_height])
        .split(f.area());

    // --- 1. Task List ---
    let task_items: Vec<ListItem> = state
        .tasks
        .iter()
        .map(|t| {
            let checkbox = if t.completed { "[x] " } else { "[ ] " };
            let mut text_style = if t.completed {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            if t.completed && state.strikethrough_completed {
                text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
            }
            let spans = vec![
                Span::styled(checkbox, Style::default().fg(Color::Green)),
                Span::styled(t.text.clone(), text_style),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let active_count = state.tasks.iter().filter(|t| !t.completed).count();
    let mut title = format!(" Tasks ({}) ", active_count);
    if state.hide_completed {
        title.push_str("[Hiding Completed] ");
    }

    if state.tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, v_chunks[0]);
    } else {
        let task_list = List::new(task_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::Green)
                    .fg(Color::Black),
            );
        f.render_stateful_widget(task_list, v_chunks[0], &mut state.list_state);
    }

    // --- 2. Footer ---
    let footer_area = v_chunks[1];
    f.render_widget(Clear, footer_area);

    match state.mode {
        InputMode::Creating | InputMode::Editing => {
            let (title_str, prefix, color) = match state.mode {
                InputMode::Editing => (" Edit Task ", "> ", Color::Magenta),
                _ => (" Add Task ", "> ", Color::Yellow),
            };

            let input_text = Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(&state.input_buffer),
            ]);

            let input = Paragraph::new(input_text)
                .block(Block::default().borders(Borders::ALL).title(title_str))
                .wrap(Wrap { trim: false });

            f.render_widget(input, footer_area);

            // Cursor rendering; width-aware so wide glyphs line up
            let before_cursor: String = state
                .input_buffer
                .chars()
                .take(state.cursor_position)
                .collect();
            let cursor_x = footer_area.x
                + 1
                + prefix.chars().count() as u16
                + before_cursor.as_str().width() as u16;
            f.set_cursor_position((
                cursor_x.min(footer_area.x + footer_area.width - 2),
                footer_area.y + 1,
            ));
        }
        _ => {
            if state.show_full_help {
                let p = Paragraph::new(full_help_text)
                    .block(Block::default().borders(Borders::ALL).title(" Help "))
                    .wrap(Wrap { trim: false });
                f.render_widget(p, footer_area);
            } else {
                let status = Paragraph::new(state.message.clone())
                    .style(Style::default().fg(Color::Cyan))
                    .block(
                        Block::default()
                            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                            .title(" Status "),
                    );
                let help = Paragraph::new(
                    "?:Help q:Quit a:Add e:Edit d:Del Spc:Done J/K:Move C:Clear",
                )
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );

                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                    .split(footer_area);
                f.render_widget(status, chunks[0]);
                f.render_widget(help, chunks[1]);
            }
        }
    }

    // --- 3. Clear Confirmation Popup ---
    if state.mode == InputMode::ConfirmingClear {
        let area = centered_rect(50, 20, f.area());

        let block = Block::default()
            .title(" Clear All Tasks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightRed));

        let lines = vec![
            Line::from(""),
            Line::from("This removes every task in the list."),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " [y] ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Clear    "),
                Span::styled(
                    " [n] ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Keep"),
            ]),
        ];

        let p = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
