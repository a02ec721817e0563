//! UI rendering functions for the TUI.
//!
//! Implements the assistant layout: question input on top, conversation
//! transcript beside the model/context sidebar, and a shortcut bar at the
//! bottom, using ratatui widgets and layout management.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::models::ModelSelection;

use super::app::{App, Focus};

/// Main rendering function for the TUI.
///
/// Draws the header, question input, conversation transcript, sidebar, and
/// shortcut bar. Applies focus indicators and styling based on app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main layout: header, question input, content area, shortcut bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Question input
            Constraint::Min(0),    // Content area
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    // Split content area horizontally: transcript (68%) | sidebar (32%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(68), // Conversation transcript
            Constraint::Percentage(32), // Model picker, context toggle, status
        ])
        .split(main_chunks[2]);

    render_header(frame, main_chunks[0]);
    render_input(frame, app, main_chunks[1]);
    render_conversation(frame, app, content_chunks[0]);
    render_sidebar(frame, app, content_chunks[1]);
    render_shortcut_bar(frame, app, main_chunks[3]);
}

/// Renders the title header.
fn render_header(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "CA Wine Country Visit Assistant",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Winery and vineyard answers, grounded in your brochure dataset",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    frame.render_widget(Paragraph::new(text), area);
}

/// Renders the question input panel.
///
/// Shows the pending question with a cursor indicator when focused, or the
/// thinking caption while a submission is blocking.
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Input);

    let border_style = if app.thinking() {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = if app.thinking() { "Thinking" } else { "Ask" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    let paragraph = if app.thinking() {
        let caption = format!(
            "I'm thinking about your question: {}",
            app.session().pending_question()
        );
        Paragraph::new(Span::styled(
            caption,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
    } else {
        let mut content = app.session().pending_question().to_string();
        if is_focused {
            content.push('█'); // Cursor indicator
        }
        Paragraph::new(content)
    };

    frame.render_widget(paragraph.block(block), area);
}

/// Renders the conversation transcript.
///
/// Walks the history most recent pair first, assistant turn above the
/// question that produced it, with speaker labels styled by role.
fn render_conversation(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Conversation);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Conversation")
        .border_style(border_style);

    let history = app.session().history();
    let content = if history.is_empty() {
        Text::from(Span::styled(
            "Message your personal CA Wine Country Visit Assistant to get started.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut text = Text::default();
        for turn in history.render() {
            let label_style = if turn.speaker().is_assistant() {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            };

            text.lines
                .push(Line::from(Span::styled(turn.label(), label_style)));
            for line in turn.text().lines() {
                text.lines.push(Line::from(line.to_string()));
            }
            text.lines.push(Line::from(""));
        }
        text
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.history_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Renders the sidebar: model picker, context toggle, and status notice.
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    #[allow(clippy::cast_possible_truncation)]
    let picker_height = ModelSelection::ALL.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(picker_height), // Model picker
            Constraint::Length(3),             // Context toggle
            Constraint::Min(0),                // Status notice
        ])
        .split(area);

    render_model_picker(frame, app, chunks[0]);
    render_context_toggle(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
}

/// Renders the foundation model picker list.
fn render_model_picker(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Sidebar);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Model")
        .border_style(border_style);

    let items: Vec<ListItem> = ModelSelection::ALL
        .iter()
        .map(|model| ListItem::new(model.as_str()))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    list_state.select(
        ModelSelection::ALL
            .iter()
            .position(|m| *m == app.session().model()),
    );

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Renders the context toggle state.
fn render_context_toggle(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Sidebar);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Context")
        .border_style(border_style);

    let line = if app.session().use_context() {
        Line::from(vec![
            Span::styled("[x] ", Style::default().fg(Color::Green)),
            Span::raw("Use winery brochures as context"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[ ] ", Style::default().fg(Color::Red)),
            Span::raw("Use winery brochures as context"),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the status panel: the last warning, or the standing caption
/// about whether answers are grounded.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Status");

    let content = if let Some(notice) = app.notice() {
        Text::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let grounding = if app.session().use_context() {
            "I am using your winery brochures as context."
        } else {
            "I am NOT using your winery brochures as context."
        };
        Text::from(vec![
            Line::from(grounding),
            Line::from(""),
            Line::from(Span::styled(
                "All models are very creative and can make mistakes. Consider checking important information before heading out to wine country.",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ])
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Shows context-aware keyboard shortcuts based on current focus state.
/// Format: `Key: action | Key: action` with keys highlighted in cyan.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Ctrl+C", key_style),
        Span::raw(": quit"),
        Span::styled(" | ", sep_style),
        Span::styled("Tab", key_style),
        Span::raw(": next panel"),
        Span::styled(" | ", sep_style),
        Span::styled("Ctrl+R", key_style),
        Span::raw(": reset conversation"),
    ];

    // Add focus-specific shortcuts
    match app.focus() {
        Focus::Input => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": ask"));
        }
        Focus::Sidebar => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": model"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Space", key_style));
            spans.push(Span::raw(": toggle context"));
        }
        Focus::Conversation => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": scroll"));
        }
    }

    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line), area);
}
