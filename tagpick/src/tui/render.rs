use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use tagpick_lib::logging::spinner_frame;
use tagpick_lib::session::{Banner, Focus, SessionView, TextField};

const HELP: &str =
    "ctrl+r refresh · ctrl+d download · ctrl+x cancel · tab focus · enter select · esc clear · q quit";

pub fn draw(frame: &mut Frame, view: &SessionView) {
    let [header, list, output, token, banner, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, view);
    draw_tags(frame, list, view);

    let default_output = view.default_output.display().to_string();
    draw_field(
        frame,
        output,
        "Output path",
        view.output,
        &default_output,
        view.focus == Focus::OutputField,
    );
    draw_field(
        frame,
        token,
        "GitHub token",
        view.token,
        "optional, defaults to GITHUB_TOKEN",
        view.focus == Focus::TokenField,
    );
    draw_banner(frame, banner, view);
    frame.render_widget(Paragraph::new(HELP).dark_gray(), help);
}

fn draw_header(frame: &mut Frame, area: Rect, view: &SessionView) {
    let mut spans = vec![
        Span::styled("tagpick ", Style::new().bold().cyan()),
        Span::raw(view.repository.to_string()),
        Span::styled("  asset: ", Style::new().dark_gray()),
        Span::raw(view.asset),
    ];
    if let Some(selected) = view.selected {
        spans.push(Span::styled("  selected: ", Style::new().dark_gray()));
        spans.push(Span::styled(selected, Style::new().green()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    }
}

fn draw_tags(frame: &mut Frame, area: Rect, view: &SessionView) {
    let title = if view.refreshing {
        format!(" Versions {} ", spinner_frame(view.spinner_frame))
    } else {
        format!(" Versions ({}) ", view.tags.len())
    };
    let block = Block::bordered()
        .title(title)
        .border_style(border_style(view.focus == Focus::TagList));

    let items: Vec<ListItem> = view
        .tags
        .iter()
        .map(|item| {
            let marker = if view.selected == Some(item.raw.as_str()) {
                "● "
            } else {
                "  "
            };
            let mut spans = vec![Span::raw(marker), Span::raw(item.display.clone())];
            if item.is_latest {
                spans.push(Span::styled("  (latest)", Style::new().green()));
            }
            if item.display != item.raw {
                spans.push(Span::styled(format!("  {}", item.raw), Style::new().dark_gray()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let selected = (!view.tags.is_empty()).then_some(view.cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    field: &TextField,
    placeholder: &str,
    focused: bool,
) {
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(border_style(focused));
    let content = if field.text().is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::new().dark_gray()))
    } else {
        Line::from(field.display().into_owned())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused {
        let max_x = area.right().saturating_sub(2);
        let x = (area.x + 1).saturating_add(field.cursor() as u16).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn draw_banner(frame: &mut Frame, area: Rect, view: &SessionView) {
    let busy = view.refreshing || view.downloading;
    let mut spans = Vec::new();
    if busy {
        spans.push(Span::styled(
            format!("{} ", spinner_frame(view.spinner_frame)),
            Style::new().green(),
        ));
    }
    spans.push(match view.banner {
        Banner::Ready => Span::styled("Ready", Style::new().dark_gray()),
        Banner::Status(message) => Span::raw(message.as_str()),
        Banner::Warning(message) => Span::styled(message.as_str(), Style::new().yellow()),
        Banner::Error(message) => Span::styled(format!("Error: {message}"), Style::new().red()),
    });
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
