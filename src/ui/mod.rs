mod views;

use crate::app_state::{App, FocusArea, InputMode};
use crate::routes::Route;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 顶部标题栏
            Constraint::Min(0),    // 中间内容区域
            Constraint::Min(8),    // 底部命令/日志区域
        ])
        .split(f.size());

    render_top_bar(f, chunks[0], app);

    let middle_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(chunks[1]);

    render_left_menu(f, middle_chunks[0], app);
    render_main_view(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2], app);
}

fn render_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));

    let user = match &app.auth {
        Some(auth) => format!("{}님", auth.display_name()),
        None => "로그인 안 됨".to_string(),
    };
    let title_text = Line::from(vec![
        Span::styled(
            " LegiSight ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {} ({})  ", app.route.label(), app.route.path())),
        Span::styled(user, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(title)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_left_menu(f: &mut Frame, area: Rect, app: &App) {
    let menu_items: Vec<ListItem> = Route::MENU
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let is_selected = i == app.menu_selected_index;
            let is_active = *route == app.route;

            let style = if is_selected {
                if app.focus_area == FocusArea::Menu {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                }
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_active { "● " } else { "○ " };
            let lock = if route.is_protected() && !app.is_logged_in() {
                " 🔒"
            } else {
                ""
            };
            ListItem::new(format!("{}{}{}", prefix, route.label(), lock)).style(style)
        })
        .collect();

    let title = if app.focus_area == FocusArea::Menu {
        "메뉴 (Enter 이동)"
    } else {
        "메뉴 (← 전환)"
    };

    let menu =
        List::new(menu_items).block(Block::default().borders(Borders::ALL).title(title).style(
            if app.focus_area == FocusArea::Menu {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            },
        ));

    f.render_widget(menu, area);
}

fn render_main_view(f: &mut Frame, area: Rect, app: &mut App) {
    match app.route {
        Route::Home => views::render_home(f, area, app),
        Route::Login | Route::Register => views::render_auth(f, area, app),
        Route::SentimentPage | Route::SentimentMember | Route::PartyMembers => {
            views::render_legislator_list(f, area, app)
        }
        Route::PersonView => views::render_person(f, area, app),
        Route::BillSpeeches => views::render_speeches(f, area, app),
        Route::SentimentBill | Route::BillView => views::render_bill(f, area, app),
        Route::BillPrediction => views::render_prediction(f, area, app),
        Route::SentimentParty => views::render_party(f, area, app),
        Route::SentimentCommittee => views::render_committee(f, area, app),
        Route::Dashboard => views::render_dashboard(f, area, app),
    }
}

fn render_bottom_bar(f: &mut Frame, area: Rect, app: &App) {
    let bottom_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let command_prompt = if app.input_mode == InputMode::Command {
        let mut spans = vec![Span::styled(
            "명령: ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        let cur = app.command_cursor.min(app.command_input.len());
        let (left, right) = app.command_input.split_at(cur);
        spans.push(Span::raw(left));
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(right));

        if let Some(hint) = app.get_completion_hint() {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        vec![
            Line::from(spans),
            Line::from("Enter 실행  Esc 취소  Tab 자동완성  ←→ 커서  ↑↓ 기록"),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("명령: ", Style::default().fg(Color::Yellow)),
                Span::raw("(/ 를 눌러 명령 입력, help 로 목록 보기)"),
            ]),
            Line::from("←→ 포커스  ↑↓ 이동  Enter 선택  Tab 필터 항목  f 값 변경  r 초기화  x 뒤로  q 종료"),
        ]
    };
    let command_paragraph = Paragraph::new(command_prompt).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if app.input_mode == InputMode::Command {
                "명령 입력 모드"
            } else {
                "명령 입력"
            })
            .style(if app.input_mode == InputMode::Command {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(command_paragraph, bottom_chunks[0]);

    let log_items: Vec<ListItem> = app
        .log_messages
        .iter()
        .rev()
        .take(20)
        .map(|msg| {
            let style = if msg.starts_with('✓') {
                Style::default().fg(Color::Green)
            } else if msg.starts_with('✗') || msg.starts_with("데이터를") {
                Style::default().fg(Color::Red)
            } else if msg.starts_with('⚠') {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(msg.as_str()).style(style)
        })
        .collect();

    let log = List::new(log_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("로그 (총 {}건)", app.log_messages.len()))
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(log, bottom_chunks[1]);
}
