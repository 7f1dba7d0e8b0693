use crate::app_state::{App, FocusArea, LIST_FILTER_FIELDS};
use crate::fetch::FetchSlot;
use crate::model::display::{
    elected_count_label, format_date, opt_score, or_dash, score_to_percent,
};
use crate::model::{GroupSummary, SentimentLabel, StanceTally};
use crate::routes::Route;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn block(title: impl Into<String>, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.into())
        .style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        })
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn kv(key: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", key), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

fn placeholder(app: &App, slot: FetchSlot, empty: &str) -> Vec<Line<'static>> {
    if app.is_loading(slot) {
        vec![Line::from("불러오는 중...")]
    } else {
        vec![Line::from(empty.to_string())]
    }
}

fn score_color(score: Option<f64>) -> Color {
    match score {
        Some(s) if s > 0.0 => Color::Green,
        Some(s) if s < 0.0 => Color::Red,
        _ => Color::Gray,
    }
}

fn paragraph(f: &mut Frame, area: Rect, app: &App, title: String, lines: Vec<Line<'static>>) {
    let p = Paragraph::new(lines)
        .block(block(title, app.focus_area == FocusArea::MainView))
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));
    f.render_widget(p, area);
}

pub fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = vec![heading("--- 전체 발언 성향 ---")];
    match &app.stats {
        Some(stats) => {
            let s = &stats.sentiment;
            lines.push(kv("협력", format!("{}%", opt_score(s.cooperative, 0))));
            lines.push(kv("비협력", format!("{}%", opt_score(s.non_cooperative, 0))));
            lines.push(kv("중립", format!("{}%", opt_score(s.neutral, 0))));
            lines.push(Line::from(""));
            lines.push(heading("--- 주목할 법안 예측 ---"));
            let p = &stats.prediction;
            lines.push(kv("법안", or_dash(p.bill_name.as_deref()).to_string()));
            lines.push(kv("가결 확률", format!("{}%", opt_score(p.probability, 0))));
            lines.push(kv("상태", or_dash(p.status.as_deref()).to_string()));
        }
        None => lines.extend(placeholder(app, FetchSlot::Stats, "통계가 없습니다 (stats)")),
    }

    lines.push(Line::from(""));
    lines.push(heading("--- 통합 검색 ---"));
    match &app.search {
        Some(res) => {
            lines.push(kv("결과 수", res.total_count.to_string()));
            if let Some(msg) = &res.message {
                lines.push(Line::from(msg.clone()));
            }
            lines.extend(res.lines().into_iter().map(Line::from));
        }
        None => lines.extend(placeholder(app, FetchSlot::Search, "search <검색어> 로 검색")),
    }

    paragraph(f, area, app, "홈".to_string(), lines);
}

pub fn render_auth(f: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = Vec::new();
    match &app.auth {
        Some(auth) => {
            lines.push(heading("--- 로그인 상태 ---"));
            lines.push(kv("사용자", auth.display_name()));
            lines.push(kv("이메일", or_dash(auth.user.email.as_deref()).to_string()));
            lines.push(kv("토큰 유형", auth.token_type().to_string()));
            lines.push(Line::from("logout 으로 로그아웃"));
        }
        None if app.route == Route::Register => {
            lines.push(heading("--- 회원가입 ---"));
            lines.push(Line::from("register <email> <username> <password>"));
        }
        None => {
            lines.push(heading("--- 로그인 ---"));
            lines.push(Line::from("login <email> <password>"));
            lines.push(Line::from("계정이 없으면 go /register"));
        }
    }
    if app.is_loading(FetchSlot::Auth) {
        lines.push(Line::from("처리 중..."));
    }
    paragraph(f, area, app, app.route.label().to_string(), lines);
}

pub fn render_legislator_list(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(area);

    // 筛选面板
    let focused_field = app.focused_filter_field();
    let filter_items: Vec<ListItem> = LIST_FILTER_FIELDS
        .iter()
        .map(|field| {
            let value = app.filter.get(*field).unwrap_or("전체");
            let style = if *field == focused_field {
                if app.focus_area == FocusArea::Filters {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Magenta)
                }
            } else if app.filter.get(*field).is_some() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{:<6} {}", field.label(), value)).style(style)
        })
        .collect();
    let filters = List::new(filter_items).block(block(
        "필터 (Tab/f/r)",
        app.focus_area == FocusArea::Filters,
    ));
    f.render_widget(filters, chunks[0]);

    let right = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    let summary = app.summary;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("검색 결과"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(summary.rounded_percent())
        .label(format!(
            "{} / {} 명 ({})",
            summary.current,
            summary.total,
            summary.percentage_label()
        ));
    f.render_widget(gauge, right[0]);

    if app.visible.is_empty() {
        let lines = placeholder(app, FetchSlot::Legislators, "조건에 맞는 의원이 없습니다");
        paragraph(f, right[1], app, app.route.label().to_string(), lines);
        return;
    }

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|m| {
            let committee = m.main_committee().unwrap_or_else(|| "-".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", or_dash(m.name.as_deref())),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<10}", or_dash(m.party.as_deref())),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!("{:<14}", or_dash(m.region.as_deref()))),
                Span::raw(format!("{:<5}", elected_count_label(m.elected_count.as_deref()))),
                Span::raw(format!("{:<16}", committee)),
                Span::styled(
                    opt_score(m.score, 3),
                    Style::default().fg(score_color(m.score)),
                ),
            ]))
        })
        .collect();

    let title = if app.filter.is_default() {
        app.route.label().to_string()
    } else {
        let active: Vec<&str> = app
            .filter
            .active_fields()
            .into_iter()
            .map(|f| f.label())
            .collect();
        format!("{} [필터: {}]", app.route.label(), active.join(", "))
    };
    let list = List::new(items)
        .block(block(title, app.focus_area == FocusArea::MainView))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    app.list_state.select(Some(app.selected_index));
    f.render_stateful_widget(list, right[1], &mut app.list_state);
}

pub fn render_person(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    let mut lines = Vec::new();
    match &app.detail {
        Some(detail) => {
            let p = &detail.profile;
            lines.push(kv("이름", or_dash(p.name.as_deref()).to_string()));
            lines.push(kv("정당", or_dash(p.party.as_deref()).to_string()));
            lines.push(kv("지역구", or_dash(p.district.as_deref()).to_string()));
            lines.push(kv("당선", elected_count_label(p.elected_count.as_deref())));
            lines.push(kv("위원회", or_dash(p.committee.as_deref()).to_string()));
            if let Some(party) = detail.history.parties.first() {
                lines.push(kv(
                    "정당 이력",
                    format!(
                        "{} ({} ~ {})",
                        or_dash(party.party.as_deref()),
                        format_date(or_dash(party.start_date.as_deref())),
                        format_date(or_dash(party.end_date.as_deref()))
                    ),
                ));
            }
            let bills: Vec<&str> = detail
                .representative_bills
                .iter()
                .filter_map(|b| b.bill_name.as_deref())
                .take(3)
                .collect();
            if !bills.is_empty() {
                lines.push(kv("대표 법안", bills.join(" / ")));
            }
        }
        None => lines.extend(placeholder(app, FetchSlot::Detail, "의원 정보가 없습니다")),
    }
    let tally = StanceTally::from_bills(app.member_bills.snapshot());
    lines.push(kv(
        "성향",
        format!(
            "협력 {} / 비협력 {} / 기타 {}",
            tally.cooperative, tally.non_cooperative, tally.neutral
        ),
    ));
    if let Some(summary) = &app.ai_summary {
        lines.push(kv("AI 요약", summary.clone()));
    }
    let p = Paragraph::new(lines)
        .block(block("의원 상세 (x 뒤로)", false))
        .wrap(Wrap { trim: true });
    f.render_widget(p, chunks[0]);

    if app.visible_bills.is_empty() {
        let lines = placeholder(app, FetchSlot::Bills, "관련 법안이 없습니다");
        paragraph(f, chunks[1], app, "법안".to_string(), lines);
        return;
    }
    let items: Vec<ListItem> = app
        .visible_bills
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let style = if i == app.bill_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let score = b.score_prob_mean.or(b.score);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<12}", format_date(or_dash(b.date.as_deref())))),
                Span::raw(format!("{:<40}", or_dash(b.bill_name.as_deref()))),
                Span::raw(format!("발언 {:<4}", b.n_speeches)),
                Span::styled(
                    format!("{} {}", or_dash(b.sentiment.as_deref()), opt_score(score, 3)),
                    Style::default().fg(score_color(score)),
                ),
            ]))
            .style(style)
        })
        .collect();
    let title = match app.bill_filter.get(crate::filter::FilterField::BillName) {
        Some(q) => format!("법안 ({}건, \"{}\") Enter 발언 보기", app.visible_bills.len(), q),
        None => format!("법안 ({}건) Enter 발언 보기", app.visible_bills.len()),
    };
    let list = List::new(items).block(block(title, app.focus_area == FocusArea::MainView));
    f.render_widget(list, chunks[1]);
}

pub fn render_speeches(f: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = Vec::new();
    match &app.speeches {
        Some(s) => {
            lines.push(heading(&format!(
                "--- {} ---",
                or_dash(s.bill_name.as_deref())
            )));
            if let Some(summary) = &s.ai_summary {
                lines.push(kv("AI 요약", summary.clone()));
            }
            if let Some(msg) = &s.message {
                lines.push(Line::from(msg.clone()));
            }
            for sp in &s.speeches {
                let color = match sp.sentiment_label {
                    SentimentLabel::Cooperative => Color::Green,
                    SentimentLabel::NonCooperative => Color::Red,
                    SentimentLabel::Neutral => Color::Gray,
                };
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", sp.sentiment_label.label()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        "{} ({}) {} ",
                        or_dash(sp.member_name.as_deref()),
                        or_dash(sp.party_name.as_deref()),
                        format_date(or_dash(sp.date.as_deref()))
                    )),
                    Span::styled(opt_score(sp.score_prob, 3), Style::default().fg(color)),
                ]));
                lines.push(Line::from(or_dash(sp.text.as_deref()).to_string()));
            }
            if s.speeches.is_empty() {
                lines.push(Line::from("발언 기록이 없습니다"));
            }
        }
        None => lines.extend(placeholder(app, FetchSlot::Speeches, "발언 정보가 없습니다")),
    }
    paragraph(f, area, app, "법안 발언 (x 뒤로, ↑↓ 스크롤)".to_string(), lines);
}

pub fn render_bill(f: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = Vec::new();
    if let Some(msg) = &app.bill_message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    match &app.bill {
        Some(bill) if bill.bill_name.is_some() || bill.bill_number.is_some() => {
            lines.push(heading(&format!("--- {} ---", or_dash(bill.bill_name.as_deref()))));
            lines.push(kv("의안번호", or_dash(bill.bill_number.as_deref()).to_string()));
            lines.push(kv("제안자", or_dash(bill.proposer_name.as_deref()).to_string()));
            lines.push(kv("제안 구분", or_dash(bill.proposer_type.as_deref()).to_string()));
            lines.push(kv("제안일", format_date(or_dash(bill.propose_date.as_deref()))));
            lines.push(kv("총 발언", bill.total_speeches.to_string()));
            let coop = bill
                .total_cooperation
                .map(|c| format!("{} ({}점)", opt_score(Some(c), 3), score_to_percent(c)))
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(kv("협력도", coop));

            lines.push(Line::from(""));
            lines.push(heading("--- 정당별 ---"));
            for p in bill.parties_by_score() {
                lines.push(Line::from(vec![
                    Span::raw(format!("{:<12}", p.party_name)),
                    Span::raw(format!("{:>3}명  ", p.member_count)),
                    Span::styled(
                        opt_score(p.avg_score, 3),
                        Style::default().fg(score_color(p.avg_score)),
                    ),
                ]));
            }

            lines.push(Line::from(""));
            lines.push(heading("--- 의원별 ---"));
            for m in &bill.individual_members {
                lines.push(Line::from(vec![
                    Span::raw(format!("{:<8}", or_dash(m.member_name.as_deref()))),
                    Span::raw(format!("{:<12}", or_dash(m.party_name.as_deref()))),
                    Span::raw(format!("발언 {:<4}", m.n_speeches)),
                    Span::styled(opt_score(m.score, 3), Style::default().fg(score_color(m.score))),
                ]));
            }
        }
        Some(_) => {}
        None => lines.extend(placeholder(
            app,
            FetchSlot::BillAnalysis,
            "bill <법안명> | billno <의안번호> | proposer <제안자> | billid <id>",
        )),
    }
    paragraph(f, area, app, app.route.label().to_string(), lines);
}

pub fn render_prediction(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let Some(pred) = &app.prediction else {
        let lines = placeholder(app, FetchSlot::Prediction, "predict <키워드> 로 가결 가능성 예측");
        paragraph(f, area, app, "가결 예측".to_string(), lines);
        return;
    };

    let (percent, label) = match (pred.percent(), pred.outlook()) {
        (Some(pct), Some(outlook)) => (
            pct.round().clamp(0.0, 100.0) as u16,
            format!("{:.1}% · {}", pct, outlook.label()),
        ),
        _ => (0, "예측 불가 (유사 법안 없음)".to_string()),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!("\"{}\"", pred.query)))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, chunks[0]);

    let mut lines = Vec::new();
    if let Some(c) = &pred.confidence {
        lines.push(kv(
            "신뢰도",
            format!("{} {}", or_dash(c.level.as_deref()), opt_score(c.score, 2)),
        ));
    }
    if let Some(g) = &pred.legislative_gap {
        lines.push(kv(
            "입법 공백",
            format!("{} {}", or_dash(g.level.as_deref()), opt_score(g.score, 2)),
        ));
    }
    if let Some(e) = &pred.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(e.clone()));
    }
    lines.push(Line::from(""));
    lines.push(heading("--- 근거 법안 ---"));
    for b in &pred.evidence_bills {
        let (mark, color) = if b.passed() {
            ("가결", Color::Green)
        } else {
            ("미가결", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", mark), Style::default().fg(color)),
            Span::raw(format!("{} ", or_dash(b.bill_name.as_deref()))),
            Span::styled(
                format!("유사도 {}", opt_score(b.similarity, 2)),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }
    paragraph(f, chunks[1], app, "예측 근거".to_string(), lines);
}

fn group_lines(summary: &GroupSummary) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(heading(&format!("--- {} ---", or_dash(summary.name.as_deref()))));
    lines.push(kv("분석 의원", format!("{}명", summary.analyzed_members)));
    let c = &summary.total_cooperation;
    if let Some(msg) = c.message.as_deref().or(c.status.as_deref()) {
        lines.push(Line::from(msg.to_string()));
    }
    let score = c.adjusted_score_prob.or(c.avg_score_prob);
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "협력도"), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} {}", opt_score(score, 3), or_dash(c.adjusted_stance.as_deref())),
            Style::default().fg(score_color(score)),
        ),
    ]));

    let members = |title: &str, rows: &[crate::model::dashboard::RankedMember]| {
        let mut out = vec![Line::from(""), heading(title)];
        for m in rows {
            out.push(Line::from(format!(
                "{:<8} {:<12} 발언 {:<4} {}",
                m.display_name(),
                or_dash(m.party.as_deref()),
                m.speeches(),
                opt_score(m.display_score(), 3)
            )));
        }
        out
    };
    let bills = |title: &str, rows: &[crate::model::dashboard::RankedBill]| {
        let mut out = vec![Line::from(""), heading(title)];
        for b in rows {
            out.push(Line::from(format!(
                "{:<40} {}",
                b.display_name(),
                opt_score(b.display_score(), 3)
            )));
        }
        out
    };
    lines.extend(members("--- 협력 상위 의원 ---", &summary.member_top));
    lines.extend(members("--- 협력 하위 의원 ---", &summary.member_bottom));
    lines.extend(bills("--- 협력 상위 법안 ---", &summary.bill_top));
    lines.extend(bills("--- 협력 하위 법안 ---", &summary.bill_bottom));
    lines
}

pub fn render_party(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = app
        .party_rollups
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if i == app.party_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{:<12} {:>3}명  {}",
                r.party,
                r.member_count,
                opt_score(r.avg_score, 3)
            ))
            .style(style)
        })
        .collect();
    let list = List::new(items).block(block(
        "정당 (Enter 소속 의원)",
        app.focus_area == FocusArea::MainView,
    ));
    f.render_widget(list, chunks[0]);

    let lines = match &app.party {
        Some(summary) => group_lines(summary),
        None => placeholder(app, FetchSlot::Party, "party <id> 로 정당 분석 불러오기"),
    };
    paragraph(f, chunks[1], app, "정당 분석".to_string(), lines);
}

pub fn render_committee(f: &mut Frame, area: Rect, app: &mut App) {
    let lines = match &app.committee {
        Some(summary) => group_lines(summary),
        None => placeholder(app, FetchSlot::Committee, "committee <id> 로 위원회 분석 불러오기"),
    };
    paragraph(f, area, app, "위원회 분석".to_string(), lines);
}

pub fn render_dashboard(f: &mut Frame, area: Rect, app: &mut App) {
    let mut lines = Vec::new();
    match &app.my_dashboard {
        Some(d) => {
            lines.push(kv("사용자", d.user.display_name()));
            if let Some(msg) = &d.message {
                lines.push(Line::from(msg.clone()));
            }
            lines.push(Line::from(""));
            lines.push(heading("--- 최근 검색 ---"));
            if d.recent_searches.is_empty() {
                lines.push(Line::from("-"));
            }
            lines.extend(d.recent_searches.iter().map(|s| Line::from(s.clone())));
            lines.push(Line::from(""));
            lines.push(heading(&format!("--- 즐겨찾기 ({}) ---", d.favorites.len())));
        }
        None => lines.extend(placeholder(app, FetchSlot::Dashboard, "대시보드 정보가 없습니다")),
    }
    paragraph(f, area, app, "내 대시보드".to_string(), lines);
}
