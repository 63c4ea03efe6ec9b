//! Rendering for the explorer: sidebar, table or charts, footer.

use notescope_core::aggregate::{KeywordCount, LanguageCount, SentimentTable, WeekCount};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Sparkline, Table, Wrap},
    Frame,
};

use super::{App, Choice, Focus, Pane};

// ─── Colours ─────────────────────────────────────────────────────────────────

const ACCENT: Color = Color::Cyan;
const FOCUSED: Color = Color::Yellow;
const DIM: Color = Color::DarkGray;
const OK: Color = Color::Green;
const ERR: Color = Color::Red;

const SIDEBAR_WIDTH: u16 = 42;
/// Status URL plus a 19-digit id
const LINK_WIDTH: u16 = 51;

// ─── Entry ───────────────────────────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" notescope · {} ", app.source),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(outer, area);

    let inner = shrink(area, 1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    render_sidebar(f, app, cols[0]);
    match app.pane {
        Pane::Table => render_table(f, app, cols[1]),
        Pane::Charts => render_charts(f, app, cols[1]),
    }
    render_footer(f, app, rows[1]);
}

// ─── Sidebar ─────────────────────────────────────────────────────────────────

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(" Filters ", Style::default().fg(DIM)));
    f.render_widget(block, area);

    let inner = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width.saturating_sub(1),
        height: area.height.saturating_sub(1),
    };

    let focused = |field: Focus| app.focus == field;
    let lines = vec![
        keyword_line(&app.criteria.keyword, focused(Focus::Keyword)),
        Line::from(""),
        selector_line("Language", &app.language, focused(Focus::Language)),
        selector_line("Sentiment", &app.sentiment, focused(Focus::Sentiment)),
        selector_line("Week", &app.week, focused(Focus::Week)),
        selector_line("Political", &app.political, focused(Focus::Political)),
        selector_line("Hateful", &app.hateful, focused(Focus::Hateful)),
        Line::from(""),
        help_line("Tab/S-Tab", "focus"),
        help_line("←/→", "change value"),
        help_line("PgUp/PgDn", "page"),
        help_line("v", "table / charts"),
        help_line("Ctrl-S", "export CSV"),
        help_line("q", "quit"),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

/// Keyword box: "Keyword   [text▌]"
fn keyword_line(value: &str, focused: bool) -> Line<'static> {
    let fg = if focused { FOCUSED } else { Color::White };
    let bracket_style = if focused {
        Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };
    let cursor = if focused { "▌" } else { "" };

    Line::from(vec![
        Span::styled(format!("  {:10}", "Keyword"), Style::default().fg(DIM)),
        Span::styled("[", bracket_style),
        Span::styled(
            format!("{:<24}", format!("{}{}", value, cursor)),
            Style::default().fg(fg),
        ),
        Span::styled("]", bracket_style),
    ])
}

/// Selector row: "Language  ◀ India (hi+ta+ur+mr) ▶"
fn selector_line(label: &str, choice: &Choice, focused: bool) -> Line<'static> {
    let label_span = Span::styled(format!("  {:10}", label), Style::default().fg(DIM));

    if !choice.is_enabled() {
        return Line::from(vec![label_span, Span::styled("n/a", Style::default().fg(DIM))]);
    }

    let arrow_style = if focused {
        Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };
    let value_style = match (focused, choice.index) {
        (true, _) => Style::default().fg(FOCUSED),
        (false, 0) => Style::default().fg(Color::White),
        (false, _) => Style::default().fg(OK),
    };

    Line::from(vec![
        label_span,
        Span::styled("◀ ", arrow_style),
        Span::styled(choice.current().to_string(), value_style),
        Span::styled(" ▶", arrow_style),
    ])
}

fn help_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:>10} ", key), Style::default().fg(ACCENT)),
        Span::styled(action.to_string(), Style::default().fg(DIM)),
    ])
}

// ─── Table pane ──────────────────────────────────────────────────────────────

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let page = app.current_page();
    let block = Block::default().title(Span::styled(
        format!(" Notes · page {} of {} ", page.number, page.total_pages),
        Style::default().fg(ACCENT),
    ));

    if page.rows.is_empty() {
        let para = Paragraph::new(Span::styled(
            "  No notes match the current filters",
            Style::default().fg(DIM),
        ))
        .block(block);
        f.render_widget(para, area);
        return;
    }

    let link_width = if app.dataset.capabilities().identifier.is_some() {
        LINK_WIDTH
    } else {
        0
    };
    let widths = [
        Constraint::Length(link_width),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let header = Row::new(["Link", "Lang", "Sentiment", "Week", "Summary"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = page
        .rows
        .iter()
        .map(|row| {
            let note = row.note;
            Row::new(vec![
                Cell::from(row.link.clone()),
                Cell::from(note.language.clone().unwrap_or_default()),
                Cell::from(note.sentiment.clone().unwrap_or_default()),
                Cell::from(note.week_label().unwrap_or_default()),
                Cell::from(note.summary.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

// ─── Charts pane ─────────────────────────────────────────────────────────────

fn render_charts(f: &mut Frame, app: &App, area: Rect) {
    let aggregates = &app.view.aggregates;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    render_weekly(f, aggregates.notes_per_week.as_deref(), top[0]);
    render_sentiment(f, aggregates.sentiment_per_week.as_ref(), top[1]);
    render_languages(f, aggregates.languages.as_deref(), bottom[0]);
    render_keywords(f, aggregates.top_keywords.as_deref(), bottom[1]);
}

fn render_weekly(f: &mut Frame, weeks: Option<&[WeekCount]>, area: Rect) {
    let weeks = match weeks {
        Some(w) if !w.is_empty() => w,
        Some(_) => return placeholder(f, " Notes per week ", "No valid timestamps", area),
        None => return placeholder(f, " Notes per week ", "No createdAtMillis column", area),
    };

    let data: Vec<u64> = weeks.iter().map(|w| w.count as u64).collect();
    let peak = data.iter().copied().max().unwrap_or(0);
    let title = match (weeks.first(), weeks.last()) {
        (Some(first), Some(last)) => format!(
            " Notes per week · {} to {} · peak {} ",
            first.week,
            last.week,
            fmt_num(peak)
        ),
        _ => " Notes per week ".to_string(),
    };

    let spark = Sparkline::default()
        .block(chart_block(title))
        .data(&data)
        .style(Style::default().fg(ACCENT));
    f.render_widget(spark, area);
}

fn render_sentiment(f: &mut Frame, table: Option<&SentimentTable>, area: Rect) {
    let table = match table {
        Some(t) if !t.rows.is_empty() => t,
        Some(_) => return placeholder(f, " Sentiment per week ", "No weekly rows", area),
        None => {
            return placeholder(
                f,
                " Sentiment per week ",
                "Needs createdAtMillis and sentiment_category",
                area,
            )
        }
    };

    let header = Row::new(
        std::iter::once("Week".to_string()).chain(table.sentiments.iter().cloned()),
    )
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            Row::new(
                std::iter::once(row.week.to_string())
                    .chain(row.counts.iter().map(|c| fmt_num(*c as u64))),
            )
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(11))
        .chain(table.sentiments.iter().map(|_| Constraint::Length(10)))
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(chart_block(" Sentiment per week ".to_string()));
    f.render_widget(widget, area);
}

fn render_languages(f: &mut Frame, languages: Option<&[LanguageCount]>, area: Rect) {
    match languages {
        Some(langs) => {
            let bars: Vec<(&str, u64)> = langs
                .iter()
                .map(|l| (l.language.as_str(), l.count as u64))
                .collect();
            bar_chart(f, " Languages ", &bars, area);
        }
        None => placeholder(f, " Languages ", "No detected_language column", area),
    }
}

fn render_keywords(f: &mut Frame, keywords: Option<&[KeywordCount]>, area: Rect) {
    match keywords {
        Some(kws) => {
            let bars: Vec<(&str, u64)> = kws
                .iter()
                .map(|k| (k.keyword.as_str(), k.count as u64))
                .collect();
            bar_chart(f, " Top political keywords ", &bars, area);
        }
        None => placeholder(
            f,
            " Top political keywords ",
            "No political_keywords_flagged column",
            area,
        ),
    }
}

/// Horizontal bars, one per label
fn bar_chart(f: &mut Frame, title: &str, bars: &[(&str, u64)], area: Rect) {
    if bars.is_empty() {
        return placeholder(f, title, "No values", area);
    }

    let chart = BarChart::default()
        .block(chart_block(title.to_string()))
        .direction(Direction::Horizontal)
        .data(bars)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(ACCENT))
        .value_style(Style::default().fg(Color::Black).bg(ACCENT));
    f.render_widget(chart, area);
}

fn placeholder(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let para = Paragraph::new(Span::styled(format!("  {}", message), Style::default().fg(DIM)))
        .block(chart_block(title.to_string()))
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn chart_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(title, Style::default().fg(ACCENT)))
}

// ─── Footer ──────────────────────────────────────────────────────────────────

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let page = app.current_page();
    let summary = &app.view.summary;

    let showing = if page.rows.is_empty() {
        format!("Showing rows 0 to 0 of {}", fmt_num(summary.filtered_rows as u64))
    } else {
        let (first, last) = page.showing();
        format!(
            "Showing rows {} to {} of {}",
            fmt_num(first as u64),
            fmt_num(last as u64),
            fmt_num(summary.filtered_rows as u64)
        )
    };

    let mut stats = vec![Span::styled(showing, Style::default().fg(Color::White))];
    if let Some(ids) = summary.identifier_count {
        stats.push(Span::styled("  │  ", Style::default().fg(DIM)));
        stats.push(Span::raw(format!("{} with id", fmt_num(ids as u64))));
    }
    if let Some(india) = summary.india_count {
        stats.push(Span::styled("  │  ", Style::default().fg(DIM)));
        stats.push(Span::raw(format!("India (hi+ta+ur+mr): {}", fmt_num(india as u64))));
    }
    stats.push(Span::styled("  │  ", Style::default().fg(DIM)));
    stats.push(Span::styled(
        format!("{} total", fmt_num(summary.total_rows as u64)),
        Style::default().fg(DIM),
    ));

    let status = match &app.status {
        Some(msg) if msg.starts_with("Export failed") => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(ERR)))
        }
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(OK))),
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(vec![Line::from(stats), status]), area);
}

// ─── Utilities ───────────────────────────────────────────────────────────────

fn halves(r: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(r)
}

fn shrink(r: Rect, by: u16) -> Rect {
    Rect {
        x: r.x + by,
        y: r.y + by,
        width: r.width.saturating_sub(by * 2),
        height: r.height.saturating_sub(by * 2),
    }
}

fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}
