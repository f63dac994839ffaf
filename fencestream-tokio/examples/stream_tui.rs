//! Streams the sample document into a terminal, styling code regions as they arrive.
//!
//! Run:
//!   cargo run -p fencestream-tokio --example stream_tui
//!
//! Keys: `q` quits, `f` toggles follow-tail, `j`/`k` scroll.

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use fencestream::Document;
use fencestream::FenceStream;
use fencestream::RegionKind;
use fencestream_tokio::FragmentOptions;
use fencestream_tokio::RandomFragments;
use fencestream_tokio::SAMPLE_DOCUMENT;
use fencestream_tokio::TickOptions;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

#[derive(Debug, Default)]
struct App {
    doc: Document,
    follow_tail: bool,
    scroll_y: u16,
    updates: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx_update, mut rx_update) = mpsc::channel(64);
    let (tx_ev, mut rx_ev) = mpsc::channel::<Event>(64);
    let (cancel_tx, cancel_rx) = oneshot::channel();

    std::thread::spawn(move || loop {
        if let Ok(true) = crossterm::event::poll(Duration::from_millis(50)) {
            if let Ok(ev) = crossterm::event::read() {
                if tx_ev.blocking_send(ev).is_err() {
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let fragments = RandomFragments::new(SAMPLE_DOCUMENT, FragmentOptions::default());
        let _ = fencestream_tokio::drive(
            FenceStream::new(),
            fragments,
            TickOptions::default(),
            tx_update,
            cancel_rx,
        )
        .await;
    });

    let mut app = App {
        follow_tail: true,
        ..Default::default()
    };
    let res = run(&mut terminal, &mut app, &mut rx_update, &mut rx_ev).await;
    let _ = cancel_tx.send(());

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

async fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx_update: &mut mpsc::Receiver<fencestream::Update>,
    rx_ev: &mut mpsc::Receiver<Event>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(f.area());

            let block = Block::default()
                .title("fencestream demo")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let lines = build_lines(&app.doc);
            let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
            app.scroll_y = if app.follow_tail {
                max_scroll
            } else {
                app.scroll_y.min(max_scroll)
            };
            f.render_widget(
                Paragraph::new(Text::from(lines)).scroll((app.scroll_y, 0)),
                inner,
            );

            let status_text = format!(
                "regions={} updates={} finished={} follow={} | q quit, f follow, j/k scroll",
                app.doc.regions().len(),
                app.updates,
                app.doc.is_finished(),
                app.follow_tail,
            );
            f.render_widget(Paragraph::new(Line::raw(status_text)), status);
        })?;

        tokio::select! {
            maybe_ev = rx_ev.recv() => {
                let Some(ev) = maybe_ev else { return Ok(()); };
                if handle_event(app, ev) {
                    return Ok(());
                }
            }
            Some(update) = rx_update.recv() => {
                app.doc.apply(update);
                app.updates += 1;
            }
            _ = tokio::time::sleep(Duration::from_millis(16)) => {}
        }
    }
}

/// Returns true when the app should quit.
fn handle_event(app: &mut App, ev: Event) -> bool {
    let Event::Key(key) = ev else { return false; };
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('f') => {
            app.follow_tail = !app.follow_tail;
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_tail = false;
            app.scroll_y = app.scroll_y.saturating_add(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_tail = false;
            app.scroll_y = app.scroll_y.saturating_sub(1);
            false
        }
        _ => false,
    }
}

fn region_style(kind: RegionKind) -> Style {
    match kind {
        RegionKind::PlainRun => Style::default(),
        RegionKind::InlineCode => Style::default().fg(Color::Magenta).bg(Color::Gray),
        RegionKind::FenceBlock => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

fn build_lines(doc: &Document) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for region in doc.regions() {
        let style = region_style(region.kind);
        let mut parts = region.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}
