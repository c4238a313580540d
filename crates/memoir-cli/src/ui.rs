//! TUI implementation for memoir

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

use memoir_api::{DashboardSummary, DiaryClient, EntryRecord};
use memoir_core::{
    BannerKind, Conversation, DashboardStats, ERROR_FALLBACK, EntrySaver, Role, stats::WEEKDAYS,
};
use memoir_tui::{
    TerminalGuard, Theme,
    input::{Action, key_to_action},
    widgets::{ChatMessage, InputBox, MessageList, Spinner, TextArea, TypingIndicator,
        message_list::measure_height},
};

/// Reveal cadence: one character per tick.
const REVEAL_TICK: Duration = Duration::from_millis(30);

/// The three views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Journal,
    Assistant,
    Dashboard,
}

impl View {
    const ALL: [View; 3] = [View::Journal, View::Assistant, View::Dashboard];

    fn title(self) -> &'static str {
        match self {
            View::Journal => "Journal",
            View::Assistant => "Assistant",
            View::Dashboard => "Dashboard",
        }
    }

    fn next(self) -> View {
        match self {
            View::Journal => View::Assistant,
            View::Assistant => View::Dashboard,
            View::Dashboard => View::Journal,
        }
    }

    fn prev(self) -> View {
        match self {
            View::Journal => View::Dashboard,
            View::Assistant => View::Journal,
            View::Dashboard => View::Assistant,
        }
    }
}

/// Network completions delivered back to the event loop.
///
/// Every spawned request reports exactly once; there is no cancellation.
#[derive(Debug)]
enum NetEvent {
    AnswerReady(memoir_api::Result<Option<String>>),
    SaveDone(memoir_api::Result<()>),
    EntriesLoaded(memoir_api::Result<Vec<EntryRecord>>),
    SummaryLoaded(memoir_api::Result<DashboardSummary>),
}

fn spawn_analyze(client: DiaryClient, tx: mpsc::Sender<NetEvent>, query: String) {
    tokio::spawn(async move {
        let result = client.analyze(&query).await;
        let _ = tx.send(NetEvent::AnswerReady(result)).await;
    });
}

fn spawn_save(client: DiaryClient, tx: mpsc::Sender<NetEvent>, entry: String) {
    tokio::spawn(async move {
        let result = client.save_entry(&entry).await;
        let _ = tx.send(NetEvent::SaveDone(result)).await;
    });
}

fn spawn_list(client: DiaryClient, tx: mpsc::Sender<NetEvent>) {
    tokio::spawn(async move {
        let result = client.list_entries().await;
        let _ = tx.send(NetEvent::EntriesLoaded(result)).await;
    });
}

fn spawn_summary(client: DiaryClient, tx: mpsc::Sender<NetEvent>) {
    tokio::spawn(async move {
        let result = client.dashboard_summary().await;
        let _ = tx.send(NetEvent::SummaryLoaded(result)).await;
    });
}

/// Application state. Each view owns its state exclusively; nothing is
/// shared across views except the theme and the current view marker.
struct App {
    view: View,
    theme: Theme,

    // Assistant view
    conversation: Conversation,
    chat_input: InputBox,
    chat_scroll: usize,
    busy_since: Instant,

    // Journal view
    editor: TextArea,
    saver: EntrySaver,
    entries: Vec<EntryRecord>,

    // Dashboard view
    stats: Option<DashboardStats>,
    loading_stats: bool,
}

impl App {
    fn new(theme: Theme, view: View) -> Self {
        let mut chat_input = InputBox::new().with_placeholder("Ask me anything about your diary...");
        chat_input.set_focused(true);
        let mut editor = TextArea::new().with_placeholder("Start writing your thoughts here...");
        editor.set_focused(true);

        Self {
            view,
            theme,
            conversation: Conversation::new(),
            chat_input,
            chat_scroll: 0,
            busy_since: Instant::now(),
            editor,
            saver: EntrySaver::new(),
            entries: Vec::new(),
            stats: None,
            loading_stats: false,
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved to the real offset during render
        self.chat_scroll = usize::MAX;
    }

    fn switch_view(&mut self, view: View, client: &DiaryClient, tx: &mpsc::Sender<NetEvent>) {
        self.view = view;
        // The dashboard fetches lazily, the first time it is opened
        if view == View::Dashboard && self.stats.is_none() && !self.loading_stats {
            self.loading_stats = true;
            self.busy_since = Instant::now();
            spawn_summary(client.clone(), tx.clone());
        }
    }

    /// Handle a keyboard action. Returns false to quit.
    fn handle_action(
        &mut self,
        action: Action,
        width: u16,
        height: u16,
        client: &DiaryClient,
        tx: &mpsc::Sender<NetEvent>,
    ) -> bool {
        match action {
            Action::Quit | Action::Interrupt | Action::Escape => return false,
            Action::NextView => {
                self.switch_view(self.view.next(), client, tx);
                return true;
            }
            Action::PrevView => {
                self.switch_view(self.view.prev(), client, tx);
                return true;
            }
            _ => {}
        }

        match self.view {
            View::Assistant => match action {
                Action::Submit => {
                    // begin_turn enforces the non-empty and in-flight guards;
                    // the user message is in history before the query goes out
                    if let Some(query) = self.conversation.begin_turn(self.chat_input.content()) {
                        self.chat_input.clear();
                        self.busy_since = Instant::now();
                        self.scroll_to_bottom();
                        spawn_analyze(client.clone(), tx.clone(), query);
                    }
                }
                Action::PageUp => {
                    self.chat_scroll = self.chat_scroll.saturating_sub(10);
                }
                Action::PageDown => {
                    self.chat_scroll = self.chat_scroll.saturating_add(10);
                }
                _ => {
                    self.chat_input.apply(&action, width);
                }
            },
            View::Journal => match action {
                Action::Save => {
                    if let Some(entry) = self.saver.begin_save(&self.editor.text()) {
                        self.busy_since = Instant::now();
                        spawn_save(client.clone(), tx.clone(), entry);
                    }
                }
                _ => {
                    self.editor.apply(&action, height);
                }
            },
            View::Dashboard => {
                if action == Action::Char('r') && !self.loading_stats {
                    self.loading_stats = true;
                    self.busy_since = Instant::now();
                    spawn_summary(client.clone(), tx.clone());
                }
            }
        }
        true
    }

    /// Handle a network completion.
    fn handle_net(&mut self, event: NetEvent, client: &DiaryClient, tx: &mpsc::Sender<NetEvent>) {
        match event {
            NetEvent::AnswerReady(result) => {
                match result {
                    Ok(answer) => self.conversation.resolve(answer),
                    Err(e) => {
                        warn!(error = %e, "assistant query failed");
                        self.conversation.fail();
                    }
                }
                self.scroll_to_bottom();
            }
            NetEvent::SaveDone(result) => {
                let now = Instant::now();
                match result {
                    Ok(()) => {
                        self.saver.save_succeeded(now);
                        self.editor.clear();
                        // Pick up the new entry in the side list
                        spawn_list(client.clone(), tx.clone());
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to save entry");
                        self.saver.save_failed(now);
                    }
                }
            }
            NetEvent::EntriesLoaded(result) => match result {
                Ok(entries) => self.entries = entries,
                Err(e) => {
                    // Degrade to an empty list
                    warn!(error = %e, "failed to load entries");
                }
            },
            NetEvent::SummaryLoaded(result) => {
                self.loading_stats = false;
                self.stats = Some(match result {
                    Ok(summary) => DashboardStats::from_summary(summary),
                    Err(e) => {
                        warn!(error = %e, "failed to load dashboard summary");
                        DashboardStats::empty()
                    }
                });
            }
        }
    }

    /// Advance animations. Called on every tick of the interval; the
    /// interval is dropped with the event loop, so no tick can fire after
    /// teardown.
    fn tick(&mut self) {
        if self.conversation.is_revealing() {
            self.conversation.reveal_tick();
            self.scroll_to_bottom();
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Status
            ])
            .split(size);

        self.render_tabs(frame, chunks[0]);
        match self.view {
            View::Journal => self.render_journal(frame, chunks[1]),
            View::Assistant => self.render_assistant(frame, chunks[1]),
            View::Dashboard => self.render_dashboard(frame, chunks[1]),
        }
        self.render_status(frame, chunks[2]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" memoir ", self.theme.accent_bold())];
        for view in View::ALL {
            spans.push(Span::styled("│ ", self.theme.dim_style()));
            let style = if view == self.view {
                self.theme.accent_bold()
            } else {
                self.theme.dim_style()
            };
            spans.push(Span::styled(format!("{} ", view.title()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_assistant(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Messages
                Constraint::Length(3), // Input
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Personal Assistant ");
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        if self.conversation.messages().is_empty() && !self.conversation.is_awaiting_response() {
            let welcome = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Ask me anything about your diary entries",
                    self.theme.dim_style(),
                )),
                Line::from(Span::styled(
                    "  or get insights from your personal data.",
                    self.theme.dim_style(),
                )),
            ]);
            frame.render_widget(welcome, inner);
        } else if inner.height > 0 {
            let messages = self.chat_messages();
            let content_height = measure_height(&messages, inner.width as usize);
            let viewport = inner.height as usize;

            if self.chat_scroll == usize::MAX {
                self.chat_scroll = content_height.saturating_sub(viewport);
            } else {
                self.chat_scroll = self.chat_scroll.min(content_height.saturating_sub(viewport));
            }

            let list = MessageList::new(&messages, &self.theme).scroll(self.chat_scroll);
            frame.render_widget(list, inner);

            if content_height > viewport {
                let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓"))
                    .track_symbol(Some("│"))
                    .thumb_symbol("█");
                let mut scrollbar_state = ScrollbarState::new(content_height)
                    .position(self.chat_scroll)
                    .viewport_content_length(viewport);
                frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
            }

            if self.conversation.is_awaiting_response() && inner.height > 1 {
                let dots = Rect {
                    x: inner.x + 2,
                    y: inner.y + inner.height - 1,
                    width: inner.width.saturating_sub(2),
                    height: 1,
                };
                frame.render_widget(
                    TypingIndicator::new(&self.theme).with_start_time(self.busy_since),
                    dots,
                );
            }
        }

        self.chat_input
            .render(chunks[1], frame.buffer_mut(), &self.theme);
    }

    /// Conversation history as the list should display it right now.
    fn chat_messages(&self) -> Vec<ChatMessage> {
        let messages = self.conversation.messages();
        let last = messages.len().saturating_sub(1);
        messages
            .iter()
            .enumerate()
            .map(|(i, msg)| match msg.role {
                Role::User => ChatMessage::user(self.conversation.visible_content(i)),
                Role::Assistant => {
                    let mut chat = ChatMessage::assistant(self.conversation.visible_content(i));
                    if msg.content == ERROR_FALLBACK {
                        chat = chat.error();
                    }
                    if i == last && self.conversation.is_revealing() {
                        chat = chat.revealing();
                    }
                    chat
                }
            })
            .collect()
    }

    fn render_journal(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.editor.render(chunks[0], frame.buffer_mut(), &self.theme);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(format!(" Entries ({}) ", self.entries.len()));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if self.entries.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No entries yet.", self.theme.dim_style())),
                inner,
            );
            return;
        }

        // Latest first, one preview line each
        let width = inner.width as usize;
        let lines: Vec<Line> = self
            .entries
            .iter()
            .rev()
            .take(inner.height as usize)
            .map(|entry| self.entry_preview(entry, width))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn entry_preview(&self, entry: &EntryRecord, width: usize) -> Line<'static> {
        let first_line = entry.text().lines().next().unwrap_or("").to_string();
        match entry.timestamp() {
            Some(ts) => {
                let stamp = format!("{} ", ts.format("%b %d"));
                let room = width.saturating_sub(stamp.chars().count() + 2);
                let preview: String = first_line.chars().take(room).collect();
                Line::from(vec![
                    Span::styled(stamp, self.theme.dim_style()),
                    Span::styled(preview, self.theme.base_style()),
                ])
            }
            None => {
                let preview: String = first_line.chars().take(width.saturating_sub(1)).collect();
                Line::from(Span::styled(preview, self.theme.base_style()))
            }
        }
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Dashboard ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(stats) = &self.stats else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  Loading your stats...",
                    self.theme.dim_style(),
                )),
                inner,
            );
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Headline stats
                Constraint::Min(4),    // Entries over time
                Constraint::Min(4),    // Moods + weekly
            ])
            .split(inner);

        self.render_headline(frame, chunks[0], stats);
        self.render_series(
            frame,
            chunks[1],
            "Entries over time",
            &stats.entries_over_time,
        );

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        self.render_series(frame, bottom[0], "Mood distribution", &stats.mood_distribution);
        let weekly: Vec<(String, u64)> = WEEKDAYS
            .iter()
            .zip(stats.weekly_activity.iter())
            .map(|(day, count)| (day.to_string(), *count))
            .collect();
        self.render_series(frame, bottom[1], "Weekly activity", &weekly);
    }

    fn render_headline(&self, frame: &mut Frame, area: Rect, stats: &DashboardStats) {
        let stat = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {:<18}", label), self.theme.dim_style()),
                Span::styled(value, self.theme.accent_bold()),
            ])
        };
        let lines = vec![
            Line::from(""),
            stat("Total entries", stats.total_entries.to_string()),
            stat("Assistant queries", stats.assistant_queries.to_string()),
            stat(
                "Avg entry length",
                format!("{} words", stats.avg_entry_length),
            ),
            stat("Mood trend", stats.mood_trend.clone()),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Render a labeled series as horizontal text bars.
    fn render_series(&self, frame: &mut Frame, area: Rect, title: &str, series: &[(String, u64)]) {
        let mut lines = vec![Line::from(Span::styled(
            format!("  {}", title),
            self.theme.accent_style(),
        ))];

        if series.is_empty() {
            lines.push(Line::from(Span::styled(
                "    no data",
                self.theme.dim_style(),
            )));
        } else {
            let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
            let label_width = series
                .iter()
                .map(|(label, _)| label.chars().count())
                .max()
                .unwrap_or(0);
            let bar_room = (area.width as usize)
                .saturating_sub(label_width + 10)
                .max(1);

            for (label, value) in series.iter().take(area.height.saturating_sub(1) as usize) {
                let bar_len = (*value as usize * bar_room) / max as usize;
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<width$} ", label, width = label_width),
                        self.theme.dim_style(),
                    ),
                    Span::styled("█".repeat(bar_len), self.theme.accent_style()),
                    Span::styled(format!(" {}", value), self.theme.base_style()),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let now = Instant::now();

        // In-flight work gets the spinner
        let spinner_label = if self.conversation.is_awaiting_response() {
            Some("Thinking...")
        } else if self.saver.is_saving() {
            Some("Saving...")
        } else if self.loading_stats {
            Some("Loading stats...")
        } else {
            None
        };
        if let Some(label) = spinner_label {
            let spinner = Spinner::new(label, &self.theme).with_start_time(self.busy_since);
            frame.render_widget(spinner, area);
            return;
        }

        // Save banner takes priority over the hints while visible
        if let Some(banner) = self.saver.banner(now) {
            let (text, style) = match banner.kind {
                BannerKind::Saved => ("✓ Entry saved", self.theme.success_style()),
                BannerKind::Failed => ("✗ Failed to save entry", self.theme.error_style()),
            };
            frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
            return;
        }

        let left = match self.view {
            View::Journal => "Ctrl+S: save entry",
            View::Assistant => "Enter: send │ PgUp/Dn: scroll",
            View::Dashboard => "r: refresh",
        };
        let right = "Tab: switch view │ Ctrl+C: quit";

        let left_width = left.chars().count();
        let right_width = right.chars().count();
        let available = area.width as usize;

        let line = if left_width + right_width + 2 <= available {
            let spacing = available - left_width - right_width;
            Line::from(vec![
                Span::styled(left, self.theme.dim_style()),
                Span::raw(" ".repeat(spacing)),
                Span::styled(right, self.theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(left, self.theme.dim_style()))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Run the TUI application until the user quits.
pub async fn run_tui(client: DiaryClient, theme: Theme, start_view: View) -> anyhow::Result<()> {
    let mut guard = TerminalGuard::new()?;

    let (net_tx, mut net_rx) = mpsc::channel::<NetEvent>(32);
    let mut app = App::new(theme, start_view);

    // The entry list loads once at startup; a failure logs and leaves it
    // empty. The dashboard fetch happens on first open.
    spawn_list(client.clone(), net_tx.clone());
    if start_view == View::Dashboard {
        app.loading_stats = true;
        spawn_summary(client.clone(), net_tx.clone());
    }

    let mut event_stream = EventStream::new();

    // Drives the reveal animation and spinner redraws. Dropped with this
    // function, which cancels any pending ticks on teardown.
    let mut tick_interval = tokio::time::interval(REVEAL_TICK);

    loop {
        guard.terminal().draw(|frame| app.render(frame))?;
        let size = guard.terminal().size()?;

        tokio::select! {
            biased;

            // Network completions first: they unblock the in-flight guards
            maybe = net_rx.recv() => {
                if let Some(event) = maybe {
                    app.handle_net(event, &client, &net_tx);
                }
            }

            // Keyboard input
            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        let action = key_to_action(key);
                        if !app.handle_action(action, size.width, size.height, &client, &net_tx) {
                            break;
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        app.handle_action(Action::Paste(text), size.width, size.height, &client, &net_tx);
                    }
                    Some(Ok(Event::Resize(_, _))) => {}
                    Some(Err(e)) => {
                        return Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => break,
                    _ => {}
                }
            }

            // Animation tick (reveal + spinner)
            _ = tick_interval.tick() => {
                app.tick();
            }
        }
    }

    Ok(())
}
