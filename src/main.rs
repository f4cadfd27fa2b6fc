mod app;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;
mod vocab;

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::menu::MenuView;
use ui::components::notification::NotificationBanner;
use ui::components::progress_bar::ProgressBar;
use ui::components::quiz_card::QuizCard;
use ui::components::result_panel::ResultPanel;
use ui::components::settings_panel::SettingsPanel;
use ui::layout::AppLayout;
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "kotoba",
    version,
    about = "Terminal vocabulary quiz with adaptive review"
)]
struct Cli {
    #[arg(short, long, help = "Profile name (user identifier)")]
    profile: Option<String>,

    #[arg(short, long, help = "Words per session")]
    session_size: Option<usize>,

    #[arg(short = 'u', long, help = "Vocabulary CSV source URL")]
    source: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

/// Log to a file in the data dir; stderr belongs to the raw-mode terminal.
fn init_logging() {
    let Some(dir) = dirs::data_dir() else { return };
    let dir = dir.join("kotoba");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::create(dir.join("kotoba.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kotoba=info".parse().unwrap()),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(profile) = cli.profile {
        config.profile = profile.to_lowercase();
    }
    if let Some(session_size) = cli.session_size {
        config.session_size = session_size;
    }
    if let Some(source) = cli.source {
        config.source_url = source;
    }
    if let Some(theme_name) = cli.theme {
        if let Some(index) = Theme::available_themes()
            .iter()
            .position(|name| name == &theme_name)
        {
            config.theme_index = index;
        }
    }

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => activate_menu_item(app, app.menu.selected),
        KeyCode::Char('1') => activate_menu_item(app, 0),
        KeyCode::Char('2') => activate_menu_item(app, 1),
        KeyCode::Char('3') => activate_menu_item(app, 2),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn activate_menu_item(app: &mut App, index: usize) {
    match index {
        0 => app.start_quiz(),
        1 => app.reload_vocabulary(),
        2 => app.screen = AppScreen::Settings,
        3 => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch @ '1'..='4') => {
            let index = ch as usize - '1' as usize;
            app.answer(index);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            // Skip the rest of the reveal delay.
            if let Some(quiz) = app.quiz.as_mut() {
                quiz.skip_reveal();
            }
            app.tick();
        }
        KeyCode::Esc => app.abandon_quiz(),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.start_quiz(),
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Menu,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.cycle_theme(),
        KeyCode::Char('r') => app.reload_vocabulary(),
        KeyCode::Esc => app.screen = AppScreen::Menu,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg())),
        frame.area(),
    );

    // Header: app name left, profile + session score right.
    let mut header_spans = vec![Span::styled(
        " kotoba ",
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(quiz) = &app.quiz {
        header_spans.push(Span::styled(
            format!("  score {}", quiz.score),
            Style::default().fg(colors.fg()),
        ));
    }
    header_spans.push(Span::styled(
        format!("  ·  {}", app.user),
        Style::default().fg(colors.muted()),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(header_spans))
            .block(Block::bordered().border_style(Style::default().fg(colors.border()))),
        layout.header,
    );

    match app.screen {
        AppScreen::Menu => {
            frame.render_widget(
                MenuView {
                    menu: &app.menu,
                    word_count: app.words.len(),
                    mastered_count: app.stats.mastered_count(app.config.mastery_threshold),
                    source: app.vocab_source,
                    theme: app.theme,
                },
                layout.main,
            );
        }
        AppScreen::Quiz => {
            if let Some(quiz) = &app.quiz {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(8), Constraint::Length(3)])
                    .split(layout.main);
                frame.render_widget(
                    QuizCard {
                        quiz,
                        theme: app.theme,
                    },
                    rows[0],
                );
                frame.render_widget(
                    ProgressBar {
                        answered: quiz.index,
                        total: quiz.queue.len(),
                        theme: app.theme,
                    },
                    rows[1],
                );
            }
        }
        AppScreen::Result => {
            if let Some(result) = &app.last_result {
                let card = AppLayout::centered(layout.main, 40, 9);
                frame.render_widget(
                    ResultPanel {
                        result,
                        theme: app.theme,
                    },
                    card,
                );
            }
        }
        AppScreen::Settings => {
            frame.render_widget(
                SettingsPanel {
                    config: &app.config,
                    theme: app.theme,
                },
                layout.main,
            );
        }
    }

    let hints = match app.screen {
        AppScreen::Menu => "[↑↓] navigate  [enter] select  [q] quit",
        AppScreen::Quiz => "[1-4] answer  [enter] next  [esc] abandon",
        AppScreen::Result => "[enter] again  [esc] menu",
        AppScreen::Settings => "[enter] theme  [r] reload words  [esc] back",
    };
    frame.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.muted()))
            .block(Block::bordered().border_style(Style::default().fg(colors.border()))),
        layout.footer,
    );

    if let Some(notification) = &app.notification {
        let banner = AppLayout::centered(layout.header, frame.area().width.saturating_sub(8), 3);
        frame.render_widget(
            NotificationBanner {
                notification,
                theme: app.theme,
            },
            banner,
        );
    }
}
