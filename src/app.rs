use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::answer::process_answer;
use crate::engine::distractor;
use crate::engine::queue::build_queue;
use crate::engine::stats::StatsSnapshot;
use crate::session::quiz::QuizState;
use crate::session::result::SessionResult;
use crate::store::local::LocalCache;
use crate::store::remote::{DocumentStore, spawn_reconcile_theme, spawn_reconcile_word};
use crate::store::schema::WordSlot;
use crate::ui::components::menu::Menu;
use crate::ui::components::notification::Notification;
use crate::ui::theme::Theme;
use crate::vocab::WordRecord;
use crate::vocab::fetch::{self, VocabSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    Result,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub words: Vec<WordRecord>,
    pub vocab_source: VocabSource,
    pub stats: StatsSnapshot,
    pub quiz: Option<QuizState>,
    pub last_result: Option<SessionResult>,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    pub user: String,
    cache: Option<LocalCache>,
    store: Option<Arc<dyn DocumentStore>>,
    rng: SmallRng,
}

impl App {
    pub fn new(mut config: Config) -> Self {
        let user = config.profile.clone();

        let cache = LocalCache::new()
            .map_err(|err| warn!(%err, "local cache unavailable"))
            .ok();
        let store = build_store(&config);

        let mut notification = None;

        // Bootstrap: remote document first (refreshing the cache), local
        // cache on remote failure, empty state otherwise. Session start
        // waits on this; answers later never do.
        let stats = match store.as_deref().map(|s| s.load_document(&user)) {
            Some(Ok(Some(doc))) => {
                if let Some(theme_index) = doc.settings.theme_index {
                    config.theme_index = theme_index;
                }
                let snapshot = doc.to_snapshot();
                if let Some(ref cache) = cache {
                    if let Err(err) = cache.save_stats(&user, &snapshot) {
                        warn!(%err, "failed to refresh local stats cache");
                    }
                }
                snapshot
            }
            // New user: the first answer's fallback write creates the document.
            Some(Ok(None)) => StatsSnapshot::default(),
            Some(Err(err)) => {
                warn!(%err, "stats bootstrap failed, falling back to local cache");
                notification =
                    Some(Notification::error("Stats sync unavailable, using local copy"));
                cache
                    .as_ref()
                    .map(|c| c.load_stats(&user))
                    .unwrap_or_default()
            }
            None => cache
                .as_ref()
                .map(|c| c.load_stats(&user))
                .unwrap_or_default(),
        };

        let (words, vocab_source) =
            fetch::load_vocabulary(&config.source_url, config.fetch_timeout_secs);
        info!(count = words.len(), ?vocab_source, "vocabulary loaded");

        let theme: &'static Theme = Box::leak(Box::new(Theme::load_by_index(config.theme_index)));
        let menu = Menu::new(theme);

        Self {
            screen: AppScreen::Menu,
            config,
            theme,
            menu,
            words,
            vocab_source,
            stats,
            quiz: None,
            last_result: None,
            notification,
            should_quit: false,
            user,
            cache,
            store,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn start_quiz(&mut self) {
        if self.words.len() < distractor::OPTION_COUNT {
            self.notify(Notification::error(format!(
                "Need at least {} words loaded",
                distractor::OPTION_COUNT
            )));
            return;
        }

        let queue = build_queue(
            &self.words,
            &self.stats,
            self.config.session_size,
            self.config.mastery_threshold,
            &mut self.rng,
        );
        if queue.is_empty() {
            self.notify(Notification::success("All words mastered, nothing to review"));
            return;
        }

        self.quiz = Some(QuizState::new(queue));
        self.load_options();
        self.screen = AppScreen::Quiz;
    }

    fn load_options(&mut self) {
        let options = match self.quiz.as_ref().and_then(|q| q.current()) {
            Some(current) => distractor::build_options(&self.words, current, &mut self.rng),
            None => return,
        };
        if let (Some(options), Some(quiz)) = (options, self.quiz.as_mut()) {
            quiz.options = options;
        }
    }

    /// Submit the option at `option_index`. The stats update is applied and
    /// visible immediately; the durable write happens on a detached thread
    /// and its outcome is never awaited.
    pub fn answer(&mut self, option_index: usize) {
        let (target, submitted) = match self.quiz.as_ref() {
            Some(quiz) if quiz.awaiting_answer() => {
                let Some(current) = quiz.current() else { return };
                let Some(option) = quiz.options.get(option_index) else {
                    return;
                };
                (current.word.clone(), option.word.clone())
            }
            _ => return,
        };

        let outcome = process_answer(&self.stats, &target, &submitted);
        self.stats = outcome.stats;
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.reveal(option_index, outcome.correct);
        }

        if let Some(ref cache) = self.cache {
            if let Err(err) = cache.save_stats(&self.user, &self.stats) {
                warn!(%err, "failed to write local stats cache");
            }
        }
        if let Some(ref store) = self.store {
            spawn_reconcile_word(
                Arc::clone(store),
                self.user.clone(),
                target,
                WordSlot::from(outcome.stat),
            );
        }
    }

    /// Advance past a revealed answer once its display delay has elapsed.
    pub fn tick(&mut self) {
        if self.notification.as_ref().is_some_and(|n| n.expired()) {
            self.notification = None;
        }

        if self.screen != AppScreen::Quiz {
            return;
        }
        let finished = match self.quiz.as_mut() {
            Some(quiz) if quiz.reveal_elapsed() => {
                quiz.advance();
                quiz.is_complete()
            }
            _ => return,
        };

        if finished {
            self.last_result = self.quiz.as_ref().map(SessionResult::from_quiz);
            self.quiz = None;
            self.screen = AppScreen::Result;
        } else {
            self.load_options();
        }
    }

    pub fn abandon_quiz(&mut self) {
        self.quiz = None;
        self.screen = AppScreen::Menu;
    }

    pub fn cycle_theme(&mut self) {
        let count = Theme::available_themes().len().max(1);
        self.config.theme_index = (self.config.theme_index + 1) % count;

        let theme: &'static Theme =
            Box::leak(Box::new(Theme::load_by_index(self.config.theme_index)));
        self.theme = theme;
        self.menu.theme = theme;

        if let Err(err) = self.config.save() {
            warn!(%err, "failed to save config");
        }
        // Same targeted-write-then-fallback merge as word counters.
        if let Some(ref store) = self.store {
            spawn_reconcile_theme(
                Arc::clone(store),
                self.user.clone(),
                self.config.theme_index,
            );
        }
    }

    pub fn reload_vocabulary(&mut self) {
        if self.config.source_url.is_empty() {
            self.notify(Notification::error("No source URL configured"));
            return;
        }
        let (words, source) =
            fetch::load_vocabulary(&self.config.source_url, self.config.fetch_timeout_secs);
        if source == VocabSource::Remote {
            self.notify(Notification::success(format!("Loaded {} words", words.len())));
            self.words = words;
            self.vocab_source = source;
        } else {
            self.notify(Notification::error("Failed to load vocabulary"));
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}

#[cfg(feature = "network")]
fn build_store(config: &Config) -> Option<Arc<dyn DocumentStore>> {
    if config.remote_url.is_empty() {
        return None;
    }
    match crate::store::http::HttpStore::new(&config.remote_url, config.remote_timeout_secs) {
        Ok(store) => Some(Arc::new(store)),
        Err(err) => {
            warn!(%err, "remote store unavailable");
            None
        }
    }
}

#[cfg(not(feature = "network"))]
fn build_store(_config: &Config) -> Option<Arc<dyn DocumentStore>> {
    None
}
