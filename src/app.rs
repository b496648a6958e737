use crate::chat::{ChatClient, Conversation};
use crate::starfield::{Starfield, Surface};
use crate::types::{Config, Message};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Top-level application state.
pub struct App {
    pub conversation: Conversation,
    /// Text in the composer. May span several lines.
    pub input: String,
    pub stars: Starfield,
    stars_enabled: bool,
    /// Lines scrolled back from the bottom of the transcript; 0 follows the latest.
    pub scroll_back: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: u64,
    client: ChatClient,
    reply_tx: mpsc::UnboundedSender<Message>,
    reply_rx: mpsc::UnboundedReceiver<Message>,
    pending: Option<JoinHandle<()>>,
    /// Brief status message shown in footer (e.g. "Copied!"), auto-clears.
    pub flash_message: Option<String>,
    pub flash_until: u64,
}

impl App {
    pub fn new(config: &Config, client: ChatClient) -> Self {
        let stars = Starfield::new(config.starfield.to_engine_config());
        let stars_enabled = config.starfield.enabled;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            stars,
            stars_enabled,
            scroll_back: 0,
            show_help: false,
            should_quit: false,
            tick: 0,
            client,
            reply_tx,
            reply_rx,
            pending: None,
            flash_message: None,
            flash_until: 0,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn can_send(&self) -> bool {
        self.conversation.can_send(&self.input)
    }

    /// Post the composer contents. The reply arrives later via [`App::poll_replies`].
    pub fn send_message(&mut self) {
        let Some(history) = self.conversation.begin_send(&self.input) else {
            return;
        };
        self.input.clear();
        self.follow_latest();

        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            let reply = client.reply(&history).await;
            let _ = tx.send(reply);
        }));
    }

    /// Called every loop iteration to pick up finished replies.
    pub fn poll_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            log::debug!("reply received ({} chars)", reply.content.len());
            self.conversation.finish(reply);
            self.pending = None;
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn follow_latest(&mut self) {
        self.scroll_back = 0;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn copy_last_reply(&mut self) {
        let Some(reply) = self.conversation.last_reply() else {
            self.flash("Nothing to copy.");
            return;
        };
        let text = reply.content.clone();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(_) => self.flash("Copied last reply to clipboard!"),
            Err(e) => {
                log::warn!("clipboard unavailable: {}", e);
                self.flash(&format!("Copy failed: {}", e));
            }
        }
    }

    fn flash(&mut self, message: &str) {
        self.flash_message = Some(message.to_string());
        self.flash_until = self.tick + 60;
    }

    /// Mount the starfield on `surface` if it is enabled and not yet running,
    /// then run its frame. The engine keeps itself idle while the surface
    /// has no size.
    pub fn animate_stars<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) {
        if !self.stars_enabled {
            return;
        }
        if !self.stars.is_running() {
            if !self.stars.start(&*surface, now) {
                return;
            }
            log::debug!("starfield started with {} stars", self.stars.star_count());
        } else if let Some(bounds) = surface.size() {
            self.stars.notify_resize(bounds);
        }
        if self.stars.frame_pending() {
            self.stars.frame(surface, now);
        }
    }

    /// Tear everything down: stop the animation and drop any in-flight request.
    pub fn quit(&mut self) {
        self.stars.stop();
        self.stars_enabled = false;
        if let Some(pending) = self.pending.take() {
            pending.abort();
            self.conversation.abandon();
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::Bounds;
    use crate::types::Role;
    use ratatui::style::Color;
    use std::time::Duration;

    struct FixedSurface(Option<Bounds>);

    impl Surface for FixedSurface {
        fn size(&self) -> Option<Bounds> {
            self.0
        }
        fn clear(&mut self) {}
        fn fill_disk(&mut self, _x: f64, _y: f64, _radius: f64, _color: Color) {}
    }

    fn app(config: Config) -> App {
        let client = ChatClient::new("http://127.0.0.1:9/chat", Duration::from_secs(1)).unwrap();
        App::new(&config, client)
    }

    #[tokio::test]
    async fn blank_input_is_not_sent() {
        let mut app = app(Config::default());
        app.input = "   ".into();

        app.send_message();

        assert_eq!(app.conversation.messages().len(), 1);
        assert!(!app.conversation.is_waiting());
        assert_eq!(app.input, "   ");
    }

    #[tokio::test]
    async fn sending_clears_input_and_quit_abandons_request() {
        let mut app = app(Config::default());
        app.input = "Hi".into();
        app.scroll_back = 5;

        app.send_message();

        assert!(app.input.is_empty());
        assert_eq!(app.scroll_back, 0);
        assert!(app.conversation.is_waiting());
        assert_eq!(app.conversation.messages()[1].role, Role::User);

        app.quit();
        assert!(app.should_quit);
        assert!(!app.conversation.is_waiting());
    }

    #[tokio::test]
    async fn stars_wait_for_a_sized_surface() {
        let mut app = app(Config::default());
        let now = Instant::now();

        app.animate_stars(&mut FixedSurface(None), now);
        assert!(!app.stars.is_running());

        let mut surface = FixedSurface(Some(Bounds::new(160.0, 96.0)));
        app.animate_stars(&mut surface, now + Duration::from_millis(16));
        assert!(app.stars.is_running());

        app.quit();
        app.animate_stars(&mut surface, now + Duration::from_millis(32));
        assert!(!app.stars.is_running());
    }

    #[tokio::test]
    async fn disabled_stars_never_start() {
        let mut config = Config::default();
        config.starfield.enabled = false;
        let mut app = app(config);

        app.animate_stars(&mut FixedSurface(Some(Bounds::new(80.0, 40.0))), Instant::now());

        assert!(!app.stars.is_running());
    }
}
