//! Session - the workspace state a frontend binds to
//!
//! Composes the file tree, open tabs, side panels and the two interaction
//! logs, and keeps the selected path consistent with the active tab.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command     ┌──────────────────┐
//! │   Any frontend    │ ─────────────→│     Session      │
//! │ (REPL, JSON, GUI) │               │  tree tabs logs  │
//! │                   │ ←─────────────│  scheduler       │
//! └───────────────────┘  Notification └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Command, LumenConfig, Notification, Session};
//!
//! let mut session = Session::demo(&LumenConfig::default())?;
//! session.send(Command::select_file("/README.md"))?;
//! session.send(Command::submit_message("hello"))?;
//! session.send(Command::advance(1000))?;
//!
//! while let Some(notif) = session.poll_notification() {
//!     if let Notification::EntryAppended { content, .. } = notif {
//!         println!("{}", content);
//!     }
//! }
//! ```

use crate::commands::Command;
use crate::config::LumenConfig;
use crate::content::{ContentResolver, StaticContent};
use crate::demo;
use crate::error::{LumenError, Result};
use crate::language::classify;
use crate::log::{Acknowledge, ConsoleLog, ConversationLog, Echo, FollowUp};
use crate::notifications::Notification;
use crate::panels::{PanelId, PanelRouter};
use crate::scheduler::Scheduler;
use crate::snapshot::{SessionSnapshot, ViewerState};
use crate::tabs::TabSet;
use crate::tree::{CatalogEntry, FileTree};
use crate::types::{Channel, EntryId, NodeId, TabId};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::time::Duration;

/// Workspace session state
pub struct Session {
    tree: FileTree,
    tabs: TabSet,
    panels: PanelRouter,
    conversation: ConversationLog,
    console: ConsoleLog,

    /// Pending follow-ups for both logs
    scheduler: Scheduler<FollowUp>,

    /// Path shown in the viewer; follows the active tab
    selected_path: Option<String>,

    /// Document text lookup
    content: Box<dyn ContentResolver>,

    model: String,
    models: Vec<String>,
    agents: Vec<String>,

    /// Notification sender (to frontend)
    notification_tx: Sender<Notification>,

    /// Notification receiver (for frontend to poll)
    notification_rx: Receiver<Notification>,

    closed: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selected_path", &self.selected_path)
            .field("tabs", &self.tabs.len())
            .field("panel", &self.panels.active())
            .field("now", &self.scheduler.now())
            .field("pending", &self.scheduler.pending())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Session {
    /// Create an empty session over `tree`
    ///
    /// No tabs are open and both logs start empty.
    pub fn new(
        tree: FileTree,
        content: impl ContentResolver + 'static,
        config: &LumenConfig,
    ) -> Result<Self> {
        config.validate()?;

        let (notification_tx, notification_rx) = bounded(config.session.notification_capacity);

        let mut conversation = ConversationLog::new(
            config.session.conversation_delay(),
            Acknowledge::new(config.assistant.reply.clone()),
        );
        conversation.set_agent(Some(config.assistant.agent.clone()));
        let console = ConsoleLog::new(
            config.session.console_delay(),
            Echo::new(config.console.echo_prefix.clone()),
        );

        tracing::info!(
            root = %tree.root().name,
            model = %config.assistant.model,
            "session started"
        );

        Ok(Self {
            tree,
            tabs: TabSet::new(),
            panels: PanelRouter::new(),
            conversation,
            console,
            scheduler: Scheduler::new(),
            selected_path: None,
            content: Box::new(content),
            model: config.assistant.model.clone(),
            models: config.assistant.models.clone(),
            agents: config.assistant.agents.clone(),
            notification_tx,
            notification_rx,
            closed: false,
        })
    }

    /// The sample project, optionally with its open tabs and history
    pub fn demo(config: &LumenConfig) -> Result<Self> {
        let tree = FileTree::new(&demo::catalog())?;
        let mut session = Self::new(tree, demo::contents(), config)?;

        if config.session.seed_demo_history {
            for (path, dirty) in demo::OPEN_TABS {
                let name = crate::tree::file_name(path);
                let id = session.tabs.open(path, name);
                session.tabs.mark_dirty(id, dirty);
            }
            let first = session.tabs.as_slice().first().map(|t| t.id);
            if let Some(first) = first {
                session.tabs.activate(first);
            }
            session.selected_path = session.tabs.active().map(|t| t.path.clone());

            demo::seed_conversation(&mut session.conversation);
            demo::seed_console(&mut session.console);
        }
        Ok(session)
    }

    /// Build from the configured catalog, or the demo when none is set
    pub fn from_config(config: &LumenConfig) -> Result<Self> {
        match &config.workspace.catalog {
            Some(path) => {
                let catalog = CatalogEntry::load(path)?;
                Self::new(FileTree::new(&catalog)?, StaticContent::new(), config)
            }
            None => Self::demo(config),
        }
    }

    // ========== Command facade ==========

    /// Apply a command
    ///
    /// Stale references are ignored. User input errors are returned and
    /// also published as [`Notification::InputRejected`].
    pub fn send(&mut self, command: Command) -> Result<()> {
        if self.closed {
            return Err(LumenError::SessionClosed);
        }

        match command {
            Command::SelectFile { path } => self.select_file(&path),
            Command::ClickTab { id } => self.click_tab(id),
            Command::CloseTab { id } => self.close_tab(id),
            Command::MarkDirty { id, dirty } => self.mark_dirty(id, dirty),
            Command::SelectPanel { panel } => self.select_panel(panel),
            Command::SetTreeFilter { query } => self.set_tree_filter(query),
            Command::ToggleFolder { id } => self.toggle_folder(&id),
            Command::ExpandFolder { id } => self.expand_folder(&id),
            Command::CollapseFolder { id } => self.collapse_folder(&id),
            Command::SubmitMessage { text } => {
                self.submit_message(&text)?;
            }
            Command::SubmitCommand { text } => {
                self.submit_command(&text)?;
            }
            Command::SelectModel { model } => self.select_model(&model)?,
            Command::SelectAgent { agent } => self.select_agent(&agent)?,
            Command::Advance { ms } => {
                self.advance(Duration::from_millis(ms));
            }
            Command::GetSnapshot => self.publish_snapshot(),
            Command::Shutdown => {
                self.shutdown();
            }
        }
        Ok(())
    }

    /// Poll for notifications (non-blocking)
    pub fn poll_notification(&self) -> Option<Notification> {
        self.notification_rx.try_recv().ok()
    }

    // ========== Files and tabs ==========

    /// Open a catalog file in a tab and show it
    ///
    /// The selected path is set even when the tab was already open.
    /// Unknown paths and folders are ignored.
    pub fn select_file(&mut self, path: &str) {
        if self.ignore_when_closed("select_file") {
            return;
        }
        let Some(name) = self
            .tree
            .find_by_path(path)
            .filter(|n| n.is_file())
            .map(|n| n.name.clone())
        else {
            tracing::debug!(path, "select ignored: not a catalog file");
            return;
        };

        self.tabs.open(path, name);
        self.selected_path = Some(path.to_string());
        self.publish_snapshot();
    }

    pub fn click_tab(&mut self, id: TabId) {
        if self.ignore_when_closed("click_tab") || !self.tabs.activate(id) {
            return;
        }
        self.sync_selection();
        self.publish_snapshot();
    }

    /// Close a tab; the selection follows whichever tab is active afterwards
    pub fn close_tab(&mut self, id: TabId) {
        if self.ignore_when_closed("close_tab") || self.tabs.close(id).is_none() {
            return;
        }
        self.sync_selection();
        self.publish_snapshot();
    }

    pub fn mark_dirty(&mut self, id: TabId, dirty: bool) {
        if self.ignore_when_closed("mark_dirty") {
            return;
        }
        if self.tabs.mark_dirty(id, dirty) {
            self.publish_snapshot();
        } else {
            tracing::debug!(tab = %id, "mark_dirty ignored: no such tab");
        }
    }

    fn sync_selection(&mut self) {
        self.selected_path = self.tabs.active().map(|t| t.path.clone());
    }

    // ========== Panels and tree ==========

    pub fn select_panel(&mut self, panel: PanelId) {
        if self.ignore_when_closed("select_panel") {
            return;
        }
        self.panels.select(panel);
        self.publish_snapshot();
    }

    pub fn set_tree_filter(&mut self, query: impl Into<String>) {
        if self.ignore_when_closed("set_tree_filter") {
            return;
        }
        self.tree.set_filter(query);
        self.publish_snapshot();
    }

    pub fn toggle_folder(&mut self, id: &NodeId) {
        if self.ignore_when_closed("toggle_folder") {
            return;
        }
        if self.is_folder(id) {
            self.tree.toggle(id);
            self.publish_snapshot();
        } else {
            tracing::debug!(node = %id, "toggle ignored: not a folder");
        }
    }

    pub fn expand_folder(&mut self, id: &NodeId) {
        if self.ignore_when_closed("expand_folder") {
            return;
        }
        if self.is_folder(id) {
            self.tree.expand(id);
            self.publish_snapshot();
        }
    }

    pub fn collapse_folder(&mut self, id: &NodeId) {
        if self.ignore_when_closed("collapse_folder") {
            return;
        }
        if self.is_folder(id) {
            self.tree.collapse(id);
            self.publish_snapshot();
        }
    }

    fn is_folder(&self, id: &NodeId) -> bool {
        self.tree.find(id).is_some_and(|n| n.is_folder())
    }

    // ========== Interaction logs ==========

    /// Send a message to the assistant
    pub fn submit_message(&mut self, text: &str) -> Result<EntryId> {
        self.ensure_open()?;
        let submitted = self.conversation.submit(text, &mut self.scheduler);
        self.after_submit(Channel::Conversation, submitted)
    }

    /// Run a command in the console
    pub fn submit_command(&mut self, text: &str) -> Result<EntryId> {
        self.ensure_open()?;
        let submitted = self.console.submit(text, &mut self.scheduler);
        self.after_submit(Channel::Console, submitted)
    }

    fn after_submit(&mut self, channel: Channel, submitted: Result<EntryId>) -> Result<EntryId> {
        match submitted {
            Ok(id) => {
                self.publish_snapshot();
                Ok(id)
            }
            Err(err) => {
                self.publish(Notification::input_rejected(Some(channel), err.to_string()));
                Err(err)
            }
        }
    }

    /// Pick one of the configured models
    pub fn select_model(&mut self, model: &str) -> Result<()> {
        self.ensure_open()?;
        if !self.models.iter().any(|m| m == model) {
            let err = LumenError::not_found(format!("model '{}'", model));
            self.publish(Notification::input_rejected(None, err.to_string()));
            return Err(err);
        }
        self.model = model.to_string();
        self.publish_snapshot();
        Ok(())
    }

    /// Pick the agent future assistant replies are attributed to
    pub fn select_agent(&mut self, agent: &str) -> Result<()> {
        self.ensure_open()?;
        if !self.agents.iter().any(|a| a == agent) {
            let err = LumenError::not_found(format!("agent '{}'", agent));
            self.publish(Notification::input_rejected(None, err.to_string()));
            return Err(err);
        }
        self.conversation.set_agent(Some(agent.to_string()));
        self.publish_snapshot();
        Ok(())
    }

    // ========== Time ==========

    /// Move the clock and deliver every follow-up that came due
    ///
    /// Returns how many entries were appended. After shutdown nothing is
    /// delivered.
    pub fn advance(&mut self, by: Duration) -> usize {
        if self.closed {
            return 0;
        }

        let fired = self.scheduler.advance(by);
        let delivered = fired.len();
        for task in fired {
            let follow_up = task.payload;
            let appended = match follow_up.channel {
                Channel::Conversation => self
                    .conversation
                    .deliver(&follow_up, task.due)
                    .map(|e| (e.id, e.content.clone())),
                Channel::Console => self
                    .console
                    .deliver(&follow_up, task.due)
                    .map(|e| (e.id, e.content.clone())),
            };
            if let Some((id, content)) = appended {
                self.publish(Notification::EntryAppended {
                    channel: follow_up.channel,
                    id,
                    content,
                });
            }
        }

        if delivered > 0 {
            self.publish_snapshot();
        }
        delivered
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_follow_ups(&self) -> usize {
        self.scheduler.pending()
    }

    /// Cancel outstanding follow-ups and close the session
    ///
    /// Returns how many follow-ups were dropped. Calling it again is harmless.
    pub fn shutdown(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        let cancelled = self.scheduler.cancel_all();
        self.closed = true;
        tracing::info!(cancelled, "session shut down");
        self.publish(Notification::ShuttingDown { cancelled });
        cancelled
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(LumenError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn ignore_when_closed(&self, operation: &str) -> bool {
        if self.closed {
            tracing::debug!(operation, "ignored: session is closed");
        }
        self.closed
    }

    // ========== Projections ==========

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selected_path: self.selected_path.clone(),
            tabs: self.tabs.as_slice().to_vec(),
            active_panel: self.panels.active(),
            side_view: self.panels.side_view(),
            conversation: self.conversation.entries().to_vec(),
            console: self.console.entries().to_vec(),
            filter: self.tree.filter().to_string(),
            tree: self.tree.visible_rows(),
            model: self.model.clone(),
            agent: self.conversation.agent().unwrap_or_default().to_string(),
            now_ms: self.scheduler.now_ms(),
        }
    }

    /// What the content viewer shows for the active tab
    pub fn viewer(&self) -> ViewerState {
        let Some(tab) = self.tabs.active() else {
            return ViewerState::Empty;
        };
        let document = self.content.resolve(&tab.path);
        ViewerState::Document {
            path: tab.path.clone(),
            name: tab.name.clone(),
            language: classify(&tab.name).language.to_string(),
            syntax: document.as_ref().map(|d| d.language.clone()),
            content: document.map(|d| d.content),
            is_dirty: tab.is_dirty,
        }
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn active_panel(&self) -> PanelId {
        self.panels.active()
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    // ========== Notifications ==========

    fn publish_snapshot(&self) {
        self.publish(Notification::snapshot_changed(self.snapshot()));
    }

    fn publish(&self, notification: Notification) {
        match self.notification_tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("notification channel full, dropping notification");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("notification channel disconnected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{ConsoleKind, ConversationKind};
    use crate::panels::SideView;
    use crate::snapshot::{format_size, StatusLine};
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn demo() -> Session {
        Session::demo(&LumenConfig::default()).unwrap()
    }

    fn blank() -> Session {
        let mut config = LumenConfig::default();
        config.session.seed_demo_history = false;
        Session::demo(&config).unwrap()
    }

    fn drain(session: &Session) -> Vec<Notification> {
        std::iter::from_fn(|| session.poll_notification()).collect()
    }

    fn tab_id(session: &Session, path: &str) -> TabId {
        session.tabs().find_by_path(path).unwrap().id
    }

    #[test]
    fn test_demo_initial_state() {
        let session = demo();
        assert_eq!(session.selected_path(), Some("/src/main.py"));
        assert_eq!(session.tabs().len(), 3);
        assert_eq!(session.tabs().dirty_count(), 1);
        assert_eq!(session.conversation().len(), 3);
        assert_eq!(session.console().len(), 7);
        assert_eq!(session.snapshot().agent, "Builder");
    }

    #[test]
    fn test_blank_demo_has_no_tabs() {
        let session = blank();
        assert!(session.tabs().is_empty());
        assert_eq!(session.selected_path(), None);
        assert!(session.conversation().is_empty());
        assert!(session.viewer().is_empty());
    }

    #[test]
    fn test_select_readme_while_main_active() {
        let mut session = blank();
        session.select_file("/src/main.py");
        session.select_file("/README.md");

        assert_eq!(session.selected_path(), Some("/README.md"));
        assert_eq!(session.tabs().len(), 2);
        assert!(!session.tabs().find_by_path("/src/main.py").unwrap().is_active);
    }

    #[test]
    fn test_reselecting_open_file_moves_selection() {
        let mut session = demo();
        session.select_file("/src/config.py");
        session.select_file("/src/main.py");

        assert_eq!(session.tabs().len(), 3);
        assert_eq!(session.selected_path(), Some("/src/main.py"));
        assert_eq!(session.tabs().active().unwrap().path, "/src/main.py");
    }

    #[test]
    fn test_select_folder_or_unknown_is_ignored() {
        let mut session = demo();
        drain(&session);

        session.select_file("/src");
        session.select_file("/nope.txt");

        assert_eq!(session.tabs().len(), 3);
        assert_eq!(session.selected_path(), Some("/src/main.py"));
        assert!(drain(&session).is_empty());
    }

    #[test]
    fn test_click_tab_moves_selection() {
        let mut session = demo();
        let readme = tab_id(&session, "/README.md");
        session.click_tab(readme);
        assert_eq!(session.selected_path(), Some("/README.md"));

        session.click_tab(TabId::new(99));
        assert_eq!(session.selected_path(), Some("/README.md"));
    }

    #[test]
    fn test_close_active_tab_selects_first_remaining() {
        let mut session = demo();
        let config = tab_id(&session, "/src/config.py");
        session.click_tab(config);
        session.close_tab(config);

        assert_eq!(session.selected_path(), Some("/src/main.py"));
        assert!(session.tabs().is_consistent());
    }

    #[test]
    fn test_close_all_tabs_clears_selection() {
        let mut session = demo();
        let ids: Vec<_> = session.tabs().iter().map(|t| t.id).collect();
        for id in ids {
            session.close_tab(id);
            let active = session.tabs().active().map(|t| t.path.as_str());
            assert_eq!(session.selected_path(), active);
        }
        assert_eq!(session.selected_path(), None);
        assert_eq!(session.viewer(), ViewerState::Empty);
    }

    #[test]
    fn test_viewer_resolves_content() {
        let session = demo();
        match session.viewer() {
            ViewerState::Document {
                name,
                language,
                syntax,
                content,
                ..
            } => {
                assert_eq!(name, "main.py");
                assert_eq!(language, "Python");
                assert_eq!(syntax.as_deref(), Some("python"));
                assert!(content.unwrap().contains("def main"));
            }
            ViewerState::Empty => panic!("expected a document"),
        }
    }

    #[test]
    fn test_viewer_without_content() {
        let mut session = demo();
        session.select_file("/src/utils.py");
        match session.viewer() {
            ViewerState::Document { path, content, .. } => {
                assert_eq!(path, "/src/utils.py");
                assert_eq!(content, None);
            }
            ViewerState::Empty => panic!("expected a document"),
        }
    }

    #[test]
    fn test_panel_routing() {
        let mut session = demo();
        session.select_panel(PanelId::Extensions);
        assert_eq!(session.snapshot().side_view, SideView::Info(PanelId::Extensions));
        session.select_panel(PanelId::Explorer);
        assert_eq!(session.snapshot().side_view, SideView::FileTree);
    }

    #[test]
    fn test_filter_and_toggle_show_in_snapshot() {
        let mut session = demo();
        session.toggle_folder(&NodeId::new("src"));
        let names: Vec<_> = session.snapshot().tree.into_iter().map(|r| r.name).collect();
        assert!(names.contains(&"main.py".to_string()));

        session.set_tree_filter("CONFIG");
        let names: Vec<_> = session.snapshot().tree.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["my-project", "src", "config.py"]);
    }

    #[test]
    fn test_message_follow_up_timing() {
        let mut session = blank();
        session.submit_message("hello").unwrap();
        for text in ["a", "b", "c"] {
            session.advance(ms(100));
            session.submit_message(text).unwrap();
        }
        assert_eq!(session.conversation().len(), 4);
        assert_eq!(session.pending_follow_ups(), 4);

        session.advance(ms(999));
        let replies: Vec<_> = session
            .conversation()
            .entries()
            .iter()
            .filter(|e| e.kind == ConversationKind::Assistant)
            .map(|e| e.timestamp_ms)
            .collect();
        assert_eq!(replies, vec![1000, 1100, 1200]);

        session.advance(ms(1));
        assert_eq!(session.conversation().len(), 8);
        assert_eq!(session.pending_follow_ups(), 0);
    }

    #[test]
    fn test_console_and_chat_interleave_by_due_time() {
        let mut session = blank();
        session.submit_message("explain").unwrap();
        session.submit_command("ls").unwrap();
        drain(&session);

        session.advance(ms(2000));
        let appended: Vec<_> = drain(&session)
            .into_iter()
            .filter_map(|n| match n {
                Notification::EntryAppended { channel, content, .. } => Some((channel, content)),
                _ => None,
            })
            .collect();
        assert_eq!(
            appended,
            vec![
                (Channel::Console, "Executing: ls".to_string()),
                (Channel::Conversation, Acknowledge::DEFAULT_MESSAGE.to_string()),
            ]
        );
        assert_eq!(session.console().last().unwrap().kind, ConsoleKind::Output);
    }

    #[test]
    fn test_blank_submit_is_rejected_and_published() {
        let mut session = blank();
        drain(&session);

        let err = session.send(Command::submit_command("   ")).unwrap_err();
        assert!(err.is_user_input());
        assert!(session.console().is_empty());
        assert_eq!(session.pending_follow_ups(), 0);

        let notes = drain(&session);
        assert!(matches!(
            notes.as_slice(),
            [Notification::InputRejected {
                channel: Some(Channel::Console),
                ..
            }]
        ));
    }

    #[test]
    fn test_agent_attribution_follows_selection() {
        let mut session = blank();
        session.select_agent("Validator").unwrap();
        session.submit_message("check config.py").unwrap();
        session.advance(ms(1000));

        let reply = session.conversation().last().unwrap();
        assert_eq!(reply.agent.as_deref(), Some("Validator"));
        assert!(session.select_agent("Nobody").is_err());
    }

    #[test]
    fn test_select_model() {
        let mut session = blank();
        session.select_model("GPT-4").unwrap();
        assert_eq!(session.model(), "GPT-4");

        let err = session.select_model("GPT-9").unwrap_err();
        assert!(matches!(err, LumenError::NotFound(_)));
        assert_eq!(session.model(), "GPT-4");
    }

    #[test]
    fn test_shutdown_cancels_follow_ups() {
        let mut session = blank();
        session.submit_message("hello").unwrap();
        session.submit_command("ls").unwrap();

        assert_eq!(session.shutdown(), 2);
        assert_eq!(session.advance(ms(5000)), 0);
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.console().len(), 1);

        assert!(matches!(
            session.send(Command::GetSnapshot),
            Err(LumenError::SessionClosed)
        ));
        assert!(matches!(
            session.submit_message("again"),
            Err(LumenError::SessionClosed)
        ));
        assert_eq!(session.shutdown(), 0);
    }

    #[test]
    fn test_closed_session_ignores_every_mutation() {
        let mut session = demo();
        let before = session.snapshot();
        let readme = tab_id(&session, "/README.md");
        session.shutdown();
        drain(&session);

        session.select_file("/src/utils.py");
        session.click_tab(readme);
        session.close_tab(readme);
        session.mark_dirty(readme, false);
        session.select_panel(PanelId::Search);
        session.set_tree_filter("main");
        session.toggle_folder(&NodeId::new("src"));
        session.expand_folder(&NodeId::new("docs"));
        session.collapse_folder(&NodeId::new("root"));
        assert!(matches!(
            session.select_model("GPT-4"),
            Err(LumenError::SessionClosed)
        ));
        assert!(matches!(
            session.select_agent("Validator"),
            Err(LumenError::SessionClosed)
        ));

        assert_eq!(session.snapshot(), before);
        assert!(drain(&session).is_empty());
    }

    #[test]
    fn test_selection_tracks_active_tab_through_mixed_edits() {
        let mut session = demo();
        let check = |session: &Session| {
            let active = session.tabs().active().map(|t| t.path.as_str());
            assert_eq!(session.selected_path(), active);
            assert!(session.tabs().is_consistent());
        };
        check(&session);

        session.select_file("/src/utils.py");
        check(&session);
        let readme = tab_id(&session, "/README.md");
        session.click_tab(readme);
        check(&session);
        session.close_tab(tab_id(&session, "/src/main.py"));
        check(&session);
        session.select_file("/package.json");
        check(&session);
        session.close_tab(tab_id(&session, "/package.json"));
        check(&session);
        session.click_tab(tab_id(&session, "/src/utils.py"));
        check(&session);
        session.close_tab(readme);
        check(&session);
        session.select_file("/README.md");
        check(&session);
        assert_eq!(session.selected_path(), Some("/README.md"));

        let ids: Vec<_> = session.tabs().iter().map(|t| t.id).collect();
        for id in ids {
            session.close_tab(id);
            check(&session);
        }
        assert_eq!(session.selected_path(), None);
    }

    #[test]
    fn test_status_line_reports_size_and_activity() {
        let mut session = demo();
        let viewer = session.viewer();
        let status = StatusLine::new(&session.snapshot(), &viewer);
        assert_eq!(status.size, viewer.byte_len().map(format_size));
        assert_eq!(status.activity.as_deref(), Some("Just now"));

        session.advance(Duration::from_secs(180));
        let status = StatusLine::new(&session.snapshot(), &session.viewer());
        assert_eq!(status.activity.as_deref(), Some("3m ago"));
        assert!(status.to_string().ends_with(" | active 3m ago"));

        let idle = blank();
        let status = StatusLine::new(&idle.snapshot(), &idle.viewer());
        assert_eq!(status.size, None);
        assert_eq!(status.activity, None);
        assert_eq!(
            status.to_string(),
            "No file open | Explorer | Claude 3.5 Sonnet"
        );
    }

    #[test]
    fn test_send_maps_commands() {
        let mut session = blank();
        session.send(Command::select_file("/src/config.py")).unwrap();
        session.send(Command::select_panel(PanelId::Search)).unwrap();
        session.send(Command::submit_command("pytest")).unwrap();
        session.send(Command::advance(100)).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.selected_path.as_deref(), Some("/src/config.py"));
        assert_eq!(snap.active_panel, PanelId::Search);
        assert_eq!(snap.console.len(), 2);
        assert_eq!(snap.now_ms, 100);
    }

    #[test]
    fn test_every_change_publishes_a_snapshot() {
        let mut session = blank();
        drain(&session);

        session.send(Command::select_file("/README.md")).unwrap();
        let id = tab_id(&session, "/README.md");
        session.send(Command::mark_dirty(id, true)).unwrap();

        let notes = drain(&session);
        assert_eq!(notes.len(), 2);
        match &notes[1] {
            Notification::SnapshotChanged { snapshot } => {
                assert!(snapshot.tabs[0].is_dirty);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_full_channel_drops_notifications() {
        let mut config = LumenConfig::default();
        config.session.notification_capacity = 1;
        config.session.seed_demo_history = false;
        let mut session = Session::demo(&config).unwrap();

        session.select_panel(PanelId::Debug);
        session.select_panel(PanelId::Search);
        assert_eq!(drain(&session).len(), 1);
        assert_eq!(session.active_panel(), PanelId::Search);
    }

    #[test]
    fn test_from_config_loads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(
            &path,
            r#"{"name":"app","kind":"folder","children":[{"name":"lib.rs","kind":"file"}]}"#,
        )
        .unwrap();

        let mut config = LumenConfig::default();
        config.workspace.catalog = Some(path);
        let mut session = Session::from_config(&config).unwrap();

        session.select_file("/lib.rs");
        assert_eq!(session.selected_path(), Some("/lib.rs"));
        assert!(session.conversation().is_empty());
    }
}
