use crate::config::Config;
use crate::coordinator::{ToggleCoordinator, ToggleOutcome};
use crate::gateway::{GatewayClient, GatewayError};
use crate::registry::RuleRegistry;
use crate::workflow::{CheckResult, InputCheckWorkflow};
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Info,
    Error,
}

/// Transient banner with its own dismissal deadline. Overwriting the alert
/// replaces the deadline as well, so a stale timer from an earlier alert can
/// never dismiss a fresh one.
pub struct Alert {
    pub text: String,
    pub kind: AlertKind,
    deadline: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    Disconnected(String),
}

/// What the rules tab shows: the loaded list, or a persistent inline error
/// replacing it when the initial fetch failed.
pub enum RulesView {
    Loading,
    Loaded,
    FetchFailed(String),
}

/// Completion notification from a spawned request task. Requests run off the
/// event loop so the dashboard keeps rendering while they are in flight; the
/// loop drains these on every poll tick.
pub enum UiEvent {
    ToggleSettled { id: String, outcome: ToggleOutcome },
    ToggleFault(String),
    CheckSettled(CheckResult),
}

pub struct App {
    pub current_tab: usize,
    pub registry: Arc<RwLock<RuleRegistry>>,
    pub coordinator: Arc<ToggleCoordinator>,
    workflow: Arc<Mutex<InputCheckWorkflow>>,
    gateway: Arc<GatewayClient>,
    pub rules_view: RulesView,
    pub home_message: Option<String>,
    pub connection_status: ConnectionStatus,
    pub selected_rule: usize,
    pub input_buffer: String,
    /// Presentation mirror of the workflow's in-flight state, owned by the
    /// event loop thread so the check tab can render without locking.
    pub check_in_flight: bool,
    pub check_result: Option<CheckResult>,
    pub alert: Option<Alert>,
    pub last_refreshed: Option<chrono::DateTime<chrono::Local>>,
    alert_ttl: Duration,
    events_tx: mpsc::UnboundedSender<UiEvent>,
    events_rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl App {
    pub fn new(gateway: Arc<GatewayClient>, config: &Config) -> Self {
        let registry = Arc::new(RwLock::new(RuleRegistry::new()));
        let coordinator = Arc::new(ToggleCoordinator::new(gateway.clone(), registry.clone()));
        let workflow = Arc::new(Mutex::new(InputCheckWorkflow::new(gateway.clone())));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            current_tab: 0,
            registry,
            coordinator,
            workflow,
            gateway,
            rules_view: RulesView::Loading,
            home_message: None,
            connection_status: ConnectionStatus::Connecting,
            selected_rule: 0,
            input_buffer: String::new(),
            check_in_flight: false,
            check_result: None,
            alert: None,
            last_refreshed: None,
            alert_ttl: Duration::from_secs(config.ui.alert_ttl_seconds),
            events_tx,
            events_rx,
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % 4;
    }

    pub fn previous_tab(&mut self) {
        if self.current_tab > 0 {
            self.current_tab -= 1;
        } else {
            self.current_tab = 3;
        }
    }

    pub fn select_previous_rule(&mut self) {
        if self.selected_rule > 0 {
            self.selected_rule -= 1;
        }
    }

    pub async fn select_next_rule(&mut self) {
        let count = self.registry.read().await.len();
        if count > 0 && self.selected_rule < count - 1 {
            self.selected_rule += 1;
        }
    }

    pub fn post_alert(&mut self, text: impl Into<String>, kind: AlertKind) {
        self.alert = Some(Alert {
            text: text.into(),
            kind,
            deadline: Instant::now() + self.alert_ttl,
        });
    }

    /// Called every poll tick. Drops the banner once its own deadline has
    /// passed; last posted alert wins.
    pub fn expire_alert(&mut self) {
        let expired = self
            .alert
            .as_ref()
            .is_some_and(|alert| Instant::now() >= alert.deadline);
        if expired {
            self.alert = None;
        }
    }

    /// Applies settled request events. Called once per poll tick, before
    /// drawing.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ToggleSettled { id, outcome } => match outcome {
                ToggleOutcome::Applied { enabled } => {
                    let state = if enabled { "enabled" } else { "disabled" };
                    self.post_alert(format!("Rule {} {}", id, state), AlertKind::Info);
                }
                ToggleOutcome::Dropped => {}
                ToggleOutcome::Failed { message } => {
                    self.post_alert(message, AlertKind::Error);
                }
            },
            UiEvent::ToggleFault(message) => {
                error!("Toggle task failed: {}", message);
                self.post_alert(message, AlertKind::Error);
            }
            UiEvent::CheckSettled(result) => {
                self.check_in_flight = false;
                self.input_buffer.clear();
                self.check_result = Some(result);
            }
        }
    }

    /// Fetches home status and the rule list. A rules fetch failure replaces
    /// the list with a persistent inline error; a later successful refresh
    /// restores it.
    pub async fn refresh(&mut self) -> Result<()> {
        self.last_refreshed = Some(chrono::Local::now());

        match self.gateway.fetch_home_status().await {
            Ok(status) => {
                self.home_message = Some(status.message);
                self.connection_status = ConnectionStatus::Connected;
            }
            Err(e) => {
                self.connection_status = ConnectionStatus::Disconnected(e.to_string());
            }
        }

        match self.gateway.fetch_rules().await {
            Ok(rules) => {
                let count = rules.len();
                self.registry.write().await.replace_all(rules);
                self.rules_view = RulesView::Loaded;
                if count > 0 && self.selected_rule >= count {
                    self.selected_rule = count - 1;
                }
            }
            Err(e) => {
                let message = match e {
                    GatewayError::MalformedResponse(_) => {
                        format!("Failed to load protection rules: {}", e)
                    }
                    _ => "Failed to load protection rules.".to_string(),
                };
                // The registry keeps whatever was loaded before; only the
                // view switches to the error.
                self.rules_view = RulesView::FetchFailed(message);
            }
        }

        Ok(())
    }

    /// Spawns a toggle for the selected rule so the loop keeps rendering
    /// while the request is outstanding; the outcome arrives through the
    /// event channel. Repeat intents on a busy rule are debounced inside the
    /// coordinator, and the rules tab shows the busy marker until the task
    /// settles. A failed mutation posts a transient banner and leaves the
    /// loaded list intact.
    pub async fn toggle_selected(&mut self) {
        let id = {
            let registry = self.registry.read().await;
            match registry.rules().get(self.selected_rule) {
                Some(rule) => rule.id.clone(),
                None => return,
            }
        };

        let coordinator = self.coordinator.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match coordinator.toggle(&id).await {
                Ok(outcome) => {
                    let _ = tx.send(UiEvent::ToggleSettled { id, outcome });
                }
                Err(e) => {
                    let _ = tx.send(UiEvent::ToggleFault(e.to_string()));
                }
            }
        });
    }

    /// Spawns the check submission. The input stays on screen but frozen
    /// while the request is in flight and is cleared when the settle event
    /// is drained; the result line persists until the next submission.
    pub fn submit_input(&mut self) {
        if self.check_in_flight {
            return;
        }
        self.check_in_flight = true;

        let raw = self.input_buffer.clone();
        let workflow = self.workflow.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = workflow.lock().await.submit(&raw).await;
            let _ = tx.send(UiEvent::CheckSettled(result));
        });
    }

    pub fn render(&mut self, f: &mut Frame) {
        let has_alert = self.alert.is_some();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(if has_alert { 3 } else { 0 }),
                ]
                .as_ref(),
            )
            .split(f.size());

        super::tabs::render_tab_bar(f, chunks[0], self.current_tab, &self.connection_status);

        match self.current_tab {
            0 => super::tabs::overview::render(f, chunks[1], self),
            1 => super::tabs::rules::render(f, chunks[1], self),
            2 => super::tabs::check::render(f, chunks[1], self),
            3 => super::tabs::help::render(f, chunks[1]),
            _ => {}
        }

        if let Some(ref alert) = self.alert {
            super::tabs::render_alert(f, chunks[2], alert);
        }
    }
}
