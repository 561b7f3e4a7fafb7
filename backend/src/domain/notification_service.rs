//! Centralized handling of upstream backend failures.
//!
//! Every failed request is classified once here: 401 forces a logout, 403
//! asks the host to show the forbidden notice, and anything else becomes a
//! short-lived notification. The current notification is published on a
//! `watch` channel and cleared automatically after the configured TTL unless
//! a newer one replaced it first.

use chrono::Utc;
use log::{error, info, warn};
use shared::{BackendFailure, ErrorNotification, FailureAction};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    current: Arc<watch::Sender<Option<ErrorNotification>>>,
    ttl: Duration,
}

impl NotificationService {
    pub fn new(ttl: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
            ttl,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ErrorNotification>> {
        self.current.subscribe()
    }

    pub fn current(&self) -> Option<ErrorNotification> {
        self.current.borrow().clone()
    }

    /// Map a failure to the action the host must take. Pure.
    pub fn classify(&self, failure: &BackendFailure) -> FailureAction {
        let backend_message = failure
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        let notification = |code: &str, message: &str| ErrorNotification {
            id: Uuid::new_v4(),
            message: message.to_string(),
            code: code.to_string(),
            status: failure.status,
            created_at: Utc::now(),
        };

        let Some(status) = failure.status else {
            return FailureAction::Notify(notification(
                "CLIENT_ERROR",
                "Erro de conexão. Verifique sua internet e tente novamente.",
            ));
        };

        match status {
            401 => FailureAction::ForceLogout(notification(
                "UNAUTHORIZED",
                "Sessão expirada. Por favor, faça login novamente.",
            )),
            403 => FailureAction::ForbiddenRedirect(notification(
                "FORBIDDEN",
                "Você não tem permissão para realizar esta ação.",
            )),
            400 => FailureAction::Notify(notification(
                "BAD_REQUEST",
                backend_message.unwrap_or("Dados inválidos. Verifique os campos e tente novamente."),
            )),
            404 => FailureAction::Notify(notification("NOT_FOUND", "Recurso não encontrado.")),
            409 => FailureAction::Notify(notification(
                "CONFLICT",
                backend_message.unwrap_or("Conflito. Este recurso já existe."),
            )),
            422 => FailureAction::Notify(notification(
                "UNPROCESSABLE_ENTITY",
                backend_message.unwrap_or("Dados inválidos. Verifique os campos."),
            )),
            500 => FailureAction::Notify(notification(
                "INTERNAL_SERVER_ERROR",
                "Erro interno do servidor. Tente novamente mais tarde.",
            )),
            503 => FailureAction::Notify(notification(
                "SERVICE_UNAVAILABLE",
                "Serviço temporariamente indisponível. Tente novamente mais tarde.",
            )),
            _ => FailureAction::Notify(notification(
                "UNKNOWN_ERROR",
                backend_message.unwrap_or("Erro inesperado. Tente novamente."),
            )),
        }
    }

    /// Classify, publish the notification and schedule its auto-dismiss
    pub fn handle(&self, failure: &BackendFailure) -> FailureAction {
        let action = self.classify(failure);
        let notification = action.notification().clone();

        match &action {
            FailureAction::ForceLogout(_) | FailureAction::ForbiddenRedirect(_) => {
                info!("🔔 NOTIFY: {} -> {}", notification.code, notification.message);
            }
            FailureAction::Notify(_) => {
                error!("🔔 NOTIFY: HTTP error {:?} {}: {}", notification.status, notification.code, notification.message);
            }
        }

        let id = notification.id;
        self.current.send_replace(Some(notification));
        self.schedule_dismiss(id);

        action
    }

    pub fn dismiss(&self) {
        self.current.send_replace(None);
    }

    /// Clear the current notification only if it is still `id`
    pub fn dismiss_if(&self, id: Uuid) -> bool {
        self.current.send_if_modified(|current| match current {
            Some(notification) if notification.id == id => {
                *current = None;
                true
            }
            _ => false,
        })
    }

    fn schedule_dismiss(&self, id: Uuid) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("🔔 NOTIFY: No async runtime, notification {} will not auto-dismiss", id);
            return;
        };

        let service = self.clone();
        let ttl = self.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if service.dismiss_if(id) {
                info!("🔔 NOTIFY: Auto-dismissed notification {}", id);
            }
        });
    }
}
