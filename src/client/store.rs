//! Shared client state with typed actions.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientState {
    pub is_login: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `SET_LOGIN { isLogin }`
    SetLogin { is_login: bool },
}

impl ClientState {
    fn reduce(self, action: Action) -> Self {
        match action {
            Action::SetLogin { is_login } => ClientState { is_login },
        }
    }
}

/// Holds [`ClientState`]. Cloning shares the same underlying state, so pass
/// clones to whoever needs to read or dispatch.
#[derive(Debug, Clone)]
pub struct AppStore {
    sender: Arc<watch::Sender<ClientState>>,
}

impl AppStore {
    pub fn new(initial: ClientState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn state(&self) -> ClientState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClientState> {
        self.sender.subscribe()
    }

    pub fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.sender.send_modify(|state| *state = state.reduce(action));
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(ClientState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_notifies_subscribers() {
        let store = AppStore::default();
        let mut receiver = store.subscribe();

        store.dispatch(Action::SetLogin { is_login: true });

        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_login);
        assert!(store.state().is_login);
    }

    #[test]
    fn test_clones_share_state() {
        let store = AppStore::default();
        let other = store.clone();

        other.dispatch(Action::SetLogin { is_login: true });
        assert!(store.state().is_login);

        store.dispatch(Action::SetLogin { is_login: false });
        assert!(!other.state().is_login);
    }
}
