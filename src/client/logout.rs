use crate::client::forms::Navigation;
use crate::client::storage::{ClientStorage, IS_LOGIN, REMEMBER_ME};
use crate::client::store::{Action, AppStore};

/// Clears the persisted login flags, marks the store logged out and sends
/// the user to the root path. Purely client side.
pub fn logout(storage: &dyn ClientStorage, store: &AppStore) -> Navigation {
    for key in [IS_LOGIN, REMEMBER_ME] {
        if let Err(e) = storage.set_flag(key, false) {
            tracing::warn!("Failed to clear {}: {}", key, e);
        }
    }
    store.dispatch(Action::SetLogin { is_login: false });
    Navigation::HOME
}
