//! View controller for the user management screen.
//!
//! Sequences fetches and confirm-then-call mutations against a
//! [`UserApi`], reconciling each successful response into the owned
//! [`UserStore`]. Failures are caught here, turned into notifications, and
//! never touch local state.
//!
//! The store sits behind a mutex that is only held between awaits, so
//! actions on different records can run concurrently. A second action on a
//! record that already has one in flight is rejected with
//! [`ActionOutcome::Busy`].

pub mod prompt;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::{ListParams, UserApi};
use crate::models::{Notification, UserPatch, UserRecord};
use crate::store::UserStore;

pub use prompt::{AssumeYes, Confirm, NotificationLog, Notifier, Prompt};

/// Result of a controller operation, after notifications were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The call succeeded and local state was updated.
    Applied,
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
    /// Another action on the same record is still running.
    Busy,
    /// Nothing to do (empty edit, flag already in the requested state).
    Unchanged,
    /// The call failed; local state is as it was before.
    Failed,
}

impl ActionOutcome {
    pub fn is_failure(self) -> bool {
        self == ActionOutcome::Failed
    }
}

/// An edit bound to one record.
///
/// The payload is owned by the request, so a later edit of another record
/// cannot change what this one sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub id: String,
    pub patch: UserPatch,
}

impl EditRequest {
    pub fn new(id: impl Into<String>, patch: UserPatch) -> Self {
        Self { id: id.into(), patch }
    }

    /// Build a request containing only the fields that differ from `current`.
    pub fn from_changes(current: &UserRecord, proposed: &UserPatch) -> Self {
        Self::new(current.id.clone(), UserPatch::between(current, proposed))
    }
}

/// Drives the user list screen.
pub struct UserController {
    api: Arc<dyn UserApi>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    store: Mutex<UserStore>,
    last_params: Mutex<ListParams>,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("store", &*self.state())
            .finish_non_exhaustive()
    }
}

/// Releases a record's action lock when dropped.
struct ActionGuard<'a> {
    store: &'a Mutex<UserStore>,
    id: String,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .end_action(&self.id);
    }
}

impl UserController {
    pub fn new(api: Arc<dyn UserApi>, confirm: Arc<dyn Confirm>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_store(api, confirm, notifier, UserStore::new())
    }

    /// Controller starting from an existing store.
    pub fn with_store(
        api: Arc<dyn UserApi>,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
        store: UserStore,
    ) -> Self {
        Self {
            api,
            confirm,
            notifier,
            store: Mutex::new(store),
            last_params: Mutex::new(ListParams::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, UserStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> UserStore {
        self.state().clone()
    }

    /// Records matching the current search term.
    pub fn visible_users(&self) -> Vec<UserRecord> {
        self.state().visible().into_iter().cloned().collect()
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.state().set_search(term);
    }

    // ── List ────────────────────────────────────────────────────────

    /// Fetch the list with `params` and replace the local copy.
    ///
    /// On failure the previous list stays, the error flag is set, and the
    /// operator is offered a retry.
    pub async fn load(&self, params: ListParams) -> ActionOutcome {
        *self
            .last_params
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = params.clone();
        self.fetch(&params).await
    }

    /// Fetch again with the parameters of the last load.
    pub async fn refresh(&self) -> ActionOutcome {
        let params = self
            .last_params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.fetch(&params).await
    }

    /// Manual retry after a failed fetch.
    pub async fn retry(&self) -> ActionOutcome {
        self.refresh().await
    }

    async fn fetch(&self, params: &ListParams) -> ActionOutcome {
        self.state().begin_fetch();
        match self.api.list_users(params).await {
            Ok(users) => {
                debug!(count = users.len(), "user list loaded");
                self.state().replace_list(users);
                ActionOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "failed to load users");
                let message = err.user_message();
                self.state().fail_fetch(message.clone());
                self.notifier.notify(
                    Notification::error(format!("Failed to load users: {message}"))
                        .with_hint("Retry to fetch the list again."),
                );
                ActionOutcome::Failed
            }
        }
    }

    // ── Single record ───────────────────────────────────────────────

    /// Fetch one record for display. The list is left untouched.
    pub async fn view(&self, id: &str) -> Option<UserRecord> {
        match self.api.get_user(id).await {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(%id, error = %err, "failed to fetch user");
                self.notifier.notify(Notification::error(format!(
                    "Failed to load user details: {}",
                    err.user_message()
                )));
                None
            }
        }
    }

    /// Claim the action lock on `id`, or report that it is taken.
    fn begin_action(&self, id: &str) -> Option<ActionGuard<'_>> {
        if self.state().try_begin_action(id) {
            Some(ActionGuard {
                store: &self.store,
                id: id.to_string(),
            })
        } else {
            debug!(%id, "action already in progress");
            self.notifier.notify(Notification::info(format!(
                "An action on user {id} is already in progress."
            )));
            None
        }
    }

    fn label_for(&self, id: &str) -> String {
        self.state()
            .get(id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Save a partial update after confirmation.
    pub async fn edit(&self, request: EditRequest) -> ActionOutcome {
        let EditRequest { id, patch } = request;
        if patch.is_empty() {
            self.notifier.notify(Notification::info("No changes to save."));
            return ActionOutcome::Unchanged;
        }
        let Some(_guard) = self.begin_action(&id) else {
            return ActionOutcome::Busy;
        };

        let prompt = Prompt::new(
            "Save changes?",
            format!(
                "Update {} for {}?",
                patch.changed_fields().join(", "),
                self.label_for(&id)
            ),
            "Save",
        );
        if !self.confirm.confirm(&prompt) {
            info!(%id, "edit cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.api.update_user(&id, &patch).await {
            Ok(updated) => {
                if updated.id != id {
                    warn!(%id, returned = %updated.id, "server returned a different user id");
                }
                if !self.state().replace_one(&id, updated) {
                    debug!(%id, "updated user is not in the local list");
                }
                self.notifier.notify(Notification::success("User updated successfully."));
                ActionOutcome::Applied
            }
            Err(err) => {
                warn!(%id, error = %err, "update failed");
                self.notifier.notify(Notification::error(format!(
                    "Failed to update user: {}",
                    err.user_message()
                )));
                ActionOutcome::Failed
            }
        }
    }

    /// Flip the blocked flag of a listed user.
    pub async fn toggle_block(&self, id: &str) -> ActionOutcome {
        let current = self.state().get(id).map(|u| u.is_blocked);
        match current {
            Some(blocked) => self.set_blocked(id, !blocked).await,
            None => {
                self.notifier.notify(Notification::error(format!(
                    "User {id} is not in the current list."
                )));
                ActionOutcome::Failed
            }
        }
    }

    /// Block or unblock a listed user after confirmation.
    ///
    /// Only the blocked flag of the local record changes on success.
    pub async fn set_blocked(&self, id: &str, blocked: bool) -> ActionOutcome {
        let (verb, past) = if blocked { ("Block", "blocked") } else { ("Unblock", "unblocked") };

        let Some(user) = self.state().get(id).cloned() else {
            self.notifier.notify(Notification::error(format!(
                "User {id} is not in the current list."
            )));
            return ActionOutcome::Failed;
        };
        let Some(_guard) = self.begin_action(id) else {
            return ActionOutcome::Busy;
        };
        if user.is_blocked == blocked {
            self.notifier.notify(Notification::info(format!(
                "{} is already {past}.",
                user.display_name()
            )));
            return ActionOutcome::Unchanged;
        }

        let consequence = if blocked {
            "will lose access until unblocked"
        } else {
            "will regain access"
        };
        let prompt = Prompt::new(
            format!("{verb} user?"),
            format!("{} {consequence}.", user.display_name()),
            verb,
        );
        if !self.confirm.confirm(&prompt) {
            info!(%id, blocked, "block change cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.api.set_blocked(id, blocked).await {
            Ok(()) => {
                self.state().patch_blocked(id, blocked);
                self.notifier
                    .notify(Notification::success(format!("User {past} successfully.")));
                ActionOutcome::Applied
            }
            Err(err) => {
                warn!(%id, blocked, error = %err, "block change failed");
                self.notifier.notify(Notification::error(format!(
                    "Failed to {} user: {}",
                    verb.to_lowercase(),
                    err.user_message()
                )));
                ActionOutcome::Failed
            }
        }
    }

    /// Permanently delete a user after an explicit warning.
    pub async fn delete(&self, id: &str) -> ActionOutcome {
        let Some(_guard) = self.begin_action(id) else {
            return ActionOutcome::Busy;
        };

        let prompt = Prompt::new(
            "Delete user?",
            format!(
                "This will permanently delete {} and cannot be undone.",
                self.label_for(id)
            ),
            "Delete",
        )
        .destructive();
        if !self.confirm.confirm(&prompt) {
            info!(%id, "delete cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.api.delete_user(id).await {
            Ok(()) => {
                self.state().remove_one(id);
                self.notifier.notify(Notification::success("User deleted successfully."));
                ActionOutcome::Applied
            }
            Err(err) => {
                warn!(%id, error = %err, "delete failed");
                self.notifier.notify(Notification::error(format!(
                    "Failed to delete user: {}",
                    err.user_message()
                )));
                ActionOutcome::Failed
            }
        }
    }
}
