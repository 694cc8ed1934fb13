//! The Users-page roster: a page-local copy of the reference users with
//! row-scoped role editing.
//!
//! Role edits are applied to the roster only. `apply_local` is named for
//! what it does: it never writes to the backing store, so a roster diverges
//! from the reference cache until it is re-seeded. Wiring the save to a
//! network write is an open product question, deliberately not answered
//! here.

use crate::models::{Role, User};
use crate::reference::ReferenceSnapshot;

#[derive(Debug, Clone)]
struct EditBuffer {
    user_id: String,
    roles: Vec<Role>,
}

#[derive(Debug, Default)]
pub struct UserRoster {
    users: Vec<User>,
    buffer: Option<EditBuffer>,
}

impl UserRoster {
    /// Seeds the roster by copying the snapshot's user list.
    pub fn seeded_from(snapshot: &ReferenceSnapshot) -> Self {
        UserRoster {
            users: snapshot.users.clone(),
            buffer: None,
        }
    }

    /// Re-seeds from a fresh snapshot, discarding local edits and any open
    /// edit buffer - the pass-through effect that follows a cache reload.
    pub fn resync(&mut self, snapshot: &ReferenceSnapshot) {
        self.users = snapshot.users.clone();
        self.buffer = None;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The id of the row currently in edit mode, if any.
    pub fn editing(&self) -> Option<&str> {
        self.buffer.as_ref().map(|b| b.user_id.as_str())
    }

    /// The working role set of the open edit buffer.
    pub fn edited_roles(&self) -> Option<&[Role]> {
        self.buffer.as_ref().map(|b| b.roles.as_slice())
    }

    /// Prepends a newly created user, as the page does after the composite
    /// create succeeds. No cache reload is involved.
    pub fn prepend(&mut self, user: User) {
        self.users.insert(0, user);
    }

    /// Enters edit mode on a row, snapshotting its role set into the edit
    /// buffer. Entering edit on a second row replaces the buffer: the first
    /// row's pending changes are dropped without being applied.
    ///
    /// Returns `false` when the id is not in the roster.
    pub fn begin_edit(&mut self, user_id: &str) -> bool {
        match self.users.iter().find(|u| u.id == user_id) {
            Some(user) => {
                self.buffer = Some(EditBuffer {
                    user_id: user.id.clone(),
                    roles: user.roles.clone(),
                });
                true
            }
            None => false,
        }
    }

    /// Toggles a role in the edit buffer: present → removed, absent →
    /// appended. Duplicate-safe; order of the remaining roles is whatever
    /// the toggles left behind. No-op when nothing is being edited.
    pub fn toggle_role(&mut self, role: Role) {
        if let Some(buffer) = &mut self.buffer {
            if let Some(pos) = buffer.roles.iter().position(|r| *r == role) {
                buffer.roles.remove(pos);
            } else {
                buffer.roles.push(role);
            }
        }
    }

    /// Applies the edit buffer to the roster row - locally only. The
    /// backing store is not written; that is the point of the name.
    ///
    /// Returns the updated user, or `None` when no edit was open.
    pub fn apply_local(&mut self) -> Option<User> {
        let buffer = self.buffer.take()?;
        let user = self.users.iter_mut().find(|u| u.id == buffer.user_id)?;
        user.roles = buffer.roles;
        Some(user.clone())
    }

    /// Discards the edit buffer, leaving the roster untouched.
    pub fn cancel_edit(&mut self) {
        self.buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, roles: Vec<Role>) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{name}@example.com").to_lowercase(),
            avatar_url: String::new(),
            roles,
        }
    }

    fn snapshot_with(users: Vec<User>) -> ReferenceSnapshot {
        ReferenceSnapshot {
            users,
            companies: vec![],
            sites: vec![],
            error: None,
        }
    }

    fn sample_roster() -> UserRoster {
        UserRoster::seeded_from(&snapshot_with(vec![
            user("u-1", "Ada", vec![Role::Admin]),
            user("u-2", "Bruno", vec![Role::Requester]),
        ]))
    }

    #[test]
    fn test_apply_local_updates_only_the_edited_row() {
        let mut roster = sample_roster();

        assert!(roster.begin_edit("u-2"));
        roster.toggle_role(Role::WarehouseManager);
        let updated = roster.apply_local().expect("edit should apply");

        assert_eq!(updated.id, "u-2");
        assert_eq!(updated.roles, vec![Role::Requester, Role::WarehouseManager]);
        // The other row is untouched.
        assert_eq!(roster.users()[0].roles, vec![Role::Admin]);
        assert!(roster.editing().is_none());
    }

    #[test]
    fn test_cancel_leaves_the_original_role_set() {
        let mut roster = sample_roster();

        roster.begin_edit("u-1");
        roster.toggle_role(Role::Admin); // would remove the only role
        roster.cancel_edit();

        assert_eq!(roster.users()[0].roles, vec![Role::Admin]);
        assert!(roster.apply_local().is_none());
    }

    #[test]
    fn test_toggle_is_duplicate_safe() {
        let mut roster = sample_roster();

        roster.begin_edit("u-1");
        roster.toggle_role(Role::Requester);
        roster.toggle_role(Role::Requester);
        roster.toggle_role(Role::Requester);
        assert_eq!(
            roster.edited_roles().unwrap(),
            &[Role::Admin, Role::Requester]
        );
    }

    #[test]
    fn test_second_begin_edit_replaces_the_buffer() {
        let mut roster = sample_roster();

        roster.begin_edit("u-1");
        roster.toggle_role(Role::PurchasingManager);
        // Fast interaction: edit another row before saving the first.
        roster.begin_edit("u-2");
        let updated = roster.apply_local().unwrap();

        assert_eq!(updated.id, "u-2");
        // The first row's pending change was dropped, not applied.
        assert_eq!(roster.users()[0].roles, vec![Role::Admin]);
    }

    #[test]
    fn test_resync_discards_local_edits() {
        let mut roster = sample_roster();

        roster.begin_edit("u-2");
        roster.toggle_role(Role::Admin);
        roster.apply_local();
        assert_eq!(
            roster.users()[1].roles,
            vec![Role::Requester, Role::Admin]
        );

        let fresh = snapshot_with(vec![user("u-2", "Bruno", vec![Role::Requester])]);
        roster.resync(&fresh);
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.users()[0].roles, vec![Role::Requester]);
    }

    #[test]
    fn test_prepend_puts_new_users_first() {
        let mut roster = sample_roster();
        roster.prepend(user("u-3", "Carla", vec![Role::Requester]));
        assert_eq!(roster.users()[0].id, "u-3");
        assert_eq!(roster.users().len(), 3);
    }
}
