//! Role collection editor.
//!
//! The role table lives only in the browser: the full list is written to the
//! key-value store under [`ROLES_KEY`] after every mutation. There is no
//! versioning; the last writer wins.

use serde::{Deserialize, Serialize};

use accesspanel_core::{Entity, KeyValueStore, RoleId, StoreError};

pub const ROLES_KEY: &str = "roles";

/// A named role in the local role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

impl Role {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(id),
            name: name.into(),
        }
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Table used when nothing has been persisted yet.
pub fn default_roles() -> Vec<Role> {
    vec![Role::new(1, "user"), Role::new(2, "admin")]
}

/// Whether an editor call changed the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// Blank input, unknown id, nothing being edited, or no role id left.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    id: RoleId,
    buffer: String,
}

/// In-memory role list plus the input buffers of the role page.
///
/// Mutations update the list first and then overwrite the persisted blob.
/// If the write fails the error is returned and the in-memory list keeps
/// the change.
#[derive(Debug)]
pub struct RoleEditor<S> {
    store: S,
    roles: Vec<Role>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<RoleId>,
    draft: String,
    editing: Option<EditSession>,
}

impl<S> RoleEditor<S>
where
    S: KeyValueStore,
{
    /// Load the persisted table, or the default seed if there is none.
    ///
    /// Never fails: unreadable or corrupt blobs, and tables whose largest id
    /// leaves no room for another, are logged and replaced by the seed in
    /// memory (the store is left untouched until the next mutation).
    pub fn load(store: S) -> Self {
        let roles = match store.get(ROLES_KEY) {
            Ok(Some(blob)) if !blob.trim().is_empty() => {
                match serde_json::from_str::<Vec<Role>>(&blob) {
                    Ok(roles) if id_after(&roles).is_none() => {
                        tracing::warn!("persisted roles use the largest possible id; using defaults");
                        default_roles()
                    }
                    Ok(roles) => roles,
                    Err(err) => {
                        tracing::warn!(error = %err, "persisted roles are not valid JSON; using defaults");
                        default_roles()
                    }
                }
            }
            Ok(_) => default_roles(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted roles; using defaults");
                default_roles()
            }
        };

        Self::with_roles(store, roles)
    }

    fn with_roles(store: S, roles: Vec<Role>) -> Self {
        let next_id = id_after(&roles);
        Self {
            store,
            roles,
            next_id,
            draft: String::new(),
            editing: None,
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id() == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── new-role input ──────────────────────────────────────────────────────

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Add a role named after the current draft.
    pub fn submit_draft(&mut self) -> Result<Mutation, StoreError> {
        let name = std::mem::take(&mut self.draft);
        let result = self.add(&name);
        if matches!(result, Ok(Mutation::Ignored)) {
            self.draft = name;
        }
        result
    }

    /// Append a role. Blank (whitespace-only) names are ignored.
    ///
    /// The name is stored as typed. Ids come from a counter that only moves
    /// forward, so deleting a role never lets a later add reuse its id.
    pub fn add(&mut self, name: &str) -> Result<Mutation, StoreError> {
        if name.trim().is_empty() {
            return Ok(Mutation::Ignored);
        }
        let Some(id) = self.next_id else {
            tracing::warn!("no role id left; role not added");
            return Ok(Mutation::Ignored);
        };

        self.next_id = id.next();
        self.roles.push(Role {
            id,
            name: name.to_string(),
        });
        self.draft.clear();

        tracing::info!(role_id = %id, "role added");
        self.persist()?;
        Ok(Mutation::Applied)
    }

    // ── inline edit ─────────────────────────────────────────────────────────

    /// Role currently being edited, if any.
    pub fn editing(&self) -> Option<RoleId> {
        self.editing.as_ref().map(|e| e.id)
    }

    pub fn is_editing(&self, id: RoleId) -> bool {
        self.editing() == Some(id)
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.buffer.as_str())
    }

    /// Start editing `id` with its current name. Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: RoleId) -> Mutation {
        let Some(role) = self.get(id) else {
            return Mutation::Ignored;
        };
        self.editing = Some(EditSession {
            id,
            buffer: role.name.clone(),
        });
        Mutation::Applied
    }

    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer = text.into();
        }
    }

    /// Rename the edited role to the buffer contents and leave edit mode.
    ///
    /// A blank buffer keeps edit mode open and changes nothing.
    pub fn commit_edit(&mut self) -> Result<Mutation, StoreError> {
        let (id, buffer) = match self.editing.take() {
            None => return Ok(Mutation::Ignored),
            Some(edit) if edit.buffer.trim().is_empty() => {
                self.editing = Some(edit);
                return Ok(Mutation::Ignored);
            }
            Some(EditSession { id, buffer }) => (id, buffer),
        };

        for role in self.roles.iter_mut().filter(|r| r.id == id) {
            role.name.clone_from(&buffer);
        }

        tracing::info!(role_id = %id, "role renamed");
        self.persist()?;
        Ok(Mutation::Applied)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ── delete ──────────────────────────────────────────────────────────────

    /// Remove `id` and persist the resulting list.
    ///
    /// The list is written even when `id` was absent; the result then
    /// reports [`Mutation::Ignored`].
    pub fn remove(&mut self, id: RoleId) -> Result<Mutation, StoreError> {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != id);
        let outcome = if self.roles.len() == before {
            Mutation::Ignored
        } else {
            tracing::info!(role_id = %id, "role removed");
            Mutation::Applied
        };

        if self.is_editing(id) {
            self.editing = None;
        }

        self.persist()?;
        Ok(outcome)
    }

    /// Overwrite the persisted blob with the whole list.
    fn persist(&self) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.roles)?;
        self.store.set(ROLES_KEY, &blob).inspect_err(|err| {
            tracing::error!(error = %err, "failed to persist roles");
        })
    }
}

/// First id after the largest in `roles`; `None` when that id is `u64::MAX`.
fn id_after(roles: &[Role]) -> Option<RoleId> {
    match roles.iter().map(|r| r.id).max() {
        Some(max) => max.next(),
        None => Some(RoleId::new(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesspanel_core::InMemoryKeyValueStore;
    use std::sync::Arc;

    fn seeded() -> RoleEditor<Arc<InMemoryKeyValueStore>> {
        RoleEditor::load(Arc::new(InMemoryKeyValueStore::new()))
    }

    fn persisted(editor: &RoleEditor<Arc<InMemoryKeyValueStore>>) -> Option<String> {
        editor.store().get(ROLES_KEY).unwrap()
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn load_without_blob_uses_seed() {
        let editor = seeded();
        assert_eq!(editor.roles(), default_roles().as_slice());
        assert_eq!(editor.store().write_count(), 0);
    }

    #[test]
    fn load_reads_persisted_blob() {
        let store = InMemoryKeyValueStore::with_entry(ROLES_KEY, r#"[{"id":7,"name":"ops"}]"#);
        let mut editor = RoleEditor::load(store);
        assert_eq!(editor.roles(), &[Role::new(7, "ops")]);

        editor.add("qa").unwrap();
        assert_eq!(editor.roles()[1], Role::new(8, "qa"));
    }

    #[test]
    fn load_keeps_an_empty_persisted_list() {
        let editor = RoleEditor::load(InMemoryKeyValueStore::with_entry(ROLES_KEY, "[]"));
        assert!(editor.roles().is_empty());
    }

    #[test]
    fn load_falls_back_on_corrupt_blob_or_read_error() {
        let editor = RoleEditor::load(InMemoryKeyValueStore::with_entry(ROLES_KEY, "{not json"));
        assert_eq!(editor.roles(), default_roles().as_slice());

        let editor = RoleEditor::load(BrokenStore);
        assert_eq!(editor.roles(), default_roles().as_slice());
    }

    #[test]
    fn load_falls_back_when_largest_id_is_taken() {
        let store = InMemoryKeyValueStore::with_entry(
            ROLES_KEY,
            r#"[{"id":18446744073709551615,"name":"root"}]"#,
        );
        let mut editor = RoleEditor::load(store);
        assert_eq!(editor.roles(), default_roles().as_slice());

        editor.add("editor").unwrap();
        assert_eq!(editor.roles()[2], Role::new(3, "editor"));
    }

    #[test]
    fn add_stops_after_the_last_id() {
        let store = InMemoryKeyValueStore::with_entry(
            ROLES_KEY,
            r#"[{"id":18446744073709551614,"name":"root"}]"#,
        );
        let mut editor = RoleEditor::load(store);

        assert_eq!(editor.add("last").unwrap(), Mutation::Applied);
        assert_eq!(editor.roles()[1], Role::new(u64::MAX, "last"));

        assert_eq!(editor.add("one more").unwrap(), Mutation::Ignored);
        assert_eq!(editor.roles().len(), 2);
        assert_eq!(editor.store().write_count(), 1);
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut editor = seeded();
        assert_eq!(editor.add("").unwrap(), Mutation::Ignored);
        assert_eq!(editor.add("   \t").unwrap(), Mutation::Ignored);
        assert_eq!(editor.roles(), default_roles().as_slice());
        assert_eq!(persisted(&editor), None);
    }

    #[test]
    fn add_appends_and_persists_full_list() {
        let mut editor = seeded();
        editor.set_draft("editor");

        assert_eq!(editor.submit_draft().unwrap(), Mutation::Applied);
        assert_eq!(editor.roles()[2], Role::new(3, "editor"));
        assert_eq!(editor.draft(), "");
        assert_eq!(
            persisted(&editor).as_deref(),
            Some(r#"[{"id":1,"name":"user"},{"id":2,"name":"admin"},{"id":3,"name":"editor"}]"#)
        );
    }

    #[test]
    fn blank_draft_is_kept_in_the_input() {
        let mut editor = seeded();
        editor.set_draft("  ");
        assert_eq!(editor.submit_draft().unwrap(), Mutation::Ignored);
        assert_eq!(editor.draft(), "  ");
    }

    #[test]
    fn edit_changes_only_the_target_role() {
        let mut editor = seeded();
        assert_eq!(editor.begin_edit(RoleId::new(2)), Mutation::Applied);
        assert_eq!(editor.edit_buffer(), Some("admin"));

        editor.set_edit_buffer("superadmin");
        assert_eq!(editor.commit_edit().unwrap(), Mutation::Applied);

        assert_eq!(editor.roles(), &[Role::new(1, "user"), Role::new(2, "superadmin")]);
        assert_eq!(editor.editing(), None);
        assert_eq!(
            persisted(&editor).as_deref(),
            Some(r#"[{"id":1,"name":"user"},{"id":2,"name":"superadmin"}]"#)
        );
    }

    #[test]
    fn begin_edit_on_unknown_id_is_ignored() {
        let mut editor = seeded();
        assert_eq!(editor.begin_edit(RoleId::new(99)), Mutation::Ignored);
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn blank_edit_keeps_edit_mode_and_name() {
        let mut editor = seeded();
        editor.begin_edit(RoleId::new(1));
        editor.set_edit_buffer(" ");

        assert_eq!(editor.commit_edit().unwrap(), Mutation::Ignored);
        assert!(editor.is_editing(RoleId::new(1)));
        assert_eq!(editor.roles()[0].name, "user");
        assert_eq!(editor.store().write_count(), 0);
    }

    #[test]
    fn cancel_edit_does_not_persist() {
        let mut editor = seeded();
        editor.begin_edit(RoleId::new(1));
        editor.set_edit_buffer("member");
        editor.cancel_edit();

        assert_eq!(editor.commit_edit().unwrap(), Mutation::Ignored);
        assert_eq!(editor.roles()[0].name, "user");
        assert_eq!(editor.store().write_count(), 0);
    }

    #[test]
    fn removing_unknown_id_still_writes_same_content() {
        let mut editor = seeded();
        assert_eq!(editor.remove(RoleId::new(42)).unwrap(), Mutation::Ignored);

        assert_eq!(editor.roles(), default_roles().as_slice());
        assert_eq!(editor.store().write_count(), 1);
        assert_eq!(
            persisted(&editor),
            Some(serde_json::to_string(&default_roles()).unwrap())
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut editor = seeded();
        editor.add("editor").unwrap();
        editor.remove(RoleId::new(1)).unwrap();
        editor.add("viewer").unwrap();
        editor.remove(RoleId::new(4)).unwrap();
        editor.add("auditor").unwrap();

        let ids: Vec<u64> = editor.roles().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn removing_the_edited_role_leaves_edit_mode() {
        let mut editor = seeded();
        editor.begin_edit(RoleId::new(2));
        editor.remove(RoleId::new(2)).unwrap();
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn failed_write_is_reported_but_list_keeps_change() {
        let mut editor = RoleEditor::load(BrokenStore);
        let err = editor.add("editor").unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(editor.roles().len(), 3);
        assert_eq!(editor.draft(), "");
    }
}
