//! Traitement des commandes `tag clear` et `tag set`, indépendamment de serenity.
//!
//! Les accès à Discord passent par le trait [`MemberDirectory`].

use std::fmt;
use serenity::{async_trait, model::{id::UserId, permissions::Permissions}};
use crate::log_error;
use super::nickname::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Clear,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// Modifier le pseudo d'un autre membre sans `MANAGE_NICKNAMES`
    MissingPermission(TagAction),
    NoMemberSelected,
    MemberNotFound(UserId),
    NotInGuild,
    Validation(ValidationError),
    /// Rôles du serveur introuvables
    PermissionLookupFailed(String),
    /// Discord a refusé le changement de pseudo. Contient le détail de l'erreur.
    RenameFailed(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::MissingPermission(TagAction::Clear) => write!(f, "You need the `MANAGE_NICKNAMES` permission to clear other member's nicknames."),
            TagError::MissingPermission(TagAction::Set) => write!(f, "You need the `MANAGE_NICKNAMES` permission to change other member's nicknames."),
            TagError::NoMemberSelected => write!(f, "No member selected"),
            TagError::MemberNotFound(id) => write!(f, "No member found for {}", id),
            TagError::NotInGuild => write!(f, "This command can only be used in a server."),
            TagError::Validation(e) => write!(f, "{}", e),
            TagError::PermissionLookupFailed(_) => write!(f, "Unable to check your permissions, try again later."),
            TagError::RenameFailed(_) => write!(f, "Unable to update the nickname: missing permissions."),
        }
    }
}

impl From<ValidationError> for TagError {
    fn from(e: ValidationError) -> Self {
        TagError::Validation(e)
    }
}

/// Qui demande quoi, et avec quels droits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub invoker_id: UserId,
    pub target_id: UserId,
    pub has_manage_nicknames: bool,
}

impl AuthorizationContext {
    /// Sans membre sélectionné, la cible est l'auteur de la commande.
    pub fn new(invoker_id: UserId, selected: Option<UserId>, has_manage_nicknames: bool) -> Self {
        Self {
            invoker_id,
            target_id: selected.unwrap_or(invoker_id),
            has_manage_nicknames,
        }
    }
    pub fn targets_other(&self) -> bool {
        self.target_id != self.invoker_id
    }
    pub fn authorize(&self, action: TagAction) -> Result<(), TagError> {
        if self.targets_other() && !self.has_manage_nicknames {
            Err(TagError::MissingPermission(action))
        } else {
            Ok(())
        }
    }
}

/// Construit le contexte d'autorisation d'une commande.
///
/// `permissions` sont celles calculées par Discord pour l'auteur de la commande. Les rôles
/// ne sont consultés que si elles manquent et qu'un autre membre est visé.
pub async fn authorization<D: MemberDirectory + ?Sized>(
    directory: &D,
    invoker_id: UserId,
    selected: Option<UserId>,
    permissions: Option<Permissions>,
) -> Result<AuthorizationContext, TagError> {
    let mut auth = AuthorizationContext::new(invoker_id, selected, false);
    if auth.targets_other() {
        auth.has_manage_nicknames = match permissions {
            Some(perms) => perms.intersects(Permissions::MANAGE_NICKNAMES | Permissions::ADMINISTRATOR),
            None => directory.manage_nicknames(invoker_id).await.map_err(|e| {
                if let TagError::PermissionLookupFailed(detail) = &e {
                    log_error!("Permissions of {}: {}", invoker_id, detail);
                }
                e
            })?,
        };
    }
    Ok(auth)
}

/// Accès aux membres d'un serveur.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Pseudo affiché du membre.
    async fn display_name(&self, member: UserId) -> Result<String, TagError>;
    /// `MANAGE_NICKNAMES` d'après les rôles du membre.
    async fn manage_nicknames(&self, member: UserId) -> Result<bool, TagError>;
    async fn set_nickname(&self, member: UserId, nickname: &str) -> Result<(), TagError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Renamed(String),
    /// Le pseudo était déjà le bon, Discord n'a pas été appelé
    Unchanged(String),
}

impl TagOutcome {
    pub fn nickname(&self) -> &str {
        match self {
            TagOutcome::Renamed(nick) | TagOutcome::Unchanged(nick) => nick,
        }
    }
}

/// Retire le tag du pseudo de la cible.
pub async fn clear_tag<D: MemberDirectory + ?Sized>(directory: &D, auth: &AuthorizationContext) -> Result<TagOutcome, TagError> {
    auth.authorize(TagAction::Clear)?;
    let display_name = directory.display_name(auth.target_id).await?;
    let nickname = nickname::derive_base_name(&display_name);
    rename(directory, auth.target_id, &display_name, nickname).await
}

/// Remplace le tag du pseudo de la cible par `tag`.
pub async fn set_tag<D: MemberDirectory + ?Sized>(directory: &D, auth: &AuthorizationContext, tag: &str) -> Result<TagOutcome, TagError> {
    auth.authorize(TagAction::Set)?;
    let display_name = directory.display_name(auth.target_id).await?;
    let nickname = nickname::compose_tagged(&nickname::derive_base_name(&display_name), tag)?;
    rename(directory, auth.target_id, &display_name, nickname).await
}

async fn rename<D: MemberDirectory + ?Sized>(directory: &D, member: UserId, current: &str, nickname: String) -> Result<TagOutcome, TagError> {
    if nickname == current {
        return Ok(TagOutcome::Unchanged(nickname));
    }
    match directory.set_nickname(member, &nickname).await {
        Ok(()) => Ok(TagOutcome::Renamed(nickname)),
        Err(e) => {
            if let TagError::RenameFailed(detail) = &e {
                log_error!("Unable to rename {} to \"{}\": {}", member, nickname, detail);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, sync::Mutex};

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);
    const NOBODY: UserId = UserId::new(3);

    struct Directory {
        names: Mutex<HashMap<UserId, String>>,
        moderators: Vec<UserId>,
        renames: Mutex<Vec<(UserId, String)>>,
        rename_error: Option<String>,
        roles_error: Option<String>,
    }

    impl Directory {
        fn new() -> Self {
            let names = [(ALICE, "Alice [PRO]".to_string()), (BOB, "Bob".to_string())].into_iter().collect();
            Self {
                names: Mutex::new(names),
                moderators: vec![],
                renames: Mutex::new(vec![]),
                rename_error: None,
                roles_error: None,
            }
        }
        fn renames(&self) -> Vec<(UserId, String)> {
            self.renames.lock().unwrap().clone()
        }
        fn name(&self, member: UserId) -> String {
            self.names.lock().unwrap()[&member].clone()
        }
    }

    #[async_trait]
    impl MemberDirectory for Directory {
        async fn display_name(&self, member: UserId) -> Result<String, TagError> {
            self.names.lock().unwrap().get(&member).cloned().ok_or(TagError::MemberNotFound(member))
        }
        async fn manage_nicknames(&self, member: UserId) -> Result<bool, TagError> {
            if let Some(e) = &self.roles_error {
                return Err(TagError::PermissionLookupFailed(e.clone()));
            }
            Ok(self.moderators.contains(&member))
        }
        async fn set_nickname(&self, member: UserId, nickname: &str) -> Result<(), TagError> {
            if let Some(e) = &self.rename_error {
                return Err(TagError::RenameFailed(e.clone()));
            }
            self.renames.lock().unwrap().push((member, nickname.to_string()));
            self.names.lock().unwrap().insert(member, nickname.to_string());
            Ok(())
        }
    }

    #[test]
    fn target_defaults_to_invoker() {
        let auth = AuthorizationContext::new(ALICE, None, false);
        assert_eq!(auth.target_id, ALICE);
        assert!(!auth.targets_other());
        assert_eq!(auth.authorize(TagAction::Set), Ok(()));
        let auth = AuthorizationContext::new(ALICE, Some(ALICE), false);
        assert_eq!(auth.authorize(TagAction::Clear), Ok(()));
    }
    #[test]
    fn other_member_needs_permission() {
        let auth = AuthorizationContext::new(ALICE, Some(BOB), false);
        assert_eq!(auth.authorize(TagAction::Clear), Err(TagError::MissingPermission(TagAction::Clear)));
        let auth = AuthorizationContext::new(ALICE, Some(BOB), true);
        assert_eq!(auth.authorize(TagAction::Set), Ok(()));
    }

    #[tokio::test]
    async fn permissions_from_interaction() {
        let directory = Directory::new();
        let auth = authorization(&directory, ALICE, Some(BOB), Some(Permissions::MANAGE_NICKNAMES)).await.unwrap();
        assert!(auth.has_manage_nicknames);
        let auth = authorization(&directory, ALICE, Some(BOB), Some(Permissions::ADMINISTRATOR)).await.unwrap();
        assert!(auth.has_manage_nicknames);
        let auth = authorization(&directory, ALICE, Some(BOB), Some(Permissions::SEND_MESSAGES)).await.unwrap();
        assert!(!auth.has_manage_nicknames);
    }
    #[tokio::test]
    async fn permissions_from_roles() {
        let mut directory = Directory::new();
        directory.moderators.push(ALICE);
        let auth = authorization(&directory, ALICE, Some(BOB), None).await.unwrap();
        assert!(auth.has_manage_nicknames);
        let auth = authorization(&directory, BOB, Some(ALICE), None).await.unwrap();
        assert!(!auth.has_manage_nicknames);
    }
    #[tokio::test]
    async fn role_lookup_failure_stops_the_command() {
        let mut directory = Directory::new();
        directory.roles_error = Some("Unable to fetch the roles".to_string());
        let err = authorization(&directory, ALICE, Some(BOB), None).await.unwrap_err();
        assert_eq!(err, TagError::PermissionLookupFailed("Unable to fetch the roles".to_string()));
        assert!(directory.renames().is_empty());
        assert_eq!(directory.name(BOB), "Bob");
        // Les permissions de l'interaction évitent la recherche des rôles
        let auth = authorization(&directory, ALICE, Some(BOB), Some(Permissions::MANAGE_NICKNAMES)).await.unwrap();
        assert!(auth.has_manage_nicknames);
    }
    #[tokio::test]
    async fn own_nickname_needs_no_permission() {
        let directory = Directory::new();
        let auth = authorization(&directory, BOB, Some(BOB), None).await.unwrap();
        assert_eq!(auth, AuthorizationContext { invoker_id: BOB, target_id: BOB, has_manage_nicknames: false });
        assert_eq!(auth.authorize(TagAction::Set), Ok(()));
    }
    #[tokio::test]
    async fn set_own_tag() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(BOB, None, false);
        let outcome = set_tag(&directory, &auth, "DEV").await;
        assert_eq!(outcome, Ok(TagOutcome::Renamed("Bob [DEV]".to_string())));
        assert_eq!(directory.renames(), vec![(BOB, "Bob [DEV]".to_string())]);
    }
    #[tokio::test]
    async fn set_replaces_existing_tag() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(ALICE, None, false);
        set_tag(&directory, &auth, "NEW").await.unwrap();
        assert_eq!(directory.name(ALICE), "Alice [NEW]");
    }
    #[tokio::test]
    async fn clear_own_tag() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(ALICE, None, false);
        let outcome = clear_tag(&directory, &auth).await.unwrap();
        assert_eq!(outcome.nickname(), "Alice");
        assert_eq!(directory.name(ALICE), "Alice");
    }
    #[tokio::test]
    async fn clear_untagged_name_succeeds_without_rename() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(BOB, None, false);
        let outcome = clear_tag(&directory, &auth).await;
        assert_eq!(outcome, Ok(TagOutcome::Unchanged("Bob".to_string())));
        assert!(directory.renames().is_empty());
        assert_eq!(directory.name(BOB), "Bob");
    }
    #[tokio::test]
    async fn other_member_rejected_before_lookup() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(ALICE, Some(NOBODY), false);
        assert_eq!(clear_tag(&directory, &auth).await, Err(TagError::MissingPermission(TagAction::Clear)));
        assert_eq!(set_tag(&directory, &auth, "X").await, Err(TagError::MissingPermission(TagAction::Set)));
        assert!(directory.renames().is_empty());
    }
    #[tokio::test]
    async fn moderator_tags_other_member() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(ALICE, Some(BOB), true);
        set_tag(&directory, &auth, "MOD").await.unwrap();
        assert_eq!(directory.renames(), vec![(BOB, "Bob [MOD]".to_string())]);
    }
    #[tokio::test]
    async fn unknown_member() {
        let directory = Directory::new();
        let auth = AuthorizationContext::new(ALICE, Some(NOBODY), true);
        assert_eq!(clear_tag(&directory, &auth).await, Err(TagError::MemberNotFound(NOBODY)));
    }
    #[tokio::test]
    async fn validation_errors_skip_rename() {
        let directory = Directory::new();
        directory.names.lock().unwrap().insert(BOB, "B".repeat(29));
        let auth = AuthorizationContext::new(BOB, None, false);
        assert_eq!(set_tag(&directory, &auth, "X").await, Err(TagError::Validation(ValidationError::NameTooLong)));
        directory.names.lock().unwrap().insert(BOB, "B".repeat(27));
        assert_eq!(set_tag(&directory, &auth, "LONGTAG1").await, Err(TagError::Validation(ValidationError::CombinedTooLong)));
        assert!(directory.renames().is_empty());
    }
    #[tokio::test]
    async fn rename_failure_is_reported() {
        let mut directory = Directory::new();
        directory.rename_error = Some("Missing Permissions".to_string());
        let auth = AuthorizationContext::new(ALICE, None, false);
        let err = clear_tag(&directory, &auth).await.unwrap_err();
        assert_eq!(err, TagError::RenameFailed("Missing Permissions".to_string()));
        assert_eq!(err.to_string(), "Unable to update the nickname: missing permissions.");
        assert_eq!(directory.name(ALICE), "Alice [PRO]");
    }
    #[test]
    fn error_messages() {
        assert_eq!(TagError::MemberNotFound(BOB).to_string(), "No member found for 2");
        assert_eq!(
            TagError::Validation(ValidationError::CombinedTooLong).to_string(),
            "Nickname + tag is too long, in total they must be no more than 32 characters."
        );
    }
}
