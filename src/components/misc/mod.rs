//! Événements divers qui ne justifient pas un composant à eux seuls.
//!
//! Le composant misc ne doit rien enregistrer : une action doit se suffire à elle-même.

use nicktag_core as core;
use serenity::{
    async_trait,
    client::Context,
    model::{event::{Event, ReadyEvent}, id::ApplicationId, permissions::Permissions},
};
use crate::{config::DEFAULT_PERMISSIONS, log_info, log_warn};

pub struct Misc {
    bot_permissions: u64,
}

impl Misc {
    pub fn new(bot_permissions: u64) -> Self {
        Self { bot_permissions }
    }
    /// Permissions du lien d'invitation. Des bits inconnus de Discord donnent les permissions par défaut.
    fn invite_permissions(&self) -> Permissions {
        Permissions::from_bits(self.bot_permissions)
            .unwrap_or_else(|| {
                log_warn!("Invalid bot permissions in the configuration ({}), requesting the default ones.", self.bot_permissions);
                Permissions::from_bits_truncate(DEFAULT_PERMISSIONS)
            })
    }
    fn on_ready(&self, ready: &ReadyEvent) {
        log_info!("{} is connected!", ready.ready.user.name);
        let perms = self.invite_permissions();
        log_info!("Permission(s) requested by the bot: {}", perms);
        log_info!("Invitation: {}", invite_link(ready.ready.application.id, perms));
    }
}

/// Lien OAuth2 ajoutant le bot et ses commandes slash à un serveur.
fn invite_link(application_id: ApplicationId, permissions: Permissions) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&scope=bot%20applications.commands&permissions={}",
        application_id,
        permissions.bits()
    )
}

#[async_trait]
impl core::ComponentEvent for Misc {
    async fn event(&self, _ctx: &Context, event: &Event) {
        if let Event::Ready(ready) = event {
            self.on_ready(ready);
        }
    }
}

impl core::ComponentDeclarative for Misc {}

impl core::Component for Misc {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_permissions() {
        assert_eq!(Misc::new(1 << 27).invite_permissions(), Permissions::MANAGE_NICKNAMES);
        assert_eq!(Misc::new(0).invite_permissions(), Permissions::empty());
    }
    #[test]
    fn unknown_bits_request_default_permissions() {
        assert_eq!(Misc::new(1 << 63).invite_permissions(), Permissions::MANAGE_NICKNAMES);
    }
    #[test]
    fn invite_link_format() {
        assert_eq!(
            invite_link(ApplicationId::new(1234), Permissions::MANAGE_NICKNAMES),
            "https://discord.com/api/oauth2/authorize?client_id=1234&scope=bot%20applications.commands&permissions=134217728"
        );
    }
}
