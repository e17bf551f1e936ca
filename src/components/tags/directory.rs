use serenity::{
    async_trait,
    builder::EditMember,
    client::Context,
    model::{guild::Member, id::{GuildId, RoleId, UserId}, permissions::Permissions},
};
use crate::log_debug;
use super::handler::{MemberDirectory, TagError};

/// Membres d'un serveur, via le cache de serenity puis l'API Discord.
pub struct GuildDirectory<'a> {
    ctx: &'a Context,
    guild_id: GuildId,
}

impl<'a> GuildDirectory<'a> {
    pub fn new(ctx: &'a Context, guild_id: GuildId) -> Self {
        Self { ctx, guild_id }
    }
    /// Membre lu dans le serveur en cache, récupéré via l'API s'il n'y est pas.
    async fn member(&self, member: UserId) -> Result<Member, TagError> {
        let cached = self.ctx.cache.guild(self.guild_id)
            .and_then(|guild| guild.members.get(&member).cloned());
        if let Some(cached) = cached {
            return Ok(cached);
        }
        self.ctx.http.get_member(self.guild_id, member).await.map_err(|e| {
            log_debug!("Member {} of {} not found: {}", member, self.guild_id, e);
            TagError::MemberNotFound(member)
        })
    }
}

#[async_trait]
impl<'a> MemberDirectory for GuildDirectory<'a> {
    async fn display_name(&self, member: UserId) -> Result<String, TagError> {
        self.member(member).await.map(|member| member.display_name().to_string())
    }
    async fn manage_nicknames(&self, member: UserId) -> Result<bool, TagError> {
        let member_roles = self.member(member).await?.roles;
        let cached_roles = self.ctx.cache.guild(self.guild_id)
            .map(|guild| guild.roles.clone())
            .filter(|roles| !roles.is_empty());
        let roles = match cached_roles {
            Some(roles) => roles,
            None => self.guild_id.roles(self.ctx).await
                .map_err(|e| TagError::PermissionLookupFailed(format!("Unable to fetch the roles of {}: {}", self.guild_id, e)))?,
        };
        // @everyone partage l'id du serveur
        let everyone = RoleId::new(self.guild_id.get());
        let perms = roles.iter()
            .filter(|(id, _)| **id == everyone || member_roles.contains(id))
            .fold(Permissions::empty(), |perms, (_, role)| perms | role.permissions);
        Ok(perms.intersects(Permissions::MANAGE_NICKNAMES | Permissions::ADMINISTRATOR))
    }
    async fn set_nickname(&self, member: UserId, nickname: &str) -> Result<(), TagError> {
        self.guild_id.edit_member(self.ctx, member, EditMember::new().nickname(nickname)).await
            .map(|_| ())
            .map_err(|e| TagError::RenameFailed(e.to_string()))
    }
}
