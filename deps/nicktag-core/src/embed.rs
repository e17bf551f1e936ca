use serenity::{
    builder::{CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse},
    client::Context,
    model::{
        application::{CommandDataOption, CommandDataOptionValue, CommandInteraction},
        id::{GuildId, UserId},
    },
};

use crate::message::Message;

/// Deferred answer to an application command.
///
/// Discord is told right away that an answer is coming, the message is
/// then edited once the command finished its work.
pub struct DelayedResponse<'a> {
    pub message: Option<Message>,
    ctx: &'a Context,
    interaction: &'a CommandInteraction,
}

impl<'a> DelayedResponse<'a> {
    pub async fn new(ctx: &'a Context, interaction: &'a CommandInteraction, ephemeral: bool) -> serenity::Result<DelayedResponse<'a>> {
        let defer = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        interaction.create_response(ctx, CreateInteractionResponse::Defer(defer)).await.map_err(|e| {
            log::warn!(target: "nicktag", "Cannot defer response: {}", e);
            e
        })?;
        Ok(DelayedResponse {
            message: None,
            ctx,
            interaction,
        })
    }
    pub async fn send(mut self) -> serenity::Result<()> {
        let edit = match self.message.take() {
            Some(msg) => EditInteractionResponse::from(msg),
            None => EditInteractionResponse::new(),
        };
        self.interaction.edit_response(self.ctx, edit).await.map(|_| ()).map_err(|e| {
            log::warn!(target: "nicktag", "Cannot edit response: {}", e);
            e
        })
    }
    pub async fn send_message(mut self, msg: Message) -> serenity::Result<()> {
        self.message = Some(msg);
        self.send().await
    }
}

impl<'a> Drop for DelayedResponse<'a> {
    fn drop(&mut self) {
        if let Some(msg) = &self.message {
            log::warn!(target: "nicktag", "Delayed message not sent: {:?}", msg.message);
        }
    }
}

/// # Application command container
///
/// Wraps a [`CommandInteraction`] and walks down the sub command groups so the
/// arguments of the invoked (sub) command are directly reachable with [`get_argument`].
///
/// [`get_argument`]: `Self::get_argument`
#[derive(Clone)]
pub struct ApplicationCommandEmbed<'a> {
    pub interaction: &'a CommandInteraction,
    path: Vec<&'a str>,
    options: &'a [CommandDataOption],
}

impl<'a> ApplicationCommandEmbed<'a> {
    /// The (sub) command is searched in the root command, then in the options.
    pub fn new(interaction: &'a CommandInteraction) -> Self {
        let mut path = vec![interaction.data.name.as_str()];
        let mut options = interaction.data.options.as_slice();
        loop {
            let sub = options.iter().find_map(|option| match &option.value {
                CommandDataOptionValue::SubCommand(sub) | CommandDataOptionValue::SubCommandGroup(sub) => Some((option.name.as_str(), sub)),
                _ => None,
            });
            match sub {
                Some((name, sub)) => {
                    path.push(name);
                    options = sub.as_slice();
                }
                None => break,
            }
        }
        ApplicationCommandEmbed { interaction, path, options }
    }
    /// Complete name of the command.
    ///
    /// Includes the groups and the command like `group.sub_group.command`
    pub fn fullname(&self) -> String {
        self.path.join(".")
    }
    /// Guild where the command was invoked.
    pub fn get_guild_id(&self) -> Option<GuildId> {
        self.interaction.guild_id
    }
    /// User who invoked the command.
    pub fn get_user_id(&self) -> UserId {
        self.interaction.user.id
    }
    /// Looks for the argument `name` of the invoked command.
    pub fn get_argument(&self, name: &str) -> Option<&'a CommandDataOptionValue> {
        self.options.iter().find(|option| option.name == name).map(|option| &option.value)
    }
    /// String argument. `Err` if present with another type.
    pub fn get_string(&self, name: &str) -> Result<Option<&'a str>, String> {
        match self.get_argument(name) {
            Some(CommandDataOptionValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(format!("{}: wrong argument type, string expected", name)),
            None => Ok(None),
        }
    }
    /// User argument. `Err` if present with another type.
    pub fn get_user(&self, name: &str) -> Result<Option<UserId>, String> {
        match self.get_argument(name) {
            Some(CommandDataOptionValue::User(id)) => Ok(Some(*id)),
            Some(_) => Err(format!("{}: wrong argument type, user expected", name)),
            None => Ok(None),
        }
    }

    pub async fn delayed_response<'b>(&self, ctx: &'b Context, ephemeral: bool) -> serenity::Result<DelayedResponse<'b>>
        where 'a: 'b
    {
        DelayedResponse::new(ctx, self.interaction, ephemeral).await
    }
}
