//! Tags de pseudo.
//!
//! `/tag set` ajoute un tag entre crochets à la fin du pseudo d'un membre,
//! `/tag clear` le retire. Modifier le pseudo d'un autre membre nécessite
//! la permission `MANAGE_NICKNAMES`.

mod directory;
pub mod handler;
pub mod nickname;

use nicktag_core::{
    self as core,
    declarative::{Argument, ChildNode, Command, Node},
    message, ApplicationCommandEmbed,
};
use serenity::{
    async_trait,
    client::Context,
    model::{
        application::{CommandOptionType, Interaction},
        event::{Event, InteractionCreateEvent},
    },
};
use crate::{log_debug, log_error, log_info, log_warn};
use self::{
    directory::GuildDirectory,
    handler::{TagAction, TagError, TagOutcome},
    nickname::ValidationError,
};

static DECLARATIVE: Node = Node {
    children: &[ChildNode {
        name: "tag",
        description: "User tags",
        node: Node {
            children: &[],
            commands: &[
                Command {
                    name: "clear",
                    description: "Clear your user tag",
                    args: &[
                        Argument { name: "member", type_: CommandOptionType::User, description: "Who's tag to clear", optional: true },
                    ],
                },
                Command {
                    name: "set",
                    description: "Set your user tag",
                    args: &[
                        Argument { name: "tag", type_: CommandOptionType::String, description: "What do you want your tag to be?", optional: false },
                        Argument { name: "member", type_: CommandOptionType::User, description: "Who to apply the tag to", optional: true },
                    ],
                },
            ],
        },
    }],
    commands: &[],
};

pub struct Tags;

impl Tags {
    pub fn new() -> Self {
        Tags
    }

    async fn on_command(&self, ctx: &Context, app_cmd: ApplicationCommandEmbed<'_>, action: TagAction) {
        let resp = match app_cmd.delayed_response(ctx, true).await {
            Ok(resp) => resp,
            Err(e) => {
                log_error!("tag: unable to answer {}: {}", app_cmd.fullname(), e);
                return;
            }
        };
        let msg = match self.run(ctx, &app_cmd, action).await {
            Ok(outcome) => {
                let invoker = app_cmd.get_user_id();
                let target = app_cmd.get_user("member").ok().flatten().unwrap_or(invoker);
                match &outcome {
                    TagOutcome::Renamed(_) => log_info!("{} renamed to \"{}\" by {}", target, outcome.nickname(), invoker),
                    TagOutcome::Unchanged(_) => log_debug!("{} already named \"{}\"", target, outcome.nickname()),
                }
                message::success("Nickname updated")
            },
            Err(e) => message::error(e),
        };
        if let Err(e) = resp.send_message(msg.set_ephemeral(true)).await {
            log_error!("tag: unable to send the response: {}", e);
        }
    }

    async fn run(&self, ctx: &Context, app_cmd: &ApplicationCommandEmbed<'_>, action: TagAction) -> Result<TagOutcome, TagError> {
        let guild_id = app_cmd.get_guild_id().ok_or(TagError::NotInGuild)?;
        let selected = app_cmd.get_user("member").map_err(|e| {
            log_warn!("tag: {}", e);
            TagError::NoMemberSelected
        })?;
        let permissions = app_cmd.interaction.member.as_ref().and_then(|member| member.permissions);
        let directory = GuildDirectory::new(ctx, guild_id);
        let auth = handler::authorization(&directory, app_cmd.get_user_id(), selected, permissions).await?;
        match action {
            TagAction::Clear => handler::clear_tag(&directory, &auth).await,
            TagAction::Set => {
                let tag = app_cmd.get_string("tag")
                    .ok()
                    .flatten()
                    .ok_or(TagError::Validation(ValidationError::InvalidTag))?;
                handler::set_tag(&directory, &auth, tag).await
            }
        }
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl core::ComponentEvent for Tags {
    async fn event(&self, ctx: &Context, event: &Event) {
        if let Event::InteractionCreate(InteractionCreateEvent { interaction: Interaction::Command(command), .. }) = event {
            let app_cmd = ApplicationCommandEmbed::new(command);
            match app_cmd.fullname().as_str() {
                "tag.clear" => self.on_command(ctx, app_cmd, TagAction::Clear).await,
                "tag.set" => self.on_command(ctx, app_cmd, TagAction::Set).await,
                _ => (),
            }
        }
    }
}

impl core::ComponentDeclarative for Tags {
    fn declarative(&self) -> Option<&'static Node> {
        Some(&DECLARATIVE)
    }
}

impl core::Component for Tags {}
