//! Enregistrement des commandes slash.
//!
//! Les commandes déclarées par les composants ([ComponentDeclarative]) sont
//! enregistrées sur chaque serveur au démarrage, puis sur les serveurs rejoints ensuite.
//!
//! [ComponentDeclarative]: nicktag_core::ComponentDeclarative

use std::collections::HashMap;

use nicktag_core::{self as core, container::RefContainer, declarative::Node};
use serenity::{
    async_trait,
    builder::CreateCommand,
    client::Context,
    model::{
        event::{Event, GuildCreateEvent, ReadyEvent},
        id::{CommandId, GuildId},
    },
};
use tokio::sync::RwLock;
use crate::{log_debug, log_info, log_error};

pub struct SlashCommand {
    container: RefContainer,
    application_commands: RwLock<HashMap<GuildId, HashMap<String, CommandId>>>,
}

impl SlashCommand {
    pub fn new(container: RefContainer) -> SlashCommand {
        SlashCommand {
            container,
            application_commands: RwLock::new(HashMap::new()),
        }
    }

    async fn commands(&self) -> Vec<CreateCommand> {
        let container = self.container.read().await;
        let declaratives = container.declaratives().collect::<Vec<&'static Node>>();
        for node in &declaratives {
            node.iter_flat().for_each(|(fullname, item)| log_debug!("|{}| {}", fullname, item));
        }
        declaratives.into_iter().flat_map(Node::application_commands).collect()
    }

    async fn register(&self, ctx: &Context, guild_id: GuildId, commands: Vec<CreateCommand>) {
        let guild_name = guild_id.name(ctx).unwrap_or_else(|| guild_id.to_string());
        match guild_id.set_commands(ctx, commands).await {
            Ok(guild_app_cmds) => {
                let guild_app_cmds = guild_app_cmds.into_iter()
                    .map(|app_cmd| (app_cmd.name, app_cmd.id))
                    .collect();
                self.application_commands.write().await.insert(guild_id, guild_app_cmds);
                log_info!("Application commands added to {}", guild_name);
            },
            Err(why) => log_error!("Error while setting application commands to \"{}\": {}", guild_name, why),
        }
    }

    async fn on_ready(&self, ctx: &Context, ready: &ReadyEvent) {
        let commands = self.commands().await;
        for guild in &ready.ready.guilds {
            self.register(ctx, guild.id, commands.clone()).await;
        }
    }

    async fn on_guild_create(&self, ctx: &Context, guild_id: GuildId) {
        if self.is_registered(guild_id).await {
            return;
        }
        let commands = self.commands().await;
        self.register(ctx, guild_id, commands).await;
    }

    pub async fn is_registered(&self, guild_id: GuildId) -> bool {
        self.application_commands.read().await.contains_key(&guild_id)
    }
}

#[async_trait]
impl core::ComponentEvent for SlashCommand {
    async fn event(&self, ctx: &Context, event: &Event) {
        match event {
            Event::Ready(ready) => self.on_ready(ctx, ready).await,
            Event::GuildCreate(GuildCreateEvent { guild, .. }) => self.on_guild_create(ctx, guild.id).await,
            _ => (),
        }
    }
}

impl core::ComponentDeclarative for SlashCommand {}

impl core::Component for SlashCommand {}
