//! Core de l'application. 
//! L'initialisation du bot et la gestion des composants se fait dans ce module.

use serenity::{Client, prelude::GatewayIntents};
use crate::{components as cmp, config::Config};
use nicktag_core as core;

type Result<T> = serenity::Result<T>;

/// Structure du bot.
/// 
/// Le bot est composé de plusieurs composants placés dans un [ComponentContainer]. 
/// Le conteneur fournit au client un [ComponentEventDispatcher] qui transmet 
/// les événements Discord à chaque composant.
/// 
/// [ComponentContainer]: core::ComponentContainer
/// [ComponentEventDispatcher]: core::event::ComponentEventDispatcher
pub struct Bot {
    /// Client discord de serenity
    client: Client,
    _cmp_container: core::container::RefContainer
}

impl Bot {
    /// Crée un nouveau bot et l'initialise.
    pub async fn new(config: &Config) -> Result<Bot> {
        let ref_container = core::ComponentContainer::new().into_ref();
        {
            let mut container = ref_container.write().await;
            container.add_component(cmp::SlashCommand::new(ref_container.clone()));
            container.add_component(cmp::Misc::new(config.permissions));
            container.add_component(cmp::Tags::new());
        }
        let client = Client::builder(&config.token, Self::intents())
            .raw_event_handler(ref_container.read().await.get_event_dispatcher())
            .await?;
        Ok(Bot{
            client,
            _cmp_container: ref_container
        })
    }
    /// `GUILDS` remplit le cache des rôles, les membres sont récupérés à la demande.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }
    /// Lance le bot.
    pub async fn start(&mut self) -> Result<()> {
        self.client.start().await
    }
}
