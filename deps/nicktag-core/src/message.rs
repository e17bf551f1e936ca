use serenity::builder::{CreateEmbed, EditInteractionResponse};
use serenity::model::Colour;

pub const COLOR_SUCCESS: Colour = Colour(0x1ed760);
pub const COLOR_ERROR: Colour = Colour(0xFF0000);

/// Message sent back to Discord.
///
/// Sent as the edit of a deferred interaction response.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub message: String,
    pub embeds: Vec<CreateEmbed>,
    pub ephemeral: bool,
}

impl Message {
    pub fn set_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

impl From<Message> for EditInteractionResponse {
    fn from(message: Message) -> Self {
        EditInteractionResponse::new()
            .content(message.message)
            .embeds(message.embeds)
    }
}

/// Error message
pub fn error<S: ToString>(error_message: S) -> Message {
    custom_embed("Error", error_message, COLOR_ERROR)
}
/// Success message
pub fn success<S: ToString>(success_message: S) -> Message {
    custom_embed("Done", success_message, COLOR_SUCCESS)
}
/// Single embed message with a title, a description and a colour.
pub fn custom_embed<S1, S2, C>(title: S1, message: S2, color: C) -> Message
    where
    S1: ToString,
    S2: ToString,
    C: Into<Colour>
{
    let embed = CreateEmbed::new()
        .title(title.to_string())
        .description(message.to_string())
        .colour(color);
    Message {
        embeds: vec![embed],
        ..Default::default()
    }
}
