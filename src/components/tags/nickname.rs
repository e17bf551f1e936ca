//! Dérivation du nom de base et composition du pseudo tagué.

use std::fmt;

/// Longueur maximale d'un pseudo sur Discord.
pub const MAX_NICKNAME_LENGTH: usize = 32;
/// Un nom de base doit être strictement plus court pour recevoir un tag.
pub const MAX_BASE_NAME_LENGTH: usize = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nom de base trop long pour recevoir un tag
    NameTooLong,
    /// Nom de base + tag dépasse la limite de Discord
    CombinedTooLong,
    /// Tag absent ou contenant un crochet ouvrant, il ne pourrait plus être retiré
    InvalidTag,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NameTooLong => write!(f, "Nickname is too long for a tag, it must be shorter than {} characters.", MAX_BASE_NAME_LENGTH),
            ValidationError::CombinedTooLong => write!(f, "Nickname + tag is too long, in total they must be no more than {} characters.", MAX_NICKNAME_LENGTH),
            ValidationError::InvalidTag => write!(f, "A tag is required and can't contain '['."),
        }
    }
}

/// Retire le tag en fin de pseudo (`"Alice [PRO]"` donne `"Alice"`).
///
/// Seul un groupe entre crochets terminant le pseudo est retiré. Sans groupe final,
/// le pseudo est retourné tel quel (sans espaces autour).
pub fn derive_base_name(display_name: &str) -> String {
    let name = display_name.trim();
    let base = name.strip_suffix(']')
        .and_then(|head| head.rfind('['))
        .map(|open| &name[..open])
        .unwrap_or(name);
    base.trim().to_string()
}

/// Compose le pseudo `"<base> [<tag>]"`.
///
/// Le tag est repris tel quel. Un `[` dans le tag est refusé : [`derive_base_name`]
/// couperait le pseudo sur ce crochet au prochain changement de tag.
pub fn compose_tagged(base_name: &str, tag: &str) -> Result<String, ValidationError> {
    if tag.contains('[') {
        return Err(ValidationError::InvalidTag);
    }
    let base = base_name.trim();
    if base.chars().count() >= MAX_BASE_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    let nickname = format!("{} [{}]", base, tag);
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(ValidationError::CombinedTooLong);
    }
    Ok(nickname)
}
