//! # Core library of nicktag
//! 
//! This library provides the component system the bot is built on.
//! 
//! ## Components system
//! 
//! Each component manage its own data and receives every gateway event from the client.
//! 
//! A component implements the [`Component`] trait, which is composed of two traits: 
//! - [`ComponentEvent`] which manage Discord gateway events.
//! - [`ComponentDeclarative`] which declares the application commands 
//!     (groups, command names, arguments, description...)
//! 
//! ## Simplify serenity
//! 
//! [`serenity`] implements the Discord API very well but the interaction payloads 
//! are verbose to walk through. [`ApplicationCommandEmbed`] and [`message`] give 
//! shortcuts to read command arguments and answer them.

pub mod declarative;
pub mod event;
pub mod container;
pub mod embed;
pub mod message;
use std::sync::Arc;

pub use declarative::ComponentDeclarative;
pub use event::ComponentEvent;
pub use container::ComponentContainer;
pub use embed::ApplicationCommandEmbed;

pub trait Component: ComponentDeclarative + ComponentEvent {}
pub type Components = Vec<Arc<dyn Component>>;
