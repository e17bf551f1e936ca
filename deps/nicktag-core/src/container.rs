use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Components, event::ComponentEventDispatcher, Component, declarative::Node};

/// # The component container
/// 
/// Stores the components of the bot in their registration order.
#[derive(Clone, Default)]
pub struct ComponentContainer(Components);
pub type RefContainer = Arc<RwLock<ComponentContainer>>;

impl ComponentContainer {
    pub fn new() -> ComponentContainer {
        ComponentContainer(Vec::new())
    }
    /// Wraps the container so components can keep a handle on it.
    pub fn into_ref(self) -> RefContainer {
        Arc::new(RwLock::new(self))
    }
    /// Create a [`ComponentEventDispatcher`] from the components in the container.
    /// Components added afterward are not part of the dispatcher.
    pub fn get_event_dispatcher(&self) -> ComponentEventDispatcher {
        ComponentEventDispatcher::new(self.0.clone())
    }
    /// Add a component to the container and returns a shared handle on it.
    pub fn add_component<T: 'static + Component>(&mut self, comp: T) -> Arc<T> {
        let arc = Arc::new(comp);
        self.0.push(Arc::clone(&arc) as Arc<dyn Component>);
        arc
    }
    /// Command trees of every component declaring application commands.
    pub fn declaratives(&self) -> impl Iterator<Item = &'static Node> + '_ {
        self.0.iter().filter_map(|comp| comp.declarative())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl AsRef<Components> for ComponentContainer {
    fn as_ref(&self) -> &Components {
        &self.0
    }
}
