use std::{slice::Iter, fmt::Display};

use serenity::{
    builder::{CreateCommand, CreateCommandOption},
    model::application::CommandOptionType,
};

/// The component declaration trait.
///
/// Declares the groups and root slash commands of a component.
///
/// Components only handling events keep the default implementation.
pub trait ComponentDeclarative {
    fn declarative(&self) -> Option<&'static Node> {
        None
    }
}
/// Node of the component declaration.
///
/// The component declaration is a tree of nodes.
/// Each node contains other nodes ([`ChildNode`]) and commands ([`Command`]).
///
/// `children` and `commands` are meant to be declared `static` per component.
pub struct Node {
    pub children: &'static [ChildNode],
    pub commands: &'static [Command]
}
impl Node {
    /// Root application commands of this node.
    pub fn application_commands(&self) -> Vec<CreateCommand> {
        self.children.iter().map(CreateCommand::from)
            .chain(self.commands.iter().map(CreateCommand::from))
            .collect()
    }
    pub fn iter_flat(&'static self) -> IterFlatNode {
        IterFlatNode::new(self)
    }
}
/// Group of commands
pub struct ChildNode {
    /// Name of the group application command.
    pub name: &'static str,
    pub description: &'static str,
    pub node: Node,
}
impl From<&ChildNode> for CreateCommandOption {
    fn from(group: &ChildNode) -> Self {
        let app_cmd = CreateCommandOption::new(CommandOptionType::SubCommandGroup, group.name, group.description);
        let app_cmd = group.node.children.iter().fold(app_cmd, |app_cmd, grp| app_cmd.add_sub_option(grp.into()));
        group.node.commands.iter().fold(app_cmd, |app_cmd, cmd| app_cmd.add_sub_option(cmd.into()))
    }
}
impl From<&ChildNode> for CreateCommand {
    fn from(group: &ChildNode) -> Self {
        let app_cmd = CreateCommand::new(group.name).description(group.description);
        let app_cmd = group.node.children.iter().fold(app_cmd, |app_cmd, grp| app_cmd.add_option(grp.into()));
        group.node.commands.iter().fold(app_cmd, |app_cmd, cmd| app_cmd.add_option(cmd.into()))
    }
}
impl Display for ChildNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (group): {}", self.name, self.description)
    }
}

/// Command description data
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    /// Can be empty.
    pub args: &'static [Argument],
}

impl From<&Command> for CreateCommandOption {
    fn from(command: &Command) -> Self {
        let app_cmd = CreateCommandOption::new(CommandOptionType::SubCommand, command.name, command.description);
        command.args.iter().fold(app_cmd, |app_cmd, arg| app_cmd.add_sub_option(arg.into()))
    }
}
impl From<&Command> for CreateCommand {
    fn from(command: &Command) -> Self {
        let app_cmd = CreateCommand::new(command.name).description(command.description);
        command.args.iter().fold(app_cmd, |app_cmd, arg| app_cmd.add_option(arg.into()))
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (command): {}", self.name, self.description)
    }
}

/// Argument description data
pub struct Argument {
    pub name: &'static str,
    /// Restricted to value types of [`CommandOptionType`].
    pub type_: CommandOptionType,
    pub description: &'static str,
    /// Whether the argument is optional to the command.
    pub optional: bool,
}
impl From<&Argument> for CreateCommandOption {
    fn from(argument: &Argument) -> Self {
        CreateCommandOption::new(argument.type_, argument.name, argument.description)
            .required(!argument.optional)
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opt_str = if self.optional { " (optional)" } else { "" };
        write!(f, "{}{}: {}", self.name, opt_str, self.description)
    }
}

/// Flat node iterator.
///
/// Iterates over the node tree recursively, children first then commands.
///
/// [`next()`] returns the complete path to the current item
/// and the current item ([`ChildNode`] or [`Command`]).
///
/// [`next()`]: IterFlatNode::next
pub struct IterFlatNode
{
    name: Option<&'static str>,
    children: Iter<'static, ChildNode>,
    current_child: Option<Box<IterFlatNode>>,
    commands: Iter<'static, Command>,
}

impl IterFlatNode
{
    pub fn new(node: &'static Node) -> Self {
        Self::with_name(node, None)
    }
    fn with_name(node: &'static Node, name: Option<&'static str>) -> Self {
        IterFlatNode {
            name,
            children: node.children.iter(),
            current_child: None,
            commands: node.commands.iter(),
        }
    }
}

/// Item returned by [`IterFlatNode::next()`].
pub enum IterType {
    Node(&'static ChildNode),
    Command(&'static Command)
}

impl Display for IterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IterType::Node(node) => write!(f, "{}", node),
            IterType::Command(command) => write!(f, "{}", command),
        }
    }
}

impl Iterator for IterFlatNode
{
    /// Complete path of the current item and the current item
    type Item = (String, IterType);
    fn next(&mut self) -> Option<Self::Item> {
        let fullname = |other: &str| {
            match self.name {
                Some(name) => format!("{} {}", name, other),
                None => other.into(),
            }
        };
        loop {
            if let Some(node) = &mut self.current_child {
                match node.next() {
                    Some((name, v)) => return Some((fullname(&name), v)),
                    None => {
                        self.current_child = None;
                        continue;
                    }
                }
            } else if let Some(child_node) = self.children.next() {
                self.current_child = Some(Box::new(IterFlatNode::with_name(&child_node.node, Some(child_node.name))));
                return Some((fullname(child_node.name), IterType::Node(child_node)));
            } else if let Some(command) = self.commands.next() {
                return Some((fullname(command.name), IterType::Command(command)));
            } else {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NODE: Node = Node {
        children: &[ChildNode {
            name: "group",
            description: "A group",
            node: Node {
                children: &[],
                commands: &[Command {
                    name: "inner",
                    description: "Inside the group",
                    args: &[Argument { name: "who", type_: CommandOptionType::User, description: "Someone", optional: true }],
                }],
            },
        }],
        commands: &[Command { name: "root", description: "At the root", args: &[] }],
    };

    #[test]
    fn flat_names() {
        let names = NODE.iter_flat().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["group", "group inner", "root"]);
    }
    #[test]
    fn one_application_command_per_root_item() {
        assert_eq!(NODE.application_commands().len(), 2);
    }
    #[test]
    fn argument_display() {
        let (_, item) = NODE.iter_flat().nth(1).unwrap();
        match item {
            IterType::Command(cmd) => assert_eq!(cmd.args[0].to_string(), "who (optional): Someone"),
            IterType::Node(_) => panic!("command expected"),
        }
    }
}
