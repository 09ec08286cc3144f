use anyhow::Result;

use crate::cli::handlers;

/// Defines a CLI action, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all CLI actions.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "open",
        aliases: &["o"],
        handler: handlers::open::handle,
    },
    CommandDefinition {
        name: "config",
        aliases: &["cfg"],
        handler: handlers::config::handle,
    },
    CommandDefinition {
        name: "methods",
        aliases: &["ls"],
        handler: handlers::methods::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes the raw arguments to an action handler.
///
/// `openvim <action> [args...]` runs the action; anything else is a shortcut for
/// `openvim open <file> [args...]`.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((first, rest)) = all_args.split_first() else {
        println!("{}", t!("cli.info.usage_hint"));
        return Ok(());
    };

    match find_command(first) {
        Some(command) => (command.handler)(rest.to_vec()),
        None => handlers::open::handle(all_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("open").map(|c| c.name), Some("open"));
        assert_eq!(find_command("o").map(|c| c.name), Some("open"));
        assert_eq!(find_command("cfg").map(|c| c.name), Some("config"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("methods"));
        assert!(find_command("src/main.rs").is_none());
    }

    #[test]
    fn test_empty_args_are_not_an_error() {
        assert!(dispatch(Vec::new()).is_ok());
    }
}
