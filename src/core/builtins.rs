//! Built-in console commands.

use super::{
    Command, CommandArgs, CommandRegistry, ConsoleEngine, ConsoleError, ConsoleOutputLevel,
    HandlerResult,
};

/// Register `help`, `commands`, `find`, `echo`, `clear` and `delete_history`.
pub(crate) fn register(registry: &mut CommandRegistry) -> Result<(), ConsoleError> {
    registry.register(
        Command::new("help", help).description("Show help for a command or list all commands"),
    )?;
    registry.register(Command::new("commands", commands).description("List all commands"))?;
    registry.register(
        Command::new("find", find).description("Search commands by name or description"),
    )?;
    registry.register(Command::new("echo", echo).description("Print text to console"))?;
    registry.register(Command::new("clear", clear).description("Clear console output"))?;
    registry.register(
        Command::new("delete_history", delete_history).description("Delete command history"),
    )?;
    Ok(())
}

fn help(console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult {
    if let Some(name) = args.get(0) {
        match console.command_description(name).map(str::to_string) {
            Ok(desc) => {
                let desc = if desc.is_empty() {
                    "No description".to_string()
                } else {
                    desc
                };
                console.print(ConsoleOutputLevel::Result, format!("{} - {}", name, desc));
            }
            Err(e) => console.print(ConsoleOutputLevel::Warn, e.to_string()),
        }
        return Ok(());
    }

    let names: Vec<String> = console
        .command_list()
        .into_iter()
        .map(str::to_string)
        .collect();
    console.print_line("Commands:");
    for name in names {
        console.print_line(format!("  {}", name));
    }
    console.print_line("Use 'help <name>' for details");
    Ok(())
}

fn commands(console: &mut ConsoleEngine, _args: &CommandArgs<'_>) -> HandlerResult {
    let lines: Vec<String> = console
        .registry()
        .iter()
        .map(|(name, cmd)| match cmd.get_description() {
            "" => name.to_string(),
            desc => format!("{} - {}", name, desc),
        })
        .collect();

    let count = lines.len();
    for line in lines {
        console.print_line(line);
    }
    console.print_line(format!("{} commands", count));
    Ok(())
}

fn find(console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult {
    let query = args.remainder();
    if query.is_empty() {
        console.print(ConsoleOutputLevel::Warn, "Usage: find <search term>");
        return Ok(());
    }

    let lines: Vec<String> = console
        .registry()
        .search(query)
        .into_iter()
        .map(|cmd| match cmd.get_description() {
            "" => cmd.name().to_string(),
            desc => format!("{} - {}", cmd.name(), desc),
        })
        .collect();

    let count = lines.len();
    for line in lines {
        console.print_line(line);
    }
    console.print_line(format!("{} results", count));
    Ok(())
}

fn echo(console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult {
    console.print_line(args.remainder());
    Ok(())
}

fn clear(console: &mut ConsoleEngine, _args: &CommandArgs<'_>) -> HandlerResult {
    console.clear();
    Ok(())
}

fn delete_history(console: &mut ConsoleEngine, _args: &CommandArgs<'_>) -> HandlerResult {
    console.history_mut().clear();
    Ok(())
}
