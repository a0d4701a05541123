//! Minimal headless console example.
//!
//! Drives a `ConsoleEngine` directly, without Bevy or any UI.
//! Useful for testing or custom front ends.
//!
//! Run with: `cargo run --example minimal --no-default-features`

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dev_console::prelude::*;

struct Player {
    health: AtomicU32,
}

impl Player {
    fn heal(&self, console: &mut ConsoleEngine, args: &CommandArgs) -> HandlerResult {
        let amount: u32 = args.parse_or(0, 100);
        self.health.store(amount, Ordering::Relaxed);
        console.print(ConsoleOutputLevel::Result, format!("Health set to {}", amount));
        Ok(())
    }
}

fn main() -> Result<(), ConsoleError> {
    let mut console = ConsoleEngine::new();

    // Register a closure command
    console.create_command(
        "greet",
        |console: &mut ConsoleEngine, args| {
            let name = args.get(0).unwrap_or("World");
            console.print_line(format!("Hello, {}!", name));
            Ok(())
        },
        "Greet someone",
    )?;

    // Register a method on a host object
    let player = Arc::new(Player {
        health: AtomicU32::new(10),
    });
    console.create_bound_command("heal", &player, Player::heal, "Set player health")?;

    println!("Console initialized. Registered: greet, heal");
    println!("\n--- Sending test commands ---");

    for line in ["greet Developer", "heal 75", "help heal", "find greet", "nope"] {
        console.execute(line)?;
    }
    print_outputs(&mut console);

    println!("\n--- Autocomplete 'he' ---");
    for candidate in console.autocomplete_list("he", -1) {
        println!("  {}", candidate);
    }

    println!("\n--- History (newest first) ---");
    for line in console.history().iter().rev() {
        println!("  {}", line);
    }
    println!("Previous command: {}", console.prev_command());

    println!("\nPlayer health: {}", player.health.load(Ordering::Relaxed));
    Ok(())
}

/// Print and clear queued console output.
fn print_outputs(console: &mut ConsoleEngine) {
    for event in console.drain_output() {
        let Some(event) = event.as_output() else {
            println!("--- cleared ---");
            continue;
        };
        let prefix = match event.level {
            ConsoleOutputLevel::Debug => "[DEBUG]",
            ConsoleOutputLevel::Info => "[INFO]",
            ConsoleOutputLevel::Warn => "[WARN]",
            ConsoleOutputLevel::Error => "[ERROR]",
            ConsoleOutputLevel::Command => "[$]",
            ConsoleOutputLevel::Result => "[>]",
        };
        println!("{} {}", prefix, event.message);
    }
}
