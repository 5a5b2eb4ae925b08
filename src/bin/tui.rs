use anyhow::Result;
use quickdo::context::{AppContext, StandardContext};
use quickdo::storage::LocalStorage;
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Handle help flag
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return Ok(());
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(None));

    // CLI Command: quickdo export
    if args.len() > 1 && args[1] == "export" {
        let tasks = LocalStorage::load(ctx.as_ref())?;
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    // Normal TUI startup
    quickdo::tui::run(ctx)
}

fn print_help() {
    println!(
        "Quickdo v{} - Fast and minimal to-do list for the terminal (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    quickdo                     Start interactive TUI");
    println!("    quickdo export              Dump tasks as JSON to stdout");
    println!("    quickdo --help              Show this help message");
    println!();
    println!("EXPORT COMMAND:");
    println!("    quickdo export > backup.json    Save tasks to a file");
    println!("    quickdo export | jq '.[].text'  Filter output");
    println!();
    println!("KEYBINDINGS:");
    println!("    a                 Add a task");
    println!("    e                 Edit the selected task (emptying the text deletes it)");
    println!("    Space             Toggle the selected task done/active");
    println!("    d                 Delete the selected task");
    println!("    J / K             Move the selected task down / up");
    println!("    H                 Hide or show completed tasks");
    println!("    C                 Clear all tasks (asks for confirmation)");
    println!("    j / k, Arrows     Navigate");
    println!("    ?                 Toggle the full help footer");
    println!("    q                 Quit");
    println!();
    println!("FILES:");
    println!("    Tasks are stored as JSON in the platform data directory;");
    println!("    preferences live in config.toml in the platform config directory.");
}
