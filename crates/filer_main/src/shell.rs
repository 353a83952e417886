//! Line-oriented shell over the navigation session
//!
//! Thin by design: parses one command per line, forwards it to the engine,
//! prints the listing that comes back. All real behavior lives in
//! filer_core / filer_fs.

use anyhow::Result;
use filer_core::{AppConfig, AppError, FilerSession, Listing, Location};
use filer_fs::PasteOutcome;
use std::io::{self, Write};

pub fn run(mut session: FilerSession, config: &AppConfig) -> Result<()> {
    render(&session.listing());

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        let needs_arg = matches!(
            command,
            "cd" | "vol" | "copy" | "cut" | "rm" | "mkdir" | "rename" | "open"
        );
        if needs_arg && arg.is_empty() {
            println!("Usage: {} NAME", command);
            continue;
        }

        match command {
            "ls" => render(&session.listing()),
            "pwd" => println!("{}", session.location().display()),
            "cd" => render(&session.enter(arg)),
            "back" => render(&session.back()),
            "roots" => render(&session.navigate(Location::VolumesRoot)),
            "vol" => select_volume(&mut session, arg),
            "copy" => report(session.copy(arg)),
            "cut" => report(session.cut(arg)),
            "paste" => paste(&mut session),
            "rm" => delete(&mut session, arg, config),
            "mkdir" => match session.create_folder(arg) {
                Ok(listing) => render(&listing),
                Err(e) => print_error(&e),
            },
            "rename" => rename(&mut session, arg),
            "open" => report(session.open(arg)),
            "help" => help(),
            "quit" | "exit" => break,
            other => println!("Unknown command: {} (try 'help')", other),
        }
    }

    tracing::info!("QuickFiler exiting");
    Ok(())
}

fn render(listing: &Listing) {
    println!("\n{}", listing.display_path());
    match listing {
        Listing::Volumes(volumes) => {
            for (index, volume) in volumes.iter().enumerate() {
                println!("  [{}] {}", index, volume.display_label());
            }
        }
        Listing::Directory { entries, .. } | Listing::InvalidDirectory { entries, .. } => {
            for entry in entries {
                if entry.is_dir() {
                    println!("  {}/", entry.name);
                } else {
                    println!("  {}", entry.name);
                }
            }
        }
    }
}

fn select_volume(session: &mut FilerSession, arg: &str) {
    let volumes = match session.listing() {
        Listing::Volumes(volumes) => volumes,
        _ => {
            println!("'vol' only works in the volumes view (try 'roots')");
            return;
        }
    };

    match arg.parse::<usize>().ok().and_then(|i| volumes.get(i)) {
        Some(volume) => render(&session.select_volume(volume)),
        None => println!("No such volume: {}", arg),
    }
}

fn paste(session: &mut FilerSession) {
    match session.paste() {
        Ok((PasteOutcome::NoOp, _)) => println!("Clipboard is empty"),
        Ok((PasteOutcome::Pasted { dest, .. }, listing)) => {
            println!("Pasted: {}", dest.display());
            render(&listing);
        }
        Err(e) => print_error(&e),
    }
}

fn delete(session: &mut FilerSession, name: &str, config: &AppConfig) {
    if config.filer.confirm_delete && !confirm(&format!("Delete '{}'?", name)) {
        return;
    }

    match session.delete(name) {
        Ok(listing) => render(&listing),
        Err(e) => print_error(&e),
    }
}

fn rename(session: &mut FilerSession, arg: &str) {
    let Some((old_name, new_name)) = arg.split_once(' ') else {
        println!("Usage: rename OLD NEW");
        return;
    };

    match session.rename(old_name.trim(), new_name.trim()) {
        Ok(listing) => render(&listing),
        Err(e) => print_error(&e),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y")
}

fn report(result: Result<(), AppError>) {
    if let Err(e) = result {
        print_error(&e);
    }
}

fn print_error(error: &AppError) {
    tracing::warn!("Operation failed: {}", error);
    println!("Error: {}", error.user_message());
}

fn help() {
    println!(
        "Commands:\n\
         \x20 ls                 list the current location\n\
         \x20 cd NAME            enter a child directory\n\
         \x20 back               go to the parent (volumes view from a root)\n\
         \x20 roots              show the volumes view\n\
         \x20 vol N              enter volume N from the volumes view\n\
         \x20 copy NAME          stage NAME for a copy-paste\n\
         \x20 cut NAME           stage NAME for a move-paste\n\
         \x20 paste              paste the staged entry here\n\
         \x20 rm NAME            delete NAME (recursive for directories)\n\
         \x20 mkdir NAME         create a folder\n\
         \x20 rename OLD NEW     rename an entry\n\
         \x20 open NAME          open a file externally\n\
         \x20 pwd                print the current location\n\
         \x20 quit               exit"
    );
}
