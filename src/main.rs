//! rolodb command-line interface.
//!
//! Two subcommands:
//! - `repl` - interactive contact manager over a CSV dataset
//! - `generate` - write a random contact dataset to CSV

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use rolodb::{
    Contact, ContactDirectory, ContactId, DEFAULT_CONTACTS_FILE, DEFAULT_MIN_DEGREE, datagen,
    storage,
};

#[derive(Parser)]
#[command(
    name = "rolodb",
    version,
    about = "An in-memory contact directory indexed by a B-tree"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive contact manager.
    Repl {
        /// CSV dataset to load on startup; starts empty when the file is missing.
        #[arg(long, default_value = DEFAULT_CONTACTS_FILE)]
        file: PathBuf,

        /// Minimum degree of the underlying B-tree.
        #[arg(long, default_value_t = DEFAULT_MIN_DEGREE)]
        degree: usize,
    },
    /// Generate a random contact dataset as CSV.
    Generate {
        /// Number of contacts to generate.
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Output CSV file.
        #[arg(long, default_value = DEFAULT_CONTACTS_FILE)]
        output: PathBuf,

        /// First contact id; the rest follow sequentially.
        #[arg(long, default_value_t = 0)]
        start_id: u64,

        /// RNG seed for a reproducible dataset.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Repl { file, degree } => run_repl(&file, degree),
        Command::Generate {
            count,
            output,
            start_id,
            seed,
        } => run_generate(count, &output, start_id, seed),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(
    count: usize,
    output: &Path,
    start_id: u64,
    seed: Option<u64>,
) -> rolodb::Result<()> {
    let mut rng = datagen::seeded_rng(seed);
    let contacts = datagen::generate_contacts(count, start_id, &mut rng);
    storage::csv::write_contacts(output, &contacts)?;
    println!(
        "{} generated with {} realistic contacts.",
        output.display(),
        count
    );
    Ok(())
}

fn run_repl(file: &Path, degree: usize) -> rolodb::Result<()> {
    let mut directory = ContactDirectory::with_degree(degree)?;
    if file.exists() {
        let loaded = directory.load_csv(file)?;
        println!("Loaded {loaded} contacts from {}.", file.display());
    } else {
        println!(
            "{} not found, starting with an empty directory.",
            file.display()
        );
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_menu();
        let Some(choice) = prompt(&mut lines, "Enter your choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => show_all(&directory),
            "2" => search_by_last_name(&directory, &mut lines)?,
            "3" => insert_contact(&mut directory, &mut lines)?,
            "4" => delete_by_last_name(&mut directory, &mut lines)?,
            "5" => search_by_id(&directory, &mut lines)?,
            "6" => list_id_range(&directory, &mut lines)?,
            "7" => delete_by_id(&mut directory, &mut lines)?,
            "8" => match directory.save_csv(file) {
                Ok(()) => println!(
                    "Saved {} contacts to {}.",
                    directory.len(),
                    file.display()
                ),
                Err(err) => println!("{err}"),
            },
            "9" => show_stats(&directory),
            "0" => {
                println!("Exiting Application.");
                break;
            }
            _ => println!("Invalid choice, try again."),
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("Contact Manager B-Tree Options:");
    println!(" 1: Show all contacts");
    println!(" 2: Search contacts by last name");
    println!(" 3: Insert a new contact");
    println!(" 4: Delete contacts by last name");
    println!(" 5: Search contact by id");
    println!(" 6: List contacts in an id range");
    println!(" 7: Delete contact by id");
    println!(" 8: Save contacts to CSV");
    println!(" 9: Show index statistics");
    println!(" 0: Exit");
}

fn prompt<I>(lines: &mut I, label: &str) -> io::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn prompt_id<I>(lines: &mut I, label: &str) -> io::Result<Option<ContactId>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(text) = prompt(lines, label)? else {
        return Ok(None);
    };
    match text.parse::<u64>() {
        Ok(id) => Ok(Some(ContactId::new(id))),
        Err(_) => {
            println!("Invalid input: the contact id must be an unsigned integer.");
            Ok(None)
        }
    }
}

fn show_all(directory: &ContactDirectory) {
    if directory.is_empty() {
        println!("The directory is empty.");
        return;
    }
    println!("All contacts in id order:");
    for contact in directory.all() {
        println!("  {contact}");
    }
}

fn search_by_last_name<I>(directory: &ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(last_name) = prompt(lines, "Last name to search for: ")? else {
        return Ok(());
    };
    let hits = directory.find_by_last_name(&last_name);
    if hits.is_empty() {
        println!("No contact found with that last name.");
    } else {
        println!("Found {} contact(s):", hits.len());
        for contact in hits {
            println!("  {contact}");
        }
    }
    Ok(())
}

fn insert_contact<I>(directory: &mut ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(contact) = prompt_contact(lines)? else {
        return Ok(());
    };
    match directory.add(contact) {
        Ok(()) => println!("Contact inserted."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn prompt_contact<I>(lines: &mut I) -> io::Result<Option<Contact>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(id) = prompt_id(lines, "Contact id (integer): ")? else {
        return Ok(None);
    };
    let Some(first_name) = prompt(lines, "First name: ")? else {
        return Ok(None);
    };
    let Some(last_name) = prompt(lines, "Last name: ")? else {
        return Ok(None);
    };
    let Some(company) = prompt(lines, "Company: ")? else {
        return Ok(None);
    };
    let Some(phone) = prompt(lines, "Phone number: ")? else {
        return Ok(None);
    };

    if [&first_name, &last_name, &company, &phone]
        .iter()
        .any(|field| field.is_empty())
    {
        println!("All fields are required!");
        return Ok(None);
    }
    Ok(Some(Contact::new(id, first_name, last_name, company, phone)))
}

fn delete_by_last_name<I>(directory: &mut ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(last_name) = prompt(lines, "Last name to delete: ")? else {
        return Ok(());
    };
    let removed = directory.remove_by_last_name(&last_name);
    if removed == 0 {
        println!("No contact found with that last name.");
    } else {
        println!("Deleted {removed} contact(s).");
    }
    Ok(())
}

fn search_by_id<I>(directory: &ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(id) = prompt_id(lines, "Contact id: ")? else {
        return Ok(());
    };
    match directory.find(id) {
        Some(contact) => println!("  {contact}"),
        None => println!("No contact found under {id}."),
    }
    Ok(())
}

fn list_id_range<I>(directory: &ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(lo) = prompt_id(lines, "Lowest id: ")? else {
        return Ok(());
    };
    let Some(hi) = prompt_id(lines, "Highest id: ")? else {
        return Ok(());
    };
    let hits = directory.in_id_range(lo, hi);
    if hits.is_empty() {
        println!("No contacts in that range.");
    } else {
        for contact in hits {
            println!("  {contact}");
        }
    }
    Ok(())
}

fn delete_by_id<I>(directory: &mut ContactDirectory, lines: &mut I) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(id) = prompt_id(lines, "Contact id: ")? else {
        return Ok(());
    };
    match directory.remove(id) {
        Some(contact) => println!("Deleted {contact}."),
        None => println!("No contact found under {id}."),
    }
    Ok(())
}

fn show_stats(directory: &ContactDirectory) {
    println!(
        "{} contacts, tree height {}, {}",
        directory.len(),
        directory.height(),
        directory.stats()
    );
}
