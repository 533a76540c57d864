use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use trip_splitter::{
    Amount, Email, NewExpense, TripName, UserName, count_users, create_expense, create_trip,
    create_user, get_expenses_for_trip, initialize_db,
};

/// A utility for creating a demo database for the trip_splitter server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test users...");
    let mut users = Vec::new();
    for (name, email) in [
        ("Alice", "alice@example.com"),
        ("Bob", "bob@example.com"),
        ("Carol", "carol@example.com"),
    ] {
        users.push(create_user(UserName::new(name)?, Email::new(email)?, &conn)?);
    }

    println!("Creating test trip...");
    let trip = create_trip(
        TripName::new("Lake Weekend")?,
        "Cabin by the lake with the crew.",
        &conn,
    )?;

    println!("Creating test expenses...");
    for (description, dollars, payer) in [
        ("Cabin rental", 240.0, &users[0]),
        ("Groceries", 75.5, &users[1]),
    ] {
        create_expense(
            NewExpense::new(description, Amount::new(dollars)?, trip.id, payer.id)?,
            &conn,
        )?;
    }

    println!(
        "Success! Created {} users and {} expenses.",
        count_users(&conn)?,
        get_expenses_for_trip(trip.id, &conn)?.len()
    );

    Ok(())
}
