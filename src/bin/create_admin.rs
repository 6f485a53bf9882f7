//! CLI tool to create the admin account.
//!
//! Usage:
//!   cargo run --bin create-admin -- --email admin@college.edu --password 'S3cure!pass'
//!
//! The password may also come from `PORTFOLIO_ADMIN_PASSWORD`. An existing
//! account with the same email is left untouched.

use std::env;

use campus_portfolio_lib::config::{AdminBootstrap, Config};
use campus_portfolio_lib::db::DbPool;
use campus_portfolio_lib::services::accounts;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let mut email: Option<String> = None;
    let mut password: Option<String> = env::var("PORTFOLIO_ADMIN_PASSWORD").ok();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--email" | "-e" => {
                i += 1;
                if i < args.len() {
                    email = Some(args[i].clone());
                }
            }
            "--password" | "-p" => {
                i += 1;
                if i < args.len() {
                    password = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(email), Some(password)) = (email, password) else {
        eprintln!("Error: --email and --password are required");
        print_usage();
        std::process::exit(1);
    };

    if let Err(e) = accounts::validate_password(&password) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    let admin = AdminBootstrap { email, password };
    let (user, created) = match accounts::ensure_admin(&pool, &admin).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error creating admin: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    if created {
        println!("  Admin account created");
    } else {
        println!("  Account already exists, left unchanged");
    }
    println!();
    println!("  ID:     {}", user.id);
    println!("  Email:  {}", user.email);
    println!("  Role:   {}", user.role);
    println!("  Status: {}", user.status);
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: create-admin --email <email> [--password <password>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --email, -e     Admin email (required)");
    eprintln!("  --password, -p  Admin password (default: $PORTFOLIO_ADMIN_PASSWORD)");
    eprintln!("  --help, -h      Show this help");
    eprintln!();
}
