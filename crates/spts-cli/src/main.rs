use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use spts_auth::Role;
use spts_cli::{NewStaff, create_staff};
use spts_config::DatabaseConfig;
use spts_core::hash_password;
use spts_db::init_db_pool;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "spts-cli")]
#[command(about = "SPTS CLI - Administrative tools for SPTS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a staff account (teacher, principal or admin)
    CreateStaff {
        /// Login user name
        #[arg(short = 'u', long)]
        user_name: Option<String>,

        /// teacher, principal or admin
        #[arg(short = 'r', long, default_value = "admin")]
        role: Role,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Other names
        #[arg(short = 'o', long)]
        other_names: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Employee id
        #[arg(long)]
        emp_id: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Print a bcrypt hash for a password
    HashPassword {
        /// Password (will be prompted securely if not provided)
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateStaff {
            user_name,
            role,
            last_name,
            other_names,
            email,
            emp_id,
            password,
        } => {
            handle_create_staff(
                user_name,
                role,
                last_name,
                other_names,
                email,
                emp_id,
                password,
            )
            .await
        }
        Commands::HashPassword { password } => handle_hash_password(password),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

fn prompt(value: Option<String>, label: &str) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(label).interact_text(),
    }
}

fn prompt_password(value: Option<String>) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact(),
    }
}

async fn handle_create_staff(
    user_name: Option<String>,
    role: Role,
    last_name: Option<String>,
    other_names: Option<String>,
    email: Option<String>,
    emp_id: Option<String>,
    password: Option<String>,
) -> CliResult {
    let staff = NewStaff {
        user_name: prompt(user_name, "User name")?,
        role,
        last_name: prompt(last_name, "Last name")?,
        other_names: prompt(other_names, "Other names")?,
        email: prompt(email, "Email address")?,
        emp_id: prompt(emp_id, "Employee id")?,
        password: prompt_password(password)?,
    };

    let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
    let teacher_id = create_staff(&pool, &staff).await?;

    println!("\n✅ Staff account created successfully!");
    println!("   Teacher id: {}", teacher_id);
    println!("   User name: {}", staff.user_name);
    println!("   Role: {}", staff.role);
    Ok(())
}

fn handle_hash_password(password: Option<String>) -> CliResult {
    let password = prompt_password(password)?;
    let hash = hash_password(&password).map_err(|e| e.error.to_string())?;
    println!("{}", hash);
    Ok(())
}
