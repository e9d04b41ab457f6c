//! Command-line interface for xsdvalue

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use xsdvalue::values::{builtin_type, parse_builtin, BUILTIN_TYPES};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdvalue")]
#[command(author, version, about = "XSD primitive datatype validation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a lexical value against a built-in type and print its
    /// canonical form
    Validate {
        /// Built-in type name, e.g. date, duration, decimal
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// The lexical value to validate
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// List the supported built-in type names
    Types,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { type_name, value } => cmd_validate(&type_name, &value),
        Commands::Types => cmd_types(),
    }
}

#[cfg(feature = "cli")]
fn cmd_validate(type_name: &str, value: &str) {
    if builtin_type(type_name).is_none() {
        eprintln!("Unknown type: {}", type_name);
        eprintln!("Run 'xsdvalue types' for the supported names");
        std::process::exit(2);
    }

    match parse_builtin(type_name, value) {
        Ok(parsed) => {
            println!("✓ valid {}", type_name);
            println!("{}", parsed.lexical());
        }
        Err(error) => {
            println!("✗ invalid {}", type_name);
            println!();
            println!("  - {}", error);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_types() {
    for builtin in BUILTIN_TYPES.iter() {
        println!("{}", builtin.name);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
