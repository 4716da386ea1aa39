use crypt3::{apr1_crypt, md5_crypt, registry, sha256_crypt, sha512_crypt};

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::process::exit;

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(infer_subcommands = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Generate(GenerateArgs),
    Validate(ValidateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    Apr1,
    Md5,
    Sha256,
    Sha512,
}

#[derive(Clone, Debug, Args)]
struct GenerateArgs {
    #[arg(long, short)]
    password: Option<String>,
    #[arg(long, short, value_enum, default_value_t = Scheme::Sha512)]
    scheme: Scheme,
}

#[derive(Clone, Debug, Args)]
struct ValidateArgs {
    #[arg(long, short)]
    password: Option<String>,
    hash: String,
}

fn generate(GenerateArgs { password, scheme }: GenerateArgs) -> io::Result<()> {
    let pw = prompt_password(password)?;

    let hash = match scheme {
        Scheme::Apr1 => apr1_crypt::generate(&pw, ""),
        Scheme::Md5 => md5_crypt::generate(&pw, ""),
        Scheme::Sha256 => sha256_crypt::generate(&pw, ""),
        Scheme::Sha512 => sha512_crypt::generate(&pw, ""),
    };
    match hash {
        Ok(hash) => println!("{}", hash),
        Err(e) => {
            eprintln!("error: {}", e);
            exit(2);
        }
    }
    Ok(())
}

fn validate(ValidateArgs { password, hash }: ValidateArgs) -> io::Result<()> {
    let pw = prompt_password(password)?;
    if registry::verify(&hash, pw).is_ok() {
        println!("valid");
    } else {
        println!("not valid");
        exit(1);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cmd = cli.command.unwrap_or(Commands::Generate(cli.generate));
    match cmd {
        Commands::Generate(args) => generate(args)?,
        Commands::Validate(args) => validate(args)?,
    };
    Ok(())
}

fn prompt_password(password: Option<String>) -> io::Result<String> {
    match password {
        Some(pw) => Ok(pw),
        None => loop {
            let pw = rpassword::prompt_password("Enter password: ")?;
            let confirmed = rpassword::prompt_password("Retype password: ")?;
            if pw == confirmed {
                return Ok(pw);
            }
            println!("Error: Passwords don't match!")
        },
    }
}
