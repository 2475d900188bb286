use clap::Parser;
use miette::Result;
use poster::cli::{Cli, Commands};
use poster::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("POSTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let dir = cli.dir.as_path();

    match cli.command {
        Commands::Show(args) => poster::cli::show::run(args, dir, &printer)?,
        Commands::Set(args) => poster::cli::set::run(args, dir, &printer)?,
        Commands::Reset => poster::cli::reset::run(dir, &printer)?,
        Commands::Render(args) => poster::cli::render::run(args, dir, &printer)?,
        Commands::Cart(args) => poster::cli::cart::run(args, dir, &printer)?,
        Commands::Shapes(args) => poster::cli::list::shapes(args, &printer)?,
        Commands::Styles(args) => poster::cli::list::styles(args, &printer)?,
        Commands::Completions(args) => poster::cli::completions::run(args)?,
    }

    Ok(())
}
