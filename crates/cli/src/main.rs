use clap::Parser;

fn main() -> anyhow::Result<()> {
    fulfill_observability::init();

    let cli = fulfill_cli::Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    fulfill_cli::run(&cli, &mut out)?;
    Ok(())
}
