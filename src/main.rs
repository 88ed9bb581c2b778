use clap::Parser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = dycsp::cli::Cli::parse();
    std::process::exit(dycsp::cli::run(cli));
}
