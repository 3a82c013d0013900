use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};
use kubetalk::{TracingLogger, kube::config::Kubeconfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "kubetalk-shell",
    about = "Type kubetalk commands as a chat user would"
)]
struct Cli {
    #[arg(long, add = kubetalk::claputil::context_value_completer())]
    /// Please type the context name you want to target.
    context: Option<String>,

    #[arg(long)]
    /// Kubeconfig file to read instead of the default one.
    kubeconfig: Option<std::path::PathBuf>,

    #[arg(trailing_var_arg = true, add = kubetalk::claputil::command_value_completer())]
    /// Run a single command and exit, e.g. `get pods -n kube-system`.
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kubetalk::claputil::CompleteEnv::with_factory(Cli::command).complete();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let kubeconfig = match &cli.kubeconfig {
        Some(path) => kubetalk::load_kubeconfig(&std::fs::read_to_string(path)?)?,
        None => Kubeconfig::read()?,
    };
    let client = kubetalk::connect(kubeconfig, cli.context.as_deref()).await?;

    if !cli.command.is_empty() {
        println!("{}", kubetalk::execute(&client, cli.command.as_slice(), &TracingLogger).await);
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens == ["exit"] {
            break;
        }
        println!("{}", kubetalk::execute(&client, tokens.as_slice(), &TracingLogger).await);
    }
    Ok(())
}
