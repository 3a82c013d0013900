use kube::Client;
use kubetalk::{TracingLogger, execute};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let client = Client::try_default().await?;
    println!("{}", execute(&client, tokens.as_slice(), &TracingLogger).await);
    Ok(())
}
