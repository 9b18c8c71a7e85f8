#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_quiz_client::run().await
}
