#[tokio::main]
async fn main() {
    if let Err(e) = vocab_deck::run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
