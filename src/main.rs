#[tokio::main]
async fn main() {
    if let Err(e) = movie_reviews::start_server().await {
        tracing::error!("Server exited with error: {}", e);
        eprintln!("movie_reviews: {e}");
        std::process::exit(1);
    }
}
