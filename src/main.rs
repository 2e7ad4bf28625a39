#[tokio::main]
async fn main() {
    if let Err(err) = apitest_mcp::mcp::server::run_stdio().await {
        eprintln!("apitest-mcp: {}", err);
        std::process::exit(1);
    }
}
