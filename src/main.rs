#[tokio::main]
async fn main() -> std::process::ExitCode {
    csv_tables::app::run().await
}
