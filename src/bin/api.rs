pub use box_files::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    box_files::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
