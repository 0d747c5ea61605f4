#[actix_web::main]
async fn main() -> std::io::Result<()> {
    hr_docs_server::run().await
}
