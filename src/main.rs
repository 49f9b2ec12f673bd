#[actix_web::main]
async fn main() -> std::io::Result<()> {
    bast_server::run().await
}
