#[actix_web::main]
async fn main() -> std::io::Result<()> {
    trendboard_lib::run().await
}
