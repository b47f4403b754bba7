use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pdfbench::run().await
}
