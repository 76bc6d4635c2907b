use anyhow::Result;
use serde_json::json;

// Requires a running server (`cargo run`) with a reachable database.
#[tokio::test]
#[ignore]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:8080/api")?;

    hc.do_post(
        "/auth/register",
        json!({
          "username": "johndoe",
          "email": "johndoe@example.com",
          "password": "123456",
        }),
    )
    .await?
    .print()
    .await?;

    hc.do_post(
        "/auth/login",
        json!({
          "email": "johndoe@example.com",
          "password": "123456",
        }),
    )
    .await?
    .print()
    .await?;

    hc.do_get("/posts").await?.print().await?;

    hc.do_get("/posts/filter?category=Health").await?.print().await?;

    // unknown category is always a 400
    hc.do_get("/posts/filter?category=Music").await?.print().await?;

    Ok(())
}
