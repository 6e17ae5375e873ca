//! End-to-end shopper flows through the storefront.
//!
//! Every test starts its own server; the client keeps the session cookie so
//! each `TestContext` behaves like one browser.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use techmart_integration_tests::TestContext;

async fn badge(ctx: &TestContext) -> String {
    ctx.get_text("/cart/count").await.unwrap()
}

async fn sign_up(ctx: &TestContext, username: &str, password: &str) -> String {
    ctx.post_text(
        "/auth/signup",
        &[("username", username), ("password", password)],
    )
    .await
    .unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await.unwrap();
    let resp = ctx.get("/health").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_request_id_is_passed_through() {
    let ctx = TestContext::new().await.unwrap();
    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "edge-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "edge-42");
}

#[tokio::test]
async fn test_default_catalog_shows_popular_products_only() {
    let ctx = TestContext::new().await.unwrap();
    let body = ctx.get_text("/").await.unwrap();

    assert!(body.contains("6 results"));
    assert!(body.contains("Dell Inspiron 15"));
    assert!(!body.contains("Logitech MX Master 3S"));
}

#[tokio::test]
async fn test_catalog_filters() {
    let ctx = TestContext::new().await.unwrap();

    let body = ctx.get_text("/?category=Accessories&sort=alpha").await.unwrap();
    assert!(body.contains("3 results"));
    assert!(body.contains("Logitech MX Master 3S"));

    let body = ctx.get_text("/?q=zzz&sort=alpha").await.unwrap();
    assert!(body.contains("0 results"));
    assert!(body.contains("No products found"));

    let body = ctx.get_text("/?price=0-40000&sort=low").await.unwrap();
    assert!(body.contains("4 results"));
}

#[tokio::test]
async fn test_invalid_price_bracket_falls_back_with_notice() {
    let ctx = TestContext::new().await.unwrap();
    let body = ctx.get_text("/?price=cheap").await.unwrap();

    assert!(body.contains("invalid price bracket: cheap"));
    assert!(body.contains("6 results"));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new().await.unwrap();

    let body = ctx.get_text("/products/8").await.unwrap();
    assert!(body.contains("This is a demo description for MacBook Air M2."));
    assert!(body.contains("₹99,999"));

    let resp = ctx.get("/products/99").await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx.get("/products/macbook").await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_persists_in_session() {
    let ctx = TestContext::new().await.unwrap();

    let body = ctx.post_text("/cart/add", &[("product_id", "1")]).await.unwrap();
    assert!(body.contains("Added to cart"));
    ctx.post("/cart/add", &[("product_id", "1")]).await.unwrap();

    let body = ctx.get_text("/cart").await.unwrap();
    assert!(body.contains("Dell Inspiron 15"));
    assert!(body.contains("₹111,998"));
    assert!(badge(&ctx).await.contains(">2</span>"));
}

#[tokio::test]
async fn test_htmx_add_returns_badge_fragment() {
    let ctx = TestContext::new().await.unwrap();
    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .header("HX-Request", "true")
        .form(&[("product_id", "3")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    let body = resp.text().await.unwrap();
    assert!(body.starts_with("<span id=\"cart-count\""));
    assert!(body.contains(">1</span>"));
}

#[tokio::test]
async fn test_htmx_add_of_unknown_product_redirects_page() {
    let ctx = TestContext::new().await.unwrap();
    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .header("HX-Request", "true")
        .form(&[("product_id", "404")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-redirect"], "/?notice=Product%20not%20found");
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_adds_are_all_kept() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "3")]).await.unwrap();

    let mut adds = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let request = ctx
            .client
            .post(ctx.url("/cart/add"))
            .header("HX-Request", "true")
            .form(&[("product_id", "3")]);
        adds.spawn(async move { request.send().await.unwrap().status() });
    }
    while let Some(status) = adds.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    assert!(badge(&ctx).await.contains(">21</span>"));
}

#[tokio::test]
async fn test_add_unknown_product_alerts() {
    let ctx = TestContext::new().await.unwrap();
    let body = ctx.post_text("/cart/add", &[("product_id", "404")]).await.unwrap();

    assert!(body.contains("Product not found"));
    assert!(badge(&ctx).await.contains(" hidden"));
}

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "7")]).await.unwrap();

    let body = ctx
        .post_text("/cart/update", &[("product_id", "7"), ("delta", "-1")])
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));
    assert!(badge(&ctx).await.contains(" hidden"));
}

#[tokio::test]
async fn test_remove_line() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "7")]).await.unwrap();
    ctx.post("/cart/add", &[("product_id", "5")]).await.unwrap();

    let body = ctx.post_text("/cart/remove", &[("product_id", "7")]).await.unwrap();
    assert!(!body.contains("Logitech MX Master 3S"));
    assert!(body.contains("Sony WH-1000XM5"));
}

#[tokio::test]
async fn test_clear_cart_requires_confirmation() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "1")]).await.unwrap();

    let body = ctx.post_text("/cart/clear", &[]).await.unwrap();
    assert!(body.contains("Clear all items?"));
    assert!(body.contains("action=\"/cart/clear\""));
    assert!(badge(&ctx).await.contains(">1</span>"));

    let body = ctx.post_text("/cart/clear", &[("confirm", "yes")]).await.unwrap();
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "2")]).await.unwrap();

    let other = Client::builder().cookie_store(true).build().unwrap();
    let body = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));
}

// ============================================================================
// Auth and checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_requires_login() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/cart/add", &[("product_id", "1")]).await.unwrap();

    let body = ctx.post_text("/checkout", &[]).await.unwrap();
    assert!(body.contains("Login required to checkout. Go to login?"));
    assert!(body.contains("href=\"/auth/login\""));

    let body = ctx.get_text("/checkout").await.unwrap();
    assert!(body.contains("Continue with Google"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_alerts() {
    let ctx = TestContext::new().await.unwrap();
    sign_up(&ctx, "erin", "pass").await;

    let body = ctx.post_text("/checkout", &[]).await.unwrap();
    assert!(body.contains("Cart empty"));
}

#[tokio::test]
async fn test_sign_up_then_place_order() {
    let ctx = TestContext::new().await.unwrap();

    let body = sign_up(&ctx, "dana", "pass").await;
    assert!(body.contains("Signed up &amp; logged in as dana"));
    assert!(body.contains("Hi, dana"));

    for id in ["5", "5", "7"] {
        ctx.post("/cart/add", &[("product_id", id)]).await.unwrap();
    }

    let body = ctx.post_text("/checkout", &[]).await.unwrap();
    assert!(body.contains("Order summary"));
    assert!(body.contains("₹72,997"));

    let body = ctx.post_text("/checkout/place", &[]).await.unwrap();
    assert!(body.contains("Place order for ₹72,997? (Demo)"));

    let body = ctx
        .post_text("/checkout/place", &[("confirm", "yes")])
        .await
        .unwrap();
    assert!(body.contains("Order placed (demo). Thank you!"));
    assert!(badge(&ctx).await.contains(" hidden"));
}

#[tokio::test]
async fn test_sign_up_validation() {
    let ctx = TestContext::new().await.unwrap();

    let body = sign_up(&ctx, "ab cd", "secret").await;
    assert!(body.contains("Enter valid username (no spaces)"));

    let body = sign_up(&ctx, "abcd", "abc").await;
    assert!(body.contains("Password must be &gt;=4 chars"));

    sign_up(&ctx, "abcd", "abcd").await;
    ctx.post("/auth/logout", &[("confirm", "yes")]).await.unwrap();
    let body = sign_up(&ctx, "abcd", "other").await;
    assert!(body.contains("Username exists — login instead"));
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let ctx = TestContext::new().await.unwrap();
    sign_up(&ctx, "frank", "hunter2").await;
    ctx.post("/auth/logout", &[("confirm", "yes")]).await.unwrap();

    let wrong_password = ctx
        .post_text("/auth/login", &[("username", "frank"), ("password", "nope")])
        .await
        .unwrap();
    let unknown_user = ctx
        .post_text("/auth/login", &[("username", "zed"), ("password", "hunter2")])
        .await
        .unwrap();
    assert!(wrong_password.contains("Invalid credentials"));
    assert!(unknown_user.contains("Invalid credentials"));

    let body = ctx
        .post_text("/auth/login", &[("username", ""), ("password", "")])
        .await
        .unwrap();
    assert!(body.contains("Enter credentials"));

    let body = ctx
        .post_text("/auth/login", &[("username", "frank"), ("password", "hunter2")])
        .await
        .unwrap();
    assert!(body.contains("Hi, frank"));
}

#[tokio::test]
async fn test_federated_sign_in() {
    let ctx = TestContext::new().await.unwrap();

    let body = ctx
        .post_text("/auth/federated", &[("display_name", "")])
        .await
        .unwrap();
    assert!(!body.contains("Hi, "));

    let body = ctx
        .post_text("/auth/federated", &[("display_name", "Jane Q. Public")])
        .await
        .unwrap();
    assert!(body.contains("Signed in as Jane Q. Public (simulated)"));
    assert!(body.contains("Hi, Jane Q. Public"));
}

#[tokio::test]
async fn test_logout_requires_confirmation() {
    let ctx = TestContext::new().await.unwrap();
    sign_up(&ctx, "gail", "pass").await;

    let body = ctx.post_text("/auth/logout", &[]).await.unwrap();
    assert!(body.contains("Logout?"));
    assert!(body.contains("Hi, gail"));

    let body = ctx
        .post_text("/auth/logout", &[("confirm", "yes")])
        .await
        .unwrap();
    assert!(!body.contains("Hi, gail"));
    assert!(body.contains("Login / Sign up"));
}

// ============================================================================
// Preferences
// ============================================================================

#[tokio::test]
async fn test_dark_mode_toggle_persists() {
    let ctx = TestContext::new().await.unwrap();

    let body = ctx.post_text("/preferences/dark", &[]).await.unwrap();
    assert!(body.contains("<html lang=\"en\" class=\"dark\">"));

    let body = ctx.get_text("/cart").await.unwrap();
    assert!(body.contains("class=\"dark\""));

    let body = ctx.post_text("/preferences/dark", &[]).await.unwrap();
    assert!(body.contains("<html lang=\"en\">"));
}
