// Liveness probe for load balancers; never touches the player api.
pub async fn healthz() -> &'static str {
    "ok"
}
