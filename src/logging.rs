use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::any::Any;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` wins; otherwise `level` applies to this crate only.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn default_directives(level: &str) -> String {
    format!("vamu_ai_service={},tower_http=warn", level.to_lowercase())
}

pub async fn request_logger(mut request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let payload = extract_compact_payload(&mut request).await;

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();

    let log_line = format!(
        "{} {} {} {:05.2}ms {}",
        method,
        path,
        status,
        duration_ms,
        payload.unwrap_or_else(|| "{}".to_string())
    );

    match status {
        200..=299 => info!("{}", log_line),
        400..=499 => warn!("{}", log_line),
        500..=599 => error!("{}", log_line),
        _ => info!("{}", log_line),
    }

    response
}

/// Buffers a POST body into one compact line and puts it back on the request.
async fn extract_compact_payload(request: &mut Request<Body>) -> Option<String> {
    if request.method() != axum::http::Method::POST {
        return None;
    }

    let body = std::mem::replace(request.body_mut(), Body::empty());
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => return None,
    };

    let compact = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => Some(value.to_string()),
        Err(_) => std::str::from_utf8(&bytes).ok().map(|s| s.trim().to_string()),
    };

    *request.body_mut() = Body::from(bytes);
    compact
}

/// Text carried by a panic payload, when it is a string.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic payload".to_string())
}

/// Routes panics through tracing before the default hook prints them.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "<unknown>".to_string());
        error!(location = %location, "Panic: {}", panic_message(info.payload()));
        previous(info);
    }));
}
