use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Для каждого запроса пишет в лог:
/// - метод и путь
/// - статус код
/// - длительность (ms)
/// - размер ответа
///
/// Всё, что логируется внутри обработчика, попадает в span с `request_id`.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("request", request_id = %Uuid::new_v4(), %method, %path);

    let response = next.run(req).instrument(span.clone()).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            span.in_scope(|| {
                tracing::warn!(
                    status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "failed to read response body: {}",
                    e
                );
            });
            return Response::from_parts(parts, Body::default());
        }
    };

    span.in_scope(|| {
        tracing::info!(
            status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            size = %format_size(bytes.len()),
            "{} {}",
            method,
            path
        );
    });

    // Создаем новый ответ с прочитанным телом
    Response::from_parts(parts, Body::from(bytes))
}
