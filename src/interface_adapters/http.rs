// JSON body for HTTP-level rejections (e.g. a busy driver slot).

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
