use serde::Serialize;

use crate::dispatch::ExecutionResult;

/// JSON envelope the binary prints for every operation.
/// Editor hosts parse this shape from stdout.
#[derive(Debug, Serialize)]
pub struct AdapterResponse<T: Serialize> {
    pub status: &'static str,
    pub operation: String,
    pub data: T,
    #[serde(serialize_with = "serialize_finite_f64")]
    pub duration_seconds: f64,
}

/// Serialize f64, clamping non-finite values (NaN, Inf) to 0.0.
fn serialize_finite_f64<S: serde::Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(if v.is_finite() { *v } else { 0.0 })
}

impl<T: Serialize> AdapterResponse<T> {
    pub fn success(operation: impl Into<String>, data: T, duration_seconds: f64) -> Self {
        Self {
            status: "success",
            operation: operation.into(),
            data,
            duration_seconds,
        }
    }

    pub fn error(operation: impl Into<String>, data: T, duration_seconds: f64) -> Self {
        Self {
            status: "error",
            operation: operation.into(),
            data,
            duration_seconds,
        }
    }

    /// `error` when the run behind `data` failed, so an empty list from a
    /// missing tool never reads as an empty catalog.
    pub fn for_result(
        operation: impl Into<String>,
        data: T,
        result: &ExecutionResult,
        duration_seconds: f64,
    ) -> Self {
        if result.is_success() {
            Self::success(operation, data, duration_seconds)
        } else {
            Self::error(operation, data, duration_seconds)
        }
    }

    /// Render as a single JSON line. Serialization failures become an error
    /// envelope so the host always gets parseable output.
    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                let escaped = e.to_string().replace('\\', "\\\\").replace('"', "\\\"");
                format!(
                    r#"{{"status":"error","operation":"{}","data":"serialization failed: {escaped}","duration_seconds":0.0}}"#,
                    self.operation.replace('\\', "\\\\").replace('"', "\\\"")
                )
            }
        }
    }
}
