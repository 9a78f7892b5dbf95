#![warn(clippy::all)]

#[macro_use]
extern crate napi_derive;

use napi::Result as NapiResult;
use napi::Status;

// import from the core library
use cadence_modernizer_core::{
  auto_modernize, create_fix_plan, detect_legacy_patterns, validate_cadence_code,
  AutoModernizationOptions,
};

fn to_json<T: serde::Serialize>(value: &T) -> NapiResult<String> {
  serde_json::to_string(value)
    .map_err(|e| napi::Error::new(Status::GenericFailure, format!("failed to serialise result: {e}")))
}

/// validate generated cadence source, resolves to a json `ValidationResult`
#[napi(ts_args_type = "source?: string")]
pub async fn validate_cadence(source: Option<String>) -> NapiResult<String> {
  let result = validate_cadence_code(source.as_deref()).await;
  to_json(&result)
}

/// rewrite auto-fixable legacy syntax, returns a json `ModernizationResult`
#[napi(ts_args_type = "source?: string, options?: string")]
pub fn modernize_cadence(source: Option<String>, options: Option<String>) -> NapiResult<String> {
  let source = source.unwrap_or_default();

  let options = match options {
    Some(raw) => serde_json::from_str::<AutoModernizationOptions>(&raw).map_err(|e| {
      napi::Error::new(Status::InvalidArg, format!("invalid modernization options: {e}"))
    })?,
    None => AutoModernizationOptions::default(),
  };

  let patterns = detect_legacy_patterns(&source);
  to_json(&auto_modernize(&source, &patterns, &options))
}

/// prioritised fix plan for the source, returns a json `FixPlan`
#[napi(ts_args_type = "source?: string")]
pub fn plan_cadence_fixes(source: Option<String>) -> NapiResult<String> {
  let source = source.unwrap_or_default();
  to_json(&create_fix_plan(&detect_legacy_patterns(&source)))
}
