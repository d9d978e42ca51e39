mod order;
mod product;

use std::result::Result as DefaultResult;

use serde_json::{Number as JsnNumber, Value as JsnVal};

use crate::datastore::AppDocument;
use crate::error::{AppError, AppErrorCode};

pub use crate::datastore::DocumentId;
pub use order::{OrderModel, OrderUpdateModel};
pub use product::{ProductModel, ProductUpdateModel};

// schema-level casting rules applied to loosely-typed request fields, a field
// given as `null` or absent is treated as not provided

fn _type_label(raw: &JsnVal) -> &'static str {
    match raw {
        JsnVal::Null => "null",
        JsnVal::Bool(_) => "boolean",
        JsnVal::Number(_) => "number",
        JsnVal::String(_) => "string",
        JsnVal::Array(_) => "Array",
        JsnVal::Object(_) => "Object",
    }
}

fn _cast_error(field: &str, target: &str, raw: &JsnVal) -> String {
    format!(
        "{field}: Cast to {target} failed for value \"{raw}\" (type {}) at path \"{field}\"",
        _type_label(raw)
    )
}

pub(crate) fn cast_string(field: &str, raw: Option<JsnVal>) -> DefaultResult<Option<String>, String> {
    match raw {
        None | Some(JsnVal::Null) => Ok(None),
        Some(JsnVal::String(s)) => Ok(Some(s)),
        Some(JsnVal::Number(n)) => {
            // integral floats like `5.0` are presented as `5`
            let s = match (n.is_f64(), n.as_f64()) {
                (true, Some(v)) => number_from_f64(v).to_string(),
                _others => n.to_string(),
            };
            Ok(Some(s))
        }
        Some(JsnVal::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(_cast_error(field, "string", &other)),
    }
}

pub(crate) fn cast_number(field: &str, raw: Option<JsnVal>) -> DefaultResult<Option<f64>, String> {
    match raw {
        None | Some(JsnVal::Null) => Ok(None),
        Some(JsnVal::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or(_cast_error(field, "Number", &JsnVal::Number(n.clone()))),
        Some(JsnVal::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(Some(v)),
                    _others => Err(_cast_error(field, "Number", &JsnVal::String(s))),
                }
            }
        }
        Some(JsnVal::Bool(b)) => Ok(Some(if b { 1.0 } else { 0.0 })),
        Some(other) => Err(_cast_error(field, "Number", &other)),
    }
}

/// required string fields reject empty string as well
pub(crate) fn required_string(
    field: &str,
    casted: DefaultResult<Option<String>, String>,
    errors: &mut Vec<String>,
) -> Option<String> {
    match casted {
        Ok(Some(s)) if !s.is_empty() => Some(s),
        Ok(_) => {
            errors.push(format!("{field}: Path `{field}` is required."));
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

pub(crate) fn required_number(
    field: &str,
    casted: DefaultResult<Option<f64>, String>,
    errors: &mut Vec<String>,
) -> Option<f64> {
    match casted {
        Ok(Some(v)) => Some(v),
        Ok(None) => {
            errors.push(format!("{field}: Path `{field}` is required."));
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

pub(crate) fn validation_error(schema: &str, errors: Vec<String>) -> AppError {
    AppError {
        code: AppErrorCode::InvalidInput,
        detail: Some(format!("{schema} validation failed: {}", errors.join(", "))),
    }
}

/// whole numbers are presented without fraction part, the way they are
/// received from clients
pub(crate) fn number_from_f64(v: f64) -> JsnNumber {
    const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INT {
        JsnNumber::from(v as i64)
    } else {
        JsnNumber::from_f64(v).unwrap_or(JsnNumber::from(0))
    }
}

pub(crate) fn doc_string(
    content: &AppDocument,
    field: &str,
) -> DefaultResult<String, AppError> {
    match content.get(field) {
        Some(JsnVal::String(s)) => Ok(s.clone()),
        Some(JsnVal::Number(n)) => Ok(n.to_string()),
        _others => Err(AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("field:{field}, expect:string")),
        }),
    }
}

pub(crate) fn doc_number(content: &AppDocument, field: &str) -> DefaultResult<f64, AppError> {
    content
        .get(field)
        .and_then(JsnVal::as_f64)
        .ok_or(AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("field:{field}, expect:number")),
        })
}

pub(crate) fn doc_version(content: &AppDocument) -> u32 {
    use crate::constant::doc_field;
    content
        .get(doc_field::VERSION)
        .and_then(JsnVal::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}
