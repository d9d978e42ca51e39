use std::result::Result as DefaultResult;

use serde_json::Value as JsnVal;

use super::{
    cast_number, cast_string, doc_number, doc_string, doc_version, number_from_f64,
    required_number, required_string, validation_error, DocumentId,
};
use crate::api::web::dto::{ProductDto, ProductReqDto};
use crate::constant::doc_field;
use crate::datastore::AppDocument;
use crate::error::{AppError, AppErrorCode};

const SCHEMA_LABEL: &str = "product";
const FIELD_NAME: &str = "name";
const FIELD_VALUE: &str = "value";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductModel {
    pub id: DocumentId,
    pub name: String,
    pub value: f64,
    pub version: u32,
}

/// fields to replace in an existing product, `None` means unchanged
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductUpdateModel {
    pub name: Option<String>,
    pub value: Option<f64>,
}

impl TryFrom<ProductReqDto> for ProductModel {
    type Error = AppError;
    fn try_from(req: ProductReqDto) -> DefaultResult<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = required_string(FIELD_NAME, cast_string(FIELD_NAME, req.name), &mut errors);
        let value = required_number(FIELD_VALUE, cast_number(FIELD_VALUE, req.value), &mut errors);
        match (name, value) {
            (Some(name), Some(value)) if errors.is_empty() => Ok(Self {
                id: DocumentId::generate(),
                name,
                value,
                version: 0,
            }),
            _others => Err(validation_error(SCHEMA_LABEL, errors)),
        }
    }
}

impl TryFrom<(DocumentId, AppDocument)> for ProductModel {
    type Error = AppError;
    fn try_from(saved: (DocumentId, AppDocument)) -> DefaultResult<Self, Self::Error> {
        let (id, content) = saved;
        Ok(Self {
            id,
            name: doc_string(&content, FIELD_NAME)?,
            value: doc_number(&content, FIELD_VALUE)?,
            version: doc_version(&content),
        })
    }
}

impl ProductModel {
    pub fn to_document(&self) -> AppDocument {
        let mut out = AppDocument::new();
        out.insert(FIELD_NAME.to_string(), JsnVal::String(self.name.clone()));
        out.insert(
            FIELD_VALUE.to_string(),
            JsnVal::Number(number_from_f64(self.value)),
        );
        out.insert(doc_field::VERSION.to_string(), JsnVal::from(self.version));
        out
    }
}

impl From<ProductModel> for ProductDto {
    fn from(value: ProductModel) -> Self {
        ProductDto {
            id: value.id.to_hex(),
            name: value.name,
            value: number_from_f64(value.value),
            version: value.version,
        }
    }
}

impl TryFrom<ProductReqDto> for ProductUpdateModel {
    type Error = AppError;
    fn try_from(req: ProductReqDto) -> DefaultResult<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = match cast_string(FIELD_NAME, req.name) {
            Ok(Some(s)) if s.is_empty() => {
                errors.push(format!("{FIELD_NAME}: Path `{FIELD_NAME}` is required."));
                None
            }
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let value = cast_number(FIELD_VALUE, req.value).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        if !errors.is_empty() {
            Err(validation_error(SCHEMA_LABEL, errors))
        } else if name.is_none() && value.is_none() {
            Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!("{SCHEMA_LABEL} update contains no field")),
            })
        } else {
            Ok(Self { name, value })
        }
    }
} // end of impl ProductUpdateModel

impl ProductUpdateModel {
    pub fn to_document(&self) -> AppDocument {
        let mut out = AppDocument::new();
        if let Some(n) = self.name.as_ref() {
            out.insert(FIELD_NAME.to_string(), JsnVal::String(n.clone()));
        }
        if let Some(v) = self.value {
            out.insert(FIELD_VALUE.to_string(), JsnVal::Number(number_from_f64(v)));
        }
        out
    }
}
