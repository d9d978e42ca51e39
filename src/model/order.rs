use std::result::Result as DefaultResult;

use serde_json::Value as JsnVal;

use super::{cast_string, doc_string, doc_version, required_string, validation_error, DocumentId};
use crate::api::web::dto::{OrderDto, OrderReqDto};
use crate::constant::doc_field;
use crate::datastore::AppDocument;
use crate::error::{AppError, AppErrorCode};

const SCHEMA_LABEL: &str = "order";
const FIELD_PRODUCT_ID: &str = "productId";
const FIELD_QUANTITY: &str = "quantity";
const FIELD_TOTAL_VALUE: &str = "totalValue";

/// Note `product_id` refers to a product by its document ID, the reference is
/// never checked against the product collection. `quantity` and `total_value`
/// are kept as strings, no arithmetic relation between them is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderModel {
    pub id: DocumentId,
    pub product_id: String,
    pub quantity: String,
    pub total_value: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderUpdateModel {
    pub product_id: Option<String>,
    pub quantity: Option<String>,
    pub total_value: Option<String>,
}

impl TryFrom<OrderReqDto> for OrderModel {
    type Error = AppError;
    fn try_from(req: OrderReqDto) -> DefaultResult<Self, Self::Error> {
        let mut errors = Vec::new();
        let product_id = required_string(
            FIELD_PRODUCT_ID,
            cast_string(FIELD_PRODUCT_ID, req.productId),
            &mut errors,
        );
        let quantity = required_string(
            FIELD_QUANTITY,
            cast_string(FIELD_QUANTITY, req.quantity),
            &mut errors,
        );
        let total_value = required_string(
            FIELD_TOTAL_VALUE,
            cast_string(FIELD_TOTAL_VALUE, req.totalValue),
            &mut errors,
        );
        match (product_id, quantity, total_value) {
            (Some(product_id), Some(quantity), Some(total_value)) => Ok(Self {
                id: DocumentId::generate(),
                product_id,
                quantity,
                total_value,
                version: 0,
            }),
            _others => Err(validation_error(SCHEMA_LABEL, errors)),
        }
    }
} // end of impl TryFrom for OrderModel

impl TryFrom<(DocumentId, AppDocument)> for OrderModel {
    type Error = AppError;
    fn try_from(saved: (DocumentId, AppDocument)) -> DefaultResult<Self, Self::Error> {
        let (id, content) = saved;
        Ok(Self {
            id,
            product_id: doc_string(&content, FIELD_PRODUCT_ID)?,
            quantity: doc_string(&content, FIELD_QUANTITY)?,
            total_value: doc_string(&content, FIELD_TOTAL_VALUE)?,
            version: doc_version(&content),
        })
    }
}

impl OrderModel {
    pub fn to_document(&self) -> AppDocument {
        let iter = [
            (FIELD_PRODUCT_ID, JsnVal::String(self.product_id.clone())),
            (FIELD_QUANTITY, JsnVal::String(self.quantity.clone())),
            (FIELD_TOTAL_VALUE, JsnVal::String(self.total_value.clone())),
            (doc_field::VERSION, JsnVal::from(self.version)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v));
        AppDocument::from_iter(iter)
    }
}

impl From<OrderModel> for OrderDto {
    fn from(value: OrderModel) -> Self {
        OrderDto {
            id: value.id.to_hex(),
            productId: value.product_id,
            quantity: value.quantity,
            totalValue: value.total_value,
            version: value.version,
        }
    }
}

impl TryFrom<OrderReqDto> for OrderUpdateModel {
    type Error = AppError;
    fn try_from(req: OrderReqDto) -> DefaultResult<Self, Self::Error> {
        let mut errors = Vec::new();
        let mut optional_field = |label: &str, raw: Option<JsnVal>| match cast_string(label, raw) {
            Ok(Some(s)) if s.is_empty() => {
                errors.push(format!("{label}: Path `{label}` is required."));
                None
            }
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let product_id = optional_field(FIELD_PRODUCT_ID, req.productId);
        let quantity = optional_field(FIELD_QUANTITY, req.quantity);
        let total_value = optional_field(FIELD_TOTAL_VALUE, req.totalValue);
        let out = Self {
            product_id,
            quantity,
            total_value,
        };
        if !errors.is_empty() {
            Err(validation_error(SCHEMA_LABEL, errors))
        } else if out == Self::default() {
            Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!("{SCHEMA_LABEL} update contains no field")),
            })
        } else {
            Ok(out)
        }
    }
} // end of impl TryFrom for OrderUpdateModel

impl OrderUpdateModel {
    pub fn to_document(&self) -> AppDocument {
        let iter = [
            (FIELD_PRODUCT_ID, self.product_id.as_ref()),
            (FIELD_QUANTITY, self.quantity.as_ref()),
            (FIELD_TOTAL_VALUE, self.total_value.as_ref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|s| (k.to_string(), JsnVal::String(s.clone()))));
        AppDocument::from_iter(iter)
    }
}
