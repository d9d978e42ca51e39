use serde::{Deserialize, Serialize};
use serde_json::{Map as JsnMap, Number as JsnNumber, Value as JsnVal};
use utoipa::ToSchema;

// Request fields are kept loosely typed, the schema layer in `crate::model`
// casts them (e.g. numeric string to number) before validation, so values
// like `"5000"` are not rejected by the body extractor. Both bodies are
// read from JSON objects only, a JSON array never fills fields by position.

/// Product-shaped request body, used by both creation and update.
#[derive(Deserialize, Serialize, Default, ToSchema)]
#[serde(from = "JsnMap<String, JsnVal>")]
#[schema(example = json!({"name": "pc", "value": 5000}))]
pub struct ProductReqDto {
    #[schema(value_type = String, required = true)]
    pub name: Option<JsnVal>,
    #[schema(value_type = f64, required = true)]
    pub value: Option<JsnVal>,
}

/// Order-shaped request body, used by both creation and update.
#[allow(non_snake_case)]
#[derive(Deserialize, Serialize, Default, ToSchema)]
#[serde(from = "JsnMap<String, JsnVal>")]
#[schema(example = json!({"productId": "1", "quantity": "5", "totalValue": "10000"}))]
pub struct OrderReqDto {
    #[schema(value_type = String, required = true)]
    pub productId: Option<JsnVal>,
    #[schema(value_type = String, required = true)]
    pub quantity: Option<JsnVal>,
    #[schema(value_type = String, required = true)]
    pub totalValue: Option<JsnVal>,
}

impl From<JsnMap<String, JsnVal>> for ProductReqDto {
    fn from(mut value: JsnMap<String, JsnVal>) -> Self {
        Self {
            name: value.remove("name"),
            value: value.remove("value"),
        }
    }
}

impl From<JsnMap<String, JsnVal>> for OrderReqDto {
    fn from(mut value: JsnMap<String, JsnVal>) -> Self {
        Self {
            productId: value.remove("productId"),
            quantity: value.remove("quantity"),
            totalValue: value.remove("totalValue"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ProductDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub value: JsnNumber,
    #[serde(rename = "__v")]
    pub version: u32,
}

#[allow(non_snake_case)]
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct OrderDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub productId: String,
    pub quantity: String,
    pub totalValue: String,
    #[serde(rename = "__v")]
    pub version: u32,
}

/// acknowledgement of a single-document update, the same shape the
/// database driver reports
#[allow(non_snake_case)]
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct UpdateAckDto {
    pub acknowledged: bool,
    pub matchedCount: u64,
    pub modifiedCount: u64,
    #[schema(value_type = Option<String>)]
    pub upsertedId: Option<String>,
    pub upsertedCount: u64,
}

#[allow(non_snake_case)]
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct DeleteAckDto {
    pub acknowledged: bool,
    pub deletedCount: u64,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ErrorRespDto {
    pub message: String,
}
