use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, Timestamped, ValidationErrors};

use crate::palette::{self, Swatch};
use crate::stock::StockStatus;

/// Maximum length (in characters) of `name` and `color`.
pub const MAX_TEXT_LEN: usize = 255;

/// Largest quantity a product can hold (32-bit signed database integer).
pub const MAX_QUANTITY: u32 = 2_147_483_647;

pub const FIELD_NAME: &str = "name";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_COLOR: &str = "color";

/// A stored product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: u32,
    color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Assemble a record from store-owned parts (id and timestamps).
    pub fn new(
        id: ProductId,
        fields: ProductFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            quantity: fields.quantity,
            color: fields.color,
            created_at,
            updated_at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }

    pub fn swatch(&self) -> Swatch {
        palette::swatch(&self.color)
    }

    /// Full replace of the mutable attributes.
    pub fn replace(&mut self, fields: ProductFields, at: DateTime<Utc>) {
        self.name = fields.name;
        self.quantity = fields.quantity;
        self.color = fields.color;
        self.updated_at = at;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for Product {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated product attributes.
///
/// Built by [`ProductInput::validate`] (or the fixture generator, which only
/// produces in-range values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFields {
    pub(crate) name: String,
    pub(crate) quantity: u32,
    pub(crate) color: String,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, quantity: i64, color: impl Into<String>) -> DomainResult<Self> {
        ProductInput::new(name, quantity, color).validate()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Raw create/update input, exactly as a client supplied it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub color: Option<String>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, quantity: i64, color: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity),
            color: Some(color.into()),
        }
    }

    /// Validate every field, reporting all failures at once.
    pub fn validate(self) -> DomainResult<ProductFields> {
        self.validate_with(ValidationErrors::new())
    }

    /// Validate on top of errors already found while decoding the payload.
    ///
    /// A field that already carries an error is not checked again.
    pub fn validate_with(self, mut errors: ValidationErrors) -> DomainResult<ProductFields> {
        let name = text_field(&mut errors, FIELD_NAME, self.name);
        let color = text_field(&mut errors, FIELD_COLOR, self.color);
        let quantity = quantity_field(&mut errors, self.quantity);

        // A field comes back `None` only after an error was recorded for it.
        match (name, quantity, color) {
            (Some(name), Some(quantity), Some(color)) if errors.is_empty() => {
                Ok(ProductFields { name, quantity, color })
            }
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

fn text_field(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    if errors.has(field) {
        return None;
    }
    let value = value.as_deref().map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.add(field, required(field));
        return None;
    }
    if value.chars().count() > MAX_TEXT_LEN {
        errors.add(field, format!("The {field} field must not be greater than {MAX_TEXT_LEN} characters."));
        return None;
    }
    Some(value.to_string())
}

fn quantity_field(errors: &mut ValidationErrors, value: Option<i64>) -> Option<u32> {
    if errors.has(FIELD_QUANTITY) {
        return None;
    }
    let Some(value) = value else {
        errors.add(FIELD_QUANTITY, required(FIELD_QUANTITY));
        return None;
    };
    if value < 0 {
        errors.add(FIELD_QUANTITY, format!("The {FIELD_QUANTITY} field must be at least 0."));
        return None;
    }
    match u32::try_from(value) {
        Ok(q) if q <= MAX_QUANTITY => Some(q),
        _ => {
            errors.add(FIELD_QUANTITY, too_large(FIELD_QUANTITY, u64::from(MAX_QUANTITY)));
            None
        }
    }
}

pub fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

pub fn must_be_string(field: &str) -> String {
    format!("The {field} field must be a string.")
}

pub fn must_be_integer(field: &str) -> String {
    format!("The {field} field must be an integer.")
}

fn too_large(field: &str, max: u64) -> String {
    format!("The {field} field must not be greater than {max}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_errors(result: DomainResult<ProductFields>) -> ValidationErrors {
        match result {
            Err(DomainError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let fields = ProductInput::new("  Laptop Pro ", 12, " Silver").validate().unwrap();
        assert_eq!(fields.name(), "Laptop Pro");
        assert_eq!(fields.quantity(), 12);
        assert_eq!(fields.color(), "Silver");
    }

    #[test]
    fn zero_quantity_is_valid() {
        assert_eq!(ProductFields::new("Cable", 0, "Black").unwrap().quantity(), 0);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = validation_errors(ProductInput::default().validate());
        assert_eq!(errors.field("name"), ["The name field is required."]);
        assert_eq!(errors.field("quantity"), ["The quantity field is required."]);
        assert_eq!(errors.field("color"), ["The color field is required."]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = validation_errors(ProductInput::new("   ", 3, "Red").validate());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let errors = validation_errors(ProductInput::new("Mouse", -1, "Red").validate());
        assert_eq!(errors.field("quantity"), ["The quantity field must be at least 0."]);
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let errors = validation_errors(ProductInput::new("Mouse", i64::from(MAX_QUANTITY) + 1, "Red").validate());
        assert_eq!(errors.field("quantity"), ["The quantity field must not be greater than 2147483647."]);
        assert!(ProductInput::new("Mouse", i64::from(MAX_QUANTITY), "Red").validate().is_ok());
    }

    #[test]
    fn length_is_counted_in_characters() {
        let exactly = "é".repeat(MAX_TEXT_LEN);
        assert!(ProductInput::new(exactly.clone(), 1, "Red").validate().is_ok());

        let too_long = format!("{exactly}e");
        let errors = validation_errors(ProductInput::new("Mouse", 1, too_long).validate());
        assert_eq!(errors.field("color"), ["The color field must not be greater than 255 characters."]);
    }

    #[test]
    fn decode_errors_are_kept_and_not_duplicated() {
        let mut decode = ValidationErrors::new();
        decode.add("quantity", must_be_integer("quantity"));

        let input = ProductInput { name: Some("Mouse".into()), quantity: None, color: None };
        let errors = validation_errors(input.validate_with(decode));
        assert_eq!(errors.field("quantity"), ["The quantity field must be an integer."]);
        assert_eq!(errors.field("color"), ["The color field is required."]);
        assert!(!errors.has("name"));
    }

    #[test]
    fn any_failure_carries_its_message() {
        let mut decode = ValidationErrors::new();
        decode.add("payload", "The payload is malformed.");

        let errors = validation_errors(ProductInput::new("Mouse", 1, "Red").validate_with(decode));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["payload"]);
        assert_eq!(errors.first_message(), Some("The payload is malformed."));
    }

    #[test]
    fn replace_is_a_full_update() {
        let created = Utc::now();
        let mut product = Product::new(
            ProductId::from_i64(1),
            ProductFields::new("Mouse", 5, "Red").unwrap(),
            created,
            created,
        );
        let later = created + chrono::Duration::seconds(5);
        product.replace(ProductFields::new("Keyboard", 50, "Navy").unwrap(), later);

        assert_eq!(product.name(), "Keyboard");
        assert_eq!(product.quantity(), 50);
        assert_eq!(product.color(), "Navy");
        assert_eq!(product.created_at(), created);
        assert_eq!(product.updated_at(), later);
        assert_eq!(*product.id(), ProductId::from_i64(1));
    }

    #[test]
    fn serializes_flat_record() {
        let at = "2026-01-05T15:07:00Z".parse::<DateTime<Utc>>().unwrap();
        let product = Product::new(ProductId::from_i64(7), ProductFields::new("Tablet", 3, "Blue").unwrap(), at, at);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Tablet");
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["color"], "Blue");
        assert_eq!(json["created_at"], "2026-01-05T15:07:00Z");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            #[test]
            fn valid_input_round_trips(
                name in "[A-Za-z0-9][A-Za-z0-9 ]{0,40}[A-Za-z0-9]",
                quantity in 0i64..=i64::from(MAX_QUANTITY),
                color in "[A-Za-z]{1,20}",
            ) {
                let fields = ProductInput::new(name.clone(), quantity, color.clone()).validate().unwrap();
                prop_assert_eq!(fields.name(), name.as_str());
                prop_assert_eq!(i64::from(fields.quantity()), quantity);
                prop_assert_eq!(fields.color(), color.as_str());
            }

            #[test]
            fn negative_quantities_never_validate(quantity in i64::MIN..0) {
                let result = ProductInput::new("Mouse", quantity, "Red").validate();
                prop_assert!(matches!(result, Err(DomainError::Validation(ref e)) if e.has("quantity")));
            }
        }
    }
}
