use serde::Deserialize;
use validator::Validate;

use crate::domain::recovery::RecoveryType;
use crate::domain::types::{Amount, ProductId, Quantity, ShopkeeperId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Header of the recovery form filled in by a salesman.
pub struct RecoveryForm {
    #[validate(length(min = 1))]
    pub shopkeeper_id: String,
    /// Cash received, as typed.
    #[validate(length(min = 1))]
    pub amount_collected: String,
    /// `payment_only` (default) or `payment_with_items`.
    #[serde(default)]
    pub recovery_type: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub note: String,
}

/// Parsed and validated [`RecoveryForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryPayload {
    pub shopkeeper_id: ShopkeeperId,
    pub amount_collected: Amount,
    pub recovery_type: RecoveryType,
    pub note: Option<String>,
}

impl TryFrom<RecoveryForm> for RecoveryPayload {
    type Error = FormError;

    fn try_from(form: RecoveryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let shopkeeper_id =
            ShopkeeperId::new(form.shopkeeper_id).map_err(|_| FormError::InvalidShopkeeperId)?;
        let amount_collected = form
            .amount_collected
            .parse::<Amount>()
            .map_err(FormError::InvalidAmount)?;
        let recovery_type = RecoveryType::try_from(form.recovery_type.as_str())
            .map_err(FormError::InvalidRecoveryType)?;
        let note = Some(form.note.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            shopkeeper_id,
            amount_collected,
            recovery_type,
            note,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// One product line added to a recovery with items.
pub struct AddItemForm {
    #[validate(length(min = 1))]
    pub product_id: String,
    pub quantity: String,
    /// Left blank to use the catalog price.
    #[serde(default)]
    pub unit_price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddItemPayload {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Option<Amount>,
}

impl TryFrom<AddItemForm> for AddItemPayload {
    type Error = FormError;

    fn try_from(form: AddItemForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let product_id =
            ProductId::new(form.product_id).map_err(|_| FormError::InvalidProductId)?;
        let quantity = form
            .quantity
            .parse::<Quantity>()
            .map_err(FormError::InvalidQuantity)?;
        let unit_price = match form.unit_price.trim() {
            "" => None,
            price => Some(price.parse::<Amount>().map_err(FormError::InvalidAmount)?),
        };

        Ok(Self {
            product_id,
            quantity,
            unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn recovery_form(amount: &str, recovery_type: &str) -> RecoveryForm {
        RecoveryForm {
            shopkeeper_id: "s-1".to_string(),
            amount_collected: amount.to_string(),
            recovery_type: recovery_type.to_string(),
            note: "  paid in cash  ".to_string(),
        }
    }

    #[test]
    fn recovery_form_to_payload() {
        let payload =
            RecoveryPayload::try_from(recovery_form("250.50", "payment_with_items")).unwrap();

        assert_eq!(payload.shopkeeper_id.as_str(), "s-1");
        assert_eq!(payload.amount_collected.get(), dec!(250.50));
        assert_eq!(payload.recovery_type, RecoveryType::PaymentWithItems);
        assert_eq!(payload.note.as_deref(), Some("paid in cash"));
    }

    #[test]
    fn recovery_form_rejects_negative_and_empty_amounts() {
        assert!(matches!(
            RecoveryPayload::try_from(recovery_form("-5", "")),
            Err(FormError::InvalidAmount(_))
        ));
        assert!(matches!(
            RecoveryPayload::try_from(recovery_form("", "")),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn recovery_form_rejects_unknown_type() {
        assert!(matches!(
            RecoveryPayload::try_from(recovery_form("10", "credit")),
            Err(FormError::InvalidRecoveryType(_))
        ));
    }

    #[test]
    fn blank_unit_price_is_left_for_the_catalog() {
        let payload = AddItemPayload::try_from(AddItemForm {
            product_id: "p-7".to_string(),
            quantity: "4".to_string(),
            unit_price: " ".to_string(),
        })
        .unwrap();

        assert_eq!(payload.quantity.get(), 4);
        assert_eq!(payload.unit_price, None);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = AddItemPayload::try_from(AddItemForm {
            product_id: "p-7".to_string(),
            quantity: "0".to_string(),
            unit_price: "12".to_string(),
        });

        assert!(matches!(result, Err(FormError::InvalidQuantity(_))));
    }
}
