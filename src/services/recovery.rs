//! Services for composing recoveries and printing their receipts.

use rust_decimal::Decimal;

use crate::domain::product::Product;
use crate::domain::recovery::{
    NewRecovery, Reconciliation, RecoveryItem, RecoveryRecord, RecoveryType,
};
use crate::domain::shopkeeper::Shopkeeper;
use crate::domain::types::{Amount, ProductId, Quantity, SalesmanId};
use crate::domain::user::{AuthenticatedUser, Role};
use crate::dto::recovery::{PreparedRecovery, ReceiptLine, RecoveryReceipt};
use crate::forms::FormError;
use crate::forms::recovery::{AddItemForm, AddItemPayload, RecoveryForm, RecoveryPayload};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Item line of a draft together with the stock known when it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub item: RecoveryItem,
    pub stock_snapshot: u32,
}

/// Recovery being filled in by a salesman, before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveryDraft {
    recovery_type: RecoveryType,
    lines: Vec<DraftLine>,
}

fn check_stock(product: &str, requested: u32, available: u32) -> Result<(), FormError> {
    if requested > available {
        Err(FormError::InsufficientStock {
            product: product.to_string(),
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

impl RecoveryDraft {
    pub fn new(recovery_type: RecoveryType) -> Self {
        Self {
            recovery_type,
            lines: Vec::new(),
        }
    }

    pub fn recovery_type(&self) -> RecoveryType {
        self.recovery_type
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn items(&self) -> Vec<RecoveryItem> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    /// Switching to payment-only discards every item line.
    pub fn set_recovery_type(&mut self, recovery_type: RecoveryType) {
        self.recovery_type = recovery_type;
        if !recovery_type.carries_items() {
            self.lines.clear();
        }
    }

    /// Adds `quantity` units of `product`. A blank `unit_price` takes the
    /// catalog price. Adding a product already in the draft raises its
    /// quantity and keeps its price unless a new one is given; the total is
    /// checked against `product.stock`, which becomes the line's new snapshot.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: Quantity,
        unit_price: Option<Amount>,
    ) -> Result<(), FormError> {
        if !self.recovery_type.carries_items() {
            return Err(FormError::ItemsNotAllowed);
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.item.product_id == product.id)
        {
            let requested = line.item.quantity.get().saturating_add(quantity.get());
            check_stock(&product.name, requested, product.stock)?;
            line.item.quantity = Quantity::new(requested).map_err(FormError::InvalidQuantity)?;
            if let Some(price) = unit_price {
                line.item.unit_price = price;
            }
            line.stock_snapshot = product.stock;
            return Ok(());
        }

        let unit_price = match unit_price {
            Some(price) => price,
            None => Amount::new(product.price).map_err(FormError::InvalidAmount)?,
        };
        check_stock(&product.name, quantity.get(), product.stock)?;
        self.lines.push(DraftLine {
            item: RecoveryItem::new(product.id.clone(), product.name.clone(), quantity, unit_price),
            stock_snapshot: product.stock,
        });

        Ok(())
    }

    /// Changes the quantity of a line, checked against its stock snapshot.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), FormError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| &line.item.product_id == product_id)
            .ok_or_else(|| FormError::UnknownItem(product_id.to_string()))?;

        check_stock(&line.item.product_name, quantity.get(), line.stock_snapshot)?;
        line.item.quantity = quantity;

        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.item.product_id != product_id);
        self.lines.len() != before
    }

    /// Figures for the summary panel shown before submission.
    pub fn summary(&self, previous_pending: Decimal, amount_collected: Decimal) -> Reconciliation {
        self.recovery_type
            .reconcile(previous_pending, amount_collected, &self.items())
    }
}

/// Looks the product up and adds it to the draft.
pub fn add_draft_item<R>(
    repo: &R,
    draft: &mut RecoveryDraft,
    form: AddItemForm,
) -> ServiceResult<()>
where
    R: ProductReader + ?Sized,
{
    let payload = AddItemPayload::try_from(form)?;

    let product = repo
        .get_product_by_id(&payload.product_id)?
        .ok_or(ServiceError::NotFound)?;

    draft.add_item(&product, payload.quantity, payload.unit_price)?;

    Ok(())
}

/// Validates the form and draft against the shopkeeper's current balance
/// and returns the recovery to submit with its summary.
pub fn prepare_recovery(
    user: &AuthenticatedUser,
    shopkeeper: &Shopkeeper,
    form: RecoveryForm,
    mut draft: RecoveryDraft,
) -> ServiceResult<PreparedRecovery> {
    ensure_role(user, &[Role::Salesman, Role::Admin])?;

    let payload = RecoveryPayload::try_from(form)?;

    if payload.shopkeeper_id != shopkeeper.id {
        return Err(FormError::ShopkeeperMismatch {
            form: payload.shopkeeper_id.to_string(),
            expected: shopkeeper.id.to_string(),
        }
        .into());
    }

    draft.set_recovery_type(payload.recovery_type);
    if payload.recovery_type.carries_items() && draft.lines().is_empty() {
        return Err(FormError::ItemsRequired.into());
    }

    let salesman_id = SalesmanId::new(user.id.as_str())?;
    let previous_pending = Amount::new(shopkeeper.pending_amount)?;

    let recovery = NewRecovery::new(
        payload.shopkeeper_id,
        salesman_id,
        payload.recovery_type,
        previous_pending,
        payload.amount_collected,
        draft.items(),
        payload.note,
    );
    let summary = recovery.reconcile();

    log::info!(
        "prepared {} recovery for shopkeeper {}: collected {}, new pending {}",
        recovery.recovery_type,
        recovery.shopkeeper_id,
        recovery.amount_collected,
        summary.new_pending
    );

    Ok(PreparedRecovery { recovery, summary })
}

/// Builds the printable receipt from the record the backend stored.
pub fn build_receipt(record: &RecoveryRecord, shopkeeper_name: &str) -> RecoveryReceipt {
    let totals = record.stored();
    let consistent = record.recompute() == totals;
    if !consistent {
        log::warn!(
            "stored totals of recovery {} do not match its inputs: {:?} vs {:?}",
            record.id,
            totals,
            record.recompute()
        );
    }

    let lines = if record.recovery_type.carries_items() {
        record
            .items
            .iter()
            .map(|item| ReceiptLine {
                product_name: item.product_name.clone(),
                quantity: item.quantity.get(),
                unit_price: item.unit_price.get(),
                total_price: item.total_price(),
            })
            .collect()
    } else {
        Vec::new()
    };

    RecoveryReceipt {
        recovery_id: record.id.to_string(),
        shopkeeper_name: shopkeeper_name.to_string(),
        salesman_id: record.salesman_id.to_string(),
        recovery_type: record.recovery_type,
        recorded_at: record.created_at,
        lines,
        previous_pending: record.previous_pending_amount,
        amount_collected: record.amount_collected,
        totals,
        consistent,
        note: record.note.clone(),
    }
}
