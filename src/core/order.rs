//! Order record types shared by the intake form, the review board and the stores
//!
//! An [`OrderRecord`] is created exactly once from a [`NewOrder`] payload. The
//! store assigns its `id` and `created_at` (returned as a [`StoreReceipt`]);
//! afterwards only its [`OrderStatus`] ever changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Garment size offered for the drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
}

impl Size {
    /// All sizes in display order
    pub const ALL: [Size; 5] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unknown size '{}'", s))
    }
}

/// Triage stage of an order
///
/// Every order starts as `Pending`. Operators move it to one of the three
/// other values; `Pending` itself is never a transition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Contacted,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Contacted,
        OrderStatus::Confirmed,
        OrderStatus::Cancelled,
    ];

    /// Statuses an operator may set from the review board
    pub const OPERATOR_TARGETS: [OrderStatus; 3] = [
        OrderStatus::Contacted,
        OrderStatus::Confirmed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Contacted => "CONTACTED",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether this status can be written by an operator transition
    pub fn is_operator_target(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Records written before the status column existed carry `null`
fn status_or_pending<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OrderStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Number of garments ordered, always within `[Quantity::MIN, Quantity::MAX]`
///
/// Out-of-range values are coerced into range rather than rejected, both when
/// typed into the form and when read off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Build a quantity, returning `None` when the value is out of range
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Coerce any integer into range
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Interpret raw text typed into the quantity input
    ///
    /// The leading integer is taken (`"7 pcs"` reads as 7). Text with no
    /// leading integer, and zero, fall back to 1 before clamping.
    pub fn from_input(raw: &str) -> Self {
        match leading_integer(raw) {
            Some(0) | None => Self(Self::MIN),
            Some(value) => Self::clamped(value),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Quantity> for u8 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long inputs; they clamp to MAX anyway
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Creation payload sent to the record store
///
/// Text fields are already trimmed and `status` is always `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub size: Size,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        size: Size,
        quantity: Quantity,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            address: address.into().trim().to_string(),
            size,
            quantity,
            status: OrderStatus::Pending,
        }
    }
}

/// Identity the store assigns to a freshly created record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReceipt {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl StoreReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}

impl Default for StoreReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// A persisted pre-order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub size: Size,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Materialize a record from its creation payload and store-assigned identity
    ///
    /// The payload's status is ignored: new records always start as `Pending`.
    pub fn from_new(order: NewOrder, receipt: StoreReceipt) -> Self {
        Self {
            id: receipt.id,
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            size: order.size,
            quantity: order.quantity,
            status: OrderStatus::Pending,
            created_at: receipt.created_at,
        }
    }
}

/// Sort records newest first, breaking timestamp ties by id so the order is total
pub fn sort_newest_first(records: &mut [OrderRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
