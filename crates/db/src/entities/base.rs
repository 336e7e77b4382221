//! Columns and behavior shared by every entity.
//!
//! Each table carries an auto-increment `id` plus `created_at`/`updated_at`
//! timestamps. The columns are declared flat on every `Model`; this module only
//! holds the save hook and the text-list helper the entities share.

use chrono::{SubsecRound, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, SimpleExpr, ValueType};

/// Names the timestamp columns of an entity for [`stamp`].
pub trait BaseColumns: ActiveModelTrait {
    /// Column set once on insert.
    const CREATED_AT: <Self::Entity as EntityTrait>::Column;
    /// Column refreshed on every save.
    const UPDATED_AT: <Self::Entity as EntityTrait>::Column;
}

/// Fill the timestamp columns before a save.
///
/// `created_at` is set on insert unless the caller set it. `updated_at` is set
/// on every save and always moves forward from the value the model was loaded
/// with, even when the clock has not advanced.
pub fn stamp<A: BaseColumns>(mut model: A, insert: bool) -> A {
    let now = now();

    if insert && model.is_not_set(A::CREATED_AT) {
        model.set(A::CREATED_AT, now.into());
    }

    let previous = model
        .get(A::UPDATED_AT)
        .into_value()
        .and_then(|v| <DateTimeWithTimeZone as ValueType>::try_from(v).ok());
    let updated_at = match previous {
        Some(prev) if now <= prev => prev + chrono::Duration::microseconds(1),
        _ => now,
    };
    model.set(A::UPDATED_AT, updated_at.into());

    model
}

/// Current time at the precision Postgres stores.
#[must_use]
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset().trunc_subsecs(6)
}

/// `updated_at` value for bulk updates, which skip [`stamp`].
///
/// Evaluates to `now` unless the stored value is not older, in which case it
/// moves one microsecond past the stored value.
#[must_use]
pub fn bumped_updated_at(now: DateTimeWithTimeZone) -> SimpleExpr {
    Expr::cust_with_values(
        r#"GREATEST(?, "updated_at" + INTERVAL '1 microsecond')"#,
        [now],
    )
}

/// Split a whitespace-delimited text column into its items.
///
/// `None`, the empty string and blank strings all yield an empty list.
#[must_use]
pub fn split_spaced(raw: Option<&str>) -> Vec<&str> {
    raw.map(|s| s.split_whitespace().collect())
        .unwrap_or_default()
}
