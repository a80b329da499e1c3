//! First-fit resource selection.

use crate::error::{Error, Result};
use crate::resource::{ResourceCategory, ResourceInstance};
use crate::slot::Slot;

use super::ledger::SlotLedger;

/// Whether the resource can take one more reservation at `slot`.
///
/// Exclusive resources must be empty; shared ones must be below capacity.
///
/// # Errors
///
/// Returns an error if the occupancy lookup fails.
pub fn has_room<L>(ledger: &L, resource: &ResourceInstance, slot: Slot) -> Result<bool>
where
    L: SlotLedger + ?Sized,
{
    let occupancy = ledger.occupancy(resource.id, slot)?;
    Ok(if resource.category.is_exclusive() {
        occupancy == 0
    } else {
        occupancy < resource.capacity
    })
}

/// Picks the first resource, in ascending id order, with room at `slot`.
///
/// `candidates` are the instances of `category`. The result depends only
/// on the candidates and the ledger, so identical state always yields the
/// same choice.
///
/// # Errors
///
/// Returns [`Error::NoAvailableResource`] when no candidate has room, or
/// an error from the ledger.
pub fn select_first_fit<L>(
    ledger: &L,
    category: ResourceCategory,
    candidates: &[ResourceInstance],
    slot: Slot,
) -> Result<ResourceInstance>
where
    L: SlotLedger + ?Sized,
{
    let mut ordered: Vec<&ResourceInstance> = candidates.iter().collect();
    ordered.sort_by_key(|r| r.id);

    for resource in ordered {
        if has_room(ledger, resource, slot)? {
            log::debug!("selected {} for {slot}", resource.label);
            return Ok(resource.clone());
        }
    }

    Err(Error::NoAvailableResource { category, slot })
}

/// Every candidate with room at `slot`, in ascending id order.
///
/// # Errors
///
/// Returns an error from the ledger.
pub fn available_resources<L>(
    ledger: &L,
    candidates: &[ResourceInstance],
    slot: Slot,
) -> Result<Vec<ResourceInstance>>
where
    L: SlotLedger + ?Sized,
{
    let mut available = Vec::new();
    for resource in candidates {
        if has_room(ledger, resource, slot)? {
            available.push(resource.clone());
        }
    }
    available.sort_by_key(|r| r.id);
    Ok(available)
}
