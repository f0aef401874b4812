//! Booking listings per slot.

use rust_decimal::Decimal;

use super::types::{Listing, ListingEntry};
use crate::ledger::ClassifiedBooking;
use crate::schema::{ReportDefinition, Slot};

/// Builds a listing for every slot that asks for one.
#[must_use]
pub fn build_listings(definition: &ReportDefinition, bookings: &[ClassifiedBooking]) -> Vec<Listing> {
    definition
        .slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.build_listing)
        .map(|(index, slot)| Listing {
            slot: index,
            time_slot_id: slot.time_slot_id.clone(),
            name: slot.name.clone(),
            entries: listing_entries(definition, slot, bookings),
        })
        .collect()
}

fn listing_entries(
    definition: &ReportDefinition,
    slot: &Slot,
    bookings: &[ClassifiedBooking],
) -> Vec<ListingEntry> {
    let window = slot.window();
    definition
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_leaf())
        .map(|(index, row)| {
            let matched: Vec<usize> = bookings
                .iter()
                .enumerate()
                .filter(|(_, b)| b.cost_location().is_some_and(|c| row.cost_locations.contains(c)))
                .filter(|(_, b)| window.is_none_or(|(start, end)| start <= b.date() && b.date() <= end))
                .map(|(i, _)| i)
                .collect();
            let total = matched
                .iter()
                .map(|&i| bookings[i].amount())
                .fold(Decimal::ZERO, Decimal::saturating_add);
            ListingEntry {
                row: index,
                name: row.name.clone(),
                cost_locations: row.cost_locations.clone(),
                bookings: matched,
                total,
            }
        })
        .collect()
}
