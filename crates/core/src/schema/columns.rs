//! Typed classification of schema table columns.
//!
//! Header text is interpreted once per table, before any hierarchy logic
//! runs. Everything downstream works with [`SchemaColumn`] values and column
//! indices.

use saldo_shared::types::TimeSlotId;

const SECTION_PREFIX: &str = "Section ";
const SLOT_PREFIX: &str = "s:";
const LISTING_FLAG: &str = "listing";

/// Meaning of one schema column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaColumn {
    /// `Section <n>`, one breadcrumb level.
    Section(u32),
    /// Row name.
    Name,
    /// Row type.
    Type,
    /// Leaf cost locations.
    CostLocation,
    /// `s:<id>[:listing]`, one slot.
    Slot {
        /// Referenced time slot.
        id: TimeSlotId,
        /// Whether a listing is requested.
        listing: bool,
    },
    /// Anything else; ignored.
    Other,
}

impl SchemaColumn {
    /// Interprets a single header.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let header = header.trim();
        if let Some(rest) = header.strip_prefix(SLOT_PREFIX) {
            let mut parts = rest.split(':');
            let id = parts.next().unwrap_or_default();
            if id.trim().is_empty() {
                return Self::Other;
            }
            let listing = parts.next().is_some_and(|flag| flag.trim() == LISTING_FLAG);
            return Self::Slot {
                id: TimeSlotId::new(id),
                listing,
            };
        }
        if let Some(number) = header.strip_prefix(SECTION_PREFIX) {
            return number
                .trim()
                .parse()
                .map_or(Self::Other, Self::Section);
        }
        match header.to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "type" => Self::Type,
            "cost location" => Self::CostLocation,
            _ => Self::Other,
        }
    }
}

/// A slot column with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotColumn {
    /// Column index in the table.
    pub index: usize,
    /// Referenced time slot.
    pub id: TimeSlotId,
    /// Whether a listing is requested.
    pub listing: bool,
}

/// Column layout of one schema table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaColumns {
    /// `(level, column index)` of every section column, by level.
    pub sections: Vec<(u32, usize)>,
    /// Index of the `Name` column.
    pub name: Option<usize>,
    /// Index of the `Type` column.
    pub kind: Option<usize>,
    /// Index of the `Cost Location` column.
    pub cost_location: Option<usize>,
    /// Slot columns in column order.
    pub slots: Vec<SlotColumn>,
}

impl SchemaColumns {
    /// Classifies all headers of a table.
    ///
    /// Spreadsheet tools suffix duplicated headers with `.<digit>`; a slot id
    /// `<base>.<digit>` whose `<base>` is also a slot column resolves to
    /// `<base>`.
    #[must_use]
    pub fn classify(headers: &[String]) -> Self {
        let mut columns = Self::default();
        for (index, header) in headers.iter().enumerate() {
            match SchemaColumn::parse(header) {
                SchemaColumn::Section(level) => columns.sections.push((level, index)),
                SchemaColumn::Name => columns.name = columns.name.or(Some(index)),
                SchemaColumn::Type => columns.kind = columns.kind.or(Some(index)),
                SchemaColumn::CostLocation => {
                    columns.cost_location = columns.cost_location.or(Some(index));
                }
                SchemaColumn::Slot { id, listing } => {
                    columns.slots.push(SlotColumn { index, id, listing });
                }
                SchemaColumn::Other => {}
            }
        }
        columns.sections.sort_unstable();

        let ids: Vec<TimeSlotId> = columns.slots.iter().map(|s| s.id.clone()).collect();
        for slot in &mut columns.slots {
            if let Some(base) = duplicate_base(slot.id.as_str()) {
                if ids.iter().any(|id| id.as_str() == base) {
                    slot.id = TimeSlotId::new(base);
                }
            }
        }
        columns
    }
}

/// `<base>` of a `<base>.<digit>` id.
fn duplicate_base(id: &str) -> Option<&str> {
    let (base, suffix) = id.rsplit_once('.')?;
    (suffix.len() == 1 && suffix.bytes().all(|b| b.is_ascii_digit()) && !base.is_empty())
        .then_some(base)
}
