//! Circular previous/next stepping through the country table.

use catalog::CountryTable;
use foundation::CountryCode;

use crate::context::MapContext;
use crate::selection::SelectOutcome;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Index reached by one step from `current` in a table of `len` entries.
///
/// `(current + delta + len) mod len`, wrapping at both ends. With no current
/// entry both directions land on index 0. `None` only for an empty table.
pub fn step_index(current: Option<usize>, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(current) = current.filter(|&i| i < len) else {
        return Some(0);
    };
    let len = len as isize;
    Some(((current as isize + direction.delta() + len) % len) as usize)
}

/// Code one step away from `current` in table order.
///
/// A `current` that is absent from the table counts as no selection.
pub fn neighbor(
    table: &CountryTable,
    current: Option<&CountryCode>,
    direction: Direction,
) -> Option<CountryCode> {
    let index = current.and_then(|c| table.index_of(c));
    let next = step_index(index, table.len(), direction)?;
    table.at(next).map(|c| c.code)
}

/// Moves the context's selection one step and returns the new code.
pub fn navigate<C: MapContext>(ctx: &mut C, direction: Direction) -> Option<CountryCode> {
    let table = ctx.table();
    let current = ctx.state().selected_country;
    let code = neighbor(&table, current.as_ref(), direction)?;
    match ctx.select_country(Some(&code)) {
        SelectOutcome::Selected => Some(code),
        SelectOutcome::Cleared | SelectOutcome::Ignored => None,
    }
}
