// ============================================================================
// Symbol Matrix Builder
// Walks two aligned layouts and derives per-position transition columns
// ============================================================================

use crate::domain::column::{ColumnKind, SpinDirection, SymbolColumn};
use crate::domain::config::OdometerConfig;
use crate::numeric::NormalizedValue;

/// One character position: its transition description plus its structural
/// role.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixColumn {
    pub column: SymbolColumn,
    pub kind: ColumnKind,
}

/// The full per-position transition plan for one `set()` call.
///
/// Direction is fixed for the whole matrix: every rotating column travels
/// the same way, descending iff the new value is numerically below the old
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolMatrix {
    pub columns: Vec<MatrixColumn>,
    pub is_decreasing: bool,
    pub direction: SpinDirection,
}

impl SymbolMatrix {
    pub fn animatable_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.column.is_animatable())
            .count()
    }
}

/// Build the symbol matrix for a transition between two isometric layouts.
///
/// Walks left to right. Mark positions stay static. Digit positions stay
/// static until the first difference; from there on every digit position is
/// a rotating column, each extended by one more full revolution than the
/// rotating column before it. Equal digits after the first difference become
/// single-symbol rotations on the first spinning column and full
/// revolutions afterwards, mirroring the mechanical carry linkage.
pub fn build_matrix(
    old: &NormalizedValue,
    new: &NormalizedValue,
    cfg: &OdometerConfig,
) -> SymbolMatrix {
    let is_decreasing = new.value < old.value;
    let direction = if is_decreasing {
        SpinDirection::Descending
    } else {
        SpinDirection::Ascending
    };

    let old_chars: Vec<char> = unsigned(&old.isometric).chars().collect();
    let new_chars: Vec<char> = unsigned(&new.isometric).chars().collect();
    debug_assert_eq!(old_chars.len(), new_chars.len());

    let kinds = column_kinds(new);
    debug_assert_eq!(kinds.len(), new_chars.len());

    let mut columns = Vec::with_capacity(new_chars.len());
    let mut digit_changed = false;
    let mut loops = 0usize;

    for (i, (&old_char, &new_char)) in old_chars.iter().zip(new_chars.iter()).enumerate() {
        if !digit_changed && old_char != new_char {
            digit_changed = true;
        }

        let is_mark = Some(new_char) == cfg.radix_mark || new_char == cfg.decimal_mark;
        let column = if is_mark || (old_char == new_char && !digit_changed) {
            SymbolColumn::Static(new_char)
        } else {
            let start = old_char.to_digit(10).unwrap_or(0) as u8;
            let end = new_char.to_digit(10).unwrap_or(0) as u8;
            let rotating = SymbolColumn::rotating(start, end, loops, direction);
            loops += 1;
            rotating
        };

        columns.push(MatrixColumn {
            column,
            kind: kinds[i],
        });
    }

    SymbolMatrix {
        columns,
        is_decreasing,
        direction,
    }
}

fn unsigned(isometric: &str) -> &str {
    isometric.strip_prefix('-').unwrap_or(isometric)
}

/// Structural roles for every position of the (sign-stripped) layout:
/// integer digits labeled by power of ten, grouping marks, then the decimal
/// mark and decimal digits labeled by place.
fn column_kinds(value: &NormalizedValue) -> Vec<ColumnKind> {
    let mut kinds = Vec::new();

    let mut remaining_digits = value
        .integer_digits
        .chars()
        .filter(char::is_ascii_digit)
        .count() as u32;
    for c in value.integer_digits.chars() {
        if c.is_ascii_digit() {
            remaining_digits -= 1;
            kinds.push(ColumnKind::Integer {
                power: remaining_digits,
            });
        } else {
            kinds.push(ColumnKind::RadixMark);
        }
    }

    if !value.decimal_digits.is_empty() {
        kinds.push(ColumnKind::DecimalMark);
        for place in 1..=value.decimal_digits.len() as u32 {
            kinds.push(ColumnKind::Decimal { place });
        }
    }

    kinds
}
