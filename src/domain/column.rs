// ============================================================================
// Symbol Columns
// Per-position transition descriptions and the cyclic digit stepper
// ============================================================================

use smallvec::{smallvec, SmallVec};

/// Digit rotation sequences are short in the common case; sixteen inline
/// slots cover a full extra revolution without spilling to the heap.
pub type DigitSequence = SmallVec<[u8; 16]>;

// ============================================================================
// Spin Direction
// ============================================================================

/// Travel direction shared by every rotating column of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpinDirection {
    Ascending,
    Descending,
}

impl SpinDirection {
    /// The next digit on a 0-9 wheel travelling in this direction.
    #[inline]
    pub fn step(self, digit: u8) -> u8 {
        match self {
            SpinDirection::Ascending => (digit + 1) % 10,
            SpinDirection::Descending => (digit + 9) % 10,
        }
    }

    /// How many steps separate `start` from `end` in this direction.
    #[inline]
    pub fn distance(self, start: u8, end: u8) -> usize {
        match self {
            SpinDirection::Ascending => ((10 + end - start) % 10) as usize,
            SpinDirection::Descending => ((10 + start - end) % 10) as usize,
        }
    }
}

/// Generate the travel-order digit sequence from `start` to `end`,
/// inclusive of both endpoints, extended by `loops` extra full revolutions.
///
/// # Example
/// `spin_sequence(3, 7, 0, SpinDirection::Ascending)` → `[3, 4, 5, 6, 7]`
/// `spin_sequence(7, 3, 0, SpinDirection::Descending)` → `[7, 6, 5, 4, 3]`
pub fn spin_sequence(start: u8, end: u8, loops: usize, direction: SpinDirection) -> DigitSequence {
    debug_assert!(start < 10 && end < 10);

    let steps = direction.distance(start, end) + 10 * loops;
    let mut sequence: DigitSequence = smallvec![start];
    sequence.reserve(steps);

    let mut digit = start;
    for _ in 0..steps {
        digit = direction.step(digit);
        sequence.push(digit);
    }
    sequence
}

// ============================================================================
// Symbol Column
// ============================================================================

/// What one character position does during a transition: stay put, or roll
/// through a digit sequence.
///
/// A `Rotating` column of length 1 is a logically linked reel that renders
/// without motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolColumn {
    Static(char),
    Rotating {
        sequence: DigitSequence,
        direction: SpinDirection,
    },
}

impl SymbolColumn {
    /// Build a rotating column by stepping the digit wheel.
    pub fn rotating(start: u8, end: u8, loops: usize, direction: SpinDirection) -> Self {
        SymbolColumn::Rotating {
            sequence: spin_sequence(start, end, loops, direction),
            direction,
        }
    }

    /// Number of symbols this column travels through.
    pub fn len(&self) -> usize {
        match self {
            SymbolColumn::Static(_) => 1,
            SymbolColumn::Rotating { sequence, .. } => sequence.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True iff the column actually moves: rotating with more than one
    /// symbol.
    pub fn is_animatable(&self) -> bool {
        matches!(self, SymbolColumn::Rotating { sequence, .. } if sequence.len() > 1)
    }

    /// The symbol shown once the column has settled.
    pub fn final_symbol(&self) -> char {
        match self {
            SymbolColumn::Static(symbol) => *symbol,
            SymbolColumn::Rotating { sequence, .. } => {
                let last = sequence.last().copied().unwrap_or(0);
                (b'0' + last) as char
            },
        }
    }
}

// ============================================================================
// Column Kind
// ============================================================================

/// Structural role of a column, used for styling hints and for pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// Integer digit at the given power of ten.
    Integer { power: u32 },
    RadixMark,
    DecimalMark,
    /// Decimal digit at the given place, 1-based.
    Decimal { place: u32 },
    Sign,
    Currency,
}

impl ColumnKind {
    /// Class-name hints handed to the renderer: a power-of-ten label plus
    /// the structural role.
    pub fn css_classes(&self) -> String {
        match self {
            ColumnKind::Integer { power } => format!("_1e{power} integer"),
            ColumnKind::RadixMark => "radix-mark".to_string(),
            ColumnKind::DecimalMark => "decimal-mark".to_string(),
            ColumnKind::Decimal { place } => format!("_1e-{place} decimal"),
            ColumnKind::Sign => "number-sign".to_string(),
            ColumnKind::Currency => "currency".to_string(),
        }
    }
}
