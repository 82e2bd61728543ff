//! Rendering symbols.
//!
//! A rendered intersection is a pair of symbols: a base (board furniture or
//! a stone) and a mark drawn on top of it. Every symbol has a stable numeric
//! code and a name, looked up through one static table.

use std::fmt;

use serde::{Serialize, Serializer};

/// A rendering primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    // Base layer.
    TlCorner,
    TrCorner,
    BlCorner,
    BrCorner,
    TopEdge,
    BotEdge,
    LeftEdge,
    RightEdge,
    Center,
    CenterStarpoint,
    BlackStone,
    WhiteStone,
    /// No base, or no mark.
    Empty,
    // Mark layer.
    Triangle,
    Square,
    Circle,
    XMark,
    TextLabel,
    LastMove,
    NextVariation,
}

/// `(symbol, code, name)` for every symbol, in code order.
static SYMBOL_TABLE: [(Symbol, u8, &str); 20] = [
    (Symbol::TlCorner, 1, "TL_CORNER"),
    (Symbol::TrCorner, 2, "TR_CORNER"),
    (Symbol::BlCorner, 3, "BL_CORNER"),
    (Symbol::BrCorner, 4, "BR_CORNER"),
    (Symbol::TopEdge, 5, "TOP_EDGE"),
    (Symbol::BotEdge, 6, "BOT_EDGE"),
    (Symbol::LeftEdge, 7, "LEFT_EDGE"),
    (Symbol::RightEdge, 8, "RIGHT_EDGE"),
    (Symbol::Center, 9, "CENTER"),
    (Symbol::CenterStarpoint, 10, "CENTER_STARPOINT"),
    (Symbol::BlackStone, 11, "BSTONE"),
    (Symbol::WhiteStone, 12, "WSTONE"),
    (Symbol::Empty, 13, "EMPTY"),
    (Symbol::Triangle, 14, "TRIANGLE"),
    (Symbol::Square, 15, "SQUARE"),
    (Symbol::Circle, 16, "CIRCLE"),
    (Symbol::XMark, 17, "XMARK"),
    (Symbol::TextLabel, 18, "TEXTLABEL"),
    (Symbol::LastMove, 19, "LASTMOVE"),
    (Symbol::NextVariation, 20, "NEXTVARIATION"),
];

impl Symbol {
    fn entry(self) -> &'static (Symbol, u8, &'static str) {
        // Table rows follow declaration order.
        &SYMBOL_TABLE[self as usize]
    }

    pub fn code(self) -> u8 {
        self.entry().1
    }

    pub fn name(self) -> &'static str {
        self.entry().2
    }

    pub fn from_code(code: u8) -> Option<Symbol> {
        let idx = usize::from(code).checked_sub(1)?;
        SYMBOL_TABLE.get(idx).map(|e| e.0)
    }

    pub fn from_name(name: &str) -> Option<Symbol> {
        SYMBOL_TABLE.iter().find(|e| e.2 == name).map(|e| e.0)
    }

    /// True for symbols drawn on the mark layer. `Empty` belongs to both.
    pub fn is_mark(self) -> bool {
        matches!(
            self,
            Symbol::Triangle
                | Symbol::Square
                | Symbol::Circle
                | Symbol::XMark
                | Symbol::TextLabel
                | Symbol::LastMove
                | Symbol::NextVariation
                | Symbol::Empty
        )
    }

    /// True for symbols drawn on the base layer. `Empty` belongs to both.
    pub fn is_base(self) -> bool {
        !self.is_mark() || self == Symbol::Empty
    }

    pub fn is_stone(self) -> bool {
        matches!(self, Symbol::BlackStone | Symbol::WhiteStone)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// What to draw at one intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolPair {
    pub base: Symbol,
    pub mark: Symbol,
}

impl SymbolPair {
    pub const fn new(base: Symbol, mark: Symbol) -> Self {
        SymbolPair { base, mark }
    }

    pub fn has_mark(&self) -> bool {
        self.mark != Symbol::Empty
    }
}
