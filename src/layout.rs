//! Fixed-width layout of a sales input line.
//!
//! ```text
//! 0         10 13         24
//! yyyy-MM-dd SSS AAAAAAAAAAA F
//! ```

/// Which record attribute a column decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    SellerCode,
    Amount,
    LargeAccountFlag,
}

/// A named column of the fixed-width layout, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

impl Field {
    const fn new(kind: FieldKind, name: &'static str, offset: usize, len: usize) -> Self {
        Field {
            kind,
            name,
            offset,
            len,
        }
    }

    /// First character position after this field.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Extracts this field from a line. Returns `None` if the line is too short.
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut indices = line.char_indices().map(|(i, _)| i).chain([line.len()]);
        let start = indices.nth(self.offset)?;
        let end = if self.len == 0 {
            start
        } else {
            indices.nth(self.len - 1)?
        };
        line.get(start..end)
    }
}

pub const DATE: Field = Field::new(FieldKind::Date, "date", 0, 10);
pub const SELLER_CODE: Field = Field::new(FieldKind::SellerCode, "seller code", 10, 3);
pub const AMOUNT: Field = Field::new(FieldKind::Amount, "amount", 13, 11);
pub const LARGE_ACCOUNT_FLAG: Field =
    Field::new(FieldKind::LargeAccountFlag, "large account flag", 24, 1);

/// All fields in line order.
pub const FIELDS: [Field; 4] = [DATE, SELLER_CODE, AMOUNT, LARGE_ACCOUNT_FLAG];

/// Minimum number of characters a record line must have.
pub const LINE_WIDTH: usize = LARGE_ACCOUNT_FLAG.end();

/// Flag value marking a large-account sale.
pub const LARGE_ACCOUNT_YES: &str = "S";

/// Flag value written for any other sale.
pub const LARGE_ACCOUNT_NO: &str = "N";

/// Date format used on input lines and in the reference period.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
