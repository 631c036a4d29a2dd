// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

/// A single column of a table, as delivered by the parser service.
///
/// The declared type is kept as the parser's uppercase string tag; behavior
/// that varies by type (card glyph, sort priority) goes through the closed
/// lookup tables below instead of string comparisons at the call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    type_tag: String,
    length: Option<String>,
    nullable: bool,
    primary_key: bool,
    foreign_key: bool,
    referenced_table: Option<String>,
    referenced_column: Option<String>,
    auto_increment: bool,
    unique: bool,
    default_value: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            length: None,
            nullable: true,
            primary_key: false,
            foreign_key: false,
            referenced_table: None,
            referenced_column: None,
            auto_increment: false,
            unique: false,
            default_value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn length(&self) -> Option<&str> {
        self.length.as_deref()
    }

    pub fn set_length<T: Into<String>>(&mut self, length: Option<T>) {
        self.length = length.map(Into::into);
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn set_primary_key(&mut self, primary_key: bool) {
        self.primary_key = primary_key;
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key
    }

    pub fn referenced_table(&self) -> Option<&str> {
        self.referenced_table.as_deref()
    }

    pub fn referenced_column(&self) -> Option<&str> {
        self.referenced_column.as_deref()
    }

    /// Marks the column as a foreign key into `table` (optionally `column`).
    pub fn set_reference<T: Into<String>>(&mut self, table: T, column: Option<T>) {
        self.foreign_key = true;
        self.referenced_table = Some(table.into());
        self.referenced_column = column.map(Into::into);
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Auto-increment is only meaningful on the primary key; requests on
    /// non-key columns are dropped rather than stored inconsistently.
    pub fn set_auto_increment(&mut self, auto_increment: bool) {
        self.auto_increment = auto_increment && self.primary_key;
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn set_default_value<T: Into<String>>(&mut self, default_value: Option<T>) {
        self.default_value = default_value.map(Into::into);
    }

    pub fn glyph(&self) -> TypeGlyph {
        if self.primary_key || self.foreign_key {
            return TypeGlyph::Key;
        }
        glyph_for_type(&self.type_tag)
    }

    /// Card-row ordering: keys float to the top, everything else keeps its
    /// declared order (callers must use a stable sort).
    pub fn sort_priority(&self) -> u8 {
        if self.primary_key {
            0
        } else if self.foreign_key {
            1
        } else {
            2
        }
    }
}

/// Glyph category shown next to a column name on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeGlyph {
    Key,
    Numeric,
    Text,
    Temporal,
    Boolean,
    Other,
}

impl TypeGlyph {
    pub fn as_char(self) -> char {
        match self {
            Self::Key => '*',
            Self::Numeric => '#',
            Self::Text => 'a',
            Self::Temporal => '@',
            Self::Boolean => '?',
            Self::Other => '.',
        }
    }
}

/// Closed type-tag table; adding a type is a one-line edit.
const TYPE_GLYPHS: &[(&str, TypeGlyph)] = &[
    ("INT", TypeGlyph::Numeric),
    ("INTEGER", TypeGlyph::Numeric),
    ("BIGINT", TypeGlyph::Numeric),
    ("SMALLINT", TypeGlyph::Numeric),
    ("DECIMAL", TypeGlyph::Numeric),
    ("NUMERIC", TypeGlyph::Numeric),
    ("FLOAT", TypeGlyph::Numeric),
    ("DOUBLE", TypeGlyph::Numeric),
    ("NUMBER", TypeGlyph::Numeric),
    ("VARCHAR", TypeGlyph::Text),
    ("CHAR", TypeGlyph::Text),
    ("TEXT", TypeGlyph::Text),
    ("UUID", TypeGlyph::Text),
    ("DATE", TypeGlyph::Temporal),
    ("DATETIME", TypeGlyph::Temporal),
    ("TIMESTAMP", TypeGlyph::Temporal),
    ("TIME", TypeGlyph::Temporal),
    ("BOOLEAN", TypeGlyph::Boolean),
    ("BOOL", TypeGlyph::Boolean),
];

fn glyph_for_type(type_tag: &str) -> TypeGlyph {
    let upper = type_tag.to_ascii_uppercase();
    TYPE_GLYPHS
        .iter()
        .find(|(tag, _)| *tag == upper)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(TypeGlyph::Other)
}
