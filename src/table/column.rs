/// Value types a column can declare or be inferred as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnType {
    /// Variable-length text
    #[default]
    Varchar,
    /// Boolean values (true/false)
    Boolean,
    /// 64-bit signed integers
    BigInt,
    /// Double-precision floating point numbers
    Double,
}

/// Represents a column of an extracted table with name and value type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column title as reported by the grid
    pub name: String,
    /// Declared value type
    pub kind: ColumnType,
}

impl Column {
    /// Creates a text column.
    pub fn text(name: &str) -> Self {
        Self { name: name.to_owned(), kind: ColumnType::Varchar }
    }
}

impl ColumnType {
    /// Infers the narrowest type of a single text value.
    /// Blank values carry no type information.
    pub fn infer(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            Some(ColumnType::Boolean)
        } else if value.parse::<i64>().is_ok() {
            Some(ColumnType::BigInt)
        } else if value.parse::<f64>().is_ok() {
            Some(ColumnType::Double)
        } else {
            Some(ColumnType::Varchar)
        }
    }

    /// Detects the most specific common type from a collection of candidate types.
    /// Falls back to VARCHAR if types are inconsistent or empty.
    pub fn detect(types: Vec<Option<ColumnType>>) -> ColumnType {
        let types: Vec<ColumnType> = types.into_iter().flatten().collect();
        if types.is_empty() {
            ColumnType::Varchar
        } else if types.iter().all(|kind| kind.is_boolean()) {
            ColumnType::Boolean
        } else if types.iter().all(|kind| kind.is_int()) {
            ColumnType::BigInt
        } else if types.iter().all(|kind| kind.is_float()) {
            ColumnType::Double
        } else {
            ColumnType::Varchar
        }
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, ColumnType::Boolean)
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, ColumnType::BigInt)
    }

    /// Returns true for numeric types (integer or floating point).
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, ColumnType::BigInt | ColumnType::Double)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_values() {
        assert_eq!(ColumnType::infer(""), None);
        assert_eq!(ColumnType::infer(" TRUE "), Some(ColumnType::Boolean));
        assert_eq!(ColumnType::infer("-42"), Some(ColumnType::BigInt));
        assert_eq!(ColumnType::infer("3.5"), Some(ColumnType::Double));
        assert_eq!(ColumnType::infer("foo123"), Some(ColumnType::Varchar));
    }

    #[test]
    fn detect_common_type() {
        use ColumnType::*;
        assert_eq!(ColumnType::detect(vec![]), Varchar);
        assert_eq!(ColumnType::detect(vec![None, Some(BigInt), Some(BigInt)]), BigInt);
        assert_eq!(ColumnType::detect(vec![Some(BigInt), Some(Double)]), Double);
        assert_eq!(ColumnType::detect(vec![Some(Boolean), None]), Boolean);
        assert_eq!(ColumnType::detect(vec![Some(Boolean), Some(BigInt)]), Varchar);
    }
}
