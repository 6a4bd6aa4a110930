use calamine::DataType;

/// The text of a cell, if the cell holds a name or a label.
///
/// Whole numbers are printed without decimals: a group value typed as `1` in
/// a spreadsheet is read back as a float.
pub fn cell_to_string(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if s.trim().is_empty() => None,
        DataType::String(s) => Some(s.trim().to_string()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn is_empty_cell(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
