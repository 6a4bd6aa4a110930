// Reading the judgments and the groups from an Excel workbook.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use snafu::OptionExt;

use ahp_priorities::codec;

use crate::tab::io_common::{cell_to_string, is_empty_cell};
use crate::tab::*;

/// One judgment, as read from a user sheet.
#[derive(PartialEq, Debug, Clone)]
pub struct JudgmentRow {
    pub lineno: u64,
    pub alt1: String,
    pub judgment: Judgment,
    pub alt2: String,
}

/// The judgments of one user.
#[derive(PartialEq, Debug, Clone)]
pub struct UserSheet {
    pub name: String,
    pub judgments: Vec<JudgmentRow>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct WorkbookData {
    // In the order of the sheets
    pub users: Vec<UserSheet>,
    pub groups: GroupTable,
}

/// Reads all the sheets of a workbook.
///
/// Every sheet is a user, except for the sheet called `info_sheet` which holds
/// the groups.
pub fn read_workbook(path: &str, info_sheet: &str) -> BTabResult<WorkbookData> {
    info!("Attempting to read workbook {:?}", path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    debug!("read_workbook: sheets: {:?}", sheet_names);

    let mut users: Vec<UserSheet> = Vec::new();
    let mut groups = GroupTable::new();
    for name in sheet_names {
        let wrange = workbook
            .worksheet_range(&name)
            .context(MissingWorksheetSnafu { name: &name })?
            .context(OpeningExcelSnafu { path })?;
        if name == info_sheet {
            groups = read_info_range(&wrange);
        } else {
            let judgments = read_judgment_range(&name, &wrange)?;
            info!("Got a sheet {} with {} judgments", name, judgments.len());
            users.push(UserSheet { name, judgments });
        }
    }
    if groups.is_empty() {
        debug!("read_workbook: no groups found in sheet {:?}", info_sheet);
    }
    Ok(WorkbookData { users, groups })
}

/// Reads the rows `alternative | judgment | alternative` of a user sheet.
///
/// The rows whose first or third cell is empty are not judgments and are
/// skipped. The columns after the third one are ignored.
pub fn read_judgment_range(sheet: &str, wrange: &Range<DataType>) -> BTabResult<Vec<JudgmentRow>> {
    let first_row = wrange.start().map(|(r, _)| r as u64).unwrap_or(0);
    let mut res: Vec<JudgmentRow> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = first_row + idx as u64 + 1;
        if row.len() < 3 || is_empty_cell(&row[0]) || is_empty_cell(&row[2]) {
            debug!("read_judgment_range: {}: skipping row {}: {:?}", sheet, lineno, row);
            continue;
        }
        let alt1 = read_alternative(sheet, lineno, &row[0])?;
        let alt2 = read_alternative(sheet, lineno, &row[2])?;
        let judgment = read_judgment(sheet, lineno, &row[1])?;
        res.push(JudgmentRow {
            lineno,
            alt1,
            judgment,
            alt2,
        });
    }
    Ok(res)
}

fn read_alternative(sheet: &str, lineno: u64, cell: &DataType) -> BTabResult<String> {
    let name = cell_to_string(cell).context(ExcelWrongCellTypeSnafu {
        sheet,
        lineno,
        content: format!("{:?}", cell),
    })?;
    Ok(name)
}

fn read_judgment(sheet: &str, lineno: u64, cell: &DataType) -> BTabResult<Judgment> {
    match cell {
        c if is_empty_cell(c) => Ok(Judgment::Missing),
        DataType::String(s) => {
            let j = codec::parse_symbol(s).context(UnknownJudgmentSnafu {
                sheet,
                lineno,
                symbol: s.as_str(),
            })?;
            Ok(j)
        }
        DataType::Float(f) => {
            let j = codec::ratio(*f).context(UnknownJudgmentSnafu {
                sheet,
                lineno,
                symbol: f.to_string(),
            })?;
            Ok(j)
        }
        DataType::Int(i) => {
            let j = codec::ratio(*i as f64).context(UnknownJudgmentSnafu {
                sheet,
                lineno,
                symbol: i.to_string(),
            })?;
            Ok(j)
        }
        _ => Err(Box::new(TabError::ExcelWrongCellType {
            sheet: sheet.to_string(),
            lineno,
            content: format!("{:?}", cell),
        })),
    }
}

/// Reads the groups of the users.
///
/// The first column holds the user names and the first row the names of the
/// group attributes. Empty cells are skipped.
pub fn read_info_range(wrange: &Range<DataType>) -> GroupTable {
    let mut groups = GroupTable::new();
    let mut iter = wrange.rows();
    let header = match iter.next() {
        Some(h) => h,
        None => return groups,
    };
    debug!("read_info_range: header: {:?}", header);

    let attributes: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, cell)| cell_to_string(cell).map(|name| (idx, name)))
        .collect();
    for (_, name) in attributes.iter() {
        groups.add_attribute(name);
    }

    for row in iter {
        let user = match row.first().and_then(cell_to_string) {
            Some(u) => u,
            None => continue,
        };
        for (idx, name) in attributes.iter() {
            if let Some(value) = row.get(*idx).and_then(cell_to_string) {
                groups.add_member(name, &value, &user);
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    fn make_range(rows: &[Vec<DataType>]) -> Range<DataType> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut wrange = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                wrange.set_value((r as u32, c as u32), cell.clone());
            }
        }
        wrange
    }

    #[test]
    fn judgment_rows() {
        let wrange = make_range(&[
            vec![s("Jobs survey"), DataType::Empty, DataType::Empty],
            vec![s("Job A"), s(">"), s("Job B")],
            vec![s("Job B"), s(" e "), s("Job C")],
            vec![s("Job A"), DataType::Float(7.0), s("Job C")],
            vec![s("Job C"), DataType::Int(2), DataType::Float(2021.0)],
            vec![s("Job A"), DataType::Empty, s("Job D")],
        ]);
        let rows = read_judgment_range("Percy", &wrange).unwrap();
        let summary: Vec<(u64, &str, Judgment, &str)> = rows
            .iter()
            .map(|r| (r.lineno, r.alt1.as_str(), r.judgment, r.alt2.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (2, "Job A", Judgment::Better, "Job B"),
                (3, "Job B", Judgment::Equal, "Job C"),
                (4, "Job A", Judgment::Ratio(7.0), "Job C"),
                (5, "Job C", Judgment::Ratio(2.0), "2021"),
                (6, "Job A", Judgment::Missing, "Job D"),
            ]
        );
    }

    #[test]
    fn unknown_symbol() {
        let wrange = make_range(&[vec![s("A"), s("=>"), s("B")]]);
        let res = read_judgment_range("Percy", &wrange).map_err(|e| *e);
        match res {
            Err(TabError::UnknownJudgment {
                sheet,
                lineno,
                symbol,
            }) => {
                assert_eq!(sheet, "Percy");
                assert_eq!(lineno, 1);
                assert_eq!(symbol, "=>");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn numeric_codes() {
        let wrange = make_range(&[
            vec![s("A"), DataType::Float(-1.0), s("B")],
            vec![s("A"), DataType::Int(-4), s("C")],
            vec![s("B"), s("-3"), s("C")],
            vec![s("B"), DataType::Float(1.0), s("D")],
        ]);
        let rows = read_judgment_range("Percy", &wrange).unwrap();
        let judgments: Vec<Judgment> = rows.iter().map(|r| r.judgment).collect();
        assert_eq!(
            judgments,
            vec![
                Judgment::Better,
                Judgment::MuchWorse,
                Judgment::Worse,
                Judgment::Equal
            ]
        );
        let rules = ScaleRules::DEFAULT_RULES;
        assert_eq!(rules.resolve(judgments[0]), 3.0);
        assert_eq!(rules.resolve(codec::inverse(judgments[0])), 1.0 / 3.0);
    }

    #[test]
    fn infinite_judgments() {
        let wrange = make_range(&[vec![s("A"), s("inf"), s("B")]]);
        let res = read_judgment_range("Percy", &wrange).map_err(|e| *e);
        assert!(matches!(res, Err(TabError::UnknownJudgment { lineno: 1, .. })));

        let wrange = make_range(&[vec![s("A"), DataType::Float(f64::NAN), s("B")]]);
        let res = read_judgment_range("Percy", &wrange).map_err(|e| *e);
        assert!(matches!(res, Err(TabError::UnknownJudgment { lineno: 1, .. })));
    }

    #[test]
    fn wrong_cell_type() {
        let wrange = make_range(&[vec![s("A"), DataType::Bool(true), s("B")]]);
        let res = read_judgment_range("Percy", &wrange).map_err(|e| *e);
        assert!(matches!(res, Err(TabError::ExcelWrongCellType { lineno: 1, .. })));
    }

    #[test]
    fn info_sheet() {
        let wrange = make_range(&[
            vec![s("User"), s("Gender"), s("Level"), DataType::Empty],
            vec![s("Percy"), s("M"), DataType::Float(1.0), s("ignored")],
            vec![s("Ann"), s("F"), DataType::Float(2.0)],
            vec![s("Bob"), s("M"), DataType::Empty],
            vec![DataType::Empty, s("F"), DataType::Float(1.0)],
        ]);
        let groups = read_info_range(&wrange);
        let names: Vec<&str> = groups.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Gender", "Level"]);
        assert_eq!(
            groups.members("Gender", "M"),
            Some(&["Percy".to_string(), "Bob".to_string()][..])
        );
        assert_eq!(groups.members("Gender", "F"), Some(&["Ann".to_string()][..]));
        assert_eq!(groups.members("Level", "1"), Some(&["Percy".to_string()][..]));
        assert_eq!(groups.members("Level", "2"), Some(&["Ann".to_string()][..]));
    }

    #[test]
    fn empty_info_sheet() {
        let wrange: Range<DataType> = Range::empty();
        assert!(read_info_range(&wrange).is_empty());
    }

    #[test]
    fn missing_workbook() {
        let res = read_workbook("/nonexistent/judgments.xlsx", "info").map_err(|e| *e);
        assert!(matches!(res, Err(TabError::OpeningExcel { .. })));
    }
}
