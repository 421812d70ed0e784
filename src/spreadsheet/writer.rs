//! Office Open XML (.xlsx) writer.
//!
//! Emits the smallest workbook Excel and LibreOffice accept: content types,
//! package and workbook relationships, and one worksheet. Integer cells are
//! written as numbers, all other text as inline strings; empty cells are omitted
//! and the `dimension` element records the full grid size instead.

use crate::error::CourseSheetError;
use crate::helpers::xml::XmlWriter;
use crate::helpers::zip::write_members;
use crate::spreadsheet::reference::index_to_reference;
use std::fs::File;
use std::io::BufWriter;
use std::io::Seek;
use std::io::Write;
use std::path::Path;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_DOCUMENT_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_OFFICE_DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Default worksheet name of written workbooks
pub(crate) const SHEET_NAME: &str = "Sheet1";

/// Writes the grid as a single-sheet workbook, replacing any existing file
pub(crate) fn write_xlsx(path: &Path, rows: &[Vec<String>]) -> Result<(), CourseSheetError> {
    let file = BufWriter::new(File::create(path)?);
    let mut file = write_workbook(file, rows)?;
    file.flush()?;
    Ok(())
}

/// Writes the workbook archive into any seekable target
pub(crate) fn write_workbook<W: Write + Seek>(target: W, rows: &[Vec<String>]) -> Result<W, CourseSheetError> {
    let members = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", package_relationships()?),
        ("xl/workbook.xml", workbook()?),
        ("xl/_rels/workbook.xml.rels", workbook_relationships()?),
        ("xl/worksheets/sheet1.xml", worksheet(rows)?),
    ];
    write_members(target, &members)
}

fn content_types() -> Result<Vec<u8>, CourseSheetError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty("Default", &[
        ("Extension", "rels"),
        ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
    ])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    xml.empty("Override", &[
        ("PartName", "/xl/workbook.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"),
    ])?;
    xml.empty("Override", &[
        ("PartName", "/xl/worksheets/sheet1.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"),
    ])?;
    xml.end("Types")?;
    Ok(xml.into_bytes())
}

fn package_relationships() -> Result<Vec<u8>, CourseSheetError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    xml.empty("Relationship", &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "xl/workbook.xml")])?;
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn workbook() -> Result<Vec<u8>, CourseSheetError> {
    let mut xml = XmlWriter::new()?;
    xml.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_DOCUMENT_RELATIONSHIPS)])?;
    xml.start("sheets", &[])?;
    xml.empty("sheet", &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")])?;
    xml.end("sheets")?;
    xml.end("workbook")?;
    Ok(xml.into_bytes())
}

fn workbook_relationships() -> Result<Vec<u8>, CourseSheetError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    xml.empty("Relationship", &[("Id", "rId1"), ("Type", REL_WORKSHEET), ("Target", "worksheets/sheet1.xml")])?;
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn worksheet(rows: &[Vec<String>]) -> Result<Vec<u8>, CourseSheetError> {
    let mut xml = XmlWriter::new()?;
    xml.start("worksheet", &[("xmlns", NS_MAIN)])?;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if !rows.is_empty() && width > 0 {
        let dimension = format!("A1:{}", index_to_reference(rows.len() - 1, width - 1));
        xml.empty("dimension", &[("ref", dimension.as_str())])?;
    }
    xml.start("sheetData", &[])?;
    for (row_index, row) in rows.iter().enumerate() {
        if row.iter().all(String::is_empty) {
            continue;
        }
        let number = (row_index + 1).to_string();
        xml.start("row", &[("r", number.as_str())])?;
        for (col_index, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let reference = index_to_reference(row_index, col_index);
            if is_integer(value) {
                xml.start("c", &[("r", reference.as_str())])?;
                xml.start("v", &[])?;
                xml.text(value)?;
                xml.end("v")?;
            } else {
                xml.start("c", &[("r", reference.as_str()), ("t", "inlineStr")])?;
                xml.start("is", &[])?;
                xml.start("t", &[("xml:space", "preserve")])?;
                xml.text(value)?;
                xml.end("t")?;
                xml.end("is")?;
            }
            xml.end("c")?;
        }
        xml.end("row")?;
    }
    xml.end("sheetData")?;
    xml.end("worksheet")?;
    Ok(xml.into_bytes())
}

/// True when the text is an integer that reads back unchanged (`900`, not `0900`)
fn is_integer(value: &str) -> bool {
    value
        .parse::<i64>()
        .map(|number| number.to_string() == value)
        .unwrap_or(false)
}
