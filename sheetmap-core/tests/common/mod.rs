use sheetmap_core::{CellIndex, CellValue, format_cell_ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// Writes a minimal XLSX with inline strings, one worksheet per (name, rows)
pub fn create_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<CellValue>>)]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options)?;
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
    );
    for i in 1..=sheets.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    content_types.push_str("</Types>");
    zip.write_all(content_types.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            name,
            i + 1,
            i + 1
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    zip.write_all(workbook_xml.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    let mut rels_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for i in 1..=sheets.len() {
        rels_xml.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }
    rels_xml.push_str("</Relationships>");
    zip.write_all(rels_xml.as_bytes())?;

    for (i, (_, rows)) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(worksheet_xml(rows).as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn worksheet_xml(rows: &[Vec<CellValue>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        let cells: String = row
            .iter()
            .enumerate()
            .filter_map(|(c, value)| {
                let cell_ref = format_cell_ref(CellIndex::new(r as u32, c as u32));
                match value {
                    CellValue::Empty => None,
                    CellValue::Number(n) => Some(format!(r#"<c r="{cell_ref}"><v>{n}</v></c>"#)),
                    CellValue::Text(s) => Some(format!(
                        r#"<c r="{cell_ref}" t="inlineStr"><is><t>{s}</t></is></c>"#
                    )),
                    CellValue::Boolean(b) => Some(format!(
                        r#"<c r="{cell_ref}" t="b"><v>{}</v></c>"#,
                        u8::from(*b)
                    )),
                }
            })
            .collect();
        if !cells.is_empty() {
            xml.push_str(&format!(r#"<row r="{}">{}</row>"#, r + 1, cells));
        }
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

pub fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

pub fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// Row 1 blank, two side-by-side tables on row 2, more rows below
pub fn scenario_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![text(""), text(""), text(""), text(""), text(""), text("")],
        vec![text(""), text("ОС РОВ"), num(7.0), text("Склади"), num(0.0), text("")],
        vec![text(""), text("Танки"), num(5.0), num(3.0), text(""), text("")],
        vec![text(""), text("РЛС"), num(8.0), text(""), text(""), text("")],
    ]
}
