use crate::errors::{AppError, AppResult};
use crate::export::excel_date::to_excel_serial;
use crate::export::model::{Cell, HEADERS, export_to_cells};
use crate::export::{DeliveryExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Styled sheet with a frozen header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(rows: &[DeliveryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Deliveries").map_err(to_export_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, item) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in export_to_cells(item).iter().enumerate() {
            let width = write_cell(worksheet, row, col as u16, cell, band)?;
            col_widths[col] = col_widths[col].max(width);
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", rows.len(), path);
    Ok(())
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Write one cell and return its display width.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<usize> {
    match cell {
        Cell::Int(v) => {
            let fmt = base_format(bg).set_align(FormatAlign::Right);
            ws.write_with_format(row, col, *v as f64, &fmt)
                .map_err(to_export_error)?;
            Ok(v.to_string().len())
        }
        Cell::Number(v) => {
            let fmt = base_format(bg)
                .set_align(FormatAlign::Right)
                .set_num_format("#,##0.##");
            ws.write_with_format(row, col, *v, &fmt)
                .map_err(to_export_error)?;
            Ok(format!("{v:.2}").len())
        }
        Cell::DateTime(s) => {
            if let Some(serial) = to_excel_serial(s) {
                let fmt = base_format(bg).set_num_format("yyyy-mm-dd hh:mm");
                ws.write_with_format(row, col, serial, &fmt)
                    .map_err(to_export_error)?;
            } else {
                ws.write_with_format(row, col, *s, &base_format(bg))
                    .map_err(to_export_error)?;
            }
            Ok(UnicodeWidthStr::width(*s))
        }
        Cell::Text(s) => {
            ws.write_with_format(row, col, *s, &base_format(bg))
                .map_err(to_export_error)?;
            Ok(UnicodeWidthStr::width(*s))
        }
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
