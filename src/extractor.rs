//! Extractor Module
//!
//! calamineを使用したExcelファイルからのコンポーネントレコード抽出。
//! 先頭シートのヘッダー行をキー集合として、データ行を順序付きレコード列に
//! 変換します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::AutoDocError;
use crate::types::ComponentRecord;

/// 入力ファイルに期待される列名（強制はされない）
///
/// 任意のヘッダー集合が受け入れられます。スキーマ検証は行いません。
pub const EXPECTED_HEADERS: [&str; 9] = [
    "Component ID",
    "Name",
    "Type",
    "Voltage Rating (V)",
    "Current Rating (A)",
    "Material",
    "Status",
    "Engineer",
    "Notes",
];

/// ワークブックからコンポーネントレコードを抽出する
///
/// 先頭（アクティブ）シートのみを対象とし、1行目をヘッダー行として
/// 扱います。ヘッダーセルは文字列表現に変換して前後の空白を除去します。
/// ヘッダーの重複排除は行いません。同名の列が複数存在する場合、
/// 後の列の値が先の列の値を上書きします。
///
/// データ行の処理:
/// - すべてのセルが空の行は出力に含めません
/// - 1つでも非空セルがある行は、ヘッダーと位置で対応付けてレコード化します
/// - ヘッダー数を超えるセルは破棄され、不足するセルは空として扱われます
/// - 空のセル値は文字列`"N/A"`に正規化されます
///
/// # 引数
///
/// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
///
/// # 戻り値
///
/// * `Ok(Vec<ComponentRecord>)` - ソースの行順序を保持したレコード列。
///   ヘッダーのみ、または空のシートの場合は空のVec
/// * `Err(AutoDocError::Parse)` - ワークブックとして解析できない場合
/// * `Err(AutoDocError::NoSheets)` - シートが1つも存在しない場合
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use std::io::{Cursor, Read};
/// use autodoc::extract_components;
///
/// # fn main() -> Result<(), autodoc::AutoDocError> {
/// let mut file = File::open("components.xlsx")?;
/// let mut buffer = Vec::new();
/// file.read_to_end(&mut buffer)?;
/// let records = extract_components(Cursor::new(buffer))?;
/// println!("{} components", records.len());
/// # Ok(())
/// # }
/// ```
pub fn extract_components<R: Read + Seek + Clone>(
    reader: R,
) -> Result<Vec<ComponentRecord>, AutoDocError> {
    let sheets = open_workbook_auto_from_rs(reader).map_err(AutoDocError::Parse)?;
    let mut workbook = match sheets {
        Sheets::Xlsx(workbook) => workbook,
        _ => {
            return Err(AutoDocError::Parse(calamine::Error::Msg(
                "Only XLSX format is supported",
            )))
        }
    };

    // 先頭シートのみを使用
    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names.first().ok_or(AutoDocError::NoSheets)?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| AutoDocError::Parse(e.into()))?;

    let mut rows = range.rows();

    // 1行目をヘッダー行として扱う（内容にかかわらず）
    let headers: Vec<String> = match rows.next() {
        Some(row) => row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let values: Vec<String> = row.iter().map(cell_to_string).collect();

        // 全セルが空の行は破棄
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }

        let mut record = ComponentRecord::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = values.get(idx).map(String::as_str).unwrap_or("");
            if value.is_empty() {
                record.insert(header.clone(), "N/A");
            } else {
                record.insert(header.clone(), value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// ファイルパスからコンポーネントレコードを抽出する
///
/// `extract_components`のパス指定版です。
///
/// # 引数
///
/// * `path` - Excelファイルのパス
///
/// # 戻り値
///
/// * `Ok(Vec<ComponentRecord>)` - 抽出されたレコード列
/// * `Err(AutoDocError::Io)` - ファイルを開けない場合
/// * `Err(AutoDocError::Parse)` - ワークブックとして解析できない場合
pub fn extract_components_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<ComponentRecord>, AutoDocError> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    extract_components(Cursor::new(buffer))
}

/// セル値を文字列表現に変換する
///
/// 数値は`f64`の標準表示（整数値なら小数点なし）、論理値はTRUE/FALSE、
/// 日付はISO 8601形式に変換します。
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => excel_serial_to_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
        Data::Empty => String::new(),
        _ => String::new(),
    }
}

/// Excelのシリアル日付値をISO 8601文字列に変換する
///
/// 1900年システム（1899年12月30日起算）として処理します。時刻成分を
/// 持たない値は日付のみ、持つ値は`YYYY-MM-DD HH:MM:SS`形式になります。
/// 範囲外の値はシリアル値の文字列表現にフォールバックします。
fn excel_serial_to_string(serial: f64) -> String {
    format_excel_serial(serial).unwrap_or_else(|| serial.to_string())
}

fn format_excel_serial(serial: f64) -> Option<String> {
    // 9999-12-31がシリアル値2958465
    if !(0.0..=2_958_465.0).contains(&serial) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor() as i64;
    let date = epoch.checked_add_signed(Duration::days(days))?;

    let secs = ((serial - serial.floor()) * 86_400.0).round() as u32;
    if secs == 0 {
        Some(date.format("%Y-%m-%d").to_string())
    } else {
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs.min(86_399), 0)?;
        Some(
            NaiveDateTime::new(date, time)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_numbers() {
        // 整数値のFloatは小数点なしで表示される
        assert_eq!(cell_to_string(&Data::Float(480.0)), "480");
        assert_eq!(cell_to_string(&Data::Float(4.5)), "4.5");
        assert_eq!(cell_to_string(&Data::Int(200)), "200");
    }

    #[test]
    fn test_cell_to_string_text_and_bool() {
        assert_eq!(
            cell_to_string(&Data::String("Copper".to_string())),
            "Copper"
        );
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Bool(false)), "FALSE");
    }

    #[test]
    fn test_cell_to_string_empty() {
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_excel_serial_date_only() {
        // シリアル値2 = 1900-01-01（1900年システム、1899-12-30起算）
        assert_eq!(excel_serial_to_string(2.0), "1900-01-01");
        // 2026-08-06 = シリアル値46240
        assert_eq!(excel_serial_to_string(46_240.0), "2026-08-06");
    }

    #[test]
    fn test_excel_serial_with_time() {
        // 0.5 = 正午
        assert_eq!(excel_serial_to_string(46_240.5), "2026-08-06 12:00:00");
    }

    #[test]
    fn test_excel_serial_out_of_range_falls_back() {
        assert_eq!(excel_serial_to_string(-1.0), "-1");
        assert_eq!(excel_serial_to_string(3_000_000.0), "3000000");
    }

    #[test]
    fn test_expected_headers_count() {
        assert_eq!(EXPECTED_HEADERS.len(), 9);
    }
}
