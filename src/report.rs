//! Report Module
//!
//! コンポーネントレコード列とレポートメタデータから、整形済みの
//! Markdownレポートドキュメントを組み立てるモジュール。
//! レイアウトは固定順序（ヘッダーブロック、メタデータ表、コンポーネント表、
//! サマリー、フッター）で、同一入力に対して決定的な出力を生成します。

use std::fs;
use std::path::PathBuf;

use unicode_width::UnicodeWidthStr;

use crate::api::PageSize;
use crate::error::AutoDocError;
use crate::types::{ComponentRecord, ReportMetadata};

/// レポートのブランドタイトル
const BRAND_TITLE: &str = "AutoDoc";

/// レポートのサブタイトル
const BRAND_SUBTITLE: &str = "Engineering Component Specification Report";

/// サマリーに常に表示する3つの標準ステータス値
const CANONICAL_STATUSES: [&str; 3] = ["Approved", "Under Review", "Pending"];

/// レポートレンダラー
///
/// ドキュメントの組み立てと出力先への書き込みを担当します。
/// コンポーネント表の列幅は、ページサイズのコンテンツ幅を列数で
/// 均等に分割して決定します。
#[derive(Debug)]
pub(crate) struct ReportRenderer {
    /// レポートの出力先ディレクトリ
    output_dir: PathBuf,

    /// ページサイズ（コンテンツ幅を決定）
    page_size: PageSize,
}

impl ReportRenderer {
    /// 新しいレンダラーを生成
    pub fn new(output_dir: impl Into<PathBuf>, page_size: PageSize) -> Self {
        Self {
            output_dir: output_dir.into(),
            page_size,
        }
    }

    /// レポートドキュメントを組み立てて出力先に書き込む
    ///
    /// 出力パスは`<output_dir>/<report_id>_<プロジェクト名の空白を'_'に置換>.md`
    /// です。同名のファイルが既に存在する場合は黙って上書きします。
    ///
    /// # 引数
    ///
    /// * `records` - 抽出されたコンポーネントレコード列
    /// * `meta` - レポートメタデータ
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き込まれたドキュメントのパス
    /// * `Err(AutoDocError::Render)` - 書き込みに失敗した場合。
    ///   部分的に書き込まれたファイルはクリーンアップされません
    pub fn write_report(
        &self,
        records: &[ComponentRecord],
        meta: &ReportMetadata,
    ) -> Result<PathBuf, AutoDocError> {
        let path = self.report_path(meta);
        let document = self.render(records, meta);

        fs::write(&path, document)
            .map_err(|e| AutoDocError::Render(format!("{}: {}", path.display(), e)))?;

        Ok(path)
    }

    /// レポートの出力パスを計算する
    pub fn report_path(&self, meta: &ReportMetadata) -> PathBuf {
        let filename = format!("{}_{}.md", meta.report_id, meta.project.replace(' ', "_"));
        self.output_dir.join(filename)
    }

    /// レポートドキュメントを文字列として組み立てる
    ///
    /// 固定順序で以下を出力します:
    /// 1. ヘッダーブロック（ブランドタイトル、サブタイトル、水平線）
    /// 2. メタデータ表（レポートID / プロジェクト / 生成時刻 / エンジニア /
    ///    コンポーネント数 / 固定ステータス`DRAFT`）
    /// 3. コンポーネント表（レコードが空の場合は表自体を省略）
    /// 4. サマリーブロック
    /// 5. フッター
    pub fn render(&self, records: &[ComponentRecord], meta: &ReportMetadata) -> String {
        let mut out = String::new();

        // ヘッダーブロック
        out.push_str(&format!("# {}\n\n", BRAND_TITLE));
        out.push_str(&format!("{}\n\n", BRAND_SUBTITLE));
        out.push_str("---\n\n");

        // メタデータ表
        let generated = meta.generated_at_display();
        let count = meta.component_count.to_string();
        let meta_rows = vec![
            row(&[
                "Report ID",
                meta.report_id.as_str(),
                "Project",
                meta.project.as_str(),
            ]),
            row(&[
                "Generated",
                generated.as_str(),
                "Engineer",
                meta.engineer.as_str(),
            ]),
            row(&["Components", count.as_str(), "Status", "DRAFT"]),
        ];
        render_table(&mut out, &meta_rows, &content_widths(&meta_rows));
        out.push('\n');

        // コンポーネント表
        out.push_str("## Component Specifications\n\n");
        if !records.is_empty() {
            // 列集合は先頭レコードのキーのみ（挿入順）で固定する。
            // 以降のレコードはこの列集合に対して引き当てられ、存在しない
            // キーは空セルになる（抽出時の"N/A"とは別物）。
            let columns: Vec<String> = records[0].keys().map(str::to_string).collect();

            let mut table_rows = Vec::with_capacity(records.len() + 1);
            table_rows.push(columns.clone());
            for record in records {
                table_rows.push(
                    columns
                        .iter()
                        .map(|c| record.get(c).unwrap_or("").to_string())
                        .collect(),
                );
            }

            // 列幅はコンテンツ幅を列数で均等割り
            let col_width = self.page_size.content_width() / columns.len().max(1);
            let widths = vec![col_width; columns.len()];
            render_table(&mut out, &table_rows, &widths);
        }
        out.push('\n');

        // サマリーブロック
        out.push_str("## Summary\n\n");
        let summary_rows = summary_rows(records);
        render_table(&mut out, &summary_rows, &content_widths(&summary_rows));
        out.push('\n');

        // フッター
        out.push_str("---\n\n");
        out.push_str(&format!(
            "Generated by AutoDoc Automation Pipeline · {} · {}  |  CONFIDENTIAL — INTERNAL USE ONLY\n",
            meta.generated_at_display(),
            meta.report_id
        ));

        out
    }
}

/// サマリーブロックの行を構築する
///
/// 固定行（合計と3つの標準ステータス）に続けて、`Type`フィールドの
/// 出現値ごとに1行を初出順で追加します。`Status`/`Type`フィールドを
/// 持たないレコードは`"Unknown"`として集計されます。
fn summary_rows(records: &[ComponentRecord]) -> Vec<Vec<String>> {
    let mut status_counts: Vec<(String, usize)> = Vec::new();
    let mut type_counts: Vec<(String, usize)> = Vec::new();

    for record in records {
        let status = record.get("Status").unwrap_or("Unknown");
        let type_ = record.get("Type").unwrap_or("Unknown");
        bump(&mut status_counts, status);
        bump(&mut type_counts, type_);
    }

    let total = records.len().to_string();
    let mut rows = vec![row(&["Total Components", total.as_str()])];
    for status in CANONICAL_STATUSES {
        let count = status_counts
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        rows.push(vec![status.to_string(), count.to_string()]);
    }
    for (type_, count) in &type_counts {
        rows.push(vec![format!("Type: {}", type_), count.to_string()]);
    }

    rows
}

/// 初出順を保持するカウンタをインクリメントする
fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k.as_str() == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// 各列の最大表示幅を計算する
fn content_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; cols];
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }
    widths
}

/// 表をMarkdown形式で出力する
///
/// 各セルは指定された列幅まで表示幅（全角文字は2桁）でパディングされます。
/// 1行目の直後に区切り行を出力します。
fn render_table(out: &mut String, rows: &[Vec<String>], col_widths: &[usize]) {
    for (row_idx, cells) in rows.iter().enumerate() {
        out.push('|');
        for (col_idx, cell) in cells.iter().enumerate() {
            let width = col_widths.get(col_idx).copied().unwrap_or(0);
            out.push(' ');
            out.push_str(cell);
            let pad = width.saturating_sub(cell.width());
            for _ in 0..pad {
                out.push(' ');
            }
            out.push_str(" |");
        }
        out.push('\n');

        // ヘッダー区切り行
        if row_idx == 0 {
            out.push('|');
            for col_idx in 0..cells.len() {
                let width = col_widths.get(col_idx).copied().unwrap_or(0).max(3);
                out.push(' ');
                for _ in 0..width {
                    out.push('-');
                }
                out.push_str(" |");
            }
            out.push('\n');
        }
    }
}
